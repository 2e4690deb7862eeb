pub mod pet_mapper;
pub mod health_log_mapper;
