pub mod pet;
pub mod health_log;
