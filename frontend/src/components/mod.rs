pub mod feedback_modal;
pub mod header;
pub mod health_log_page;
pub mod pet_card;
pub mod pet_form;
pub mod registration_form;
pub mod roster_page;
pub mod survey_page;
