pub mod button;
pub mod footer;
pub mod header;
pub mod letter_grid;
pub mod location_prompt;
pub mod name_form;
pub mod result_message;
