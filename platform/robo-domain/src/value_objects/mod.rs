pub mod date_window;
pub mod price_field;
pub mod price_record;
pub mod recommendation;
