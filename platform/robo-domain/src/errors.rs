use crate::value_objects::date_window::DateWindow;
use crate::value_objects::price_field::PriceField;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A window required by the analysis holds no trading days, e.g. a symbol
    /// listed for less than 64 weeks.
    #[error("insufficient history: no trading days in the {label} window {window}")]
    InsufficientHistory { label: String, window: DateWindow },

    #[error("price series is empty")]
    EmptySeries,

    #[error("cannot average {} over an empty subset", field.as_str())]
    EmptySubset { field: PriceField },
}
