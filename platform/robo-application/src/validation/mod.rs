use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("check your symbol: expecting a minimum of one character")]
    Empty,

    #[error("check your symbol: expecting a non-numeric symbol, got {0:?}")]
    Numeric(String),
}

/// Trims and upper-cases `raw`. Runs before any network call.
pub fn validate_symbol(raw: &str) -> Result<String, SymbolError> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return Err(SymbolError::Empty);
    }
    // "inf"/"nan" parse as f64 but are plausible tickers.
    if symbol.parse::<f64>().is_ok_and(f64::is_finite) {
        return Err(SymbolError::Numeric(symbol.to_string()));
    }
    Ok(symbol.to_uppercase())
}
