use robo_domain::errors::DomainError;
use robo_domain::repositories::market_data::DailyPriceSource;
use robo_domain::repositories::price_store::PriceStore;
use robo_domain::repositories::PortError;
use robo_domain::services::trend::{build_trend_report, TrendReport};
use std::time::Instant;
use thiserror::Error;
use tracing::info_span;

#[derive(Debug, Error)]
pub enum AdviseError {
    #[error("request error for {symbol}: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: PortError,
    },

    #[error("failed to persist prices: {source}")]
    Store {
        #[source]
        source: PortError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Outcome of one advise run, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub symbol: String,
    pub last_refreshed: String,
    pub rows_written: usize,
    pub report: TrendReport,
}

/// Fetch, persist, then analyse. A failed fetch never touches the store, and
/// the prices are persisted even when the history turns out too short to
/// classify. The report always names the requested `symbol`.
pub fn advise(
    source: &dyn DailyPriceSource,
    store: &dyn PriceStore,
    symbol: &str,
) -> Result<Advice, AdviseError> {
    let _span = info_span!("advise", symbol = %symbol).entered();
    let stage_start = Instant::now();

    tracing::info!("issuing price request");
    let prices = source
        .fetch_daily(symbol)
        .map_err(|source| AdviseError::Fetch {
            symbol: symbol.to_string(),
            source,
        })?;
    metrics::histogram!("robo.advise.fetch_ms").record(stage_start.elapsed().as_millis() as f64);
    if prices.symbol != symbol {
        tracing::debug!(provider_symbol = %prices.symbol, "provider reported a different symbol");
    }
    let last_refreshed = prices.last_refreshed;
    let series = prices.series.with_symbol(symbol);

    let rows_written = store
        .write_prices(&series)
        .map_err(|source| AdviseError::Store { source })?;

    let report = build_trend_report(&series)?;
    tracing::info!(
        as_of = %report.as_of,
        outcome = %report.outcome,
        rows = rows_written,
        "trend report built"
    );
    metrics::histogram!("robo.advise.total_ms").record(stage_start.elapsed().as_millis() as f64);

    Ok(Advice {
        symbol: symbol.to_string(),
        last_refreshed,
        rows_written,
        report,
    })
}
