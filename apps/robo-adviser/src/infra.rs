use robo_application::config::{self, Config};
use robo_domain::repositories::market_data::DailyPriceSource;
use robo_domain::repositories::price_store::PriceStore;
use robo_infrastructure::market_data::AlphaVantageClient;
use robo_infrastructure::persistence::CsvPriceStore;
use std::path::PathBuf;

pub struct AdviseDeps {
    pub source: Box<dyn DailyPriceSource>,
    pub store: Box<dyn PriceStore>,
}

/// Resolves the API key first so a missing key fails before any request.
pub fn build_advise_deps(config: &Config, prices_csv: PathBuf) -> Result<AdviseDeps, String> {
    let api_key = config::resolve_api_key(config).map_err(|err| err.to_string())?;
    let client = AlphaVantageClient::new(
        config.provider.base_url.clone(),
        api_key,
        config.provider.output_size.clone(),
        config.provider.timeout_ms,
    )
    .map_err(|err| {
        format!(
            "failed to init market data client (base_url={}): {err}",
            config.provider.base_url
        )
    })?;

    Ok(AdviseDeps {
        source: Box::new(client),
        store: Box::new(CsvPriceStore::new(prices_csv)),
    })
}
