use super::PortError;
use crate::entities::price_series::PriceSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyPrices {
    pub symbol: String,
    /// The provider's "last refreshed" stamp, verbatim. It may carry a time.
    pub last_refreshed: String,
    pub series: PriceSeries,
}

pub trait DailyPriceSource {
    fn fetch_daily(&self, symbol: &str) -> Result<DailyPrices, PortError>;
}
