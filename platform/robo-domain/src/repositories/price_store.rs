use super::PortError;
use crate::entities::price_series::PriceSeries;

pub trait PriceStore {
    /// Replaces whatever the store held with `series`. Returns rows written.
    fn write_prices(&self, series: &PriceSeries) -> Result<usize, PortError>;
}
