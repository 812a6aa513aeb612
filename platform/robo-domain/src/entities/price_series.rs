use crate::value_objects::price_record::PriceRecord;
use chrono::NaiveDate;

/// Daily price history of one symbol. Records carry no declared order; every
/// accessor that depends on recency looks at `date`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, records: Vec<PriceRecord>) -> Self {
        Self {
            symbol: symbol.into(),
            records,
        }
    }

    /// Same records under another symbol.
    pub fn with_symbol(self, symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            records: self.records,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }

    /// The record with the greatest date.
    pub fn latest(&self) -> Option<&PriceRecord> {
        self.records.iter().max_by_key(|r| r.date)
    }

    /// Newest first, the order the provider reports days in.
    pub fn sorted_desc(&self) -> Vec<PriceRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, close: f64) -> PriceRecord {
        PriceRecord {
            date: date.parse().expect("date"),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10,
        }
    }

    #[test]
    fn latest_ignores_insertion_order() {
        let series = PriceSeries::new(
            "MSFT",
            vec![
                record("2024-01-02", 1.0),
                record("2024-01-05", 3.0),
                record("2024-01-03", 2.0),
            ],
        );
        assert_eq!(series.max_date(), "2024-01-05".parse().ok());
        assert_eq!(series.latest().map(|r| r.close), Some(3.0));

        let sorted = series.sorted_desc();
        assert!(sorted.windows(2).all(|w| w[0].date > w[1].date));
    }

    #[test]
    fn empty_series_has_no_latest() {
        let series = PriceSeries::new("MSFT", Vec::new());
        assert!(series.is_empty());
        assert!(series.max_date().is_none());
        assert!(series.latest().is_none());
    }
}
