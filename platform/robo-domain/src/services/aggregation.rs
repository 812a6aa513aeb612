use crate::entities::price_series::PriceSeries;
use crate::errors::DomainError;
use crate::services::windowing::{records_in, trailing_windows, FIFTY_TWO_WEEKS};
use crate::value_objects::date_window::DateWindow;
use crate::value_objects::price_field::PriceField;
use crate::value_objects::price_record::PriceRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Scalar summary of one window. Derived on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowAggregate {
    pub label: String,
    pub window: DateWindow,
    pub samples: usize,
    pub mean_high: f64,
    pub mean_low: f64,
    pub mean_close: f64,
}

/// Arithmetic mean of `field`. An empty subset has no mean.
pub fn mean_of(records: &[&PriceRecord], field: PriceField) -> Result<f64, DomainError> {
    if records.is_empty() {
        return Err(DomainError::EmptySubset { field });
    }
    let sum: f64 = records.iter().map(|r| field.value(r)).sum();
    Ok(sum / records.len() as f64)
}

pub fn aggregate_window(
    records: &[PriceRecord],
    label: &str,
    window: DateWindow,
) -> Result<WindowAggregate, DomainError> {
    let subset = records_in(records, &window);
    let mean = |field| {
        mean_of(&subset, field).map_err(|_| DomainError::InsufficientHistory {
            label: label.to_string(),
            window,
        })
    };

    Ok(WindowAggregate {
        label: label.to_string(),
        window,
        samples: subset.len(),
        mean_high: mean(PriceField::High)?,
        mean_low: mean(PriceField::Low)?,
        mean_close: mean(PriceField::Close)?,
    })
}

pub fn latest_close(series: &PriceSeries) -> Result<f64, DomainError> {
    series
        .latest()
        .map(|r| r.close)
        .ok_or(DomainError::EmptySeries)
}

/// Mean high and low over the 52 weeks ending at `as_of`, both ends inclusive.
pub fn fifty_two_week_aggregate(
    records: &[PriceRecord],
    as_of: NaiveDate,
) -> Result<WindowAggregate, DomainError> {
    aggregate_window(
        records,
        "52w",
        DateWindow::trailing(as_of, FIFTY_TWO_WEEKS),
    )
}

/// The 8/16/32/64-week aggregates, newest first.
pub fn trailing_aggregates(
    records: &[PriceRecord],
    as_of: NaiveDate,
) -> Result<[WindowAggregate; 4], DomainError> {
    let [w8, w16, w32, w64] = trailing_windows(as_of)
        .map(|labeled| aggregate_window(records, &labeled.label(), labeled.window));
    Ok([w8?, w16?, w32?, w64?])
}
