use crate::entities::price_series::PriceSeries;
use crate::errors::DomainError;
use crate::services::aggregation::{
    fifty_two_week_aggregate, latest_close, trailing_aggregates, WindowAggregate,
};
use crate::services::classifier::{classify, TrendInputs};
use crate::value_objects::recommendation::{Outcome, Recommendation};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub symbol: String,
    pub as_of: NaiveDate,
    pub latest_close: f64,
    pub fifty_two_week: WindowAggregate,
    /// 8/16/32/64-week aggregates, newest first.
    pub trailing: [WindowAggregate; 4],
    pub outcome: Outcome,
}

impl TrendReport {
    pub fn avg_52w_high(&self) -> f64 {
        self.fifty_two_week.mean_high
    }

    pub fn avg_52w_low(&self) -> f64 {
        self.fifty_two_week.mean_low
    }

    pub fn inputs(&self) -> TrendInputs {
        let [w8, w16, w32, w64] = &self.trailing;
        TrendInputs {
            w8: w8.mean_close,
            w16: w16.mean_close,
            w32: w32.mean_close,
            w64: w64.mean_close,
            latest_close: self.latest_close,
            avg_52w_low: self.fifty_two_week.mean_low,
        }
    }

    pub fn recommendation(&self) -> Recommendation {
        Recommendation::new(self.outcome, &self.symbol)
    }
}

/// Windows every statistic at the latest date present in `series`.
pub fn build_trend_report(series: &PriceSeries) -> Result<TrendReport, DomainError> {
    let as_of = series.max_date().ok_or(DomainError::EmptySeries)?;
    let latest_close = latest_close(series)?;
    let fifty_two_week = fifty_two_week_aggregate(series.records(), as_of)?;
    let trailing = trailing_aggregates(series.records(), as_of)?;

    let mut report = TrendReport {
        symbol: series.symbol().to_string(),
        as_of,
        latest_close,
        fifty_two_week,
        trailing,
        outcome: Outcome::NoBuy,
    };
    report.outcome = classify(&report.inputs());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::price_record::PriceRecord;
    use chrono::Duration;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 6, 14).expect("date")
    }

    /// `close_at(days_back)` prices one record per calendar day.
    fn series(days: i64, close_at: impl Fn(i64) -> f64) -> PriceSeries {
        let records = (0..days)
            .map(|back| {
                let close = close_at(back);
                PriceRecord {
                    date: as_of() - Duration::days(back),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 5_000,
                }
            })
            .collect();
        PriceSeries::new("NFLX", records)
    }

    #[test]
    fn rising_history_is_steady_rise() {
        let report = build_trend_report(&series(500, |back| 500.0 - back as f64 * 0.5))
            .expect("report");
        assert_eq!(report.as_of, as_of());
        assert_eq!(report.latest_close, 500.0);
        assert_eq!(report.outcome, Outcome::SteadyRiseNoBuy);
        assert_eq!(
            report.recommendation().rationale,
            "NFLX IS ON A STEADY RISE. DO NOT BUY!"
        );
    }

    #[test]
    fn declining_history_near_low_is_reversal_buy() {
        let report = build_trend_report(&series(500, |back| 250.0 + back as f64 * 0.5))
            .expect("report");
        assert_eq!(report.latest_close, 250.0);
        assert!(report.avg_52w_low() > report.latest_close);
        assert_eq!(report.outcome, Outcome::DeclineReversalBuy);
    }

    #[test]
    fn short_history_is_insufficient() {
        let err = build_trend_report(&series(100, |_| 10.0)).expect_err("too short");
        match err {
            DomainError::InsufficientHistory { label, .. } => assert_eq!(label, "32w"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_series_is_rejected() {
        let err = build_trend_report(&PriceSeries::default()).expect_err("empty");
        assert_eq!(err, DomainError::EmptySeries);
    }
}
