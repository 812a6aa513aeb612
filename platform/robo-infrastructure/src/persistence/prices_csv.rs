use chrono::NaiveDate;
use robo_domain::entities::price_series::PriceSeries;
use robo_domain::repositories::price_store::PriceStore;
use robo_domain::repositories::PortError;
use robo_domain::value_objects::price_record::PriceRecord;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CSV_HEADER: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write prices csv {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to flush prices csv {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read prices csv {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    timestamp: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl From<PriceRow> for PriceRecord {
    fn from(row: PriceRow) -> Self {
        PriceRecord {
            date: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

/// Overwrites `path` with one row per record, header first. Prices keep the
/// provider's four-decimal quote shape.
pub fn write_prices_csv(path: &Path, records: &[PriceRecord]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(write_err)?;
    wtr.write_record(CSV_HEADER).map_err(write_err)?;

    for record in records {
        wtr.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            format!("{:.4}", record.open),
            format!("{:.4}", record.high),
            format!("{:.4}", record.low),
            format!("{:.4}", record.close),
            record.volume.to_string(),
        ])
        .map_err(write_err)?;
    }

    wtr.flush().map_err(|source| StoreError::Flush {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_prices_csv(path: &Path) -> Result<Vec<PriceRecord>, StoreError> {
    let read_err = |source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
    reader
        .deserialize::<PriceRow>()
        .map(|row| row.map(PriceRecord::from).map_err(read_err))
        .collect()
}

/// Single flat file, replaced on every run.
#[derive(Debug, Clone)]
pub struct CsvPriceStore {
    path: PathBuf,
}

impl CsvPriceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, series: &PriceSeries) -> Result<usize, StoreError> {
        let span = tracing::info_span!(
            "infra.prices_csv.save",
            path = %self.path.display(),
            symbol = %series.symbol()
        );
        let _enter = span.enter();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let rows = series.sorted_desc();
        write_prices_csv(&self.path, &rows)?;
        metrics::counter!("robo.infra.prices_csv.rows_written").increment(rows.len() as u64);
        tracing::info!(rows = rows.len(), "wrote prices csv");
        Ok(rows.len())
    }
}

impl PriceStore for CsvPriceStore {
    fn write_prices(&self, series: &PriceSeries) -> Result<usize, PortError> {
        self.save(series).map_err(Into::into)
    }
}
