pub mod prices_csv;

pub use prices_csv::{read_prices_csv, write_prices_csv, CsvPriceStore, StoreError};
