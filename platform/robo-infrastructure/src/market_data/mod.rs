pub mod alpha_vantage;
pub mod response;

pub use alpha_vantage::{AlphaVantageClient, FetchError};
pub use response::{parse_daily_response, ResponseError};
