pub mod market_data;
pub mod price_store;

/// Error carried across a port. Adapters keep their own typed errors and box
/// them here so the application layer does not depend on infrastructure.
pub type PortError = Box<dyn std::error::Error + Send + Sync + 'static>;
