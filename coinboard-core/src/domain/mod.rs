//! Domain types handed to the rendering surface.

pub mod history;
pub mod record;

pub use history::{HistorySeries, PricePoint};
pub use record::{MarketRecord, MarketTable, NormalizedRecord};
