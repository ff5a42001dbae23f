//! Market data acquisition and preparation.

pub mod provider;
pub mod table;
pub mod yahoo;

pub use provider::{
    load_price_table, DailyClose, DataError, LoadProgress, PriceProvider, StdoutProgress,
};
pub use table::PriceTable;
pub use yahoo::YahooProvider;
