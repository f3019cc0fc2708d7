//! Domain types: trading days, the normalized series, and identity hashes.

pub mod ids;
pub mod range;
pub mod record;
pub mod report;
pub mod series;

pub use ids::{ConfigHash, SourceHash};
pub use range::DateRange;
pub use record::{TradingDay, TradingDayRecord};
pub use report::IngestReport;
pub use series::TradingSeries;
