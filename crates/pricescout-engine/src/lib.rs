//! Price discovery and selection: the tiered search strategy, price
//! normalization, wholesale classification and the recent-activity ledger.

pub mod classify;
pub mod ledger;
pub mod orchestrator;
pub mod price;

pub use classify::looks_wholesale;
pub use ledger::{ActivityLedger, HISTORY_LIMIT};
pub use orchestrator::{wholesale_query, SearchEngine, WHOLESALE_QUERY_SUFFIX};
pub use price::{parse_price, parse_raw_price};
