pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod selection;
pub mod session;
pub mod views;

pub use aggregate::{aggregate_by_field, totals, AggregateBucket, GroupField, Totals};
pub use catalog::Catalog;
pub use error::FetchError;
pub use fetcher::RecordFetcher;
pub use filter::{filter, FilterPredicate, ZipSelector};
pub use selection::{Surface, ViewState};
pub use session::{LoadStatus, Session};
