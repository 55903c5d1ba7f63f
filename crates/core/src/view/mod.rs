pub mod query;
pub mod row;

pub use query::{Page, SortKey, StockQuery, DEFAULT_PAGE_SIZE};
pub use row::StockRow;
