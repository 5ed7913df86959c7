pub mod lookup;
pub mod synopsis;

pub use lookup::{Lookup, LookupError, LookupService, RefreshSummary};
pub use synopsis::{synopsis_block, synopsis_table};
