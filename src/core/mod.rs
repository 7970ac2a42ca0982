// Core algorithm exports
pub mod criteria;
pub mod privacy;
pub mod search;

pub use criteria::{normalize, resolve_field_of_study, Clause, SearchPredicate};
pub use privacy::is_hidden_from;
pub use search::{SearchEngine, SearchOutcome};
