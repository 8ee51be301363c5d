//! Value types produced and consumed by scans.

mod category;
mod finding;
mod report;

pub use category::*;
pub use finding::*;
pub use report::*;
