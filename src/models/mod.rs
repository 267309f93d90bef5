pub mod aggregate;
pub mod kpi;
pub mod transaction;

pub use aggregate::*;
pub use kpi::*;
pub use transaction::*;
