//! Bin packing domain models.
//!
//! Provides the problem instance and the decoded solution type.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `PackingInstance` | Bin capacity + ordered item weights |
//! | `BinAssignment` | Bins, free capacities, regrouped keys, score |

mod assignment;
mod instance;

pub use assignment::BinAssignment;
pub use instance::PackingInstance;
