//! Firebug Swarm Optimization over random-key encodings.
//!
//! Candidate solutions are continuous priority vectors decoded by
//! [`crate::decoder`] and scored by [`crate::fitness`]. The swarm is
//! organised as `M` male agents, each owning `F` female candidate vectors
//! and tracking its best one.
//!
//! # Submodules
//!
//! - [`config`]: Run parameters and seeds
//! - [`population`]: Key tensor, per-male best index, global best record
//! - `engine`: Initialization, exploration, exploitation, convergence
//!
//! # Reference
//! Noel et al. (2021), "A new biologically inspired global optimization
//! algorithm based on firebug reproductive swarming behaviour"

pub mod config;
mod engine;
pub mod population;

pub use config::FsoConfig;
pub use engine::{FsoResult, FsoRunner, Improvement, Phase};
pub use population::{GlobalBest, Population};
