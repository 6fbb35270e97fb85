//! One-dimensional bin packing with Firebug Swarm Optimization.
//!
//! Items are packed into bins of fixed capacity. Candidate solutions are
//! continuous priority vectors (random keys) decoded into bin assignments
//! by a best-fit heuristic; a swarm of agents perturbs the vectors and
//! keeps the best-scoring packing found.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `PackingInstance`, `BinAssignment`
//! - **`validation`**: Instance integrity checks (zero capacity, zero or
//!   oversized weights)
//! - **`decoder`**: Random-key ranking and best-fit decoding
//! - **`fitness`**: Packing-efficiency score (lower = better)
//! - **`fso`**: Swarm configuration, population state, and search runner
//! - **`io`**: Instance file parsing
//! - **`report`**: Packing metrics and text/JSON result reports
//!
//! # Example
//!
//! ```
//! use u_binpack::fso::{FsoConfig, FsoRunner};
//! use u_binpack::models::PackingInstance;
//!
//! let instance = PackingInstance::checked(30, vec![5, 14, 11, 8, 3, 2, 13, 1]).unwrap();
//! let config = FsoConfig::default()
//!     .with_agents(4, 2)
//!     .with_iterations(1, 1)
//!     .with_inner_loops(2, 1);
//! let result = FsoRunner::run(&instance, &config).unwrap();
//! assert!(result.best.bin_count() >= instance.lower_bound());
//! ```
//!
//! # References
//!
//! - Bean (1994), "Genetic Algorithms and Random Keys for Sequencing and
//!   Optimization"
//! - Martello & Toth (1990), "Knapsack Problems: Algorithms and Computer
//!   Implementations"

pub mod decoder;
pub mod error;
pub mod fitness;
pub mod fso;
pub mod io;
pub mod models;
pub mod report;
pub mod validation;

pub use error::{PackingError, Result};
