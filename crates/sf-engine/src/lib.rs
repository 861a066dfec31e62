//! # sf-engine - Scratch-card scoring engine for ScratchForge
//!
//! Turns a validated game configuration into played rounds: a weighted
//! symbol grid, the win combinations it satisfies, the stacked reward and
//! at most one bonus effect.
//!
//! ## Architecture
//!
//! ```text
//! ConfigParser (JSON → GameConfig)
//!     │
//!     v
//! play(config, bet, rng)
//!     ├── MatrixGenerator   (weighted draw per cell)
//!     ├── evaluate          (same_symbols / linear_symbols, compounding)
//!     └── apply_bonus       (one random bonus cell, only on a win)
//!           │
//!           v
//!     PlayResult → JSON
//! ```
//!
//! The random source is always passed in explicitly. One draw is consumed
//! per generated cell in row-major order, followed by at most one draw for
//! the bonus pick, so a seeded source reproduces a round exactly.

pub mod bonus;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod grid;
pub mod parser;
pub mod result;
pub mod symbols;

pub use bonus::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use evaluator::*;
pub use generator::*;
pub use grid::*;
pub use parser::ConfigParser;
pub use result::*;
pub use symbols::*;
