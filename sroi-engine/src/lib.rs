#![warn(missing_docs)]
//! A present-value engine for social return on investment (SROI) analysis.
//!
//! The engine projects the first-year net impact of every outcome across a
//! horizon of years, decays it by the outcome's drop-off, discounts each year
//! back to the present and aggregates the result into a single ratio of
//! social value per unit invested.
//!
//! The computation is pure and synchronous: it borrows its inputs, owns no
//! state and may be called concurrently from any number of threads.

/**
 * The valuation itself.
 */
mod engine;
pub use engine::{compute, evaluate};

/**
 * Tabular and summary renderings of a valuation.
 */
mod export;
pub use export::*;

/// Types for reading project files, intended for use with serde
#[cfg(feature = "io")]
pub mod io;

// The models are part of this crate's interface, so we re-export them for convenience
pub use sroi_core::models::*;
