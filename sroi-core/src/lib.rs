#![warn(missing_docs)]
//! Core types for social return on investment (SROI) valuation.
//!
//! An SROI analysis weighs the money committed to a project against the
//! discounted value of the social outcomes it produces. The types in this
//! crate describe both sides of that calculation: the project parameters and
//! outcome records supplied by a caller, and the valuation produced from them.
//!
//! Every input type validates itself on construction (and on deserialization,
//! when the `serde` feature is enabled), so downstream consumers such as the
//! valuation engine can operate on them without re-checking invariants.

/// Domain models for SROI valuation.
///
/// This module contains the validated inputs of a valuation (parameters and
/// outcome records) as well as the structured result. The models carry only
/// the minimal logic required to maintain their invariants; the computation
/// itself lives in the engine crate.
pub mod models;
