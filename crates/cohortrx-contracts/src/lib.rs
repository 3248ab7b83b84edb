//! # cohortrx-contracts
//!
//! Shared types for the cohortrx drug recommender.
//!
//! All crates in the workspace import from here. No matching or scoring logic
//! lives in this crate, only data definitions and error types.

pub mod error;
pub mod patient;
pub mod prediction;
pub mod reference;
