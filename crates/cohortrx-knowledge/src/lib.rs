//! # cohortrx-knowledge
//!
//! TOML-driven clinical reference tables for the cohortrx engine.
//!
//! ## Overview
//!
//! This crate provides [`KnowledgeBase`], which implements the
//! [`ReferenceData`](cohortrx_core::traits::ReferenceData) trait. It holds
//! three tables:
//!
//! - **drugs**: dosage, frequency, and indication text per canonical drug
//! - **interactions**: known interacting pairs with a severity tier
//! - **fallback**: symptom/condition keywords mapped to a default drug
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use cohortrx_knowledge::KnowledgeBase;
//!
//! let knowledge = KnowledgeBase::builtin()?;
//! // Pass `Arc::new(knowledge)` to `cohortrx_core::Recommender::new(...)`.
//! ```

pub mod base;
pub mod table;

pub use base::KnowledgeBase;
pub use table::KnowledgeConfig;

// ── Tests ─────────────────────────────────────────────────────────────────────
