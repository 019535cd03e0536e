//! AHP Decision Engine
//!
//! A Rust library implementing the Analytic Hierarchy Process (AHP) for
//! multi-criteria decision making: pairwise comparison matrices, priority
//! derivation, consistency checking, global aggregation, and what-if
//! sensitivity analysis.
//!
//! # Features
//!
//! - Reciprocal comparison matrices with a single guarded mutation primitive
//! - Geometric-mean priority vectors with λmax / CI / CR consistency metrics
//! - Weighted aggregation into a stable global ranking
//! - Tornado, weight-sweep, and rank-inversion sensitivity analysis
//! - Manual criteria weighting as an alternative to pairwise comparison
//! - Project persistence records that round-trip the full decision model
//!
//! # Architecture
//!
//! ```text
//! judgments ──▶ ComparisonMatrix ──▶ Priority Engine ──▶ Aggregator ──▶ ranking
//!                                          │                  ▲
//!                                          ▼                  │
//!                                   ConsistencyAnalysis   Sensitivity
//!                                                          Analyzer
//! ```
//!
//! All computation is synchronous and deterministic; the engine owns no
//! persistent state. A [`model::DecisionModel`] is the single source of
//! truth, owned by the enclosing session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod error;
pub mod matrix;
pub mod model;
pub mod priority;
pub mod project;
pub mod scale;
pub mod sensitivity;
