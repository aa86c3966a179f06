//! Calendar-date constraint satisfaction.
//!
//! Schedules `n` events onto days of a shared date range so that every
//! unary (`event <op> date`) and binary (`event <op> event`) comparison
//! holds:
//!
//! - **Node consistency**: unary constraints prune each domain once.
//! - **AC-3**: binary constraints prune values without support.
//! - **Backtracking**: index-ordered depth-first search over the pruned
//!   domains returns the first satisfying assignment, or none.
//!
//! # Features
//!
//! - `parallel`: [`csp::solve_batch`] solves independent models with rayon.
//! - `serde`: serialization for models, constraints, configs and results.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem. It
//! knows nothing about calendars beyond day-granular dates; what an event
//! means is up to the consumer.

pub mod csp;
