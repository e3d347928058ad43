//! Common constants shared across the quill compiler front end.
//!
//! This crate provides foundational values used by more than one crate:
//! - Compiler limits and thresholds (`limits`)
//! - Well-known synthetic names (`names`)

// Centralized limits and thresholds
pub mod limits;

// Names the compiler synthesizes rather than reads from source
pub mod names;
