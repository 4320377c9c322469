//! # Analysis Module
//!
//! Tracking-data analysis tools.
//!
//! ## Submodules
//!
//! - `possession` - Ball control, possession episodes and their statistics

pub mod possession;
