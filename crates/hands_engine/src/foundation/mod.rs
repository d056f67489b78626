//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types for 2D world coordinates
//! - Frame timing for the fixed simulation tick
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
