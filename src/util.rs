//! Utility functions and structures.

pub mod json;
