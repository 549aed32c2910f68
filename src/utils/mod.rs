//! Utilities Module
//!
//! Common utilities used by the tooling layer.

pub mod logging;
