//! Summarization pipeline
//!
//! This module provides the capability traits the engines plug into, the
//! runner that threads a request through every stage, observer hooks, the
//! request/response boundary, and configuration validation.

pub mod observer;
pub mod request;
pub mod runner;
pub mod traits;
pub mod validation;
