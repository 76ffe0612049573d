//! # Structurizer Layers
//!
//! Built-in layers for wrapping providers.
//!
//! Currently implemented layers:
//! - `LoggingLayer`: Logs all provider operations with timing information
//!
//! ## Usage
//!
//! ```ignore
//! use structurizer_core::RuntimeExecutor;
//! use structurizer_layer::LoggingLayer;
//!
//! let executor = RuntimeExecutor::builder(provider)
//!     .layer(LoggingLayer::new())
//!     .finish();
//! ```

pub mod logging;

// Re-exports
pub use logging::{LoggingLayer, LoggingProvider};
