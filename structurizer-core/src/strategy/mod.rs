//! Strategy layer for provider-specific behaviors.
//!
//! Handles differences between providers such as JSON output modes
//! (JSON Schema vs JSON Object).

pub mod json_output;

pub use json_output::{
    detect_json_strategy, JsonModeStrategy, JsonOutputStrategy, JsonSchemaStrategy,
};
