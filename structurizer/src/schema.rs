//! Extraction targets for `/extract/`.
//!
//! Each target is a plain Rust struct. Its JSON Schema is derived with
//! schemars and sent to the provider in strict mode; the provider's reply is
//! deserialized back into the struct before it is returned to the caller.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

// Calendar event mentioned in free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CalendarEvent {
    pub name: String,
    pub date: String,
    pub participants: Vec<String>,
}

// Summary fields of a research paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResearchPaperExtraction {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: Vec<String>,
}

/// Schema selector accepted by `/extract/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaKind {
    #[default]
    Calendar,
    Research,
}

impl SchemaKind {
    /// Resolve the `schema` field of a request.
    ///
    /// A missing selector means `calendar`. Matching ignores case but not
    /// surrounding whitespace.
    pub fn from_selector(selector: Option<&str>) -> Option<Self> {
        match selector.map(str::to_lowercase).as_deref() {
            None | Some("calendar") => Some(Self::Calendar),
            Some("research") => Some(Self::Research),
            Some(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Research => "research",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::Calendar => "Extract the event information.",
            Self::Research => {
                "You are an expert at structured data extraction. \
                 You will be given unstructured text from a research paper \
                 and should convert it into the given structure."
            }
        }
    }

    pub fn target(&self) -> TargetSchema {
        match self {
            Self::Calendar => TargetSchema::of::<CalendarEvent>(),
            Self::Research => TargetSchema::of::<ResearchPaperExtraction>(),
        }
    }
}

/// A named JSON Schema plus the typed check for replies against it.
#[derive(Debug, Clone)]
pub struct TargetSchema {
    name: String,
    schema: serde_json::Value,
    normalize: fn(serde_json::Value) -> Result<serde_json::Value, serde_json::Error>,
}

impl TargetSchema {
    /// Build the target for `T`.
    pub fn of<T>() -> Self
    where
        T: JsonSchema + Serialize + DeserializeOwned,
    {
        let mut schema = serde_json::Value::from(schema_for!(T));
        // Meta-schema URI is not part of the structure the provider validates
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
        }

        Self {
            name: T::schema_name().into_owned(),
            schema,
            normalize: normalize_as::<T>,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn json_schema(&self) -> &serde_json::Value {
        &self.schema
    }

    /// Check `value` against the target type and return its canonical JSON.
    pub fn validate(&self, value: serde_json::Value) -> Result<serde_json::Value, ExtractError> {
        (self.normalize)(value).map_err(|source| ExtractError::Validation {
            schema: self.name.clone(),
            source,
        })
    }
}

fn normalize_as<T>(value: serde_json::Value) -> Result<serde_json::Value, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let typed: T = serde_json::from_value(value)?;
    serde_json::to_value(typed)
}
