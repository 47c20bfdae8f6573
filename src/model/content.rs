//! Content templates keyed by `(type, name)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which kind of page a template describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    State,
    City,
    Facility,
}

impl TemplateType {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateType::State => "state",
            TemplateType::City => "city",
            TemplateType::Facility => "facility",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(TemplateType::State),
            "city" => Ok(TemplateType::City),
            "facility" => Ok(TemplateType::Facility),
            other => Err(format!("unknown template type: {other}")),
        }
    }
}

/// Ordered text blocks substituted into a page when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTemplate {
    pub id: i32,
    pub template_type: TemplateType,
    pub template_name: String,
    pub content_blocks: Vec<String>,
    #[serde(default)]
    pub placeholders: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
