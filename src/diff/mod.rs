//! Structural diff between two component descriptions
//!
//! The result is an [`EditScript`]: attribute changes, element additions and
//! element removals that turn description A into description B. It is an
//! audit artifact; nothing applies it.

pub mod engine;

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::DiffFormat;
use crate::error::{DiffError, ValidationError};
use crate::model::{
    ClassDef, ComponentModel, EnumDef, EnumOption, ErrorDef, FunctionTypeDef, ImportDecl,
    MethodDef, ParamDef, StructDef, StructMember,
};
use crate::semantic::validate;

pub use engine::diff;

/// Value of a changed attribute, keeping numbers numeric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(value) => write!(f, "{}", value),
            AttributeValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

/// `<changeattribute>`: one scalar attribute differs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    #[serde(rename = "@xpath")]
    pub path: String,
    #[serde(rename = "oldvalue")]
    pub old_value: AttributeValue,
    #[serde(rename = "newvalue")]
    pub new_value: AttributeValue,
}

/// Any element that can be added or removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffElement {
    Class(ClassDef),
    Method(MethodDef),
    Param(ParamDef),
    Enum(EnumDef),
    #[serde(rename = "option")]
    EnumOption(EnumOption),
    Struct(StructDef),
    Member(StructMember),
    Error(ErrorDef),
    FunctionType(FunctionTypeDef),
    #[serde(rename = "importcomponent")]
    Import(ImportDecl),
}

/// `<addelement>` / `<removeelement>`: path of the element and the element itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementChange {
    #[serde(rename = "@xpath")]
    pub path: String,
    #[serde(rename = "$value")]
    pub element: DiffElement,
}

/// Edit script turning one description into another
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "componentdiff")]
pub struct EditScript {
    #[serde(rename = "changeattribute", default)]
    pub changes: Vec<AttributeChange>,
    #[serde(rename = "addelement", default)]
    pub additions: Vec<ElementChange>,
    #[serde(rename = "removeelement", default)]
    pub removals: Vec<ElementChange>,
}

impl EditScript {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len() + self.additions.len() + self.removals.len()
    }

    /// Tab-indented XML document rooted at `<componentdiff>`
    pub fn to_xml(&self) -> Result<String, DiffError> {
        let mut buffer = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
        serializer.indent('\t', 1);
        self.serialize(serializer)
            .map_err(|err| DiffError::Xml(err.to_string()))?;
        Ok(buffer)
    }

    pub fn to_json(&self) -> Result<String, DiffError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, DiffError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn render(&self, format: DiffFormat) -> Result<String, DiffError> {
        match format {
            DiffFormat::Xml => self.to_xml(),
            DiffFormat::Json => self.to_json(),
        }
    }

    /// Render and write to `path`, returning the rendered text
    pub fn write_to(&self, path: &Path, format: DiffFormat) -> Result<String, DiffError> {
        let rendered = self.render(format)?;
        fs::write(path, &rendered).map_err(|source| DiffError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(rendered)
    }
}

/// Validate both descriptions, then diff them
pub fn diff_components(
    a: &ComponentModel,
    b: &ComponentModel,
) -> Result<EditScript, ValidationError> {
    validate(a)?;
    validate(b)?;
    Ok(diff(a, b))
}
