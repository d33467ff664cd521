//! In-memory model of a component description
//!
//! The structs mirror the document layout one-to-one so that serde can read
//! them straight from XML and write sub-elements back out in diff scripts.

pub mod global;
pub mod types;
pub mod version;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use global::{Global, LifecycleRole};
pub use types::{Category, ParamKind, Pass, ScalarType, TypeRef, TypeTag};
pub use version::SemanticVersion;

/// Root of a component description
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename = "component")]
pub struct ComponentModel {
    #[serde(rename = "@libraryname", default)]
    pub library_name: String,
    #[serde(rename = "@namespace", default)]
    pub namespace: String,
    #[serde(rename = "@basename", default)]
    pub base_name: String,
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(rename = "@copyright", default)]
    pub copyright: String,
    #[serde(rename = "@year", default)]
    pub year: i32,
    #[serde(default)]
    pub license: License,
    #[serde(default)]
    pub errors: ErrorList,
    #[serde(rename = "enum", default)]
    pub enums: Vec<EnumDef>,
    #[serde(rename = "struct", default)]
    pub structs: Vec<StructDef>,
    #[serde(rename = "class", default)]
    pub classes: Vec<ClassDef>,
    #[serde(rename = "functiontype", default)]
    pub function_types: Vec<FunctionTypeDef>,
    #[serde(default)]
    pub global: Global,
    #[serde(rename = "importcomponent", default)]
    pub imports: Vec<ImportDecl>,
    #[serde(default)]
    pub bindings: BindingList,
    #[serde(default)]
    pub implementations: ImplementationList,

    /// Imported components keyed by their declared namespace
    #[serde(skip)]
    pub imported: BTreeMap<String, ComponentModel>,
    /// Version of the tool that loaded this description
    #[serde(skip)]
    pub tool_version: String,
    /// File this description was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ComponentModel {
    /// The single class named by `global.baseclassname`
    pub fn base_class(&self) -> Option<&ClassDef> {
        self.classes
            .iter()
            .find(|class| class.name == self.global.base_class_name)
    }

    pub fn is_base_class(&self, class: &ClassDef) -> bool {
        class.name == self.global.base_class_name
    }

    /// Effective parent of a class: the declared one, else the base class
    pub fn parent_of<'a>(&'a self, class: &'a ClassDef) -> Option<&'a str> {
        if !class.parent.is_empty() {
            Some(&class.parent)
        } else if !self.is_base_class(class) && !self.global.base_class_name.is_empty() {
            Some(&self.global.base_class_name)
        } else {
            None
        }
    }

    pub fn semantic_version(&self) -> Option<SemanticVersion> {
        SemanticVersion::parse(&self.version)
    }
}

/// `<license>` with its ordered lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    #[serde(rename = "line", default)]
    pub lines: Vec<LicenseLine>,
}

impl License {
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.value.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseLine {
    #[serde(rename = "@value", default)]
    pub value: String,
}

/// `<errors>` container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorList {
    #[serde(rename = "error", default)]
    pub errors: Vec<ErrorDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDef {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@code")]
    pub code: i64,
    #[serde(rename = "@description", default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "option", default)]
    pub options: Vec<EnumOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumOption {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value")]
    pub value: i64,
    #[serde(rename = "@description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn unit_extent() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "member", default)]
    pub members: Vec<StructMember>,
}

/// Struct member; `rows`/`columns` above one make it a fixed array or matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructMember {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@type")]
    pub ty: TypeTag,
    #[serde(rename = "@class", default, skip_serializing_if = "String::is_empty")]
    pub class: String,
    #[serde(rename = "@rows", default = "unit_extent")]
    pub rows: u32,
    #[serde(rename = "@columns", default = "unit_extent")]
    pub columns: u32,
}

impl Default for StructMember {
    fn default() -> Self {
        StructMember {
            name: String::new(),
            ty: TypeTag::Int32,
            class: String::new(),
            rows: 1,
            columns: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "@parent", default, skip_serializing_if = "String::is_empty")]
    pub parent: String,
    #[serde(rename = "method", default)]
    pub methods: Vec<MethodDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@description", default)]
    pub description: String,
    #[serde(rename = "param", default)]
    pub params: Vec<ParamDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@type")]
    pub ty: TypeTag,
    #[serde(rename = "@pass")]
    pub pass: Pass,
    #[serde(rename = "@class", default, skip_serializing_if = "String::is_empty")]
    pub class: String,
    #[serde(rename = "@description", default)]
    pub description: String,
}

impl ParamDef {
    pub fn new(name: &str, ty: TypeTag, pass: Pass) -> Self {
        ParamDef {
            name: name.to_string(),
            ty,
            pass,
            class: String::new(),
            description: String::new(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = class.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Function-pointer type usable as a `functiontype` parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionTypeDef {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@description", default)]
    pub description: String,
    #[serde(rename = "param", default)]
    pub params: Vec<ParamDef>,
}

/// `<importcomponent uri=".." namespace=".."/>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    #[serde(rename = "@uri")]
    pub uri: String,
    #[serde(rename = "@namespace")]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingList {
    #[serde(rename = "binding", default)]
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(rename = "@language", default)]
    pub language: String,
    #[serde(rename = "@indentation", default)]
    pub indentation: String,
    #[serde(rename = "@classidentifier", default)]
    pub class_identifier: String,
}

impl Binding {
    pub fn indent(&self) -> String {
        decode_indentation(&self.indentation)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationList {
    #[serde(rename = "implementation", default)]
    pub implementations: Vec<Implementation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Implementation {
    #[serde(rename = "@language", default)]
    pub language: String,
    #[serde(rename = "@indentation", default)]
    pub indentation: String,
    #[serde(rename = "@classidentifier", default)]
    pub class_identifier: String,
    #[serde(rename = "@stubidentifier", default)]
    pub stub_identifier: String,
}

impl Implementation {
    pub fn indent(&self) -> String {
        decode_indentation(&self.indentation)
    }
}

/// Decode an indentation setting (`tabs`, `4spaces`, ...)
///
/// Unset means four spaces; anything unreadable falls back to a tab.
pub fn decode_indentation(setting: &str) -> String {
    if setting.is_empty() {
        return " ".repeat(4);
    }
    if setting == "tabs" {
        return "\t".to_string();
    }
    match setting
        .strip_suffix("spaces")
        .and_then(|count| count.parse::<usize>().ok())
    {
        Some(count) if count > 0 => " ".repeat(count),
        _ => {
            tracing::warn!("invalid indentation \"{}\", using tabs instead", setting);
            "\t".to_string()
        }
    }
}
