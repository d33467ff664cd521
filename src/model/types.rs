//! Parameter type system for component descriptions

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Type tag as written in a `type` attribute
///
/// Anything outside this set is rejected while the document is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Bool,
    Single,
    Double,
    Pointer,
    String,
    Enum,
    EnumArray,
    Struct,
    StructArray,
    BasicArray,
    Class,
    OptionalClass,
    FunctionType,
    /// Deprecated spelling of `class`, rewritten by the normalizer
    Handle,
}

impl TypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Uint8 => "uint8",
            TypeTag::Uint16 => "uint16",
            TypeTag::Uint32 => "uint32",
            TypeTag::Uint64 => "uint64",
            TypeTag::Int8 => "int8",
            TypeTag::Int16 => "int16",
            TypeTag::Int32 => "int32",
            TypeTag::Int64 => "int64",
            TypeTag::Bool => "bool",
            TypeTag::Single => "single",
            TypeTag::Double => "double",
            TypeTag::Pointer => "pointer",
            TypeTag::String => "string",
            TypeTag::Enum => "enum",
            TypeTag::EnumArray => "enumarray",
            TypeTag::Struct => "struct",
            TypeTag::StructArray => "structarray",
            TypeTag::BasicArray => "basicarray",
            TypeTag::Class => "class",
            TypeTag::OptionalClass => "optionalclass",
            TypeTag::FunctionType => "functiontype",
            TypeTag::Handle => "handle",
        }
    }

    /// The scalar this tag denotes, if any
    pub fn scalar(self) -> Option<ScalarType> {
        ScalarType::from_name(self.as_str())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter pass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    In,
    Out,
    Return,
}

impl Pass {
    pub fn as_str(self) -> &'static str {
        match self {
            Pass::In => "in",
            Pass::Out => "out",
            Pass::Return => "return",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Bool,
    Single,
    Double,
    Pointer,
}

impl ScalarType {
    /// Look up a scalar by its description-file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        let scalar = match name {
            "uint8" => ScalarType::UInt8,
            "uint16" => ScalarType::UInt16,
            "uint32" => ScalarType::UInt32,
            "uint64" => ScalarType::UInt64,
            "int8" => ScalarType::Int8,
            "int16" => ScalarType::Int16,
            "int32" => ScalarType::Int32,
            "int64" => ScalarType::Int64,
            "bool" => ScalarType::Bool,
            "single" => ScalarType::Single,
            "double" => ScalarType::Double,
            "pointer" => ScalarType::Pointer,
            _ => return None,
        };
        Some(scalar)
    }
}

/// The four named-entity registries of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Enum,
    Struct,
    Class,
    FunctionType,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Enum => "enum",
            Category::Struct => "struct",
            Category::Class => "class",
            Category::FunctionType => "functiontype",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static TYPE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Z][a-zA-Z0-9_]{0,63}):)?([a-zA-Z0-9_]{0,64})$")
        .expect("type reference grammar is a valid regex")
});

/// A possibly namespace-qualified reference (`Namespace:Name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub namespace: Option<String>,
    pub name: String,
}

impl TypeRef {
    pub fn parse(reference: &str) -> Result<Self, ValidationError> {
        let captures = TYPE_REFERENCE
            .captures(reference)
            .ok_or_else(|| ValidationError::MalformedReference(reference.to_string()))?;

        Ok(TypeRef {
            namespace: captures.get(1).map(|m| m.as_str().to_string()),
            name: captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}:{}", namespace, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Decoded parameter type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Scalar(ScalarType),
    String,
    BasicArray(ScalarType),
    Enum(TypeRef),
    EnumArray(TypeRef),
    Struct(TypeRef),
    StructArray(TypeRef),
    Class { reference: TypeRef, optional: bool },
    FunctionType(TypeRef),
}

impl ParamKind {
    /// Decode a type tag and its `class` attribute
    ///
    /// A `basicarray` whose element is not a scalar yields `Ok(None)` for the
    /// element lookup failure to be reported with parameter context.
    pub fn decode(ty: TypeTag, class: &str) -> Result<Option<Self>, ValidationError> {
        let kind = match ty {
            TypeTag::String => ParamKind::String,
            TypeTag::BasicArray => match ScalarType::from_name(class) {
                Some(element) => ParamKind::BasicArray(element),
                None => return Ok(None),
            },
            TypeTag::Enum => ParamKind::Enum(TypeRef::parse(class)?),
            TypeTag::EnumArray => ParamKind::EnumArray(TypeRef::parse(class)?),
            TypeTag::Struct => ParamKind::Struct(TypeRef::parse(class)?),
            TypeTag::StructArray => ParamKind::StructArray(TypeRef::parse(class)?),
            TypeTag::Class | TypeTag::Handle => ParamKind::Class {
                reference: TypeRef::parse(class)?,
                optional: false,
            },
            TypeTag::OptionalClass => ParamKind::Class {
                reference: TypeRef::parse(class)?,
                optional: true,
            },
            TypeTag::FunctionType => ParamKind::FunctionType(TypeRef::parse(class)?),
            // Remaining tags are the scalars
            _ => return Ok(ty.scalar().map(ParamKind::Scalar)),
        };
        Ok(Some(kind))
    }

    /// Registry category and reference for composed types
    pub fn reference(&self) -> Option<(Category, &TypeRef)> {
        match self {
            ParamKind::Scalar(_) | ParamKind::String | ParamKind::BasicArray(_) => None,
            ParamKind::Enum(r) | ParamKind::EnumArray(r) => Some((Category::Enum, r)),
            ParamKind::Struct(r) | ParamKind::StructArray(r) => Some((Category::Struct, r)),
            ParamKind::Class { reference, .. } => Some((Category::Class, reference)),
            ParamKind::FunctionType(r) => Some((Category::FunctionType, r)),
        }
    }
}
