//! Unified error types for act-idl using thiserror

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Category, LifecycleRole, TypeTag};

/// Top-level error type for front-end operations
#[derive(Error, Debug)]
pub enum ActError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("diff error: {0}")]
    Diff(#[from] DiffError),
}

/// Errors raised while reading a description and its imports
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("\"{}\" is not a valid component description: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("\"{}\" violates the document grammar: {}", path.display(), issues.join("; "))]
    Grammar { path: PathBuf, issues: Vec<String> },

    #[error("namespace of imported component \"{declared}\" does not match its actual namespace \"{actual}\"")]
    NamespaceMismatch { declared: String, actual: String },

    #[error("namespace \"{0}\" is imported more than once")]
    DuplicateImport(String),

    #[error("import cycle detected: \"{}\" is already being loaded", path.display())]
    ImportCycle { path: PathBuf },
}

/// Semantic validation errors
///
/// Each variant is one named rule; validation stops at the first one hit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("version \"{0}\" is invalid")]
    InvalidVersion(String),

    #[error("no copyright information given")]
    MissingCopyright,

    #[error("invalid year {0} given")]
    InvalidYear(i32),

    #[error("invalid namespace \"{0}\"")]
    InvalidNamespace(String),

    #[error("invalid library name \"{0}\"")]
    InvalidLibraryName(String),

    #[error("invalid base name \"{0}\"")]
    InvalidBaseName(String),

    #[error("in imported component \"{namespace}\": {source}")]
    InImport {
        namespace: String,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("invalid error name \"{0}\"")]
    InvalidErrorName(String),

    #[error("duplicate error name \"{0}\"")]
    DuplicateErrorName(String),

    #[error("invalid error code {code} for error \"{name}\"")]
    InvalidErrorCode { code: i64, name: String },

    #[error("duplicate error code {code} for error \"{name}\"")]
    DuplicateErrorCode { code: i64, name: String },

    #[error("invalid error description \"{description}\" for error \"{name}\"")]
    InvalidErrorDescription { name: String, description: String },

    #[error("component is missing the required error \"{0}\"")]
    MissingRequiredError(String),

    #[error("invalid {field} \"{value}\" in {section} \"{language}\"")]
    InvalidOverride {
        section: &'static str,
        field: &'static str,
        language: String,
        value: String,
    },

    #[error("invalid {category} name \"{name}\"")]
    InvalidName { category: Category, name: String },

    #[error("duplicate {category} name \"{name}\"")]
    DuplicateName { category: Category, name: String },

    #[error("invalid {owner} description \"{description}\" in {owner} \"{name}\"")]
    InvalidDescription {
        owner: &'static str,
        name: String,
        description: String,
    },

    #[error("invalid option name \"{option}\" in enum \"{enumeration}\"")]
    InvalidOptionName { enumeration: String, option: String },

    #[error("option value out of range {value} in \"{option}\" in enum \"{enumeration}\"")]
    OptionValueOutOfRange {
        enumeration: String,
        option: String,
        value: i64,
    },

    #[error("duplicate option value {value} in \"{option}\" in enum \"{enumeration}\"")]
    DuplicateOptionValue {
        enumeration: String,
        option: String,
        value: i64,
    },

    #[error("duplicate option name \"{option}\" in enum \"{enumeration}\"")]
    DuplicateOptionName { enumeration: String, option: String },

    #[error("invalid member name \"{member}\" in struct \"{structure}\"")]
    InvalidMemberName { structure: String, member: String },

    #[error("duplicate member name \"{member}\" in struct \"{structure}\"")]
    DuplicateMemberName { structure: String, member: String },

    #[error("member \"{member}\" of struct \"{structure}\" has unsupported type \"{ty}\"")]
    InvalidMemberType {
        structure: String,
        member: String,
        ty: TypeTag,
    },

    #[error("member \"{member}\" of struct \"{structure}\" is of unknown enum \"{reference}\"")]
    UnknownMemberEnum {
        structure: String,
        member: String,
        reference: String,
    },

    #[error("member \"{member}\" of struct \"{structure}\" has an invalid extent {rows}x{columns}")]
    InvalidMemberExtent {
        structure: String,
        member: String,
        rows: u32,
        columns: u32,
    },

    #[error("invalid parent class name \"{parent}\" for class \"{class}\"")]
    InvalidParentName { class: String, parent: String },

    #[error("unknown parent class \"{parent}\" for class \"{class}\"")]
    UnknownParentClass { class: String, parent: String },

    #[error("parent class \"{parent}\" for class \"{class}\" is defined after its child class")]
    ParentDefinedAfterChild { class: String, parent: String },

    #[error("class \"{class}\" cannot be its own parent class")]
    SelfParent { class: String },

    #[error("{category} with name \"{name}\" conflicts with {other} of same name")]
    NameConflict {
        name: String,
        category: Category,
        other: Category,
    },

    #[error("invalid name for method \"{owner}.{method}\"")]
    InvalidMethodName { owner: String, method: String },

    #[error("invalid description for method \"{owner}.{method}\"")]
    InvalidMethodDescription { owner: String, method: String },

    #[error("duplicate name for method \"{owner}.{method}\"")]
    DuplicateMethod { owner: String, method: String },

    #[error("invalid param name \"{param}\" in method \"{owner}.{method}\"")]
    InvalidParamName {
        owner: String,
        method: String,
        param: String,
    },

    #[error("invalid description for parameter \"{owner}.{method}(... {param} ...)\"")]
    InvalidParamDescription {
        owner: String,
        method: String,
        param: String,
    },

    #[error("duplicate name \"{param}\" for parameter in method \"{owner}.{method}\"")]
    DuplicateParam {
        owner: String,
        method: String,
        param: String,
    },

    #[error("method \"{owner}.{method}\" has more than one return parameter")]
    MultipleReturnParams { owner: String, method: String },

    #[error("param class name \"{0}\" is ill formatted")]
    MalformedReference(String),

    #[error("parameter \"{param}\" of method \"{owner}.{method}\" is of unknown class \"{reference}\": unknown namespace \"{namespace}\"")]
    UnknownNamespace {
        owner: String,
        method: String,
        param: String,
        reference: String,
        namespace: String,
    },

    #[error("parameter \"{param}\" of method \"{owner}.{method}\" is an unknown {category} \"{reference}\"")]
    UnresolvedReference {
        owner: String,
        method: String,
        param: String,
        category: Category,
        reference: String,
    },

    #[error("parameter \"{param}\" of method \"{owner}.{method}\" is an unknown basic type \"{element}\"")]
    InvalidArrayElement {
        owner: String,
        method: String,
        param: String,
        element: String,
    },

    #[error("no {0} method specified")]
    LifecycleMethodMissing(LifecycleRole),

    #[error("{first} method can not be the same as the {second} method")]
    LifecycleMethodCollision {
        first: LifecycleRole,
        second: LifecycleRole,
    },

    #[error("{0} method does not match the expected function template")]
    SignatureMismatch(LifecycleRole),

    #[error("no base class name specified")]
    MissingBaseClassName,

    #[error("specified base class \"{0}\" not found")]
    BaseClassNotFound(String),

    #[error("base class \"{0}\" defined more than once")]
    DuplicateBaseClass(String),
}

impl ValidationError {
    /// Wrap an error raised inside an imported component
    pub fn in_import(namespace: &str, source: ValidationError) -> Self {
        ValidationError::InImport {
            namespace: namespace.to_string(),
            source: Box::new(source),
        }
    }
}

/// Diff serialization errors
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("XML serialization failed: {0}")]
    Xml(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not write \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ActError> = std::result::Result<T, E>;
