//! The validation pipeline

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::error::ValidationError;
use crate::model::{ComponentModel, MethodDef, ParamDef, ParamKind, Pass, SemanticVersion};

use super::identifiers::{
    is_base_name, is_class_identifier, is_description, is_extended_name, is_identifier,
    is_stub_identifier,
};
use super::names::NameRegistry;
use super::special::{check_lifecycle_config, check_signature};
use super::{ComponentRegistry, ResolveError};

/// Errors every component must declare
pub const REQUIRED_ERRORS: [&str; 8] = [
    "NOTIMPLEMENTED",
    "INVALIDPARAM",
    "INVALIDCAST",
    "BUFFERTOOSMALL",
    "GENERICEXCEPTION",
    "COULDNOTLOADLIBRARY",
    "COULDNOTFINDLIBRARYEXPORT",
    "INCOMPATIBLEBINARYVERSION",
];

/// Owner name used for global methods in diagnostics
pub const GLOBAL_OWNER: &str = "global";

/// Owner name used for function type parameters in diagnostics
pub const FUNCTION_TYPE_OWNER: &str = "functiontype";

/// Validate a component and, first, each of its imports in isolation
pub fn validate(model: &ComponentModel) -> Result<ComponentRegistry, ValidationError> {
    debug!("validating component {}", model.namespace);

    check_header(model)?;

    let mut imports = BTreeMap::new();
    for (namespace, imported) in &model.imported {
        let registry =
            validate(imported).map_err(|err| ValidationError::in_import(namespace, err))?;
        imports.insert(namespace.clone(), registry);
    }

    check_errors(model)?;
    check_overrides(model)?;

    let names = NameRegistry::build(model)?;
    names.check_conflicts()?;
    let registry = ComponentRegistry { names, imports };

    for class in &model.classes {
        let mut seen = HashSet::new();
        for method in &class.methods {
            if !seen.insert(method.name.to_lowercase()) {
                return Err(ValidationError::DuplicateMethod {
                    owner: class.name.clone(),
                    method: method.name.clone(),
                });
            }
            check_method(&registry, method, &class.name)?;
        }
    }

    for function_type in &model.function_types {
        check_params(
            &registry,
            &function_type.params,
            FUNCTION_TYPE_OWNER,
            &function_type.name,
        )?;
    }

    // Only components that declare global methods carry lifecycle names
    if !model.global.methods.is_empty() {
        check_lifecycle_config(&model.global)?;
    }

    let mut seen = HashSet::new();
    for method in &model.global.methods {
        if !seen.insert(method.name.to_lowercase()) {
            return Err(ValidationError::DuplicateMethod {
                owner: GLOBAL_OWNER.to_string(),
                method: method.name.clone(),
            });
        }
        check_signature(method, &model.global)?;
        check_method(&registry, method, GLOBAL_OWNER)?;
    }

    check_base_class(model)?;

    Ok(registry)
}

fn check_header(model: &ComponentModel) -> Result<(), ValidationError> {
    if SemanticVersion::parse(&model.version).is_none() {
        return Err(ValidationError::InvalidVersion(model.version.clone()));
    }
    if model.copyright.is_empty() {
        return Err(ValidationError::MissingCopyright);
    }
    if !(2000..=2100).contains(&model.year) {
        return Err(ValidationError::InvalidYear(model.year));
    }
    if !is_identifier(&model.namespace) {
        return Err(ValidationError::InvalidNamespace(model.namespace.clone()));
    }
    if !is_extended_name(&model.library_name) {
        return Err(ValidationError::InvalidLibraryName(model.library_name.clone()));
    }
    if !is_base_name(&model.base_name) {
        return Err(ValidationError::InvalidBaseName(model.base_name.clone()));
    }
    Ok(())
}

fn check_errors(model: &ComponentModel) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    let mut codes = HashSet::new();

    for error in &model.errors.errors {
        if !is_identifier(&error.name) {
            return Err(ValidationError::InvalidErrorName(error.name.clone()));
        }
        if !names.insert(error.name.to_lowercase()) {
            return Err(ValidationError::DuplicateErrorName(error.name.clone()));
        }
        if error.code <= 0 {
            return Err(ValidationError::InvalidErrorCode {
                code: error.code,
                name: error.name.clone(),
            });
        }
        if !codes.insert(error.code) {
            return Err(ValidationError::DuplicateErrorCode {
                code: error.code,
                name: error.name.clone(),
            });
        }
        if !is_extended_name(&error.description) {
            return Err(ValidationError::InvalidErrorDescription {
                name: error.name.clone(),
                description: error.description.clone(),
            });
        }
    }

    for required in REQUIRED_ERRORS {
        if !names.contains(&required.to_lowercase()) {
            return Err(ValidationError::MissingRequiredError(required.to_string()));
        }
    }
    Ok(())
}

/// Identifier overrides in bindings and implementations
fn check_overrides(model: &ComponentModel) -> Result<(), ValidationError> {
    let invalid = |section: &'static str, field: &'static str, language: &str, value: &str| {
        ValidationError::InvalidOverride {
            section,
            field,
            language: language.to_string(),
            value: value.to_string(),
        }
    };

    for binding in &model.bindings.bindings {
        let value = &binding.class_identifier;
        if !value.is_empty() && !is_class_identifier(value) {
            return Err(invalid("binding", "classidentifier", &binding.language, value));
        }
    }
    for implementation in &model.implementations.implementations {
        let language = &implementation.language;
        let value = &implementation.class_identifier;
        if !value.is_empty() && !is_class_identifier(value) {
            return Err(invalid("implementation", "classidentifier", language, value));
        }
        let value = &implementation.stub_identifier;
        if !value.is_empty() && !is_stub_identifier(value) {
            return Err(invalid("implementation", "stubidentifier", language, value));
        }
    }
    Ok(())
}

fn check_method(
    registry: &ComponentRegistry,
    method: &MethodDef,
    owner: &str,
) -> Result<(), ValidationError> {
    if !is_identifier(&method.name) {
        return Err(ValidationError::InvalidMethodName {
            owner: owner.to_string(),
            method: method.name.clone(),
        });
    }
    if !is_description(&method.description) {
        return Err(ValidationError::InvalidMethodDescription {
            owner: owner.to_string(),
            method: method.name.clone(),
        });
    }
    check_params(registry, &method.params, owner, &method.name)
}

/// Names, descriptions, return count and type resolution of a parameter list
fn check_params(
    registry: &ComponentRegistry,
    params: &[ParamDef],
    owner: &str,
    method: &str,
) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    let mut returns = 0;

    for param in params {
        let context = || (owner.to_string(), method.to_string(), param.name.clone());

        if !is_identifier(&param.name) {
            let (owner, method, param) = context();
            return Err(ValidationError::InvalidParamName { owner, method, param });
        }
        if !param.description.is_empty() && !is_description(&param.description) {
            let (owner, method, param) = context();
            return Err(ValidationError::InvalidParamDescription { owner, method, param });
        }
        if !names.insert(param.name.to_lowercase()) {
            let (owner, method, param) = context();
            return Err(ValidationError::DuplicateParam { owner, method, param });
        }
        if param.pass == Pass::Return {
            returns += 1;
            if returns > 1 {
                return Err(ValidationError::MultipleReturnParams {
                    owner: owner.to_string(),
                    method: method.to_string(),
                });
            }
        }

        check_param_type(registry, param, owner, method)?;
    }
    Ok(())
}

fn check_param_type(
    registry: &ComponentRegistry,
    param: &ParamDef,
    owner: &str,
    method: &str,
) -> Result<(), ValidationError> {
    let Some(kind) = ParamKind::decode(param.ty, &param.class)? else {
        return Err(ValidationError::InvalidArrayElement {
            owner: owner.to_string(),
            method: method.to_string(),
            param: param.name.clone(),
            element: param.class.clone(),
        });
    };
    let Some((category, reference)) = kind.reference() else {
        return Ok(());
    };

    match registry.resolve(category, reference) {
        Ok(_) => Ok(()),
        Err(ResolveError::UnknownNamespace) => Err(ValidationError::UnknownNamespace {
            owner: owner.to_string(),
            method: method.to_string(),
            param: param.name.clone(),
            reference: param.class.clone(),
            namespace: reference.namespace.clone().unwrap_or_default(),
        }),
        Err(ResolveError::UnknownName) => Err(ValidationError::UnresolvedReference {
            owner: owner.to_string(),
            method: method.to_string(),
            param: param.name.clone(),
            category,
            reference: param.class.clone(),
        }),
    }
}

fn check_base_class(model: &ComponentModel) -> Result<(), ValidationError> {
    let base = &model.global.base_class_name;
    if base.is_empty() {
        return Err(ValidationError::MissingBaseClassName);
    }
    match model.classes.iter().filter(|class| &class.name == base).count() {
        0 => Err(ValidationError::BaseClassNotFound(base.clone())),
        1 => Ok(()),
        _ => Err(ValidationError::DuplicateBaseClass(base.clone())),
    }
}
