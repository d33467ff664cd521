//! Lifecycle (special) global methods and their fixed signatures

use crate::error::ValidationError;
use crate::model::{Global, LifecycleRole, MethodDef, ParamDef, Pass, TypeTag};

/// Expected shape of one parameter of a lifecycle method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamTemplate {
    pub ty: TypeTag,
    pub pass: Pass,
    /// The parameter must reference the component's base class
    pub base_class: bool,
}

const fn param(ty: TypeTag, pass: Pass) -> ParamTemplate {
    ParamTemplate {
        ty,
        pass,
        base_class: false,
    }
}

const fn base_instance() -> ParamTemplate {
    ParamTemplate {
        ty: TypeTag::Class,
        pass: Pass::In,
        base_class: true,
    }
}

const RELEASE: &[ParamTemplate] = &[base_instance()];
const ACQUIRE: &[ParamTemplate] = &[base_instance()];
const SYMBOL_LOOKUP: &[ParamTemplate] = &[param(TypeTag::Pointer, Pass::Return)];
const INJECTION: &[ParamTemplate] = &[
    param(TypeTag::String, Pass::In),
    param(TypeTag::Pointer, Pass::In),
];
const JOURNAL: &[ParamTemplate] = &[param(TypeTag::String, Pass::In)];
const VERSION: &[ParamTemplate] = &[
    param(TypeTag::Uint32, Pass::Out),
    param(TypeTag::Uint32, Pass::Out),
    param(TypeTag::Uint32, Pass::Out),
];
const ERROR: &[ParamTemplate] = &[
    base_instance(),
    param(TypeTag::String, Pass::Out),
    param(TypeTag::Bool, Pass::Return),
];
const BUILD_STRING: &[ParamTemplate] = &[
    param(TypeTag::Bool, Pass::Return),
    param(TypeTag::String, Pass::Out),
];

/// Parameter list a lifecycle method must have
pub fn template(role: LifecycleRole) -> &'static [ParamTemplate] {
    match role {
        LifecycleRole::Release => RELEASE,
        LifecycleRole::Acquire => ACQUIRE,
        LifecycleRole::SymbolLookup => SYMBOL_LOOKUP,
        LifecycleRole::Injection => INJECTION,
        LifecycleRole::Journal => JOURNAL,
        LifecycleRole::Version => VERSION,
        LifecycleRole::Error => ERROR,
        LifecycleRole::Prerelease | LifecycleRole::Buildinfo => BUILD_STRING,
    }
}

impl ParamTemplate {
    fn matches(&self, param: &ParamDef, base_class: &str) -> bool {
        // `handle` is accepted where `class` is expected so unnormalized models check the same
        let ty = if param.ty == TypeTag::Handle {
            TypeTag::Class
        } else {
            param.ty
        };
        ty == self.ty && param.pass == self.pass && (!self.base_class || param.class == base_class)
    }
}

/// Required lifecycle names are set and configured names are pairwise distinct
pub fn check_lifecycle_config(global: &Global) -> Result<(), ValidationError> {
    for role in LifecycleRole::REQUIRED {
        if global.method_name(role).is_empty() {
            return Err(ValidationError::LifecycleMethodMissing(role));
        }
    }

    for (position, &first) in LifecycleRole::ALL.iter().enumerate() {
        let name = global.method_name(first);
        if name.is_empty() {
            continue;
        }
        if let Some(&second) = LifecycleRole::ALL[position + 1..]
            .iter()
            .find(|&&role| global.method_name(role) == name)
        {
            return Err(ValidationError::LifecycleMethodCollision { first, second });
        }
    }
    Ok(())
}

/// Match a global method against its lifecycle template, if it plays a role
pub fn check_signature(
    method: &MethodDef,
    global: &Global,
) -> Result<Option<LifecycleRole>, ValidationError> {
    let Some(role) = global.role_of(method) else {
        return Ok(None);
    };

    let expected = template(role);
    let matches = method.params.len() == expected.len()
        && expected
            .iter()
            .zip(&method.params)
            .all(|(template, param)| template.matches(param, &global.base_class_name));

    if matches {
        Ok(Some(role))
    } else {
        Err(ValidationError::SignatureMismatch(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> Global {
        Global {
            base_class_name: "Base".to_string(),
            release_method: "ReleaseInstance".to_string(),
            acquire_method: "AcquireInstance".to_string(),
            version_method: "GetVersion".to_string(),
            error_method: "GetLastError".to_string(),
            ..Default::default()
        }
    }

    fn method(name: &str, params: Vec<ParamDef>) -> MethodDef {
        MethodDef {
            name: name.to_string(),
            description: "Lifecycle method".to_string(),
            params,
        }
    }

    #[test]
    fn test_release_template() {
        let release = method(
            "ReleaseInstance",
            vec![ParamDef::new("Instance", TypeTag::Class, Pass::In).with_class("Base")],
        );
        assert_eq!(
            check_signature(&release, &global()),
            Ok(Some(LifecycleRole::Release))
        );

        let wrong_class = method(
            "ReleaseInstance",
            vec![ParamDef::new("Instance", TypeTag::Class, Pass::In).with_class("Other")],
        );
        assert_eq!(
            check_signature(&wrong_class, &global()),
            Err(ValidationError::SignatureMismatch(LifecycleRole::Release))
        );
    }

    #[test]
    fn test_release_with_two_params() {
        let release = method(
            "ReleaseInstance",
            vec![
                ParamDef::new("Instance", TypeTag::Class, Pass::In).with_class("Base"),
                ParamDef::new("Force", TypeTag::Bool, Pass::In),
            ],
        );
        let err = check_signature(&release, &global()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Release method does not match the expected function template"
        );
    }

    #[test]
    fn test_handle_matches_class() {
        let acquire = method(
            "AcquireInstance",
            vec![ParamDef::new("Instance", TypeTag::Handle, Pass::In).with_class("Base")],
        );
        assert_eq!(
            check_signature(&acquire, &global()),
            Ok(Some(LifecycleRole::Acquire))
        );
    }

    #[test]
    fn test_version_and_error_templates() {
        let version = method(
            "GetVersion",
            vec![
                ParamDef::new("Major", TypeTag::Uint32, Pass::Out),
                ParamDef::new("Minor", TypeTag::Uint32, Pass::Out),
                ParamDef::new("Micro", TypeTag::Uint32, Pass::Out),
            ],
        );
        assert_eq!(
            check_signature(&version, &global()),
            Ok(Some(LifecycleRole::Version))
        );

        let error = method(
            "GetLastError",
            vec![
                ParamDef::new("Instance", TypeTag::Class, Pass::In).with_class("Base"),
                ParamDef::new("ErrorMessage", TypeTag::String, Pass::Out),
                ParamDef::new("HasError", TypeTag::Bool, Pass::Return),
            ],
        );
        assert_eq!(
            check_signature(&error, &global()),
            Ok(Some(LifecycleRole::Error))
        );
    }

    #[test]
    fn test_ordinary_method() {
        let other = method("CreateShape", Vec::new());
        assert_eq!(check_signature(&other, &global()), Ok(None));
    }

    #[test]
    fn test_lifecycle_config() {
        assert!(check_lifecycle_config(&global()).is_ok());

        let mut missing = global();
        missing.acquire_method.clear();
        assert_eq!(
            check_lifecycle_config(&missing),
            Err(ValidationError::LifecycleMethodMissing(LifecycleRole::Acquire))
        );

        let mut collision = global();
        collision.journal_method = "ReleaseInstance".to_string();
        let err = check_lifecycle_config(&collision).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Release method can not be the same as the Journal method"
        );
    }
}
