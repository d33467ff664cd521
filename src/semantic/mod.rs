//! Semantic validation of component descriptions
//!
//! Validation is a fixed, fail-fast sequence of checks. It never mutates
//! the model; on success it returns the name registries of the component and
//! of every imported component so that callers can resolve references.

pub mod identifiers;
pub mod names;
pub mod special;
pub mod validator;

use std::collections::BTreeMap;

use crate::model::{Category, TypeRef};

pub use names::NameRegistry;
pub use validator::validate;

/// Registries of a validated component and, recursively, of its imports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRegistry {
    pub names: NameRegistry,
    pub imports: BTreeMap<String, ComponentRegistry>,
}

/// Where a reference resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Namespace of the imported component, `None` for the local one
    pub namespace: Option<&'a str>,
    pub category: Category,
    /// Declaration index within the owning component's list
    pub index: usize,
}

/// Why a reference did not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    UnknownNamespace,
    UnknownName,
}

impl ComponentRegistry {
    /// Registry a reference points into: local, or the named import
    pub fn scope(&self, reference: &TypeRef) -> Option<&NameRegistry> {
        match &reference.namespace {
            None => Some(&self.names),
            Some(namespace) => self.imports.get(namespace).map(|import| &import.names),
        }
    }

    /// Resolve a reference within a category
    pub fn resolve<'a>(
        &self,
        category: Category,
        reference: &'a TypeRef,
    ) -> Result<Resolved<'a>, ResolveError> {
        let names = self.scope(reference).ok_or(ResolveError::UnknownNamespace)?;
        let index = names
            .lookup(category, &reference.name)
            .ok_or(ResolveError::UnknownName)?;
        Ok(Resolved {
            namespace: reference.namespace.as_deref(),
            category,
            index,
        })
    }
}
