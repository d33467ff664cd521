//! Document loader
//!
//! Reads a description file, checks it against the document grammar, turns
//! it into a [`ComponentModel`] and recursively loads every imported
//! component relative to the importing file.

pub mod grammar;

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{LoadOptions, SchemaMode};
use crate::error::LoadError;
use crate::model::ComponentModel;

/// Parse description text without touching the file system
///
/// Imports are left unresolved; `imported` stays empty.
pub fn parse_component(text: &str) -> Result<ComponentModel, quick_xml::DeError> {
    quick_xml::de::from_str(text)
}

/// Load a description file and all of its imports
pub fn load_component(path: &Path, options: &LoadOptions) -> Result<ComponentModel, LoadError> {
    Loader::new(options.clone()).load(path)
}

/// Recursive loader state
///
/// Tracks the files currently being loaded so an import that leads back to
/// one of them is reported instead of recursing forever.
pub struct Loader {
    options: LoadOptions,
    loading: HashSet<PathBuf>,
}

impl Loader {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            loading: HashSet::new(),
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<ComponentModel, LoadError> {
        let canonical = fs::canonicalize(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if !self.loading.insert(canonical.clone()) {
            return Err(LoadError::ImportCycle { path: canonical });
        }
        let result = self.load_file(&canonical);
        self.loading.remove(&canonical);
        result
    }

    fn load_file(&mut self, path: &Path) -> Result<ComponentModel, LoadError> {
        debug!("loading component description {}", path.display());

        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.check_grammar(path, &text)?;

        let mut model = parse_component(&text).map_err(|source| LoadError::Xml {
            path: path.to_path_buf(),
            source,
        })?;
        model.tool_version = self.options.tool_version.clone();
        model.source = Some(path.to_path_buf());

        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        let mut imported = BTreeMap::new();
        for import in &model.imports {
            let import_path = directory.join(&import.uri);
            debug!(
                "importing namespace {} from {}",
                import.namespace,
                import_path.display()
            );

            let sub_model = self.load(&import_path)?;
            if sub_model.namespace != import.namespace {
                return Err(LoadError::NamespaceMismatch {
                    declared: import.namespace.clone(),
                    actual: sub_model.namespace,
                });
            }
            if imported.contains_key(&import.namespace) {
                return Err(LoadError::DuplicateImport(import.namespace.clone()));
            }
            imported.insert(import.namespace.clone(), sub_model);
        }
        model.imported = imported;

        Ok(model)
    }

    fn check_grammar(&self, path: &Path, text: &str) -> Result<(), LoadError> {
        if self.options.schema == SchemaMode::Off {
            return Ok(());
        }

        let issues = match grammar::check_document(text) {
            Ok(issues) => issues,
            // Malformed XML is reported by the deserializer with more context
            Err(err) => {
                debug!("grammar check skipped for {}: {}", path.display(), err);
                return Ok(());
            }
        };
        if issues.is_empty() {
            return Ok(());
        }

        match self.options.schema {
            SchemaMode::Strict => Err(LoadError::Grammar {
                path: path.to_path_buf(),
                issues,
            }),
            _ => {
                for issue in &issues {
                    warn!("{}: {}", path.display(), issue);
                }
                Ok(())
            }
        }
    }
}
