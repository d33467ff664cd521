//! ACT interface description front-end
//!
//! Loads component descriptions with their imports, normalizes deprecated
//! spellings, validates them and computes structural diffs between two
//! versions of a component.

pub mod config;
pub mod diff;
pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod semantic;

use std::path::Path;

use tracing::info;

// Re-export main types
pub use config::{Config, DiffFormat, LoadOptions, SchemaMode};
pub use diff::{diff, diff_components, EditScript};
pub use error::*;
pub use loader::{load_component, parse_component};
pub use model::ComponentModel;
pub use normalize::normalize;
pub use semantic::{validate, ComponentRegistry, NameRegistry};

/// A loaded, normalized and validated component
#[derive(Debug, Clone)]
pub struct ValidatedComponent {
    pub model: ComponentModel,
    pub registry: ComponentRegistry,
}

/// Run the whole front-end pipeline on one description file
pub fn load_and_validate(path: &Path, config: &Config) -> Result<ValidatedComponent> {
    info!("loading {}", path.display());
    let mut model = load_component(path, &config.load)?;

    let rewrites = normalize(&mut model);
    info!("normalized {} ({} rewrites)", model.namespace, rewrites);

    let registry = validate(&model)?;
    info!(
        "validated {} ({} imported components)",
        model.namespace,
        model.imported.len()
    );

    Ok(ValidatedComponent { model, registry })
}

/// Load and validate two descriptions, then diff them
pub fn diff_files(a: &Path, b: &Path, config: &Config) -> Result<EditScript> {
    let a = load_and_validate(a, config)?;
    let b = load_and_validate(b, config)?;
    let script = diff(&a.model, &b.model);
    info!(
        "diff: {} changes, {} additions, {} removals",
        script.changes.len(),
        script.additions.len(),
        script.removals.len()
    );
    Ok(script)
}

/// Write a diff where the configuration asks for it, returning the rendered text
pub fn write_diff(script: &EditScript, config: &Config) -> Result<String> {
    let rendered = script.write_to(&config.diff_output, config.diff_format)?;
    info!("wrote {}", config.diff_output.display());
    Ok(rendered)
}
