//! Integration tests for the document loader
//!
//! Import trees are written into temporary directories.

mod common;

use std::fs;
use std::path::Path;

use act_idl::config::TOOL_VERSION;
use act_idl::model::TypeTag;
use act_idl::*;
use common::{fixture, strict, write_shapes_variant};
use tempfile::TempDir;

/// A description that loads (it does not have to validate)
fn component(namespace: &str, imports: &[(&str, &str)]) -> String {
    let imports: String = imports
        .iter()
        .map(|(uri, ns)| format!("\t<importcomponent uri=\"{}\" namespace=\"{}\"/>\n", uri, ns))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<component libraryname="{ns} Library" namespace="{ns}" copyright="Tests" year="2024" basename="{lower}" version="1.0.0">
{imports}	<global releasemethod="Release" versionmethod="GetVersion"/>
</component>
"#,
        ns = namespace,
        lower = namespace.to_lowercase(),
        imports = imports
    )
}

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).expect("write description");
}

#[test]
fn test_load_fixture_with_import() {
    let model = load_component(&fixture("shapes.xml"), &strict()).expect("load shapes");

    assert_eq!(model.namespace, "Shapes");
    assert_eq!(model.tool_version, TOOL_VERSION);
    assert!(model.source.as_ref().unwrap().ends_with("shapes.xml"));
    assert_eq!(model.license.lines.len(), 2);
    assert_eq!(model.bindings.bindings[1].indent(), "  ");
    assert_eq!(model.implementations.implementations[0].stub_identifier, "stub");

    let numbers = &model.imported["Numbers"];
    assert_eq!(numbers.library_name, "Numbers Library");
    let version = numbers.semantic_version().unwrap();
    assert_eq!((version.major, version.minor, version.micro), (2, 1, 0));
    assert_eq!(version.prerelease.as_deref(), Some("beta.1"));
    assert_eq!(version.build.as_deref(), Some("build.5"));

    let create = model.global.methods.last().unwrap();
    assert_eq!(create.params[1].ty, TypeTag::Handle);
    assert_eq!(model.base_class().map(|class| class.name.as_str()), Some("Base"));
}

#[test]
fn test_pipeline_normalizes_and_validates() {
    let component = load_and_validate(&fixture("shapes.xml"), &Config::default()).unwrap();
    let create = component.model.global.methods.last().unwrap();
    assert_eq!(create.params[1].ty, TypeTag::Class);
    assert!(component.registry.imports.contains_key("Numbers"));
}

#[test]
fn test_namespace_mismatch() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.xml", &component("Main", &[("sub.xml", "Other")]));
    write(dir.path(), "sub.xml", &component("Sub", &[]));

    let err = load_component(&dir.path().join("main.xml"), &LoadOptions::new()).unwrap_err();
    match err {
        LoadError::NamespaceMismatch { declared, actual } => {
            assert_eq!(declared, "Other");
            assert_eq!(actual, "Sub");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_imports_resolve_relative_to_importer() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    write(dir.path(), "main.xml", &component("Main", &[("lib/mid.xml", "Mid")]));
    write(&dir.path().join("lib"), "mid.xml", &component("Mid", &[("leaf.xml", "Leaf")]));
    write(&dir.path().join("lib"), "leaf.xml", &component("Leaf", &[]));

    let model = load_component(&dir.path().join("main.xml"), &LoadOptions::new()).unwrap();
    let mid = &model.imported["Mid"];
    assert!(mid.imported.contains_key("Leaf"));
}

#[test]
fn test_import_cycle_is_detected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.xml", &component("Alpha", &[("b.xml", "Beta")]));
    write(dir.path(), "b.xml", &component("Beta", &[("a.xml", "Alpha")]));

    let err = load_component(&dir.path().join("a.xml"), &LoadOptions::new()).unwrap_err();
    assert!(matches!(err, LoadError::ImportCycle { .. }));
}

#[test]
fn test_self_import_is_a_cycle() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "self.xml", &component("Selfish", &[("self.xml", "Selfish")]));

    let err = load_component(&dir.path().join("self.xml"), &LoadOptions::new()).unwrap_err();
    assert!(matches!(err, LoadError::ImportCycle { .. }));
}

#[test]
fn test_shared_import_is_not_a_cycle() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "main.xml",
        &component("Main", &[("left.xml", "Left"), ("right.xml", "Right")]),
    );
    write(dir.path(), "left.xml", &component("Left", &[("common.xml", "Common")]));
    write(dir.path(), "right.xml", &component("Right", &[("common.xml", "Common")]));
    write(dir.path(), "common.xml", &component("Common", &[]));

    let model = load_component(&dir.path().join("main.xml"), &LoadOptions::new()).unwrap();
    assert!(model.imported["Left"].imported.contains_key("Common"));
    assert!(model.imported["Right"].imported.contains_key("Common"));
}

#[test]
fn test_duplicate_import_namespace() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "main.xml",
        &component("Main", &[("sub.xml", "Sub"), ("sub.xml", "Sub")]),
    );
    write(dir.path(), "sub.xml", &component("Sub", &[]));

    let err = load_component(&dir.path().join("main.xml"), &LoadOptions::new()).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateImport(namespace) if namespace == "Sub"));
}

#[test]
fn test_missing_import_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.xml", &component("Main", &[("gone.xml", "Gone")]));

    let err = load_component(&dir.path().join("main.xml"), &LoadOptions::new()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_grammar_modes() {
    let dir = TempDir::new().unwrap();
    let path = write_shapes_variant(dir.path(), |text| {
        text.replace("<license>", "<licence/>\n\t<license>")
    });

    let err = load_component(&path, &strict()).unwrap_err();
    match err {
        LoadError::Grammar { issues, .. } => {
            assert_eq!(issues.len(), 1);
            assert!(issues[0].contains("<licence>"));
        }
        other => panic!("unexpected error: {}", other),
    }

    let warned = LoadOptions::new().with_schema(SchemaMode::Warn);
    assert!(load_component(&path, &warned).is_ok());
    let off = LoadOptions::new().with_schema(SchemaMode::Off);
    assert!(load_component(&path, &off).is_ok());
}

#[test]
fn test_unknown_type_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = write_shapes_variant(dir.path(), |text| {
        text.replace("type=\"uint32\" pass=\"in\"", "type=\"uint128\" pass=\"in\"")
    });

    let off = LoadOptions::new().with_schema(SchemaMode::Off);
    let err = load_component(&path, &off).unwrap_err();
    assert!(matches!(err, LoadError::Xml { .. }));
}

#[test]
fn test_validation_error_surfaces_through_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write_shapes_variant(dir.path(), |text| {
        text.replace("year=\"2024\"", "year=\"1999\"")
    });

    let err = load_and_validate(&path, &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        ActError::Validation(ValidationError::InvalidYear(1999))
    ));
    assert_eq!(err.to_string(), "validation error: invalid year 1999 given");
}
