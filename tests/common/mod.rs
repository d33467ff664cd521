//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use act_idl::{load_component, normalize, ComponentModel, LoadOptions, SchemaMode};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn strict() -> LoadOptions {
    LoadOptions::new().with_schema(SchemaMode::Strict)
}

/// The shapes fixture with its Numbers import, normalized
pub fn shapes() -> ComponentModel {
    let mut model = load_component(&fixture("shapes.xml"), &strict()).expect("shapes fixture loads");
    normalize(&mut model);
    model
}

/// Copy both fixtures into `dir`, editing the shapes description on the way
pub fn write_shapes_variant(dir: &Path, edit: impl FnOnce(String) -> String) -> PathBuf {
    let numbers = fs::read_to_string(fixture("numbers.xml")).expect("read numbers fixture");
    let shapes = fs::read_to_string(fixture("shapes.xml")).expect("read shapes fixture");

    fs::write(dir.join("numbers.xml"), numbers).expect("write numbers");
    let path = dir.join("shapes.xml");
    fs::write(&path, edit(shapes)).expect("write shapes");
    path
}
