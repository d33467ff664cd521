//! Identifier and free-text grammars

use std::sync::LazyLock;

use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("identifier grammar is a valid regex")
}

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z][a-zA-Z0-9_]{0,63}$"));

static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-zA-Z][a-zA-Z0-9_\\/+\-:,.=!?()'; |]*$"));

static EXTENDED_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-zA-Z][a-zA-Z0-9_+\-:,.=!/ ]*$"));

static BASE_NAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z][a-zA-Z0-9_\-.]*$"));

static STUB_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z0-9_]{1,63}$"));

/// Entity names: namespaces, classes, methods, params, enums, errors
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Method, param and entity descriptions
pub fn is_description(text: &str) -> bool {
    DESCRIPTION.is_match(text)
}

/// Error descriptions and library names
pub fn is_extended_name(text: &str) -> bool {
    EXTENDED_NAME.is_match(text)
}

pub fn is_base_name(name: &str) -> bool {
    BASE_NAME.is_match(name)
}

/// Class-identifier overrides share the identifier grammar
pub fn is_class_identifier(name: &str) -> bool {
    is_identifier(name)
}

pub fn is_stub_identifier(name: &str) -> bool {
    STUB_IDENTIFIER.is_match(name)
}
