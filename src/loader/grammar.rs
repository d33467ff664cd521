//! Document grammar check
//!
//! Walks the raw XML events and reports elements, attributes and attribute
//! values the description grammar does not allow. This runs before serde
//! sees the document, so problems are reported with line numbers even when
//! they would otherwise be silently ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Allowed structure of one element
struct ElementRule {
    name: &'static str,
    children: &'static [&'static str],
    required: &'static [&'static str],
    optional: &'static [&'static str],
}

const RULES: &[ElementRule] = &[
    ElementRule {
        name: "component",
        children: &[
            "license",
            "bindings",
            "implementations",
            "errors",
            "global",
            "struct",
            "enum",
            "class",
            "functiontype",
            "importcomponent",
        ],
        required: &["libraryname", "namespace", "copyright", "basename", "version"],
        optional: &["year"],
    },
    ElementRule {
        name: "license",
        children: &["line"],
        required: &[],
        optional: &[],
    },
    ElementRule {
        name: "line",
        children: &[],
        required: &[],
        optional: &["value"],
    },
    ElementRule {
        name: "bindings",
        children: &["binding"],
        required: &[],
        optional: &[],
    },
    ElementRule {
        name: "implementations",
        children: &["implementation"],
        required: &[],
        optional: &[],
    },
    ElementRule {
        name: "binding",
        children: &[],
        required: &["language"],
        optional: &["indentation", "classidentifier", "stubidentifier"],
    },
    ElementRule {
        name: "implementation",
        children: &[],
        required: &["language"],
        optional: &["indentation", "classidentifier", "stubidentifier"],
    },
    ElementRule {
        name: "errors",
        children: &["error"],
        required: &[],
        optional: &[],
    },
    ElementRule {
        name: "error",
        children: &[],
        required: &["name", "code"],
        optional: &["description"],
    },
    ElementRule {
        name: "struct",
        children: &["member"],
        required: &["name"],
        optional: &["description"],
    },
    ElementRule {
        name: "member",
        children: &[],
        required: &["name", "type"],
        optional: &["class", "rows", "columns"],
    },
    ElementRule {
        name: "enum",
        children: &["option"],
        required: &["name"],
        optional: &["description"],
    },
    ElementRule {
        name: "option",
        children: &[],
        required: &["name", "value"],
        optional: &["description"],
    },
    ElementRule {
        name: "class",
        children: &["method"],
        required: &["name"],
        optional: &["parent", "description"],
    },
    ElementRule {
        name: "method",
        children: &["param"],
        required: &["name", "description"],
        optional: &[],
    },
    ElementRule {
        name: "functiontype",
        children: &["param"],
        required: &["name", "description"],
        optional: &[],
    },
    ElementRule {
        name: "param",
        children: &[],
        required: &["name", "description", "pass", "type"],
        optional: &["class"],
    },
    ElementRule {
        name: "global",
        children: &["method"],
        required: &["releasemethod", "versionmethod"],
        optional: &[
            "baseclassname",
            "errormethod",
            "acquiremethod",
            "symbollookupmethod",
            "injectionmethod",
            "journalmethod",
            "prereleasemethod",
            "buildinfomethod",
        ],
    },
    ElementRule {
        name: "importcomponent",
        children: &[],
        required: &["uri", "namespace"],
        optional: &[],
    },
];

const PARAM_TYPES: &[&str] = &[
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "int8",
    "int16",
    "int32",
    "int64",
    "bool",
    "single",
    "double",
    "pointer",
    "string",
    "enum",
    "enumarray",
    "struct",
    "structarray",
    "basicarray",
    "class",
    "optionalclass",
    "functiontype",
    "handle",
];

const MEMBER_TYPES: &[&str] = &[
    "uint8", "uint16", "uint32", "uint64", "int8", "int16", "int32", "int64", "bool", "single",
    "double", "enum",
];

const PASS_VALUES: &[&str] = &["in", "out", "return"];

const INDENTATIONS: &[&str] = &[
    "tabs", "1spaces", "2spaces", "3spaces", "4spaces", "5spaces", "6spaces", "7spaces",
    "8spaces",
];

fn rule(name: &str) -> Option<&'static ElementRule> {
    RULES.iter().find(|rule| rule.name == name)
}

/// Check a document against the description grammar
///
/// Returns one message per violation; an empty list means the document
/// conforms. Only malformed XML is reported as an error.
pub fn check_document(text: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut issues = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut seen_root = false;

    loop {
        let event = reader.read_event()?;
        // Line of the end of the tag just read
        let position = usize::try_from(reader.buffer_position()).unwrap_or(text.len());
        let line = line_of(text, position);

        match event {
            Event::Start(element) => {
                let name = check_element(&element, &stack, seen_root, line, &mut issues);
                seen_root = true;
                stack.push(name);
            }
            Event::Empty(element) => {
                check_element(&element, &stack, seen_root, line, &mut issues);
                seen_root = true;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        issues.push("document has no root element".to_string());
    }
    Ok(issues)
}

fn line_of(text: &str, position: usize) -> usize {
    let end = position.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn check_element(
    element: &BytesStart<'_>,
    stack: &[String],
    seen_root: bool,
    line: usize,
    issues: &mut Vec<String>,
) -> String {
    let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();

    match stack.last() {
        None if seen_root => {
            issues.push(format!("line {}: more than one root element <{}>", line, name));
        }
        None if name != "component" => {
            issues.push(format!(
                "line {}: root element must be <component>, found <{}>",
                line, name
            ));
        }
        None => {}
        Some(parent) => {
            // Content under unknown parents was already reported with the parent
            if let Some(parent_rule) = rule(parent) {
                if !parent_rule.children.contains(&name.as_str()) {
                    issues.push(format!(
                        "line {}: element <{}> is not allowed inside <{}>",
                        line, name, parent
                    ));
                }
            }
        }
    }

    let Some(rule) = rule(&name) else {
        return name;
    };

    let mut present = Vec::new();
    for attribute in element.attributes() {
        let attribute = match attribute {
            Ok(attribute) => attribute,
            Err(err) => {
                issues.push(format!("line {}: malformed attribute on <{}>: {}", line, name, err));
                continue;
            }
        };
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        // Namespace declarations and foreign-namespace attributes are allowed anywhere
        if key == "xmlns" || key.contains(':') {
            continue;
        }
        let value = match attribute.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(err) => {
                issues.push(format!(
                    "line {}: attribute \"{}\" on <{}> cannot be decoded: {}",
                    line, key, name, err
                ));
                continue;
            }
        };

        if !rule.required.contains(&key.as_str()) && !rule.optional.contains(&key.as_str()) {
            issues.push(format!(
                "line {}: attribute \"{}\" is not allowed on <{}>",
                line, key, name
            ));
            continue;
        }
        if let Some(problem) = check_value(&name, &key, &value) {
            issues.push(format!("line {}: {}", line, problem));
        }
        present.push(key);
    }

    for required in rule.required {
        if !present.iter().any(|key| key == required) {
            issues.push(format!(
                "line {}: <{}> is missing required attribute \"{}\"",
                line, name, required
            ));
        }
    }

    name
}

fn check_value(element: &str, key: &str, value: &str) -> Option<String> {
    let allowed: Option<&[&str]> = match (element, key) {
        ("param", "type") => Some(PARAM_TYPES),
        ("param", "pass") => Some(PASS_VALUES),
        ("member", "type") => Some(MEMBER_TYPES),
        ("binding" | "implementation", "indentation") => Some(INDENTATIONS),
        _ => None,
    };
    if let Some(allowed) = allowed {
        if !allowed.contains(&value) {
            return Some(format!(
                "value \"{}\" is not allowed for attribute \"{}\" on <{}>",
                value, key, element
            ));
        }
        return None;
    }

    let numeric_ok = match (element, key) {
        ("error", "code") | ("member", "rows") | ("member", "columns") => {
            value.parse::<u64>().map(|n| n > 0).unwrap_or(false)
        }
        ("option", "value") | ("component", "year") => value.parse::<i64>().is_ok(),
        _ => true,
    };
    if !numeric_ok {
        return Some(format!(
            "value \"{}\" of attribute \"{}\" on <{}> is not a valid number",
            value, key, element
        ));
    }
    None
}
