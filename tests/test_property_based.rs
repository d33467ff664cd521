//! Property-based tests for validation, normalization and diffing
//!
//! These tests use proptest to generate random component models with
//! unique names per list, plus random identifier candidates.


use act_idl::diff::{AttributeChange, ElementChange};
use act_idl::model::TypeTag;
use act_idl::semantic::identifiers::is_identifier;
use act_idl::*;
use proptest::prelude::*;
use proptest_strategies::*;

fn contains_all(haystack: &[ElementChange], needles: &[ElementChange]) -> bool {
    needles.iter().all(|needle| haystack.contains(needle))
}

fn swapped(change: &AttributeChange) -> AttributeChange {
    AttributeChange {
        path: change.path.clone(),
        old_value: change.new_value.clone(),
        new_value: change.old_value.clone(),
    }
}

// ════════════════════════════════════════════════════════════
// Identifier Property Tests
// ════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn identifiers_are_accepted(name in identifier()) {
        prop_assert!(is_identifier(&name));
    }

    #[test]
    fn non_identifiers_are_rejected(name in non_identifier()) {
        prop_assert!(!is_identifier(&name), "accepted {:?}", name);
    }
}

// ════════════════════════════════════════════════════════════
// Diff Property Tests
// ════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A model never differs from itself
    #[test]
    fn diff_with_itself_is_empty(model in component()) {
        prop_assert!(diff(&model, &model).is_empty());
    }

    /// What A to B adds, B to A removes, and the reverse
    #[test]
    fn diff_is_antisymmetric(a in component(), b in component()) {
        let forward = diff(&a, &b);
        let backward = diff(&b, &a);

        prop_assert_eq!(forward.additions.len(), backward.removals.len());
        prop_assert_eq!(forward.removals.len(), backward.additions.len());
        prop_assert!(contains_all(&backward.removals, &forward.additions));
        prop_assert!(contains_all(&backward.additions, &forward.removals));

        prop_assert_eq!(forward.changes.len(), backward.changes.len());
        for change in &forward.changes {
            prop_assert!(backward.changes.contains(&swapped(change)));
        }
    }

    /// Identical inputs give identical scripts
    #[test]
    fn diff_is_deterministic(a in component(), b in component()) {
        prop_assert_eq!(diff(&a, &b), diff(&a, &b));
    }

    /// Every script renders as XML and survives a JSON round trip
    #[test]
    fn diff_renders(a in component(), b in component()) {
        let script = diff(&a, &b);
        let xml = script.render(DiffFormat::Xml).unwrap();
        prop_assert!(xml.starts_with("<componentdiff"));

        let json = script.render(DiffFormat::Json).unwrap();
        prop_assert_eq!(EditScript::from_json(&json).unwrap(), script);
    }
}

// ════════════════════════════════════════════════════════════
// Validation and Normalization Property Tests
// ════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Validation is a pure function of the model
    #[test]
    fn validation_is_deterministic(model in component()) {
        let first = validate(&model);
        prop_assert_eq!(validate(&model), first);
    }

    /// A second normalization pass has nothing left to rewrite
    #[test]
    fn normalize_is_idempotent(mut model in component()) {
        normalize(&mut model);
        let once = model.clone();

        prop_assert_eq!(normalize(&mut model), 0);
        prop_assert_eq!(&model, &once);

        let handles = model
            .classes
            .iter()
            .flat_map(|class| class.methods.iter())
            .chain(model.global.methods.iter())
            .flat_map(|method| method.params.iter())
            .filter(|param| param.ty == TypeTag::Handle)
            .count();
        prop_assert_eq!(handles, 0);
    }

    /// Normalization preserves every name and every count
    #[test]
    fn normalize_only_retypes_handles(model in component()) {
        let mut normalized = model.clone();
        normalize(&mut normalized);

        let script = diff(&model, &normalized);
        prop_assert!(script.additions.is_empty());
        prop_assert!(script.removals.is_empty());
        for change in &script.changes {
            prop_assert!(change.path.ends_with("/type"), "{}", change.path);
            prop_assert_eq!(change.old_value.to_string(), "handle");
            prop_assert_eq!(change.new_value.to_string(), "class");
        }
    }
}
