//! Diff algorithm
//!
//! Named entities are matched by exact name. Method parameters and struct
//! members are matched by position up to the first name that differs;
//! everything after that point counts as removed from A and added in B.

use crate::model::{
    ClassDef, ComponentModel, EnumDef, EnumOption, ErrorDef, FunctionTypeDef, ImportDecl,
    LifecycleRole, MethodDef, ParamDef, StructDef, StructMember,
};

use super::{AttributeChange, AttributeValue, DiffElement, EditScript, ElementChange};

const ROOT: &str = "/component";

/// An entity that appears in a keyed list
trait Keyed {
    const TAG: &'static str;
    const KEY: &'static str = "name";

    fn key(&self) -> &str;
    fn element(&self) -> DiffElement;

    fn path(&self, parent: &str) -> String {
        format!("{}/{}[@{}='{}']", parent, Self::TAG, Self::KEY, self.key())
    }
}

macro_rules! keyed {
    ($ty:ty, $tag:literal, $variant:ident) => {
        impl Keyed for $ty {
            const TAG: &'static str = $tag;

            fn key(&self) -> &str {
                &self.name
            }

            fn element(&self) -> DiffElement {
                DiffElement::$variant(self.clone())
            }
        }
    };
}

keyed!(ClassDef, "class", Class);
keyed!(MethodDef, "method", Method);
keyed!(ParamDef, "param", Param);
keyed!(EnumDef, "enum", Enum);
keyed!(EnumOption, "option", EnumOption);
keyed!(StructDef, "struct", Struct);
keyed!(StructMember, "member", Member);
keyed!(ErrorDef, "error", Error);
keyed!(FunctionTypeDef, "functiontype", FunctionType);

impl Keyed for ImportDecl {
    const TAG: &'static str = "importcomponent";
    const KEY: &'static str = "namespace";

    fn key(&self) -> &str {
        &self.namespace
    }

    fn element(&self) -> DiffElement {
        DiffElement::Import(self.clone())
    }
}

/// Compute the edit script turning `a` into `b`
pub fn diff(a: &ComponentModel, b: &ComponentModel) -> EditScript {
    let mut differ = Differ::default();
    differ.component(a, b);
    differ.script
}

#[derive(Default)]
struct Differ {
    script: EditScript,
}

impl Differ {
    fn change(&mut self, entity: &str, attribute: &str, old: AttributeValue, new: AttributeValue) {
        if old != new {
            self.script.changes.push(AttributeChange {
                path: format!("{}/{}", entity, attribute),
                old_value: old,
                new_value: new,
            });
        }
    }

    fn text(&mut self, entity: &str, attribute: &str, old: &str, new: &str) {
        self.change(entity, attribute, old.into(), new.into());
    }

    fn integer(&mut self, entity: &str, attribute: &str, old: i64, new: i64) {
        self.change(entity, attribute, old.into(), new.into());
    }

    fn added<T: Keyed>(&mut self, parent: &str, item: &T) {
        self.script.additions.push(ElementChange {
            path: item.path(parent),
            element: item.element(),
        });
    }

    fn removed<T: Keyed>(&mut self, parent: &str, item: &T) {
        self.script.removals.push(ElementChange {
            path: item.path(parent),
            element: item.element(),
        });
    }

    /// Match by key; `matched` diffs the pairs present on both sides
    fn named<T, F>(&mut self, parent: &str, a: &[T], b: &[T], matched: F)
    where
        T: Keyed,
        F: Fn(&mut Self, &str, &T, &T),
    {
        for item_a in a {
            match b.iter().find(|item_b| item_b.key() == item_a.key()) {
                Some(item_b) => matched(self, &item_a.path(parent), item_a, item_b),
                None => self.removed(parent, item_a),
            }
        }
        for item_b in b {
            if !a.iter().any(|item_a| item_a.key() == item_b.key()) {
                self.added(parent, item_b);
            }
        }
    }

    /// Match by position up to the first differing key
    fn positional<T, F>(&mut self, parent: &str, a: &[T], b: &[T], matched: F)
    where
        T: Keyed,
        F: Fn(&mut Self, &str, &T, &T),
    {
        let common = a
            .iter()
            .zip(b)
            .take_while(|(item_a, item_b)| item_a.key() == item_b.key())
            .count();

        for (item_a, item_b) in a.iter().zip(b).take(common) {
            matched(self, &item_a.path(parent), item_a, item_b);
        }
        for item_a in &a[common..] {
            self.removed(parent, item_a);
        }
        for item_b in &b[common..] {
            self.added(parent, item_b);
        }
    }

    fn component(&mut self, a: &ComponentModel, b: &ComponentModel) {
        self.text(ROOT, "version", &a.version, &b.version);
        self.text(ROOT, "copyright", &a.copyright, &b.copyright);
        self.integer(ROOT, "year", i64::from(a.year), i64::from(b.year));
        self.text(ROOT, "namespace", &a.namespace, &b.namespace);
        self.text(ROOT, "libraryname", &a.library_name, &b.library_name);
        self.text(ROOT, "basename", &a.base_name, &b.base_name);
        self.text(ROOT, "license", &a.license.text(), &b.license.text());

        self.global(a, b);

        self.named(ROOT, &a.classes, &b.classes, Self::class);
        self.named(ROOT, &a.enums, &b.enums, Self::enumeration);
        let errors = format!("{}/errors", ROOT);
        self.named(&errors, &a.errors.errors, &b.errors.errors, Self::error);
        self.named(ROOT, &a.structs, &b.structs, Self::structure);
        self.named(
            ROOT,
            &a.function_types,
            &b.function_types,
            Self::function_type,
        );
        self.named(ROOT, &a.imports, &b.imports, Self::import);
    }

    fn global(&mut self, a: &ComponentModel, b: &ComponentModel) {
        let path = format!("{}/global", ROOT);
        let (global_a, global_b) = (&a.global, &b.global);

        self.text(
            &path,
            "baseclassname",
            &global_a.base_class_name,
            &global_b.base_class_name,
        );
        for role in LifecycleRole::ALL {
            self.text(
                &path,
                role.attribute(),
                global_a.method_name(role),
                global_b.method_name(role),
            );
        }
        self.named(&path, &global_a.methods, &global_b.methods, Self::method);
    }

    fn class(&mut self, path: &str, a: &ClassDef, b: &ClassDef) {
        self.text(path, "description", &a.description, &b.description);
        self.text(path, "parent", &a.parent, &b.parent);
        self.named(path, &a.methods, &b.methods, Self::method);
    }

    fn method(&mut self, path: &str, a: &MethodDef, b: &MethodDef) {
        self.text(path, "description", &a.description, &b.description);
        self.positional(path, &a.params, &b.params, Self::param);
    }

    fn param(&mut self, path: &str, a: &ParamDef, b: &ParamDef) {
        self.text(path, "description", &a.description, &b.description);
        self.text(path, "pass", a.pass.as_str(), b.pass.as_str());
        self.text(path, "type", a.ty.as_str(), b.ty.as_str());
        self.text(path, "class", &a.class, &b.class);
    }

    fn enumeration(&mut self, path: &str, a: &EnumDef, b: &EnumDef) {
        self.text(path, "description", &a.description, &b.description);
        self.named(path, &a.options, &b.options, |differ, path, a, b| {
            differ.integer(path, "value", a.value, b.value);
            differ.text(path, "description", &a.description, &b.description);
        });
    }

    fn error(&mut self, path: &str, a: &ErrorDef, b: &ErrorDef) {
        self.integer(path, "code", a.code, b.code);
        self.text(path, "description", &a.description, &b.description);
    }

    fn structure(&mut self, path: &str, a: &StructDef, b: &StructDef) {
        self.text(path, "description", &a.description, &b.description);
        self.positional(path, &a.members, &b.members, |differ, path, a, b| {
            differ.text(path, "type", a.ty.as_str(), b.ty.as_str());
            differ.text(path, "class", &a.class, &b.class);
            differ.integer(path, "rows", i64::from(a.rows), i64::from(b.rows));
            differ.integer(path, "columns", i64::from(a.columns), i64::from(b.columns));
        });
    }

    fn function_type(&mut self, path: &str, a: &FunctionTypeDef, b: &FunctionTypeDef) {
        self.text(path, "description", &a.description, &b.description);
        self.positional(path, &a.params, &b.params, Self::param);
    }

    fn import(&mut self, path: &str, a: &ImportDecl, b: &ImportDecl) {
        self.text(path, "uri", &a.uri, &b.uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pass, TypeTag};

    fn component() -> ComponentModel {
        let mut model = ComponentModel {
            namespace: "Shapes".to_string(),
            version: "1.0.0".to_string(),
            ..Default::default()
        };
        model.classes.push(ClassDef {
            name: "Shape".to_string(),
            description: "A shape".to_string(),
            parent: String::new(),
            methods: vec![MethodDef {
                name: "Area".to_string(),
                description: "Computes the area".to_string(),
                params: vec![
                    ParamDef::new("Precision", TypeTag::Uint32, Pass::In),
                    ParamDef::new("Value", TypeTag::Double, Pass::Return),
                ],
            }],
        });
        model.errors.errors.push(ErrorDef {
            name: "NOTIMPLEMENTED".to_string(),
            code: 1,
            description: "not implemented".to_string(),
        });
        model
    }

    const AREA: &str = "/component/class[@name='Shape']/method[@name='Area']";

    #[test]
    fn test_identical_components() {
        let a = component();
        assert!(diff(&a, &a).is_empty());
    }

    #[test]
    fn test_appended_param() {
        let a = component();
        let mut b = component();
        b.classes[0].methods[0]
            .params
            .push(ParamDef::new("Unit", TypeTag::String, Pass::Out));

        let script = diff(&a, &b);
        assert!(script.changes.is_empty());
        assert!(script.removals.is_empty());
        assert_eq!(script.additions.len(), 1);
        assert_eq!(
            script.additions[0].path,
            format!("{}/param[@name='Unit']", AREA)
        );
    }

    #[test]
    fn test_inserted_param_cascades() {
        let a = component();
        let mut b = component();
        b.classes[0].methods[0]
            .params
            .insert(0, ParamDef::new("Unit", TypeTag::String, Pass::In));

        let script = diff(&a, &b);
        assert_eq!(script.removals.len(), 2);
        assert_eq!(script.additions.len(), 3);
    }

    #[test]
    fn test_attribute_changes() {
        let a = component();
        let mut b = component();
        b.version = "1.1.0".to_string();
        b.errors.errors[0].code = 7;
        b.classes[0].methods[0].params[0].pass = Pass::Out;

        let script = diff(&a, &b);
        assert_eq!(script.changes.len(), 3);
        assert_eq!(script.changes[0].path, "/component/version");
        assert_eq!(
            script.changes[1].path,
            format!("{}/param[@name='Precision']/pass", AREA)
        );
        assert_eq!(
            script.changes[2].path,
            "/component/errors/error[@name='NOTIMPLEMENTED']/code"
        );
        assert_eq!(script.changes[2].old_value, AttributeValue::Integer(1));
        assert_eq!(script.changes[2].new_value, AttributeValue::Integer(7));
    }

    #[test]
    fn test_renamed_class_is_remove_and_add() {
        let a = component();
        let mut b = component();
        b.classes[0].name = "Figure".to_string();

        let script = diff(&a, &b);
        assert_eq!(script.removals.len(), 1);
        assert_eq!(script.additions.len(), 1);
        assert_eq!(script.removals[0].path, "/component/class[@name='Shape']");
        assert!(matches!(script.additions[0].element, DiffElement::Class(_)));
    }

    #[test]
    fn test_import_keyed_by_namespace() {
        let a = component();
        let mut b = component();
        b.imports.push(ImportDecl {
            uri: "numbers.xml".to_string(),
            namespace: "Numbers".to_string(),
        });

        let script = diff(&a, &b);
        assert_eq!(
            script.additions[0].path,
            "/component/importcomponent[@namespace='Numbers']"
        );
    }
}
