//! Per-component name registries
//!
//! Building the registry doubles as the first validation pass over enums,
//! structs, classes and function types: a registry only exists for a
//! component whose entity names are well formed and unique.

use std::collections::{HashMap, HashSet};

use crate::error::ValidationError;
use crate::model::{Category, ClassDef, ComponentModel, EnumDef, StructDef, TypeTag};

use super::identifiers::{is_description, is_identifier};

/// Largest magnitude an enum option value may have
pub const OPTION_VALUE_LIMIT: i64 = (1 << 31) - 1;

/// Names declared in one category, mapped to their declaration index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Names {
    index: HashMap<String, usize>,
    order: Vec<String>,
}

impl Names {
    fn insert(&mut self, name: &str) {
        self.index.insert(name.to_string(), self.order.len());
        self.order.push(name.to_string());
    }
}

/// The four registries of a single component (imports excluded)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRegistry {
    enums: Names,
    structs: Names,
    classes: Names,
    function_types: Names,
}

impl NameRegistry {
    /// Build the registries, checking names, options, members and parents
    pub fn build(model: &ComponentModel) -> Result<Self, ValidationError> {
        let mut registry = NameRegistry::default();

        for enumeration in &model.enums {
            registry.register_enum(enumeration)?;
        }
        for structure in &model.structs {
            registry.register_struct(structure)?;
        }
        for class in &model.classes {
            registry.register_class(class)?;
        }
        registry.check_parents(model)?;
        for function_type in &model.function_types {
            registry.register_entity(
                Category::FunctionType,
                &function_type.name,
                &function_type.description,
                "functiontype",
            )?;
        }

        Ok(registry)
    }

    fn names(&self, category: Category) -> &Names {
        match category {
            Category::Enum => &self.enums,
            Category::Struct => &self.structs,
            Category::Class => &self.classes,
            Category::FunctionType => &self.function_types,
        }
    }

    fn names_mut(&mut self, category: Category) -> &mut Names {
        match category {
            Category::Enum => &mut self.enums,
            Category::Struct => &mut self.structs,
            Category::Class => &mut self.classes,
            Category::FunctionType => &mut self.function_types,
        }
    }

    /// Exact-case lookup of a declared name, returning its declaration index
    pub fn lookup(&self, category: Category, name: &str) -> Option<usize> {
        self.names(category).index.get(name).copied()
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.lookup(category, name).is_some()
    }

    /// Names of a category in declaration order
    pub fn declared(&self, category: Category) -> impl Iterator<Item = &str> {
        self.names(category).order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.enums.order.len()
            + self.structs.order.len()
            + self.classes.order.len()
            + self.function_types.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn register_entity(
        &mut self,
        category: Category,
        name: &str,
        description: &str,
        owner: &'static str,
    ) -> Result<(), ValidationError> {
        if !is_identifier(name) {
            return Err(ValidationError::InvalidName {
                category,
                name: name.to_string(),
            });
        }
        let lower = name.to_lowercase();
        if self
            .names(category)
            .order
            .iter()
            .any(|existing| existing.to_lowercase() == lower)
        {
            return Err(ValidationError::DuplicateName {
                category,
                name: name.to_string(),
            });
        }
        if !description.is_empty() && !is_description(description) {
            return Err(ValidationError::InvalidDescription {
                owner,
                name: name.to_string(),
                description: description.to_string(),
            });
        }
        self.names_mut(category).insert(name);
        Ok(())
    }

    fn register_enum(&mut self, enumeration: &EnumDef) -> Result<(), ValidationError> {
        self.register_entity(
            Category::Enum,
            &enumeration.name,
            &enumeration.description,
            "enum",
        )?;

        let mut values = HashSet::new();
        let mut names = HashSet::new();
        for option in &enumeration.options {
            let context = || (enumeration.name.clone(), option.name.clone());
            if !is_identifier(&option.name) {
                let (enumeration, option) = context();
                return Err(ValidationError::InvalidOptionName { enumeration, option });
            }
            if option.value.unsigned_abs() > OPTION_VALUE_LIMIT.unsigned_abs() {
                let (enumeration, option_name) = context();
                return Err(ValidationError::OptionValueOutOfRange {
                    enumeration,
                    option: option_name,
                    value: option.value,
                });
            }
            if !values.insert(option.value) {
                let (enumeration, option_name) = context();
                return Err(ValidationError::DuplicateOptionValue {
                    enumeration,
                    option: option_name,
                    value: option.value,
                });
            }
            if !names.insert(option.name.to_lowercase()) {
                let (enumeration, option) = context();
                return Err(ValidationError::DuplicateOptionName { enumeration, option });
            }
        }
        Ok(())
    }

    fn register_struct(&mut self, structure: &StructDef) -> Result<(), ValidationError> {
        self.register_entity(
            Category::Struct,
            &structure.name,
            &structure.description,
            "struct",
        )?;

        let mut names = HashSet::new();
        for member in &structure.members {
            let context = || (structure.name.clone(), member.name.clone());
            if !is_identifier(&member.name) {
                let (structure, member) = context();
                return Err(ValidationError::InvalidMemberName { structure, member });
            }
            if !names.insert(member.name.to_lowercase()) {
                let (structure, member) = context();
                return Err(ValidationError::DuplicateMemberName { structure, member });
            }
            if member.ty == TypeTag::Enum {
                // Enums are registered before structs, so only local enums resolve here
                if !self.contains(Category::Enum, &member.class) {
                    let (structure, member_name) = context();
                    return Err(ValidationError::UnknownMemberEnum {
                        structure,
                        member: member_name,
                        reference: member.class.clone(),
                    });
                }
            } else if member.ty.scalar().is_none() || member.ty == TypeTag::Pointer {
                let (structure, member_name) = context();
                return Err(ValidationError::InvalidMemberType {
                    structure,
                    member: member_name,
                    ty: member.ty,
                });
            }
            if member.rows == 0 || member.columns == 0 {
                let (structure, member_name) = context();
                return Err(ValidationError::InvalidMemberExtent {
                    structure,
                    member: member_name,
                    rows: member.rows,
                    columns: member.columns,
                });
            }
        }
        Ok(())
    }

    fn register_class(&mut self, class: &ClassDef) -> Result<(), ValidationError> {
        self.register_entity(Category::Class, &class.name, &class.description, "class")
    }

    /// Parents must exist, precede their children and differ from them
    fn check_parents(&self, model: &ComponentModel) -> Result<(), ValidationError> {
        for (position, class) in model.classes.iter().enumerate() {
            let Some(parent) = model.parent_of(class) else {
                continue;
            };
            let context = || (class.name.clone(), parent.to_string());

            if !is_identifier(parent) {
                let (class, parent) = context();
                return Err(ValidationError::InvalidParentName { class, parent });
            }
            if parent.eq_ignore_ascii_case(&class.name) {
                return Err(ValidationError::SelfParent {
                    class: class.name.clone(),
                });
            }
            match self.lookup(Category::Class, parent) {
                None => {
                    let (class, parent) = context();
                    return Err(ValidationError::UnknownParentClass { class, parent });
                }
                Some(index) if index >= position => {
                    let (class, parent) = context();
                    return Err(ValidationError::ParentDefinedAfterChild { class, parent });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// No name may be reused across categories, compared case-insensitively
    pub fn check_conflicts(&self) -> Result<(), ValidationError> {
        let order = [
            Category::Struct,
            Category::Enum,
            Category::Class,
            Category::FunctionType,
        ];
        let mut seen: HashMap<String, Category> = HashMap::new();
        for category in order {
            for name in self.declared(category) {
                let lower = name.to_lowercase();
                match seen.get(&lower) {
                    Some(&other) if other == category => {
                        return Err(ValidationError::DuplicateName {
                            category,
                            name: name.to_string(),
                        });
                    }
                    Some(&other) => {
                        return Err(ValidationError::NameConflict {
                            name: name.to_string(),
                            category,
                            other,
                        });
                    }
                    None => {
                        seen.insert(lower, category);
                    }
                }
            }
        }
        Ok(())
    }
}
