//! Rewrites deprecated spellings into their canonical forms
//!
//! Every rewrite is idempotent: running the pass twice changes nothing the
//! second time.

use tracing::debug;

use crate::model::{ComponentModel, ParamDef, TypeTag};

/// A single parameter rewrite; returns true when it changed the parameter
pub type ParamRewrite = fn(&mut ParamDef) -> bool;

/// Rewrites applied to every parameter, in order
pub const PARAM_REWRITES: &[(&str, ParamRewrite)] = &[("handle-to-class", handle_to_class)];

/// `handle` is the old spelling of `class`
fn handle_to_class(param: &mut ParamDef) -> bool {
    if param.ty == TypeTag::Handle {
        param.ty = TypeTag::Class;
        true
    } else {
        false
    }
}

/// Normalize a model and all of its imports, returning the number of rewrites
pub fn normalize(model: &mut ComponentModel) -> usize {
    let mut rewrites = 0;

    let class_params = model
        .classes
        .iter_mut()
        .flat_map(|class| class.methods.iter_mut())
        .flat_map(|method| method.params.iter_mut());
    let global_params = model
        .global
        .methods
        .iter_mut()
        .flat_map(|method| method.params.iter_mut());
    let function_type_params = model
        .function_types
        .iter_mut()
        .flat_map(|function_type| function_type.params.iter_mut());

    for param in class_params.chain(global_params).chain(function_type_params) {
        for (name, rewrite) in PARAM_REWRITES {
            if rewrite(param) {
                debug!("rewrote parameter {} ({})", param.name, name);
                rewrites += 1;
            }
        }
    }

    for imported in model.imported.values_mut() {
        rewrites += normalize(imported);
    }

    rewrites
}
