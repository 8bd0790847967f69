//! Walks an interface module into renderable fragments.
//!
//! The walk is read-only and keeps the module's declaration order, as well
//! as the order of methods and enum items within each constant.

use tracing::{debug, instrument};

use super::fragment::{ArgumentDoc, ClassStub, EnumStub, Fragment, MethodStub};
use crate::{
    RdocOsaError, Result,
    dictionary::{ClassEntity, Constant, EnumGroup, InterfaceModule, MethodDescriptor},
};

const METHODS_COLLECTION: &str = "METHODS_DESCRIPTION";

/// Produces one fragment per class-like or enum-group constant.
///
/// Constants of any other kind are skipped, as are enum groups without an
/// item collection.
///
/// # Errors
///
/// Returns `RdocOsaError::MissingMetadata` if a class declares no method
/// collection.
#[instrument(skip_all, fields(module = %module.name))]
pub fn walk(module: &InterfaceModule) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::with_capacity(module.constants.len());

    for constant in &module.constants {
        match constant {
            Constant::Class(class) => fragments.push(Fragment::Class(walk_class(class)?)),
            Constant::EnumGroup(group) => match walk_enum_group(&module.name, group) {
                Some(stub) => fragments.push(Fragment::EnumGroup(stub)),
                None => debug!(name = %group.name, "enum group has no items, skipping"),
            },
            Constant::Other { name } => debug!(%name, "skipping constant"),
        }
    }

    debug!(count = fragments.len(), "walked interface module");
    Ok(fragments)
}

fn walk_class(class: &ClassEntity) -> Result<ClassStub> {
    let methods = class
        .methods
        .as_ref()
        .ok_or_else(|| RdocOsaError::MissingMetadata {
            entity: class.name.clone(),
            collection: METHODS_COLLECTION.to_string(),
        })?;

    Ok(ClassStub {
        name: class.name.clone(),
        description: class.description.clone(),
        superclass: class.superclass.clone(),
        methods: methods.iter().map(walk_method).collect(),
    })
}

fn walk_method(method: &MethodDescriptor) -> MethodStub {
    let arguments = method
        .args
        .iter()
        .map(|arg| {
            let (name, optional) = arg.display_name();
            ArgumentDoc {
                name: name.to_string(),
                declared: arg.name.clone(),
                description: arg.description.clone(),
                optional,
            }
        })
        .collect();

    MethodStub {
        name: method.name.clone(),
        description: method.description.clone(),
        arguments,
        returns: method.result.as_ref().map(|result| result.description.clone()),
    }
}

fn walk_enum_group(module: &str, group: &EnumGroup) -> Option<EnumStub> {
    let items = group.items.as_ref()?;

    Some(EnumStub {
        module: format!("{module}::{}", group.name),
        description: group.description.clone(),
        items: items.clone(),
    })
}
