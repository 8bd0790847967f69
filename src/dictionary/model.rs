use std::{path::PathBuf, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::naming;
use crate::{RdocOsaError, Result};

static HANDLE_TYPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^OSA::(.+)::Application$").ok());

static DEFAULT_VALUE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"=.+$").ok());

/// A resolved scriptable application.
///
/// Handles are produced by a [`Reflection`](super::Reflection) lookup and only
/// borrowed by the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationHandle {
    /// Display name of the application (e.g. "iTunes").
    pub name: String,
    /// Bundle or dictionary file the handle was resolved to.
    pub location: PathBuf,
    /// Dynamic type name, `OSA::<Module>::Application`.
    pub type_name: String,
}

impl ApplicationHandle {
    /// Creates a handle whose type name is derived from the display name.
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let type_name = format!("OSA::{}::Application", naming::module_name(&name));

        Self {
            name,
            location: location.into(),
            type_name,
        }
    }

    /// Recovers the interface module identifier from the type name.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::InvalidHandle` if the type name is not of the
    /// form `OSA::<Module>::Application`.
    pub fn module_name(&self) -> Result<String> {
        HANDLE_TYPE
            .as_ref()
            .and_then(|re| re.captures(&self.type_name))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| RdocOsaError::InvalidHandle {
                type_name: self.type_name.clone(),
            })
    }
}

/// Namespace of constants declared for one application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceModule {
    /// Fully qualified module name (e.g. "OSA::ITunes").
    pub name: String,
    /// Declared constants, in declaration order.
    #[serde(default)]
    pub constants: Vec<Constant>,
}

/// One declared constant of an [`InterfaceModule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constant {
    /// A class-like entity.
    Class(ClassEntity),
    /// A module holding a group of enumerated values.
    EnumGroup(EnumGroup),
    /// Anything else; skipped when walking.
    Other {
        /// Constant name.
        name: String,
    },
}

impl Constant {
    /// Returns the constant's declared name.
    pub fn name(&self) -> &str {
        match self {
            Constant::Class(class) => &class.name,
            Constant::EnumGroup(group) => &group.name,
            Constant::Other { name } => name,
        }
    }
}

/// A scriptable class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntity {
    /// Qualified class name, e.g. `OSA::TextEdit::Document`.
    pub name: String,
    /// Class description.
    pub description: Option<String>,
    /// Qualified superclass name.
    pub superclass: Option<String>,
    /// Method descriptions; `None` when the entity declares no such collection.
    pub methods: Option<Vec<MethodDescriptor>>,
}

/// A method of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Ruby method name.
    pub name: String,
    /// Method description.
    #[serde(default)]
    pub description: String,
    /// Arguments in declaration order.
    #[serde(default)]
    pub args: Vec<ArgumentDescriptor>,
    /// Declared result, if the method returns something.
    pub result: Option<ResultDescriptor>,
}

/// A method argument. Optional arguments carry a trailing default-value
/// marker in their name, e.g. `saving=nil`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    /// Argument name, possibly with a default-value marker.
    pub name: String,
    /// Argument description.
    #[serde(default)]
    pub description: String,
}

impl ArgumentDescriptor {
    /// Returns the name with any default-value marker removed, and whether
    /// a marker was present.
    pub fn display_name(&self) -> (&str, bool) {
        let marker = DEFAULT_VALUE.as_ref().and_then(|re| re.find(&self.name));

        match marker {
            Some(m) => (&self.name[..m.start()], true),
            None => (&self.name, false),
        }
    }
}

/// The result of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDescriptor {
    /// Result description.
    #[serde(default)]
    pub description: String,
}

/// A group of enumerated constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumGroup {
    /// Module name relative to the interface module, e.g. `SaveOptions`.
    pub name: String,
    /// Group description.
    pub description: Option<String>,
    /// Item descriptions; `None` when the group declares no such collection.
    pub items: Option<Vec<EnumItem>>,
}

/// One enumerated constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumItem {
    /// Constant name, e.g. `YES`.
    pub name: String,
    /// Underlying code value.
    pub code: String,
    /// Item description.
    #[serde(default)]
    pub description: String,
}
