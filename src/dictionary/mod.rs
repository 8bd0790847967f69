//! Scripting dictionary access.
//!
//! The rest of the crate only sees the plain data model in [`model`]; how an
//! application is located and how its dictionary is read is behind the
//! [`Reflection`] trait.

mod launch;
mod model;
pub mod naming;
pub mod sdef;
mod translate;

#[cfg(test)]
mod tests;

pub use launch::SdefReflection;
pub use model::{
    ApplicationHandle, ArgumentDescriptor, ClassEntity, Constant, EnumGroup, EnumItem,
    InterfaceModule, MethodDescriptor, ResultDescriptor,
};
pub use translate::translate;

use crate::Result;

/// Read-only view of an application's scripting interface.
///
/// One lookup per selector, plus access to the interface module of a
/// resolved handle.
pub trait Reflection {
    /// Finds an application by its display name.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::Resolution` if no application matches.
    fn app_with_name(&self, name: &str) -> Result<ApplicationHandle>;

    /// Uses the application bundle (or dictionary file) at `path`.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::Resolution` if the path does not exist.
    fn app_with_path(&self, path: &str) -> Result<ApplicationHandle>;

    /// Finds an application by bundle identifier.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::Resolution` if no application matches.
    fn app_with_bundle_id(&self, bundle_id: &str) -> Result<ApplicationHandle>;

    /// Finds an application by its four-character signature.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::Resolution` if no application matches.
    fn app_with_signature(&self, signature: &str) -> Result<ApplicationHandle>;

    /// Returns the interface module of a resolved application.
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary cannot be read or the handle does
    /// not name a module.
    fn interface_module(&self, handle: &ApplicationHandle) -> Result<InterfaceModule>;
}
