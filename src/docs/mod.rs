//! Documentation generation for scripting dictionaries.
//!
//! Walks an interface module into fragments, renders them as a Ruby stub,
//! writes the stub to a temporary file and hands it to RDoc.

mod fragment;
mod generator;
mod stub;
mod temp;
mod walker;


pub use fragment::{ArgumentDoc, ClassStub, EnumStub, Fragment, MethodStub};
pub use generator::DocGenerator;
pub use stub::{RenderOptions, render_stub};
pub use temp::{TempStub, unique_tmp_path};
pub use walker::walk;
