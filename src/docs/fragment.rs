use crate::dictionary::EnumItem;

/// One walked constant, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A class declaration with its method stubs.
    Class(ClassStub),
    /// A nested module holding enumerated constants.
    EnumGroup(EnumStub),
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassStub {
    /// Qualified class name.
    pub name: String,
    /// Class description; rendered as `n/a` when absent.
    pub description: Option<String>,
    /// Qualified superclass name.
    pub superclass: Option<String>,
    /// Method stubs in declaration order.
    pub methods: Vec<MethodStub>,
}

/// A method stub with its documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStub {
    /// Ruby method name.
    pub name: String,
    /// Method description.
    pub description: String,
    /// Argument documentation, in declaration order.
    pub arguments: Vec<ArgumentDoc>,
    /// Description of the returned value, if the method declares one.
    pub returns: Option<String>,
}

/// Documentation for one method argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDoc {
    /// Name with the default-value marker removed.
    pub name: String,
    /// Name exactly as declared, e.g. `saving=nil`.
    pub declared: String,
    /// Argument description.
    pub description: String,
    /// Whether the declared name carried a default-value marker.
    pub optional: bool,
}

/// A nested enum-group module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumStub {
    /// Fully qualified module path, e.g. `OSA::ITunes::SaveOptions`.
    pub module: String,
    /// Group description.
    pub description: Option<String>,
    /// Constants in declaration order.
    pub items: Vec<EnumItem>,
}
