//! Translation of a parsed sdef [`Dictionary`] into an [`InterfaceModule`].
//!
//! Mirrors how RubyOSA maps a dictionary onto Ruby: classes become
//! `OSA::<Module>::<Class>`, properties and elements become accessor methods,
//! commands become methods on the classes that respond to them and everything
//! else lands on the application class.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{
    model::{
        ApplicationHandle, ArgumentDescriptor, ClassEntity, Constant, EnumGroup, EnumItem,
        InterfaceModule, MethodDescriptor, ResultDescriptor,
    },
    naming,
    sdef::{ClassKind, Dictionary, SdefClass, SdefCommand, SdefEnumeration, SdefParameter, SuiteItem},
};
use crate::Result;

const ROOT_SUPERCLASS: &str = "OSA::Element";
const APPLICATION_CLASS: &str = "application";
const DIRECT_ARGUMENT: &str = "direct_object";
const OPTIONAL_MARKER: &str = "=nil";

enum Declaration {
    Class(usize),
    Enumeration(usize),
    ValueType(String),
}

struct Collected<'a> {
    classes: Vec<SdefClass>,
    enumerations: Vec<&'a SdefEnumeration>,
    commands: Vec<&'a SdefCommand>,
    order: Vec<Declaration>,
}

/// Builds the interface module for `handle` from its dictionary.
///
/// # Errors
///
/// Returns `RdocOsaError::InvalidHandle` if the handle's type name does not
/// name an interface module.
pub fn translate(dictionary: &Dictionary, handle: &ApplicationHandle) -> Result<InterfaceModule> {
    let module = format!("OSA::{}", handle.module_name()?);
    let collected = collect(dictionary);

    let responded: HashSet<&str> = collected
        .classes
        .iter()
        .flat_map(|class| class.responds_to.iter().map(String::as_str))
        .collect();
    // Reversed so the first declaration of a command wins.
    let commands: HashMap<&str, &SdefCommand> = collected
        .commands
        .iter()
        .rev()
        .map(|command| (command.name.as_str(), *command))
        .collect();
    let plurals: HashMap<&str, &str> = collected
        .classes
        .iter()
        .filter_map(|class| Some((class.name.as_str(), class.plural.as_deref()?)))
        .collect();
    let application_commands: Vec<&SdefCommand> = collected
        .commands
        .iter()
        .filter(|command| !responded.contains(command.name.as_str()))
        .copied()
        .collect();

    let translator = Translator {
        module: &module,
        commands: &commands,
        plurals: &plurals,
        application_commands: &application_commands,
    };

    let mut constants = Vec::new();

    let has_application = collected
        .classes
        .iter()
        .any(|class| class.name.eq_ignore_ascii_case(APPLICATION_CLASS));
    if !has_application {
        debug!("dictionary declares no application class, synthesizing one");
        let application = SdefClass {
            kind: ClassKind::Class,
            name: APPLICATION_CLASS.to_string(),
            description: None,
            inherits: None,
            plural: None,
            properties: Vec::new(),
            elements: Vec::new(),
            responds_to: Vec::new(),
        };
        constants.push(Constant::Class(translator.class(&application)));
    }

    for declaration in &collected.order {
        let constant = match declaration {
            Declaration::Class(index) => Constant::Class(translator.class(&collected.classes[*index])),
            Declaration::Enumeration(index) => {
                Constant::EnumGroup(enum_group(collected.enumerations[*index]))
            }
            Declaration::ValueType(name) => Constant::Other {
                name: naming::class_name(name),
            },
        };
        constants.push(constant);
    }

    Ok(InterfaceModule {
        name: module,
        constants,
    })
}

/// Flattens the suites, merging class extensions into the class they extend.
fn collect(dictionary: &Dictionary) -> Collected<'_> {
    let mut collected = Collected {
        classes: Vec::new(),
        enumerations: Vec::new(),
        commands: Vec::new(),
        order: Vec::new(),
    };
    let mut class_index: HashMap<String, usize> = HashMap::new();
    let mut enumeration_names: HashSet<&str> = HashSet::new();

    for item in dictionary.suites.iter().flat_map(|suite| &suite.items) {
        match item {
            SuiteItem::Class(class) => match class_index.get(&class.name) {
                Some(&index) => {
                    let existing = &mut collected.classes[index];
                    existing.properties.extend(class.properties.iter().cloned());
                    existing.elements.extend(class.elements.iter().cloned());
                    existing.responds_to.extend(class.responds_to.iter().cloned());
                    if class.kind != ClassKind::Extension {
                        existing.description = existing.description.take().or(class.description.clone());
                        existing.inherits = existing.inherits.take().or(class.inherits.clone());
                        existing.plural = existing.plural.take().or(class.plural.clone());
                    }
                }
                None => {
                    class_index.insert(class.name.clone(), collected.classes.len());
                    collected.order.push(Declaration::Class(collected.classes.len()));
                    collected.classes.push(class.clone());
                }
            },
            SuiteItem::Command(command) => collected.commands.push(command),
            SuiteItem::Enumeration(enumeration) => {
                if enumeration_names.insert(enumeration.name.as_str()) {
                    collected
                        .order
                        .push(Declaration::Enumeration(collected.enumerations.len()));
                    collected.enumerations.push(enumeration);
                } else {
                    debug!(name = %enumeration.name, "duplicate enumeration ignored");
                }
            }
            SuiteItem::ValueType(name) => collected.order.push(Declaration::ValueType(name.clone())),
        }
    }

    collected
}

struct Translator<'a> {
    module: &'a str,
    commands: &'a HashMap<&'a str, &'a SdefCommand>,
    plurals: &'a HashMap<&'a str, &'a str>,
    application_commands: &'a [&'a SdefCommand],
}

impl Translator<'_> {
    fn qualify(&self, name: &str) -> String {
        format!("{}::{}", self.module, naming::class_name(name))
    }

    fn class(&self, class: &SdefClass) -> ClassEntity {
        let is_application = class.name.eq_ignore_ascii_case(APPLICATION_CLASS);
        let mut methods = Vec::new();

        for property in &class.properties {
            let getter = naming::method_name(&property.name);
            let type_name = property.type_name.clone().unwrap_or_default();
            let description = property.description.clone().unwrap_or_default();

            let setter = (property.writable && class.kind != ClassKind::RecordType).then(|| {
                MethodDescriptor {
                    name: format!("{getter}="),
                    description: description.clone(),
                    args: vec![ArgumentDescriptor {
                        name: "value".to_string(),
                        description: type_name.clone(),
                    }],
                    result: None,
                }
            });

            methods.push(MethodDescriptor {
                name: getter,
                description,
                args: Vec::new(),
                result: Some(ResultDescriptor {
                    description: type_name,
                }),
            });
            methods.extend(setter);
        }

        for element in &class.elements {
            let plural = self
                .plurals
                .get(element.as_str())
                .map(|plural| plural.to_string())
                .unwrap_or_else(|| format!("{element}s"));
            methods.push(MethodDescriptor {
                name: naming::method_name(&plural),
                description: format!("The {plural} contained in this object."),
                args: Vec::new(),
                result: Some(ResultDescriptor {
                    description: format!("list of {element}"),
                }),
            });
        }

        for command_name in &class.responds_to {
            match self.commands.get(command_name.as_str()) {
                Some(command) => methods.push(command_method(command, false)),
                None => debug!(class = %class.name, command = %command_name, "unknown command in responds-to"),
            }
        }

        if is_application {
            methods.extend(
                self.application_commands
                    .iter()
                    .map(|command| command_method(command, true)),
            );
        }

        let superclass = match &class.inherits {
            Some(parent) => self.qualify(parent),
            None => ROOT_SUPERCLASS.to_string(),
        };

        ClassEntity {
            name: self.qualify(&class.name),
            description: class.description.clone(),
            superclass: Some(superclass),
            methods: Some(methods),
        }
    }
}

fn command_method(command: &SdefCommand, with_direct: bool) -> MethodDescriptor {
    let mut used = HashSet::new();
    let mut args = Vec::new();

    if let Some(param) = command.direct_parameter.as_ref().filter(|_| with_direct) {
        args.push(argument(param, DIRECT_ARGUMENT.to_string(), &mut used));
    }

    for param in &command.parameters {
        let ident = naming::argument_name(&param.name);
        args.push(argument(param, ident, &mut used));
    }

    let result = command.result.as_ref().map(|result| ResultDescriptor {
        description: result
            .description
            .clone()
            .or_else(|| result.type_name.clone())
            .unwrap_or_default(),
    });

    MethodDescriptor {
        name: naming::method_name(&command.name),
        description: command.description.clone().unwrap_or_default(),
        args,
        result,
    }
}

fn argument(param: &SdefParameter, ident: String, used: &mut HashSet<String>) -> ArgumentDescriptor {
    let mut unique = ident.clone();
    let mut suffix = 2;
    while !used.insert(unique.clone()) {
        unique = format!("{ident}_{suffix}");
        suffix += 1;
    }

    let name = if param.optional {
        format!("{unique}{OPTIONAL_MARKER}")
    } else {
        unique
    };

    ArgumentDescriptor {
        name,
        description: param
            .description
            .clone()
            .or_else(|| param.type_name.clone())
            .unwrap_or_default(),
    }
}

fn enum_group(enumeration: &SdefEnumeration) -> EnumGroup {
    let items = (!enumeration.enumerators.is_empty()).then(|| {
        enumeration
            .enumerators
            .iter()
            .map(|enumerator| EnumItem {
                name: naming::constant_name(&enumerator.name),
                code: enumerator.code.clone(),
                description: enumerator.description.clone().unwrap_or_default(),
            })
            .collect()
    });

    EnumGroup {
        name: naming::class_name(&enumeration.name),
        description: enumeration.description.clone(),
        items,
    }
}
