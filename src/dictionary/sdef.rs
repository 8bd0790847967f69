//! Reader for `sdef(5)` scripting definition documents.
//!
//! Produces a faithful, untranslated view of the XML: suites with their
//! classes, commands, enumerations and value types in document order.
//! Elements marked `hidden="yes"` are dropped together with their children.

use std::{collections::HashMap, fs, path::PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};
use url::Url;

use crate::{RdocOsaError, Result};

/// Root `<dictionary>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    /// The `title` attribute, e.g. `TextEdit Terminology`.
    pub title: Option<String>,
    /// Suites in document order, included ones spliced in place.
    pub suites: Vec<Suite>,
}

/// A `<suite>` and its declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suite {
    /// Suite name, e.g. `Standard Suite`.
    pub name: String,
    /// Declarations in document order.
    pub items: Vec<SuiteItem>,
}

/// A top-level declaration inside a suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteItem {
    /// `class`, `record-type` or `class-extension`.
    Class(SdefClass),
    /// `command`.
    Command(SdefCommand),
    /// `enumeration`.
    Enumeration(SdefEnumeration),
    /// `value-type`, by name.
    ValueType(String),
}

/// Which element declared a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// `class`.
    Class,
    /// `record-type`.
    RecordType,
    /// `class-extension`; `name` holds the extended class.
    Extension,
}

/// A class-like declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdefClass {
    /// Declaring element.
    pub kind: ClassKind,
    /// Class name as written, e.g. `document`.
    pub name: String,
    /// The `description` attribute.
    pub description: Option<String>,
    /// Superclass name.
    pub inherits: Option<String>,
    /// Plural used for element accessors.
    pub plural: Option<String>,
    /// `<property>` children.
    pub properties: Vec<SdefProperty>,
    /// Element types from `<element type=..>`.
    pub elements: Vec<String>,
    /// Command names from `<responds-to>`.
    pub responds_to: Vec<String>,
}

/// A `<property>` of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdefProperty {
    /// Property name.
    pub name: String,
    /// Value type, combined with `or` for several `<type>` children.
    pub type_name: Option<String>,
    /// The `description` attribute.
    pub description: Option<String>,
    /// False for `access="r"`.
    pub writable: bool,
}

/// A `<command>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdefCommand {
    /// Command name.
    pub name: String,
    /// The `description` attribute.
    pub description: Option<String>,
    /// The `<direct-parameter>`, if any.
    pub direct_parameter: Option<SdefParameter>,
    /// Labeled `<parameter>` children in order.
    pub parameters: Vec<SdefParameter>,
    /// The `<result>`, if any.
    pub result: Option<SdefResult>,
}

/// A direct or labeled command parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdefParameter {
    /// Parameter name; empty for direct parameters.
    pub name: String,
    /// Value type.
    pub type_name: Option<String>,
    /// The `description` attribute.
    pub description: Option<String>,
    /// `optional="yes"`.
    pub optional: bool,
}

/// A command `<result>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdefResult {
    /// Result type.
    pub type_name: Option<String>,
    /// The `description` attribute.
    pub description: Option<String>,
}

/// An `<enumeration>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdefEnumeration {
    /// Enumeration name.
    pub name: String,
    /// The `description` attribute.
    pub description: Option<String>,
    /// `<enumerator>` children in order.
    pub enumerators: Vec<SdefEnumerator>,
}

/// One `<enumerator>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdefEnumerator {
    /// Enumerator name.
    pub name: String,
    /// Four-character code, kept verbatim.
    pub code: String,
    /// The `description` attribute.
    pub description: Option<String>,
}

/// Open element on the reader's stack.
#[derive(Debug)]
enum Frame {
    Dictionary(Dictionary),
    Suite(Suite),
    Class(SdefClass),
    Property(SdefProperty),
    Element(String),
    RespondsTo(String),
    Command(SdefCommand),
    Parameter { param: SdefParameter, direct: bool },
    Result(SdefResult),
    Enumeration(SdefEnumeration),
    Enumerator(SdefEnumerator),
    ValueType(String),
    Type(String),
    /// Hidden element or descendant of one.
    Skipped,
    /// Element without meaning for the stub (`cocoa`, `synonym`, ...).
    Ignored,
}

type Attributes = HashMap<String, String>;

fn attribute_map(e: &BytesStart<'_>) -> Result<Attributes> {
    let mut attrs = HashMap::new();

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| RdocOsaError::dictionary(e, "attribute"))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| RdocOsaError::dictionary(e, "attribute key"))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| RdocOsaError::dictionary(e, "attribute value"))?
            .to_string();
        attrs.insert(key, value);
    }

    Ok(attrs)
}

fn take(attrs: &mut Attributes, key: &str) -> Option<String> {
    attrs.remove(key).filter(|value| !value.is_empty())
}

fn is_yes(attrs: &Attributes, key: &str) -> bool {
    attrs.get(key).is_some_and(|v| v == "yes")
}

fn add_type(slot: &mut Option<String>, type_name: String) {
    *slot = Some(match slot.take() {
        Some(existing) => format!("{existing} or {type_name}"),
        None => type_name,
    });
}

/// Resolves a `file:` URL to a local path; other schemes are not followed.
fn file_url_path(href: &str) -> Option<PathBuf> {
    let url = Url::parse(href).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Parses sdef XML into a [`Dictionary`].
pub struct SdefParser {
    depth: usize,
    max_depth: usize,
}

impl SdefParser {
    /// Creates a parser following at most `max_depth` levels of `xi:include`.
    pub fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Parses a complete sdef document.
    ///
    /// `location` is used in error messages only.
    ///
    /// # Errors
    ///
    /// Returns `RdocOsaError::Dictionary` if the XML is malformed or has no
    /// `dictionary` root element.
    pub fn parse(&self, input: &[u8], location: &str) -> Result<Dictionary> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Frame> = Vec::new();
        let mut finished: Option<Dictionary> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let frame = self.open(e, stack.last_mut())?;
                    stack.push(frame);
                }
                Ok(Event::Empty(ref e)) => {
                    let frame = self.open(e, stack.last_mut())?;
                    Self::close(frame, &mut stack, &mut finished);
                }
                Ok(Event::End(_)) => {
                    if let Some(frame) = stack.pop() {
                        Self::close(frame, &mut stack, &mut finished);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(RdocOsaError::dictionary(
                        format!(
                            "XML parse error at position {}: {e}",
                            reader.error_position()
                        ),
                        location,
                    ));
                }
                _ => {}
            }
            buf.clear();
        }

        finished.ok_or_else(|| RdocOsaError::dictionary("no <dictionary> element", location))
    }

    fn open(&self, e: &BytesStart<'_>, parent: Option<&mut Frame>) -> Result<Frame> {
        let name_bytes = e.name();
        let tag_name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| RdocOsaError::dictionary(format!("Invalid tag name: {e}"), "element"))?;

        if matches!(parent, Some(Frame::Skipped)) {
            return Ok(Frame::Skipped);
        }
        if matches!(parent, Some(Frame::Ignored)) {
            return Ok(Frame::Ignored);
        }

        let mut attrs = attribute_map(e)?;
        if is_yes(&attrs, "hidden") {
            debug!(tag = tag_name, name = ?attrs.get("name"), "skipping hidden element");
            return Ok(Frame::Skipped);
        }

        let description = take(&mut attrs, "description");
        let name = take(&mut attrs, "name").unwrap_or_default();

        let frame = match tag_name {
            "dictionary" => Frame::Dictionary(Dictionary {
                title: take(&mut attrs, "title"),
                suites: Vec::new(),
            }),
            "suite" => Frame::Suite(Suite {
                name,
                items: Vec::new(),
            }),
            "class" | "record-type" | "class-extension" => {
                let (kind, name) = match tag_name {
                    "class" => (ClassKind::Class, name),
                    "record-type" => (ClassKind::RecordType, name),
                    _ => (
                        ClassKind::Extension,
                        take(&mut attrs, "extends").unwrap_or(name),
                    ),
                };
                Frame::Class(SdefClass {
                    kind,
                    name,
                    description,
                    inherits: take(&mut attrs, "inherits"),
                    plural: take(&mut attrs, "plural"),
                    properties: Vec::new(),
                    elements: Vec::new(),
                    responds_to: Vec::new(),
                })
            }
            "property" => Frame::Property(SdefProperty {
                name,
                type_name: take(&mut attrs, "type"),
                description,
                writable: attrs.get("access").is_none_or(|access| access.contains('w')),
            }),
            "element" => Frame::Element(take(&mut attrs, "type").unwrap_or_default()),
            "responds-to" => {
                Frame::RespondsTo(take(&mut attrs, "command").unwrap_or(name))
            }
            "command" => Frame::Command(SdefCommand {
                name,
                description,
                ..SdefCommand::default()
            }),
            "direct-parameter" | "parameter" => Frame::Parameter {
                param: SdefParameter {
                    name,
                    type_name: take(&mut attrs, "type"),
                    description,
                    optional: is_yes(&attrs, "optional"),
                },
                direct: tag_name == "direct-parameter",
            },
            "result" => Frame::Result(SdefResult {
                type_name: take(&mut attrs, "type"),
                description,
            }),
            "enumeration" => Frame::Enumeration(SdefEnumeration {
                name,
                description,
                enumerators: Vec::new(),
            }),
            "enumerator" => Frame::Enumerator(SdefEnumerator {
                name,
                code: take(&mut attrs, "code").unwrap_or_default(),
                description,
            }),
            "value-type" => Frame::ValueType(name),
            "type" => {
                let type_name = take(&mut attrs, "type").unwrap_or_default();
                if is_yes(&attrs, "list") {
                    Frame::Type(format!("list of {type_name}"))
                } else {
                    Frame::Type(type_name)
                }
            }
            "xi:include" => {
                if let Some(Frame::Dictionary(dictionary)) = parent {
                    let href = take(&mut attrs, "href").unwrap_or_default();
                    let included = self.include(&href)?;
                    dictionary.suites.extend(included);
                }
                Frame::Ignored
            }
            _ => Frame::Ignored,
        };

        Ok(frame)
    }

    fn include(&self, href: &str) -> Result<Vec<Suite>> {
        if self.depth >= self.max_depth {
            warn!(href, max_depth = self.max_depth, "include depth exceeded, skipping");
            return Ok(Vec::new());
        }

        let Some(path) = file_url_path(href) else {
            warn!(href, "only local file: includes are supported, skipping");
            return Ok(Vec::new());
        };

        debug!(path = %path.display(), "following xi:include");
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read include, skipping");
                return Ok(Vec::new());
            }
        };

        let nested = SdefParser {
            depth: self.depth + 1,
            max_depth: self.max_depth,
        };
        let included = nested.parse(&content, &path.to_string_lossy())?;

        Ok(included.suites)
    }

    fn close(frame: Frame, stack: &mut [Frame], finished: &mut Option<Dictionary>) {
        let Some(parent) = stack.last_mut() else {
            if let Frame::Dictionary(dictionary) = frame {
                *finished = Some(dictionary);
            }
            return;
        };

        match (parent, frame) {
            (Frame::Dictionary(dictionary), Frame::Suite(suite)) => dictionary.suites.push(suite),
            (Frame::Suite(suite), Frame::Class(class)) => {
                suite.items.push(SuiteItem::Class(class));
            }
            (Frame::Suite(suite), Frame::Command(command)) => {
                suite.items.push(SuiteItem::Command(command));
            }
            (Frame::Suite(suite), Frame::Enumeration(enumeration)) => {
                suite.items.push(SuiteItem::Enumeration(enumeration));
            }
            (Frame::Suite(suite), Frame::ValueType(name)) => {
                suite.items.push(SuiteItem::ValueType(name));
            }
            (Frame::Class(class), Frame::Property(property)) => class.properties.push(property),
            (Frame::Class(class), Frame::Element(element)) if !element.is_empty() => {
                class.elements.push(element);
            }
            (Frame::Class(class), Frame::RespondsTo(command)) if !command.is_empty() => {
                class.responds_to.push(command);
            }
            (Frame::Command(command), Frame::Parameter { param, direct }) => {
                if direct {
                    command.direct_parameter = Some(param);
                } else {
                    command.parameters.push(param);
                }
            }
            (Frame::Command(command), Frame::Result(result)) => command.result = Some(result),
            (Frame::Enumeration(enumeration), Frame::Enumerator(enumerator)) => {
                enumeration.enumerators.push(enumerator);
            }
            (Frame::Property(property), Frame::Type(t)) => add_type(&mut property.type_name, t),
            (Frame::Parameter { param, .. }, Frame::Type(t)) => add_type(&mut param.type_name, t),
            (Frame::Result(result), Frame::Type(t)) => add_type(&mut result.type_name, t),
            _ => {}
        }
    }
}
