//! Unit tests for the dictionary module
//!
//! Covers identifier conversion, sdef parsing and translation into the
//! interface module. All fixtures are inline XML.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use std::fs;

use tempfile::TempDir;

use crate::dictionary::{
    ApplicationHandle, ArgumentDescriptor, Constant, InterfaceModule, naming,
    sdef::{ClassKind, SdefParser, SuiteItem},
    translate,
};

const TEXT_EDIT_SDEF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE dictionary SYSTEM "file://localhost/System/Library/DTDs/sdef.dtd">
<dictionary title="TextEdit Terminology">
  <suite name="Standard Suite" code="????" description="Common classes and commands.">
    <command name="close" code="coreclos" description="Close a document.">
      <direct-parameter type="specifier" description="the document(s) or window(s) to close."/>
      <parameter name="saving" code="savo" type="save options" optional="yes" description="Should changes be saved before closing?"/>
      <parameter name="saving in" code="kfil" type="file" optional="yes" description="The file in which to save the document."/>
    </command>
    <command name="quit" code="aevtquit" description="Quit the application.">
      <parameter name="saving" code="savo" type="save options" optional="yes" description="Should changes be saved before quitting?"/>
    </command>
    <command name="count" code="corecnte" description="Return the number of elements of a particular class within an object.">
      <direct-parameter type="specifier" description="the object whose elements are to be counted"/>
      <result type="integer" description="the number of elements"/>
    </command>
    <command name="secret" code="corescrt" hidden="yes" description="Not for you."/>
    <class name="application" code="capp" description="The application's top-level scripting object.">
      <element type="document"/>
      <property name="name" code="pnam" type="text" access="r" description="The name of the application."/>
      <responds-to command="quit"/>
    </class>
    <class name="item" code="cobj" description="A scriptable object."/>
    <class name="document" code="docu" inherits="item" plural="documents" description="A document.">
      <property name="modified" code="imod" type="boolean" access="r" description="Has it been modified since the last save?"/>
      <property name="path" code="ppth" type="text" description="Its location on disk, if it has one."/>
      <responds-to command="close"/>
    </class>
    <enumeration name="save options" code="savo">
      <enumerator name="yes" code="yes " description="Save the file."/>
      <enumerator name="no" code="no  " description="Do not save the file."/>
      <enumerator name="ask" code="ask " description="Ask the user whether or not to save the file."/>
    </enumeration>
    <enumeration name="placeholder" code="plch"/>
    <value-type name="RGB color" code="cRGB"/>
  </suite>
  <suite name="Text Suite" code="TEXT">
    <class-extension extends="document">
      <property name="text" code="ctxt" type="text" description="The text of the document."/>
    </class-extension>
  </suite>
</dictionary>
"#;

fn text_edit_module() -> InterfaceModule {
    let dictionary = SdefParser::new(4)
        .parse(TEXT_EDIT_SDEF.as_bytes(), "TextEdit.sdef")
        .unwrap();
    let handle = ApplicationHandle::new("TextEdit", "/Applications/TextEdit.app");
    translate(&dictionary, &handle).unwrap()
}

fn class<'a>(module: &'a InterfaceModule, name: &str) -> &'a crate::dictionary::ClassEntity {
    module
        .constants
        .iter()
        .find_map(|constant| match constant {
            Constant::Class(class) if class.name == name => Some(class),
            _ => None,
        })
        .unwrap_or_else(|| panic!("class {name} not found"))
}

#[test]
fn module_name_strips_non_identifier_characters() {
    assert_eq!(naming::module_name("iTunes"), "ITunes");
    assert_eq!(naming::module_name("Script Editor"), "ScriptEditor");
    assert_eq!(naming::module_name("1Password"), "App1Password");
}

#[test]
fn class_and_constant_names() {
    assert_eq!(naming::class_name("save options"), "SaveOptions");
    assert_eq!(naming::class_name("RGB color"), "RGBColor");
    assert_eq!(naming::constant_name("ask user"), "ASK_USER");
    assert_eq!(naming::constant_name("24 bit"), "V_24_BIT");
}

#[test]
fn method_and_argument_names() {
    assert_eq!(naming::method_name("get URL"), "get_url");
    assert_eq!(naming::method_name("3d view"), "_3d_view");
    assert_eq!(naming::argument_name("in"), "in_");
    assert_eq!(naming::argument_name("saving in"), "saving_in");
}

#[test]
fn handle_type_name_round_trips_module() {
    let handle = ApplicationHandle::new("Script Editor", "/Applications/Script Editor.app");

    assert_eq!(handle.type_name, "OSA::ScriptEditor::Application");
    assert_eq!(handle.module_name().unwrap(), "ScriptEditor");
}

#[test]
fn handle_with_foreign_type_name_is_rejected() {
    let mut handle = ApplicationHandle::new("Finder", "/System/Library/CoreServices/Finder.app");
    handle.type_name = "Finder".to_string();

    assert!(handle.module_name().is_err());
}

#[test]
fn display_name_strips_default_marker() {
    let optional = ArgumentDescriptor {
        name: "saving=nil".to_string(),
        description: String::new(),
    };
    let required = ArgumentDescriptor {
        name: "saving".to_string(),
        description: String::new(),
    };

    assert_eq!(optional.display_name(), ("saving", true));
    assert_eq!(required.display_name(), ("saving", false));
}

#[test]
fn parses_suites_in_document_order() {
    let dictionary = SdefParser::new(4)
        .parse(TEXT_EDIT_SDEF.as_bytes(), "TextEdit.sdef")
        .unwrap();

    assert_eq!(dictionary.title.as_deref(), Some("TextEdit Terminology"));
    assert_eq!(dictionary.suites.len(), 2);
    assert_eq!(dictionary.suites[0].name, "Standard Suite");

    let kinds: Vec<&str> = dictionary.suites[0]
        .items
        .iter()
        .map(|item| match item {
            SuiteItem::Class(_) => "class",
            SuiteItem::Command(_) => "command",
            SuiteItem::Enumeration(_) => "enumeration",
            SuiteItem::ValueType(_) => "value-type",
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "command",
            "command",
            "command",
            "class",
            "class",
            "class",
            "enumeration",
            "enumeration",
            "value-type"
        ]
    );

    match &dictionary.suites[1].items[0] {
        SuiteItem::Class(extension) => {
            assert_eq!(extension.kind, ClassKind::Extension);
            assert_eq!(extension.name, "document");
        }
        other => panic!("expected class extension, got {other:?}"),
    }
}

#[test]
fn parses_command_parameters_and_result() {
    let dictionary = SdefParser::new(4)
        .parse(TEXT_EDIT_SDEF.as_bytes(), "TextEdit.sdef")
        .unwrap();

    let SuiteItem::Command(close) = &dictionary.suites[0].items[0] else {
        panic!("expected close command");
    };
    assert_eq!(close.name, "close");
    assert!(close.direct_parameter.is_some());
    assert_eq!(close.parameters.len(), 2);
    assert!(close.parameters.iter().all(|p| p.optional));

    let SuiteItem::Command(count) = &dictionary.suites[0].items[2] else {
        panic!("expected count command");
    };
    let result = count.result.as_ref().unwrap();
    assert_eq!(result.type_name.as_deref(), Some("integer"));
}

#[test]
fn nested_type_elements_describe_the_type() {
    let xml = r#"<dictionary>
      <suite name="S">
        <class name="thing">
          <property name="tags" code="tags">
            <type type="text" list="yes"/>
          </property>
          <property name="target" code="targ">
            <type type="file"/>
            <type type="text"/>
          </property>
        </class>
      </suite>
    </dictionary>"#;

    let dictionary = SdefParser::new(4).parse(xml.as_bytes(), "inline").unwrap();
    let SuiteItem::Class(thing) = &dictionary.suites[0].items[0] else {
        panic!("expected class");
    };

    assert_eq!(thing.properties[0].type_name.as_deref(), Some("list of text"));
    assert_eq!(thing.properties[1].type_name.as_deref(), Some("file or text"));
}

#[test]
fn malformed_xml_is_a_dictionary_error() {
    let result = SdefParser::new(4).parse(b"<dictionary><suite></dictionary>", "broken.sdef");

    assert!(result.is_err());
}

#[test]
fn document_without_dictionary_is_rejected() {
    let result = SdefParser::new(4).parse(b"<plist/>", "other.xml");

    assert!(result.is_err());
}

#[test]
fn includes_are_followed_from_file_urls() {
    let dir = TempDir::new().unwrap();
    let included = dir.path().join("Standard Suite.sdef");
    fs::write(
        &included,
        r#"<dictionary><suite name="Included"><class name="window" code="cwin"/></suite></dictionary>"#,
    )
    .unwrap();

    let href = format!("file://{}", included.display()).replace(' ', "%20");
    let xml = format!(
        r#"<dictionary xmlns:xi="http://www.w3.org/2003/XInclude">
          <xi:include href="{href}" xpointer="xpointer(/dictionary/suite)"/>
          <suite name="Own"/>
        </dictionary>"#
    );

    let dictionary = SdefParser::new(4).parse(xml.as_bytes(), "main.sdef").unwrap();
    let names: Vec<&str> = dictionary.suites.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(names, ["Included", "Own"]);
}

#[test]
fn includes_accept_localhost_file_urls() {
    let dir = TempDir::new().unwrap();
    let included = dir.path().join("CocoaStandard.sdef");
    fs::write(
        &included,
        r#"<dictionary><suite name="Included"><command name="quit" code="aevtquit"/></suite></dictionary>"#,
    )
    .unwrap();

    let xml = format!(
        r#"<dictionary xmlns:xi="http://www.w3.org/2003/XInclude">
          <xi:include href="file://localhost{}" xpointer="xpointer(/dictionary/suite)"/>
          <suite name="Own"/>
        </dictionary>"#,
        included.display()
    );

    let dictionary = SdefParser::new(4).parse(xml.as_bytes(), "main.sdef").unwrap();
    let names: Vec<&str> = dictionary.suites.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(names, ["Included", "Own"]);
}

#[test]
fn unreadable_includes_are_skipped() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.sdef");
    let xml = format!(
        r#"<dictionary xmlns:xi="http://www.w3.org/2003/XInclude">
          <xi:include href="file://{}"/>
          <suite name="Own"/>
        </dictionary>"#,
        missing.display()
    );

    let dictionary = SdefParser::new(4).parse(xml.as_bytes(), "main.sdef").unwrap();

    assert_eq!(dictionary.suites.len(), 1);
    assert_eq!(dictionary.suites[0].name, "Own");
}

#[test]
fn includes_with_other_schemes_are_skipped() {
    let xml = r#"<dictionary xmlns:xi="http://www.w3.org/2003/XInclude">
      <xi:include href="http://localhost/Standard.sdef"/>
      <suite name="Own"/>
    </dictionary>"#;

    let dictionary = SdefParser::new(4).parse(xml.as_bytes(), "main.sdef").unwrap();

    assert_eq!(dictionary.suites.len(), 1);
}

#[test]
fn includes_beyond_max_depth_are_skipped() {
    let xml = r#"<dictionary xmlns:xi="http://www.w3.org/2003/XInclude">
      <xi:include href="file:///does/not/exist.sdef"/>
      <suite name="Own"/>
    </dictionary>"#;

    let dictionary = SdefParser::new(0).parse(xml.as_bytes(), "main.sdef").unwrap();

    assert_eq!(dictionary.suites.len(), 1);
}

#[test]
fn translate_qualifies_classes_and_superclasses() {
    let module = text_edit_module();

    assert_eq!(module.name, "OSA::TextEdit");

    let document = class(&module, "OSA::TextEdit::Document");
    assert_eq!(document.superclass.as_deref(), Some("OSA::TextEdit::Item"));
    assert_eq!(document.description.as_deref(), Some("A document."));

    let item = class(&module, "OSA::TextEdit::Item");
    assert_eq!(item.superclass.as_deref(), Some("OSA::Element"));
}

#[test]
fn translate_builds_accessors_and_responded_commands() {
    let module = text_edit_module();
    let document = class(&module, "OSA::TextEdit::Document");
    let names: Vec<&str> = document
        .methods
        .as_ref()
        .unwrap()
        .iter()
        .map(|m| m.name.as_str())
        .collect();

    // class-extension properties are merged after the class's own
    assert_eq!(names, ["modified", "path", "path=", "text", "text=", "close"]);

    let close = document.methods.as_ref().unwrap().last().unwrap();
    let args: Vec<&str> = close.args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(args, ["saving=nil", "saving_in=nil"]);
}

#[test]
fn application_receives_unclaimed_commands_with_direct_object() {
    let module = text_edit_module();
    let application = class(&module, "OSA::TextEdit::Application");
    let methods = application.methods.as_ref().unwrap();
    let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, ["name", "documents", "quit", "count"]);

    let count = &methods[3];
    assert_eq!(count.args[0].name, "direct_object");
    assert_eq!(
        count.result.as_ref().map(|r| r.description.as_str()),
        Some("the number of elements")
    );
}

#[test]
fn enumerations_become_enum_groups() {
    let module = text_edit_module();

    let groups: Vec<_> = module
        .constants
        .iter()
        .filter_map(|constant| match constant {
            Constant::EnumGroup(group) => Some(group),
            _ => None,
        })
        .collect();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "SaveOptions");

    let items = groups[0].items.as_ref().unwrap();
    assert_eq!(items[0].name, "YES");
    assert_eq!(items[0].code, "yes ");

    assert_eq!(groups[1].name, "Placeholder");
    assert!(groups[1].items.is_none());
}

#[test]
fn value_types_and_hidden_commands() {
    let module = text_edit_module();

    assert!(
        module
            .constants
            .iter()
            .any(|c| matches!(c, Constant::Other { name } if name == "RGBColor"))
    );

    let all_methods: Vec<&str> = module
        .constants
        .iter()
        .filter_map(|c| match c {
            Constant::Class(class) => class.methods.as_ref(),
            _ => None,
        })
        .flatten()
        .map(|m| m.name.as_str())
        .collect();
    assert!(!all_methods.contains(&"secret"));
}

#[test]
fn missing_application_class_is_synthesized() {
    let xml = r#"<dictionary>
      <suite name="S">
        <command name="do thing" code="abcdefgh"/>
      </suite>
    </dictionary>"#;
    let dictionary = SdefParser::new(4).parse(xml.as_bytes(), "inline").unwrap();
    let handle = ApplicationHandle::new("Widget", "/tmp/Widget.sdef");
    let module = translate(&dictionary, &handle).unwrap();

    let application = class(&module, "OSA::Widget::Application");
    assert_eq!(module.constants[0].name(), "OSA::Widget::Application");
    assert_eq!(application.methods.as_ref().unwrap()[0].name, "do_thing");
}
