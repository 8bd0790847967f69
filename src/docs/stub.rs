use super::fragment::{ClassStub, EnumStub, Fragment, MethodStub};

const ROOT_NAMESPACE: &str = "OSA";
const INDENT: &str = "  ";
const DETAIL_INDENT: &str = "   ";
const OPTIONAL_NOTE: &str = "Optional.";
const MISSING_DESCRIPTION: &str = "n/a";

/// Options controlling stub rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Homepage referenced in the header comment.
    pub homepage: String,
    /// Keep default-value markers in method signatures (`close(saving=nil)`).
    pub signature_defaults: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            homepage: "http://rubyosa.rubyforge.org".to_string(),
            signature_defaults: false,
        }
    }
}

/// Renders the complete Ruby stub for one application.
///
/// `app_name` is the display name, `module` the qualified interface module
/// (e.g. `OSA::ITunes`). Fragments are emitted in the given order.
pub fn render_stub(
    app_name: &str,
    module: &str,
    fragments: &[Fragment],
    options: &RenderOptions,
) -> String {
    let mut content = String::new();

    content.push_str(&render_header(app_name, module, options));
    for fragment in fragments {
        match fragment {
            Fragment::Class(class) => content.push_str(&render_class(class, options)),
            Fragment::EnumGroup(group) => content.push_str(&render_enum_group(group)),
        }
    }

    content
}

fn render_header(app_name: &str, module: &str, options: &RenderOptions) -> String {
    format!(
        "# This documentation describes the RubyOSA API for the {app_name} application. \
         It has been automatically generated.\n\
         #\n\
         # For more information about RubyOSA, please visit the project homepage: {}.\n\
         module {ROOT_NAMESPACE}; end\n\
         # The {module} module.\n\
         module {module}; end\n",
        options.homepage
    )
}

fn render_class(class: &ClassStub, options: &RenderOptions) -> String {
    let mut content = String::new();

    push_comment(
        &mut content,
        "",
        class.description.as_deref().unwrap_or(MISSING_DESCRIPTION),
    );
    match &class.superclass {
        Some(superclass) => content.push_str(&format!("class {} < {}\n", class.name, superclass)),
        None => content.push_str(&format!("class {}\n", class.name)),
    }

    let methods = class
        .methods
        .iter()
        .map(|method| render_method(method, options))
        .collect::<Vec<String>>()
        .join("\n");
    content.push_str(&methods);
    content.push_str("end\n\n");

    content
}

fn render_method(method: &MethodStub, options: &RenderOptions) -> String {
    let mut content = String::new();

    push_comment(&mut content, INDENT, &method.description);

    for arg in &method.arguments {
        content.push_str(&format!("{INDENT}# {}::\n", arg.name));
        let description = if arg.optional {
            format!("{} {OPTIONAL_NOTE}", arg.description)
        } else {
            arg.description.clone()
        };
        push_comment(&mut content, INDENT, &indent_lines(description.trim()));
    }

    if let Some(returns) = &method.returns {
        content.push_str(&format!("{INDENT}# Returns::\n"));
        push_comment(&mut content, INDENT, &indent_lines(returns));
    }

    let params = method
        .arguments
        .iter()
        .map(|arg| {
            if options.signature_defaults {
                arg.declared.as_str()
            } else {
                arg.name.as_str()
            }
        })
        .collect::<Vec<&str>>()
        .join(", ");
    content.push_str(&format!("{INDENT}def {}({params}); end\n", method.name));

    content
}

fn render_enum_group(group: &EnumStub) -> String {
    let mut content = String::new();

    if let Some(description) = &group.description {
        push_comment(&mut content, "", description);
    }
    content.push_str(&format!("module {}\n", group.module));
    for item in &group.items {
        push_comment(&mut content, INDENT, &item.description);
        content.push_str(&format!(
            "{INDENT}{} = {}\n",
            item.name,
            ruby_string_literal(&item.code)
        ));
    }
    content.push_str("end\n\n");

    content
}

/// Appends `text` as `#` comment lines, one per source line.
fn push_comment(content: &mut String, indent: &str, text: &str) {
    if text.trim().is_empty() {
        content.push_str(&format!("{indent}#\n"));
        return;
    }

    for line in text.lines() {
        let comment = format!("{indent}# {line}");
        content.push_str(comment.trim_end());
        content.push('\n');
    }
}

/// Indents every line for the body of an rdoc labeled list entry.
fn indent_lines(text: &str) -> String {
    text.lines()
        .map(|line| format!("{DETAIL_INDENT}{line}"))
        .collect::<Vec<String>>()
        .join("\n")
}

fn ruby_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
