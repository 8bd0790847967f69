//! Conversions from sdef terminology to Ruby identifiers.
//!
//! Dictionary names are free-form ("save options", "URL", "get URL") while the
//! stub has to be valid Ruby, so every emitted identifier goes through one of
//! these functions.

const RUBY_KEYWORDS: &[&str] = &[
    "BEGIN", "END", "alias", "and", "begin", "break", "case", "class", "def", "defined?", "do",
    "else", "elsif", "end", "ensure", "false", "for", "if", "in", "module", "next", "nil", "not",
    "or", "redo", "rescue", "retry", "return", "self", "super", "then", "true", "undef", "unless",
    "until", "when", "while", "yield",
];

fn words(name: &str) -> Vec<&str> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_ascii_uppercase())
        .into_iter()
        .chain(chars)
        .collect()
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Module identifier for an application display name: "iTunes" -> "ITunes",
/// "Script Editor" -> "ScriptEditor".
pub fn module_name(app_name: &str) -> String {
    let joined: String = words(app_name).into_iter().map(capitalize).collect();

    if joined.is_empty() || starts_with_digit(&joined) {
        format!("App{joined}")
    } else {
        joined
    }
}

/// Class or enum-group constant name: "save options" -> "SaveOptions".
pub fn class_name(name: &str) -> String {
    let joined: String = words(name).into_iter().map(capitalize).collect();

    if joined.is_empty() || starts_with_digit(&joined) {
        format!("Type{joined}")
    } else {
        joined
    }
}

/// Method name: "get URL" -> "get_url".
pub fn method_name(name: &str) -> String {
    let joined = words(name)
        .into_iter()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    if joined.is_empty() || starts_with_digit(&joined) {
        format!("_{joined}")
    } else {
        joined
    }
}

/// Argument name. Like [`method_name`], but keywords get a trailing underscore
/// since `def f(in)` does not parse.
pub fn argument_name(name: &str) -> String {
    let ident = method_name(name);

    if RUBY_KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Enumerated constant name: "ask user" -> "ASK_USER".
pub fn constant_name(name: &str) -> String {
    let joined = words(name)
        .into_iter()
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join("_");

    if joined.is_empty() || starts_with_digit(&joined) {
        format!("V_{joined}")
    } else {
        joined
    }
}
