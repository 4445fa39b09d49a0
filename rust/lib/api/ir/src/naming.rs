//! Identifier rules and case conversions shared by the builder and emitters.
//!
//! A field name becomes a dialog node name, a `./name` property, a Java
//! member, and an HTL identifier, so it must be valid in all four at once.

use crate::error::GenerateError;

/// Java reserved words and literals; none of these can name a member.
const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while", "var", "record", "yield",
];

/// Check that `name` is usable as a field/member identifier.
///
/// Accepts `[A-Za-z][A-Za-z0-9_]*`, excluding Java reserved words.
pub fn check_identifier(name: &str) -> Result<(), GenerateError> {
    check_node_name(name)?;
    if JAVA_RESERVED.contains(&name) {
        return Err(GenerateError::invalid(name, "is a Java reserved word"));
    }
    Ok(())
}

/// Check that `name` is usable as a dialog node name.
///
/// Tab nodes never reach Java, so reserved words are fine here; only the
/// `[A-Za-z][A-Za-z0-9_]*` shape is enforced.
pub fn check_node_name(name: &str) -> Result<(), GenerateError> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(GenerateError::invalid(name, "name is empty")),
        Some(first) if !first.is_ascii_alphabetic() => {
            return Err(GenerateError::invalid(name, "must start with an ASCII letter"));
        }
        Some(_) => {}
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(GenerateError::invalid(
            name,
            format!("character '{bad}' is not allowed"),
        ));
    }
    Ok(())
}

/// Check a dotted Java package name (`com.example.core.models`).
pub fn check_package(package: &str) -> Result<(), GenerateError> {
    for segment in package.split('.') {
        check_identifier(segment).map_err(|_| {
            GenerateError::invalid(package, format!("package segment '{segment}' is invalid"))
        })?;
    }
    Ok(())
}

/// Fold a tab display name into its dialog node name.
///
/// Letters outside ASCII would be dropped by [`fold_identifier`] and
/// silently change the name (`"Über Uns"` → `berUns`), so they are rejected.
pub fn fold_node_name(display: &str) -> Result<String, GenerateError> {
    if let Some(letter) = display.chars().find(|c| c.is_alphabetic() && !c.is_ascii()) {
        return Err(GenerateError::invalid(
            display,
            format!("tab name contains the non-ASCII letter '{letter}'"),
        ));
    }
    let name = fold_identifier(display);
    check_node_name(&name).map_err(|_| {
        GenerateError::invalid(display, "tab name does not fold to a node identifier")
    })?;
    Ok(name)
}

/// Fold a display name into a node identifier.
///
/// `"Content Tab"` → `contentTab`, `"additional-details"` →
/// `additionalDetails`. Words are split on anything that is not ASCII
/// alphanumeric; the first word is lower-cased, later words capitalised.
pub fn fold_identifier(display: &str) -> String {
    let mut out = String::new();
    for (i, word) in display
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(&word.to_ascii_lowercase());
        } else {
            out.push_str(&capitalize(&word.to_ascii_lowercase()));
        }
    }
    out
}

/// Upper-case the first character, leaving the rest untouched.
///
/// This is the JavaBeans accessor rule: `pageTitle` → `PageTitle`, so
/// `getPageTitle()` is what HTL resolves for `model.pageTitle`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert camelCase or spaced words to kebab-case (`heroBanner` → `hero-banner`).
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::new();
    for ch in s.chars() {
        if ch.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            result.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii_alphanumeric() {
            result.push(ch);
        } else if !result.is_empty() && !result.ends_with('-') {
            result.push('-');
        }
    }
    result.trim_end_matches('-').to_string()
}

/// Convert a name to UpperCamelCase (`hero-banner` → `HeroBanner`).
pub fn to_upper_camel_case(s: &str) -> String {
    capitalize(&fold_identifier_preserving(s))
}

/// Like [`fold_identifier`] but keeps the casing inside each word, so
/// `heroBanner` stays `heroBanner` instead of becoming `herobanner`.
fn fold_identifier_preserving(s: &str) -> String {
    let mut out = String::new();
    for (i, word) in s
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Java member holding a composite's raw child resource (`cards` → `cardsResource`).
pub fn container_member(composite: &str) -> String {
    format!("{composite}Resource")
}

/// Inner record class decoded from a composite's entries (`cards` → `CardsItem`).
pub fn item_class(composite: &str) -> String {
    format!("{}Item", capitalize(composite))
}

/// JavaBeans accessor for a member (`pageTitle` → `getPageTitle`).
pub fn getter(member: &str) -> String {
    format!("get{}", capitalize(member))
}

/// Title-case a node name for display (`heroBanner` → `Hero Banner`).
pub fn to_title(s: &str) -> String {
    to_kebab_case(s)
        .split('-')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
