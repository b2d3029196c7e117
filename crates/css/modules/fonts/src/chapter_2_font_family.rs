//! CSS Fonts Module Level 4 — §2.1 Font family: the `font-family` property
//! Spec: <https://www.w3.org/TR/css-fonts-4/#font-family-prop>

use css_syntax::{NodeKind, ValueError, parse_value_nodes, references_custom_property};

/// Strip one layer of matching `"` or `'` quotes from both ends.
///
/// Inner quotes and whitespace are kept: `"'a'"` becomes `'a'`.
pub fn unquote(text: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|quote| {
            text.strip_prefix(*quote)
                .and_then(|rest| rest.strip_suffix(*quote))
        })
        .unwrap_or(text)
}

/// Split a `font-family` list into family names.
///
/// Families are separated by top-level commas. Consecutive identifiers are
/// joined with a single space (`Arial Black`), and one layer of quotes is
/// stripped from each family. An empty value has no families.
///
/// # Errors
/// `Indeterminate` when the value references `var()` anywhere.
pub fn destructure_font_family(text: &str) -> Result<Vec<String>, ValueError> {
    if references_custom_property(text) {
        return Err(ValueError::Indeterminate);
    }
    let nodes = parse_value_nodes(text);
    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    let mut families = Vec::new();
    let mut family = String::new();
    let mut after_identifier = false;
    for node in &nodes {
        if node.is_comma() {
            families.push(unquote(&family).to_owned());
            family.clear();
            after_identifier = false;
            continue;
        }
        let is_identifier = matches!(node.kind, NodeKind::Identifier(_));
        if after_identifier && is_identifier {
            family.push(' ');
        }
        family.push_str(node.text(text));
        after_identifier = is_identifier;
    }
    families.push(unquote(&family).to_owned());
    Ok(families)
}
