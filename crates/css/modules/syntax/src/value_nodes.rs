//! CSS Syntax Module Level 3 — §5.4.7 Component values of a declaration.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#consume-component-value>
//!
//! A declaration value is classified into a flat list of typed nodes; function
//! arguments nest as children. Every node remembers the byte span it was read
//! from so callers can slice the authored text back out of the source string.

use core::ops::Range;
use cssparser::{ParseError, Parser, ParserInput, Token};

/// The classified kind of a single value node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// An identifier such as `inset` or `sans-serif`.
    Identifier(String),
    /// A number followed by a unit, e.g. `16px`. The unit keeps its authored case.
    Dimension { value: f64, unit: String },
    /// A bare number.
    Number(f64),
    /// A percentage; `value` is the authored number (`50%` → `50.0`).
    Percentage(f64),
    /// A function call with its comma/space separated arguments.
    Function {
        name: String,
        children: Vec<ValueNode>,
    },
    /// A hash token; the text after `#`.
    Hash(String),
    /// One of `,` `/` `+` `-` `*`.
    Operator(char),
    /// A quoted string, unescaped.
    QuotedString(String),
    /// Anything else (urls, blocks, stray delimiters).
    Other,
}

/// One node of a value together with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueNode {
    pub kind: NodeKind,
    /// Byte range into the source the node was parsed from.
    pub span: Range<usize>,
}

impl ValueNode {
    /// The authored text of this node.
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.clone()).unwrap_or_default()
    }

    #[inline]
    pub const fn is_comma(&self) -> bool {
        matches!(self.kind, NodeKind::Operator(','))
    }

    #[inline]
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Function name and arguments, if this node is a function.
    #[inline]
    pub fn function(&self) -> Option<(&str, &[ValueNode])> {
        match &self.kind {
            NodeKind::Function { name, children } => Some((name, children)),
            _ => None,
        }
    }

    /// Whether this node is a literal zero number (`0`, `0.0`, `+0`).
    #[inline]
    pub fn is_zero_number(&self) -> bool {
        matches!(self.kind, NodeKind::Number(value) if value == 0.0)
    }
}

/// Classify a raw declaration value into nodes.
///
/// Never fails: unbalanced blocks are closed at the end of input the same way
/// the tokenizer closes them for a stylesheet.
pub fn parse_value_nodes(text: &str) -> Vec<ValueNode> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    collect_nodes(&mut parser, text)
}

/// Split nodes at top-level commas. An empty input yields no groups.
pub fn split_on_commas(nodes: &[ValueNode]) -> Vec<&[ValueNode]> {
    if nodes.is_empty() {
        return Vec::new();
    }
    nodes.split(ValueNode::is_comma).collect()
}

/// Authored text covered by a run of sibling nodes.
pub fn text_of_run<'src>(nodes: &[ValueNode], source: &'src str) -> &'src str {
    match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) => source
            .get(first.span.start..last.span.end)
            .unwrap_or_default(),
        _ => "",
    }
}

fn collect_nodes(input: &mut Parser<'_, '_>, source: &str) -> Vec<ValueNode> {
    let mut nodes = Vec::new();
    loop {
        let start = input.position().byte_index();
        let Ok(token) = input.next_including_whitespace_and_comments().cloned() else {
            break;
        };
        let kind = match token {
            Token::WhiteSpace(_) | Token::Comment(_) => continue,
            Token::Ident(name) => NodeKind::Identifier(name.as_ref().to_owned()),
            Token::Number { value, .. } => {
                let authored = source.get(start..input.position().byte_index());
                NodeKind::Number(authored_number(authored, value))
            }
            Token::Percentage { unit_value, .. } => {
                let authored = source
                    .get(start..input.position().byte_index())
                    .and_then(|text| text.strip_suffix('%'));
                NodeKind::Percentage(authored_number(authored, unit_value * 100.0))
            }
            Token::Dimension { value, unit, .. } => {
                let end = input.position().byte_index();
                let authored = end
                    .checked_sub(unit.len())
                    .and_then(|number_end| source.get(start..number_end));
                NodeKind::Dimension {
                    value: authored_number(authored, value),
                    unit: unit.as_ref().to_owned(),
                }
            }
            Token::Function(name) => {
                let nested: Result<Vec<ValueNode>, ParseError<'_, ()>> =
                    input.parse_nested_block(|block| Ok(collect_nodes(block, source)));
                NodeKind::Function {
                    name: name.as_ref().to_owned(),
                    children: nested.unwrap_or_default(),
                }
            }
            Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock => {
                let skipped: Result<Vec<ValueNode>, ParseError<'_, ()>> =
                    input.parse_nested_block(|block| Ok(collect_nodes(block, source)));
                drop(skipped);
                NodeKind::Other
            }
            Token::Hash(value) | Token::IDHash(value) => NodeKind::Hash(value.as_ref().to_owned()),
            Token::Comma => NodeKind::Operator(','),
            Token::Delim(delim @ ('/' | '+' | '-' | '*')) => NodeKind::Operator(delim),
            Token::QuotedString(value) => NodeKind::QuotedString(value.as_ref().to_owned()),
            _ => NodeKind::Other,
        };
        let end = input.position().byte_index();
        nodes.push(ValueNode {
            kind,
            span: start..end,
        });
    }
    nodes
}

/// Re-read a number from its authored text so `1.1` stays `1.1` instead of
/// widening the tokenizer's `f32`.
fn authored_number(authored: Option<&str>, tokenized: f32) -> f64 {
    authored
        .and_then(|text| text.parse::<f64>().ok())
        .unwrap_or_else(|| f64::from(tokenized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_shadow_layers() {
        let source = "2px 4px #000, 0 0 0 0 #fff inset";
        let nodes = parse_value_nodes(source);
        assert_eq!(nodes.len(), 10);
        assert_eq!(
            nodes.first().map(|node| node.kind.clone()),
            Some(NodeKind::Dimension {
                value: 2.0,
                unit: "px".to_owned()
            })
        );
        assert_eq!(nodes.get(2).map(|node| node.text(source)), Some("#000"));
        assert!(nodes.get(3).is_some_and(ValueNode::is_comma));
        assert_eq!(nodes.last().and_then(ValueNode::identifier), Some("inset"));
        assert_eq!(split_on_commas(&nodes).len(), 2);
    }

    #[test]
    fn keeps_authored_precision() {
        let nodes = parse_value_nodes("1.1");
        assert_eq!(nodes.first().map(|node| node.kind.clone()), Some(NodeKind::Number(1.1)));
        let nodes = parse_value_nodes("1.1%");
        assert_eq!(
            nodes.first().map(|node| node.kind.clone()),
            Some(NodeKind::Percentage(1.1))
        );
        let nodes = parse_value_nodes("1e2rem");
        assert_eq!(
            nodes.first().map(|node| node.kind.clone()),
            Some(NodeKind::Dimension {
                value: 100.0,
                unit: "rem".to_owned()
            })
        );
    }

    #[test]
    fn functions_nest_and_span_their_arguments() {
        let source = "linear-gradient(90deg, rgb(0 0 255), red)";
        let nodes = parse_value_nodes(source);
        assert_eq!(nodes.len(), 1);
        let function = nodes.first().and_then(ValueNode::function);
        assert_eq!(function.map(|(name, _)| name), Some("linear-gradient"));
        let children = function.map(|(_, children)| children).unwrap_or_default();
        assert_eq!(children.len(), 5);
        assert_eq!(children.get(2).map(|node| node.text(source)), Some("rgb(0 0 255)"));
        assert_eq!(nodes.first().map(|node| node.text(source)), Some(source));
    }

    #[test]
    fn unbalanced_input_does_not_fail() {
        let source = "var(--my-gradient, var(--fallback)";
        let nodes = parse_value_nodes(source);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes.first().and_then(ValueNode::function).map(|(name, _)| name), Some("var"));
    }

    #[test]
    fn text_of_run_covers_siblings() {
        let source = "1s ease-in, 200ms cubic-bezier(0, 0, 1, 1)";
        let nodes = parse_value_nodes(source);
        let groups = split_on_commas(&nodes);
        let texts: Vec<&str> = groups.iter().map(|group| text_of_run(group, source)).collect();
        assert_eq!(texts, vec!["1s ease-in", "200ms cubic-bezier(0, 0, 1, 1)"]);
    }

    #[test]
    fn empty_input_has_no_nodes() {
        assert!(parse_value_nodes("").is_empty());
        assert!(parse_value_nodes("   ").is_empty());
        assert!(split_on_commas(&[]).is_empty());
    }
}
