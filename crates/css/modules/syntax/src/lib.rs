//! CSS Syntax Module Level 3 — Parsing and tokenization.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Two entry points: [`parse_stylesheet`] collects the declarations of every
//! style rule (including rules nested in conditional group rules), and
//! [`parse_value_nodes`] classifies a single declaration value into typed nodes.

mod error;
mod keyword_set;
mod value_nodes;

pub use error::{ValueError, mentions_function, references_custom_property};
pub use keyword_set::KeywordSet;
pub use value_nodes::{NodeKind, ValueNode, parse_value_nodes, split_on_commas, text_of_run};

use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub name: String,
    /// Raw value text (without trailing !important).
    pub value: String,
    /// Byte offset of `value` in the stylesheet source.
    pub value_offset: usize,
}

/// The declarations of one style rule or at-rule block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Declarations within the rule block.
    pub declarations: Vec<Declaration>,
}

/// A parsed stylesheet consisting of style rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Top-level style rules in source order.
    pub rules: Vec<StyleRule>,
}

/// Strip a trailing `!important` from a value; importance carries no token.
fn strip_important_tail(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(pos) = trimmed.rfind("!important")
        && let Some(prefix) = trimmed.get(..pos)
    {
        return prefix.trim_end().to_owned();
    }
    trimmed.to_owned()
}

/// A declaration parser that records property name and its raw value.
struct BodyDeclParser;

impl CssDeclarationParser<'_> for BodyDeclParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = input.position();
        // Consume until end of the declaration item.
        while input.next_including_whitespace_and_comments().is_ok() {}
        let raw = input.slice_from(start);
        let leading = raw.len() - raw.trim_start().len();
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value: strip_important_tail(raw),
            value_offset: start.byte_index() + leading,
        })
    }
}

impl CssAtRuleParser<'_> for BodyDeclParser {
    type Prelude = ();
    type AtRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        _name: CowRcStr<'input>,
        _input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(())
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        // Not produced by this parser
        Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        Err(())
    }
}

impl CssQualifiedRuleParser<'_> for BodyDeclParser {
    type Prelude = ();
    type QualifiedRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl CssRuleBodyItemParser<'_, Declaration, ()> for BodyDeclParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// At-rules whose block holds further rules rather than declarations.
const GROUPING_AT_RULES: [&str; 9] = [
    "media",
    "supports",
    "layer",
    "container",
    "document",
    "scope",
    "starting-style",
    "keyframes",
    "-webkit-keyframes",
];

/// Top-level parser that flattens qualified rules and the rules nested in
/// grouping at-rules into `StyleRule` items.
struct TopLevelParser;

impl CssAtRuleParser<'_> for TopLevelParser {
    /// Lowercased at-rule name.
    type Prelude = String;
    type AtRule = Vec<StyleRule>;
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(name.to_ascii_lowercase())
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        name: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        if GROUPING_AT_RULES.contains(&name.as_str()) {
            let mut nested = TopLevelParser;
            let rules = StyleSheetParser::new(input, &mut nested)
                .flatten()
                .flatten()
                .collect();
            return Ok(rules);
        }
        // Declaration blocks such as `@font-face` or `@page`.
        Ok(vec![StyleRule {
            declarations: parse_declarations_from_block(input),
        }])
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        // `@import`, `@charset` and friends carry no declarations.
        Ok(Vec::new())
    }
}

impl CssQualifiedRuleParser<'_> for TopLevelParser {
    // Selectors are skipped; values are all that is collected.
    type Prelude = ();
    type QualifiedRule = Vec<StyleRule>;
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Ok(vec![StyleRule {
            declarations: parse_declarations_from_block(input),
        }])
    }
}

/// Parse declarations from a rule block using `cssparser` body parser.
fn parse_declarations_from_block(block: &mut Parser) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    let mut body = BodyDeclParser;
    for decl in CssRuleBodyParser::new(block, &mut body).flatten() {
        out.push(decl);
    }
    out
}

/// Parse a full stylesheet into a `Stylesheet` using cssparser.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelParser;
    let mut sheet = Stylesheet::default();
    for rules in StyleSheetParser::new(&mut parser, &mut top).flatten() {
        sheet.rules.extend(rules);
    }
    sheet
}
