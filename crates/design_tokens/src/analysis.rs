//! Stylesheet analysis: collect the authored values of every token category.
//!
//! Values are recorded in discovery order with a source location per
//! occurrence. Custom property declarations (`--*`) are not analyzed.

use crate::occurrences::{SourceLocation, ValueOccurrences};
use core::{iter, slice};
use css_color::{COLOR_FUNCTIONS, is_color_identifier};
use css_easing::keyword_easing;
use css_images::is_gradient_function;
use css_syntax::{
    Declaration, KeywordSet, NodeKind, ValueNode, parse_stylesheet, parse_value_nodes,
    split_on_commas, text_of_run,
};
use css_values_units::convert_duration;
use once_cell::sync::Lazy;

/// Properties whose whole value is a color, so CSS-wide keywords and bare
/// `var()` references count as colors too.
static COLOR_PROPERTIES: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "color",
        "background-color",
        "border-color",
        "border-top-color",
        "border-right-color",
        "border-bottom-color",
        "border-left-color",
        "border-block-color",
        "border-block-start-color",
        "border-block-end-color",
        "border-inline-color",
        "border-inline-start-color",
        "border-inline-end-color",
        "outline-color",
        "text-decoration-color",
        "text-emphasis-color",
        "column-rule-color",
        "caret-color",
        "accent-color",
        "fill",
        "stroke",
        "stop-color",
        "flood-color",
        "lighting-color",
        "-webkit-text-fill-color",
        "-webkit-text-stroke-color",
        "-webkit-tap-highlight-color",
    ])
});

/// Properties whose identifiers are names, never colors.
static NAME_PROPERTIES: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "font-family",
        "font",
        "animation-name",
        "transition-property",
        "will-change",
        "counter-reset",
        "counter-increment",
        "counter-set",
        "grid-area",
        "grid-template-areas",
        "view-transition-name",
        "container-name",
        "list-style-type",
    ])
});

/// CSS-wide keywords recorded for color properties.
static CSS_WIDE_KEYWORDS: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&["inherit", "initial", "unset", "revert", "revert-layer"])
});

/// Identifiers and functions that are `<easing-function>`s.
static EASING_FUNCTIONS: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(&["cubic-bezier", "steps", "linear"]));

/// Step keywords, which are easings without a cubic Bézier equivalent.
static STEP_KEYWORDS: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(&["step-start", "step-end"]));

/// Authored values of one stylesheet, per token category.
#[derive(Clone, Debug, Default)]
pub struct StylesheetValues {
    pub colors: ValueOccurrences,
    pub font_sizes: ValueOccurrences,
    pub font_families: ValueOccurrences,
    pub line_heights: ValueOccurrences,
    pub gradients: ValueOccurrences,
    pub box_shadows: ValueOccurrences,
    pub radii: ValueOccurrences,
    pub durations: ValueOccurrences,
    pub easings: ValueOccurrences,
}

/// Maps byte offsets to 1-based lines and columns.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let line_starts = iter::once(0)
            .chain(
                source
                    .match_indices('\n')
                    .map(|(newline, _)| newline + 1),
            )
            .collect();
        Self { line_starts }
    }

    fn locate(&self, offset: usize, length: usize) -> SourceLocation {
        let line = self.line_starts.partition_point(|start| *start <= offset);
        let line_start = line
            .checked_sub(1)
            .and_then(|index| self.line_starts.get(index))
            .copied()
            .unwrap_or_default();
        SourceLocation {
            line,
            column: offset - line_start + 1,
            offset,
            length,
        }
    }
}

/// One declaration being analyzed.
struct DeclarationScan<'decl> {
    declaration: &'decl Declaration,
    lines: &'decl LineIndex,
}

impl DeclarationScan<'_> {
    fn property(&self) -> &str {
        &self.declaration.name
    }

    fn value(&self) -> &str {
        &self.declaration.value
    }

    fn location_of_value(&self) -> SourceLocation {
        self.lines
            .locate(self.declaration.value_offset, self.value().len())
    }

    fn location_of_run(&self, nodes: &[ValueNode]) -> SourceLocation {
        let start = nodes.first().map_or(0, |node| node.span.start);
        let end = nodes.last().map_or(start, |node| node.span.end);
        self.lines
            .locate(self.declaration.value_offset + start, end - start)
    }

    fn record_value(&self, occurrences: &mut ValueOccurrences) {
        occurrences.record_location(self.value(), self.location_of_value(), None);
    }

    fn record_run(&self, occurrences: &mut ValueOccurrences, nodes: &[ValueNode]) {
        let text = text_of_run(nodes, self.value());
        if !text.is_empty() {
            occurrences.record_location(text, self.location_of_run(nodes), None);
        }
    }
}

/// Collect every token-relevant value in `css`.
pub fn analyze_stylesheet(css: &str) -> StylesheetValues {
    let sheet = parse_stylesheet(css);
    let lines = LineIndex::new(css);
    let mut values = StylesheetValues::default();
    for declaration in sheet.rules.iter().flat_map(|rule| &rule.declarations) {
        if declaration.name.starts_with("--") {
            continue;
        }
        let scan = DeclarationScan {
            declaration,
            lines: &lines,
        };
        values.record_declaration(&scan);
    }
    log::debug!(
        "analyzed stylesheet: {} colors, {} font sizes, {} font families, {} line heights, {} gradients, {} shadows, {} radii, {} durations, {} easings",
        values.colors.len(),
        values.font_sizes.len(),
        values.font_families.len(),
        values.line_heights.len(),
        values.gradients.len(),
        values.box_shadows.len(),
        values.radii.len(),
        values.durations.len(),
        values.easings.len()
    );
    values
}

impl StylesheetValues {
    fn record_declaration(&mut self, scan: &DeclarationScan<'_>) {
        let nodes = parse_value_nodes(scan.value());
        match scan.property() {
            "font-size" => scan.record_value(&mut self.font_sizes),
            "font-family" => scan.record_value(&mut self.font_families),
            "line-height" => scan.record_value(&mut self.line_heights),
            "box-shadow" | "-webkit-box-shadow" => scan.record_value(&mut self.box_shadows),
            property if is_radius_property(property) => scan.record_value(&mut self.radii),
            "animation-duration" | "transition-duration" => {
                for layer in split_on_commas(&nodes) {
                    scan.record_run(&mut self.durations, layer);
                }
            }
            "animation-timing-function" | "transition-timing-function" => {
                for layer in split_on_commas(&nodes) {
                    scan.record_run(&mut self.easings, layer);
                }
            }
            "animation" | "transition" => self.record_motion_shorthand(scan, &nodes),
            _ => {}
        }

        for node in &nodes {
            if node
                .function()
                .is_some_and(|(name, _)| is_gradient_function(name))
            {
                scan.record_run(&mut self.gradients, slice::from_ref(node));
            }
        }

        self.record_colors(scan, &nodes);
    }

    /// The first `<time>` of each layer is its duration; easing keywords and
    /// functions are its timing function.
    fn record_motion_shorthand(&mut self, scan: &DeclarationScan<'_>, nodes: &[ValueNode]) {
        for layer in split_on_commas(nodes) {
            let mut has_duration = false;
            for node in layer {
                let run = slice::from_ref(node);
                if !has_duration && is_time(node, scan.value()) {
                    has_duration = true;
                    scan.record_run(&mut self.durations, run);
                } else if is_easing(node) {
                    scan.record_run(&mut self.easings, run);
                }
            }
        }
    }

    fn record_colors(&mut self, scan: &DeclarationScan<'_>, nodes: &[ValueNode]) {
        let property = scan.property();
        if NAME_PROPERTIES.contains(property) {
            return;
        }
        if COLOR_PROPERTIES.contains(property) {
            let whole_value_reference = match nodes {
                [node] => {
                    node.identifier().is_some_and(|name| CSS_WIDE_KEYWORDS.contains(name))
                        || node
                            .function()
                            .is_some_and(|(name, _)| name.eq_ignore_ascii_case("var"))
                }
                _ => false,
            };
            if whole_value_reference {
                self.colors.record_location(
                    scan.value(),
                    scan.location_of_value(),
                    Some(property),
                );
                return;
            }
        }
        let mut found = Vec::new();
        collect_color_nodes(nodes, &mut found);
        for node in found {
            let run = slice::from_ref(node);
            self.colors.record_location(
                text_of_run(run, scan.value()),
                scan.location_of_run(run),
                Some(property),
            );
        }
    }
}

/// `border-radius` and its longhands, e.g. `border-top-left-radius`.
fn is_radius_property(property: &str) -> bool {
    property.starts_with("border-") && property.ends_with("-radius")
}

fn is_time(node: &ValueNode, source: &str) -> bool {
    matches!(node.kind, NodeKind::Dimension { .. }) && convert_duration(node.text(source)).is_some()
}

fn is_easing(node: &ValueNode) -> bool {
    match &node.kind {
        NodeKind::Identifier(name) => keyword_easing(name).is_some() || STEP_KEYWORDS.contains(name),
        NodeKind::Function { name, .. } => EASING_FUNCTIONS.contains(name),
        _ => false,
    }
}

/// Colors anywhere in a value, descending into non-color functions except
/// `var()`.
fn collect_color_nodes<'node>(nodes: &'node [ValueNode], found: &mut Vec<&'node ValueNode>) {
    for node in nodes {
        match &node.kind {
            NodeKind::Hash(_) => found.push(node),
            NodeKind::Identifier(name) if is_color_identifier(name) => found.push(node),
            NodeKind::Function { name, .. } if COLOR_FUNCTIONS.contains(name) => found.push(node),
            NodeKind::Function { name, .. } if name.eq_ignore_ascii_case("var") => {}
            NodeKind::Function { children, .. } => collect_color_nodes(children, found),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(occurrences: &ValueOccurrences) -> Vec<(&str, usize)> {
        occurrences
            .iter()
            .map(|value| (value.text.as_str(), value.count))
            .collect()
    }

    #[test]
    fn collects_typography() {
        let values = analyze_stylesheet(
            "a { font-size: 16px; font-family: 'Inter', sans-serif; line-height: 1.5 } b { font-size: 16px }",
        );
        assert_eq!(texts(&values.font_sizes), vec![("16px", 2)]);
        assert_eq!(texts(&values.font_families), vec![("'Inter', sans-serif", 1)]);
        assert_eq!(texts(&values.line_heights), vec![("1.5", 1)]);
    }

    #[test]
    fn collects_colors_with_properties() {
        let values = analyze_stylesheet(
            "a { color: red; background: linear-gradient(#fff, rgb(0 0 0)) } b { border: 1px solid red; background-color: var(--bg) }",
        );
        assert_eq!(
            texts(&values.colors),
            vec![("red", 2), ("#fff", 1), ("rgb(0 0 0)", 1), ("var(--bg)", 1)]
        );
        assert_eq!(
            values.colors.get("red").map(|value| value.properties.clone()),
            Some(vec!["color".to_owned(), "border".to_owned()])
        );
        assert_eq!(
            texts(&values.gradients),
            vec![("linear-gradient(#fff, rgb(0 0 0))", 1)]
        );
    }

    #[test]
    fn color_keywords_only_count_in_color_properties() {
        let values = analyze_stylesheet(
            "a { color: inherit; display: inherit; font-family: Black; box-shadow: 0 0 var(--c) }",
        );
        assert_eq!(texts(&values.colors), vec![("inherit", 1)]);
    }

    #[test]
    fn splits_motion_lists() {
        let values = analyze_stylesheet(
            ".a { transition: opacity 200ms ease-in 1s, transform .3s cubic-bezier(0, 0, 1, 1) } .b { animation-duration: 1s, 2s; animation-timing-function: steps(4, end) }",
        );
        assert_eq!(
            texts(&values.durations),
            vec![("200ms", 1), (".3s", 1), ("1s", 1), ("2s", 1)]
        );
        assert_eq!(
            texts(&values.easings),
            vec![("ease-in", 1), ("cubic-bezier(0, 0, 1, 1)", 1), ("steps(4, end)", 1)]
        );
    }

    #[test]
    fn collects_radii_and_shadows() {
        let values = analyze_stylesheet(
            "a { border-radius: 4px; border-top-left-radius: 2px 4px; box-shadow: 0 1px 2px #000 }",
        );
        assert_eq!(texts(&values.radii), vec![("4px", 1), ("2px 4px", 1)]);
        assert_eq!(texts(&values.box_shadows), vec![("0 1px 2px #000", 1)]);
        assert_eq!(texts(&values.colors), vec![("#000", 1)]);
    }

    #[test]
    fn ignores_custom_properties() {
        let values = analyze_stylesheet(":root { --brand: red; --size: 16px }");
        assert!(values.colors.is_empty());
        assert!(values.font_sizes.is_empty());
    }

    #[test]
    fn records_source_locations() {
        let values = analyze_stylesheet("a {\n  color: red;\n  fill: red }");
        let red = values.colors.get("red");
        let locations: Vec<(usize, usize)> = red
            .map(|value| value.locations.iter().map(|at| (at.line, at.column)).collect())
            .unwrap_or_default();
        assert_eq!(locations, vec![(2, 10), (3, 9)]);
        assert_eq!(red.and_then(|value| value.locations.first()).map(|at| at.length), Some(3));
    }
}
