//! Per-category occurrence maps: distinct authored values in discovery order.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Where one occurrence of a value was authored. Lines and columns are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    /// Byte offset into the stylesheet.
    pub offset: usize,
    /// Byte length of the authored value.
    pub length: usize,
}

/// One distinct authored value and how often it was seen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawValue {
    pub text: String,
    pub count: usize,
    /// Properties the value was authored in, first-seen order. Only colors
    /// record these.
    pub properties: Vec<String>,
    pub locations: Vec<SourceLocation>,
}

impl RawValue {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            count: 0,
            properties: Vec::new(),
            locations: Vec::new(),
        }
    }

    fn add_property(&mut self, property: Option<&str>) {
        if let Some(property) = property
            && !self.properties.iter().any(|known| known == property)
        {
            self.properties.push(property.to_owned());
        }
    }
}

/// Insertion-ordered map from authored text to its occurrences.
#[derive(Clone, Debug, Default)]
pub struct ValueOccurrences {
    values: Vec<RawValue>,
    index: FxHashMap<String, usize>,
}

impl ValueOccurrences {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, text: &str) -> &mut RawValue {
        let values = &mut self.values;
        let position = *self.index.entry(text.to_owned()).or_insert_with(|| {
            values.push(RawValue::new(text));
            values.len() - 1
        });
        &mut values[position]
    }

    /// Add `count` occurrences of `text`. A zero count records nothing.
    pub fn record_count(&mut self, text: &str, count: usize, property: Option<&str>) {
        if count == 0 {
            return;
        }
        let value = self.entry(text);
        value.count += count;
        value.add_property(property);
    }

    /// Add one occurrence of `text` at `location`.
    pub fn record_location(
        &mut self,
        text: &str,
        location: SourceLocation,
        property: Option<&str>,
    ) {
        let value = self.entry(text);
        value.count += 1;
        value.locations.push(location);
        value.add_property(property);
    }

    pub fn get(&self, text: &str) -> Option<&RawValue> {
        self.index
            .get(text)
            .and_then(|position| self.values.get(*position))
    }

    /// Values in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &RawValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'text> FromIterator<(&'text str, usize)> for ValueOccurrences {
    fn from_iter<I: IntoIterator<Item = (&'text str, usize)>>(iter: I) -> Self {
        let mut occurrences = Self::new();
        for (text, count) in iter {
            occurrences.record_count(text, count, None);
        }
        occurrences
    }
}
