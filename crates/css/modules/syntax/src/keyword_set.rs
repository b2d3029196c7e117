//! Case-insensitive membership over fixed CSS vocabularies.
//!
//! CSS keywords are ASCII case-insensitive, so `currentColor` and `MarkText`
//! match the lowercase entries `currentcolor` and `marktext`.

use rustc_hash::FxHashSet;

/// An immutable set of lowercase keywords with case-insensitive lookup.
#[derive(Clone, Debug, Default)]
pub struct KeywordSet {
    words: FxHashSet<&'static str>,
}

impl KeywordSet {
    /// Build a set from lowercase words.
    pub fn new(words: &[&'static str]) -> Self {
        Self {
            words: words.iter().copied().collect(),
        }
    }

    /// Whether `word` is in the set, ignoring ASCII case.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        if word.bytes().any(|byte| byte.is_ascii_uppercase()) {
            return self.words.contains(word.to_ascii_lowercase().as_str());
        }
        self.words.contains(word)
    }
}
