//! Ordered set of language codes chosen as generation targets.

use serde::{Deserialize, Serialize};

/// Insertion-ordered set of language codes.
///
/// Adding a code that is already present and removing one that is absent are
/// both no-ops, so the set never holds duplicates and its order only changes
/// through explicit additions and removals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SelectedLanguages {
    codes: Vec<String>,
}

impl SelectedLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `code` unless it is already selected.
    ///
    /// Returns `true` if the set changed.
    pub fn add(&mut self, code: &str) -> bool {
        if self.contains(code) {
            return false;
        }
        self.codes.push(code.to_string());
        true
    }

    /// Remove `code` if present.
    ///
    /// Returns `true` if the set changed.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.codes.len();
        self.codes.retain(|c| c != code);
        self.codes.len() != before
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelectedLanguages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for code in iter {
            selection.add(code.as_ref());
        }
        selection
    }
}

impl From<Vec<String>> for SelectedLanguages {
    fn from(codes: Vec<String>) -> Self {
        codes.into_iter().collect()
    }
}

impl From<SelectedLanguages> for Vec<String> {
    fn from(selection: SelectedLanguages) -> Self {
        selection.codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== add/remove Tests ====================

    #[test]
    fn test_add_appends_in_order() {
        let mut selection = SelectedLanguages::from_iter(["en"]);
        assert!(selection.add("fr"));
        assert_eq!(selection.codes(), ["en", "fr"]);
    }

    #[test]
    fn test_add_existing_is_noop() {
        let mut selection = SelectedLanguages::from_iter(["en", "fr"]);
        assert!(!selection.add("en"));
        assert_eq!(selection.codes(), ["en", "fr"]);
    }

    #[test]
    fn test_remove_present() {
        let mut selection = SelectedLanguages::from_iter(["en", "fr"]);
        assert!(selection.remove("en"));
        assert_eq!(selection.codes(), ["fr"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut selection = SelectedLanguages::from_iter(["en", "fr"]);
        assert!(!selection.remove("de"));
        assert_eq!(selection.codes(), ["en", "fr"]);
    }

    #[test]
    fn test_selection_walkthrough() {
        let mut selection = SelectedLanguages::from_iter(["en"]);
        selection.add("fr");
        assert_eq!(selection.codes(), ["en", "fr"]);
        selection.add("en");
        assert_eq!(selection.codes(), ["en", "fr"]);
        selection.remove("en");
        assert_eq!(selection.codes(), ["fr"]);
    }

    #[test]
    fn test_from_iter_drops_duplicates() {
        let selection = SelectedLanguages::from_iter(["es", "de", "es"]);
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["es", "de"]);
    }

    #[test]
    fn test_empty_selection() {
        let mut selection = SelectedLanguages::new();
        assert!(selection.is_empty());
        assert!(!selection.remove("en"));
        assert!(selection.is_empty());
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_serializes_as_plain_array() {
        let selection = SelectedLanguages::from_iter(["es", "zh-TW"]);
        let json = serde_json::to_string(&selection).expect("Should serialize");
        assert_eq!(json, r#"["es","zh-TW"]"#);
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let mut selection: SelectedLanguages =
            serde_json::from_str(r#"["en","en","fr"]"#).expect("Should deserialize");
        assert_eq!(selection.codes(), ["en", "fr"]);
        assert_eq!(selection.len(), 2);

        assert!(selection.remove("en"));
        assert_eq!(selection.codes(), ["fr"]);
    }

    // ==================== Property Tests ====================

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Remove(String),
    }

    fn op() -> impl Strategy<Value = Op> {
        let code = prop::sample::select(vec!["en", "fr", "es", "de", "ja"]).prop_map(String::from);
        prop_oneof![
            code.clone().prop_map(Op::Add),
            code.prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_ordered_set_model(ops in prop::collection::vec(op(), 0..40)) {
            let mut selection = SelectedLanguages::new();
            let mut model: Vec<String> = Vec::new();

            for op in ops {
                match op {
                    Op::Add(code) => {
                        let changed = selection.add(&code);
                        prop_assert_eq!(changed, !model.contains(&code));
                        if changed {
                            model.push(code);
                        }
                    }
                    Op::Remove(code) => {
                        let changed = selection.remove(&code);
                        prop_assert_eq!(changed, model.contains(&code));
                        model.retain(|c| c != &code);
                    }
                }
                prop_assert_eq!(selection.codes(), model.as_slice());
            }
        }

        #[test]
        fn prop_double_add_is_idempotent(codes in prop::collection::vec("[a-z]{2}", 1..10)) {
            let mut once: SelectedLanguages = codes.iter().collect();
            let twice = once.clone();
            for code in &codes {
                once.add(code);
            }
            prop_assert_eq!(once, twice);
        }
    }
}
