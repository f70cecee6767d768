//! Per-language string tables.

use std::collections::{
    BTreeSet,
    HashMap,
};

use thiserror::Error;

use crate::language::Language;

/// Errors raised while assembling a [`TableCollection`].
#[derive(Error, Debug)]
pub enum TableError {
    /// A table's key set diverges from the rest of the collection.
    ///
    /// Every language must translate the same keys; otherwise a missing-key
    /// sentinel would appear in some languages but not others.
    #[error("string table for {language:?} diverges from the collection key set (missing: {missing:?}, extra: {extra:?})")]
    KeySetMismatch {
        /// Language whose table diverges.
        language: Language,
        /// Keys present elsewhere but absent from this table.
        missing: Vec<String>,
        /// Keys present in this table but nowhere else.
        extra: Vec<String>,
    },
}

/// A single language's translations (key → localized text).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    /// Localized text by key.
    entries: HashMap<String, String>,
}

impl StringTable {
    /// Looks up the localized text for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` has a translation in this table.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted key set, used for cross-table consistency checks.
    fn key_set(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

impl FromIterator<(String, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for StringTable {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }
}

/// The immutable-after-build mapping from language to its string table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCollection {
    /// One table per supported language.
    tables: HashMap<Language, StringTable>,
}

impl TableCollection {
    /// Builds the compiled-in tables (Korean, English, Japanese).
    ///
    /// Pure and deterministic; production deployments load tables from a
    /// locale bundle instead (see [`crate::bundle`]).
    #[must_use]
    pub fn builtin() -> Self {
        let tables = HashMap::from([
            (
                Language::Korean,
                StringTable::from([
                    ("UI_MAIN_START_BUTTON", "시작하기"),
                    ("UI_SHOP_BUY", "구매하기"),
                    ("UI_ERROR_NETWORK", "네트워크 오류"),
                ]),
            ),
            (
                Language::English,
                StringTable::from([
                    ("UI_MAIN_START_BUTTON", "Start"),
                    ("UI_SHOP_BUY", "Buy"),
                    ("UI_ERROR_NETWORK", "Network Error"),
                ]),
            ),
            (
                Language::Japanese,
                StringTable::from([
                    ("UI_MAIN_START_BUTTON", "スタート"),
                    ("UI_SHOP_BUY", "購入する"),
                    ("UI_ERROR_NETWORK", "ネットワークエラー"),
                ]),
            ),
        ]);
        Self { tables }
    }

    /// Checked constructor: every table must carry the same key set.
    ///
    /// # Errors
    /// [`TableError::KeySetMismatch`] naming the first diverging language
    /// (in code order, so the error is deterministic).
    pub fn from_tables(tables: HashMap<Language, StringTable>) -> Result<Self, TableError> {
        let union: BTreeSet<&str> = tables.values().flat_map(StringTable::key_set).collect();

        let mut languages: Vec<Language> = tables.keys().copied().collect();
        languages.sort_by_key(|lang| lang.code());

        for language in languages {
            let Some(table) = tables.get(&language) else { continue };
            let keys = table.key_set();
            if keys != union {
                let missing =
                    union.difference(&keys).map(|k| (*k).to_string()).collect::<Vec<_>>();
                let extra = keys.difference(&union).map(|k| (*k).to_string()).collect::<Vec<_>>();
                return Err(TableError::KeySetMismatch { language, missing, extra });
            }
        }

        Ok(Self { tables })
    }

    /// Whether a table exists for `language`.
    #[must_use]
    pub fn has_language(&self, language: Language) -> bool {
        self.tables.contains_key(&language)
    }

    /// The table for `language`, if one exists.
    #[must_use]
    pub fn get(&self, language: Language) -> Option<&StringTable> {
        self.tables.get(&language)
    }

    /// Languages with a table, sorted by code for stable iteration.
    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.tables.keys().copied().collect();
        languages.sort_by_key(|lang| lang.code());
        languages
    }

    /// Number of language tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the collection holds no tables at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_builtin_is_deterministic() {
        // Table construction is a pure function of its source data.
        assert_that!(TableCollection::builtin(), eq(&TableCollection::builtin()));
    }

    #[rstest]
    fn test_builtin_covers_the_shipped_languages() {
        let tables = TableCollection::builtin();

        assert_that!(
            tables.languages(),
            eq(&vec![Language::English, Language::Japanese, Language::Korean])
        );
        assert_that!(tables.has_language(Language::French), eq(false));
    }

    #[rstest]
    fn test_builtin_tables_share_one_key_set() {
        let tables = TableCollection::builtin();
        let rebuilt = TableCollection::from_tables(
            tables
                .languages()
                .into_iter()
                .map(|lang| (lang, tables.get(lang).unwrap().clone()))
                .collect(),
        );

        assert_that!(rebuilt, ok(anything()));
    }

    #[rstest]
    fn test_lookup_returns_stored_text() {
        let tables = TableCollection::builtin();
        let korean = tables.get(Language::Korean).unwrap();

        assert_that!(korean.get("UI_SHOP_BUY").unwrap(), eq("구매하기"));
        assert_that!(korean.get("UI_UNKNOWN"), none());
    }

    #[rstest]
    fn test_from_tables_rejects_diverging_key_sets() {
        let tables = HashMap::from([
            (Language::Korean, StringTable::from([("A", "가"), ("B", "나")])),
            (Language::English, StringTable::from([("A", "A")])),
        ]);

        let err = TableCollection::from_tables(tables).unwrap_err();
        let TableError::KeySetMismatch { language, missing, extra } = err;
        assert_that!(language, eq(Language::English));
        assert_that!(missing, eq(&vec!["B"]));
        assert_that!(extra, is_empty());
    }

    #[rstest]
    fn test_from_tables_accepts_matching_key_sets() {
        let tables = HashMap::from([
            (Language::Korean, StringTable::from([("A", "가")])),
            (Language::English, StringTable::from([("A", "A")])),
        ]);

        let collection = TableCollection::from_tables(tables).unwrap();
        assert_that!(collection.len(), eq(2));
    }
}
