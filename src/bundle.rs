//! Locale bundle loading.
//!
//! A bundle is a directory with one JSON file per language, named by language
//! code (`locales/ko.json`, `locales/en-US.json`, ...). Nested objects are
//! flattened into dot-separated keys, so `{"ui": {"shop": {"buy": "Buy"}}}`
//! yields `ui.shop.buy`. This is the production replacement for
//! [`TableCollection::builtin`](crate::table::TableCollection::builtin).

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::language::Language;
use crate::table::{
    StringTable,
    TableCollection,
    TableError,
};

/// Errors raised while loading a locale bundle.
#[derive(Error, Debug)]
pub enum BundleError {
    /// Directory or file could not be read.
    #[error("failed to read locale bundle: {0}")]
    Io(#[from] std::io::Error),

    /// A locale file is not valid JSON.
    #[error("failed to parse locale file {file:?}: {source}")]
    Parse {
        /// The offending file.
        file: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A locale file's root is not a JSON object.
    #[error("locale file {file:?} must contain a JSON object at the root")]
    NotAnObject {
        /// The offending file.
        file: PathBuf,
    },

    /// A value that cannot be represented as localized text.
    #[error("locale file {file:?} has an unsupported value (array or null) at key {key:?}")]
    UnsupportedValue {
        /// The offending file.
        file: PathBuf,
        /// Flattened key of the offending value.
        key: String,
    },

    /// No locale file in the directory matched a known language code.
    #[error("no locale files found in {0:?}")]
    Empty(PathBuf),

    /// The loaded tables violate the shared-key-set invariant.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Loads every recognized locale file in `dir` into a [`TableCollection`].
///
/// Files whose stem is not a known language code are skipped with a warning
/// (editor droppings like `.keep` files should not fail a boot). The result
/// passes through [`TableCollection::from_tables`], so a bundle with
/// diverging key sets across languages is rejected.
///
/// # Errors
/// See [`BundleError`].
pub fn load_dir(dir: &Path) -> Result<TableCollection, BundleError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension() == Some(OsStr::new("json")))
        .collect();
    // Deterministic load order, so warnings and errors are reproducible.
    paths.sort();

    let mut tables: HashMap<Language, StringTable> = HashMap::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
            continue;
        };
        let Some(language) = Language::from_code(stem) else {
            tracing::warn!("Skipping locale file with unrecognized language code: {path:?}");
            continue;
        };

        let table = load_file(&path)?;
        tracing::debug!("Loaded {} keys for {} from {path:?}", table.len(), language.code());
        tables.insert(language, table);
    }

    if tables.is_empty() {
        return Err(BundleError::Empty(dir.to_path_buf()));
    }
    Ok(TableCollection::from_tables(tables)?)
}

/// Loads and flattens a single locale file.
fn load_file(path: &Path) -> Result<StringTable, BundleError> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|source| BundleError::Parse { file: path.to_path_buf(), source })?;

    let Value::Object(_) = value else {
        return Err(BundleError::NotAnObject { file: path.to_path_buf() });
    };

    let mut entries = HashMap::new();
    flatten_value(&value, None, path, &mut entries)?;
    Ok(entries.into_iter().collect())
}

/// Flattens a JSON value into dot-separated keys.
///
/// Strings are taken verbatim; numbers and booleans are stringified (handy
/// for tuning values that live next to copy). Arrays and nulls have no
/// sensible text form and are rejected.
fn flatten_value(
    value: &Value,
    prefix: Option<&str>,
    file: &Path,
    out: &mut HashMap<String, String>,
) -> Result<(), BundleError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
                flatten_value(child, Some(&full_key), file, out)?;
            }
            Ok(())
        }
        Value::String(text) => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), text.clone());
            }
            Ok(())
        }
        Value::Number(_) | Value::Bool(_) => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), value.to_string());
            }
            Ok(())
        }
        Value::Array(_) | Value::Null => Err(BundleError::UnsupportedValue {
            file: file.to_path_buf(),
            key: prefix.unwrap_or_default().to_string(),
        }),
    }
}
