//! Per-locale translation overlays.
//!
//! # Responsibility
//! - Hold extension translations keyed by untranslated Host label strings.
//! - Recognize the locale code inside Host locale file names.
//!
//! # Invariants
//! - Keys are opaque and matched exactly against Host dictionary keys.
//! - Overlay content is a flat string to string mapping.

use crate::host::LocaleDictionary;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

static LOCALE_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-([a-z]{2})\.").expect("valid locale file regex"));

/// Extracts the two-letter locale code from a file name like `lang-de.js`.
///
/// Only the last path segment is inspected, without query or fragment; the
/// first `-xx.` in it wins, so `lang-de.min.js` is `de`.
pub fn locale_from_file_name(file_name: &str) -> Result<String, OverlayError> {
    let path = file_name.trim().split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit(['/', '\\']).next().unwrap_or_default();
    LOCALE_FILE_RE
        .captures(segment)
        .and_then(|captures| captures.get(1))
        .map(|code| code.as_str().to_string())
        .ok_or_else(|| OverlayError::MalformedLocaleFileName(file_name.to_string()))
}

fn is_valid_locale_code(value: &str) -> bool {
    value.len() == 2 && value.chars().all(|c| c.is_ascii_lowercase())
}

/// Translations for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleOverlay {
    locale_code: String,
    entries: BTreeMap<String, String>,
}

impl LocaleOverlay {
    pub fn new(locale_code: &str) -> Result<Self, OverlayError> {
        if !is_valid_locale_code(locale_code) {
            return Err(OverlayError::InvalidLocaleCode(locale_code.to_string()));
        }
        Ok(Self {
            locale_code: locale_code.to_string(),
            entries: BTreeMap::new(),
        })
    }

    /// Parses a flat JSON object of `key -> translation` pairs.
    pub fn from_json_str(locale_code: &str, raw: &str) -> Result<Self, OverlayError> {
        let mut overlay = Self::new(locale_code)?;
        overlay.entries = serde_json::from_str::<BTreeMap<String, String>>(raw).map_err(|err| {
            OverlayError::InvalidOverlayContent {
                locale: locale_code.to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(overlay)
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn locale_code(&self) -> &str {
        &self.locale_code
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes every entry into `dictionary`, overwriting existing keys.
    ///
    /// Returns the number of entries written.
    pub fn apply(&self, dictionary: &mut dyn LocaleDictionary) -> usize {
        for (key, value) in &self.entries {
            dictionary.set_entry(key, value);
        }
        self.entries.len()
    }
}

/// All configured overlays, one per locale.
#[derive(Debug, Default, Clone)]
pub struct TranslationOverlay {
    overlays: BTreeMap<String, Arc<LocaleOverlay>>,
}

impl TranslationOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `overlay`; entries for an already configured locale are merged,
    /// later entries winning.
    pub fn register(&mut self, overlay: LocaleOverlay) {
        info!(
            "event=overlay_register module=i18n status=ok locale={} entries={}",
            overlay.locale_code,
            overlay.len()
        );
        match self.overlays.get_mut(overlay.locale_code.as_str()) {
            Some(existing) => {
                debug!(
                    "event=overlay_merge module=i18n status=ok locale={}",
                    overlay.locale_code
                );
                Arc::make_mut(existing).entries.extend(overlay.entries);
            }
            None => {
                self.overlays
                    .insert(overlay.locale_code.clone(), Arc::new(overlay));
            }
        }
    }

    pub fn get(&self, locale_code: &str) -> Option<Arc<LocaleOverlay>> {
        self.overlays.get(locale_code).cloned()
    }

    /// Sorted locale codes with an overlay.
    pub fn locales(&self) -> Vec<&str> {
        self.overlays.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

/// Overlay configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    MalformedLocaleFileName(String),
    InvalidLocaleCode(String),
    InvalidOverlayContent { locale: String, message: String },
}

impl Display for OverlayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedLocaleFileName(value) => {
                write!(f, "locale file name has no locale code: {value}")
            }
            Self::InvalidLocaleCode(value) => write!(
                f,
                "locale code is invalid: {value:?} (expected two lowercase letters)"
            ),
            Self::InvalidOverlayContent { locale, message } => {
                write!(f, "overlay for locale {locale} is not a flat string map: {message}")
            }
        }
    }
}

impl Error for OverlayError {}
