//! LocalizedText codec: plain-string promotion and key-set reconciliation.
//!
//! This is the leaf of the transform: everything above it (choices, cards,
//! questions, surveys) is field bookkeeping around this one conversion.

use crate::surveys::{LanguageId, LocalizedText, TextValue};
use tracing::trace;

/// Convert a translatable field into a localized text map aligned with the
/// configured language-id set.
///
/// * A plain string becomes a fresh map with the string under `"default"`
///   and an empty-string entry for every configured language id. A
///   configured id that is literally `"default"` is skipped so the source
///   text is never clobbered.
/// * An already-localized map is reconciled: missing configured ids are
///   inserted with `""`, and keys that are neither `"default"` nor
///   configured are pruned.
///
/// The function is total over its input domain and never mutates its
/// arguments. Duplicate ids in `language_ids` are harmless: inserting the
/// same key twice is a no-op under map semantics.
pub fn create_localized_text(text: &TextValue, language_ids: &[LanguageId]) -> LocalizedText {
    match text {
        TextValue::Plain(text) => LocalizedText::from_plain(text, language_ids),
        TextValue::Localized(text) => text.reconciled(language_ids),
    }
}

impl LocalizedText {
    /// Promote a plain string to a localized map: `"default"` holds the
    /// string, every configured language id gets an empty placeholder.
    pub fn from_plain(text: &str, language_ids: &[LanguageId]) -> Self {
        let mut localized = LocalizedText::new();
        localized.set(Self::DEFAULT_KEY, text);
        for language_id in language_ids {
            if language_id != Self::DEFAULT_KEY {
                localized.set(language_id.clone(), "");
            }
        }
        localized
    }

    /// Return a copy of this map aligned with the configured language-id
    /// set: configured ids absent from the map are inserted with `""`,
    /// keys outside the set are removed. The `"default"` entry is never
    /// touched and never required to be configured.
    pub fn reconciled(&self, language_ids: &[LanguageId]) -> Self {
        let mut reconciled = self.clone();

        for language_id in language_ids {
            if reconciled.get(language_id).is_none() {
                reconciled.set(language_id.clone(), "");
            }
        }

        let stale: Vec<String> = reconciled
            .keys()
            .filter(|key| *key != Self::DEFAULT_KEY && !language_ids.iter().any(|id| id == key))
            .map(str::to_string)
            .collect();
        if !stale.is_empty() {
            trace!(keys = ?stale, "pruning stale language keys");
        }
        for key in stale {
            reconciled.remove(&key);
        }

        reconciled
    }
}
