//! Internationalization (i18n) module: the localization transform engine.
//!
//! Survey documents written before multi-language support store their text
//! fields as plain strings. This module lifts such documents into the
//! localized shape, where every text field is a language-keyed map with a
//! mandatory `"default"` entry, and keeps those maps aligned with the
//! survey's configured language set.
//!
//! # Architecture
//!
//! - `text`: the LocalizedText codec (plain-string promotion and key-set
//!   reconciliation)
//! - `translate`: choice, card, question, and survey translators built on
//!   the codec
//!
//! # Example
//!
//! ```
//! use survey_i18n::{create_localized_text, TextValue};
//!
//! let ids = vec!["en".to_string(), "de".to_string()];
//! let text = create_localized_text(&TextValue::from("Hello"), &ids);
//!
//! assert_eq!(text.default_value(), Some("Hello"));
//! assert_eq!(text.get("en"), Some(""));
//! assert_eq!(text.get("de"), Some(""));
//! ```

mod text;
mod translate;

pub use text::create_localized_text;
pub use translate::{
    extract_language_ids, translate_choice, translate_question, translate_survey,
    translate_thank_you_card, translate_welcome_card,
};
