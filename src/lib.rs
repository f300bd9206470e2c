//! Localization transform engine for multilingual survey documents.
//!
//! A pure, synchronous function family that converts survey documents
//! whose text fields are plain strings (the legacy shape) into documents
//! whose text fields are language-keyed maps with a mandatory `"default"`
//! entry, and reconciles those maps when the configured language set
//! changes.
//!
//! The crate knows nothing about persistence, transport, or rendering: it
//! consumes an in-memory survey projection plus the configured languages
//! and returns a freshly built, schema-valid projection. Inputs are
//! borrowed immutably and never modified, so calls are safe to run
//! concurrently with no coordination.
//!
//! # Example
//!
//! ```
//! use survey_i18n::{translate_survey, Language, Survey};
//!
//! let survey: Survey = serde_json::from_value(serde_json::json!({
//!     "questions": [{
//!         "id": "q1",
//!         "type": "openText",
//!         "headline": "What can we improve?",
//!         "placeholder": "Type here"
//!     }],
//!     "welcomeCard": {"enabled": true, "headline": "Welcome"},
//!     "thankYouCard": {"enabled": true, "headline": "Thanks"}
//! }))?;
//!
//! let languages = vec![Language::new("en"), Language::new("fr")];
//! let translated = translate_survey(&survey, &languages)?;
//!
//! let headline = translated.questions[0].headline.as_localized().unwrap();
//! assert_eq!(headline.default_value(), Some("What can we improve?"));
//! assert_eq!(headline.get("fr"), Some(""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod i18n;
pub mod surveys;

pub use i18n::{
    create_localized_text, extract_language_ids, translate_choice, translate_question,
    translate_survey, translate_thank_you_card, translate_welcome_card,
};
pub use surveys::{
    Choice, Language, LanguageId, LocalizedText, PictureChoice, Question, QuestionVariant,
    RatingScale, SchemaViolation, ShuffleOption, Survey, TextValue, ThankYouCard, WelcomeCard,
};
