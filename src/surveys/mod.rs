//! Survey data model: typed representation of survey documents.
//!
//! Survey documents are JSON at rest in the surrounding application. The
//! types here mirror that wire shape (camelCase keys, a `type` tag on
//! questions) while making the legacy-vs-localized distinction explicit:
//! every translatable field is a [`TextValue`], which is either a plain
//! string (legacy documents) or a language-keyed [`LocalizedText`] map.
//!
//! Only the projection relevant to localization is modeled in full
//! (questions and the two cards); every other survey attribute is captured
//! verbatim in [`Survey::rest`] and passed through untouched.

mod schema;

pub use schema::{
    validate_question, validate_survey, validate_thank_you_card, validate_welcome_card,
    SchemaViolation,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a configured survey language (e.g., a database id or an
/// ISO 639-1 code, depending on the platform's language records).
pub type LanguageId = String;

/// A language configured on a survey.
///
/// Only [`Language::id`] matters to the localization transform; `code` and
/// `alias` are display metadata carried along from the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: LanguageId,
    /// ISO 639-1 language code (e.g., "en", "es")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Optional display alias configured by the organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Language {
    pub fn new(id: impl Into<LanguageId>) -> Self {
        Self {
            id: id.into(),
            code: None,
            alias: None,
        }
    }
}

/// A language-keyed string map with a mandatory `"default"` entry.
///
/// Keys other than `"default"` are language ids; they are kept in sync
/// with the survey's configured language set by the codec in
/// [`crate::i18n::create_localized_text`]. Iteration order is sorted by
/// key and has no semantic meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// The sentinel key holding the untranslated source text.
    pub const DEFAULT_KEY: &'static str = "default";

    /// Create an empty map. Note that an empty map violates the
    /// `"default"`-entry invariant until a default value is set; schema
    /// validation rejects it.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the value for a language id (or `"default"`).
    pub fn set(&mut self, language_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(language_id.into(), value.into());
    }

    /// Get the value for a language id, if present.
    pub fn get(&self, language_id: &str) -> Option<&str> {
        self.0.get(language_id).map(String::as_str)
    }

    /// Get the `"default"` entry, if present.
    pub fn default_value(&self) -> Option<&str> {
        self.get(Self::DEFAULT_KEY)
    }

    /// Whether the mandatory `"default"` entry is present.
    pub fn has_default(&self) -> bool {
        self.0.contains_key(Self::DEFAULT_KEY)
    }

    /// Iterate over `(key, value)` entries in sorted key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the keys (language ids plus `"default"`).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, language_id: &str) -> Option<String> {
        self.0.remove(language_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A translatable field: either a plain string (legacy shape) or a
/// language-keyed map (current shape).
///
/// The two shapes are distinguished structurally in JSON (string vs.
/// object), hence the untagged representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Plain(String),
    Localized(LocalizedText),
}

impl TextValue {
    pub fn is_plain(&self) -> bool {
        matches!(self, TextValue::Plain(_))
    }

    pub fn as_localized(&self) -> Option<&LocalizedText> {
        match self {
            TextValue::Plain(_) => None,
            TextValue::Localized(text) => Some(text),
        }
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        TextValue::Plain(text.to_string())
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        TextValue::Plain(text)
    }
}

impl From<LocalizedText> for TextValue {
    fn from(text: LocalizedText) -> Self {
        TextValue::Localized(text)
    }
}

/// A selectable option on a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,
    pub label: TextValue,
}

/// An image option on a picture-selection question. Not translatable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureChoice {
    pub id: String,
    pub image_url: String,
}

/// Rating question scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RatingScale {
    Number,
    Smiley,
    Star,
}

/// Shuffle behavior for multiple-choice options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShuffleOption {
    None,
    All,
    ExceptLast,
}

/// The card shown before the first question.
///
/// Translatable fields: `headline`, `html`, `button_label`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeCard {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_label: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_finish: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_response_count: Option<bool>,
    /// Card attributes outside the localization model. Passed through by
    /// identity.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// The card shown after the last question.
///
/// Translatable fields: `headline`, `subheader`, `button_label`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouCard {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheader: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_label: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    /// Card attributes outside the localization model. Passed through by
    /// identity.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// A survey question: common fields plus a variant selected by the JSON
/// `type` tag.
///
/// Serde is hand-written for this type. Real documents carry question
/// attributes the model does not name (logic jumps, images, editor
/// metadata), and those must survive a translate round trip; the derive
/// cannot split leftover keys between the flattened variant and a
/// pass-through map, so deserialization extracts the known fields and
/// collects everything else into [`Question::rest`] verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub headline: TextValue,
    pub subheader: Option<TextValue>,
    pub button_label: Option<TextValue>,
    pub back_button_label: Option<TextValue>,
    pub required: bool,
    pub variant: QuestionVariant,
    /// Question attributes outside the localization model. Passed through
    /// by identity.
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl Serialize for Question {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error;

        let mut document = self.rest.clone();
        document.insert(
            "id".to_string(),
            serde_json::Value::String(self.id.clone()),
        );
        document.insert(
            "headline".to_string(),
            serde_json::to_value(&self.headline).map_err(S::Error::custom)?,
        );
        for (key, value) in [
            ("subheader", &self.subheader),
            ("buttonLabel", &self.button_label),
            ("backButtonLabel", &self.back_button_label),
        ] {
            if let Some(value) = value {
                document.insert(
                    key.to_string(),
                    serde_json::to_value(value).map_err(S::Error::custom)?,
                );
            }
        }
        document.insert(
            "required".to_string(),
            serde_json::Value::Bool(self.required),
        );

        match serde_json::to_value(&self.variant).map_err(S::Error::custom)? {
            serde_json::Value::Object(fields) => document.extend(fields),
            _ => {
                return Err(S::Error::custom(
                    "question variant did not serialize to an object",
                ))
            }
        }

        document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Question {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let mut document = serde_json::Map::deserialize(deserializer)?;

        let id: String = match document.remove("id") {
            Some(value) => serde_json::from_value(value).map_err(D::Error::custom)?,
            None => return Err(D::Error::missing_field("id")),
        };
        let headline: TextValue = match document.remove("headline") {
            Some(value) => serde_json::from_value(value).map_err(D::Error::custom)?,
            None => return Err(D::Error::missing_field("headline")),
        };
        let subheader = take_text(&mut document, "subheader").map_err(D::Error::custom)?;
        let button_label = take_text(&mut document, "buttonLabel").map_err(D::Error::custom)?;
        let back_button_label =
            take_text(&mut document, "backButtonLabel").map_err(D::Error::custom)?;
        let required = match document.remove("required") {
            None | Some(serde_json::Value::Null) => false,
            Some(value) => serde_json::from_value(value).map_err(D::Error::custom)?,
        };

        // The variant reads its tag and fields from the remaining keys;
        // whatever it does not own stays behind as pass-through.
        let variant: QuestionVariant =
            serde_json::from_value(serde_json::Value::Object(document.clone()))
                .map_err(D::Error::custom)?;
        document.remove("type");
        for field in variant.field_names() {
            document.remove(*field);
        }

        Ok(Question {
            id,
            headline,
            subheader,
            button_label,
            back_button_label,
            required,
            variant,
            rest: document,
        })
    }
}

/// Take an optional translatable field out of a document map, treating an
/// explicit `null` like an absent key.
fn take_text(
    document: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<Option<TextValue>, serde_json::Error> {
    match document.remove(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some),
    }
}

/// Variant-specific question payload, tagged by the `type` key.
///
/// The enum is closed: an unrecognized tag is rejected when a document is
/// deserialized, before it reaches the transform. Variant identity never
/// changes during translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum QuestionVariant {
    OpenText {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<TextValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        long_answer: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input_type: Option<String>,
    },
    MultipleChoiceSingle {
        choices: Vec<Choice>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        other_option_placeholder: Option<TextValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shuffle_option: Option<ShuffleOption>,
    },
    MultipleChoiceMulti {
        choices: Vec<Choice>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        other_option_placeholder: Option<TextValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shuffle_option: Option<ShuffleOption>,
    },
    Cta {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        html: Option<TextValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dismiss_button_label: Option<TextValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        button_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        button_external: Option<bool>,
    },
    Consent {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        html: Option<TextValue>,
        label: TextValue,
    },
    Nps {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower_label: Option<TextValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_label: Option<TextValue>,
    },
    Rating {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<RatingScale>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range: Option<u8>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower_label: Option<TextValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_label: Option<TextValue>,
    },
    FileUpload {
        #[serde(default)]
        allow_multiple_files: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_size_in_mb: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        allowed_file_extensions: Option<Vec<String>>,
    },
    PictureSelection {
        #[serde(default)]
        allow_multi: bool,
        choices: Vec<PictureChoice>,
    },
    Cal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cal_user_name: Option<String>,
    },
}

impl QuestionVariant {
    /// The JSON `type` tag for this variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            QuestionVariant::OpenText { .. } => "openText",
            QuestionVariant::MultipleChoiceSingle { .. } => "multipleChoiceSingle",
            QuestionVariant::MultipleChoiceMulti { .. } => "multipleChoiceMulti",
            QuestionVariant::Cta { .. } => "cta",
            QuestionVariant::Consent { .. } => "consent",
            QuestionVariant::Nps { .. } => "nps",
            QuestionVariant::Rating { .. } => "rating",
            QuestionVariant::FileUpload { .. } => "fileUpload",
            QuestionVariant::PictureSelection { .. } => "pictureSelection",
            QuestionVariant::Cal { .. } => "cal",
        }
    }

    /// The JSON keys owned by this variant, excluding the `type` tag.
    /// Used to separate variant fields from pass-through attributes when
    /// a question is deserialized.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            QuestionVariant::OpenText { .. } => &["placeholder", "longAnswer", "inputType"],
            QuestionVariant::MultipleChoiceSingle { .. }
            | QuestionVariant::MultipleChoiceMulti { .. } => {
                &["choices", "otherOptionPlaceholder", "shuffleOption"]
            }
            QuestionVariant::Cta { .. } => {
                &["html", "dismissButtonLabel", "buttonUrl", "buttonExternal"]
            }
            QuestionVariant::Consent { .. } => &["html", "label"],
            QuestionVariant::Nps { .. } => &["lowerLabel", "upperLabel"],
            QuestionVariant::Rating { .. } => &["scale", "range", "lowerLabel", "upperLabel"],
            QuestionVariant::FileUpload { .. } => {
                &["allowMultipleFiles", "maxSizeInMb", "allowedFileExtensions"]
            }
            QuestionVariant::PictureSelection { .. } => &["allowMulti", "choices"],
            QuestionVariant::Cal { .. } => &["calUserName"],
        }
    }
}

/// The projection of a survey document seen by the localization transform:
/// the questions and the two cards, plus every other attribute carried
/// verbatim in `rest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub questions: Vec<Question>,
    pub welcome_card: WelcomeCard,
    pub thank_you_card: ThankYouCard,
    /// Survey attributes outside the localization projection. Passed
    /// through by identity.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}
