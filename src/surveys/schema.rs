//! Structural validation for translated survey documents.
//!
//! Each translator validates its output before returning it: cards and
//! questions against their own shape, and the assembled survey against the
//! whole-projection shape (including cross-field constraints such as the
//! minimum question count). A failure means the input document was
//! malformed in a way the transform does not repair, and is always fatal
//! to the enclosing [`crate::i18n::translate_survey`] call.

use crate::surveys::{
    Question, QuestionVariant, Survey, TextValue, ThankYouCard, WelcomeCard,
};
use thiserror::Error;

/// A translated object failed validation against its expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation at `{path}`: {message}")]
pub struct SchemaViolation {
    /// Dotted path to the offending field (e.g., `questions[2].headline`).
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Prepend a path segment, turning `headline` into
    /// `questions[2].headline`.
    pub fn prefixed(mut self, prefix: &str) -> Self {
        self.path = if self.path.is_empty() {
            prefix.to_string()
        } else {
            format!("{}.{}", prefix, self.path)
        };
        self
    }
}

/// Require a translatable field to be in the localized shape with a
/// `"default"` entry.
fn expect_localized(value: &TextValue, path: &str) -> Result<(), SchemaViolation> {
    match value {
        TextValue::Plain(_) => Err(SchemaViolation::new(
            path,
            "expected a language-keyed text map, found a plain string",
        )),
        TextValue::Localized(text) if !text.has_default() => Err(SchemaViolation::new(
            path,
            "text map is missing the \"default\" entry",
        )),
        TextValue::Localized(_) => Ok(()),
    }
}

fn expect_localized_opt(value: &Option<TextValue>, path: &str) -> Result<(), SchemaViolation> {
    match value {
        Some(value) => expect_localized(value, path),
        None => Ok(()),
    }
}

/// Validate a welcome card after translation.
pub fn validate_welcome_card(card: &WelcomeCard) -> Result<(), SchemaViolation> {
    expect_localized_opt(&card.headline, "headline")?;
    expect_localized_opt(&card.html, "html")?;
    expect_localized_opt(&card.button_label, "buttonLabel")?;
    Ok(())
}

/// Validate a thank-you card after translation.
pub fn validate_thank_you_card(card: &ThankYouCard) -> Result<(), SchemaViolation> {
    expect_localized_opt(&card.headline, "headline")?;
    expect_localized_opt(&card.subheader, "subheader")?;
    expect_localized_opt(&card.button_label, "buttonLabel")?;
    Ok(())
}

/// Validate a question after translation: the common fields plus the
/// variant-specific shape selected by its type tag.
pub fn validate_question(question: &Question) -> Result<(), SchemaViolation> {
    expect_localized(&question.headline, "headline")?;
    expect_localized_opt(&question.subheader, "subheader")?;
    expect_localized_opt(&question.button_label, "buttonLabel")?;
    expect_localized_opt(&question.back_button_label, "backButtonLabel")?;

    match &question.variant {
        QuestionVariant::OpenText { placeholder, .. } => {
            expect_localized_opt(placeholder, "placeholder")?;
        }
        QuestionVariant::MultipleChoiceSingle {
            choices,
            other_option_placeholder,
            ..
        }
        | QuestionVariant::MultipleChoiceMulti {
            choices,
            other_option_placeholder,
            ..
        } => {
            if choices.len() < 2 {
                return Err(SchemaViolation::new(
                    "choices",
                    format!("expected at least 2 choices, found {}", choices.len()),
                ));
            }
            for (index, choice) in choices.iter().enumerate() {
                expect_localized(&choice.label, &format!("choices[{}].label", index))?;
            }
            expect_localized_opt(other_option_placeholder, "otherOptionPlaceholder")?;
        }
        QuestionVariant::Cta {
            html,
            dismiss_button_label,
            ..
        } => {
            expect_localized_opt(html, "html")?;
            expect_localized_opt(dismiss_button_label, "dismissButtonLabel")?;
        }
        QuestionVariant::Consent { html, label } => {
            expect_localized_opt(html, "html")?;
            expect_localized(label, "label")?;
        }
        QuestionVariant::Nps {
            lower_label,
            upper_label,
        }
        | QuestionVariant::Rating {
            lower_label,
            upper_label,
            ..
        } => {
            expect_localized_opt(lower_label, "lowerLabel")?;
            expect_localized_opt(upper_label, "upperLabel")?;
        }
        QuestionVariant::FileUpload { .. } | QuestionVariant::Cal { .. } => {}
        QuestionVariant::PictureSelection { choices, .. } => {
            if choices.len() < 2 {
                return Err(SchemaViolation::new(
                    "choices",
                    format!("expected at least 2 pictures, found {}", choices.len()),
                ));
            }
        }
    }

    Ok(())
}

/// Validate the full survey projection, including cross-field constraints
/// that individual question checks cannot see.
pub fn validate_survey(survey: &Survey) -> Result<(), SchemaViolation> {
    if survey.questions.is_empty() {
        return Err(SchemaViolation::new(
            "questions",
            "a survey must have at least one question",
        ));
    }

    for (index, question) in survey.questions.iter().enumerate() {
        validate_question(question)
            .map_err(|violation| violation.prefixed(&format!("questions[{}]", index)))?;
    }

    validate_welcome_card(&survey.welcome_card)
        .map_err(|violation| violation.prefixed("welcomeCard"))?;
    validate_thank_you_card(&survey.thank_you_card)
        .map_err(|violation| violation.prefixed("thankYouCard"))?;

    Ok(())
}
