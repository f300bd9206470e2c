//! Translators: lift survey structures from the legacy plain-string shape
//! into the localized shape.
//!
//! Each translator promotes the plain-string fields of its structure via
//! the codec in [`crate::i18n::text`], leaves already-localized and absent
//! fields untouched, and validates its output before returning it. All
//! translators borrow their input immutably and build fresh values, so the
//! caller's document is never modified.

use crate::i18n::create_localized_text;
use crate::surveys::{
    self, Choice, Language, LanguageId, Question, QuestionVariant, SchemaViolation, Survey,
    TextValue, ThankYouCard, WelcomeCard,
};
use tracing::debug;

/// Collect the ids of a survey's configured languages, in input order.
///
/// Duplicates are not removed here; the codec treats them as no-ops.
pub fn extract_language_ids(languages: &[Language]) -> Vec<LanguageId> {
    languages.iter().map(|language| language.id.clone()).collect()
}

/// Promote a plain-string field; pass a localized field through unchanged.
fn promote(value: &TextValue, language_ids: &[LanguageId]) -> TextValue {
    match value {
        TextValue::Plain(_) => TextValue::Localized(create_localized_text(value, language_ids)),
        TextValue::Localized(_) => value.clone(),
    }
}

fn promote_opt(value: &Option<TextValue>, language_ids: &[LanguageId]) -> Option<TextValue> {
    value.as_ref().map(|value| promote(value, language_ids))
}

/// Translate a single choice label.
///
/// Labels already in map form pass through with whatever keys they have;
/// they are not reconciled against the configured language set here. (The
/// editor reconciles them when the language set itself changes.)
pub fn translate_choice(choice: &Choice, language_ids: &[LanguageId]) -> Choice {
    Choice {
        id: choice.id.clone(),
        label: promote(&choice.label, language_ids),
    }
}

/// Translate the welcome card and validate the result.
pub fn translate_welcome_card(
    card: &WelcomeCard,
    language_ids: &[LanguageId],
) -> Result<WelcomeCard, SchemaViolation> {
    let translated = WelcomeCard {
        headline: promote_opt(&card.headline, language_ids),
        html: promote_opt(&card.html, language_ids),
        button_label: promote_opt(&card.button_label, language_ids),
        ..card.clone()
    };
    surveys::validate_welcome_card(&translated)?;
    Ok(translated)
}

/// Translate the thank-you card and validate the result.
pub fn translate_thank_you_card(
    card: &ThankYouCard,
    language_ids: &[LanguageId],
) -> Result<ThankYouCard, SchemaViolation> {
    let translated = ThankYouCard {
        headline: promote_opt(&card.headline, language_ids),
        subheader: promote_opt(&card.subheader, language_ids),
        button_label: promote_opt(&card.button_label, language_ids),
        ..card.clone()
    };
    surveys::validate_thank_you_card(&translated)?;
    Ok(translated)
}

/// Translate a single question: common fields first, then the fields owned
/// by its variant. The variant tag never changes; the match is exhaustive,
/// so adding a question kind without deciding its translatable fields is a
/// compile error.
pub fn translate_question(
    question: &Question,
    language_ids: &[LanguageId],
) -> Result<Question, SchemaViolation> {
    let variant = match &question.variant {
        QuestionVariant::OpenText {
            placeholder,
            long_answer,
            input_type,
        } => QuestionVariant::OpenText {
            placeholder: promote_opt(placeholder, language_ids),
            long_answer: *long_answer,
            input_type: input_type.clone(),
        },
        QuestionVariant::MultipleChoiceSingle {
            choices,
            other_option_placeholder,
            shuffle_option,
        } => QuestionVariant::MultipleChoiceSingle {
            choices: choices
                .iter()
                .map(|choice| translate_choice(choice, language_ids))
                .collect(),
            other_option_placeholder: promote_opt(other_option_placeholder, language_ids),
            shuffle_option: *shuffle_option,
        },
        QuestionVariant::MultipleChoiceMulti {
            choices,
            other_option_placeholder,
            shuffle_option,
        } => QuestionVariant::MultipleChoiceMulti {
            choices: choices
                .iter()
                .map(|choice| translate_choice(choice, language_ids))
                .collect(),
            other_option_placeholder: promote_opt(other_option_placeholder, language_ids),
            shuffle_option: *shuffle_option,
        },
        QuestionVariant::Cta {
            html,
            dismiss_button_label,
            button_url,
            button_external,
        } => QuestionVariant::Cta {
            html: promote_opt(html, language_ids),
            dismiss_button_label: promote_opt(dismiss_button_label, language_ids),
            button_url: button_url.clone(),
            button_external: *button_external,
        },
        QuestionVariant::Consent { html, label } => QuestionVariant::Consent {
            html: promote_opt(html, language_ids),
            label: promote(label, language_ids),
        },
        QuestionVariant::Nps {
            lower_label,
            upper_label,
        } => QuestionVariant::Nps {
            lower_label: promote_opt(lower_label, language_ids),
            upper_label: promote_opt(upper_label, language_ids),
        },
        QuestionVariant::Rating {
            scale,
            range,
            lower_label,
            upper_label,
        } => QuestionVariant::Rating {
            scale: *scale,
            range: *range,
            lower_label: promote_opt(lower_label, language_ids),
            upper_label: promote_opt(upper_label, language_ids),
        },
        // No translatable fields beyond the common ones.
        QuestionVariant::FileUpload { .. }
        | QuestionVariant::PictureSelection { .. }
        | QuestionVariant::Cal { .. } => question.variant.clone(),
    };

    let translated = Question {
        id: question.id.clone(),
        headline: promote(&question.headline, language_ids),
        subheader: promote_opt(&question.subheader, language_ids),
        button_label: promote_opt(&question.button_label, language_ids),
        back_button_label: promote_opt(&question.back_button_label, language_ids),
        required: question.required,
        variant,
        rest: question.rest.clone(),
    };

    surveys::validate_question(&translated)?;
    Ok(translated)
}

/// Translate an entire survey projection.
///
/// Questions are translated in order, then both cards; every other survey
/// attribute passes through by identity. The assembled result is validated
/// as a whole; on failure no partial survey is returned. Calling this
/// twice with identical inputs yields structurally identical outputs.
pub fn translate_survey(
    survey: &Survey,
    languages: &[Language],
) -> Result<Survey, SchemaViolation> {
    let language_ids = extract_language_ids(languages);
    debug!(
        questions = survey.questions.len(),
        languages = language_ids.len(),
        "translating survey"
    );

    let questions = survey
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            translate_question(question, &language_ids)
                .map_err(|violation| violation.prefixed(&format!("questions[{}]", index)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let welcome_card = translate_welcome_card(&survey.welcome_card, &language_ids)
        .map_err(|violation| violation.prefixed("welcomeCard"))?;
    let thank_you_card = translate_thank_you_card(&survey.thank_you_card, &language_ids)
        .map_err(|violation| violation.prefixed("thankYouCard"))?;

    let translated = Survey {
        questions,
        welcome_card,
        thank_you_card,
        rest: survey.rest.clone(),
    };

    surveys::validate_survey(&translated)?;
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surveys::{RatingScale, ShuffleOption};

    fn ids(values: &[&str]) -> Vec<LanguageId> {
        values.iter().map(|id| id.to_string()).collect()
    }

    fn localized(entries: &[(&str, &str)]) -> TextValue {
        TextValue::Localized(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn question(variant: QuestionVariant) -> Question {
        Question {
            id: "q1".to_string(),
            headline: TextValue::from("Headline"),
            subheader: Some(TextValue::from("Subheader")),
            button_label: Some(TextValue::from("Next")),
            back_button_label: Some(TextValue::from("Back")),
            required: true,
            variant,
            rest: serde_json::Map::new(),
        }
    }

    // ==================== Choice Tests ====================

    #[test]
    fn test_plain_choice_label_is_promoted() {
        let choice = Choice {
            id: "c1".to_string(),
            label: TextValue::from("Option A"),
        };

        let translated = translate_choice(&choice, &ids(&["en"]));
        assert_eq!(translated.id, "c1");
        assert_eq!(
            translated.label,
            localized(&[("default", "Option A"), ("en", "")])
        );
    }

    #[test]
    fn test_localized_choice_label_keeps_stale_keys() {
        // Labels already in map form are not reconciled here: a key for a
        // language no longer configured survives translation. The editor
        // flow reconciles them when the language set changes.
        let choice = Choice {
            id: "c1".to_string(),
            label: localized(&[("default", "A"), ("fr", "Ah")]),
        };

        let translated = translate_choice(&choice, &ids(&["en"]));
        assert_eq!(translated.label, localized(&[("default", "A"), ("fr", "Ah")]));
    }

    // ==================== Card Tests ====================

    #[test]
    fn test_welcome_card_fields_are_promoted() {
        let card = WelcomeCard {
            enabled: true,
            headline: Some(TextValue::from("Welcome")),
            html: Some(TextValue::from("<p>Hi</p>")),
            button_label: Some(TextValue::from("Start")),
            file_url: Some("https://example.com/logo.png".to_string()),
            time_to_finish: Some(true),
            show_response_count: None,
            rest: serde_json::Map::new(),
        };

        let translated = translate_welcome_card(&card, &ids(&["de"])).expect("valid card");
        assert_eq!(
            translated.headline,
            Some(localized(&[("default", "Welcome"), ("de", "")]))
        );
        assert_eq!(
            translated.html,
            Some(localized(&[("default", "<p>Hi</p>"), ("de", "")]))
        );
        assert_eq!(
            translated.button_label,
            Some(localized(&[("default", "Start"), ("de", "")]))
        );
        // Non-text fields pass through untouched.
        assert_eq!(translated.file_url.as_deref(), Some("https://example.com/logo.png"));
        assert_eq!(translated.time_to_finish, Some(true));
    }

    #[test]
    fn test_thank_you_card_already_localized_fields_are_left_as_is() {
        let card = ThankYouCard {
            enabled: true,
            headline: Some(localized(&[("default", "Thanks"), ("fr", "Merci")])),
            subheader: Some(TextValue::from("See you")),
            button_label: None,
            button_link: None,
            rest: serde_json::Map::new(),
        };

        let translated = translate_thank_you_card(&card, &ids(&["en"])).expect("valid card");
        // Already localized: untouched, including the stale "fr" key.
        assert_eq!(
            translated.headline,
            Some(localized(&[("default", "Thanks"), ("fr", "Merci")]))
        );
        // Plain: promoted.
        assert_eq!(
            translated.subheader,
            Some(localized(&[("default", "See you"), ("en", "")]))
        );
    }

    #[test]
    fn test_card_with_headline_missing_default_is_rejected() {
        let card = ThankYouCard {
            enabled: true,
            headline: Some(localized(&[("en", "Thanks")])),
            subheader: None,
            button_label: None,
            button_link: None,
            rest: serde_json::Map::new(),
        };

        let violation = translate_thank_you_card(&card, &ids(&["en"])).expect_err("no default");
        assert_eq!(violation.path, "headline");
    }

    // ==================== Question Tests ====================

    #[test]
    fn test_question_pass_through_attributes_survive_translation() {
        let mut input = question(QuestionVariant::OpenText {
            placeholder: None,
            long_answer: None,
            input_type: None,
        });
        input.rest.insert(
            "logic".to_string(),
            serde_json::json!([{"condition": "skipped", "destination": "end"}]),
        );
        input.rest.insert(
            "imageUrl".to_string(),
            serde_json::json!("https://example.com/banner.png"),
        );

        let translated = translate_question(&input, &ids(&["en"])).expect("valid question");
        assert_eq!(translated.rest, input.rest);
    }

    #[test]
    fn test_common_fields_are_promoted_for_every_variant() {
        let translated = translate_question(
            &question(QuestionVariant::FileUpload {
                allow_multiple_files: true,
                max_size_in_mb: Some(5),
                allowed_file_extensions: None,
            }),
            &ids(&["en"]),
        )
        .expect("valid question");

        assert_eq!(
            translated.headline,
            localized(&[("default", "Headline"), ("en", "")])
        );
        assert_eq!(
            translated.back_button_label,
            Some(localized(&[("default", "Back"), ("en", "")]))
        );
        match translated.variant {
            QuestionVariant::FileUpload {
                allow_multiple_files,
                max_size_in_mb,
                ..
            } => {
                assert!(allow_multiple_files);
                assert_eq!(max_size_in_mb, Some(5));
            }
            other => panic!("variant changed: {:?}", other),
        }
    }

    #[test]
    fn test_open_text_placeholder_is_promoted() {
        let translated = translate_question(
            &question(QuestionVariant::OpenText {
                placeholder: Some(TextValue::from("Type here")),
                long_answer: Some(true),
                input_type: Some("text".to_string()),
            }),
            &ids(&["en", "fr"]),
        )
        .expect("valid question");

        match translated.variant {
            QuestionVariant::OpenText {
                placeholder,
                long_answer,
                input_type,
            } => {
                assert_eq!(
                    placeholder,
                    Some(localized(&[("default", "Type here"), ("en", ""), ("fr", "")]))
                );
                assert_eq!(long_answer, Some(true));
                assert_eq!(input_type.as_deref(), Some("text"));
            }
            other => panic!("variant changed: {:?}", other),
        }
    }

    #[test]
    fn test_multiple_choice_choices_keep_order() {
        let translated = translate_question(
            &question(QuestionVariant::MultipleChoiceMulti {
                choices: vec![
                    Choice {
                        id: "c1".to_string(),
                        label: TextValue::from("First"),
                    },
                    Choice {
                        id: "c2".to_string(),
                        label: TextValue::from("Second"),
                    },
                    Choice {
                        id: "other".to_string(),
                        label: TextValue::from("Other"),
                    },
                ],
                other_option_placeholder: Some(TextValue::from("Please specify")),
                shuffle_option: Some(ShuffleOption::ExceptLast),
            }),
            &ids(&["de"]),
        )
        .expect("valid question");

        match translated.variant {
            QuestionVariant::MultipleChoiceMulti {
                choices,
                other_option_placeholder,
                shuffle_option,
            } => {
                let choice_ids: Vec<&str> =
                    choices.iter().map(|choice| choice.id.as_str()).collect();
                assert_eq!(choice_ids, vec!["c1", "c2", "other"]);
                assert_eq!(
                    choices[0].label,
                    localized(&[("default", "First"), ("de", "")])
                );
                assert_eq!(
                    other_option_placeholder,
                    Some(localized(&[("default", "Please specify"), ("de", "")]))
                );
                assert_eq!(shuffle_option, Some(ShuffleOption::ExceptLast));
            }
            other => panic!("variant changed: {:?}", other),
        }
    }

    #[test]
    fn test_consent_label_and_html_are_promoted() {
        let translated = translate_question(
            &question(QuestionVariant::Consent {
                html: Some(TextValue::from("<p>Terms</p>")),
                label: TextValue::from("I agree"),
            }),
            &ids(&["en"]),
        )
        .expect("valid question");

        match translated.variant {
            QuestionVariant::Consent { html, label } => {
                assert_eq!(
                    html,
                    Some(localized(&[("default", "<p>Terms</p>"), ("en", "")]))
                );
                assert_eq!(label, localized(&[("default", "I agree"), ("en", "")]));
            }
            other => panic!("variant changed: {:?}", other),
        }
    }

    #[test]
    fn test_variant_fields_stay_isolated() {
        // An nps question has no placeholder; an openText question has no
        // scale labels. The variant payloads cannot cross-contaminate.
        let nps = translate_question(
            &question(QuestionVariant::Nps {
                lower_label: Some(TextValue::from("Not likely")),
                upper_label: Some(TextValue::from("Very likely")),
            }),
            &ids(&["en"]),
        )
        .expect("valid question");
        assert_eq!(nps.variant.type_tag(), "nps");

        let open_text = translate_question(
            &question(QuestionVariant::OpenText {
                placeholder: None,
                long_answer: None,
                input_type: None,
            }),
            &ids(&["en"]),
        )
        .expect("valid question");
        assert_eq!(open_text.variant.type_tag(), "openText");
        match open_text.variant {
            QuestionVariant::OpenText { placeholder, .. } => assert_eq!(placeholder, None),
            other => panic!("variant changed: {:?}", other),
        }
    }

    #[test]
    fn test_rating_labels_promoted_and_scale_kept() {
        let translated = translate_question(
            &question(QuestionVariant::Rating {
                scale: Some(RatingScale::Smiley),
                range: Some(5),
                lower_label: Some(TextValue::from("Bad")),
                upper_label: Some(localized(&[("default", "Good"), ("es", "Bueno")])),
            }),
            &ids(&["en"]),
        )
        .expect("valid question");

        match translated.variant {
            QuestionVariant::Rating {
                scale,
                range,
                lower_label,
                upper_label,
            } => {
                assert_eq!(scale, Some(RatingScale::Smiley));
                assert_eq!(range, Some(5));
                assert_eq!(
                    lower_label,
                    Some(localized(&[("default", "Bad"), ("en", "")]))
                );
                // Already localized: left as is, stale "es" key included.
                assert_eq!(
                    upper_label,
                    Some(localized(&[("default", "Good"), ("es", "Bueno")]))
                );
            }
            other => panic!("variant changed: {:?}", other),
        }
    }

    // ==================== Language Id Extraction Tests ====================

    #[test]
    fn test_extract_language_ids_preserves_order() {
        let languages = vec![
            Language::new("en"),
            Language::new("fr"),
            Language::new("de"),
        ];
        assert_eq!(extract_language_ids(&languages), ids(&["en", "fr", "de"]));
    }

    #[test]
    fn test_extract_language_ids_keeps_duplicates() {
        let languages = vec![Language::new("en"), Language::new("en")];
        assert_eq!(extract_language_ids(&languages), ids(&["en", "en"]));
    }
}
