use serde::{Deserialize, Serialize};

use crate::i18n::{Locale, Translations};

/// A coding exercise.
///
/// `title` and `description` are literal text, used as-is for
/// teacher-authored problems. The built-in catalog additionally carries
/// locale keys; display code resolves a key through the translation
/// tables whenever one is present, so localized problems follow the
/// interface language while teacher-authored ones stay verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Code preloaded into the editor when no prior submission exists.
    pub initial_code: String,
}

impl Problem {
    /// Title for display: the locale key wins over the literal.
    pub fn display_title(&self, translations: &Translations, locale: Locale) -> String {
        match &self.title_key {
            Some(key) => translations.translate(locale, key),
            None => self.title.clone(),
        }
    }

    /// Description for display: the locale key wins over the literal.
    pub fn display_description(&self, translations: &Translations, locale: Locale) -> String {
        match &self.description_key {
            Some(key) => translations.translate(locale, key),
            None => self.description.clone(),
        }
    }

    /// Hint for display, if the problem has one in either form.
    pub fn display_hint(&self, translations: &Translations, locale: Locale) -> Option<String> {
        match (&self.hint_key, &self.hint) {
            (Some(key), _) => Some(translations.translate(locale, key)),
            (None, Some(text)) => Some(text.clone()),
            (None, None) => None,
        }
    }
}
