//! Bilingual Text
//!
//! The site is served in Korean and English. Legacy documents store localized
//! fields either as a bare string or as a `{ko, en}` object with one or both
//! keys missing; `LocalizedText::normalize` is the single boundary that folds
//! every legacy shape into the canonical pair. Nothing past hydration ever
//! branches on shape again.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported locale keys. Korean is the site's primary language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ko, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
        }
    }
}

/// Text available in both supported locales.
///
/// Once constructed, both locales are always present; empty strings stand in
/// for missing translations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub ko: String,
    #[serde(default)]
    pub en: String,
}

impl LocalizedText {
    pub fn new(ko: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ko: ko.into(),
            en: en.into(),
        }
    }

    /// Same content for both locales, the way legacy single-string fields
    /// are interpreted.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ko: text.clone(),
            en: text,
        }
    }

    /// Fold a raw stored value into the canonical bilingual pair.
    ///
    /// - a bare string provides the same text for both locales;
    /// - an object provides each locale key where it is textual, with
    ///   `fallback` filling the rest;
    /// - anything else (absent, null, mistyped) yields `fallback` unchanged.
    ///
    /// Pure and idempotent: normalizing an already-normalized value returns
    /// an equal value.
    pub fn normalize(raw: Option<&Value>, fallback: &LocalizedText) -> LocalizedText {
        match raw {
            Some(Value::String(text)) => LocalizedText::same(text.clone()),
            Some(Value::Object(map)) => {
                let pick = |key: &str, fb: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| fb.to_string())
                };
                LocalizedText {
                    ko: pick(Locale::Ko.as_str(), &fallback.ko),
                    en: pick(Locale::En.as_str(), &fallback.en),
                }
            }
            _ => fallback.clone(),
        }
    }

    /// Text for one locale.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ko => &self.ko,
            Locale::En => &self.en,
        }
    }

    /// Copy with only the given locale's text replaced. The receiver is not
    /// mutated.
    pub fn set(&self, locale: Locale, value: impl Into<String>) -> LocalizedText {
        let mut next = self.clone();
        match locale {
            Locale::Ko => next.ko = value.into(),
            Locale::En => next.en = value.into(),
        }
        next
    }

    /// True when neither locale carries text.
    pub fn is_empty(&self) -> bool {
        self.ko.is_empty() && self.en.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_bare_string() {
        let text = LocalizedText::normalize(Some(&json!("상품")), &LocalizedText::default());
        assert_eq!(text.ko, "상품");
        assert_eq!(text.en, "상품");
    }

    #[test]
    fn test_normalize_partial_object_uses_fallback() {
        let fallback = LocalizedText::new("기본", "default");
        let text = LocalizedText::normalize(Some(&json!({"ko": "카테고리"})), &fallback);
        assert_eq!(text.ko, "카테고리");
        assert_eq!(text.en, "default");
    }

    #[test]
    fn test_normalize_full_object() {
        let text = LocalizedText::normalize(
            Some(&json!({"ko": "브랜드", "en": "Brand"})),
            &LocalizedText::default(),
        );
        assert_eq!(text, LocalizedText::new("브랜드", "Brand"));
    }

    #[test]
    fn test_normalize_absent_and_null_yield_fallback() {
        let fallback = LocalizedText::new("가", "a");
        assert_eq!(LocalizedText::normalize(None, &fallback), fallback);
        assert_eq!(
            LocalizedText::normalize(Some(&Value::Null), &fallback),
            fallback
        );
    }

    #[test]
    fn test_normalize_mistyped_values_yield_fallback() {
        let fallback = LocalizedText::new("가", "a");
        assert_eq!(LocalizedText::normalize(Some(&json!(3)), &fallback), fallback);
        assert_eq!(
            LocalizedText::normalize(Some(&json!(["x"])), &fallback),
            fallback
        );
        // Non-string locale values inside an object also fall back.
        let text = LocalizedText::normalize(Some(&json!({"ko": 1, "en": "ok"})), &fallback);
        assert_eq!(text.ko, "가");
        assert_eq!(text.en, "ok");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let fallback = LocalizedText::default();
        for raw in [json!("hello"), json!({"ko": "안녕"}), json!(null)] {
            let once = LocalizedText::normalize(Some(&raw), &fallback);
            let twice = LocalizedText::normalize(
                Some(&serde_json::to_value(&once).unwrap()),
                &fallback,
            );
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_get_both_locales() {
        let text = LocalizedText::new("한글", "english");
        assert_eq!(text.get(Locale::Ko), "한글");
        assert_eq!(text.get(Locale::En), "english");
    }

    #[test]
    fn test_set_leaves_other_locale_and_input_untouched() {
        let original = LocalizedText::new("이전", "before");
        let updated = original.set(Locale::En, "after");
        assert_eq!(updated.ko, "이전");
        assert_eq!(updated.en, "after");
        assert_eq!(original.en, "before");
    }

    #[test]
    fn test_is_empty() {
        assert!(LocalizedText::default().is_empty());
        assert!(!LocalizedText::same("x").is_empty());
        assert!(!LocalizedText::new("", "x").is_empty());
    }

    #[test]
    fn test_serializes_with_both_keys() {
        let value = serde_json::to_value(LocalizedText::new("가", "a")).unwrap();
        assert_eq!(value, json!({"ko": "가", "en": "a"}));
    }

    #[test]
    fn test_locale_keys_match_serde_names() {
        // `normalize` reads object keys via `as_str`, so the two spellings
        // of each locale must agree.
        for locale in Locale::ALL {
            assert_eq!(
                serde_json::to_value(locale).unwrap(),
                json!(locale.as_str())
            );
        }
    }
}
