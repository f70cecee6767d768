//! Device-reportable language identifiers.

use serde::{
    Deserialize,
    Serialize,
};

/// A language the host environment can report as the user's preference.
///
/// This is a closed set mirroring the platform's system-language signal. Only
/// a subset of it has string tables at runtime; membership is decided by the
/// [`TableCollection`](crate::table::TableCollection), not by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Korean (한국어)
    #[serde(rename = "ko-KR")]
    Korean,
    /// English
    #[serde(rename = "en-US")]
    English,
    /// Japanese (日本語)
    #[serde(rename = "ja-JP")]
    Japanese,
    /// French (Français)
    #[serde(rename = "fr-FR")]
    French,
    /// German (Deutsch)
    #[serde(rename = "de-DE")]
    German,
    /// Spanish (Español)
    #[serde(rename = "es-ES")]
    Spanish,
    /// Simplified Chinese (简体中文)
    #[serde(rename = "zh-CN")]
    ChineseSimplified,
    /// Traditional Chinese (繁體中文)
    #[serde(rename = "zh-TW")]
    ChineseTraditional,
    /// Portuguese (Português)
    #[serde(rename = "pt-BR")]
    Portuguese,
    /// Russian (Русский)
    #[serde(rename = "ru-RU")]
    Russian,
}

/// All device-reportable languages, in declaration order.
const ALL_LANGUAGES: [Language; 10] = [
    Language::Korean,
    Language::English,
    Language::Japanese,
    Language::French,
    Language::German,
    Language::Spanish,
    Language::ChineseSimplified,
    Language::ChineseTraditional,
    Language::Portuguese,
    Language::Russian,
];

impl Language {
    /// RFC 5646 language code for this language.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Korean => "ko-KR",
            Self::English => "en-US",
            Self::Japanese => "ja-JP",
            Self::French => "fr-FR",
            Self::German => "de-DE",
            Self::Spanish => "es-ES",
            Self::ChineseSimplified => "zh-CN",
            Self::ChineseTraditional => "zh-TW",
            Self::Portuguese => "pt-BR",
            Self::Russian => "ru-RU",
        }
    }

    /// Bare primary-language subtag (`"ko"`, `"en"`, ...).
    ///
    /// Chinese is the exception: the script distinction only exists in the
    /// region-qualified form, so both variants keep their full code here.
    #[must_use]
    pub const fn primary_subtag(self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
            Self::Japanese => "ja",
            Self::French => "fr",
            Self::German => "de",
            Self::Spanish => "es",
            Self::ChineseSimplified => "zh_cn",
            Self::ChineseTraditional => "zh_tw",
            Self::Portuguese => "pt",
            Self::Russian => "ru",
        }
    }

    /// Native display name, suitable for an in-game language picker.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Korean => "한국어",
            Self::English => "English",
            Self::Japanese => "日本語",
            Self::French => "Français",
            Self::German => "Deutsch",
            Self::Spanish => "Español",
            Self::ChineseSimplified => "简体中文",
            Self::ChineseTraditional => "繁體中文",
            Self::Portuguese => "Português",
            Self::Russian => "Русский",
        }
    }

    /// Parses a language from an RFC 5646-ish code.
    ///
    /// Accepts both bare (`"ko"`) and region-qualified (`"ko-KR"`, `"ko_KR"`)
    /// forms, case-insensitively. Returns `None` for codes outside the
    /// device-reportable set.
    ///
    /// # Examples
    /// - `"ko"` → `Some(Korean)`
    /// - `"en_US"` → `Some(English)`
    /// - `"zh-TW"` → `Some(ChineseTraditional)`
    /// - `"eo"` → `None`
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = normalize_language_code(code);
        ALL_LANGUAGES.iter().copied().find(|lang| {
            normalize_language_code(lang.code()) == normalized
                || lang.primary_subtag() == normalized
        })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Normalize a language code (lowercase and replace `-` with `_`).
fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bare("ko", Some(Language::Korean))]
    #[case::region_dash("ko-KR", Some(Language::Korean))]
    #[case::region_underscore("ja_JP", Some(Language::Japanese))]
    #[case::uppercase("EN", Some(Language::English))]
    #[case::mixed_case("Fr-fr", Some(Language::French))]
    #[case::chinese_simplified("zh-CN", Some(Language::ChineseSimplified))]
    #[case::chinese_traditional("zh_tw", Some(Language::ChineseTraditional))]
    #[case::unknown("eo", None)]
    #[case::empty("", None)]
    fn test_from_code(#[case] code: &str, #[case] expected: Option<Language>) {
        assert_that!(Language::from_code(code), eq(expected));
    }

    #[rstest]
    fn test_from_code_roundtrips_canonical_codes() {
        for lang in ALL_LANGUAGES {
            assert_that!(Language::from_code(lang.code()), eq(Some(lang)));
        }
    }

    #[rstest]
    fn test_serde_uses_language_code() {
        let json = serde_json::to_string(&Language::Korean).unwrap();
        assert_that!(json, eq("\"ko-KR\""));

        let parsed: Language = serde_json::from_str("\"ja-JP\"").unwrap();
        assert_that!(parsed, eq(Language::Japanese));
    }

    #[rstest]
    fn test_display_is_native_name() {
        assert_that!(Language::Korean.to_string(), eq("한국어"));
        assert_that!(Language::English.to_string(), eq("English"));
    }
}
