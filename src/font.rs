//! Per-language font selection.
//!
//! The session only decides *which* font a language needs; loading and
//! caching the font resource is the host's job.

use crate::language::Language;

/// Handle naming a font resource the host knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(&'static str);

impl FontId {
    /// Resource name of the font.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for FontId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Font covering Hangul.
const FONT_KOREAN: FontId = FontId("NotoSansKR-Medium");
/// Font covering kana and the JIS kanji set.
const FONT_JAPANESE: FontId = FontId("NotoSansJP-Medium");
/// Latin/Cyrillic default for everything else.
const FONT_DEFAULT: FontId = FontId("Roboto-Medium");

/// The font appropriate for rendering `language`.
///
/// Fixed mapping, one font per supported language, with a default for any
/// unhandled case.
#[must_use]
pub const fn font_for_language(language: Language) -> FontId {
    match language {
        Language::Korean => FONT_KOREAN,
        Language::Japanese => FONT_JAPANESE,
        _ => FONT_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::korean(Language::Korean, "NotoSansKR-Medium")]
    #[case::japanese(Language::Japanese, "NotoSansJP-Medium")]
    #[case::english(Language::English, "Roboto-Medium")]
    #[case::unhandled_falls_back(Language::Russian, "Roboto-Medium")]
    fn test_font_for_language(#[case] language: Language, #[case] expected: &str) {
        assert_that!(font_for_language(language).name(), eq(expected));
    }
}
