use serde::{Deserialize, Serialize};

/// Languages the remote content hierarchy is translated into, addressed by
/// their culture code (the optional leading path segment, e.g. `ja/Skinning`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    #[default]
    En,
    De,
    Es,
    Fr,
    It,
    Ja,
    Ko,
    Nl,
    Pl,
    PtBr,
    Ru,
    ZhCn,
    ZhTw,
}

impl Language {
    /// Parses a culture code such as `en`, `ja` or `pt-BR`. Case-insensitive.
    pub fn from_culture_code(code: &str) -> Option<Self> {
        let lowered = code.to_ascii_lowercase();
        let language = match lowered.as_str() {
            "en" => Self::En,
            "de" => Self::De,
            "es" => Self::Es,
            "fr" => Self::Fr,
            "it" => Self::It,
            "ja" => Self::Ja,
            "ko" => Self::Ko,
            "nl" => Self::Nl,
            "pl" => Self::Pl,
            "pt-br" => Self::PtBr,
            "ru" => Self::Ru,
            "zh-cn" => Self::ZhCn,
            "zh-tw" => Self::ZhTw,
            _ => return None,
        };
        Some(language)
    }

    pub fn culture_code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Nl => "nl",
            Self::Pl => "pl",
            Self::PtBr => "pt-br",
            Self::Ru => "ru",
            Self::ZhCn => "zh-cn",
            Self::ZhTw => "zh-tw",
        }
    }
}

/// Rendering category of a fetched document, deciding which widget
/// constructor the overlay hands to the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Index,
    Article,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn culture_codes_parse_case_insensitively() {
        assert_eq!(Language::from_culture_code("ja"), Some(Language::Ja));
        assert_eq!(Language::from_culture_code("JA"), Some(Language::Ja));
        assert_eq!(Language::from_culture_code("pt-BR"), Some(Language::PtBr));
        assert_eq!(Language::from_culture_code("klingon"), None);
    }

    #[test]
    fn culture_code_round_trips() {
        for code in ["en", "de", "es", "fr", "it", "ja", "ko", "nl", "pl", "pt-br", "ru", "zh-cn", "zh-tw"] {
            let language = Language::from_culture_code(code).expect("known code");
            assert_eq!(language.culture_code(), code);
        }
    }
}
