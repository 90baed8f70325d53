use std::{collections::HashMap, fs};

use serde::Deserialize;
use shared::domain::Language;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub website_root_url: String,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://osu.ppy.sh/api/v2".into(),
            website_root_url: "https://osu.ppy.sh".into(),
            language: "en".into(),
        }
    }
}

impl Settings {
    pub fn language(&self) -> Language {
        Language::from_culture_code(&self.language).unwrap_or_default()
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("wiki.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_url") {
            settings.api_url = v.clone();
        }
        if let Some(v) = file_cfg.get("website_root_url") {
            settings.website_root_url = v.clone();
        }
        if let Some(v) = file_cfg.get("language") {
            settings.language = v.clone();
        }
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("WIKI__API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("WIKI__WEBSITE_ROOT_URL") {
        settings.website_root_url = v;
    }
    if let Some(v) = var("WIKI__LANGUAGE") {
        settings.language = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_wiki() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "https://osu.ppy.sh/api/v2");
        assert_eq!(settings.language(), Language::En);
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let settings = Settings {
            language: "tlh".into(),
            ..Settings::default()
        };
        assert_eq!(settings.language(), Language::En);
    }

    #[test]
    fn env_overrides_file_which_overrides_defaults() {
        let mut settings = Settings::default();

        apply_file(
            &mut settings,
            "api_url = \"http://file.example:9000\"\nlanguage = \"ja\"\n",
        );
        assert_eq!(settings.api_url, "http://file.example:9000");
        assert_eq!(settings.language, "ja");
        // Keys the file does not set keep their defaults.
        assert_eq!(settings.website_root_url, "https://osu.ppy.sh");

        let env: HashMap<&str, &str> = [("WIKI__API_URL", "http://env.example:9100")].into();
        apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.api_url, "http://env.example:9100");
        // Keys without an env override keep the file value.
        assert_eq!(settings.language, "ja");
    }

    #[test]
    fn malformed_file_is_ignored() {
        let mut settings = Settings::default();
        apply_file(&mut settings, "api_url = [not toml");
        assert_eq!(settings.api_url, Settings::default().api_url);
    }
}
