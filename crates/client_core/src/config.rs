use std::{fs, time::Duration};

use serde::Deserialize;

use crate::{
    provider::DEFAULT_FALLBACK_DELAY,
    render::{HighlightList, DEFAULT_REQUEST_SYSTEM_URL},
};

const SETTINGS_FILE: &str = "access_hub.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Base URL of the recommendation endpoint. Absent means the live
    /// call is not attempted and every submission takes the fallback
    /// path.
    pub server_url: Option<String>,
    pub fallback_delay_ms: u64,
    pub request_system_url: String,
    pub highlighted_groups: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: None,
            fallback_delay_ms: DEFAULT_FALLBACK_DELAY.as_millis() as u64,
            request_system_url: DEFAULT_REQUEST_SYSTEM_URL.into(),
            highlighted_groups: vec!["DB Access".into(), "Databrick Access".into()],
        }
    }
}

impl Settings {
    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    pub fn highlight_list(&self) -> HighlightList {
        HighlightList::new(self.highlighted_groups.iter().cloned())
    }
}

/// Per-field optional overlay read from `access_hub.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    fallback_delay_ms: Option<u64>,
    request_system_url: Option<String>,
    highlighted_groups: Option<Vec<String>>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overlay(&mut settings, &raw);
    }

    apply_env_overrides(&mut settings);
    settings
}

fn apply_file_overlay(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<FileSettings>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.server_url {
        settings.server_url = Some(v);
    }
    if let Some(v) = file_cfg.fallback_delay_ms {
        settings.fallback_delay_ms = v;
    }
    if let Some(v) = file_cfg.request_system_url {
        settings.request_system_url = v;
    }
    if let Some(v) = file_cfg.highlighted_groups {
        settings.highlighted_groups = v;
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("ACCESS_HUB__SERVER_URL") {
        settings.server_url = Some(v);
    }
    if let Ok(v) = std::env::var("ACCESS_HUB__FALLBACK_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.fallback_delay_ms = parsed;
        }
    }
    if let Ok(v) = std::env::var("ACCESS_HUB__REQUEST_SYSTEM_URL") {
        settings.request_system_url = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_behavior() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, None);
        assert_eq!(settings.fallback_delay(), Duration::from_millis(1500));
        assert_eq!(settings.request_system_url, "/request-system");
        assert!(settings.highlight_list().contains("DB Access"));
        assert!(settings.highlight_list().contains("Databrick Access"));
    }

    #[test]
    fn file_overlay_replaces_only_present_fields() {
        let mut settings = Settings::default();
        apply_file_overlay(
            &mut settings,
            r#"
            server_url = "http://localhost:3000"
            highlighted_groups = ["Terraform"]
            "#,
        );
        assert_eq!(settings.server_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(settings.highlighted_groups, vec!["Terraform".to_string()]);
        // Untouched fields keep their defaults.
        assert_eq!(settings.fallback_delay_ms, 1500);
        assert_eq!(settings.request_system_url, "/request-system");
    }

    #[test]
    fn malformed_file_overlay_is_ignored() {
        let mut settings = Settings::default();
        apply_file_overlay(&mut settings, "fallback_delay_ms = \"not a number\"");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn env_overrides_win_over_defaults() {
        std::env::set_var("ACCESS_HUB__SERVER_URL", "http://127.0.0.1:9000");
        std::env::set_var("ACCESS_HUB__FALLBACK_DELAY_MS", "250");

        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);

        assert_eq!(settings.server_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(settings.fallback_delay_ms, 250);

        std::env::remove_var("ACCESS_HUB__SERVER_URL");
        std::env::remove_var("ACCESS_HUB__FALLBACK_DELAY_MS");
    }
}
