//! Player preferences
//!
//! Persisted in LocalStorage on the web; native builds always use defaults.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Fading ball trail
    pub trails: bool,
    /// Draw the zigzag path itself
    pub show_path: bool,
    /// Soft glow ring around the ball
    pub ball_glow: bool,

    // === Accessibility ===
    /// Reduced motion (no trail, no glow)
    pub reduced_motion: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trails: true,
            show_path: true,
            ball_glow: true,

            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Effective trail (respects reduced_motion)
    pub fn effective_trails(&self) -> bool {
        self.trails && !self.reduced_motion
    }

    /// Effective glow (respects reduced_motion)
    pub fn effective_ball_glow(&self) -> bool {
        self.ball_glow && !self.reduced_motion
    }

    /// Flip the preference bound to a keyboard shortcut
    ///
    /// T trails, P path, G glow, M reduced motion, C high contrast.
    /// Returns `false` for unbound keys.
    pub fn toggle_for_key(&mut self, key: &str) -> bool {
        let flag = match key {
            "t" | "T" => &mut self.trails,
            "p" | "P" => &mut self.show_path,
            "g" | "G" => &mut self.ball_glow,
            "m" | "M" => &mut self.reduced_motion,
            "c" | "C" => &mut self.high_contrast,
            _ => return false,
        };
        *flag = !*flag;
        true
    }

    /// Parse from JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "zigzag_duel_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_overrides_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(settings.trails);
        assert!(!settings.effective_trails());
        assert!(!settings.effective_ball_glow());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            high_contrast: true,
            show_path: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = Settings::from_json(r#"{"trails": false}"#);
        assert!(!settings.trails);
        assert!(settings.show_path);
        assert!(settings.ball_glow);
    }

    #[test]
    fn test_shortcut_toggles_one_preference() {
        let mut settings = Settings::default();
        assert!(settings.toggle_for_key("c"));
        assert!(settings.high_contrast);
        assert!(settings.toggle_for_key("T"));
        assert!(!settings.trails);
        assert!(settings.show_path);

        assert!(settings.toggle_for_key("c"));
        assert!(!settings.high_contrast);
    }

    #[test]
    fn test_unbound_key_changes_nothing() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_for_key("x"));
        assert!(!settings.toggle_for_key("Enter"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_toggled_settings_survive_storage_format() {
        let mut settings = Settings::default();
        settings.toggle_for_key("m");
        let json = serde_json::to_string(&settings).unwrap();
        let loaded = Settings::from_json(&json);
        assert!(loaded.reduced_motion);
        assert!(!loaded.effective_trails());
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}
