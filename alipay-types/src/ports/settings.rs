//! Settings store port.
//!
//! The host billing application stores gateway configuration as string
//! values keyed by (extension name, field name). Adapters decide where
//! those values actually live.

use std::collections::HashMap;

/// Port trait for gateway settings lookup.
pub trait SettingsStore: Send + Sync + 'static {
    /// Returns the stored value for a field, if any.
    fn get(&self, extension: &str, field: &str) -> Option<String>;

    /// Interprets a field as a boolean flag. Absent fields read as `false`.
    fn get_bool(&self, extension: &str, field: &str) -> bool {
        matches!(
            self.get(extension, field).as_deref(),
            Some("1") | Some("true") | Some("on") | Some("yes")
        )
    }
}

/// Settings backed by environment variables.
///
/// `("AliPay", "app_id")` resolves to `ALIPAY_APP_ID`. Values are read on
/// every lookup, so a restarted deployment picks up setting changes without
/// any cache to invalidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsStore for EnvSettings {
    fn get(&self, extension: &str, field: &str) -> Option<String> {
        let var = format!(
            "{}_{}",
            extension.to_uppercase(),
            field.to_uppercase()
        );
        std::env::var(var).ok().filter(|v| !v.is_empty())
    }
}

/// In-memory settings, for tests and one-shot tooling.
#[derive(Debug, Clone, Default)]
pub struct MapSettings {
    values: HashMap<(String, String), String>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, builder-style.
    pub fn with(mut self, extension: &str, field: &str, value: impl Into<String>) -> Self {
        self.values
            .insert((extension.to_string(), field.to_string()), value.into());
        self
    }

    pub fn set(&mut self, extension: &str, field: &str, value: impl Into<String>) {
        self.values
            .insert((extension.to_string(), field.to_string()), value.into());
    }
}

impl SettingsStore for MapSettings {
    fn get(&self, extension: &str, field: &str) -> Option<String> {
        self.values
            .get(&(extension.to_string(), field.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_settings_lookup() {
        let settings = MapSettings::new().with("AliPay", "app_id", "2021000000000001");
        assert_eq!(
            settings.get("AliPay", "app_id").as_deref(),
            Some("2021000000000001")
        );
        assert_eq!(settings.get("AliPay", "private_key"), None);
    }

    #[test]
    fn test_bool_interpretation() {
        let settings = MapSettings::new()
            .with("AliPay", "live", "1")
            .with("AliPay", "is_key_mode", "off");
        assert!(settings.get_bool("AliPay", "live"));
        assert!(!settings.get_bool("AliPay", "is_key_mode"));
        assert!(!settings.get_bool("AliPay", "missing"));
    }
}
