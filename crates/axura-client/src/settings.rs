use serde::{Deserialize, Serialize};
use tracing::info;

use axura_shared::constants::KEY_SETTINGS;
use axura_store::KeyValueStore;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub name: String,
    pub email: String,
    pub company: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            name: "Admin User".into(),
            email: "admin@example.com".into(),
            company: "Admin Panel".into(),
        }
    }
}

/// Console preferences, stored as one JSON document under `settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub two_factor_auth: bool,
    pub dark_mode: bool,
    pub language: String,
    pub timezone: String,
    pub profile: ProfileSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: false,
            two_factor_auth: false,
            dark_mode: true,
            language: "en".into(),
            timezone: "UTC".into(),
            profile: ProfileSettings::default(),
        }
    }
}

/// Keys accepted by [`AppSettings::set_field`].
pub const SETTING_KEYS: [&str; 9] = [
    "emailNotifications",
    "pushNotifications",
    "twoFactorAuth",
    "darkMode",
    "language",
    "timezone",
    "profile.name",
    "profile.email",
    "profile.company",
];

impl AppSettings {
    /// Stored settings, or the defaults when nothing was saved yet.
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self> {
        Ok(store.get_json::<Self>(KEY_SETTINGS)?.unwrap_or_default())
    }

    pub fn save<S: KeyValueStore>(&self, store: &S) -> Result<()> {
        store.set_json(KEY_SETTINGS, self)?;
        info!("Settings updated");
        Ok(())
    }

    /// Assign one setting from its textual form.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "emailNotifications" => self.email_notifications = parse_bool(key, value)?,
            "pushNotifications" => self.push_notifications = parse_bool(key, value)?,
            "twoFactorAuth" => self.two_factor_auth = parse_bool(key, value)?,
            "darkMode" => self.dark_mode = parse_bool(key, value)?,
            "language" => self.language = non_empty(key, value)?,
            "timezone" => self.timezone = non_empty(key, value)?,
            "profile.name" => self.profile.name = non_empty(key, value)?,
            "profile.email" => self.profile.email = non_empty(key, value)?,
            "profile.company" => self.profile.company = value.trim().to_string(),
            _ => {
                return Err(ClientError::InvalidInput(format!(
                    "unknown setting {key:?} (known: {})",
                    SETTING_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ClientError::InvalidInput(format!(
            "{key} expects true or false, got {value:?}"
        ))),
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClientError::InvalidInput(format!("{key} cannot be empty")));
    }
    Ok(value.to_string())
}
