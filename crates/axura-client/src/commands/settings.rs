use axura_store::KeyValueStore;

use crate::error::Result;
use crate::settings::AppSettings;

pub fn show_settings<S: KeyValueStore>(store: &S) -> Result<String> {
    Ok(render_settings(&AppSettings::load(store)?))
}

pub fn set_setting<S: KeyValueStore>(store: &S, key: &str, value: &str) -> Result<String> {
    let mut settings = AppSettings::load(store)?;
    settings.set_field(key, value)?;
    settings.save(store)?;
    Ok(render_settings(&settings))
}

fn render_settings(settings: &AppSettings) -> String {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    [
        format!("emailNotifications  {}", on_off(settings.email_notifications)),
        format!("pushNotifications   {}", on_off(settings.push_notifications)),
        format!("twoFactorAuth       {}", on_off(settings.two_factor_auth)),
        format!("darkMode            {}", on_off(settings.dark_mode)),
        format!("language            {}", settings.language),
        format!("timezone            {}", settings.timezone),
        format!("profile.name        {}", settings.profile.name),
        format!("profile.email       {}", settings.profile.email),
        format!("profile.company     {}", settings.profile.company),
    ]
    .join("\n")
}
