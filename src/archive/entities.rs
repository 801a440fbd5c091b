use std::sync::Arc;

use serde::Deserialize;

use crate::timeline::TimezoneSetting;

/// The account record found at `account/user.json`. Only the fields needed for the plot are
/// decoded, everything else in the export is ignored.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProfileEntity {
    #[serde(default)]
    global_name: Option<Arc<str>>,
    #[serde(default)]
    username: Option<Arc<str>>,
    settings: SettingsEnvelope,
}

// Discord nests the actual settings one level deeper than you would expect.
#[derive(Debug, Deserialize, Clone, PartialEq)]
struct SettingsEnvelope {
    settings: UserSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
struct UserSettings {
    localization: Localization,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Localization {
    timezone_offset: i32,
}

/// Profile data after the display name has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub display_name: Arc<str>,
    pub timezone: TimezoneSetting,
}

impl ProfileEntity {
    /// Legacy accounts don't have a global name, so the username is used for them. [None] if
    /// neither is present.
    pub fn into_profile(self) -> Option<Profile> {
        let display_name = self.global_name.or(self.username)?;
        Some(Profile {
            display_name,
            timezone: TimezoneSetting::new(self.settings.settings.localization.timezone_offset),
        })
    }
}

/// Single entry of a `messages.json` file.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MessageEntity {
    #[serde(rename = "Timestamp")]
    pub timestamp: Arc<str>,
}
