//! Runtime configuration: settings keys, storage locators, and user-facing strings.

use dash_host::EntityId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FAVORITES_KEY: &str = "favorite-apps";
pub const DEFAULT_FOLDER_SETTINGS_PATH: &str = "/org/gnome/desktop/app-folders/";

const NAME_PLACEHOLDER: &str = "{name}";

#[derive(Debug, Error)]
/// Errors raised while loading [`DashConfig`].
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid dash config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A template is missing the `{name}` placeholder.
    #[error("message template `{field}` must contain `{{name}}`")]
    Template {
        /// Offending field name.
        field: &'static str,
    },
    /// The folder settings path must be an absolute, slash-terminated locator.
    #[error("folder settings path `{0}` must start and end with `/`")]
    FolderPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// String-list settings key holding the ordered favorites.
    pub favorites_key: String,
    /// Locator prefix under which each folder definition lives at `folders/<id>/`.
    pub folder_settings_path: String,
    pub pinned_message: String,
    pub unpinned_message: String,
    pub pin_label: String,
    pub unpin_label: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            folder_settings_path: DEFAULT_FOLDER_SETTINGS_PATH.to_string(),
            pinned_message: "{name} has been pinned to the dash.".to_string(),
            unpinned_message: "{name} has been unpinned from the dash.".to_string(),
            pin_label: "Pin to Dash".to_string(),
            unpin_label: "Unpin".to_string(),
        }
    }
}

impl DashConfig {
    /// Parses and validates a TOML document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed TOML, templates without `{name}`, or a folder path
    /// that is not slash-delimited.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.pinned_message.contains(NAME_PLACEHOLDER) {
            return Err(ConfigError::Template {
                field: "pinned_message",
            });
        }
        if !self.unpinned_message.contains(NAME_PLACEHOLDER) {
            return Err(ConfigError::Template {
                field: "unpinned_message",
            });
        }
        let path = &self.folder_settings_path;
        if !path.starts_with('/') || !path.ends_with('/') {
            return Err(ConfigError::FolderPath(path.clone()));
        }
        Ok(())
    }

    /// Storage locator of a folder definition.
    pub fn path_for(&self, id: &EntityId) -> String {
        format!("{}folders/{}/", self.folder_settings_path, id)
    }

    pub fn pinned_text(&self, name: &str) -> String {
        self.pinned_message.replace(NAME_PLACEHOLDER, name)
    }

    pub fn unpinned_text(&self, name: &str) -> String {
        self.unpinned_message.replace(NAME_PLACEHOLDER, name)
    }
}
