//! Entity identifiers shared by applications and folders.

use serde::{Deserialize, Serialize};

/// Stable identifier for a dock-launchable entity (an application or an app folder).
///
/// Application ids are desktop-file ids (`org.gnome.Terminal.desktop`); folder ids are the child
/// names listed by the folder-definition store (`Utilities`). Both share one namespace in the
/// persisted favorites list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Returns an entity id when `raw` is non-empty and usable as a storage path segment.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_entity_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid entity id `{raw}`; expected a non-empty id without `/` or whitespace"
            ))
        }
    }

    /// Creates an id without validation.
    ///
    /// For constants and ids enumerated by a host store. Ids read back from user-editable
    /// settings go through [`EntityId::new`].
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_valid_entity_id(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= 255
        && !raw.contains('/')
        && !raw.chars().any(char::is_whitespace)
}
