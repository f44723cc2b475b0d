//! String-list settings storage contracts and adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Host service for string-list settings values (`as` keys such as `favorite-apps`).
///
/// Calls are synchronous; the host is expected to answer from an in-process settings cache.
pub trait StrvSettings {
    /// Loads the string list stored under `key`, or an empty list when unset.
    fn get_strv(&self, key: &str) -> Result<Vec<String>, String>;

    /// Replaces the string list stored under `key`.
    fn set_strv(&self, key: &str, values: &[String]) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op settings store for unsupported targets and baseline tests.
pub struct NoopStrvSettings;

impl StrvSettings for NoopStrvSettings {
    fn get_strv(&self, _key: &str) -> Result<Vec<String>, String> {
        Ok(Vec::new())
    }

    fn set_strv(&self, _key: &str, _values: &[String]) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory settings store keyed by string; clones share the same backing map.
pub struct MemoryStrvSettings {
    inner: Rc<RefCell<HashMap<String, Vec<String>>>>,
    read_only: Rc<RefCell<bool>>,
}

impl MemoryStrvSettings {
    /// Creates a store seeded with `values` under `key`.
    pub fn with_strv<I, S>(key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::default();
        store
            .inner
            .borrow_mut()
            .insert(key.to_string(), values.into_iter().map(Into::into).collect());
        store
    }

    /// Returns the raw stored list without going through the trait.
    pub fn snapshot(&self, key: &str) -> Vec<String> {
        self.inner.borrow().get(key).cloned().unwrap_or_default()
    }

    /// Makes subsequent writes fail, emulating a locked-down settings key.
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.borrow_mut() = read_only;
    }
}

impl StrvSettings for MemoryStrvSettings {
    fn get_strv(&self, key: &str) -> Result<Vec<String>, String> {
        Ok(self.snapshot(key))
    }

    fn set_strv(&self, key: &str, values: &[String]) -> Result<(), String> {
        if *self.read_only.borrow() {
            return Err(format!("settings key `{key}` is not writable"));
        }
        self.inner
            .borrow_mut()
            .insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_strv_settings_round_trip_and_share_between_clones() {
        let store = MemoryStrvSettings::with_strv("favorite-apps", ["firefox"]);
        let store_obj: &dyn StrvSettings = &store;
        let shared = store.clone();

        assert_eq!(
            store_obj.get_strv("favorite-apps").expect("load"),
            vec!["firefox".to_string()]
        );
        store_obj
            .set_strv("favorite-apps", &["firefox".to_string(), "utilities".to_string()])
            .expect("save");
        assert_eq!(shared.snapshot("favorite-apps").len(), 2);
        assert_eq!(store_obj.get_strv("missing").expect("load"), Vec::<String>::new());
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let store = MemoryStrvSettings::default();
        store.set_read_only(true);
        let err = store
            .set_strv("favorite-apps", &["firefox".to_string()])
            .expect_err("write should fail");
        assert!(err.contains("favorite-apps"));
        assert_eq!(store.snapshot("favorite-apps"), Vec::<String>::new());
    }

    #[test]
    fn noop_strv_settings_is_empty_and_successful() {
        let store = NoopStrvSettings;
        let store_obj: &dyn StrvSettings = &store;
        assert_eq!(store_obj.get_strv("k").expect("load"), Vec::<String>::new());
        store_obj.set_strv("k", &["v".to_string()]).expect("save");
    }
}
