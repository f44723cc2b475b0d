//! Registry of folder proxies.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use dash_host::EntityId;

use crate::model::FolderProxy;

/// Lazily creates and memoizes one [`FolderProxy`] per folder id.
///
/// Entries are never evicted: folder ids are bounded by the folder-definition store, and dropping
/// a proxy while a view still holds it would break identity comparisons. The map goes away with
/// the registry itself.
#[derive(Debug, Default)]
pub struct FolderProxyRegistry {
    proxies: RefCell<HashMap<EntityId, Rc<FolderProxy>>>,
}

impl FolderProxyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the proxy for `id`, creating it on first lookup.
    pub fn resolve(&self, id: &EntityId) -> Rc<FolderProxy> {
        self.proxies
            .borrow_mut()
            .entry(id.clone())
            .or_insert_with(|| {
                tracing::debug!(folder = %id, "created folder proxy");
                Rc::new(FolderProxy::new(id.clone()))
            })
            .clone()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.proxies.borrow().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.proxies.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.borrow().is_empty()
    }
}
