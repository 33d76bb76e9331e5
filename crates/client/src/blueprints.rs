//! Blueprint resolution cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use api::{ApiClient, ApiError, Blueprint};

/// Caches blueprint resources by URL. Callers `require` every blueprint they
/// are going to read, then `resolve` once; resolution fetches only what is
/// still missing.
pub struct BlueprintStore {
    api: Rc<dyn ApiClient>,
    data: RefCell<HashMap<String, Option<Blueprint>>>,
    /// First-seen display name per blueprint `base_id`.
    names: RefCell<HashMap<String, String>>,
}

impl BlueprintStore {
    pub fn new(api: Rc<dyn ApiClient>) -> Self {
        Self {
            api,
            data: RefCell::new(HashMap::new()),
            names: RefCell::new(HashMap::new()),
        }
    }

    /// Marks a blueprint URL as needed. Idempotent; never downgrades an
    /// already resolved entry.
    pub fn require(&self, url: &str) {
        self.data.borrow_mut().entry(url.to_owned()).or_insert(None);
    }

    /// Fetches every required blueprint that is not resolved yet.
    pub fn resolve(&self) -> Result<(), ApiError> {
        let pending: Vec<String> = self
            .data
            .borrow()
            .iter()
            .filter(|(_, entry)| entry.is_none())
            .map(|(url, _)| url.clone())
            .collect();
        for url in pending {
            let blueprint: Blueprint = api::get(&*self.api, &url)?;
            self.names
                .borrow_mut()
                .entry(blueprint.base_id.clone())
                .or_insert_with(|| blueprint.data.name.clone());
            self.data.borrow_mut().insert(url, Some(blueprint));
        }
        Ok(())
    }

    /// The resolved blueprint for `url`, if it was required and resolved.
    pub fn get(&self, url: &str) -> Option<Blueprint> {
        self.data.borrow().get(url).and_then(|entry| entry.clone())
    }

    /// Display name of a blueprint family, e.g. `ships/corvette`.
    pub fn name_for_base(&self, base_id: &str) -> Option<String> {
        self.names.borrow().get(base_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_world, url, StubApi};

    #[test]
    fn resolve_fetches_required_blueprints_once() {
        let stub = StubApi::new();
        seed_world(&stub);
        let store = BlueprintStore::new(Rc::clone(&stub) as Rc<dyn ApiClient>);

        let corvette = url("blueprints/1/");
        store.require(&corvette);
        store.require(&corvette); // duplicate requires collapse
        store.resolve().unwrap();

        let blueprint = store.get(&corvette).expect("resolved");
        assert_eq!(blueprint.data.name, "Corvette");
        assert_eq!(store.name_for_base("ships/corvette").as_deref(), Some("Corvette"));

        // A second resolve has nothing left to fetch.
        let fetches_before = stub.gets.borrow().len();
        store.resolve().unwrap();
        assert_eq!(stub.gets.borrow().len(), fetches_before);
    }

    #[test]
    fn get_before_resolve_returns_nothing() {
        let stub = StubApi::new();
        seed_world(&stub);
        let store = BlueprintStore::new(Rc::clone(&stub) as Rc<dyn ApiClient>);

        let mine = url("blueprints/2/");
        store.require(&mine);
        assert!(store.get(&mine).is_none());
        assert!(store.get("http://game.test/api/blueprints/99/").is_none());
    }
}
