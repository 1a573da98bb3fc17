//! In-memory favorites registry. The one piece of local state in the whole
//! gateway: process-lifetime only, no durability, last write wins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteProject {
    pub project_gid: String,
    pub project_name: String,
    pub permalink_url: String,
}

/// Store abstraction so route code never touches the map directly; a real
/// datastore can replace `MemoryFavoriteStore` without touching routes.
pub trait FavoriteStore: Send + Sync {
    /// Append a favorite. Deliberately not idempotent: adding the same
    /// project twice yields two entries, matching the recorded behavior.
    fn add(&self, user_gid: &str, project: FavoriteProject);

    fn list(&self, user_gid: &str) -> Vec<FavoriteProject>;

    /// Remove every entry for `project_gid`. A no-op for unknown users.
    fn remove(&self, user_gid: &str, project_gid: &str);
}

#[derive(Debug, Default)]
pub struct MemoryFavoriteStore {
    inner: Mutex<BTreeMap<String, Vec<FavoriteProject>>>,
}

impl MemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoriteStore for MemoryFavoriteStore {
    fn add(&self, user_gid: &str, project: FavoriteProject) {
        let mut map = self.inner.lock().expect("favorites lock poisoned");
        map.entry(user_gid.to_string()).or_default().push(project);
    }

    fn list(&self, user_gid: &str) -> Vec<FavoriteProject> {
        let map = self.inner.lock().expect("favorites lock poisoned");
        map.get(user_gid).cloned().unwrap_or_default()
    }

    fn remove(&self, user_gid: &str, project_gid: &str) {
        let mut map = self.inner.lock().expect("favorites lock poisoned");
        if let Some(projects) = map.get_mut(user_gid) {
            projects.retain(|p| p.project_gid != project_gid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(gid: &str) -> FavoriteProject {
        FavoriteProject {
            project_gid: gid.to_string(),
            project_name: format!("Project {gid}"),
            permalink_url: format!("https://app.asana.com/0/{gid}"),
        }
    }

    #[test]
    fn add_then_list_contains_project() {
        let store = MemoryFavoriteStore::new();
        store.add("u1", project("p1"));
        let favorites = store.list("u1");
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].project_gid, "p1");
    }

    #[test]
    fn remove_excludes_project() {
        let store = MemoryFavoriteStore::new();
        store.add("u1", project("p1"));
        store.add("u1", project("p2"));
        store.remove("u1", "p1");
        let favorites = store.list("u1");
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].project_gid, "p2");
    }

    #[test]
    fn unknown_user_lists_empty() {
        let store = MemoryFavoriteStore::new();
        assert!(store.list("nobody").is_empty());
        store.remove("nobody", "p1");
    }

    #[test]
    fn duplicate_add_yields_two_entries() {
        let store = MemoryFavoriteStore::new();
        store.add("u1", project("p1"));
        store.add("u1", project("p1"));
        assert_eq!(store.list("u1").len(), 2);
    }
}
