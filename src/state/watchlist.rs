use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Game ids the user starred, persisted as a JSON array of strings.
#[derive(Debug, Default)]
pub struct Watchlist {
    ids: Vec<String>,
    path: PathBuf,
}

impl Watchlist {
    /// Read the saved list. A missing or unreadable file starts an empty list.
    pub fn load(path: PathBuf) -> Self {
        let ids = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<Vec<String>>(&content).unwrap_or_else(|e| {
                warn!("ignoring malformed watchlist {}: {e}", path.display());
                Vec::new()
            }),
            Err(e) => {
                debug!("no watchlist at {}: {e}", path.display());
                Vec::new()
            }
        };
        Self { ids, path }
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.ids.iter().any(|id| id == game_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add or remove a game and rewrite the file. Returns whether the game is now watched.
    /// The in-memory list changes even when saving fails.
    pub fn toggle(&mut self, game_id: &str) -> Result<bool, String> {
        let watched = if self.contains(game_id) {
            self.ids.retain(|id| id != game_id);
            false
        } else {
            self.ids.push(game_id.to_string());
            true
        };
        self.save()?;
        Ok(watched)
    }

    fn save(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
        }
        let payload = serde_json::to_string(&self.ids)
            .map_err(|e| format!("serialize watchlist failed: {e}"))?;
        std::fs::write(&self.path, payload).map_err(|e| format!("write watchlist failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("court-chronicles-{}-{name}", std::process::id()))
            .join("watchlist.json")
    }

    #[test]
    fn toggle_persists_and_reloads() {
        let path = scratch_path("roundtrip");
        let mut list = Watchlist::load(path.clone());
        assert!(list.ids().is_empty());

        assert_eq!(list.toggle("401"), Ok(true));
        assert_eq!(list.toggle("402"), Ok(true));
        assert_eq!(list.toggle("401"), Ok(false));

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, r#"["402"]"#);

        let reloaded = Watchlist::load(path.clone());
        assert!(reloaded.contains("402"));
        assert!(!reloaded.contains("401"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_starts_empty() {
        let path = scratch_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let list = Watchlist::load(path.clone());
        assert!(list.ids().is_empty());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
