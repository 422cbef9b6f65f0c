use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Reads a JSON document. A missing file yields `T::default()`.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents)
            .with_context(|| format!("{} is corrupt", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Writes `value` as pretty JSON, creating parent directories as needed.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Saved.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger::{VoteBook, Voter};
    use std::path::PathBuf;
    use uuid::Uuid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("advisor-store-{}", Uuid::new_v4()))
            .join("ledger.json")
    }

    #[test]
    fn vote_book_persists_between_runs() {
        let path = scratch_path();
        let mut book: VoteBook = load_or_default(&path).unwrap();
        let id = book.open();
        book.record_vote(id, Voter::reviewer(3, "cy"), "A").unwrap();
        save(&path, &book).unwrap();

        let restored: VoteBook = load_or_default(&path).unwrap();
        assert_eq!(restored, book);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
