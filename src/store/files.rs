use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::models::UserData;

/// Write JSON atomically (temp file + rename).
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let data = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, data)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn main_path(dir: &Path, user_id: Uuid) -> PathBuf {
    dir.join(format!("{user_id}.json"))
}

fn backup_path(dir: &Path, user_id: Uuid) -> PathBuf {
    dir.join(format!("{user_id}.backup.json"))
}

/// Persist a user's data: backup first, then the main file.
pub(crate) fn save_user_data(dir: &Path, user_id: Uuid, data: &UserData) -> StoreResult<()> {
    write_json_atomic(&backup_path(dir, user_id), data)?;
    write_json_atomic(&main_path(dir, user_id), data)?;
    tracing::debug!(
        "Saved data for user {user_id}: {} patents, {} queries, {} inventors, {} theses",
        data.patents.len(),
        data.queries.len(),
        data.inventors.len(),
        data.theses.len()
    );
    Ok(())
}

/// Whether a load failure means the file is absent or damaged, as opposed to
/// the filesystem being temporarily unable to read it.
fn is_recoverable(err: &StoreError) -> bool {
    match err {
        StoreError::Io(e) => e.kind() == ErrorKind::NotFound,
        StoreError::Json(_) => true,
        _ => false,
    }
}

/// Load a user's data, recovering from the backup when the main file is
/// missing or corrupt. Falls back to an empty workspace only when neither
/// file holds usable data; any other I/O failure is returned to the caller.
pub(crate) fn load_user_data(dir: &Path, user_id: Uuid) -> StoreResult<UserData> {
    let main = main_path(dir, user_id);
    let main_err = match read_json::<UserData>(&main) {
        Ok(data) => return Ok(data),
        Err(e) if is_recoverable(&e) => e,
        Err(e) => return Err(e),
    };

    let backup = backup_path(dir, user_id);
    match read_json::<UserData>(&backup) {
        Ok(data) => {
            tracing::warn!(
                "Failed to read data for user {user_id} ({main_err}), restored from backup"
            );
            if let Err(e) = write_json_atomic(&main, &data) {
                tracing::warn!("Failed to restore main data file for {user_id}: {e}");
            }
            Ok(data)
        }
        Err(e) if is_recoverable(&e) => {
            if main.exists() || backup.exists() {
                tracing::warn!(
                    "Data for user {user_id} unreadable ({main_err}; backup: {e}), starting empty"
                );
            }
            Ok(UserData::default())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SavedQuery;
    use chrono::Utc;

    fn sample_data() -> UserData {
        UserData {
            queries: vec![SavedQuery {
                id: Uuid::new_v4(),
                query: "perovskite tandem cells".to_string(),
                filters: None,
                saved_at: Utc::now(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let data = load_user_data(dir.path(), Uuid::new_v4()).unwrap();
        assert!(data.queries.is_empty());
        assert!(data.active_thesis_id.is_none());
    }

    #[test]
    fn test_save_writes_main_and_backup() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        save_user_data(dir.path(), id, &sample_data()).unwrap();

        assert!(main_path(dir.path(), id).exists());
        assert!(backup_path(dir.path(), id).exists());
        let loaded = load_user_data(dir.path(), id).unwrap();
        assert_eq!(loaded.queries[0].query, "perovskite tandem cells");
    }

    #[test]
    fn test_corrupt_main_recovers_from_backup() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        save_user_data(dir.path(), id, &sample_data()).unwrap();
        std::fs::write(main_path(dir.path(), id), "{ not json").unwrap();

        let loaded = load_user_data(dir.path(), id).unwrap();
        assert_eq!(loaded.queries.len(), 1);

        // Main file is rewritten from the backup
        let restored: UserData = read_json(&main_path(dir.path(), id)).unwrap();
        assert_eq!(restored.queries.len(), 1);
    }

    #[test]
    fn test_both_corrupt_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        std::fs::write(main_path(dir.path(), id), "garbage").unwrap();
        std::fs::write(backup_path(dir.path(), id), "garbage").unwrap();

        let loaded = load_user_data(dir.path(), id).unwrap();
        assert!(loaded.queries.is_empty());
    }

    #[test]
    fn test_unreadable_main_is_an_error_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        save_user_data(dir.path(), id, &sample_data()).unwrap();

        // A directory in place of the main file fails with an I/O error
        // that is neither "missing" nor "corrupt".
        std::fs::remove_file(main_path(dir.path(), id)).unwrap();
        std::fs::create_dir(main_path(dir.path(), id)).unwrap();

        let err = load_user_data(dir.path(), id).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));

        // The backup is left untouched
        let backup: UserData = read_json(&backup_path(dir.path(), id)).unwrap();
        assert_eq!(backup.queries.len(), 1);
    }

    #[test]
    fn test_missing_main_recovers_from_backup() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        save_user_data(dir.path(), id, &sample_data()).unwrap();
        std::fs::remove_file(main_path(dir.path(), id)).unwrap();

        let loaded = load_user_data(dir.path(), id).unwrap();
        assert_eq!(loaded.queries.len(), 1);
        assert!(main_path(dir.path(), id).exists());
    }
}
