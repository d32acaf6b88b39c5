//! JSON-file persistence for users, watchlists and theses.
//!
//! Layout under the data directory:
//!
//! ```text
//! users.json                      user directory
//! user_data/{user_id}.json        per-user workspace
//! user_data/{user_id}.backup.json last good copy, written first
//! ```
//!
//! Workspaces are cached in memory after first access. Every mutation works on
//! a copy, persists it, and only then replaces the cached value, so a failed
//! write leaves the in-memory state unchanged.

mod files;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    SaveInventorRequest, SavePatentRequest, SaveQueryRequest, SavedInventor, SavedPatent,
    SavedQuery, Thesis, ThesisEntry, ThesisRequest, User, UserData, Watchlist,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct Store {
    users_path: PathBuf,
    user_data_dir: PathBuf,
    users: RwLock<Vec<User>>,
    workspaces: Mutex<HashMap<Uuid, UserData>>,
}

impl Store {
    /// Open the store rooted at `data_dir`, creating directories as needed.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let user_data_dir = data_dir.join("user_data");
        std::fs::create_dir_all(&user_data_dir)?;

        let users_path = data_dir.join("users.json");
        let users: Vec<User> = if users_path.exists() {
            files::read_json(&users_path)?
        } else {
            Vec::new()
        };
        tracing::info!("Loaded {} users from {}", users.len(), users_path.display());

        Ok(Self {
            users_path,
            user_data_dir,
            users: RwLock::new(users),
            workspaces: Mutex::new(HashMap::new()),
        })
    }

    // ─── Users ───────────────────────────────────────────

    /// Look up a user by email, registering them on first sight.
    pub fn get_or_create_user(&self, email: &str) -> StoreResult<User> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(StoreError::Invalid("Email is required".to_string()));
        }

        let mut users = self.users.write();
        if let Some(user) = users.iter().find(|u| u.email == email) {
            return Ok(user.clone());
        }

        let name = email.split('@').next().unwrap_or(&email).to_string();
        let user = User {
            id: Uuid::new_v4(),
            email,
            name,
            created_at: Utc::now(),
        };

        let mut next = users.clone();
        next.push(user.clone());
        files::write_json_atomic(&self.users_path, &next)?;
        *users = next;

        tracing::info!("Registered user {} ({})", user.email, user.id);
        Ok(user)
    }

    // ─── Workspace access ────────────────────────────────

    fn read<T>(&self, user_id: Uuid, f: impl FnOnce(&UserData) -> T) -> StoreResult<T> {
        let mut cache = self.workspaces.lock();
        let data = cached(&mut cache, &self.user_data_dir, user_id)?;
        Ok(f(data))
    }

    fn update<T>(
        &self,
        user_id: Uuid,
        f: impl FnOnce(&mut UserData) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let dir = &self.user_data_dir;
        let mut cache = self.workspaces.lock();
        let data = cached(&mut cache, dir, user_id)?;

        let mut next = data.clone();
        let out = f(&mut next)?;
        files::save_user_data(dir, user_id, &next)?;
        *data = next;
        Ok(out)
    }

    // ─── Watchlist ───────────────────────────────────────

    /// Saved items, newest first.
    pub fn watchlist(&self, user_id: Uuid) -> StoreResult<Watchlist> {
        self.read(user_id, |data| Watchlist {
            patents: data.patents.iter().rev().cloned().collect(),
            queries: data.queries.iter().rev().cloned().collect(),
            inventors: data.inventors.iter().rev().cloned().collect(),
        })
    }

    pub fn add_patent(&self, user_id: Uuid, req: SavePatentRequest) -> StoreResult<SavedPatent> {
        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::Invalid("Patent title is required".to_string()));
        }
        let patent_id = req
            .patent_id
            .or(req.id)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.update(user_id, |data| {
            if data.patents.iter().any(|p| p.patent_id == patent_id) {
                return Err(StoreError::Duplicate(format!(
                    "Patent {patent_id} is already saved"
                )));
            }
            let patent = SavedPatent {
                id: Uuid::new_v4(),
                patent_id,
                title,
                abstract_text: req.abstract_text,
                assignee: req.assignee,
                inventors: req.inventors,
                link: req.link,
                date_filed: req.date_filed,
                saved_at: Utc::now(),
            };
            data.patents.push(patent.clone());
            Ok(patent)
        })
    }

    pub fn add_query(&self, user_id: Uuid, req: SaveQueryRequest) -> StoreResult<SavedQuery> {
        let query = req
            .query
            .or(req.text)
            .map(|q| q.trim().to_string())
            .unwrap_or_default();
        if query.is_empty() {
            return Err(StoreError::Invalid("Query is required".to_string()));
        }

        self.update(user_id, |data| {
            if data.queries.iter().any(|q| q.query == query) {
                return Err(StoreError::Duplicate(format!(
                    "Query \"{query}\" is already saved"
                )));
            }
            let saved = SavedQuery {
                id: Uuid::new_v4(),
                query,
                filters: req.filters,
                saved_at: Utc::now(),
            };
            data.queries.push(saved.clone());
            Ok(saved)
        })
    }

    pub fn add_inventor(
        &self,
        user_id: Uuid,
        req: SaveInventorRequest,
    ) -> StoreResult<SavedInventor> {
        let name = req
            .name
            .or(req.inventor)
            .map(|n| n.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return Err(StoreError::Invalid("Inventor name is required".to_string()));
        }

        self.update(user_id, |data| {
            if data.inventors.iter().any(|i| i.name == name) {
                return Err(StoreError::Duplicate(format!(
                    "Inventor {name} is already saved"
                )));
            }
            let inventor = SavedInventor {
                id: Uuid::new_v4(),
                name,
                linkedin_url: req.linkedin_url,
                associated_patent_id: req.associated_patent_id,
                saved_at: Utc::now(),
            };
            data.inventors.push(inventor.clone());
            Ok(inventor)
        })
    }

    pub fn remove_patent(&self, user_id: Uuid, id: Uuid) -> StoreResult<()> {
        self.update(user_id, |data| {
            remove_by(&mut data.patents, |p| p.id == id, "Patent")
        })
    }

    pub fn remove_query(&self, user_id: Uuid, id: Uuid) -> StoreResult<()> {
        self.update(user_id, |data| {
            remove_by(&mut data.queries, |q| q.id == id, "Query")
        })
    }

    pub fn remove_inventor(&self, user_id: Uuid, id: Uuid) -> StoreResult<()> {
        self.update(user_id, |data| {
            remove_by(&mut data.inventors, |i| i.id == id, "Inventor")
        })
    }

    // ─── Theses ──────────────────────────────────────────

    /// All theses, newest first, flagged with whether they are starred.
    pub fn list_theses(&self, user_id: Uuid) -> StoreResult<Vec<ThesisEntry>> {
        self.read(user_id, |data| {
            let mut entries: Vec<ThesisEntry> = data
                .theses
                .iter()
                .map(|t| ThesisEntry {
                    thesis: t.clone(),
                    starred: data.active_thesis_id == Some(t.id),
                })
                .collect();
            entries.sort_by(|a, b| b.thesis.created_at.cmp(&a.thesis.created_at));
            entries
        })
    }

    pub fn create_thesis(&self, user_id: Uuid, req: ThesisRequest) -> StoreResult<Thesis> {
        let (title, content) = validate_thesis(req)?;
        self.update(user_id, |data| {
            let now = Utc::now();
            let thesis = Thesis {
                id: Uuid::new_v4(),
                title,
                content,
                created_at: now,
                updated_at: now,
            };
            data.theses.push(thesis.clone());
            Ok(thesis)
        })
    }

    pub fn update_thesis(
        &self,
        user_id: Uuid,
        id: Uuid,
        req: ThesisRequest,
    ) -> StoreResult<Thesis> {
        let (title, content) = validate_thesis(req)?;
        self.update(user_id, |data| {
            let thesis = data
                .theses
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(StoreError::NotFound("Thesis"))?;
            thesis.title = title;
            thesis.content = content;
            thesis.updated_at = Utc::now();
            Ok(thesis.clone())
        })
    }

    /// Delete a thesis. Deleting the starred thesis leaves no thesis starred.
    pub fn delete_thesis(&self, user_id: Uuid, id: Uuid) -> StoreResult<()> {
        self.update(user_id, |data| {
            remove_by(&mut data.theses, |t| t.id == id, "Thesis")?;
            if data.active_thesis_id == Some(id) {
                data.active_thesis_id = None;
            }
            Ok(())
        })
    }

    /// Make `id` the user's single starred thesis.
    pub fn star_thesis(&self, user_id: Uuid, id: Uuid) -> StoreResult<Thesis> {
        self.update(user_id, |data| {
            let thesis = data
                .theses
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or(StoreError::NotFound("Thesis"))?;
            data.active_thesis_id = Some(id);
            Ok(thesis)
        })
    }

    /// Clear the star if it is on `id`; a no-op when another thesis is starred.
    pub fn unstar_thesis(&self, user_id: Uuid, id: Uuid) -> StoreResult<()> {
        self.update(user_id, |data| {
            if !data.theses.iter().any(|t| t.id == id) {
                return Err(StoreError::NotFound("Thesis"));
            }
            if data.active_thesis_id == Some(id) {
                data.active_thesis_id = None;
            }
            Ok(())
        })
    }

    pub fn starred_thesis(&self, user_id: Uuid) -> StoreResult<Option<Thesis>> {
        self.read(user_id, |data| data.starred_thesis().cloned())
    }
}

/// The cached workspace for `user_id`, loading it from disk on first access.
/// A failed load leaves the cache untouched so the next request retries.
fn cached<'a>(
    cache: &'a mut HashMap<Uuid, UserData>,
    dir: &Path,
    user_id: Uuid,
) -> StoreResult<&'a mut UserData> {
    match cache.entry(user_id) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => Ok(entry.insert(files::load_user_data(dir, user_id)?)),
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_thesis(req: ThesisRequest) -> StoreResult<(String, String)> {
    let title = req.title.trim().to_string();
    if title.is_empty() || req.content.trim().is_empty() {
        return Err(StoreError::Invalid(
            "Thesis title and content are required".to_string(),
        ));
    }
    Ok((title, req.content))
}

fn remove_by<T>(
    items: &mut Vec<T>,
    pred: impl Fn(&T) -> bool,
    what: &'static str,
) -> StoreResult<()> {
    let before = items.len();
    items.retain(|item| !pred(item));
    if items.len() == before {
        return Err(StoreError::NotFound(what));
    }
    Ok(())
}
