use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user, identified by email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inventor {
    pub name: String,
}

/// A patent as returned by a search provider, reshaped for the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatentRecord {
    pub patent_id: Option<String>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub assignee: String,
    pub inventors: Vec<Inventor>,
    pub year: Option<i32>,
    pub jurisdiction: String,
    pub google_patents_url: Option<String>,
    pub publication_date: Option<String>,
    pub filing_date: Option<String>,
    /// Present only when the user has a starred thesis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_score: Option<f64>,
}

/// A patent saved to a user's watchlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPatent {
    pub id: Uuid,
    pub patent_id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub assignee: String,
    pub inventors: Vec<Inventor>,
    pub link: Option<String>,
    pub date_filed: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// A search query saved to a user's watchlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: Uuid,
    pub query: String,
    #[serde(default)]
    pub filters: Option<serde_json::Value>,
    pub saved_at: DateTime<Utc>,
}

/// An inventor saved to a user's watchlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedInventor {
    pub id: Uuid,
    pub name: String,
    pub linkedin_url: Option<String>,
    pub associated_patent_id: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// An investment thesis written by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thesis {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A thesis as listed to the client, with its starred flag derived from the
/// owner's active thesis.
#[derive(Debug, Clone, Serialize)]
pub struct ThesisEntry {
    #[serde(flatten)]
    pub thesis: Thesis,
    pub starred: bool,
}

/// Everything a user has saved. Persisted as one JSON document per user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserData {
    pub patents: Vec<SavedPatent>,
    pub queries: Vec<SavedQuery>,
    pub inventors: Vec<SavedInventor>,
    pub theses: Vec<Thesis>,
    /// The single thesis used for alignment scoring, if any.
    #[serde(default)]
    pub active_thesis_id: Option<Uuid>,
}

impl UserData {
    pub fn starred_thesis(&self) -> Option<&Thesis> {
        let id = self.active_thesis_id?;
        self.theses.iter().find(|t| t.id == id)
    }
}

/// Watchlist response
#[derive(Debug, Clone, Serialize)]
pub struct Watchlist {
    pub patents: Vec<SavedPatent>,
    pub queries: Vec<SavedQuery>,
    pub inventors: Vec<SavedInventor>,
}

/// Save-patent request. `patent_id` falls back to `id` for older clients.
#[derive(Debug, Clone, Deserialize)]
pub struct SavePatentRequest {
    pub patent_id: Option<String>,
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub inventors: Vec<Inventor>,
    pub link: Option<String>,
    pub date_filed: Option<String>,
}

/// Save-query request. Accepts `query` or the legacy `text` field.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveQueryRequest {
    pub query: Option<String>,
    pub text: Option<String>,
    pub filters: Option<serde_json::Value>,
}

/// Save-inventor request. Accepts `name` or the legacy `inventor` field.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveInventorRequest {
    pub name: Option<String>,
    pub inventor: Option<String>,
    pub linkedin_url: Option<String>,
    pub associated_patent_id: Option<String>,
}

/// Create or update a thesis
#[derive(Debug, Clone, Deserialize)]
pub struct ThesisRequest {
    pub title: String,
    pub content: String,
}

/// Ordering applied to search results after alignment scoring
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the provider's order
    #[default]
    Relevance,
    /// Highest alignment score first
    Alignment,
}

/// Patent search query string
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    pub min_alignment: Option<f64>,
    #[serde(default)]
    pub sort: SortOrder,
}

fn default_limit() -> usize {
    10
}

/// Reference to the thesis results were scored against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StarredThesisRef {
    pub id: Uuid,
    pub title: String,
}

/// Upstream search metadata passed through to the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub total_results: Option<u64>,
    pub time_taken: Option<String>,
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<PatentRecord>,
    pub total: usize,
    pub query: String,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
    pub starred_thesis: Option<StarredThesisRef>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_info: Option<ProviderInfo>,
}
