use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use super::{PatentProvider, ProviderBatch, ProviderError, ProviderResult};
use crate::config::SerpApiConfig;
use crate::models::{Inventor, PatentRecord, ProviderInfo};

/// SerpAPI's Google Patents engine accepts 10..=100 results per page.
const MIN_PAGE: usize = 10;
const MAX_PAGE: usize = 100;

/// Google Patents search through SerpAPI.
pub struct SerpApiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SerpApiProvider {
    pub fn new(client: reqwest::Client, config: &SerpApiConfig) -> ProviderResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::Config("SERPAPI_API_KEY is not set".to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl PatentProvider for SerpApiProvider {
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<ProviderBatch> {
        let num = limit.clamp(MIN_PAGE, MAX_PAGE).to_string();
        tracing::debug!("SerpAPI search: {query:?} (num={num})");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", "google_patents"),
                ("q", query),
                ("num", num.as_str()),
                ("start", "1"),
                ("sort_by", "date"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream { status, body });
        }

        let body: SerpResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(format!("SerpAPI response: {e}")))?;

        let mut batch = reshape_response(body);
        batch.records.truncate(limit);
        Ok(batch)
    }

    fn name(&self) -> &str {
        "serpapi"
    }
}

// ─── Wire format ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SerpResponse {
    organic_results: Option<Vec<OrganicResult>>,
    search_information: Option<SearchInformation>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    /// A number, or display text such as "About 1,000"
    total_results: Option<Value>,
    time_taken_displayed: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    patent_number: Option<String>,
    publication_number: Option<String>,
    patent_id: Option<String>,
    title: Option<String>,
    snippet: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    assignee: Option<String>,
    /// Either an array of names or absent
    inventors: Option<Value>,
    /// Either a single name or an array of names
    inventor: Option<Value>,
    people: Option<Vec<Person>>,
    publication_date: Option<String>,
    filing_date: Option<String>,
    patent_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Person {
    name: Option<String>,
    role: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

// ─── Reshaping ───────────────────────────────────────────

fn reshape_response(body: SerpResponse) -> ProviderBatch {
    let info = body.search_information.map(|si| ProviderInfo {
        total_results: si.total_results.as_ref().and_then(result_count),
        time_taken: si.time_taken_displayed.map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        }),
    });

    let Some(results) = body.organic_results else {
        if let Some(err) = &body.error {
            tracing::warn!("SerpAPI returned no results: {err}");
        }
        return ProviderBatch {
            records: Vec::new(),
            info,
            message: Some(body.error.unwrap_or_else(|| "No patents found".to_string())),
        };
    };

    ProviderBatch {
        records: results.into_iter().map(reshape_result).collect(),
        info,
        message: None,
    }
}

fn reshape_result(result: OrganicResult) -> PatentRecord {
    let patent_id = result
        .patent_number
        .or(result.publication_number)
        .or(result.patent_id)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let assignee = non_blank(result.assignee).unwrap_or_else(|| "Unknown Assignee".to_string());
    let mut inventors = extract_inventors(
        result.inventors.as_ref(),
        result.inventor.as_ref(),
        result.people.as_deref(),
    );
    if inventors.is_empty() {
        inventors.push(placeholder_inventor(&assignee));
    }

    let year = result.publication_date.as_deref().and_then(parse_year);
    let jurisdiction = patent_id
        .as_deref()
        .map(jurisdiction_of)
        .unwrap_or("US")
        .to_string();
    let google_patents_url = non_blank(result.patent_link).or_else(|| {
        patent_id
            .as_ref()
            .map(|id| format!("https://patents.google.com/patent/{id}"))
    });

    PatentRecord {
        title: non_blank(result.title).unwrap_or_else(|| "Untitled Patent".to_string()),
        abstract_text: non_blank(result.snippet)
            .or_else(|| non_blank(result.abstract_text))
            .unwrap_or_else(|| "No abstract available".to_string()),
        assignee,
        inventors,
        year,
        jurisdiction,
        google_patents_url,
        publication_date: result.publication_date,
        filing_date: result.filing_date,
        patent_id,
        alignment_score: None,
    }
}

fn result_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn names_from(value: &Value) -> Vec<Inventor> {
    let names: Vec<&str> = match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    names
        .into_iter()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| Inventor {
            name: n.to_string(),
        })
        .collect()
}

/// Inventors come in several shapes depending on the result type; take the
/// first non-empty one.
fn extract_inventors(
    inventors: Option<&Value>,
    inventor: Option<&Value>,
    people: Option<&[Person]>,
) -> Vec<Inventor> {
    for value in [inventors, inventor].into_iter().flatten() {
        let found = names_from(value);
        if !found.is_empty() {
            return found;
        }
    }

    people
        .unwrap_or_default()
        .iter()
        .filter(|p| p.role.as_deref() == Some("inventor") || p.kind.as_deref() == Some("inventor"))
        .filter_map(|p| p.name.as_deref().map(str::trim))
        .filter(|n| !n.is_empty())
        .map(|n| Inventor {
            name: n.to_string(),
        })
        .collect()
}

/// Stand-in so the client always has an inventor to act on: the first two
/// assignee words longer than two characters.
fn placeholder_inventor(assignee: &str) -> Inventor {
    let words: Vec<&str> = assignee
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .take(2)
        .collect();
    let name = if words.is_empty() {
        "Patent Inventor".to_string()
    } else {
        words.join(" ")
    };
    Inventor { name }
}

fn parse_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d.year());
    }
    let prefix = date.get(..4)?;
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}

fn jurisdiction_of(patent_id: &str) -> &'static str {
    const OFFICES: &[&str] = &["EP", "WO", "JP", "CN", "US"];
    OFFICES
        .iter()
        .find(|office| patent_id.starts_with(**office))
        .copied()
        .unwrap_or("US")
}
