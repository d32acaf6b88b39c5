use async_trait::async_trait;

use super::{PatentProvider, ProviderBatch, ProviderResult};
use crate::models::{Inventor, PatentRecord};

/// Offline provider used when no search API key is configured.
///
/// Returns a fixed record set regardless of the query so the rest of the
/// pipeline (alignment, ranking, pagination) can be exercised without network.
#[derive(Debug, Clone, Default)]
pub struct SampleProvider;

impl SampleProvider {
    pub fn new() -> Self {
        Self
    }

    fn records() -> Vec<PatentRecord> {
        vec![
            PatentRecord {
                patent_id: Some("US10123456B2".to_string()),
                title: "Solar Panel System with Enhanced Efficiency".to_string(),
                abstract_text: "A solar panel system that includes advanced photovoltaic \
                                technology for improved energy conversion efficiency."
                    .to_string(),
                assignee: "SolarTech Inc".to_string(),
                inventors: vec![Inventor {
                    name: "Dr. Sarah Johnson".to_string(),
                }],
                year: Some(2023),
                jurisdiction: "US".to_string(),
                google_patents_url: Some(
                    "https://patents.google.com/patent/US10123456B2".to_string(),
                ),
                publication_date: Some("2023-06-15".to_string()),
                filing_date: None,
                alignment_score: None,
            },
            PatentRecord {
                patent_id: Some("EP3456789A1".to_string()),
                title: "Grid-Scale Battery Storage Controller".to_string(),
                abstract_text: "A controller that schedules charging and discharging of \
                                grid-connected battery storage to smooth renewable power output."
                    .to_string(),
                assignee: "Voltgrid GmbH".to_string(),
                inventors: vec![Inventor {
                    name: "Lena Hoffmann".to_string(),
                }],
                year: Some(2022),
                jurisdiction: "EP".to_string(),
                google_patents_url: Some(
                    "https://patents.google.com/patent/EP3456789A1".to_string(),
                ),
                publication_date: Some("2022-11-02".to_string()),
                filing_date: None,
                alignment_score: None,
            },
        ]
    }
}

#[async_trait]
impl PatentProvider for SampleProvider {
    async fn search(&self, _query: &str, limit: usize) -> ProviderResult<ProviderBatch> {
        let records = Self::records().into_iter().take(limit).collect();
        Ok(ProviderBatch {
            records,
            info: None,
            message: Some(
                "Using sample data - configure SERPAPI_API_KEY for real results".to_string(),
            ),
        })
    }

    fn name(&self) -> &str {
        "sample"
    }
}
