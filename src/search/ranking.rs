use crate::models::{PatentRecord, SortOrder, Thesis};

use super::alignment::alignment_score;

/// Post-scoring filter and ordering requested by the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingOptions {
    pub min_alignment: Option<f64>,
    pub sort: SortOrder,
}

/// One page of ranked results.
#[derive(Debug, Clone)]
pub struct Page {
    pub results: Vec<PatentRecord>,
    pub total: usize,
    pub has_more: bool,
}

/// Score every record's abstract against the starred thesis.
///
/// Without a starred thesis nothing is scored and every record keeps
/// `alignment_score: None`.
pub fn attach_alignment(records: &mut [PatentRecord], thesis: Option<&Thesis>) {
    let Some(thesis) = thesis else {
        return;
    };
    for record in records.iter_mut() {
        record.alignment_score = Some(alignment_score(&record.abstract_text, &thesis.content));
    }
}

/// Apply the alignment threshold, then the requested order.
///
/// The threshold only applies to scored records; when nothing was scored (no
/// starred thesis) the list passes through untouched.
pub fn rank(mut records: Vec<PatentRecord>, options: RankingOptions) -> Vec<PatentRecord> {
    let scored = records.iter().any(|r| r.alignment_score.is_some());

    if let (Some(min), true) = (options.min_alignment, scored) {
        records.retain(|r| r.alignment_score.is_some_and(|s| s >= min));
    }

    if options.sort == SortOrder::Alignment && scored {
        // Stable, so ties keep provider order
        records.sort_by(|a, b| {
            let sa = a.alignment_score.unwrap_or(0.0);
            let sb = b.alignment_score.unwrap_or(0.0);
            sb.total_cmp(&sa)
        });
    }

    records
}

/// Slice `records[offset..offset + limit]`, tolerating out-of-range offsets.
pub fn paginate(records: Vec<PatentRecord>, offset: usize, limit: usize) -> Page {
    let total = records.len();
    let end = offset.saturating_add(limit);
    let results = records.into_iter().skip(offset).take(limit).collect();
    Page {
        results,
        total,
        has_more: end < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_record(id: &str, abstract_text: &str) -> PatentRecord {
        PatentRecord {
            patent_id: Some(id.to_string()),
            title: format!("Patent {id}"),
            abstract_text: abstract_text.to_string(),
            assignee: "Acme".to_string(),
            inventors: vec![],
            year: Some(2023),
            jurisdiction: "US".to_string(),
            google_patents_url: None,
            publication_date: None,
            filing_date: None,
            alignment_score: None,
        }
    }

    fn make_thesis(content: &str) -> Thesis {
        let now = Utc::now();
        Thesis {
            id: Uuid::new_v4(),
            title: "Thesis".to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(records: &[PatentRecord]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.patent_id.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_no_thesis_leaves_records_unscored() {
        let mut records = vec![make_record("US1", "solar panel")];
        attach_alignment(&mut records, None);
        assert!(records[0].alignment_score.is_none());
    }

    #[test]
    fn test_attach_scores_abstract_against_thesis() {
        let thesis = make_thesis("solar panel energy storage");
        let mut records = vec![
            make_record("US1", "solar panel energy storage"),
            make_record("US2", ""),
        ];
        attach_alignment(&mut records, Some(&thesis));
        assert_eq!(records[0].alignment_score, Some(1.0));
        assert_eq!(records[1].alignment_score, Some(0.0));
    }

    #[test]
    fn test_sort_by_alignment_descending_and_stable() {
        let mut records = vec![
            make_record("low", "x"),
            make_record("high", "x"),
            make_record("tie-a", "x"),
            make_record("tie-b", "x"),
        ];
        records[0].alignment_score = Some(0.2);
        records[1].alignment_score = Some(0.9);
        records[2].alignment_score = Some(0.5);
        records[3].alignment_score = Some(0.5);

        let ranked = rank(
            records,
            RankingOptions {
                min_alignment: None,
                sort: SortOrder::Alignment,
            },
        );
        assert_eq!(ids(&ranked), vec!["high", "tie-a", "tie-b", "low"]);
    }

    #[test]
    fn test_relevance_keeps_provider_order() {
        let mut records = vec![make_record("a", "x"), make_record("b", "x")];
        records[0].alignment_score = Some(0.1);
        records[1].alignment_score = Some(0.9);
        let ranked = rank(records, RankingOptions::default());
        assert_eq!(ids(&ranked), vec!["a", "b"]);
    }

    #[test]
    fn test_threshold_filters_scored_records() {
        let mut records = vec![make_record("a", "x"), make_record("b", "x")];
        records[0].alignment_score = Some(0.1);
        records[1].alignment_score = Some(0.6);
        let ranked = rank(
            records,
            RankingOptions {
                min_alignment: Some(0.5),
                sort: SortOrder::Relevance,
            },
        );
        assert_eq!(ids(&ranked), vec!["b"]);
    }

    #[test]
    fn test_threshold_ignored_without_scores() {
        let records = vec![make_record("a", "x"), make_record("b", "x")];
        let ranked = rank(
            records,
            RankingOptions {
                min_alignment: Some(0.5),
                sort: SortOrder::Alignment,
            },
        );
        assert_eq!(ids(&ranked), vec!["a", "b"]);
    }

    #[test]
    fn test_paginate_window_and_has_more() {
        let records: Vec<_> = (0..25).map(|i| make_record(&format!("US{i}"), "x")).collect();

        let page = paginate(records.clone(), 0, 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.results.len(), 10);
        assert!(page.has_more);

        let page = paginate(records.clone(), 20, 10);
        assert_eq!(page.results.len(), 5);
        assert!(!page.has_more);

        let page = paginate(records, 100, 10);
        assert!(page.results.is_empty());
        assert!(!page.has_more);
    }
}
