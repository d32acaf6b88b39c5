//! Thesis alignment scoring.
//!
//! Compares a patent's text against an investment thesis with a small
//! multi-signal heuristic: set overlap, frequency-weighted overlap, a bonus for
//! shared domain keywords and a length-ratio term. The linear combination is
//! then inflated so scores spread across a range that is useful for ranking.
//!
//! The output is a ranking signal in `[0, 1]`, not a calibrated probability.
//! Constants and the order of every floating point operation are fixed so that
//! scores are reproducible across releases.

use std::collections::{HashMap, HashSet};

use super::tokenizer::tokenize;

/// Keywords that earn a flat bonus when both texts contain them.
/// Accumulated in this order.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "solar",
    "photovoltaic",
    "panel",
    "module",
    "energy",
    "power",
    "electric",
    "battery",
    "storage",
    "grid",
    "renewable",
    "clean",
    "green",
    "efficiency",
    "system",
    "device",
    "method",
    "apparatus",
    "technology",
    "innovation",
];

const KEYWORD_BONUS: f64 = 0.1;

const JACCARD_WEIGHT: f64 = 0.3;
const OVERLAP_WEIGHT: f64 = 0.4;
const KEYWORD_WEIGHT: f64 = 0.2;
const LENGTH_WEIGHT: f64 = 0.1;

/// Any positive base score is lifted to at least this value.
pub const SCORE_FLOOR: f64 = 0.15;

/// The four raw similarity signals between a patent and a thesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentSignals {
    /// Unique-token intersection over union.
    pub jaccard: f64,
    /// Shared token occurrences normalized by the patent's token count only.
    pub weighted_overlap: f64,
    /// `0.1` per shared domain keyword, uncapped.
    pub keyword_bonus: f64,
    /// Shorter token sequence length over longer.
    pub length_ratio: f64,
}

impl AlignmentSignals {
    /// Measure both texts. Returns `None` when either side has no tokens left
    /// after normalization.
    pub fn measure(patent_text: &str, thesis_text: &str) -> Option<Self> {
        let patent = tokenize(patent_text);
        let thesis = tokenize(thesis_text);
        if patent.is_empty() || thesis.is_empty() {
            return None;
        }

        let patent_freq = frequencies(&patent);
        let thesis_freq = frequencies(&thesis);
        let patent_set: HashSet<&str> = patent.iter().map(String::as_str).collect();
        let thesis_set: HashSet<&str> = thesis.iter().map(String::as_str).collect();

        let intersection = patent_set.intersection(&thesis_set).count();
        let union = patent_set.union(&thesis_set).count();
        let jaccard = safe_ratio(intersection as f64, union as f64);

        // Asymmetric on purpose: normalized by the patent side.
        let mut overlap = 0usize;
        let mut total = 0usize;
        for (token, &count) in &patent_freq {
            if let Some(&other) = thesis_freq.get(token) {
                overlap += count.min(other);
            }
            total += count;
        }
        let weighted_overlap = safe_ratio(overlap as f64, total as f64);

        let mut keyword_bonus = 0.0;
        for keyword in DOMAIN_KEYWORDS {
            if patent_set.contains(keyword) && thesis_set.contains(keyword) {
                keyword_bonus += KEYWORD_BONUS;
            }
        }

        let shorter = patent.len().min(thesis.len());
        let longer = patent.len().max(thesis.len());
        let length_ratio = safe_ratio(shorter as f64, longer as f64);

        Some(Self {
            jaccard,
            weighted_overlap,
            keyword_bonus,
            length_ratio,
        })
    }

    /// Linear combination of the signals, before inflation.
    pub fn base(&self) -> f64 {
        self.jaccard * JACCARD_WEIGHT
            + self.weighted_overlap * OVERLAP_WEIGHT
            + self.keyword_bonus * KEYWORD_WEIGHT
            + self.length_ratio * LENGTH_WEIGHT
    }

    /// Final score: `max(floor, min(1, 3b + b²))`.
    pub fn score(&self) -> f64 {
        let base = self.base();
        let inflated = (base * 3.0 + base * base).min(1.0);
        let floor = if base > 0.0 { SCORE_FLOOR } else { 0.0 };
        floor.max(inflated)
    }
}

/// Alignment of `patent_text` against `thesis_text`, in `[0, 1]`.
///
/// Total over all inputs: empty or stop-word-only text on either side scores
/// `0.0`. Argument order matters because the weighted overlap is normalized by
/// the patent side.
pub fn alignment_score(patent_text: &str, thesis_text: &str) -> f64 {
    AlignmentSignals::measure(patent_text, thesis_text)
        .map(|signals| signals.score())
        .unwrap_or(0.0)
}

fn frequencies(tokens: &[String]) -> HashMap<&str, usize> {
    let mut freq = HashMap::with_capacity(tokens.len());
    for token in tokens {
        *freq.entry(token.as_str()).or_insert(0) += 1;
    }
    freq
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATENT: &str = "solar panel energy efficiency system";
    const THESIS: &str = "solar photovoltaic panel energy storage system";

    #[test]
    fn test_regression_fixture_solar_pair() {
        let signals = AlignmentSignals::measure(PATENT, THESIS).unwrap();
        assert_eq!(signals.jaccard, 4.0 / 7.0);
        assert_eq!(signals.weighted_overlap, 4.0 / 5.0);
        assert!((signals.keyword_bonus - 0.4).abs() < 1e-12);
        assert_eq!(signals.length_ratio, 5.0 / 6.0);
        assert!((signals.base() - 0.654_761_904_761_904_8).abs() < 1e-12);
        // 3b + b² saturates well above 1
        assert_eq!(alignment_score(PATENT, THESIS), 1.0);
    }

    #[test]
    fn test_deterministic() {
        let first = alignment_score(PATENT, THESIS);
        for _ in 0..10 {
            assert_eq!(alignment_score(PATENT, THESIS).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_zero_on_empty_side() {
        assert_eq!(alignment_score("", THESIS), 0.0);
        assert_eq!(alignment_score(PATENT, ""), 0.0);
        assert_eq!(alignment_score("", ""), 0.0);
    }

    #[test]
    fn test_zero_when_only_stop_words() {
        assert_eq!(alignment_score("the a an", "the a an"), 0.0);
        assert_eq!(alignment_score("!!! ... ???", PATENT), 0.0);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(
            alignment_score("Solar Panel!", "solar panel"),
            alignment_score("solar panel", "solar panel")
        );
    }

    #[test]
    fn test_asymmetric_in_argument_order() {
        let short = "widget";
        let long = "widget gizmo gadget sprocket";
        let forward = alignment_score(short, long);
        let backward = alignment_score(long, short);
        assert_ne!(forward, backward);
        assert_eq!(forward, 1.0);
        assert!((backward - 0.64).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_length_term_only() {
        let signals =
            AlignmentSignals::measure("lithium anode", "cathode electrolyte separator").unwrap();
        assert_eq!(signals.jaccard, 0.0);
        assert_eq!(signals.weighted_overlap, 0.0);
        assert_eq!(signals.keyword_bonus, 0.0);

        let base = (2.0_f64 / 3.0) * 0.1;
        let expected = (base * 3.0 + base * base).min(1.0);
        assert_eq!(
            alignment_score("lithium anode", "cathode electrolyte separator"),
            expected
        );
    }

    #[test]
    fn test_floor_applies_to_positive_base() {
        // Tiny overlap: one shared token among many, far below the floor once inflated.
        let patent = format!(
            "widget {}",
            (0..200).map(|i| format!("p{i:03}")).collect::<Vec<_>>().join(" ")
        );
        let signals = AlignmentSignals::measure(&patent, "widget").unwrap();
        let base = signals.base();
        assert!(base > 0.0);
        assert!(base * 3.0 + base * base < SCORE_FLOOR);
        assert_eq!(signals.score(), SCORE_FLOOR);
    }

    #[test]
    fn test_keyword_matches_beat_plain_matches() {
        let filler_a = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda";
        let filler_b = "omicron rho sigma tau upsilon phi chi psi omega xray yankee";
        let with_keywords = alignment_score(
            &format!("solar energy storage {filler_a}"),
            &format!("solar energy storage {filler_b}"),
        );
        let without_keywords = alignment_score(
            &format!("cat dog fox {filler_a}"),
            &format!("cat dog fox {filler_b}"),
        );
        assert!(with_keywords > without_keywords);
        assert!((with_keywords - 0.924_505_795_918_367_2).abs() < 1e-12);
        assert!((without_keywords - 0.714_300_081_632_653).abs() < 1e-12);
    }

    #[test]
    fn test_keyword_bonus_is_uncapped_before_combination() {
        let text = DOMAIN_KEYWORDS.join(" ");
        let signals = AlignmentSignals::measure(&text, &text).unwrap();
        assert!(signals.keyword_bonus > 1.9);
        assert_eq!(signals.score(), 1.0);
    }

    #[test]
    fn test_range_over_assorted_inputs() {
        let samples = [
            "",
            "the",
            "solar",
            "Battery management system for grid storage",
            "A method and apparatus for cooling photovoltaic modules",
            "über-efficient café lighting",
            "wind wind wind turbine blade",
        ];
        for a in samples {
            for b in samples {
                let score = alignment_score(a, b);
                assert!(score.is_finite());
                assert!((0.0..=1.0).contains(&score), "{a:?} vs {b:?} -> {score}");
            }
        }
    }
}
