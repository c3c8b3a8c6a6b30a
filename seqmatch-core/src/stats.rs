//! Pairwise statistics over an analysis snapshot.
//!
//! Read-only consumers: everything here folds over the snapshot's matches
//! and tokenized texts without touching them.

use std::cmp::Ordering;

use serde::Serialize;

use crate::analysis::Analysis;

/// Aggregated match statistics for one pair of texts, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairSummary {
    /// Identifier of the canonically first text.
    pub first_identifier: String,
    /// Identifier of the canonically second text.
    pub second_identifier: String,
    /// Token count of the first text.
    pub first_token_count: usize,
    /// Token count of the second text.
    pub second_token_count: usize,
    /// Sum of all match lengths of the pair.
    pub total_match_length: usize,
    /// Length of the longest match of the pair.
    pub longest_match_length: usize,
}

impl PairSummary {
    /// Symmetric similarity `2m / (a + b)`.
    pub fn symmetric_similarity(&self) -> f64 {
        let combined = self.first_token_count + self.second_token_count;
        if combined == 0 || self.total_match_length == 0 {
            return 0.0;
        }
        (2.0 * self.total_match_length as f64) / combined as f64
    }

    /// Similarity with respect to the first text, `m / a`.
    pub fn similarity_to_first(&self) -> f64 {
        self.similarity(self.first_token_count)
    }

    /// Similarity with respect to the second text, `m / b`.
    pub fn similarity_to_second(&self) -> f64 {
        self.similarity(self.second_token_count)
    }

    /// The larger of the two one-sided similarities.
    pub fn maximum_similarity(&self) -> f64 {
        self.similarity_to_first().max(self.similarity_to_second())
    }

    /// The smaller of the two one-sided similarities.
    pub fn minimum_similarity(&self) -> f64 {
        self.similarity_to_first().min(self.similarity_to_second())
    }

    fn similarity(&self, token_count: usize) -> f64 {
        if token_count == 0 || self.total_match_length == 0 {
            return 0.0;
        }
        self.total_match_length as f64 / token_count as f64
    }
}

/// Builds one summary per unordered text pair, in first-seen pair order.
/// Fewer than two texts yield an empty list.
pub fn collect_summaries(analysis: &Analysis) -> Vec<PairSummary> {
    let texts = analysis.texts();
    if texts.len() < 2 {
        return Vec::new();
    }

    let mut summaries = Vec::with_capacity(texts.len() * (texts.len() - 1) / 2);
    for first in 0..texts.len() {
        for second in first + 1..texts.len() {
            summaries.push(PairSummary {
                first_identifier: texts[first].identifier.clone(),
                second_identifier: texts[second].identifier.clone(),
                first_token_count: texts[first].tokens.len(),
                second_token_count: texts[second].tokens.len(),
                total_match_length: 0,
                longest_match_length: 0,
            });
        }
    }

    for m in analysis.matches() {
        if let Some(summary) = summaries.iter_mut().find(|summary| {
            summary.first_identifier == m.first_id && summary.second_identifier == m.second_id
        }) {
            summary.total_match_length += m.length;
            summary.longest_match_length = summary.longest_match_length.max(m.length);
        }
    }
    summaries
}

/// Metrics available when listing pair statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMetric {
    /// Symmetric similarity `2m / (a + b)`.
    Avg,
    /// Maximum one-sided similarity.
    Max,
    /// Minimum one-sided similarity.
    Min,
    /// Length of the longest match.
    Long,
    /// Sum of all match lengths.
    Len,
}

impl ListMetric {
    /// The metric value of a summary.
    pub fn extract(&self, summary: &PairSummary) -> f64 {
        match self {
            Self::Avg => summary.symmetric_similarity(),
            Self::Max => summary.maximum_similarity(),
            Self::Min => summary.minimum_similarity(),
            Self::Long => summary.longest_match_length as f64,
            Self::Len => summary.total_match_length as f64,
        }
    }

    /// Whether values of this metric are ratios to be shown as percentages.
    pub fn is_percentage(&self) -> bool {
        matches!(self, Self::Avg | Self::Max | Self::Min)
    }

    /// Parses a metric name, case-insensitive and trimmed. `None` when the
    /// name matches no metric.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "avg" => Some(Self::Avg),
            "max" => Some(Self::Max),
            "min" => Some(Self::Min),
            "long" => Some(Self::Long),
            "len" => Some(Self::Len),
            _ => None,
        }
    }
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest metric value first.
    Asc,
    /// Largest metric value first.
    Desc,
}

impl SortOrder {
    /// Parses a sort order name, case-insensitive and trimmed.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Sorts summaries by metric value in the given order; ties break by first,
/// then second identifier, always ascending.
pub fn sort_summaries(summaries: &mut [PairSummary], metric: ListMetric, order: SortOrder) {
    summaries.sort_by(|a, b| {
        let mut ordering = metric
            .extract(a)
            .partial_cmp(&metric.extract(b))
            .unwrap_or(Ordering::Equal);
        if order == SortOrder::Desc {
            ordering = ordering.reverse();
        }
        ordering
            .then_with(|| a.first_identifier.cmp(&b.first_identifier))
            .then_with(|| a.second_identifier.cmp(&b.second_identifier))
    });
}

/// Number of histogram classes, each 10 percentage points wide.
pub const HISTOGRAM_CLASSES: usize = 10;

/// Buckets the pairs' percentage values of a percentage metric into ten
/// classes; values at or above 100% land in the top class.
pub fn histogram_buckets(summaries: &[PairSummary], metric: ListMetric) -> [usize; HISTOGRAM_CLASSES] {
    let mut buckets = [0usize; HISTOGRAM_CLASSES];
    for summary in summaries {
        let percent = metric.extract(summary) * 100.0;
        buckets[bucket_index(percent)] += 1;
    }
    buckets
}

fn bucket_index(percent: f64) -> usize {
    if percent <= 0.0 {
        return 0;
    }
    let index = (percent / 10.0) as usize;
    index.min(HISTOGRAM_CLASSES - 1)
}

/// Similarity metric selectable inside the editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMetric {
    /// `2m / (a + b)`.
    Symmetric,
    /// `m / a`.
    First,
    /// `m / b`.
    Second,
    /// `max(m / a, m / b)`.
    Maximum,
    /// `min(m / a, m / b)`.
    Minimum,
}

impl ComparisonMetric {
    /// Computes the selected similarity from the total matched length and the
    /// token counts of both texts. Empty texts and empty match sets give 0.
    pub fn compute(&self, total_length: usize, first_count: usize, second_count: usize) -> f64 {
        let to_first = ratio(total_length, first_count);
        let to_second = ratio(total_length, second_count);
        match self {
            Self::Symmetric => {
                let combined = first_count + second_count;
                if combined == 0 {
                    0.0
                } else {
                    (2.0 * total_length as f64) / combined as f64
                }
            }
            Self::First => to_first,
            Self::Second => to_second,
            Self::Maximum => to_first.max(to_second),
            Self::Minimum => to_first.min(to_second),
        }
    }

    /// Parses a metric name or one of its aliases, case-insensitive and
    /// trimmed.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "avg" | "average" | "symmetric" | "symmetrical" => Some(Self::Symmetric),
            "first" | "left" => Some(Self::First),
            "second" | "right" => Some(Self::Second),
            "max" | "maximum" => Some(Self::Maximum),
            "min" | "minimum" => Some(Self::Minimum),
            _ => None,
        }
    }
}

fn ratio(length: usize, token_count: usize) -> f64 {
    if token_count == 0 || length == 0 {
        return 0.0;
    }
    length as f64 / token_count as f64
}
