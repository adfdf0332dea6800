use crate::document::relevant_docs;
use crate::error::AugmentError;
use crate::index::InvertedIndex;
use std::collections::HashSet;

/// Outcome of candidate selection: the qualifying terms and the threshold
/// that was in effect once at least two of them qualified.
#[derive(Debug)]
pub struct CandidateSelection {
    pub terms: Vec<String>,
    pub threshold: f64,
}

/// Filter the vocabulary down to terms strongly associated with relevant
/// documents: a non-query term qualifies when at least `threshold` of its
/// containing documents were judged relevant. The threshold relaxes in 0.1
/// steps until two or more terms qualify; at the floor of 0 every term
/// qualifies, so fewer than two at that point means the vocabulary itself
/// is too small and the call fails.
pub fn select_candidates(
    vocab: &HashSet<String>,
    query_terms: &HashSet<String>,
    index: &InvertedIndex,
    feedback: &[u8],
    initial_threshold: f64,
) -> Result<CandidateSelection, AugmentError> {
    let relevant: HashSet<usize> = relevant_docs(feedback).into_iter().collect();
    let mut threshold = initial_threshold;

    loop {
        let mut terms: Vec<String> = vocab
            .iter()
            .filter(|term| !query_terms.contains(*term))
            .filter(|term| {
                let docs = index.docs_containing(term.as_str());
                if docs.is_empty() {
                    return false;
                }
                let relevant_fraction =
                    docs.intersection(&relevant).count() as f64 / docs.len() as f64;
                relevant_fraction >= threshold
            })
            .cloned()
            .collect();

        if terms.len() >= 2 {
            terms.sort();
            tracing::debug!(
                candidates = terms.len(),
                threshold,
                "candidate selection settled"
            );
            return Ok(CandidateSelection { terms, threshold });
        }

        if threshold <= 0.0 {
            return Err(AugmentError::InsufficientCandidates { found: terms.len() });
        }

        // Decimal step kept exact so the effective threshold is auditable.
        threshold = ((threshold * 10.0).round() - 1.0) / 10.0;
    }
}
