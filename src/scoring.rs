use crate::document::relevant_docs;
use crate::index::InvertedIndex;
use std::collections::{HashMap, HashSet};

/// Guards the zero-denominator case for empty partitions.
const EPS: f64 = 1e-7;

/// Gini impurity of a two-class (relevant/irrelevant) document set.
/// 0 for a pure set, up to 0.5 for a maximally mixed one.
pub fn gini(relevant: usize, irrelevant: usize) -> f64 {
    let total = relevant as f64 + irrelevant as f64 + EPS;
    let p_relevant = relevant as f64 / total;
    let p_irrelevant = irrelevant as f64 / total;
    1.0 - p_relevant * p_relevant - p_irrelevant * p_irrelevant
}

/// Reduction in impurity obtained by splitting the batch on presence of
/// `term`. Higher gain means the term better separates relevant documents
/// from irrelevant ones.
pub fn gini_gain(term: &str, index: &InvertedIndex, feedback: &[u8]) -> f64 {
    let n = feedback.len();
    if n == 0 {
        return 0.0;
    }
    let relevant: HashSet<usize> = relevant_docs(feedback).into_iter().collect();

    let with_term = index.docs_containing(term);
    let relevant_with = with_term.intersection(&relevant).count();
    let irrelevant_with = with_term.len() - relevant_with;

    let without_term = n - with_term.len();
    let relevant_without = relevant.len() - relevant_with;
    let irrelevant_without = without_term - relevant_without;

    let w1 = with_term.len() as f64 / n as f64;
    let w2 = 1.0 - w1;

    let base = gini(relevant.len(), n - relevant.len());
    let split = w1 * gini(relevant_with, irrelevant_with)
        + w2 * gini(relevant_without, irrelevant_without);

    base - split
}

/// Gini-gain scores for a set of terms, the first stage of the additive
/// ranking accumulator.
pub fn gini_rankings<'a, I>(
    terms: I,
    index: &InvertedIndex,
    feedback: &[u8],
) -> HashMap<String, f64>
where
    I: IntoIterator<Item = &'a String>,
{
    terms
        .into_iter()
        .map(|term| (term.clone(), gini_gain(term, index, feedback)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TokenizedDoc;

    fn doc(tokens: &[&str]) -> TokenizedDoc {
        TokenizedDoc {
            title: Vec::new(),
            summary: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn build(docs: &[TokenizedDoc]) -> InvertedIndex {
        InvertedIndex::build(docs, &HashSet::new(), 2)
    }

    #[test]
    fn test_gini_pure_and_mixed() {
        assert!(gini(4, 0) < 1e-6);
        assert!(gini(0, 4) < 1e-6);
        assert!((gini(2, 2) - 0.5).abs() < 1e-6);
        // Empty partition is smoothed, not a division error.
        assert!(gini(0, 0).is_finite());
    }

    #[test]
    fn test_independent_term_has_near_zero_gain() {
        // "even" occurs in one relevant and one irrelevant document, the
        // same relevant ratio as the whole batch.
        let docs = vec![doc(&["even"]), doc(&["even"]), doc(&["other"]), doc(&["other"])];
        let index = build(&docs);
        let gain = gini_gain("even", &index, &[1, 0, 1, 0]);
        assert!(gain.abs() < 1e-6, "gain was {gain}");
    }

    #[test]
    fn test_relevant_only_term_beats_uniform_term() {
        let docs = vec![
            doc(&["pure", "both"]),
            doc(&["pure", "both"]),
            doc(&["both"]),
            doc(&["both"]),
        ];
        let index = build(&docs);
        let feedback = [1, 1, 0, 0];
        let pure_gain = gini_gain("pure", &index, &feedback);
        let uniform_gain = gini_gain("both", &index, &feedback);
        assert!(pure_gain > uniform_gain);
        assert!(pure_gain > 0.0);
    }

    #[test]
    fn test_two_document_scenario() {
        // "x" only in the relevant document, "y" in both.
        let docs = vec![doc(&["x", "y"]), doc(&["y"])];
        let index = build(&docs);
        let feedback = [1, 0];
        let x_gain = gini_gain("x", &index, &feedback);
        let y_gain = gini_gain("y", &index, &feedback);
        assert!(x_gain > 0.0);
        assert!(x_gain > y_gain);
    }

    #[test]
    fn test_term_absent_from_batch_gets_degenerate_split() {
        let docs = vec![doc(&["x"]), doc(&["y"])];
        let index = build(&docs);
        let gain = gini_gain("missing", &index, &[1, 0]);
        assert!(gain.abs() < 1e-6);
    }

    #[test]
    fn test_empty_batch_has_zero_gain() {
        let index = build(&[]);
        assert_eq!(gini_gain("anything", &index, &[]), 0.0);
    }

    #[test]
    fn test_degenerate_partition_all_relevant() {
        let docs = vec![doc(&["x"]), doc(&["y"])];
        let index = build(&docs);
        let gain = gini_gain("x", &index, &[1, 1]);
        assert!(gain.is_finite());
        assert!(gain.abs() < 1e-6);
    }
}
