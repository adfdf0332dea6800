//! Signals layered on top of the Gini-gain rankings. Each stage adds a
//! log-damped bonus to the shared score accumulator; the stages are
//! independent and order-insensitive.

use crate::document::{relevant_docs, SearchHit};
use crate::index::InvertedIndex;
use crate::parser::DependencyParser;
use std::collections::{HashMap, HashSet};

/// Add `weight * ln(1 + f)` per term, where `f` is the term's summed
/// occurrence count across relevant documents.
pub fn add_frequency_signal(
    rankings: &mut HashMap<String, f64>,
    index: &InvertedIndex,
    feedback: &[u8],
    weight: f64,
) {
    let relevant = relevant_docs(feedback);
    for (term, score) in rankings.iter_mut() {
        let total: usize = match index.postings(term) {
            Some(postings) => relevant
                .iter()
                .filter_map(|doc| postings.get(doc))
                .map(|p| p.frequency)
                .sum(),
            None => 0,
        };
        *score += weight * (1.0 + total as f64).ln();
    }
}

/// Add `weight * ln(1 + c)` per term, where `c` counts the relevant
/// documents whose stored proximity flag for the term is set.
pub fn add_proximity_signal(
    rankings: &mut HashMap<String, f64>,
    index: &InvertedIndex,
    feedback: &[u8],
    weight: f64,
) {
    let relevant = relevant_docs(feedback);
    for (term, score) in rankings.iter_mut() {
        let close: usize = match index.postings(term) {
            Some(postings) => relevant
                .iter()
                .filter_map(|doc| postings.get(doc))
                .filter(|p| p.near_query)
                .count(),
            None => 0,
        };
        *score += weight * (1.0 + close as f64).ln();
    }
}

/// Add `weight * ln(1 + c)` per term, where `c` counts syntactic links to
/// query terms across the parses of relevant summaries: a term is counted
/// once for each time it is a child of a query term, and once for each
/// time it is a sibling of a query term under the sentence root.
pub fn add_dependency_signal(
    rankings: &mut HashMap<String, f64>,
    results: &[SearchHit],
    feedback: &[u8],
    query_terms: &HashSet<String>,
    parser: &dyn DependencyParser,
    weight: f64,
) {
    let mut counters: HashMap<String, f64> = rankings.keys().map(|t| (t.clone(), 0.0)).collect();

    for doc in relevant_docs(feedback) {
        for token in parser.parse(&results[doc].summary) {
            let text = normalize(&token.text);
            if query_terms.contains(&text) {
                bump_ranked_children(&token.children, &mut counters);
            }
            if token.is_root
                && token
                    .children
                    .iter()
                    .any(|child| query_terms.contains(&normalize(child)))
            {
                bump_ranked_children(&token.children, &mut counters);
            }
        }
    }

    for (term, score) in rankings.iter_mut() {
        *score += weight * (1.0 + counters[term]).ln();
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn bump_ranked_children(children: &[String], counters: &mut HashMap<String, f64>) {
    for child in children {
        if let Some(count) = counters.get_mut(&normalize(child)) {
            *count += 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{NullParser, ParsedToken};
    use crate::tokenizer::TokenizedDoc;

    fn doc(tokens: &[&str]) -> TokenizedDoc {
        TokenizedDoc {
            title: Vec::new(),
            summary: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn rankings_for(terms: &[&str]) -> HashMap<String, f64> {
        terms.iter().map(|t| (t.to_string(), 0.0)).collect()
    }

    #[test]
    fn test_frequency_signal_sums_relevant_docs_only() {
        let docs = vec![doc(&["cat", "cat"]), doc(&["cat", "cat", "cat"])];
        let index = InvertedIndex::build(&docs, &HashSet::new(), 2);
        let mut rankings = rankings_for(&["cat"]);

        add_frequency_signal(&mut rankings, &index, &[1, 0], 1.0);
        // Only the first (relevant) document's two occurrences count.
        assert!((rankings["cat"] - 3.0_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_signal_zero_when_absent_from_relevant() {
        let docs = vec![doc(&["other"]), doc(&["cat"])];
        let index = InvertedIndex::build(&docs, &HashSet::new(), 2);
        let mut rankings = rankings_for(&["cat"]);

        add_frequency_signal(&mut rankings, &index, &[1, 0], 1.0);
        assert_eq!(rankings["cat"], 0.0);
    }

    #[test]
    fn test_proximity_signal_counts_flagged_relevant_docs() {
        let query: HashSet<String> = ["query".to_string()].into_iter().collect();
        let docs = vec![
            doc(&["query", "cat"]),
            doc(&["query", "cat"]),
            doc(&["cat"]),
        ];
        let index = InvertedIndex::build(&docs, &query, 2);
        let mut rankings = rankings_for(&["cat"]);

        // Doc 1 is flagged but irrelevant; doc 2 is relevant but far.
        add_proximity_signal(&mut rankings, &index, &[1, 0, 1], 1.0);
        assert!((rankings["cat"] - 2.0_f64.ln()).abs() < 1e-9);
    }

    struct FixedParser(Vec<ParsedToken>);

    impl DependencyParser for FixedParser {
        fn parse(&self, _text: &str) -> Vec<ParsedToken> {
            self.0.clone()
        }
    }

    #[test]
    fn test_dependency_signal_counts_children_of_query_terms() {
        let query: HashSet<String> = ["court".to_string()].into_iter().collect();
        let parser = FixedParser(vec![
            ParsedToken::new("court").with_children(["supreme", "unranked"]),
        ]);
        let results = vec![SearchHit::new("", "irrelevant parse")];
        let mut rankings = rankings_for(&["supreme"]);

        add_dependency_signal(&mut rankings, &results, &[1], &query, &parser, 1.0);
        assert!((rankings["supreme"] - 2.0_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_dependency_signal_counts_root_siblings_of_query_terms() {
        let query: HashSet<String> = ["court".to_string()].into_iter().collect();
        let parser = FixedParser(vec![
            ParsedToken::new("ruled").with_children(["court", "appeal"]).root(),
        ]);
        let results = vec![SearchHit::new("", "")];
        let mut rankings = rankings_for(&["appeal"]);

        add_dependency_signal(&mut rankings, &results, &[1], &query, &parser, 1.0);
        assert!((rankings["appeal"] - 2.0_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_dependency_signal_skips_irrelevant_docs() {
        let query: HashSet<String> = ["court".to_string()].into_iter().collect();
        let parser = FixedParser(vec![
            ParsedToken::new("court").with_children(["supreme"]),
        ]);
        let results = vec![SearchHit::new("", "")];
        let mut rankings = rankings_for(&["supreme"]);

        add_dependency_signal(&mut rankings, &results, &[0], &query, &parser, 1.0);
        assert_eq!(rankings["supreme"], 0.0);
    }

    #[test]
    fn test_null_parser_leaves_scores_unchanged() {
        let query: HashSet<String> = ["court".to_string()].into_iter().collect();
        let results = vec![SearchHit::new("", "some summary")];
        let mut rankings = rankings_for(&["supreme"]);

        add_dependency_signal(&mut rankings, &results, &[1], &query, &NullParser, 1.0);
        assert_eq!(rankings["supreme"], 0.0);
    }
}
