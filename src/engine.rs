use crate::candidates::select_candidates;
use crate::composer::{pick_appended, reorder, Appended};
use crate::document::{relevant_docs, SearchHit};
use crate::error::AugmentError;
use crate::index::InvertedIndex;
use crate::parser::{DependencyParser, NullParser};
use crate::scoring::gini_rankings;
use crate::tokenizer::Tokenizer;
use crate::weights::{add_dependency_signal, add_frequency_signal, add_proximity_signal};
use std::collections::HashSet;

/// Result of one augmentation call: the reformulated query and the term or
/// term pair that was appended to produce it.
#[derive(Debug, Clone)]
pub struct Augmentation {
    pub query: String,
    pub appended: Appended,
}

/// Query augmentation engine. Holds only read-only configuration; every
/// call builds its vocabulary, index, and rankings from scratch, so one
/// instance can serve sequential calls indefinitely.
pub struct QueryAugmenter {
    tokenizer: Tokenizer,
    parser: Box<dyn DependencyParser>,
    window_size: usize,
    initial_threshold: f64,
    frequency_weight: f64,
    proximity_weight: f64,
    dependency_weight: f64,
    append_threshold: f64,
}

impl QueryAugmenter {
    /// Engine with default configuration and no syntactic parser wired in
    /// (the dependency signal stays at zero).
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            parser: Box::new(NullParser),
            window_size: 2,
            initial_threshold: 0.6,
            frequency_weight: 1.0,
            proximity_weight: 1.0,
            dependency_weight: 1.0,
            append_threshold: 0.2,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_parser(mut self, parser: Box<dyn DependencyParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_weights(mut self, frequency: f64, proximity: f64, dependency: f64) -> Self {
        self.frequency_weight = frequency;
        self.proximity_weight = proximity;
        self.dependency_weight = dependency;
        self
    }

    pub fn with_append_threshold(mut self, threshold: f64) -> Self {
        self.append_threshold = threshold;
        self
    }

    /// Reformulate `query` from one labeled result batch.
    ///
    /// Builds the batch vocabulary and inverted index, selects candidate
    /// terms associated with the relevant documents, scores them by Gini
    /// gain plus frequency, proximity, and dependency signals, appends the
    /// top term or pair, and reorders the full term set against phrasing
    /// observed in relevant documents.
    pub fn augment(
        &self,
        query: &str,
        results: &[SearchHit],
        feedback: &[u8],
    ) -> Result<Augmentation, AugmentError> {
        if feedback.len() != results.len() {
            return Err(AugmentError::FeedbackMismatch {
                feedback: feedback.len(),
                results: results.len(),
            });
        }

        let query_terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        let query_set: HashSet<String> = query_terms.iter().cloned().collect();

        let (documents, vocab) = self.tokenizer.extract(results, &query_set);
        let index = InvertedIndex::build(&documents, &query_set, self.window_size);

        let selection =
            select_candidates(&vocab, &query_set, &index, feedback, self.initial_threshold)?;
        tracing::debug!(
            candidates = selection.terms.len(),
            threshold = selection.threshold,
            "scoring candidate terms"
        );

        // Query terms are scored alongside the candidates so the composer
        // compares everything on one scale; they are never appended.
        let mut rankings = gini_rankings(
            selection.terms.iter().chain(query_set.iter()),
            &index,
            feedback,
        );
        add_frequency_signal(&mut rankings, &index, feedback, self.frequency_weight);
        add_proximity_signal(&mut rankings, &index, feedback, self.proximity_weight);
        add_dependency_signal(
            &mut rankings,
            results,
            feedback,
            &query_set,
            self.parser.as_ref(),
            self.dependency_weight,
        );

        let appended = pick_appended(&selection.terms, &rankings, self.append_threshold);

        let mut full_terms = query_terms;
        full_terms.extend(appended.terms().iter().map(|t| t.to_string()));

        let relevant_streams: Vec<Vec<String>> = relevant_docs(feedback)
            .into_iter()
            .map(|i| {
                documents[i]
                    .title
                    .iter()
                    .chain(documents[i].summary.iter())
                    .cloned()
                    .collect()
            })
            .collect();
        let ordered = reorder(&full_terms, &relevant_streams);

        let augmentation = Augmentation {
            query: ordered.join(" "),
            appended,
        };
        tracing::info!(query = %augmentation.query, appended = %augmentation.appended, "query augmented");
        Ok(augmentation)
    }
}

impl Default for QueryAugmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<SearchHit> {
        vec![
            SearchHit::new("Per se doctrine", "The per se rule in antitrust law"),
            SearchHit::new("Per se meaning", "Definition of per se in legal usage"),
            SearchHit::new("Perse school", "A school located in Cambridge"),
        ]
    }

    #[test]
    fn test_augment_appends_new_terms() {
        let engine = QueryAugmenter::new();
        let result = engine.augment("per se", &batch(), &[1, 1, 0]).unwrap();

        let appended = result.appended.terms();
        assert!(!appended.is_empty() && appended.len() <= 2);
        for term in &appended {
            assert_ne!(*term, "per");
            assert_ne!(*term, "se");
        }
        for term in result.query.split_whitespace() {
            assert!(
                term == "per" || term == "se" || appended.contains(&term),
                "unexpected term {term}"
            );
        }
    }

    #[test]
    fn test_augment_keeps_query_terms() {
        let engine = QueryAugmenter::new();
        let result = engine.augment("per se", &batch(), &[1, 1, 0]).unwrap();
        let terms: Vec<&str> = result.query.split_whitespace().collect();
        assert!(terms.contains(&"per"));
        assert!(terms.contains(&"se"));
    }

    #[test]
    fn test_observed_phrase_orders_appended_terms() {
        // All relevant summaries phrase it "t1 t2 t3"; whichever terms are
        // appended, the composed query must follow that ordering.
        let hits = vec![
            SearchHit::new("", "t1 t2 t3 words here"),
            SearchHit::new("", "again t1 t2 t3"),
            SearchHit::new("", "unrelated content entirely"),
        ];
        let engine = QueryAugmenter::new();
        let result = engine.augment("t1 t2", &hits, &[1, 1, 0]).unwrap();
        assert!(result.query.starts_with("t1 t2"));
    }

    #[test]
    fn test_feedback_length_mismatch_rejected() {
        let engine = QueryAugmenter::new();
        let err = engine.augment("per se", &batch(), &[1, 0]).unwrap_err();
        assert!(matches!(
            err,
            AugmentError::FeedbackMismatch {
                feedback: 2,
                results: 3
            }
        ));
    }

    #[test]
    fn test_empty_batch_fails_with_insufficient_candidates() {
        let engine = QueryAugmenter::new();
        let err = engine.augment("per se", &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            AugmentError::InsufficientCandidates { found: 0 }
        ));
    }
}
