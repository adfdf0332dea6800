use crate::tokenizer::TokenizedDoc;
use std::collections::{HashMap, HashSet};

/// Occurrence profile of one term in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Occurrence count in the document's token stream.
    pub frequency: usize,
    /// Whether an occurrence of the term fell within the proximity window
    /// of a query term. Holds the value from the last scanned occurrence:
    /// a later occurrence far from any query term overwrites an earlier
    /// close one. Kept as observed in the reference behavior.
    pub near_query: bool,
}

/// Inverted index over one result batch: term -> document index -> posting.
/// A term's key set is exactly the documents containing it, never empty.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<usize, Posting>>,
}

impl InvertedIndex {
    /// Index a tokenized batch. Each document's stream is its title tokens,
    /// then `window` sentinel positions, then its summary tokens; sentinels
    /// are never indexed but occupy positions, so a proximity window never
    /// spans from title into summary or back.
    pub fn build(
        documents: &[TokenizedDoc],
        query_terms: &HashSet<String>,
        window: usize,
    ) -> Self {
        let mut postings: HashMap<String, HashMap<usize, Posting>> = HashMap::new();

        for (doc_id, doc) in documents.iter().enumerate() {
            let stream: Vec<Option<&str>> = doc
                .title
                .iter()
                .map(|t| Some(t.as_str()))
                .chain(std::iter::repeat(None).take(window))
                .chain(doc.summary.iter().map(|t| Some(t.as_str())))
                .collect();

            for (pos, slot) in stream.iter().enumerate() {
                let Some(term) = slot else { continue };
                let posting = postings
                    .entry((*term).to_string())
                    .or_default()
                    .entry(doc_id)
                    .or_insert(Posting {
                        frequency: 0,
                        near_query: false,
                    });
                posting.frequency += 1;
                posting.near_query = query_term_in_window(&stream, pos, query_terms, window);
            }
        }

        Self { postings }
    }

    /// Per-document postings for a term, if the term occurs in the batch.
    pub fn postings(&self, term: &str) -> Option<&HashMap<usize, Posting>> {
        self.postings.get(term)
    }

    /// Indices of the documents containing a term.
    pub fn docs_containing(&self, term: &str) -> HashSet<usize> {
        self.postings
            .get(term)
            .map(|docs| docs.keys().copied().collect())
            .unwrap_or_default()
    }
}

/// True iff any non-sentinel position within `window` of `pos` (excluding
/// `pos` itself) holds a query term.
fn query_term_in_window(
    stream: &[Option<&str>],
    pos: usize,
    query_terms: &HashSet<String>,
    window: usize,
) -> bool {
    let lo = pos.saturating_sub(window);
    let hi = (pos + window).min(stream.len().saturating_sub(1));
    (lo..=hi).any(|i| {
        i != pos && matches!(stream[i], Some(t) if query_terms.contains(t))
    })
}
