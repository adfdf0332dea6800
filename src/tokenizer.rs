use crate::document::SearchHit;
use crate::error::AugmentError;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

lazy_static::lazy_static! {
    /// Contraction suffixes first so "don't" splits into "don" + "'t",
    /// then letter runs, then digit runs. Text is lower-cased and its
    /// curly apostrophes normalized before this pattern is applied.
    static ref WORD_PATTERN: Regex =
        Regex::new(r"'s|'t|'re|'ve|'m|'ll|'d|\p{L}+|\p{N}+").unwrap();

    static ref STOPWORDS: HashSet<&'static str> = {
        [
            "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
            "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being",
            "below", "between", "both", "but", "by", "can't", "cannot", "could", "couldn't",
            "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down", "during",
            "each", "few", "for", "from", "further", "had", "hadn't", "has", "hasn't",
            "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
            "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i",
            "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's",
            "its", "itself", "let's", "me", "more", "most", "mustn't", "my", "myself",
            "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other", "ought",
            "our", "ours", "ourselves", "out", "over", "own", "same", "shan't", "she",
            "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
            "than", "that", "that's", "the", "their", "theirs", "them", "themselves",
            "then", "there", "there's", "these", "they", "they'd", "they'll", "they're",
            "they've", "this", "those", "through", "to", "too", "under", "until", "up",
            "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were",
            "weren't", "what", "what's", "when", "when's", "where", "where's", "which",
            "while", "who", "who's", "whom", "why", "why's", "with", "won't", "would",
            "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
            "yourself", "yourselves", "'s", "'t", "'re", "'ve", "'m", "'ll", "'d",
        ]
        .iter()
        .copied()
        .collect()
    };
}

/// Token streams of one result document, title and summary kept separate so
/// the index builder can insert a positional gap between them.
#[derive(Debug, Clone)]
pub struct TokenizedDoc {
    pub title: Vec<String>,
    pub summary: Vec<String>,
}

#[derive(Debug)]
pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Tokenizer {
    /// Tokenizer with the built-in English stop-word list.
    pub fn new() -> Self {
        Self {
            stop_words: STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Tokenizer with a stop-word list loaded from a file, one word per line.
    pub fn from_stop_words_file<P: AsRef<Path>>(path: P) -> Result<Self, AugmentError> {
        let contents = fs::read_to_string(&path).map_err(|source| AugmentError::StopWords {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let stop_words = contents
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Ok(Self { stop_words })
    }

    /// Split text into lower-cased letter runs, digit runs, and contraction
    /// suffixes. No filtering.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.to_lowercase().replace('\u{2019}', "'");
        WORD_PATTERN
            .find_iter(&normalized)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Tokenize and drop stop words. A token equal to a current query term
    /// is always kept, whether or not it is a stop word.
    pub fn analyze(&self, text: &str, query_terms: &HashSet<String>) -> Vec<String> {
        self.tokenize(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t) || query_terms.contains(t))
            .collect()
    }

    /// Tokenize a whole result batch: per-document title/summary token
    /// streams plus the batch vocabulary.
    pub fn extract(
        &self,
        results: &[SearchHit],
        query_terms: &HashSet<String>,
    ) -> (Vec<TokenizedDoc>, HashSet<String>) {
        let mut documents = Vec::with_capacity(results.len());
        let mut vocab = HashSet::new();

        for hit in results {
            let title = self.analyze(&hit.title, query_terms);
            let summary = self.analyze(&hit.summary, query_terms);
            vocab.extend(title.iter().cloned());
            vocab.extend(summary.iter().cloned());
            documents.push(TokenizedDoc { title, summary });
        }

        (documents, vocab)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
