use serde::{Deserialize, Serialize};

/// One retrieved search result. Its position in the batch list is the
/// document index shared with the feedback vector and the inverted index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            url: None,
            title: title.into(),
            summary: summary.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Document indices judged relevant (feedback value 1).
pub fn relevant_docs(feedback: &[u8]) -> Vec<usize> {
    feedback
        .iter()
        .enumerate()
        .filter(|(_, &f)| f == 1)
        .map(|(i, _)| i)
        .collect()
}
