// Re-export main components
pub mod candidates;
pub mod composer;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod parser;
pub mod scoring;
pub mod search;
pub mod session;
pub mod tokenizer;
pub mod ui;
pub mod weights;

// Re-export commonly used types
pub use composer::Appended;
pub use document::SearchHit;
pub use engine::{Augmentation, QueryAugmenter};
pub use error::AugmentError;
pub use index::InvertedIndex;
pub use parser::{DependencyParser, NullParser, ParsedToken};
pub use search::{GoogleSearchClient, SearchClient};
pub use session::{precision, Session, SessionOutcome};
pub use tokenizer::Tokenizer;
pub use ui::{ConsoleCollector, FeedbackCollector};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
