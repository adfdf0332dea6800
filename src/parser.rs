/// One token of a dependency-annotated parse: its normalized text, the
/// texts of its syntactic children, and whether it is the tree root.
///
/// This is a plain data contract for an external parser capability; the
/// engine never assumes anything about how the parse was produced.
#[derive(Debug, Clone, Default)]
pub struct ParsedToken {
    pub text: String,
    pub children: Vec<String>,
    pub is_root: bool,
}

impl ParsedToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
            is_root: false,
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(mut self) -> Self {
        self.is_root = true;
        self
    }
}

/// Capability consumed by the weight aggregator: turn free text into an
/// ordered, dependency-annotated token sequence. Implementations that
/// cannot parse a text should return an empty sequence.
pub trait DependencyParser {
    fn parse(&self, text: &str) -> Vec<ParsedToken>;
}

/// Parser that yields no tokens, leaving the dependency signal at zero.
/// Used when no syntactic parser is wired in.
pub struct NullParser;

impl DependencyParser for NullParser {
    fn parse(&self, _text: &str) -> Vec<ParsedToken> {
        Vec::new()
    }
}
