//! Input sentences.

use depforge_core::TokenIndex;

/// One token of a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub form: String,
    /// Part-of-speech tag, empty if untagged.
    pub tag: String,
}

impl Token {
    pub fn new(form: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            tag: tag.into(),
        }
    }
}

/// A tokenized sentence; tokens are addressed `1..=N`.
///
/// # Example
///
/// ```
/// use depforge::Sentence;
///
/// let sentence = Sentence::from_forms(["Dogs", "bark"]);
/// assert_eq!(sentence.len(), 2);
/// assert_eq!(sentence.token(2).unwrap().form, "bark");
/// assert!(sentence.token(0).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Creates an untagged sentence from word forms.
    pub fn from_forms<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        forms.into_iter().map(|form| Token::new(form, "")).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns token `index` (1-based).
    pub fn token(&self, index: TokenIndex) -> Option<&Token> {
        index
            .checked_sub(1)
            .and_then(|position| self.tokens.get(position))
    }
}

impl FromIterator<Token> for Sentence {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}
