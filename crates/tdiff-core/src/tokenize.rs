//! Word splitters used by the word-level expander.

/// Splits a line into word tokens.
///
/// Any `Fn(&str) -> Vec<String>` closure that is `Send + Sync` is a tokenizer.
pub trait Tokenizer: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn split(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Splits on runs of whitespace, dropping empty tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Whitespace;

impl Tokenizer for Whitespace {
    fn split(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_owned).collect()
    }
}

/// One token per character, whitespace excluded. Suited to scripts that do
/// not separate words with spaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Characters;

impl Tokenizer for Characters {
    fn split(&self, text: &str) -> Vec<String> {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect()
    }
}
