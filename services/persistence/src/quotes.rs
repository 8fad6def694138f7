//! Conversation prompt quotes
//!
//! Reads fortune-format files: quotes separated by lines holding a single
//! `%`. Text after the last separator is not a quote.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Cannot read quotes file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parsed collection of prompt quotes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBook {
    quotes: Vec<String>,
}

impl QuoteBook {
    pub fn parse(text: &str) -> Self {
        let mut quotes = Vec::new();
        let mut current = String::new();

        for line in text.split_inclusive('\n') {
            if line.trim() == "%" {
                let quote = current.trim_end_matches(['\n', '\r']).to_string();
                quotes.push(quote);
                current.clear();
            } else {
                current.push_str(line);
            }
        }

        Self { quotes }
    }

    pub fn load(path: &Path) -> Result<Self, QuoteError> {
        let text = fs::read_to_string(path).map_err(|source| QuoteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Pick a quote by clock value, `quotes[unix_secs % len]`
    pub fn pick(&self, unix_secs: u64) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        let idx = (unix_secs % self.quotes.len() as u64) as usize;
        Some(self.quotes[idx].as_str())
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FORTUNES: &str = "What are you reading?\n%\nBest trip you ever took?\nAnd why?\n%\nUnterminated\n";

    #[test]
    fn test_parse_separated_quotes() {
        let book = QuoteBook::parse(FORTUNES);
        assert_eq!(book.quotes, vec!["What are you reading?", "Best trip you ever took?\nAnd why?"]);
    }

    #[test]
    fn test_separator_tolerates_whitespace() {
        let book = QuoteBook::parse("one\n  %  \ntwo\r\n%\r\n");
        assert_eq!(book.quotes, vec!["one", "two"]);
    }

    #[test]
    fn test_pick_is_modulo() {
        let book = QuoteBook::parse(FORTUNES);
        assert_eq!(book.pick(0), Some("What are you reading?"));
        assert_eq!(book.pick(3), Some("Best trip you ever took?\nAnd why?"));
        assert_eq!(book.pick(1_700_000_000), Some("What are you reading?"));
    }

    #[test]
    fn test_pick_empty_book() {
        assert_eq!(QuoteBook::parse("no separator here").pick(5), None);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prompts.txt");
        fs::write(&path, FORTUNES).unwrap();
        assert_eq!(QuoteBook::load(&path).unwrap().len(), 2);
        assert!(QuoteBook::load(&tmp.path().join("missing.txt")).is_err());
    }
}
