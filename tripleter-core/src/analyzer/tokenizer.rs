//! Word Tokenizer Module
//!
//! Splits text into words on a fixed set of separator characters. It's the
//! first stage of the word-partitioned strategies: the words it produces are
//! the units of parallel work.
//!
//! ## What It Does
//!
//! Given input like `"Hello, world... (again)"`, it emits each maximal run of
//! non-separator characters with its position:
//!
//! ```ignore
//! ("Hello", 0)
//! ("world", 1)
//! ("again", 2)
//! ```
//!
//! ## Key Features
//!
//! - **Zero Allocation**: Words are slices of the original string
//! - **Lazy**: [`Tokenizer::words`] is an iterator, nothing is collected up front
//! - **No Case Folding**: lowercase the input first if you need it
//!
//! ## Separators
//!
//! The default set is [`SEPARATORS`]: space, comma, period, colon, bang,
//! question mark, quotes, semicolon, asterisk, parentheses, guillemets,
//! ellipsis, dashes, apostrophe, newline, tab and carriage return. Empty
//! words between adjacent separators are dropped.

use core::str;

/// Characters that end a word.
pub const SEPARATORS: &[char] = &[
    ' ', ',', '.', ':', '!', '?', '"', ';', '*', '(', ')', '»', '«', '…', '–', '-', '\'', '\n',
    '\t', '\r',
];

/// Splits text into words.
///
/// ## Example
///
/// ```
/// use tripleter_core::analyzer::Tokenizer;
///
/// let tokenizer = Tokenizer::new();
/// let words: Vec<&str> = tokenizer.words("one, two; «three»").collect();
///
/// assert_eq!(words, ["one", "two", "three"]);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Tokenizer {
    separators: &'static [char],
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Creates a tokenizer using [`SEPARATORS`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            separators: SEPARATORS,
        }
    }

    /// Creates a tokenizer with a custom separator set.
    #[inline]
    pub const fn with_separators(separators: &'static [char]) -> Self {
        Self { separators }
    }

    /// The separator set this tokenizer splits on.
    #[inline]
    pub const fn separators(&self) -> &'static [char] {
        self.separators
    }

    /// Returns a lazy iterator over the non-empty words of `text`.
    #[inline]
    pub fn words<'t>(&self, text: &'t str) -> Words<'t> {
        Words {
            inner: text.split(self.separators),
        }
    }
}

/// Iterator returned by [`Tokenizer::words`].
#[derive(Clone)]
pub struct Words<'t> {
    inner: str::Split<'t, &'static [char]>,
}

impl<'t> Iterator for Words<'t> {
    type Item = &'t str;

    #[inline]
    fn next(&mut self) -> Option<&'t str> {
        self.inner.by_ref().find(|word| !word.is_empty())
    }
}

impl core::iter::FusedIterator for Words<'_> {}

/// Splits `text` into words with the default separator set.
pub fn split_into_words(text: &str) -> Vec<&str> {
    Tokenizer::new().words(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word() {
        assert_eq!(split_into_words("hello"), ["hello"]);
    }

    #[test]
    fn splits_on_every_separator() {
        for &sep in SEPARATORS {
            let input = format!("abc{sep}def");
            assert_eq!(split_into_words(&input), ["abc", "def"], "separator {sep:?}");
        }
    }

    #[test]
    fn empty_words_are_dropped() {
        assert_eq!(split_into_words("  hello,,  world!!  "), ["hello", "world"]);
        assert_eq!(split_into_words("...—"), ["—"]); // em dash is not a separator
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(split_into_words("").is_empty());
        assert!(split_into_words(" ,.;\n\t\r").is_empty());
    }

    #[test]
    fn digits_and_symbols_stay_in_words() {
        assert_eq!(split_into_words("a1b cd!"), ["a1b", "cd"]);
        assert_eq!(split_into_words("x_y#z"), ["x_y#z"]);
    }

    #[test]
    fn unicode_words() {
        assert_eq!(
            split_into_words("«Съешь же ещё» – сказал…"),
            ["Съешь", "же", "ещё", "сказал"]
        );
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(split_into_words("Hello WORLD"), ["Hello", "WORLD"]);
    }

    #[test]
    fn words_come_in_input_order() {
        let words: Vec<&str> = Tokenizer::new().words("the quick, brown fox").collect();
        assert_eq!(words, ["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn words_are_slices_of_input() {
        let input = String::from("hello world");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        for word in Tokenizer::new().words(&input) {
            let ptr = word.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        }
    }

    #[test]
    fn custom_separators() {
        let tokenizer = Tokenizer::with_separators(&['|']);
        let words: Vec<&str> = tokenizer.words("a b|c||d").collect();
        assert_eq!(words, ["a b", "c", "d"]);
        assert_eq!(tokenizer.separators(), &['|']);
    }

    #[test]
    fn tokenizer_is_reusable() {
        let t = Tokenizer::new();
        assert_eq!(t.words("hello world").count(), 2);
        assert_eq!(t.words("one two three").count(), 3);
    }

    #[test]
    fn words_iterator_restarts_from_clone() {
        let words = Tokenizer::new().words("a b c");
        let first: Vec<&str> = words.clone().collect();
        let second: Vec<&str> = words.collect();
        assert_eq!(first, second);
    }
}
