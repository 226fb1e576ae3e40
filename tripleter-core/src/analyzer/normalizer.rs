//! Case normalization applied before tokenization in case-insensitive mode.

#[rustfmt::skip]
const LOWERCASE_TABLE: [u8; 128] = [
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f,
    0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,0x1a,0x1b,0x1c,0x1d,0x1e,0x1f,
    0x20,0x21,0x22,0x23,0x24,0x25,0x26,0x27,0x28,0x29,0x2a,0x2b,0x2c,0x2d,0x2e,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x3a,0x3b,0x3c,0x3d,0x3e,0x3f,
    0x40,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x5b,0x5c,0x5d,0x5e,0x5f,
    0x60,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x7b,0x7c,0x7d,0x7e,0x7f,
];

/// Unicode-aware lowercasing with an ASCII fast path.
///
/// Unlike a full text normalizer this never touches whitespace or
/// punctuation: separators must survive so the tokenizer still sees them,
/// and character positions other than case stay as they were.
///
/// # Examples
///
/// ```
/// use tripleter_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.lowercase("Hello, МИР!"), "hello, мир!");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a new normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Lowercases `input` into an existing buffer.
    ///
    /// Clears the buffer first and reuses its capacity, growing only when
    /// the lowercase form is longer than the capacity.
    pub fn lowercase_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let mut rest = input;
        while !rest.is_empty() {
            let ascii_len = rest.bytes().take_while(u8::is_ascii).count();
            if ascii_len > 0 {
                out.extend(
                    rest.as_bytes()[..ascii_len]
                        .iter()
                        .map(|&b| LOWERCASE_TABLE[b as usize] as char),
                );
                rest = &rest[ascii_len..];
                continue;
            }

            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                out.extend(ch.to_lowercase());
            }
            rest = chars.as_str();
        }
    }

    /// Lowercases `input` and returns a new String.
    #[inline]
    pub fn lowercase(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.lowercase_into(input, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(input: &str) -> String {
        TextNormalizer::new().lowercase(input)
    }

    #[test]
    fn ascii_basic_lowercase() {
        assert_eq!(lower("HELLO"), "hello");
        assert_eq!(lower("HeLlO"), "hello");
        assert_eq!(lower("123 ABC!"), "123 abc!");
    }

    #[test]
    fn ascii_full_alphabet() {
        let upper: String = (b'A'..=b'Z').map(|b| b as char).collect();
        let lower_case: String = (b'a'..=b'z').map(|b| b as char).collect();
        assert_eq!(lower(&upper), lower_case);
    }

    #[test]
    fn separators_untouched() {
        let input = "a, b. c: d! e? \"f\"; *g* (h) «i» j… k–l-m 'n'\n\t\r";
        assert_eq!(lower(input), input);
    }

    #[test]
    fn whitespace_not_collapsed() {
        assert_eq!(lower("  HELLO   WORLD  "), "  hello   world  ");
    }

    #[test]
    fn unicode_lowercase() {
        assert_eq!(lower("ПРИВЕТ"), "привет");
        assert_eq!(lower("ÜNITED"), "ünited");
        assert_eq!(lower("ΆΈΉ"), "άέή");
        assert_eq!(lower("ЁЖЗ"), "ёжз");
    }

    #[test]
    fn mixed_ascii_and_unicode_runs() {
        assert_eq!(lower("ABC Съешь ЖЕ ещё DEF"), "abc съешь же ещё def");
    }

    #[test]
    fn uncased_scripts_pass_through() {
        assert_eq!(lower("你好世界"), "你好世界");
        assert_eq!(lower("مرحبا"), "مرحبا");
        assert_eq!(lower("Hello 🌍"), "hello 🌍");
    }

    #[test]
    fn expanding_lowercase_is_valid_utf8() {
        let result = lower("İstanbul");
        assert!(result.starts_with('i'));
        assert!(result.ends_with("stanbul"));
    }

    #[test]
    fn lowercase_into_reuses_capacity() {
        let normalizer = TextNormalizer::new();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        normalizer.lowercase_into("HELLO", &mut buf);
        assert_eq!(buf, "hello");
        assert_eq!(buf.capacity(), cap);

        normalizer.lowercase_into("WORLD", &mut buf);
        assert_eq!(buf, "world");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn empty_input() {
        assert_eq!(lower(""), "");
    }

    #[test]
    fn idempotent() {
        for s in ["Hello World", "ÜBER Café", "ПрИвЕт"] {
            let once = lower(s);
            assert_eq!(lower(&once), once);
        }
    }
}
