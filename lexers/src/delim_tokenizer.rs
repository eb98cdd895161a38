#![deny(warnings)]

use crate::scanner::Scanner;

/// Splits input on each delimiter. Blanks around tokens are trimmed and
/// delimiters are either dropped or emitted as tokens of their own.
pub struct DelimTokenizer<I: Iterator<Item=char>> {
    src: Scanner<I>,
    delims: Vec<char>,
    remove: bool,
}

impl<'a> DelimTokenizer<std::str::Chars<'a>> {
    pub fn new(src: &'a str, delims: &str, remove: bool) -> Self {
        DelimTokenizer {
            src: Scanner::new(src.chars()),
            delims: delims.chars().collect(),
            remove,
        }
    }

    /// Split a sentence into words on blanks.
    pub fn words(src: &'a str) -> Self {
        DelimTokenizer::new(src, " \t\r\n", true)
    }
}

impl<I: Iterator<Item=char>> Iterator for DelimTokenizer<I> {
    type Item = String;
    fn next(&mut self) -> Option<Self::Item> {
        let delims = &self.delims;
        loop {
            self.src.skip_all(|c| c.is_whitespace() && !delims.contains(c));
            self.src.ignore();
            if self.src.skip_all(|c| !delims.contains(c)) {
                return Some(self.src.extract_string().trim_end().to_string());
            }
            self.src.accept_any(delims)?;
            let delim = self.src.extract_string();
            if !self.remove {
                return Some(delim);
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::DelimTokenizer;

    #[test]
    fn words() {
        let words: Vec<_> = DelimTokenizer::words("  i 'd  like\tto fly .").collect();
        assert_eq!(words, vec!["i", "'d", "like", "to", "fly", "."]);
        assert_eq!(DelimTokenizer::words("   ").next(), None);
    }

    #[test]
    fn keep_delims() {
        let tokens: Vec<_> = DelimTokenizer::new("1+(2 * 3)", "+*()", false).collect();
        assert_eq!(tokens, vec!["1", "+", "(", "2", "*", "3", ")"]);
    }

    #[test]
    fn drop_delims() {
        let tokens: Vec<_> = DelimTokenizer::new("b, b ,,b", ",", true).collect();
        assert_eq!(tokens, vec!["b", "b", "b"]);
    }
}
