#![deny(warnings)]

use crate::scanner::Scanner;

/// Tokens of a plain-text context-free grammar, one production per line:
///
/// ```text
/// %start S
/// S -> NP VP | 'hello'
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum CfgToken {
    Symbol(String),
    Terminal(String),
    Directive(String),
    Arrow,
    Bar,
    Newline,
    Unknown(String),
}

pub struct CfgTokenizer<I: Iterator<Item=char>>(Scanner<I>);

impl<'a> CfgTokenizer<std::str::Chars<'a>> {
    pub fn new(src: &'a str) -> Self {
        CfgTokenizer(Scanner::new(src.chars()))
    }
}

// Symbols are anything not blank and not reserved by the grammar syntax
fn symbol_char(c: &char) -> bool {
    !c.is_whitespace() && !"'\"|#%".contains(*c)
}

impl<I: Iterator<Item=char>> CfgTokenizer<I> {
    fn scan_symbol(&mut self) -> Option<String> {
        let s = &mut self.0;
        loop {
            let backtrack = s.pos();
            match s.next() {
                // an arrow terminates a symbol even without surrounding blanks
                Some('-') if s.peek() == Some('>') => {
                    s.set_pos(backtrack);
                    break;
                }
                Some(c) if symbol_char(&c) => continue,
                Some(_) => {
                    s.set_pos(backtrack);
                    break;
                }
                None => break,
            }
        }
        let symbol = s.extract_string();
        (!symbol.is_empty()).then_some(symbol)
    }
}

impl<I: Iterator<Item=char>> Iterator for CfgTokenizer<I> {
    type Item = CfgToken;
    fn next(&mut self) -> Option<Self::Item> {
        let s = &mut self.0;
        s.ignore_blanks();
        // discard comments starting with '#' until new-line
        if s.accept(&'#').is_some() {
            s.skip_all(|c| *c != '\n');
            s.ignore();
        }
        if s.accept(&'\n').is_some() {
            s.ignore();
            return Some(CfgToken::Newline);
        }
        if s.accept(&'|').is_some() {
            s.ignore();
            return Some(CfgToken::Bar);
        }
        let backtrack = s.pos();
        if s.accept(&'-').is_some() {
            if s.accept(&'>').is_some() {
                s.ignore();
                return Some(CfgToken::Arrow);
            }
            s.set_pos(backtrack);
        }
        if s.accept(&'%').is_some() {
            s.ignore();
            return Some(match self.scan_symbol() {
                Some(name) => CfgToken::Directive(name),
                None => CfgToken::Unknown("%".to_string()),
            });
        }
        for q in ['\'', '"'] {
            if let Some(word) = s.scan_quoted(q) {
                return Some(CfgToken::Terminal(word));
            }
        }
        if let Some(symbol) = self.scan_symbol() {
            return Some(CfgToken::Symbol(symbol));
        }
        // whatever is left can't start a token (eg: an unterminated quote)
        let s = &mut self.0;
        s.next()?;
        s.skip_all(|c| *c != '\n');
        Some(CfgToken::Unknown(s.extract_string()))
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{CfgToken, CfgTokenizer};

    fn sym(s: &str) -> CfgToken { CfgToken::Symbol(s.to_string()) }
    fn term(s: &str) -> CfgToken { CfgToken::Terminal(s.to_string()) }

    #[test]
    fn productions() {
        let tokens: Vec<_> = CfgTokenizer::new("S -> NP VP | 'ok'\nNP->'a b'").collect();
        assert_eq!(tokens, vec![
            sym("S"), CfgToken::Arrow, sym("NP"), sym("VP"), CfgToken::Bar,
            term("ok"), CfgToken::Newline,
            sym("NP"), CfgToken::Arrow, term("a b"),
        ]);
    }

    #[test]
    fn comments_and_directives() {
        let src = "# a comment -> 'x'\n%start SIGMA\nSIGMA -> \"don't\" # trailing\n";
        let tokens: Vec<_> = CfgTokenizer::new(src).collect();
        assert_eq!(tokens, vec![
            CfgToken::Newline,
            CfgToken::Directive("start".to_string()), sym("SIGMA"), CfgToken::Newline,
            sym("SIGMA"), CfgToken::Arrow, term("don't"), CfgToken::Newline,
        ]);
    }

    #[test]
    fn odd_symbols() {
        let tokens: Vec<_> = CfgTokenizer::new("NP-SBJ -> N' pt_pp.").collect();
        assert_eq!(tokens, vec![
            sym("NP-SBJ"), CfgToken::Arrow, sym("N"), CfgToken::Unknown("' pt_pp.".to_string()),
        ]);
    }
}
