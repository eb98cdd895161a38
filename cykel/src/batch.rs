use crate::chart::Chart;
use crate::error::{Error, ParseError};
use crate::grammar::Grammar;
use crate::trees::Forest;
use lexers::DelimTokenizer;
use log::{debug, info};
use num_bigint::BigUint;
use num_traits::Zero;
use std::{fmt, fs, path::Path};

/// A sentence to parse and, optionally, how many parses it should have.
///
/// Read from files with one sentence per line and an optional `: N` suffix
/// stating the expected number of parses. Blank lines and lines starting
/// with `#`, `%` or `;` are skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestSentence {
    pub tokens: Vec<String>,
    pub expected: Option<BigUint>,
}

/// Result of parsing one sentence in a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub sentence: String,
    pub count: Result<BigUint, ParseError>,
    /// Bracketed trees, only when requested.
    pub trees: Vec<String>,
    pub expected: Option<BigUint>,
}

/// Parses many sentences against one grammar. A sentence without parses
/// (or without tokens) never stops the batch.
pub struct Batch<'g> {
    grammar: &'g Grammar,
    trees: bool,
}


impl TestSentence {
    pub fn new(sentence: &str) -> Self {
        TestSentence{
            tokens: DelimTokenizer::words(sentence).collect(),
            expected: None,
        }
    }

    pub fn text(&self) -> String { self.tokens.join(" ") }

    pub fn parse_all(src: &str) -> Result<Vec<TestSentence>, Error> {
        let mut sentences = Vec::new();
        for (idx, line) in src.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(['#', '%', ';']) {
                continue;
            }
            let sentence = match line.rsplit_once(':') {
                Some((text, count)) => {
                    let expected = count.trim().parse::<BigUint>()
                        .map_err(|_| Error::Sentence{
                            line: idx + 1,
                            message: format!("expected a parse count, got '{}'", count.trim()),
                        })?;
                    TestSentence{expected: Some(expected), ..TestSentence::new(text)}
                }
                None => TestSentence::new(line),
            };
            sentences.push(sentence);
        }
        Ok(sentences)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Vec<TestSentence>, Error> {
        TestSentence::parse_all(&fs::read_to_string(path)?)
    }
}

impl Outcome {
    /// The count differs from the one the sentence was expected to have.
    pub fn mismatch(&self) -> bool {
        match (&self.expected, &self.count) {
            (Some(expected), Ok(count)) => expected != count,
            (Some(_), Err(_)) => true,
            (None, _) => false,
        }
    }
}

/// `<sentence>\t<count>` followed by one tree per line
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.count {
            Ok(count) => write!(f, "{}\t{}", self.sentence, count)?,
            Err(e) => write!(f, "{}\terror: {}", self.sentence, e)?,
        }
        for tree in &self.trees {
            write!(f, "\n{}", tree)?;
        }
        Ok(())
    }
}

impl<'g> Batch<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Batch{grammar, trees: false}
    }

    /// Also enumerate the parse trees of each sentence.
    pub fn with_trees(mut self, trees: bool) -> Self {
        self.trees = trees;
        self
    }

    /// Parse a sentence reusing `chart`.
    pub fn parse(&self, chart: &mut Chart<'g>, sentence: &TestSentence) -> Outcome {
        let count = chart.fill(&sentence.tokens);
        let mut trees = Vec::new();
        if self.trees && count.is_ok() {
            if let Ok(mut forest) = Forest::new(chart) {
                trees = forest.trees().iter().map(|t| t.to_string()).collect();
            }
        }
        Outcome{
            sentence: sentence.text(),
            count,
            trees,
            expected: sentence.expected.clone(),
        }
    }

    pub fn run<'s, I>(&self, sentences: I) -> Vec<Outcome>
        where I: IntoIterator<Item=&'s TestSentence>
    {
        let mut chart = Chart::new(self.grammar);
        let outcomes: Vec<_> = sentences.into_iter().enumerate()
            .map(|(idx, sentence)| {
                debug!("Sentence {}: {}", idx + 1, sentence.text());
                self.parse(&mut chart, sentence)
            })
            .collect();
        info!("Parsed {} sentences, {} with no parse, {} mismatches",
              outcomes.len(),
              outcomes.iter().filter(|o| o.count.as_ref().is_ok_and(|c| c.is_zero())).count(),
              outcomes.iter().filter(|o| o.mismatch()).count());
        outcomes
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Batch, Outcome, TestSentence};
    use crate::error::ParseError;
    use crate::grammar::Grammar;
    use num_bigint::BigUint;

    fn grammar() -> Grammar {
        Grammar::from_cfg(concat!(
            "S -> A B | C D\n",
            "A -> 'a'\nB -> 'b'\nC -> 'a'\nD -> 'b'\n",
        )).unwrap()
    }

    #[test]
    fn parse_sentences() {
        let sentences = TestSentence::parse_all(concat!(
            "# comment\n",
            "a b : 2\n",
            "\n",
            "; another comment\n",
            "  b   a\n",
            "% and another: 7\n",
            "a:b: 0\n",
        )).unwrap();
        assert_eq!(sentences, vec![
            TestSentence{tokens: vec!["a".into(), "b".into()], expected: Some(BigUint::from(2u32))},
            TestSentence{tokens: vec!["b".into(), "a".into()], expected: None},
            TestSentence{tokens: vec!["a:b".into()], expected: Some(BigUint::from(0u32))},
        ]);
        let err = TestSentence::parse_all("a b\na b: many\n").unwrap_err();
        assert_eq!(err.to_string(), "Bad test sentence at line 2: expected a parse count, got 'many'");
    }

    #[test]
    fn run_batch() {
        let g = grammar();
        let sentences = TestSentence::parse_all("a b: 2\nb a: 1\nx\n:3\n").unwrap();
        let outcomes = Batch::new(&g).run(&sentences);
        let shown: Vec<_> = outcomes.iter().map(|o| o.to_string()).collect();
        assert_eq!(shown, vec![
            "a b\t2", "b a\t0", "x\t0", "\terror: Cannot parse empty sentence"]);
        let mismatches: Vec<_> = outcomes.iter().map(Outcome::mismatch).collect();
        assert_eq!(mismatches, vec![false, true, false, true]);
        assert_eq!(outcomes[3].count, Err(ParseError::EmptyInput));
    }

    #[test]
    fn run_with_trees() {
        let g = grammar();
        let sentences = vec![TestSentence::new("a b"), TestSentence::new("a a")];
        let outcomes = Batch::new(&g).with_trees(true).run(&sentences);
        assert_eq!(outcomes[0].to_string(), "a b\t2\n[S [A a] [B b]]\n[S [C a] [D b]]");
        assert_eq!(outcomes[1].to_string(), "a a\t0");
    }
}
