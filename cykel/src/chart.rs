use crate::error::ParseError;
use crate::grammar::{Grammar, SymbolId};
use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;


/// Half-open range `[start, start + len)` over the input tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

/// One way of deriving a span: `left_symbol` over `left` followed by
/// `right_symbol` over `right`, combined by a binary rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Split {
    pub left: Span,
    pub left_symbol: SymbolId,
    pub right: Span,
    pub right_symbol: SymbolId,
}

/// Derivations of a span rooted at one nonterminal.
/// `count` is the sum over `splits` of the product of both sides' counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub count: BigUint,
    pub splits: Vec<Split>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    /// A single token and the heads of the lexical rules that matched it.
    /// Each of them derives the token exactly once.
    Leaf { word: String, symbols: Vec<SymbolId> },
    /// A span of two or more tokens.
    Internal(BTreeMap<SymbolId, Entry>),
}

/// CYK table for one sentence.
///
/// Cells are stored flat, ordered by span length and then by start, which is
/// also the order in which they're filled: a cell is only ever read after
/// every shorter cell has been written.
pub struct Chart<'g> {
    grammar: &'g Grammar,
    tokens: Vec<String>,
    cells: Vec<Cell>,
}

///////////////////////////////////////////////////////////////////////////////

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Span{start, len}
    }

    pub fn end(&self) -> usize { self.start + self.len }

    /// Cut into `[start, start + at)` and `[start + at, end)`.
    pub fn split_at(&self, at: usize) -> (Span, Span) {
        assert!(0 < at && at < self.len, "Split outside of span");
        (Span::new(self.start, at), Span::new(self.start + at, self.len - at))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Leaf{symbols, ..} => symbols.is_empty(),
            Cell::Internal(entries) => entries.is_empty(),
        }
    }

    /// Nonterminals deriving this span, in ascending id order for internal cells.
    pub fn symbols(&self) -> Box<dyn Iterator<Item=SymbolId> + '_> {
        match self {
            Cell::Leaf{symbols, ..} => Box::new(symbols.iter().copied()),
            Cell::Internal(entries) => Box::new(entries.keys().copied()),
        }
    }

    pub fn entry(&self, symbol: SymbolId) -> Option<&Entry> {
        match self {
            Cell::Leaf{..} => None,
            Cell::Internal(entries) => entries.get(&symbol),
        }
    }

    // Avoids cloning counts of internal cells while combining
    fn derivations(&self, symbol: SymbolId) -> Option<Cow<'_, BigUint>> {
        match self {
            Cell::Leaf{symbols, ..} => symbols.contains(&symbol)
                .then(|| Cow::Owned(BigUint::one())),
            Cell::Internal(entries) => entries.get(&symbol)
                .map(|entry| Cow::Borrowed(&entry.count)),
        }
    }

    /// Number of distinct derivations of this span rooted at `symbol`.
    pub fn count(&self, symbol: SymbolId) -> BigUint {
        self.derivations(symbol).map_or_else(BigUint::zero, Cow::into_owned)
    }
}

// Position of the first span of length `len` in the flat cell table.
fn row_offset(n: usize, len: usize) -> usize {
    // sum of (n - l + 1) for l in 1..len
    (len - 1) * (2 * n + 2 - len) / 2
}

impl<'g> Chart<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Chart{grammar, tokens: Vec::new(), cells: Vec::new()}
    }

    pub fn grammar(&self) -> &'g Grammar { self.grammar }

    pub fn tokens(&self) -> &[String] { &self.tokens }

    /// Length of the sentence in the chart.
    pub fn len(&self) -> usize { self.tokens.len() }

    pub fn is_filled(&self) -> bool { !self.cells.is_empty() }

    /// The span covering the whole sentence.
    pub fn root(&self) -> Span { Span::new(0, self.len()) }

    /// Forget the current sentence.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.cells.clear();
    }

    pub fn cell(&self, span: Span) -> Option<&Cell> {
        if span.len == 0 || span.end() > self.len() {
            return None;
        }
        self.cells.get(row_offset(self.len(), span.len) + span.start)
    }

    /// Derivations of the whole sentence from the start symbol,
    /// `None` if nothing has been parsed yet.
    pub fn count(&self) -> Option<BigUint> {
        self.cell(self.root()).map(|root| root.count(self.grammar.start()))
    }

    /// Build the table for `tokens` bottom-up and count the derivations of the
    /// whole sentence. A sentence the grammar can't derive counts zero.
    pub fn fill<I>(&mut self, tokens: I) -> Result<BigUint, ParseError>
        where I: IntoIterator, I::Item: AsRef<str>
    {
        self.clear();
        let tokens: Vec<String> = tokens.into_iter()
            .map(|t| t.as_ref().to_string())
            .collect();
        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let n = tokens.len();
        let start = self.grammar.start();
        self.tokens = tokens;

        // Single tokens. A one word sentence is also the root: keep start only.
        for word in &self.tokens {
            let symbols = self.grammar.lexical_rules(word).iter().copied()
                .filter(|&symbol| n > 1 || symbol == start)
                .collect();
            self.cells.push(Cell::Leaf{word: word.clone(), symbols});
        }

        for len in 2..=n {
            for begin in 0..=(n - len) {
                let mut entries = self.combine(Span::new(begin, len));
                // Only derivations of the start symbol are kept at the root
                if len == n {
                    entries.retain(|&symbol, _| symbol == start);
                }
                self.cells.push(Cell::Internal(entries));
            }
        }

        let count = self.count().unwrap_or_default();
        debug!("Parsed {} tokens: {} derivations, {} chart entries",
               n, count, self.num_entries());
        if cfg!(feature="debug") {
            self.dump();
        }
        Ok(count)
    }

    /// Accumulate every way of deriving `span` from pairs of shorter spans.
    fn combine(&self, span: Span) -> BTreeMap<SymbolId, Entry> {
        let mut entries: BTreeMap<SymbolId, Entry> = BTreeMap::new();
        for at in 1..span.len {
            let (left, right) = span.split_at(at);
            let (Some(lcell), Some(rcell)) = (self.cell(left), self.cell(right)) else {
                unreachable!("Shorter spans are filled before {}", span);
            };
            for left_symbol in lcell.symbols() {
                let Some(lcount) = lcell.derivations(left_symbol) else { continue };
                for rule in self.grammar.binary_rules_by_left(left_symbol) {
                    let Some(rcount) = rcell.derivations(rule.right) else { continue };
                    let entry = entries.entry(rule.head).or_default();
                    entry.count += &*lcount * &*rcount;
                    entry.splits.push(Split{
                        left, left_symbol, right, right_symbol: rule.right});
                }
            }
        }
        entries
    }

    fn num_entries(&self) -> usize {
        self.cells.iter().map(|cell| cell.symbols().count()).sum()
    }

    fn dump(&self) {
        for len in 1..=self.len() {
            for begin in 0..=(self.len() - len) {
                let span = Span::new(begin, len);
                let Some(cell) = self.cell(span) else { continue };
                let entries = cell.symbols()
                    .map(|s| format!("{}: {}", self.grammar.name(s), cell.count(s)))
                    .collect::<Vec<_>>().join(", ");
                trace!("{} {}", span, entries);
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
