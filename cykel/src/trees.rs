use crate::chart::{Cell, Chart, Span};
use crate::error::ParseError;
use crate::grammar::SymbolId;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;


/// A derivation. Subtrees are shared between the trees of a forest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tree {
    // ("NOUN", "prices")
    Leaf(String, String),
    // ("S", [NP ...], [VP ...])
    Node(String, Rc<Tree>, Rc<Tree>),
}

pub type Trees = Rc<[Rc<Tree>]>;

/// Materializes the parse trees recorded in a filled `Chart`.
///
/// Trees for a `(span, symbol)` pair are built once and shared by every
/// larger tree reaching them through a different split.
pub struct Forest<'c, 'g> {
    chart: &'c Chart<'g>,
    memo: HashMap<(Span, SymbolId), Trees>,
}

impl Tree {
    pub fn symbol(&self) -> &str {
        match self {
            Tree::Leaf(symbol, _) | Tree::Node(symbol, _, _) => symbol,
        }
    }

    /// The tokens this tree derives, left to right.
    pub fn words(&self) -> Vec<&str> {
        match self {
            Tree::Leaf(_, word) => vec![word.as_str()],
            Tree::Node(_, left, right) => {
                let mut words = left.words();
                words.extend(right.words());
                words
            }
        }
    }
}

/// Bracketed form: `[S [NP prices] [VP rise]]`
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tree::Leaf(symbol, word) => write!(f, "[{} {}]", symbol, word),
            Tree::Node(symbol, left, right) => write!(f, "[{} {} {}]", symbol, left, right),
        }
    }
}

impl<'c, 'g> Forest<'c, 'g> {
    pub fn new(chart: &'c Chart<'g>) -> Result<Self, ParseError> {
        if !chart.is_filled() {
            return Err(ParseError::TreeRequestBeforeParse);
        }
        Ok(Forest{chart, memo: HashMap::new()})
    }

    /// All derivations of the sentence from the grammar's start symbol.
    pub fn trees(&mut self) -> Trees {
        let start = self.chart.grammar().start();
        self.collect(self.chart.root(), start)
    }

    /// All derivations of `span` rooted at `symbol`. As many as the chart
    /// counted for that cell, and none when the chart has no entry for it.
    pub fn collect(&mut self, span: Span, symbol: SymbolId) -> Trees {
        if let Some(trees) = self.memo.get(&(span, symbol)) {
            return trees.clone();
        }
        let chart = self.chart;
        let name = chart.grammar().name(symbol);
        let trees: Trees = match chart.cell(span) {
            Some(Cell::Leaf{word, symbols}) if symbols.contains(&symbol) =>
                vec![Rc::new(Tree::Leaf(name.to_string(), word.clone()))].into(),
            Some(Cell::Internal(entries)) => match entries.get(&symbol) {
                Some(entry) => {
                    let mut trees = Vec::new();
                    for split in &entry.splits {
                        // collect left-side-trees of each split
                        let lefts = self.collect(split.left, split.left_symbol);
                        // collect right-side-trees of each split
                        let rights = self.collect(split.right, split.right_symbol);
                        for left in lefts.iter() {
                            for right in rights.iter() {
                                trees.push(Rc::new(Tree::Node(
                                    name.to_string(), left.clone(), right.clone())));
                            }
                        }
                    }
                    trees.into()
                }
                None => Vec::new().into(),
            },
            _ => Vec::new().into(),
        };
        self.memo.insert((span, symbol), trees.clone());
        trees
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Forest, Tree};
    use crate::chart::{Chart, Span};
    use crate::error::ParseError;
    use crate::grammar::GrammarBuilder;
    use std::rc::Rc;

    #[test]
    fn tree_display() {
        let leaf = |s: &str, w: &str| Rc::new(Tree::Leaf(s.to_string(), w.to_string()));
        let t = Tree::Node("S".to_string(), leaf("NP", "prices"),
            Rc::new(Tree::Node("VP".to_string(), leaf("V", "rise"), leaf("ADV", "fast"))));
        assert_eq!(t.to_string(), "[S [NP prices] [VP [V rise] [ADV fast]]]");
        assert_eq!(t.symbol(), "S");
        assert_eq!(t.words(), vec!["prices", "rise", "fast"]);
    }

    #[test]
    fn unfilled_chart() {
        let g = GrammarBuilder::default()
            .nonterm("S")
            .lexical("S", "ok")
            .into_grammar("S")
            .expect("Bad grammar");
        let mut chart = Chart::new(&g);
        assert!(matches!(Forest::new(&chart), Err(ParseError::TreeRequestBeforeParse)));
        let _ = chart.fill(Vec::<&str>::new());
        assert!(matches!(Forest::new(&chart), Err(ParseError::TreeRequestBeforeParse)));
        chart.fill(["ok"]).unwrap();
        let trees = Forest::new(&chart).unwrap().trees();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].to_string(), "[S ok]");
        chart.clear();
        assert!(matches!(Forest::new(&chart), Err(ParseError::TreeRequestBeforeParse)));
    }

    #[test]
    fn shared_subtrees() {
        // S -> S S | a
        let g = GrammarBuilder::default()
            .nonterm("S")
            .rule("S", &["S", "S"])
            .lexical("S", "a")
            .into_grammar("S")
            .expect("Bad grammar");
        let mut chart = Chart::new(&g);
        chart.fill(["a", "a", "a", "a"]).unwrap();
        let mut forest = Forest::new(&chart).unwrap();
        let trees = forest.trees();
        assert_eq!(trees.len(), 5);
        // "a a" at [1, 3) is reached from several splits, built only once
        let middle = forest.collect(Span::new(1, 2), g.start());
        let again = forest.collect(Span::new(1, 2), g.start());
        assert!(Rc::ptr_eq(&middle, &again));
        assert!(trees.iter().all(|t| t.words() == vec!["a"; 4]));
    }

    #[test]
    fn missing_entries() {
        let g = GrammarBuilder::default()
            .nonterm("S").nonterm("A")
            .rule("S", &["A", "A"])
            .lexical("A", "a")
            .into_grammar("S")
            .expect("Bad grammar");
        let mut chart = Chart::new(&g);
        chart.fill(["a", "a", "a"]).unwrap();
        let mut forest = Forest::new(&chart).unwrap();
        assert!(forest.trees().is_empty());
        let a = g.symbol("A").unwrap();
        assert!(forest.collect(Span::new(0, 2), a).is_empty());
        assert!(forest.collect(Span::new(2, 5), a).is_empty());
        assert_eq!(forest.collect(Span::new(2, 1), a)[0].to_string(), "[A a]");
    }
}
