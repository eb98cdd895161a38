use crate::error::GrammarError;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Dense index of a nonterminal within the `Grammar` that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn index(self) -> usize { self.0 }
}

/// `head -> left right`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BinaryRule {
    pub head: SymbolId,
    pub left: SymbolId,
    pub right: SymbolId,
}

/// A production in Chomsky Normal Form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    Binary(BinaryRule),
    // head -> 'word'
    Lexical(SymbolId, String),
}

/// An immutable CNF grammar answering the two queries a CYK chart needs:
/// which nonterminals derive a word, and which binary rules start with a
/// given nonterminal.
#[derive(Clone, Debug)]
pub struct Grammar {
    symbols: Vec<String>,
    index: HashMap<String, SymbolId>,
    start: SymbolId,
    rules: Vec<Rule>,
    lexical: HashMap<String, Vec<SymbolId>>,
    by_left: Vec<Vec<BinaryRule>>,
}

/// Builds a Grammar while validating existence of Symbols and checking rules.
#[derive(Default)]
pub struct GrammarBuilder {
    symbols: Vec<String>,
    index: HashMap<String, SymbolId>,
    rules: Vec<Rule>,
    seen: HashSet<Rule>,
    error: Option<GrammarError>,
}


impl Grammar {
    pub fn start(&self) -> SymbolId { self.start }

    pub fn name(&self, symbol: SymbolId) -> &str { &self.symbols[symbol.0] }

    pub fn symbol(&self, name: &str) -> Option<SymbolId> {
        self.index.get(name).copied()
    }

    pub fn num_symbols(&self) -> usize { self.symbols.len() }

    /// Every production in the order it was added.
    pub fn rules(&self) -> &[Rule] { &self.rules }

    /// Heads of all `A -> 'word'` rules.
    pub fn lexical_rules(&self, word: &str) -> &[SymbolId] {
        self.lexical.get(word).map(Vec::as_slice).unwrap_or_default()
    }

    /// All `A -> left C` rules.
    pub fn binary_rules_by_left(&self, left: SymbolId) -> &[BinaryRule] {
        &self.by_left[left.0]
    }

    pub fn rule_to_string(&self, rule: &Rule) -> String {
        match rule {
            Rule::Binary(r) => format!("{} -> {} {}",
                self.name(r.head), self.name(r.left), self.name(r.right)),
            Rule::Lexical(head, word) => format!("{} -> {}",
                self.name(*head), quote(word)),
        }
    }

    pub fn str_rules(&self) -> Vec<String> {
        self.rules.iter().map(|r| self.rule_to_string(r)).collect()
    }
}

// Pick a quote that doesn't need escaping when possible
fn quote(word: &str) -> String {
    if !word.contains('\'') {
        format!("'{}'", word)
    } else if !word.contains('"') {
        format!("\"{}\"", word)
    } else {
        format!("'{}'", word.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Renders the grammar in the same text format `Grammar::from_cfg` reads.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "%start {}", self.name(self.start))?;
        for rule in &self.rules {
            writeln!(f, "{}", self.rule_to_string(rule))?;
        }
        Ok(())
    }
}


impl GrammarBuilder {
    fn add_symbol(&mut self, name: String, quiet: bool) {
        // Check for duplicate symbols to avoid overwriting by mistake
        if !self.index.contains_key(&name) {
            self.index.insert(name.clone(), SymbolId(self.symbols.len()));
            self.symbols.push(name);
        } else if !quiet {
            self.fail(GrammarError::DuplicateSymbol(name));
        }
    }

    // Keep the first error, later ones are usually a consequence
    fn fail(&mut self, error: GrammarError) {
        self.error.get_or_insert(error);
    }

    fn lookup(&mut self, name: &str) -> Option<SymbolId> {
        let id = self.index.get(name).copied();
        if id.is_none() {
            self.fail(GrammarError::MissingSymbol(name.to_string()));
        }
        id
    }

    fn add_rule(&mut self, rule: Rule, quiet: bool) {
        if self.seen.insert(rule.clone()) {
            self.rules.push(rule);
        } else if !quiet {
            let shown = self.rule_to_string(&rule);
            self.fail(GrammarError::DuplicateRule(shown));
        }
    }

    fn rule_to_string(&self, rule: &Rule) -> String {
        match rule {
            Rule::Binary(r) => format!("{} -> {} {}", self.symbols[r.head.0],
                self.symbols[r.left.0], self.symbols[r.right.0]),
            Rule::Lexical(head, word) => format!("{} -> {}",
                self.symbols[head.0], quote(word)),
        }
    }

    fn add_binary<S, S2>(&mut self, head: S, spec: &[S2], quiet: bool)
        where S: AsRef<str>, S2: AsRef<str>
    {
        let names: Vec<_> = spec.iter().map(|s| s.as_ref()).collect();
        let [left, right] = names.as_slice() else {
            self.fail(GrammarError::NotCnf(
                format!("{} -> {}", head.as_ref(), names.join(" "))));
            return;
        };
        // All symbols must be registered before they're used
        let (Some(left), Some(right), Some(head)) =
            (self.lookup(left), self.lookup(right), self.lookup(head.as_ref()))
        else {
            return;
        };
        self.add_rule(Rule::Binary(BinaryRule{head, left, right}), quiet);
    }

    fn add_lexical(&mut self, head: &str, word: String, quiet: bool) {
        if let Some(head) = self.lookup(head) {
            self.add_rule(Rule::Lexical(head, word), quiet);
        }
    }

    pub fn nonterm(mut self, name: impl Into<String>) -> Self {
        self.add_symbol(name.into(), false);
        self
    }

    /// Register a binary rule `head -> left right`.
    pub fn rule<S, S2>(mut self, head: S, spec: &[S2]) -> Self
        where S: AsRef<str>, S2: AsRef<str>
    {
        self.add_binary(head, spec, false);
        self
    }

    /// Register a lexical rule `head -> 'word'`.
    pub fn lexical(mut self, head: impl AsRef<str>, word: impl Into<String>) -> Self {
        self.add_lexical(head.as_ref(), word.into(), false);
        self
    }

    // Quiet silently ignores adding pre-existent symbols or rules.
    // Also quiet versions don't use chaining to be invoked in loops.

    pub fn quiet_nonterm(&mut self, name: impl Into<String>) {
        self.add_symbol(name.into(), true);
    }

    pub fn quiet_rule<S, S2>(&mut self, head: S, spec: &[S2])
        where S: AsRef<str>, S2: AsRef<str>
    {
        self.add_binary(head, spec, true);
    }

    pub fn quiet_lexical(&mut self, head: impl AsRef<str>, word: impl Into<String>) {
        self.add_lexical(head.as_ref(), word.into(), true);
    }

    pub fn into_grammar(mut self, start: impl AsRef<str>) -> Result<Grammar, GrammarError> {
        let start = self.lookup(start.as_ref());
        if let Some(error) = self.error {
            return Err(error);
        }
        let start = start.ok_or(GrammarError::Empty)?;
        if self.rules.is_empty() {
            return Err(GrammarError::Empty);
        }
        // Index rules for the two queries the chart makes
        let mut lexical: HashMap<String, Vec<SymbolId>> = HashMap::new();
        let mut by_left = vec![Vec::new(); self.symbols.len()];
        for rule in &self.rules {
            match rule {
                Rule::Binary(r) => by_left[r.left.0].push(*r),
                Rule::Lexical(head, word) =>
                    lexical.entry(word.clone()).or_default().push(*head),
            }
        }
        Ok(Grammar {
            symbols: self.symbols,
            index: self.index,
            start,
            rules: self.rules,
            lexical,
            by_left,
        })
    }
}


///////////////////////////////////////////////////////////////////////////////
