//! CYK chart parsing for grammars in Chomsky Normal Form.
//!
//! A `Chart` counts every derivation of a sentence exactly (the counts are
//! arbitrary precision) and records enough back-pointers for a `Forest` to
//! rebuild each of those derivations as a `Tree`.

mod error;
pub use crate::error::{Error, GrammarError, ParseError};

mod grammar;
mod cfg;
pub use crate::grammar::{BinaryRule, Grammar, GrammarBuilder, Rule, SymbolId};

mod chart;
pub use crate::chart::{Cell, Chart, Entry, Span, Split};

mod trees;
pub use crate::trees::{Forest, Tree, Trees};

mod batch;
pub use crate::batch::{Batch, Outcome, TestSentence};

pub use num_bigint::BigUint;
