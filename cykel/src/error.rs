use std::io;
use thiserror::Error;

/// Raised while building or loading a grammar. The chart never validates
/// the grammar it is handed, every check happens here.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("Duplicate Symbol: {0}")]
    DuplicateSymbol(String),

    #[error("Missing Symbol: {0}")]
    MissingSymbol(String),

    #[error("Duplicate Rule: {0}")]
    DuplicateRule(String),

    /// A production other than `A -> B C` or `A -> 'w'`.
    #[error("Not in CNF: {0}")]
    NotCnf(String),

    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Grammar has no rules")]
    Empty,

    #[error("Can't read grammar: {0}")]
    Io(#[from] io::Error),
}

/// Precondition failures of a parse. Not finding a parse is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Cannot parse empty sentence")]
    EmptyInput,

    #[error("Trees requested before the chart was filled")]
    TreeRequestBeforeParse,
}

/// Everything that can go wrong driving a batch of sentences.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Bad test sentence at line {line}: {message}")]
    Sentence { line: usize, message: String },

    #[error("Can't read sentences: {0}")]
    Io(#[from] io::Error),
}
