use crate::error::GrammarError;
use crate::grammar::{Grammar, GrammarBuilder};
use lexers::{CfgToken, CfgTokenizer};
use log::debug;
use std::{fs, path::Path};

// Grammar file format, one production per line:
//
//   %start SIGMA             # optional, defaults to the first rule's head
//   SIGMA -> NP VP | 'hi'
//         | 'hello'          # continues the previous head
//
// Only CNF productions are accepted: two nonterminals or one quoted word.

fn syntax(line: usize, message: impl Into<String>) -> GrammarError {
    GrammarError::Syntax{line, message: message.into()}
}

fn describe(token: &CfgToken) -> String {
    match token {
        CfgToken::Symbol(s) | CfgToken::Unknown(s) => s.clone(),
        CfgToken::Terminal(w) => format!("'{}'", w),
        CfgToken::Directive(d) => format!("%{}", d),
        CfgToken::Arrow => "->".to_string(),
        CfgToken::Bar => "|".to_string(),
        CfgToken::Newline => "new-line".to_string(),
    }
}

/// Add every `|` separated alternative in `body` as a production of `head`.
fn add_alternatives(
    gb: &mut GrammarBuilder,
    line: usize,
    head: &str,
    body: &[CfgToken],
) -> Result<(), GrammarError>
{
    for alternative in body.split(|t| *t == CfgToken::Bar) {
        match alternative {
            [] => return Err(syntax(line, format!("empty alternative for {}", head))),
            [CfgToken::Terminal(word)] => gb.quiet_lexical(head, word.as_str()),
            _ => {
                let mut names = Vec::new();
                for token in alternative {
                    match token {
                        CfgToken::Symbol(name) => {
                            gb.quiet_nonterm(name.as_str());
                            names.push(name.as_str());
                        }
                        CfgToken::Terminal(_) => return Err(GrammarError::NotCnf(format!(
                            "{} -> {}", head,
                            alternative.iter().map(describe).collect::<Vec<_>>().join(" ")))),
                        other => return Err(syntax(
                            line, format!("unexpected '{}'", describe(other)))),
                    }
                }
                gb.quiet_rule(head, &names);
            }
        }
    }
    Ok(())
}

impl Grammar {
    /// Build a grammar from its text description.
    pub fn from_cfg(src: &str) -> Result<Grammar, GrammarError> {
        let tokens: Vec<_> = CfgTokenizer::new(src).collect();
        let mut gb = GrammarBuilder::default();
        let mut start: Option<String> = None;
        let mut first_head: Option<String> = None;
        let mut head: Option<String> = None;

        for (idx, line) in tokens.split(|t| *t == CfgToken::Newline).enumerate() {
            let lineno = idx + 1;
            match line {
                [] => (),
                [CfgToken::Directive(d), rest @ ..] => match (d.as_str(), rest) {
                    ("start", [CfgToken::Symbol(s)]) => start = Some(s.clone()),
                    ("start", _) => return Err(syntax(lineno, "expected '%start SYMBOL'")),
                    _ => return Err(syntax(lineno, format!("unknown directive %{}", d))),
                },
                [CfgToken::Symbol(lhs), CfgToken::Arrow, body @ ..] => {
                    gb.quiet_nonterm(lhs.as_str());
                    add_alternatives(&mut gb, lineno, lhs, body)?;
                    first_head.get_or_insert_with(|| lhs.clone());
                    head = Some(lhs.clone());
                }
                [CfgToken::Bar, body @ ..] => {
                    let lhs = head.as_deref()
                        .ok_or_else(|| syntax(lineno, "'|' without a rule to continue"))?;
                    add_alternatives(&mut gb, lineno, lhs, body)?;
                }
                [first, ..] => return Err(syntax(
                    lineno, format!("unexpected '{}'", describe(first)))),
            }
        }

        let start = start.or(first_head).ok_or(GrammarError::Empty)?;
        let grammar = gb.into_grammar(start)?;
        debug!("Loaded grammar: {} rules, {} nonterminals, start {}",
               grammar.rules().len(), grammar.num_symbols(), grammar.name(grammar.start()));
        Ok(grammar)
    }

    /// Read a grammar file, see `Grammar::from_cfg` for its format.
    pub fn load(path: impl AsRef<Path>) -> Result<Grammar, GrammarError> {
        Grammar::from_cfg(&fs::read_to_string(path)?)
    }
}

///////////////////////////////////////////////////////////////////////////////
