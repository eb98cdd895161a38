use clap::Parser;
use cykel::{Batch, Chart, Grammar, Outcome, TestSentence};
use log::LevelFilter;
use rustyline::error::ReadlineError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cykel")]
#[command(about = "Count and list the parses of sentences under a CNF grammar")]
struct Args {
    /// Grammar file, one CNF production per line
    grammar: PathBuf,
    /// Sentences to parse, one per line with an optional `: N` parse count.
    /// Reads sentences interactively when missing.
    sentences: Option<PathBuf>,
    /// Print the parse trees of every sentence
    #[arg(long)]
    trees: bool,
    /// Report sentences not matching their expected parse count
    #[arg(long)]
    check: bool,
    /// Log grammar and chart statistics
    #[arg(short, long)]
    verbose: bool,
}

fn describe(outcome: &Outcome) -> String {
    let expected = outcome.expected.as_ref()
        .map(|e| e.to_string())
        .unwrap_or_default();
    match &outcome.count {
        Ok(count) => format!("'{}' expected {} got {}", outcome.sentence, expected, count),
        Err(e) => format!("'{}' expected {} got error: {}", outcome.sentence, expected, e),
    }
}

// Returns false when checking found mismatches
fn batch(grammar: &Grammar, path: &Path, args: &Args) -> Result<bool, String> {
    let sentences = TestSentence::load(path).map_err(|e| e.to_string())?;
    let outcomes = Batch::new(grammar).with_trees(args.trees).run(&sentences);
    for outcome in &outcomes {
        println!("{}", outcome);
    }
    if !args.check {
        return Ok(true);
    }
    let mismatches: Vec<_> = outcomes.iter().filter(|o| o.mismatch()).collect();
    for outcome in &mismatches {
        eprintln!("Mismatch: {}", describe(outcome));
    }
    eprintln!("{} of {} sentences mismatched", mismatches.len(), outcomes.len());
    Ok(mismatches.is_empty())
}

fn repl(grammar: &Grammar) -> Result<(), String> {
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    let parser = Batch::new(grammar).with_trees(true);
    let mut chart = Chart::new(grammar);
    loop {
        match rl.readline("~> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) => {
                let sentence = TestSentence::new(&line);
                if sentence.tokens.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);
                println!("{}", parser.parse(&mut chart, &sentence));
            }
        }
    }
}

fn run(args: &Args) -> Result<bool, String> {
    let grammar = Grammar::load(&args.grammar)
        .map_err(|e| format!("{}: {}", args.grammar.display(), e))?;
    match &args.sentences {
        Some(path) => batch(&grammar, path, args),
        None => repl(&grammar).map(|_| true),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .init();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
