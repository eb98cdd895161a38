mod scanner;
mod cfg_tokenizer;
mod delim_tokenizer;

pub use scanner::Scanner;
pub use cfg_tokenizer::{CfgTokenizer, CfgToken};
pub use delim_tokenizer::DelimTokenizer;
