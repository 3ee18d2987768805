pub mod command;
pub(crate) mod lexer;
pub mod parser;
