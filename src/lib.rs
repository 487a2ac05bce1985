pub mod cmdline;
pub mod environment;
pub mod evaluator;
pub mod html;
pub mod interpreter;
pub mod printer;
pub mod reader;
pub mod types;

#[macro_use]
extern crate lazy_static;

mod core;
mod special_forms;
mod tokens;

pub use types::Value;
