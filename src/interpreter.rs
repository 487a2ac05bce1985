use crate::environment::Environment;
use crate::types::Value;
use crate::{evaluator, reader};
use std::fmt;
use std::rc::Rc;

pub type Result = std::result::Result<Value, Error>;

#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Eval(e) => write!(f, "eval error: {}", e),
        }
    }
}

pub fn read(line: &str) -> Result {
    reader::read_str(line).map_err(Error::Read)
}

pub fn eval(obj: &Value, env: &Rc<Environment>) -> Result {
    evaluator::eval(obj, env).map_err(Error::Eval)
}

/// Read one expression from `line` and evaluate it against `env`.
pub fn rep(line: &str, env: &Rc<Environment>) -> Result {
    read(line).and_then(|ast| eval(&ast, env))
}
