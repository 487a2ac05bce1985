use crate::environment::{Environment, UnknownSymbol};
use crate::types::{Arity, Closure, PrimitiveFn, TypeMismatch, Value};
use crate::{environment, html, special_forms, types};
use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnknownSymbol(environment::UnknownSymbol),
    NothingToApply,
    NotCallable(Value),
    BadArgCount(types::BadArgCount),
    TypeMismatch(types::TypeMismatch),
    DividedByZero,
    EmptySequence(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(e) => write!(f, "{}", e),
            Error::NothingToApply => write!(f, "cannot evaluate an empty list"),
            Error::NotCallable(head) => write!(f, "cannot call {}", head),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::DividedByZero => write!(f, "cannot divide by zero!"),
            Error::EmptySequence(name) => write!(f, "{}: empty list", name),
        }
    }
}

impl From<types::TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<types::BadArgCount> for Error {
    fn from(e: types::BadArgCount) -> Self {
        Self::BadArgCount(e)
    }
}

impl From<UnknownSymbol> for Error {
    fn from(e: UnknownSymbol) -> Self {
        Self::UnknownSymbol(e)
    }
}

/// Evaluate an expression in an environment.
pub fn eval(ast: &Value, env: &Rc<Environment>) -> Result {
    log::trace!("eval {:?}", ast);
    match ast {
        Value::Symbol(s) => Ok(env.fetch(s)?),
        Value::List(argv) => eval_list(argv, env),
        // Everything else is self-evaluating.
        _ => Ok(ast.clone()),
    }
}

fn eval_list(argv: &[Value], env: &Rc<Environment>) -> Result {
    if argv.is_empty() {
        return Err(Error::NothingToApply);
    }
    if let Value::Symbol(name) = &argv[0] {
        match name.as_str() {
            "quote" => return special_forms::apply_quote(&argv[1..]),
            "if" => return special_forms::apply_if(&argv[1..], env),
            "set!" => return special_forms::apply_set(&argv[1..], env),
            "define" => return special_forms::apply_define(&argv[1..], env),
            "lambda" => return special_forms::apply_lambda(&argv[1..], env),
            "begin" => return special_forms::apply_begin(&argv[1..], env),
            _ => {
                if html::is_tag(name) {
                    return html::emit_tag(name, &argv[1..], env);
                }
                if argv.len() == 1 {
                    // (x) is an alias for x, even when x is bound to a procedure.
                    return Ok(env.fetch(name)?);
                }
            }
        }
    }
    let evaluated = evaluate_sequence_elementwise(argv, env)?;
    let (callable, args) = evaluated.split_first().unwrap();
    apply(callable, args)
}

pub(crate) fn apply(callable: &Value, args: &[Value]) -> Result {
    match callable {
        Value::Primitive(func) => call_primitive(*func, args),
        Value::Closure(func) => call_closure(func, args),
        _ => Err(Error::NotCallable(callable.clone())),
    }
}

pub(crate) fn call_primitive(func: &PrimitiveFn, args: &[Value]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(value) => log::trace!("call to {} resulted in {}", func.name, value),
        Err(e) => log::trace!("call to {} failed: {}", func.name, e),
    }
    result
}

fn call_closure(func: &Closure, args: &[Value]) -> Result {
    log::trace!("call lambda with {}", pretty_print_args(args));
    Arity::exactly(func.parameters.len()).validate_for(args.len(), "lambda")?;
    // The new frame's parent is the environment captured when the lambda was
    // created, not the caller's environment.
    let env = Environment::binds(&func.parent, &func.parameters, args);
    eval(&func.body, &env)
}

pub fn evaluate_sequence_elementwise(
    seq: &[Value],
    env: &Rc<Environment>,
) -> std::result::Result<Vec<Value>, Error> {
    seq.iter().map(|obj| eval(obj, env)).collect()
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}
