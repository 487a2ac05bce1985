use crate::environment::Environment;
use crate::evaluator::{eval, Result};
use crate::types::{truthy, Arity, Closure, Symbol, Value};
use std::rc::Rc;

pub fn apply_quote(args: &[Value]) -> Result {
    Arity::exactly(1).validate_for(args.len(), "quote")?;
    Ok(args[0].clone())
}

/// (if test conseq alt) with both branches required; exactly one branch is
/// ever evaluated.
pub fn apply_if(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::exactly(3).validate_for(args.len(), "if")?;
    let condition = eval(&args[0], env)?;
    if truthy(&condition) {
        eval(&args[1], env)
    } else {
        eval(&args[2], env)
    }
}

pub fn apply_set(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::exactly(2).validate_for(args.len(), "set!")?;
    let key = args[0].as_symbol()?;
    let value = eval(&args[1], env)?;
    env.assign(key, value)?;
    Ok(Value::Nil)
}

pub fn apply_define(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::exactly(2).validate_for(args.len(), "define")?;
    let key = args[0].as_symbol()?;
    let value = eval(&args[1], env)?;
    log::debug!("define {} as {}", key, value);
    env.set(key.clone(), value);
    Ok(Value::Nil)
}

pub fn apply_lambda(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::exactly(2).validate_for(args.len(), "lambda")?;
    let parameters: std::result::Result<Vec<Symbol>, _> = args[0]
        .as_list()?
        .iter()
        .map(|obj| obj.as_symbol().map(Symbol::clone))
        .collect();
    let closure = Closure {
        parameters: parameters?,
        body: args[1].clone(),
        parent: env.clone(),
    };
    Ok(Value::Closure(Rc::new(closure)))
}

pub fn apply_begin(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::at_least(1).validate_for(args.len(), "begin")?;
    let mut result = Value::Nil;
    for obj in args {
        result = eval(obj, env)?;
    }
    Ok(result)
}
