extern crate derive_more;
use crate::environment::Environment;
use crate::evaluator;
use derive_more::Deref;
use itertools::Itertools;
use std::fmt::{self, Formatter};
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

pub type Int = i64;
pub type Float = f64;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(name.into())
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "when evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

#[derive(Clone)]
pub struct Closure {
    pub parameters: Vec<Symbol>,
    pub body: Value,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Integer(Int),
    Float(Float),
    Str(String),
    Symbol(Symbol),
    List(Rc<Vec<Value>>),
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
}

pub(crate) fn truthy(obj: &Value) -> bool {
    use Value::*;
    match obj {
        Nil => false,
        Integer(x) => *x != 0,
        Float(x) => *x != 0.0,
        Str(s) => !s.is_empty(),
        List(elements) => !elements.is_empty(),
        Symbol(_) | Primitive(_) | Closure(_) => true,
    }
}

#[derive(Debug)]
pub enum TypeMismatch {
    NotANumber,
    NotAList,
    NotASymbol,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let noun = match self {
            TypeMismatch::NotANumber => "a number",
            TypeMismatch::NotAList => "a list",
            TypeMismatch::NotASymbol => "a symbol",
        };
        write!(f, "expected {}", noun)
    }
}

impl Value {
    pub(crate) fn as_list(&self) -> Result<&[Value], TypeMismatch> {
        match self {
            Value::List(x) => Ok(x),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub(crate) fn as_symbol(&self) -> Result<&Symbol, TypeMismatch> {
        match self {
            Value::Symbol(s) => Ok(s),
            _ => Err(TypeMismatch::NotASymbol),
        }
    }

    pub(crate) fn wrap_list(elements: Vec<Value>) -> Self {
        Self::List(Rc::new(elements))
    }

    pub(crate) fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol(name.into()))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Integer(x), Integer(y)) => x == y,
            (Float(x), Float(y)) => x == y,
            (Integer(x), Float(y)) | (Float(y), Integer(x)) => *x as f64 == *y,
            (Str(x), Str(y)) => x == y,
            (Symbol(x), Symbol(y)) => x == y,
            (List(x), List(y)) => equal_sequences(x, y),
            (Primitive(x), Primitive(y)) => std::ptr::eq(*x, *y),
            (Closure(x), Closure(y)) => Rc::ptr_eq(x, y),
            (Nil, Nil) => true,
            (_, _) => false,
        }
    }
}

fn equal_sequences(xs: &[Value], ys: &[Value]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x == y)
}

/// Identity comparison: lists and closures compare by pointer, everything else by value.
pub(crate) fn identical(x: &Value, y: &Value) -> bool {
    use Value::*;
    match (x, y) {
        (List(x), List(y)) => Rc::ptr_eq(x, y),
        (Closure(x), Closure(y)) => Rc::ptr_eq(x, y),
        (_, _) => x == y,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::List(elements) => write!(f, "({})", elements.iter().join(" ")),
            Value::Integer(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Str(text) => write!(f, "{}", text),
            Value::Primitive(func) => write!(f, "#<{}>", func.name),
            Value::Closure(c) => write!(f, "#<lambda ({})>", c.parameters.iter().join(" ")),
            Value::Nil => write!(f, "nil"),
        }
    }
}
