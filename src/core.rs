use crate::evaluator;
use crate::types::{identical, truthy, Arity, Float, Int, PrimitiveFn, TypeMismatch, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
enum Num {
    Int(Int),
    Float(Float),
}

impl Num {
    fn to_f64(self) -> f64 {
        match self {
            Num::Int(x) => x as f64,
            Num::Float(x) => x,
        }
    }
}

impl From<Num> for Value {
    fn from(n: Num) -> Self {
        match n {
            Num::Int(x) => Value::Integer(x),
            Num::Float(x) => Value::Float(x),
        }
    }
}

fn as_number(obj: &Value) -> evaluator::Result<Num> {
    match obj {
        Value::Integer(x) => Ok(Num::Int(*x)),
        Value::Float(x) => Ok(Num::Float(*x)),
        _ => Err(evaluator::Error::TypeMismatch(TypeMismatch::NotANumber)),
    }
}

fn grab_numbers(args: &[Value]) -> evaluator::Result<Vec<Num>> {
    args.iter().map(as_number).collect()
}

fn bool_int(b: bool) -> Value {
    Value::Integer(b as Int)
}

// Integers stay integers; floats are contagious.
fn promote(x: Num, y: Num, int_op: fn(Int, Int) -> Int, float_op: fn(f64, f64) -> f64) -> Num {
    match (x, y) {
        (Num::Int(x), Num::Int(y)) => Num::Int(int_op(x, y)),
        (x, y) => Num::Float(float_op(x.to_f64(), y.to_f64())),
    }
}

const SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: sum_,
    arity: Arity::at_least(0),
};

fn sum_(args: &[Value]) -> evaluator::Result {
    let value = grab_numbers(args)?
        .iter()
        .fold(Num::Int(0), |acc, &x| promote(acc, x, Int::wrapping_add, |a, b| a + b));
    Ok(value.into())
}

const SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: sub_,
    arity: Arity::exactly(2),
};

fn sub_(args: &[Value]) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(promote(*x, *y, Int::wrapping_sub, |a, b| a - b).into()),
        _ => unreachable!(),
    }
}

const MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: mul_,
    arity: Arity::at_least(0),
};

fn mul_(args: &[Value]) -> evaluator::Result {
    let value = grab_numbers(args)?
        .iter()
        .fold(Num::Int(1), |acc, &x| promote(acc, x, Int::wrapping_mul, |a, b| a * b));
    Ok(value.into())
}

const DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::exactly(2),
};

fn div_(args: &[Value]) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [_, Num::Int(0)] => Err(evaluator::Error::DividedByZero),
        [Num::Int(x), Num::Int(y)] => Ok(Value::Integer(floor_div(*x, *y))),
        [x, y] => Ok(Value::Float(x.to_f64() / y.to_f64())),
        _ => unreachable!(),
    }
}

// Integer division rounds toward negative infinity, not toward zero.
fn floor_div(x: Int, y: Int) -> Int {
    let quotient = x.wrapping_div(y);
    let remainder = x.wrapping_rem(y);
    if remainder != 0 && (remainder < 0) != (y < 0) {
        quotient - 1
    } else {
        quotient
    }
}

fn comparison_(args: &[Value], comp: fn(&f64, &f64) -> bool) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(bool_int(comp(&x.to_f64(), &y.to_f64()))),
        _ => unreachable!(),
    }
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            const $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[Value]| comparison_(args, f64:: [<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);
comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);

const EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

const EQUAL_TEST: PrimitiveFn = PrimitiveFn {
    name: "equal?",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

fn equal_(args: &[Value]) -> evaluator::Result {
    Ok(bool_int(args[0] == args[1]))
}

const EQ_TEST: PrimitiveFn = PrimitiveFn {
    name: "eq?",
    fn_ptr: eq_test_,
    arity: Arity::exactly(2),
};

fn eq_test_(args: &[Value]) -> evaluator::Result {
    Ok(bool_int(identical(&args[0], &args[1])))
}

const NOT: PrimitiveFn = PrimitiveFn {
    name: "not",
    fn_ptr: not_,
    arity: Arity::exactly(1),
};

fn not_(args: &[Value]) -> evaluator::Result {
    Ok(bool_int(!truthy(&args[0])))
}

const LENGTH: PrimitiveFn = PrimitiveFn {
    name: "length",
    fn_ptr: length_,
    arity: Arity::exactly(1),
};

fn length_(args: &[Value]) -> evaluator::Result {
    match &args[0] {
        Value::Str(s) => Ok(Value::Integer(s.chars().count() as Int)),
        other => other
            .as_list()
            .map(|elements| Value::Integer(elements.len() as Int))
            .map_err(evaluator::Error::TypeMismatch),
    }
}

const CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    fn_ptr: cons_,
    arity: Arity::exactly(2),
};

fn cons_(args: &[Value]) -> evaluator::Result {
    let tail = args[1].as_list()?;
    let mut elements = Vec::with_capacity(tail.len() + 1);
    elements.push(args[0].clone());
    elements.extend(tail.iter().cloned());
    Ok(Value::wrap_list(elements))
}

const CAR: PrimitiveFn = PrimitiveFn {
    name: "car",
    fn_ptr: car_,
    arity: Arity::exactly(1),
};

fn car_(args: &[Value]) -> evaluator::Result {
    args[0]
        .as_list()?
        .first()
        .cloned()
        .ok_or(evaluator::Error::EmptySequence("car"))
}

const CDR: PrimitiveFn = PrimitiveFn {
    name: "cdr",
    fn_ptr: cdr_,
    arity: Arity::exactly(1),
};

fn cdr_(args: &[Value]) -> evaluator::Result {
    let elements = args[0].as_list()?;
    let tail = match elements.is_empty() {
        true => Vec::new(),
        false => elements[1..].to_vec(),
    };
    Ok(Value::wrap_list(tail))
}

const APPEND: PrimitiveFn = PrimitiveFn {
    name: "append",
    fn_ptr: append_,
    arity: Arity::exactly(2),
};

fn append_(args: &[Value]) -> evaluator::Result {
    let mut elements = args[0].as_list()?.to_vec();
    elements.extend(args[1].as_list()?.iter().cloned());
    Ok(Value::wrap_list(elements))
}

const LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    fn_ptr: list_,
    arity: Arity::at_least(0),
};

fn list_(args: &[Value]) -> evaluator::Result {
    Ok(Value::wrap_list(args.to_vec()))
}

const LIST_TEST: PrimitiveFn = PrimitiveFn {
    name: "list?",
    fn_ptr: list_test_,
    arity: Arity::exactly(1),
};

fn list_test_(args: &[Value]) -> evaluator::Result {
    Ok(bool_int(args[0].as_list().is_ok()))
}

const NULL_TEST: PrimitiveFn = PrimitiveFn {
    name: "null?",
    fn_ptr: null_test_,
    arity: Arity::exactly(1),
};

fn null_test_(args: &[Value]) -> evaluator::Result {
    let is_empty_list = match args[0].as_list() {
        Ok(elements) => elements.is_empty(),
        Err(_) => false,
    };
    Ok(bool_int(is_empty_list))
}

const SYMBOL_TEST: PrimitiveFn = PrimitiveFn {
    name: "symbol?",
    fn_ptr: symbol_test_,
    arity: Arity::exactly(1),
};

fn symbol_test_(args: &[Value]) -> evaluator::Result {
    Ok(bool_int(args[0].as_symbol().is_ok()))
}

macro_rules! math_primitive {
    ($NAME:ident) => {
        paste::item! {
            const [<$NAME:upper>]: PrimitiveFn = PrimitiveFn {
                name: stringify!($NAME),
                fn_ptr: |args: &[Value]| {
                    let x = as_number(&args[0])?.to_f64();
                    Ok(Value::Float(f64::$NAME(x)))
                },
                arity: Arity::exactly(1),
            };
        }
    };
}

math_primitive!(sqrt);
math_primitive!(sin);
math_primitive!(cos);
math_primitive!(tan);
math_primitive!(asin);
math_primitive!(acos);
math_primitive!(atan);
math_primitive!(sinh);
math_primitive!(cosh);
math_primitive!(tanh);
math_primitive!(exp);
math_primitive!(log10);
math_primitive!(floor);
math_primitive!(ceil);
math_primitive!(abs);
math_primitive!(trunc);

// Named for the math library, where log means the natural logarithm.
const LOG: PrimitiveFn = PrimitiveFn {
    name: "log",
    fn_ptr: |args: &[Value]| {
        let x = as_number(&args[0])?.to_f64();
        Ok(Value::Float(x.ln()))
    },
    arity: Arity::exactly(1),
};

fn math_binary(args: &[Value], op: fn(f64, f64) -> f64) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(Value::Float(op(x.to_f64(), y.to_f64()))),
        _ => unreachable!(),
    }
}

const POW: PrimitiveFn = PrimitiveFn {
    name: "pow",
    fn_ptr: |args: &[Value]| math_binary(args, f64::powf),
    arity: Arity::exactly(2),
};

const ATAN2: PrimitiveFn = PrimitiveFn {
    name: "atan2",
    fn_ptr: |args: &[Value]| math_binary(args, f64::atan2),
    arity: Arity::exactly(2),
};

const HYPOT: PrimitiveFn = PrimitiveFn {
    name: "hypot",
    fn_ptr: |args: &[Value]| math_binary(args, f64::hypot),
    arity: Arity::exactly(2),
};

static BUILTINS: &[PrimitiveFn] = &[
    // Arithmetic
    SUM,
    SUB,
    MUL,
    DIV,
    // Comparisons and equality
    GT,
    GE,
    LT,
    LE,
    EQUAL,
    EQUAL_TEST,
    EQ_TEST,
    NOT,
    // Working with lists
    LENGTH,
    CONS,
    CAR,
    CDR,
    APPEND,
    LIST,
    LIST_TEST,
    NULL_TEST,
    SYMBOL_TEST,
    // Math library
    SQRT,
    SIN,
    COS,
    TAN,
    ASIN,
    ACOS,
    ATAN,
    SINH,
    COSH,
    TANH,
    EXP,
    LOG,
    LOG10,
    FLOOR,
    CEIL,
    ABS,
    TRUNC,
    POW,
    ATAN2,
    HYPOT,
];

pub(crate) const CONSTANTS: &[(&str, f64)] = &[
    ("pi", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    ("tau", std::f64::consts::TAU),
];

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub(crate) static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for func in BUILTINS.iter() {
            map.insert(func.name, func);
        }
        map
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        assert_eq!(sum_(&[Value::Integer(1), Value::Integer(2)]).unwrap(), Value::Integer(3));
        assert_eq!(sum_(&[Value::Integer(1), Value::Float(2.5)]).unwrap(), Value::Float(3.5));
        assert_eq!(mul_(&[Value::Integer(2), Value::Float(3.5)]).unwrap(), Value::Float(7.0));
    }

    #[test]
    fn integer_division_floors() {
        assert_eq!(div_(&[Value::Integer(7), Value::Integer(2)]).unwrap(), Value::Integer(3));
        assert_eq!(div_(&[Value::Integer(-7), Value::Integer(2)]).unwrap(), Value::Integer(-4));
        assert_eq!(div_(&[Value::Integer(7), Value::Integer(-2)]).unwrap(), Value::Integer(-4));
        assert_eq!(div_(&[Value::Integer(-6), Value::Integer(2)]).unwrap(), Value::Integer(-3));
        assert_eq!(div_(&[Value::Integer(1), Value::Float(2.0)]).unwrap(), Value::Float(0.5));
    }

    #[test]
    fn integer_division_by_zero_fails() {
        match div_(&[Value::Integer(1), Value::Integer(0)]) {
            Err(evaluator::Error::DividedByZero) => {}
            other => panic!("expected DividedByZero, got {:?}", other),
        }
    }

    #[test]
    fn car_of_empty_list_fails() {
        let empty = Value::wrap_list(Vec::new());
        assert!(car_(&[empty]).is_err());
    }

    #[test]
    fn cdr_of_empty_list_is_empty() {
        let empty = Value::wrap_list(Vec::new());
        assert_eq!(cdr_(&[empty]).unwrap(), Value::wrap_list(Vec::new()));
    }

    #[test]
    fn equal_is_structural_but_eq_is_identity() {
        let a = Value::wrap_list(vec![Value::Integer(1)]);
        let b = Value::wrap_list(vec![Value::Integer(1)]);
        assert_eq!(equal_(&[a.clone(), b.clone()]).unwrap(), Value::Integer(1));
        assert_eq!(eq_test_(&[a.clone(), b]).unwrap(), Value::Integer(0));
        assert_eq!(eq_test_(&[a.clone(), a]).unwrap(), Value::Integer(1));
    }

    #[test]
    fn every_builtin_name_is_registered() {
        for name in &["+", "-", "*", "/", ">", "<", ">=", "<=", "=", "not", "equal?", "eq?",
                      "length", "cons", "car", "cdr", "append", "list", "list?", "null?",
                      "symbol?", "sqrt", "log", "pow"] {
            assert!(CORE.contains_key(name), "missing builtin {}", name);
        }
    }
}
