use crate::tokens::{tokenize, Token};
use crate::types::Value;
use std::fmt;
use std::iter::Peekable;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnexpectedEof,
    UnexpectedCloseParen,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "unexpected EOF while reading"),
            Error::UnexpectedCloseParen => write!(f, "unexpected )"),
        }
    }
}

/// Read exactly one expression from the front of `input`. Trailing tokens are
/// ignored.
pub fn read_str(input: &str) -> Result<Value, Error> {
    let tokens = tokenize(input);
    let mut reader = tokens.iter().peekable();
    read_form(&mut reader)
}

fn read_form(reader: &mut Reader) -> Result<Value, Error> {
    match reader.next() {
        Some(Token::OpenParen) => read_list(reader),
        Some(Token::CloseParen) => Err(Error::UnexpectedCloseParen),
        Some(Token::PlainChars(chars)) => Ok(read_atom(chars)),
        None => Err(Error::UnexpectedEof),
    }
}

fn read_list(reader: &mut Reader) -> Result<Value, Error> {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseParen) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_form(reader)?),
            None => return Err(Error::UnexpectedEof),
        }
    }
    Ok(Value::wrap_list(elements))
}

/// Integers become integers, floats become floats; every other token is a
/// symbol.
fn read_atom(chars: &str) -> Value {
    if let Ok(int) = chars.parse::<i64>() {
        Value::Integer(int)
    } else if let Ok(float) = chars.parse::<f64>() {
        Value::Float(float)
    } else {
        Value::new_symbol(chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn classifies_atoms() {
        assert_eq!(read_str("42").unwrap(), Value::Integer(42));
        assert_eq!(read_str("-7").unwrap(), Value::Integer(-7));
        assert_eq!(read_str("3.5").unwrap(), Value::Float(3.5));
        assert_eq!(read_str("foo").unwrap(), Value::new_symbol("foo"));
        // A lone sign is not a number
        assert_eq!(read_str("-").unwrap(), Value::new_symbol("-"));
    }

    #[test]
    fn reads_nested_lists() {
        let form = read_str("(+ 1 (* 2 3))").unwrap();
        let outer = form.as_list().unwrap();
        assert_eq!(outer.len(), 3);
        assert_eq!(outer[0], Value::new_symbol("+"));
        let inner = outer[2].as_list().unwrap();
        assert_eq!(inner.len(), 3);
        assert_eq!(inner[2], Value::Integer(3));
    }

    #[test]
    fn unclosed_list_is_eof() {
        assert_eq!(read_str("(").unwrap_err(), Error::UnexpectedEof);
        assert_eq!(read_str("(+ 1 2").unwrap_err(), Error::UnexpectedEof);
        assert_eq!(read_str("").unwrap_err(), Error::UnexpectedEof);
    }

    #[test]
    fn bare_close_paren_is_rejected() {
        assert_eq!(read_str(")").unwrap_err(), Error::UnexpectedCloseParen);
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        assert_eq!(read_str("1 2 3").unwrap(), Value::Integer(1));
        assert_eq!(read_str("(+ 1 2))").unwrap().as_list().unwrap().len(), 3);
    }
}
