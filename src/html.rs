use crate::environment::Environment;
use crate::evaluator::{self, Result};
use crate::printer;
use crate::types::{Symbol, Value};
use std::collections::HashSet;
use std::rc::Rc;

lazy_static! {
    static ref TAGS: HashSet<&'static str> = [
        "html", "head", "body", "link", "script", "p", "img", "b", "i", "strong", "video",
        "audio", "h1", "h2", "h3", "h4", "h5", "h6", "div",
    ]
    .iter()
    .copied()
    .collect();

    /// Tags with no closing counterpart.
    static ref VOID_TAGS: HashSet<&'static str> = ["img"].iter().copied().collect();
}

pub fn is_tag(name: &Symbol) -> bool {
    TAGS.contains(name.as_str())
}

/// Emit `<tag attrs>inner</tag>` (or `<tag attrs>` for void tags) from a
/// `(tag part*)` form. List parts are evaluated and appended to this
/// invocation's inner HTML; bare tokens of the form `key=value` become
/// attributes, in encounter order; any other bare token is literal inner
/// text. Each invocation builds its own inner-HTML buffer, so nested tags
/// compose without leaking partial output into one another.
pub fn emit_tag(name: &Symbol, parts: &[Value], env: &Rc<Environment>) -> Result {
    let mut attributes = String::new();
    let mut inner = String::new();
    for part in parts {
        match part {
            Value::List(_) => {
                let value = evaluator::eval(part, env)?;
                match value {
                    Value::Str(fragment) => inner.push_str(&fragment),
                    other => inner.push_str(&printer::pr_str(&other)),
                }
            }
            Value::Symbol(token) => {
                let text = strip_quotes(token.as_str());
                // Split on the first '=' only; values containing '=' are
                // unsupported.
                match split_attribute(text) {
                    Some((key, value)) => {
                        attributes.push_str(&format!(" {}=\"{}\"", key, value))
                    }
                    None => inner.push_str(text),
                }
            }
            // Bare numbers contribute nothing to a tag form.
            _ => {}
        }
    }
    let markup = match VOID_TAGS.contains(name.as_str()) {
        true => format!("<{}{}>", name, attributes),
        false => format!("<{}{}>{}</{}>", name, attributes, inner, name),
    };
    Ok(Value::Str(markup))
}

fn split_attribute(token: &str) -> Option<(&str, &str)> {
    let pos = token.find('=')?;
    Some((&token[..pos], &token[pos + 1..]))
}

/// The tokenizer has no notion of string literals, so quotes around a part
/// arrive as ordinary characters; drop a matched surrounding pair.
fn strip_quotes(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}
