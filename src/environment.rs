use crate::core;
use crate::types::{Symbol, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
pub struct UnknownSymbol(pub Symbol);

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unbound variable '{}'", self.0)
    }
}

/// One frame in the chained symbol table. Frames are shared: every closure
/// holds an `Rc` to the frame it was created in, so a frame lives as long as
/// the longest-lived closure referencing it.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<Symbol, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn spawn_from(parent: &Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent.clone()),
        })
    }

    /// A child frame binding each parameter to the argument at the same
    /// index. The caller is responsible for checking the counts match.
    pub fn binds(parent: &Rc<Environment>, parameters: &[Symbol], args: &[Value]) -> Rc<Environment> {
        let env = Self::spawn_from(parent);
        for (key, value) in parameters.iter().zip(args) {
            env.set(key.clone(), value.clone());
        }
        env
    }

    /// Insert or overwrite a binding in this frame only, shadowing any
    /// same-named binding in outer frames.
    pub fn set(&self, key: Symbol, value: Value) -> Option<Value> {
        self.bindings.borrow_mut().insert(key, value)
    }

    /// Innermost-first chain search.
    pub fn get(&self, key: &Symbol) -> Option<Value> {
        let own = self.bindings.borrow().get(key).cloned();
        match own {
            Some(value) => Some(value),
            None => self.parent.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    pub fn fetch(&self, key: &Symbol) -> Result<Value, UnknownSymbol> {
        self.get(key).ok_or_else(|| UnknownSymbol(key.clone()))
    }

    /// Mutate the nearest existing binding in the chain (`set!` semantics).
    /// Unlike `set`, this never creates a binding.
    pub fn assign(&self, key: &Symbol, value: Value) -> Result<(), UnknownSymbol> {
        if self.bindings.borrow().contains_key(key) {
            self.bindings.borrow_mut().insert(key.clone(), value);
            return Ok(());
        }
        match &self.parent {
            Some(outer) => outer.assign(key, value),
            None => Err(UnknownSymbol(key.clone())),
        }
    }
}

impl Default for Environment {
    /// The root frame, seeded with the built-in procedures and math
    /// constants.
    fn default() -> Self {
        let env = Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        };
        for (&name, &func) in core::CORE.iter() {
            env.set(Symbol::from(name), Value::Primitive(func));
        }
        for &(name, value) in core::CONSTANTS.iter() {
            env.set(Symbol::from(name), Value::Float(value));
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Rc<Environment> {
        Rc::new(Environment::default())
    }

    #[test]
    fn root_frame_is_seeded() {
        let env = root();
        assert!(env.get(&Symbol::from("+")).is_some());
        assert!(env.get(&Symbol::from("car")).is_some());
        assert!(env.get(&Symbol::from("sqrt")).is_some());
        assert!(env.get(&Symbol::from("pi")).is_some());
    }

    #[test]
    fn lookup_searches_innermost_first() {
        let outer = root();
        outer.set(Symbol::from("x"), Value::Integer(1));
        let inner = Environment::spawn_from(&outer);
        inner.set(Symbol::from("x"), Value::Integer(2));
        assert_eq!(inner.get(&Symbol::from("x")), Some(Value::Integer(2)));
        assert_eq!(outer.get(&Symbol::from("x")), Some(Value::Integer(1)));
    }

    #[test]
    fn set_never_touches_outer_frames() {
        let outer = root();
        outer.set(Symbol::from("x"), Value::Integer(1));
        let inner = Environment::spawn_from(&outer);
        inner.set(Symbol::from("x"), Value::Integer(99));
        assert_eq!(outer.get(&Symbol::from("x")), Some(Value::Integer(1)));
    }

    #[test]
    fn assign_mutates_nearest_existing_binding() {
        let outer = root();
        outer.set(Symbol::from("x"), Value::Integer(1));
        let inner = Environment::spawn_from(&outer);
        inner.assign(&Symbol::from("x"), Value::Integer(2)).unwrap();
        assert_eq!(outer.get(&Symbol::from("x")), Some(Value::Integer(2)));
    }

    #[test]
    fn assign_to_unbound_fails_everywhere_in_the_chain() {
        let outer = root();
        let inner = Environment::spawn_from(&outer);
        assert!(inner.assign(&Symbol::from("nope"), Value::Nil).is_err());
    }

    #[test]
    fn binds_pairs_parameters_with_arguments() {
        let parent = root();
        let params = [Symbol::from("a"), Symbol::from("b")];
        let args = [Value::Integer(1), Value::Integer(2)];
        let env = Environment::binds(&parent, &params, &args);
        assert_eq!(env.get(&Symbol::from("a")), Some(Value::Integer(1)));
        assert_eq!(env.get(&Symbol::from("b")), Some(Value::Integer(2)));
    }
}
