use std::collections::HashMap;
use std::f64::consts;

use crate::number::Number;

pub const GRAVITY: f64 = 9.8;

/// Variable bindings shared by the statements of one session.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<String, Number>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variables: HashMap::new(),
        }
    }

    /// An environment holding the built-in constants `pi`, `e` and `g`.
    pub fn seeded() -> Self {
        let mut env = Environment::new();
        env.set("pi", Number::Float(consts::PI));
        env.set("e", Number::Float(consts::E));
        env.set("g", Number::Float(GRAVITY));
        env
    }

    pub fn get(&self, name: &str) -> Option<Number> {
        self.variables.get(name).copied()
    }

    pub fn set(&mut self, name: &str, value: Number) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Number)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn to_map(&self) -> HashMap<String, Number> {
        self.variables.clone()
    }
}
