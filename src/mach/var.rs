use super::Val;
use crate::error;
use crate::lang::{Error, Node, Primitive};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// A named, typed, mutable binding created by a `definition` node.
#[derive(Debug)]
pub struct Variable {
    name: String,
    primitive: Primitive,
    value: Val,
}

impl Variable {
    pub fn new(name: &str, primitive: Primitive, value: Val) -> Result<Variable> {
        if name.is_empty() {
            return Err(error!(BadDefinition; "VARIABLE NAME IS EMPTY"));
        }
        if !value.matches(primitive) {
            return Err(error!(BadDefinition; "VALUE DOES NOT MATCH DECLARED PRIMITIVE"));
        }
        Ok(Variable {
            name: name.to_string(),
            primitive,
            value,
        })
    }

    /// A binding initialized to its primitive's default, for definitions
    /// without an initializer expression.
    pub fn with_default(name: &str, primitive: Primitive) -> Result<Variable> {
        let value = match primitive {
            Primitive::String => Val::String(String::new()),
            Primitive::Number => Val::Integer(0),
            Primitive::Boolean => Val::Bool(false),
            Primitive::List => Val::List(vec![]),
        };
        Variable::new(name, primitive, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    pub fn value(&self) -> &Val {
        &self.value
    }
}

/// ## Variable memory
///
/// Maps definition ids to bindings. Capacity bounded; `add` never overwrites
/// an existing id; reads of unknown ids are fatal to the run. Anonymous loop
/// counters live in a reserved `@N` key namespace so they cannot collide
/// with editor-assigned definition ids.
#[derive(Debug, Default)]
pub struct VarStore {
    vars: HashMap<String, Variable>,
    counters: usize,
}

const MAX_VARIABLES: usize = 1024;

impl VarStore {
    pub fn new() -> VarStore {
        VarStore::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn add(&mut self, key: &str, variable: Variable) -> Result<()> {
        if self.vars.len() >= MAX_VARIABLES {
            return Err(error!(VariableStoreFull));
        }
        // first definition wins; redefinition of an id is ignored
        if self.vars.contains_key(key) {
            tracing::debug!(key, "ignoring redefinition of existing variable");
            return Ok(());
        }
        tracing::debug!(key, name = variable.name(), "defined variable");
        self.vars.insert(key.to_string(), variable);
        Ok(())
    }

    /// Allocate an anonymous numeric counter, returning its key.
    pub fn add_counter(&mut self, initial: i64) -> Result<String> {
        let key = format!("@{}", self.counters);
        self.counters += 1;
        let variable = Variable::new(&key, Primitive::Number, Val::Integer(initial))?;
        self.add(&key, variable)?;
        Ok(key)
    }

    pub fn get(&self, key: &str) -> Result<&Variable> {
        match self.vars.get(key) {
            Some(variable) => Ok(variable),
            None => Err(error!(KeyNotFound)),
        }
    }

    pub fn set(&mut self, key: &str, value: Val) -> Result<()> {
        let variable = match self.vars.get_mut(key) {
            Some(variable) => variable,
            None => return Err(error!(KeyNotFound)),
        };
        if !value.matches(variable.primitive) {
            return Err(error!(TypeMismatch; "VALUE DOES NOT MATCH DECLARED PRIMITIVE"));
        }
        variable.value = value;
        Ok(())
    }

    /// Append an unreduced item node to a list-typed variable.
    pub fn append(&mut self, key: &str, item: Node) -> Result<()> {
        let variable = match self.vars.get_mut(key) {
            Some(variable) => variable,
            None => return Err(error!(KeyNotFound)),
        };
        match &mut variable.value {
            Val::List(nodes) => {
                nodes.push(item);
                Ok(())
            }
            _ => Err(error!(TypeMismatch; "APPEND TARGET IS NOT A LIST")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ErrorCode, Kind, Scalar};

    #[test]
    fn test_add_then_get_returns_last_set() {
        let mut store = VarStore::new();
        let variable = Variable::new("x", Primitive::Number, Val::Integer(1)).unwrap();
        store.add("1", variable).unwrap();
        store.set("1", Val::Integer(7)).unwrap();
        assert_eq!(store.get("1").unwrap().value(), &Val::Integer(7));
    }

    #[test]
    fn test_get_unknown_key_fails() {
        let store = VarStore::new();
        assert_eq!(store.get("nope").unwrap_err().code(), ErrorCode::KeyNotFound);
    }

    #[test]
    fn test_add_never_overwrites() {
        let mut store = VarStore::new();
        let first = Variable::new("x", Primitive::Number, Val::Integer(1)).unwrap();
        let second = Variable::new("y", Primitive::Number, Val::Integer(2)).unwrap();
        store.add("1", first).unwrap();
        store.add("1", second).unwrap();
        assert_eq!(store.get("1").unwrap().name(), "x");
    }

    #[test]
    fn test_bad_definition() {
        let error = Variable::new("", Primitive::Number, Val::Integer(0)).unwrap_err();
        assert_eq!(error.code(), ErrorCode::BadDefinition);
        let error = Variable::new("x", Primitive::Number, Val::Bool(true)).unwrap_err();
        assert_eq!(error.code(), ErrorCode::BadDefinition);
    }

    #[test]
    fn test_set_enforces_primitive() {
        let mut store = VarStore::new();
        let variable = Variable::with_default("x", Primitive::Number).unwrap();
        store.add("1", variable).unwrap();
        let error = store.set("1", Val::String("no".into())).unwrap_err();
        assert_eq!(error.code(), ErrorCode::TypeMismatch);
        // number accepts both integral and real values
        store.set("1", Val::Real(0.5)).unwrap();
    }

    #[test]
    fn test_counter_keys_are_reserved() {
        let mut store = VarStore::new();
        let first = store.add_counter(0).unwrap();
        let second = store.add_counter(0).unwrap();
        assert_eq!(first, "@0");
        assert_eq!(second, "@1");
    }

    #[test]
    fn test_capacity_bound() {
        let mut store = VarStore::new();
        for i in 0..1024 {
            let variable = Variable::with_default("v", Primitive::Number).unwrap();
            store.add(&i.to_string(), variable).unwrap();
        }
        let variable = Variable::with_default("v", Primitive::Number).unwrap();
        let error = store.add("overflow", variable).unwrap_err();
        assert_eq!(error.code(), ErrorCode::VariableStoreFull);
    }

    #[test]
    fn test_append_requires_list() {
        let mut store = VarStore::new();
        store
            .add("1", Variable::with_default("l", Primitive::List).unwrap())
            .unwrap();
        store
            .add("2", Variable::with_default("n", Primitive::Number).unwrap())
            .unwrap();
        let item = Node::new(Kind::Literal {
            expression: Scalar::Integer(4),
        });
        store.append("1", item.clone()).unwrap();
        match store.get("1").unwrap().value() {
            Val::List(nodes) => assert_eq!(nodes.len(), 1),
            val => panic!("unexpected value {:?}", val),
        }
        assert_eq!(store.append("2", item).unwrap_err().code(), ErrorCode::TypeMismatch);
    }
}
