use std::collections::HashMap;

use crate::{error::RuntimeError, interpreter::value::core::Value};

/// Index of a scope inside an [`Environment`].
pub type ScopeId = usize;

/// The bindings of one lexical scope.
#[derive(Debug, Default)]
struct Scope {
    variables: HashMap<String, Value>,
    constants: HashMap<String, Value>,
    parent:    Option<ScopeId>,
}

impl Scope {
    fn declares(&self, name: &str) -> bool {
        self.variables.contains_key(name) || self.constants.contains_key(name)
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).or_else(|| self.constants.get(name))
    }
}

/// The chain of scopes a program runs in.
///
/// Scopes live in an arena and point to their parent by index. Blocks and
/// `for` loops open a child of the current scope with [`Environment::enter`]
/// and close it with [`Environment::restore`]. Nothing outlives the
/// construct that opened it, so closing a scope also frees it.
///
/// # Example
/// ```
/// use pencil::interpreter::{environment::Environment, value::core::Value};
///
/// let mut env = Environment::new();
/// env.define_var("@a", Value::Number(1.0)).unwrap();
///
/// let outer = env.enter();
/// env.define_var("@a", Value::Number(2.0)).unwrap();
/// assert_eq!(env.get("@a").unwrap(), Value::Number(2.0));
/// env.restore(outer);
///
/// assert_eq!(env.get("@a").unwrap(), Value::Number(1.0));
/// ```
#[derive(Debug)]
pub struct Environment {
    scopes:  Vec<Scope>,
    current: ScopeId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the empty root scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:  vec![Scope::default()],
               current: 0, }
    }

    /// The scope new bindings go into.
    #[must_use]
    pub const fn current(&self) -> ScopeId {
        self.current
    }

    /// Opens a child of the current scope and makes it current.
    ///
    /// # Returns
    /// The previously current scope, to hand back to [`Self::restore`].
    pub fn enter(&mut self) -> ScopeId {
        let previous = self.current;
        self.scopes.push(Scope { parent: Some(previous),
                                 ..Scope::default() });
        self.current = self.scopes.len() - 1;
        previous
    }

    /// Makes `scope` current again and drops every scope opened after it.
    pub fn restore(&mut self, scope: ScopeId) {
        self.scopes.truncate(scope + 1);
        self.current = scope;
    }

    /// Declares a mutable binding in the current scope.
    ///
    /// # Errors
    /// [`RuntimeError::Redeclared`] if the current scope already holds `name`
    /// as a variable or a constant.
    pub fn define_var(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        self.define(name, value, false)
    }

    /// Declares a constant binding in the current scope.
    ///
    /// # Errors
    /// [`RuntimeError::Redeclared`] if the current scope already holds `name`
    /// as a variable or a constant.
    pub fn define_const(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        self.define(name, value, true)
    }

    fn define(&mut self, name: &str, value: Value, constant: bool) -> Result<(), RuntimeError> {
        let scope = &mut self.scopes[self.current];
        if scope.declares(name) {
            return Err(RuntimeError::Redeclared { name: name.to_owned() });
        }

        let bindings = if constant {
            &mut scope.constants
        } else {
            &mut scope.variables
        };
        bindings.insert(name.to_owned(), value);
        Ok(())
    }

    /// Reads `name` from the nearest scope that declares it.
    ///
    /// # Errors
    /// [`RuntimeError::UndefinedVariable`] if no enclosing scope does.
    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        self.chain()
            .find_map(|scope| scope.lookup(name))
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_owned() })
    }

    /// Returns `true` if any enclosing scope declares `name`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.chain().any(|scope| scope.declares(name))
    }

    /// Overwrites `name` in the nearest scope that declares it.
    ///
    /// # Errors
    /// - [`RuntimeError::ConstantAssignment`] if that scope holds `name` as a
    ///   constant.
    /// - [`RuntimeError::UndefinedAssignment`] if no enclosing scope declares
    ///   `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        let mut id = Some(self.current);
        while let Some(index) = id {
            let scope = &mut self.scopes[index];
            if let Some(slot) = scope.variables.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            if scope.constants.contains_key(name) {
                return Err(RuntimeError::ConstantAssignment { name: name.to_owned() });
            }
            id = scope.parent;
        }
        Err(RuntimeError::UndefinedAssignment { name: name.to_owned() })
    }

    /// Walks from the current scope out to the root.
    fn chain(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(self.scopes.get(self.current), |scope| {
            scope.parent.and_then(|parent| self.scopes.get(parent))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn redeclaring_in_one_scope_fails_across_kinds() {
        let mut env = Environment::new();
        env.define_var("@a", number(1.0)).unwrap();
        assert_eq!(env.define_var("@a", number(2.0)),
                   Err(RuntimeError::Redeclared { name: "@a".into() }));
        assert_eq!(env.define_const("@a", number(2.0)),
                   Err(RuntimeError::Redeclared { name: "@a".into() }));

        env.define_const("@b", number(1.0)).unwrap();
        assert_eq!(env.define_var("@b", number(2.0)),
                   Err(RuntimeError::Redeclared { name: "@b".into() }));
    }

    #[test]
    fn shadowing_is_local_to_the_inner_scope() {
        let mut env = Environment::new();
        env.define_var("@a", number(1.0)).unwrap();

        let outer = env.enter();
        env.define_const("@a", number(2.0)).unwrap();
        assert_eq!(env.get("@a"), Ok(number(2.0)));
        env.restore(outer);

        assert_eq!(env.get("@a"), Ok(number(1.0)));
    }

    #[test]
    fn assignment_writes_the_nearest_owner() {
        let mut env = Environment::new();
        env.define_var("@a", number(1.0)).unwrap();

        let outer = env.enter();
        env.assign("@a", number(5.0)).unwrap();
        env.restore(outer);

        assert_eq!(env.get("@a"), Ok(number(5.0)));
    }

    #[test]
    fn constants_cannot_be_assigned_even_from_inner_scopes() {
        let mut env = Environment::new();
        env.define_const("@c", number(1.0)).unwrap();
        let _outer = env.enter();
        assert_eq!(env.assign("@c", number(2.0)),
                   Err(RuntimeError::ConstantAssignment { name: "@c".into() }));
    }

    #[test]
    fn inner_variable_hides_outer_constant_for_assignment() {
        let mut env = Environment::new();
        env.define_const("@c", number(1.0)).unwrap();
        let outer = env.enter();
        env.define_var("@c", number(2.0)).unwrap();
        assert_eq!(env.assign("@c", number(3.0)), Ok(()));
        env.restore(outer);
        assert_eq!(env.get("@c"), Ok(number(1.0)));
    }

    #[test]
    fn missing_names_are_reported() {
        let mut env = Environment::new();
        assert_eq!(env.get("@x"),
                   Err(RuntimeError::UndefinedVariable { name: "@x".into() }));
        assert_eq!(env.assign("@x", Value::Null),
                   Err(RuntimeError::UndefinedAssignment { name: "@x".into() }));
        assert!(!env.has("@x"));
    }

    #[test]
    fn null_bindings_still_exist() {
        let mut env = Environment::new();
        env.define_var("@n", Value::Null).unwrap();
        assert!(env.has("@n"));
        assert_eq!(env.get("@n"), Ok(Value::Null));
    }

    #[test]
    fn restore_discards_nested_scopes() {
        let mut env = Environment::new();
        let root = env.enter();
        env.enter();
        env.define_var("@deep", Value::Null).unwrap();
        env.restore(root);

        assert_eq!(env.current(), root);
        assert!(!env.has("@deep"));
        env.define_var("@deep", Value::Null).unwrap();
    }
}
