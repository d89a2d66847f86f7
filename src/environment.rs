use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

#[derive(Default)]
struct Scope {
    store: HashMap<String, Object>,
    outer: Option<Environment>,
}

/// A shared handle to one scope in a chain of scopes.
///
/// Cloning the handle does not copy the bindings: closures keep a clone of
/// the environment they were defined in and observe later changes to it.
#[derive(Default, Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn new_enclosed(outer: &Environment) -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                store: HashMap::new(),
                outer: Some(outer.clone()),
            })),
        }
    }

    /// Resolves `name` from the innermost scope outwards.
    pub fn get(&self, name: &str) -> Option<Object> {
        let scope = self.scope.borrow();
        match scope.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => scope.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Binds `name` in this scope only, replacing any earlier binding here.
    pub fn set(&self, name: &str, val: Object) {
        self.scope.borrow_mut().store.insert(name.to_owned(), val);
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }
}

impl Debug for Environment {
    // Bindings can refer back to this environment through closures, so only
    // the names are printed.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let scope = self.scope.borrow();
        let mut names: Vec<&String> = scope.store.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosed", &scope.outer.is_some())
            .finish()
    }
}
