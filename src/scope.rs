//! Lexical scope and access-control tracking.
//!
//! The parser pushes a scope when it enters a namespace or class body and
//! pops it on the closing brace. Each scope carries the "current" access
//! control, which `public:`/`protected:`/`private:` labels overwrite in
//! place on the actual top-of-stack slot.

use serde::Serialize;
use thiserror::Error;

/// Maximum lexical nesting depth.
pub const MAX_SCOPE_DEPTH: usize = 64;

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessControl {
    Public,
    Protected,
    Private,
}

/// What kind of lexical context a scope is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Global,
    Namespace,
    Class,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Empty for the global scope.
    pub name: String,
    /// Current access control for declarations in this scope.
    pub access: AccessControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("scope depth exceeded")]
    DepthExceeded,
    #[error("scope underflow")]
    Underflow,
}

/// Bounded stack of scopes. The bottom entry is always the global scope
/// (kind = Global, empty name, public access) and can never be popped.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                kind: ScopeKind::Global,
                name: String::new(),
                access: AccessControl::Public,
            }],
        }
    }

    pub fn push(
        &mut self,
        name: String,
        kind: ScopeKind,
        access: AccessControl,
    ) -> Result<(), ScopeError> {
        if self.scopes.len() >= MAX_SCOPE_DEPTH {
            return Err(ScopeError::DepthExceeded);
        }
        self.scopes.push(Scope { kind, name, access });
        Ok(())
    }

    pub fn pop(&mut self) -> Result<(), ScopeError> {
        if self.scopes.len() == 1 {
            return Err(ScopeError::Underflow);
        }
        self.scopes.pop();
        Ok(())
    }

    pub fn current(&self) -> &Scope {
        // Invariant: the global scope is never popped.
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn current_access(&self) -> AccessControl {
        self.current().access
    }

    /// Overwrites the access control of the top-of-stack entry in place.
    pub fn set_current_access(&mut self, access: AccessControl) {
        if let Some(top) = self.scopes.last_mut() {
            top.access = access;
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_scope_is_seeded() {
        let scopes = ScopeStack::new();
        assert_eq!(scopes.depth(), 1);
        assert_eq!(scopes.current().kind, ScopeKind::Global);
        assert_eq!(scopes.current().name, "");
        assert_eq!(scopes.current_access(), AccessControl::Public);
    }

    #[test]
    fn test_push_pop() {
        let mut scopes = ScopeStack::new();
        scopes
            .push("Foo".to_string(), ScopeKind::Class, AccessControl::Private)
            .unwrap();
        assert_eq!(scopes.current().name, "Foo");
        assert_eq!(scopes.current_access(), AccessControl::Private);
        scopes.pop().unwrap();
        assert_eq!(scopes.current().kind, ScopeKind::Global);
    }

    #[test]
    fn test_set_current_access_mutates_top_slot() {
        let mut scopes = ScopeStack::new();
        scopes
            .push("A".to_string(), ScopeKind::Class, AccessControl::Private)
            .unwrap();
        scopes.set_current_access(AccessControl::Public);
        assert_eq!(scopes.current_access(), AccessControl::Public);
        scopes.pop().unwrap();
        // The global scope was not touched.
        assert_eq!(scopes.current_access(), AccessControl::Public);
    }

    #[test]
    fn test_depth_limit() {
        let mut scopes = ScopeStack::new();
        for i in 1..MAX_SCOPE_DEPTH {
            scopes
                .push(format!("ns{}", i), ScopeKind::Namespace, AccessControl::Public)
                .unwrap();
        }
        assert_eq!(
            scopes.push("over".to_string(), ScopeKind::Namespace, AccessControl::Public),
            Err(ScopeError::DepthExceeded)
        );
    }

    #[test]
    fn test_cannot_pop_global_scope() {
        let mut scopes = ScopeStack::new();
        assert_eq!(scopes.pop(), Err(ScopeError::Underflow));
    }
}
