//! # Scope Tree
//!
//! A static view of the program's lexical nesting, built from the raw token
//! stream before parsing even starts. Because there are no declarations in
//! the language, the first occurrence of an identifier in a scope chain acts
//! as its declaration, and slot assignment runs strictly in token order.
//!
//! The code generator later walks this tree in lock-step with the AST: each
//! scope keeps a `scopes_traversed` cursor that tells the generator which
//! child scope comes next, so neither structure needs pointers into the
//! other.

use crate::compiler::error::CompileError;
use crate::compiler::lexer::Token;
use crate::util::AssocList;

/// Sentinel offset for names not present in a scope's variable list.
const UNDECLARED: i64 = -1;

/// Index of a scope inside its [`ScopeTree`].
pub type ScopeId = usize;

/// Where a variable lives relative to the frame in which it is referenced:
/// `scopes_up` saved base pointers to chase, then `offset` bytes below that
/// frame's base pointer. `offset` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableAddress {
    pub scopes_up: usize,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub sub_scopes: Vec<ScopeId>,
    pub variables_declared: AssocList<i64>,
    pub scopes_traversed: usize,
    pub break_label: Option<String>,
    pub continue_label: Option<String>,
}

/// The whole nesting structure of one compilation, rooted at the synthetic
/// top-level scope.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub const ROOT: ScopeId = 0;

    /// Creates a tree containing only the root scope.
    pub fn new() -> Self {
        let mut tree = Self { scopes: Vec::new() };
        tree.new_scope(None);
        tree
    }

    /// Builds the complete tree by scanning the token stream once: `{` opens
    /// a child scope, `}` returns to the parent, and every identifier is
    /// declared in the scope where it first appears.
    pub fn from_tokens(tokens: &[Token]) -> Result<Self, CompileError> {
        let mut tree = Self::new();
        let mut current = Self::ROOT;

        for token in tokens {
            match token {
                Token::BraceOpen => {
                    current = tree.new_scope(Some(current));
                }
                Token::BraceClose => {
                    current = tree
                        .scope(current)
                        .parent
                        .ok_or_else(|| CompileError::scope("mismatched braces"))?;
                }
                Token::Ident(name) => {
                    tree.declare_variable(current, name);
                }
                _ => {}
            }
        }

        if current != Self::ROOT {
            return Err(CompileError::scope("mismatched braces"));
        }
        Ok(tree)
    }

    /// Creates a scope, registering it with its parent when one is given.
    pub fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope {
            parent,
            sub_scopes: Vec::new(),
            variables_declared: AssocList::new(UNDECLARED),
            scopes_traversed: 0,
            break_label: None,
            continue_label: None,
        });
        let id = self.scopes.len() - 1;
        if let Some(parent) = parent {
            self.scopes[parent].sub_scopes.push(id);
        }
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id]
    }

    /// Declares `name` in `target` unless it is already visible there.
    /// Idempotent: repeated declarations never consume extra slots.
    pub fn declare_variable(&mut self, target: ScopeId, name: &str) {
        if self.already_declared(target, name) {
            return;
        }
        let scope = &mut self.scopes[target];
        let offset = (scope.variables_declared.len() as i64 + 1) * 8;
        scope.variables_declared.put(name, offset);
    }

    fn already_declared(&self, scope: ScopeId, name: &str) -> bool {
        if self.scopes[scope].variables_declared.get(name) != UNDECLARED {
            return true;
        }
        match self.scopes[scope].parent {
            Some(parent) => self.already_declared(parent, name),
            None => false,
        }
    }

    /// Resolves `name` from `scope`, climbing towards the root. Failing to
    /// find it anywhere on the chain is fatal.
    pub fn variable_location(
        &self,
        scope: ScopeId,
        name: &str,
    ) -> Result<VariableAddress, CompileError> {
        let mut current = Some(scope);
        let mut scopes_up = 0;
        while let Some(id) = current {
            let offset = self.scopes[id].variables_declared.get(name);
            if offset != UNDECLARED {
                return Ok(VariableAddress { scopes_up, offset });
            }
            current = self.scopes[id].parent;
            scopes_up += 1;
        }
        Err(CompileError::scope(format!(
            "use of undeclared variable {name}"
        )))
    }

    /// The child scope the generator should descend into next. Does not
    /// advance the cursor; the generator increments `scopes_traversed` when
    /// it leaves the child.
    pub fn next_child_scope(&self, scope: ScopeId) -> Option<ScopeId> {
        let parent = &self.scopes[scope];
        parent.sub_scopes.get(parent.scopes_traversed).copied()
    }

    /// Number of variables declared directly in `scope`.
    pub fn local_count(&self, scope: ScopeId) -> usize {
        self.scopes[scope].variables_declared.len()
    }

    /// Rewinds every traversal cursor so the tree can be walked again.
    pub fn reset_traversal(&mut self) {
        for scope in &mut self.scopes {
            scope.scopes_traversed = 0;
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
