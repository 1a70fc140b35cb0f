//! Built-in self-tests for the utility containers and the scope logic,
//! reachable through the `--test` command-line flag. Kept separate from the
//! `#[cfg(test)]` suites so a release binary can check itself.

use crate::compiler::scope::{ScopeTree, VariableAddress};
use crate::util::AssocList;

fn expect<T: PartialEq + std::fmt::Debug>(what: &str, expected: T, actual: T) -> Result<(), String> {
    if expected == actual {
        Ok(())
    } else {
        Err(format!("{what}: {expected:?} expected, but got {actual:?}"))
    }
}

fn test_assoc_list() -> Result<(), String> {
    let list: AssocList<i64> = AssocList::new(0);
    expect("empty list sentinel", 0, list.get("foo"))?;

    let mut list = AssocList::new(-1);
    expect("custom sentinel", -1, list.get("foo"))?;

    list.put("foo", 2);
    expect("first insert", 2, list.get("foo"))?;

    list.put("bar", 4);
    expect("second key", 4, list.get("bar"))?;

    list.put("foo", 6);
    expect("newest value wins", 6, list.get("foo"))?;
    expect("duplicates are kept", 3, list.len() as i64)?;
    Ok(())
}

fn test_scope() -> Result<(), String> {
    let mut tree = ScopeTree::new();
    tree.declare_variable(ScopeTree::ROOT, "foo");
    tree.declare_variable(ScopeTree::ROOT, "bar");

    expect("root declarations", 2, tree.local_count(ScopeTree::ROOT))?;
    expect(
        "second slot",
        VariableAddress { scopes_up: 0, offset: 16 },
        tree.variable_location(ScopeTree::ROOT, "bar")
            .map_err(|e| e.to_string())?,
    )?;

    let child = tree.new_scope(Some(ScopeTree::ROOT));
    let second_child = tree.new_scope(Some(ScopeTree::ROOT));
    expect("children registered", 2, tree.scope(ScopeTree::ROOT).sub_scopes.len())?;

    // Names visible from an ancestor must not get a second slot.
    tree.declare_variable(child, "foo");
    tree.declare_variable(child, "bar");
    expect("no redeclaration in child", 0, tree.local_count(child))?;

    // Sibling scopes may hold the same names at the same offsets.
    tree.declare_variable(child, "buzz");
    tree.declare_variable(child, "bazz");
    tree.declare_variable(second_child, "buzz");
    tree.declare_variable(second_child, "bazz");
    expect(
        "sibling slots match",
        tree.variable_location(child, "bazz")
            .map_err(|e| e.to_string())?
            .offset,
        tree.variable_location(second_child, "bazz")
            .map_err(|e| e.to_string())?
            .offset,
    )?;

    expect(
        "declaration is idempotent",
        2,
        {
            tree.declare_variable(child, "buzz");
            tree.local_count(child)
        },
    )?;

    match tree.variable_location(child, "ghost") {
        Err(_) => Ok(()),
        Ok(addr) => Err(format!("ghost variable resolved to {addr:?}")),
    }
}

/// Runs every self-test, stopping at the first failure.
pub fn run() -> Result<(), String> {
    test_assoc_list()?;
    test_scope()?;
    Ok(())
}
