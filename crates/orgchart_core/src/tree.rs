//! Pure operations over the employee tree.
//!
//! # Responsibility
//! - Locate, insert, update and remove nodes without mutating inputs.
//! - Keep every structural invariant local to this module.
//!
//! # Invariants
//! - Inputs are never mutated; each mutation returns a fresh root.
//! - A missing target id is a silent no-op, not an error.
//! - The root node is never removed.
//! - Sibling order of untouched nodes is preserved by every operation.
//!
//! Duplicate ids in the input tree are a caller error; operations then
//! act on the first match in pre-order and make no further promise.

use crate::model::employee::{Employee, EmployeePatch};

/// Finds the node with `id`, depth-first in pre-order.
pub fn find<'a>(root: &'a Employee, id: &str) -> Option<&'a Employee> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| find(child, id))
}

/// Returns a new tree with `new_node` appended to the children of the
/// node whose id equals `parent_id`.
///
/// When no node matches `parent_id` the returned tree is structurally
/// equal to `root`; callers are responsible for passing ids known to
/// exist.
pub fn insert_child(root: &Employee, parent_id: &str, new_node: Employee) -> Employee {
    let mut next = root.clone();
    attach(&mut next, parent_id, new_node);
    next
}

/// Returns a new tree with the node matching `patch.id` updated by
/// field-level merge: `None` fields keep their current value, supplied
/// fields overwrite after trimming. `children` are never touched.
///
/// No-op when `patch.id` matches no node.
pub fn update(root: &Employee, patch: &EmployeePatch) -> Employee {
    let mut next = root.clone();
    apply_patch(&mut next, patch);
    next
}

/// Returns a new tree with the node matching `id` excised from its
/// parent's children, siblings keeping their relative order.
///
/// Refuses the root id (the root is never deletable) and no-ops when
/// `id` matches no node.
pub fn remove(root: &Employee, id: &str) -> Employee {
    let mut next = root.clone();
    if next.id != id {
        excise(&mut next, id);
    }
    next
}

fn attach(node: &mut Employee, parent_id: &str, new_node: Employee) -> Option<Employee> {
    if node.id == parent_id {
        node.children.push(new_node);
        return None;
    }
    // Hand the pending node down each branch until one accepts it.
    let mut pending = new_node;
    for child in &mut node.children {
        match attach(child, parent_id, pending) {
            None => return None,
            Some(unclaimed) => pending = unclaimed,
        }
    }
    Some(pending)
}

fn apply_patch(node: &mut Employee, patch: &EmployeePatch) -> bool {
    if node.id == patch.id {
        if let Some(name) = &patch.name {
            node.name = name.trim().to_string();
        }
        if let Some(title) = &patch.title {
            node.title = Some(title.trim().to_string());
        }
        return true;
    }
    node.children
        .iter_mut()
        .any(|child| apply_patch(child, patch))
}

fn excise(node: &mut Employee, id: &str) -> bool {
    // Direct children first, so the match is dropped from its immediate
    // parent without rebuilding deeper paths.
    if let Some(index) = node.children.iter().position(|child| child.id == id) {
        node.children.remove(index);
        return true;
    }
    node.children.iter_mut().any(|child| excise(child, id))
}
