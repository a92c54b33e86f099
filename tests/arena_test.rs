//! Tests for the arena-backed hierarchy tree

use rigscaffold::domain::{DomainError, HierarchyArena};

/// ROOT with children A, B, C (in that order).
fn three_children() -> (HierarchyArena, generational_arena::Index) {
    let mut tree = HierarchyArena::new();
    let root = tree.insert_node("ROOT", None);
    tree.insert_node("A", Some(root));
    tree.insert_node("B", Some(root));
    tree.insert_node("C", Some(root));
    (tree, root)
}

fn child_names(tree: &HierarchyArena, parent: generational_arena::Index) -> Vec<String> {
    tree.children(parent)
        .iter()
        .map(|&c| tree.name(c).unwrap().to_string())
        .collect()
}

// ============================================================
// Insert / Remove
// ============================================================

#[test]
fn given_valid_position_when_inserting_then_child_is_linked_at_position() {
    let (mut tree, root) = three_children();
    let new = tree.new_detached("NEW");

    assert_eq!(tree.insert_child(root, 1, new).unwrap(), true);
    assert_eq!(child_names(&tree, root), ["A", "NEW", "B", "C"]);
    assert_eq!(tree.parent(new), Some(root));
}

#[test]
fn given_position_equal_to_child_count_when_inserting_then_insert_is_rejected() {
    // Append-at-end is rejected by contract; appends go through insert_node.
    let (mut tree, root) = three_children();
    let new = tree.new_detached("NEW");

    assert_eq!(tree.insert_child(root, 3, new).unwrap(), false);
    assert_eq!(child_names(&tree, root), ["A", "B", "C"]);
    assert_eq!(tree.parent(new), None);
}

#[test]
fn given_insert_then_remove_at_same_position_then_original_order_is_restored() {
    let (mut tree, root) = three_children();
    let before = child_names(&tree, root);
    let new = tree.new_detached("NEW");

    assert!(tree.insert_child(root, 1, new).unwrap());
    assert!(tree.remove_child(root, 1));

    assert_eq!(child_names(&tree, root), before);
    // Parent reference is cleared on the removed node
    assert_eq!(tree.parent(new), None);
}

#[test]
fn given_removed_child_when_reinserting_then_attachment_succeeds() {
    let (mut tree, root) = three_children();
    let a = tree.get_child_by_name(root, "A").unwrap();

    assert!(tree.remove_child(root, 0));
    assert_eq!(tree.parent(a), None);
    // B moved to the front after A's removal
    assert_eq!(child_names(&tree, root), ["B", "C"]);

    assert!(tree.insert_child(root, 0, a).unwrap());
    assert_eq!(child_names(&tree, root), ["A", "B", "C"]);
    assert_eq!(tree.parent(a), Some(root));
}

#[test]
fn given_out_of_range_position_when_removing_then_nothing_changes() {
    let (mut tree, root) = three_children();
    assert!(!tree.remove_child(root, 3));
    assert_eq!(child_names(&tree, root), ["A", "B", "C"]);
}

// ============================================================
// Parenting Invariants
// ============================================================

#[test]
fn given_attached_child_when_inserting_elsewhere_then_duplicate_parenting_is_raised() {
    let (mut tree, root) = three_children();
    let a = tree.get_child_by_name(root, "A").unwrap();
    let b = tree.get_child_by_name(root, "B").unwrap();

    let err = tree.insert_child(b, 0, a).unwrap_err();
    assert!(matches!(err, DomainError::DuplicateParenting(name) if name == "A"));
}

#[test]
fn given_root_when_inserting_under_descendant_then_duplicate_parenting_is_raised() {
    let (mut tree, root) = three_children();
    let a = tree.get_child_by_name(root, "A").unwrap();

    let err = tree.insert_child(a, 0, root).unwrap_err();
    assert!(matches!(err, DomainError::DuplicateParenting(_)));
}

#[test]
fn given_detached_ancestor_when_inserting_under_own_subtree_then_cycle_is_detected() {
    let mut tree = HierarchyArena::new();
    let outer = tree.new_detached("OUTER");
    let inner = tree.insert_node("INNER", Some(outer));
    tree.insert_node("PAD", Some(inner));

    let err = tree.insert_child(inner, 0, outer).unwrap_err();
    assert!(matches!(err, DomainError::CycleDetected(name) if name == "OUTER"));
}

// ============================================================
// Lookup
// ============================================================

#[test]
fn given_name_lookup_when_name_exists_then_first_matching_child_is_returned() {
    let (tree, root) = three_children();
    let b = tree.get_child_by_name(root, "B").unwrap();
    assert_eq!(tree.name(b), Some("B"));
    assert!(tree.get_child_by_name(root, "MISSING").is_none());
}

#[test]
fn given_same_name_under_different_parents_then_lookup_stays_in_own_child_list() {
    let mut tree = HierarchyArena::new();
    let root = tree.insert_node("ROOT", None);
    let left = tree.insert_node("LEFT", Some(root));
    let right = tree.insert_node("RIGHT", Some(root));
    let left_ctl = tree.insert_node("CTL", Some(left));
    let right_ctl = tree.insert_node("CTL", Some(right));

    assert_eq!(tree.get_child_by_name(left, "CTL"), Some(left_ctl));
    assert_eq!(tree.get_child_by_name(right, "CTL"), Some(right_ctl));
    assert_ne!(left_ctl, right_ctl);
}

#[test]
fn given_out_of_range_index_when_getting_child_then_invalid_index_is_raised() {
    let (tree, root) = three_children();
    let err = tree.get_child_by_index(root, 3).unwrap_err();
    assert!(matches!(err, DomainError::InvalidIndex { index: 3, len: 3 }));
}

// ============================================================
// Traversal & Shape
// ============================================================

#[test]
fn given_tree_when_iterating_then_preorder_matches_insertion_order() {
    let mut tree = HierarchyArena::new();
    let root = tree.insert_node("ROOT", None);
    let a = tree.insert_node("A", Some(root));
    tree.insert_node("B", Some(a));
    tree.insert_node("C", Some(a));
    tree.insert_node("D", Some(root));

    let order: Vec<_> = tree.iter().map(|(_, node)| node.name.clone()).collect();
    assert_eq!(order, ["ROOT", "A", "B", "C", "D"]);
}

#[test]
fn given_tree_when_querying_depth_and_leaves_then_values_match_structure() {
    let mut tree = HierarchyArena::new();
    let root = tree.insert_node("ROOT", None);
    let a = tree.insert_node("A", Some(root));
    tree.insert_node("B", Some(a));
    tree.insert_node("C", Some(a));

    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.leaf_nodes(), ["B", "C"]);
}

#[test]
fn given_rename_when_setting_name_then_relations_are_untouched() {
    let (mut tree, root) = three_children();
    let b = tree.get_child_by_name(root, "B").unwrap();

    tree.set_name(b, "RENAMED").unwrap();

    assert_eq!(tree.name(b), Some("RENAMED"));
    assert_eq!(tree.parent(b), Some(root));
    assert_eq!(child_names(&tree, root), ["A", "RENAMED", "C"]);
}
