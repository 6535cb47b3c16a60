//! Reconciler scenario and invariant tests.

mod support;

use aili_vistree::Tree;
use support::{mock_slot, new_tree_view, Registry};

#[test]
fn reconciler_teardown() {
    let mut tree = Tree::new();
    let root = tree.new_element("root");
    let c1 = tree.new_element("c1");
    let c2 = tree.new_element("c2");
    c1.set_parent(&mut tree, Some(root)).unwrap();
    c2.set_parent(&mut tree, Some(c1)).unwrap();
    let k = tree.new_connector();
    k.start().set_target(&mut tree, Some(root));
    k.end().set_target(&mut tree, Some(c2));

    let registry = Registry::default();
    let view = new_tree_view(&registry);
    view.add_root(&mut tree, root, mock_slot());

    assert!(registry.has_element_view(root));
    assert!(registry.has_element_view(c1));
    assert!(registry.has_element_view(c2));
    assert!(registry.has_connector_view(k));

    c1.set_parent(&mut tree, None).unwrap();

    assert!(registry.has_element_view(root));
    assert!(!registry.has_element_view(c1));
    assert!(!registry.has_element_view(c2));
    assert!(!registry.has_connector_view(k));
}

#[test]
fn element_view_exists_iff_in_tracked_subtree() {
    let mut tree = Tree::new();
    let root = tree.new_element("root");
    let child = tree.new_element("child");
    let untracked = tree.new_element("untracked");
    child.set_parent(&mut tree, Some(root)).unwrap();

    let registry = Registry::default();
    let view = new_tree_view(&registry);
    view.add_root(&mut tree, root, mock_slot());

    assert!(registry.has_element_view(root));
    assert!(registry.has_element_view(child));
    assert!(!registry.has_element_view(untracked));

    let grandchild = tree.new_element("grandchild");
    grandchild.set_parent(&mut tree, Some(child)).unwrap();
    assert!(registry.has_element_view(grandchild));
}

#[test]
fn connector_view_exists_iff_both_endpoints_tracked() {
    let mut tree = Tree::new();
    let root = tree.new_element("root");
    let outside = tree.new_element("outside");
    let connector = tree.new_connector();
    connector.start().set_target(&mut tree, Some(root));
    connector.end().set_target(&mut tree, Some(outside));

    let registry = Registry::default();
    let view = new_tree_view(&registry);
    view.add_root(&mut tree, root, mock_slot());

    assert!(!registry.has_connector_view(connector));

    outside.set_parent(&mut tree, Some(root)).unwrap();
    assert!(registry.has_connector_view(connector));
}

#[test]
fn connector_view_is_recreated_after_retargeting_back_to_tracked_elements() {
    let mut tree = Tree::new();
    let root = tree.new_element("root");
    let a = tree.new_element("a");
    let b = tree.new_element("b");
    a.set_parent(&mut tree, Some(root)).unwrap();
    b.set_parent(&mut tree, Some(root)).unwrap();
    let connector = tree.new_connector();
    connector.start().set_target(&mut tree, Some(a));
    connector.end().set_target(&mut tree, Some(b));

    let registry = Registry::default();
    let view = new_tree_view(&registry);
    view.add_root(&mut tree, root, mock_slot());
    assert!(registry.has_connector_view(connector));

    connector.start().set_target(&mut tree, None);
    assert!(!registry.has_connector_view(connector));

    connector.start().set_target(&mut tree, Some(a));
    assert!(registry.has_connector_view(connector));
}

#[test]
fn unrelated_roots_are_both_supported() {
    let mut tree = Tree::new();
    let root_a = tree.new_element("root_a");
    let root_b = tree.new_element("root_b");
    let child_a = tree.new_element("child_a");
    let child_b = tree.new_element("child_b");
    child_a.set_parent(&mut tree, Some(root_a)).unwrap();
    child_b.set_parent(&mut tree, Some(root_b)).unwrap();

    let registry = Registry::default();
    let view = new_tree_view(&registry);
    view.add_root(&mut tree, root_a, mock_slot());
    view.add_root(&mut tree, root_b, mock_slot());

    assert!(registry.has_element_view(child_a));
    assert!(registry.has_element_view(child_b));

    view.remove_root(&mut tree, root_a);
    assert!(!registry.has_element_view(root_a));
    assert!(!registry.has_element_view(child_a));
    assert!(registry.has_element_view(root_b));
    assert!(registry.has_element_view(child_b));
}

#[test]
fn remove_root_is_a_no_op_for_a_view_without_explicit_embedding() {
    let mut tree = Tree::new();
    let root = tree.new_element("root");
    let child = tree.new_element("child");
    child.set_parent(&mut tree, Some(root)).unwrap();

    let registry = Registry::default();
    let view = new_tree_view(&registry);
    view.add_root(&mut tree, root, mock_slot());

    // `child` has an inherited, non-explicit embedding: asking to remove it
    // as a root must not tear down anything.
    view.remove_root(&mut tree, child);
    assert!(registry.has_element_view(root));
    assert!(registry.has_element_view(child));
}
