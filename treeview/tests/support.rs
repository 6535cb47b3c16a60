//! Test doubles for the view contract: element/connector views that just
//! record their lifecycle into a shared log so tests can assert on it.

use aili_treeview::{ConnectorView, ElementView, ElementViewHandle, Embedding, Slot, TreeView};
use aili_vistree::{ConnectorHandle, ElementHandle};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Tracks which element/connector handles currently have a live (not yet
/// destroyed) view, so tests can assert "view exists iff tracked" directly.
#[derive(Default, Clone)]
pub struct Registry {
    live_elements: Rc<RefCell<HashSet<ElementHandle>>>,
    live_connectors: Rc<RefCell<HashSet<ConnectorHandle>>>,
}

impl Registry {
    pub fn has_element_view(&self, element: ElementHandle) -> bool {
        self.live_elements.borrow().contains(&element)
    }

    pub fn has_connector_view(&self, connector: ConnectorHandle) -> bool {
        self.live_connectors.borrow().contains(&connector)
    }

    pub fn element_view_factory(&self) -> impl Fn(ElementHandle) -> Box<dyn ElementView> + 'static {
        let registry = self.clone();
        move |element| {
            registry.live_elements.borrow_mut().insert(element);
            Box::new(MockElementView { registry: registry.clone(), element, explicit: false, slot: None })
        }
    }

    pub fn connector_view_factory(&self) -> impl Fn(ConnectorHandle) -> Box<dyn ConnectorView> + 'static {
        let registry = self.clone();
        move |connector| {
            registry.live_connectors.borrow_mut().insert(connector);
            Box::new(MockConnectorView { registry: registry.clone(), connector })
        }
    }
}

struct MockElementView {
    registry: Registry,
    element: ElementHandle,
    explicit: bool,
    slot: Option<Box<dyn Slot>>,
}

impl ElementView for MockElementView {
    fn use_embedding(&mut self, embedding: Embedding) {
        if let Some(mut old) = self.slot.take() {
            old.destroy();
        }
        if let Some(slot) = embedding.slot {
            self.explicit = true;
            self.slot = Some(slot);
        } else {
            self.explicit = false;
        }
    }

    fn has_explicit_embedding(&self) -> bool {
        self.explicit
    }

    fn destroy(&mut self) {
        if let Some(mut slot) = self.slot.take() {
            slot.destroy();
        }
        self.registry.live_elements.borrow_mut().remove(&self.element);
    }
}

struct MockConnectorView {
    registry: Registry,
    connector: ConnectorHandle,
}

impl ConnectorView for MockConnectorView {
    fn use_endpoints(&mut self, _start: ElementViewHandle, _end: ElementViewHandle) {}

    fn destroy(&mut self) {
        self.registry.live_connectors.borrow_mut().remove(&self.connector);
    }
}

struct MockSlot;

impl Slot for MockSlot {
    fn destroy(&mut self) {}
}

pub fn mock_slot() -> Box<dyn Slot> {
    Box::new(MockSlot)
}

#[allow(dead_code)]
pub fn new_tree_view(
    registry: &Registry,
) -> TreeView<impl Fn(ElementHandle) -> Box<dyn ElementView>, impl Fn(ConnectorHandle) -> Box<dyn ConnectorView>> {
    TreeView::new(registry.element_view_factory(), registry.connector_view_factory())
}
