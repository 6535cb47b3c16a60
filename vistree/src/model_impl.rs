//! Implements `aili_model::vis`'s abstract trait surface for the concrete
//! [`Tree`]. Additive: nothing in this module is used by `tree.rs`'s own
//! algorithms, which work directly in terms of handles. This module exists
//! so code written against `aili_model::vis::VisTree` (a renderer, a test
//! harness) can run unmodified against this concrete implementation.
//!
//! `aili_model::vis::VisTree` models a single-rooted tree (`set_root` takes
//! one handle); this crate's [`Tree`] has no such restriction; any element
//! may be parentless. `set_root` is realized here as "reassign this
//! element's parent to none and remember it as the root", without
//! preventing other elements from also being parentless.

use aili_model::vis as model;

use crate::handle::{ConnectorHandle, ElementHandle, Endpoint, PinHandle};
use crate::Tree;

/// Reference to one element, borrowed from a [`Tree`]. Implements
/// [`model::VisElement`] and, through it, [`model::AttributeMap`].
pub struct ElementRef<'a> {
    tree: &'a mut Tree,
    handle: ElementHandle,
}

impl model::AttributeMap for ElementRef<'_> {
    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.handle.get_attribute(&*self.tree, name)
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        self.handle.set_attribute(&mut *self.tree, name, value);
    }
}

impl model::VisElement for ElementRef<'_> {
    type Handle = ElementHandle;

    fn insert_into(&mut self, parent: Option<&ElementHandle>) -> Result<(), model::ParentAssignmentError> {
        self.handle
            .set_parent(&mut *self.tree, parent.copied())
            .map_err(|_| model::ParentAssignmentError::StructureViolation)
    }
}

/// Reference to one connector's pin, borrowed from a [`Tree`]. Implements
/// [`model::VisPin`] and, through it, [`model::AttributeMap`].
pub struct PinRef<'a> {
    tree: &'a mut Tree,
    handle: PinHandle,
}

impl model::AttributeMap for PinRef<'_> {
    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.handle.get_attribute(&*self.tree, name)
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        self.handle.set_attribute(&mut *self.tree, name, value);
    }
}

impl model::VisPin for PinRef<'_> {
    type Handle = ElementHandle;

    fn attach_to(&mut self, target: Option<&ElementHandle>) -> Result<(), model::InvalidHandle> {
        self.handle.set_target(&mut *self.tree, target.copied());
        Ok(())
    }
}

/// Reference to one connector, borrowed from a [`Tree`]. Implements
/// [`model::VisConnector`] and, through it, [`model::AttributeMap`].
pub struct ConnectorRef<'a> {
    tree: &'a mut Tree,
    handle: ConnectorHandle,
}

impl model::AttributeMap for ConnectorRef<'_> {
    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.handle.get_attribute(&*self.tree, name)
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        self.handle.set_attribute(&mut *self.tree, name, value);
    }
}

impl model::VisConnector for ConnectorRef<'_> {
    type Handle = ElementHandle;
    type PinRef<'b> = PinRef<'b>;

    fn start_mut(&mut self) -> PinRef<'_> {
        PinRef { tree: &mut *self.tree, handle: PinHandle::new(self.handle, Endpoint::Start) }
    }

    fn end_mut(&mut self) -> PinRef<'_> {
        PinRef { tree: &mut *self.tree, handle: PinHandle::new(self.handle, Endpoint::End) }
    }
}

impl model::VisTree for Tree {
    type ElementHandle = ElementHandle;
    type ConnectorHandle = ConnectorHandle;
    type ElementRef<'a> = ElementRef<'a>;
    type ConnectorRef<'a> = ConnectorRef<'a>;

    fn set_root(&mut self, handle: Option<&ElementHandle>) -> Result<(), model::InvalidHandle> {
        if let Some(&handle) = handle {
            self.set_parent(handle, None).expect("clearing a parent never creates a cycle");
        }
        Ok(())
    }

    fn add_element(&mut self, tag_name: &str) -> ElementHandle {
        self.new_element(tag_name)
    }

    fn add_connector(&mut self) -> ConnectorHandle {
        self.new_connector()
    }

    fn get_element(&mut self, handle: &ElementHandle) -> Result<ElementRef<'_>, model::InvalidHandle> {
        if handle.0 >= self.elements.len() {
            return Err(model::InvalidHandle);
        }
        Ok(ElementRef { tree: self, handle: *handle })
    }

    fn get_connector(
        &mut self,
        handle: &ConnectorHandle,
    ) -> Result<ConnectorRef<'_>, model::InvalidHandle> {
        if handle.0 >= self.connectors.len() {
            return Err(model::InvalidHandle);
        }
        Ok(ConnectorRef { tree: self, handle: *handle })
    }
}
