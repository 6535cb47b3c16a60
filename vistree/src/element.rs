//! Ergonomic, handle-based view over an [`Element`](ElementHandle) stored in a [`Tree`].

use crate::attr;
use crate::handle::{ConnectorHandle, ElementHandle, PinHandle, StructureViolation};
use crate::hook::HookHandle;
use crate::Tree;

impl ElementHandle {
    /// The element's immutable tag name.
    pub fn tag_name<'t>(&self, tree: &'t Tree) -> &'t str {
        &tree.element(*self).tag_name
    }

    /// The element's current parent, if any.
    pub fn parent(&self, tree: &Tree) -> Option<ElementHandle> {
        tree.element(*self).parent
    }

    /// The element's current children, in the order they were most recently attached.
    pub fn children<'t>(&self, tree: &'t Tree) -> impl Iterator<Item = ElementHandle> + 't {
        tree.element(*self).children.iter().copied()
    }

    /// Pins currently targeting this element.
    pub fn pins<'t>(&self, tree: &'t Tree) -> impl Iterator<Item = PinHandle> + 't {
        tree.element(*self).pins.iter().copied()
    }

    /// Pins whose projected target is this element.
    pub fn projected_pins<'t>(&self, tree: &'t Tree) -> impl Iterator<Item = PinHandle> + 't {
        tree.element(*self).projected_pins.iter().copied()
    }

    /// Connectors whose projected parent is this element.
    pub fn projected_connectors<'t>(
        &self,
        tree: &'t Tree,
    ) -> impl Iterator<Item = ConnectorHandle> + 't {
        tree.element(*self).projected_connectors.iter().copied()
    }

    /// Current value of attribute `name`, or `None` if it has never been set
    /// (or was most recently cleared).
    pub fn get_attribute<'t>(&self, tree: &'t Tree, name: &str) -> Option<&'t str> {
        tree.element(*self).attributes.get(name)
    }

    /// Updates attribute `name`. A no-op (and fires no hook) if `value` equals
    /// the attribute's current value.
    pub fn set_attribute(&self, tree: &mut Tree, name: &str, value: Option<&str>) {
        let element = *self;
        attr::write_attribute(move |tree| &mut tree.element_mut(element).attributes, tree, name, value);
    }

    /// Subscribes to changes of attribute `name`.
    pub fn on_attribute_changed(
        &self,
        tree: &mut Tree,
        name: &str,
        callback: impl FnMut(&mut Tree, Option<&str>, Option<&str>) + 'static,
    ) -> HookHandle {
        let element = *self;
        attr::subscribe_attribute(
            move |tree| &mut tree.element_mut(element).attributes,
            tree,
            name,
            callback,
        )
    }

    /// Binds a batch of attributes in one call (§4.1's `bindMany`), immediately
    /// invoking any callback whose attribute is already set.
    pub fn bind_attributes(
        &self,
        tree: &mut Tree,
        bindings: impl IntoIterator<
            Item = (String, Box<dyn FnMut(&mut Tree, Option<&str>, Option<&str>)>),
        >,
    ) -> HookHandle {
        let element = *self;
        attr::bind_many(tree, move |tree| &mut tree.element_mut(element).attributes, bindings)
    }

    /// Reassigns this element's parent. Fails without changing anything iff
    /// `new_parent` is this element itself or one of its current descendants.
    pub fn set_parent(
        &self,
        tree: &mut Tree,
        new_parent: Option<ElementHandle>,
    ) -> Result<(), StructureViolation> {
        tree.set_parent(*self, new_parent)
    }

    /// Fires after this element gains a new child (whether freshly created or
    /// moved from elsewhere).
    pub fn on_add_child(
        &self,
        tree: &mut Tree,
        callback: impl FnMut(&mut Tree, ElementHandle) + 'static,
    ) -> HookHandle {
        let element = *self;
        crate::hook::subscribe(
            move |tree| &mut tree.element_mut(element).hooks.on_add_child,
            tree,
            callback,
        )
    }

    /// Fires after a pin targets this element.
    pub fn on_add_pin(
        &self,
        tree: &mut Tree,
        callback: impl FnMut(&mut Tree, PinHandle) + 'static,
    ) -> HookHandle {
        let element = *self;
        crate::hook::subscribe(
            move |tree| &mut tree.element_mut(element).hooks.on_add_pin,
            tree,
            callback,
        )
    }

    /// Fires after a pin's projected target becomes this element.
    pub fn on_add_projected_pin(
        &self,
        tree: &mut Tree,
        callback: impl FnMut(&mut Tree, PinHandle) + 'static,
    ) -> HookHandle {
        let element = *self;
        crate::hook::subscribe(
            move |tree| &mut tree.element_mut(element).hooks.on_add_projected_pin,
            tree,
            callback,
        )
    }

    /// Fires after a connector's projected parent becomes this element.
    pub fn on_add_projected_connector(
        &self,
        tree: &mut Tree,
        callback: impl FnMut(&mut Tree, ConnectorHandle) + 'static,
    ) -> HookHandle {
        let element = *self;
        crate::hook::subscribe(
            move |tree| &mut tree.element_mut(element).hooks.on_add_projected_connector,
            tree,
            callback,
        )
    }

    /// Fires whenever this element's parent changes, including to or from no parent.
    pub fn on_parent_changed(
        &self,
        tree: &mut Tree,
        callback: impl FnMut(&mut Tree, Option<ElementHandle>, Option<ElementHandle>) + 'static,
    ) -> HookHandle {
        let element = *self;
        crate::hook::subscribe(
            move |tree| &mut tree.element_mut(element).hooks.on_parent_changed,
            tree,
            move |tree, (new, old)| callback(tree, new, old),
        )
    }
}
