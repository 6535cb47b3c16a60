//! Ergonomic, handle-based views over a [`Connector`](ConnectorHandle) and its
//! two [`Pin`](PinHandle)s stored in a [`Tree`].

use crate::attr;
use crate::handle::{ConnectorHandle, ElementHandle, Endpoint, PinHandle};
use crate::hook::HookHandle;
use crate::Tree;

impl ConnectorHandle {
    /// This connector's start pin.
    pub fn start(&self) -> PinHandle {
        PinHandle::new(*self, Endpoint::Start)
    }

    /// This connector's end pin.
    pub fn end(&self) -> PinHandle {
        PinHandle::new(*self, Endpoint::End)
    }

    /// The element this connector is currently drawn under (§4.3.4), or `None`
    /// before both of its pins have a live target.
    pub fn projected_parent(&self, tree: &Tree) -> Option<ElementHandle> {
        tree.connector(*self).projected_parent
    }

    /// Current value of attribute `name` on this connector.
    pub fn get_attribute<'t>(&self, tree: &'t Tree, name: &str) -> Option<&'t str> {
        tree.connector(*self).attributes.get(name)
    }

    /// Updates attribute `name` on this connector.
    pub fn set_attribute(&self, tree: &mut Tree, name: &str, value: Option<&str>) {
        let connector = *self;
        attr::write_attribute(
            move |tree| &mut tree.connector_mut(connector).attributes,
            tree,
            name,
            value,
        );
    }

    /// Subscribes to changes of attribute `name` on this connector.
    pub fn on_attribute_changed(
        &self,
        tree: &mut Tree,
        name: &str,
        callback: impl FnMut(&mut Tree, Option<&str>, Option<&str>) + 'static,
    ) -> HookHandle {
        let connector = *self;
        attr::subscribe_attribute(
            move |tree| &mut tree.connector_mut(connector).attributes,
            tree,
            name,
            callback,
        )
    }

    /// Binds a batch of attributes on this connector in one call.
    pub fn bind_attributes(
        &self,
        tree: &mut Tree,
        bindings: impl IntoIterator<
            Item = (String, Box<dyn FnMut(&mut Tree, Option<&str>, Option<&str>)>),
        >,
    ) -> HookHandle {
        let connector = *self;
        attr::bind_many(tree, move |tree| &mut tree.connector_mut(connector).attributes, bindings)
    }

    /// Fires whenever this connector's projected parent changes, including to
    /// or from no projected parent.
    pub fn on_projected_parent_changed(
        &self,
        tree: &mut Tree,
        callback: impl FnMut(&mut Tree, Option<ElementHandle>, Option<ElementHandle>) + 'static,
    ) -> HookHandle {
        let connector = *self;
        crate::hook::subscribe(
            move |tree| &mut tree.connector_mut(connector).hooks.on_projected_parent_changed,
            tree,
            move |tree, (new, old)| callback(tree, new, old),
        )
    }
}

impl PinHandle {
    /// The element this pin currently targets, if any.
    pub fn target(&self, tree: &Tree) -> Option<ElementHandle> {
        tree.pin(*self).target
    }

    /// The element this pin is currently drawn to (§4.3.4): the child,
    /// inclusive of `target` itself, of the connector's projected parent that
    /// lies on the path from the projected parent down to `target`, or `None`
    /// if `target` is unset.
    pub fn projected_target(&self, tree: &Tree) -> Option<ElementHandle> {
        tree.pin(*self).projected_target
    }

    /// Retargets this pin.
    pub fn set_target(&self, tree: &mut Tree, new_target: Option<ElementHandle>) {
        tree.set_target(*self, new_target);
    }

    /// Current value of attribute `name` on this pin.
    pub fn get_attribute<'t>(&self, tree: &'t Tree, name: &str) -> Option<&'t str> {
        tree.pin(*self).attributes.get(name)
    }

    /// Updates attribute `name` on this pin.
    pub fn set_attribute(&self, tree: &mut Tree, name: &str, value: Option<&str>) {
        let pin = *self;
        attr::write_attribute(move |tree| &mut tree.pin_mut(pin).attributes, tree, name, value);
    }

    /// Subscribes to changes of attribute `name` on this pin.
    pub fn on_attribute_changed(
        &self,
        tree: &mut Tree,
        name: &str,
        callback: impl FnMut(&mut Tree, Option<&str>, Option<&str>) + 'static,
    ) -> HookHandle {
        let pin = *self;
        attr::subscribe_attribute(
            move |tree| &mut tree.pin_mut(pin).attributes,
            tree,
            name,
            callback,
        )
    }

    /// Binds a batch of attributes on this pin in one call.
    pub fn bind_attributes(
        &self,
        tree: &mut Tree,
        bindings: impl IntoIterator<
            Item = (String, Box<dyn FnMut(&mut Tree, Option<&str>, Option<&str>)>),
        >,
    ) -> HookHandle {
        let pin = *self;
        attr::bind_many(tree, move |tree| &mut tree.pin_mut(pin).attributes, bindings)
    }

    /// Fires whenever `target` changes, including to or from no target.
    pub fn on_target_changed(
        &self,
        tree: &mut Tree,
        callback: impl FnMut(&mut Tree, Option<ElementHandle>, Option<ElementHandle>) + 'static,
    ) -> HookHandle {
        let pin = *self;
        crate::hook::subscribe(
            move |tree| &mut tree.pin_mut(pin).hooks.on_target_changed,
            tree,
            move |tree, (new, old)| callback(tree, new, old),
        )
    }

    /// Fires whenever `projected_target` changes, including to or from `None`.
    pub fn on_projected_target_changed(
        &self,
        tree: &mut Tree,
        callback: impl FnMut(&mut Tree, Option<ElementHandle>, Option<ElementHandle>) + 'static,
    ) -> HookHandle {
        let pin = *self;
        crate::hook::subscribe(
            move |tree| &mut tree.pin_mut(pin).hooks.on_projected_target_changed,
            tree,
            move |tree, (new, old)| callback(tree, new, old),
        )
    }
}
