//! The visualization tree: elements, connectors, pins, and the algorithm that
//! keeps connector projections consistent with tree structure.

use crate::attr::AttributeMap;
use crate::handle::{ConnectorHandle, Endpoint, ElementHandle, PinHandle, StructureViolation};
use crate::hook::{self, Hook};

#[derive(Default)]
pub(crate) struct ElementHooks {
    pub(crate) on_add_child: Hook<ElementHandle>,
    pub(crate) on_add_pin: Hook<PinHandle>,
    pub(crate) on_add_projected_pin: Hook<PinHandle>,
    pub(crate) on_add_projected_connector: Hook<ConnectorHandle>,
    pub(crate) on_parent_changed: Hook<(Option<ElementHandle>, Option<ElementHandle>)>,
}

pub(crate) struct ElementData {
    pub(crate) tag_name: String,
    pub(crate) parent: Option<ElementHandle>,
    pub(crate) children: Vec<ElementHandle>,
    pub(crate) pins: Vec<PinHandle>,
    pub(crate) projected_pins: Vec<PinHandle>,
    pub(crate) projected_connectors: Vec<ConnectorHandle>,
    pub(crate) attributes: AttributeMap,
    pub(crate) hooks: ElementHooks,
}

impl ElementData {
    fn new(tag_name: String) -> Self {
        ElementData {
            tag_name,
            parent: None,
            children: Vec::new(),
            pins: Vec::new(),
            projected_pins: Vec::new(),
            projected_connectors: Vec::new(),
            attributes: AttributeMap::default(),
            hooks: ElementHooks::default(),
        }
    }
}

#[derive(Default)]
pub(crate) struct PinHooks {
    pub(crate) on_target_changed: Hook<(Option<ElementHandle>, Option<ElementHandle>)>,
    pub(crate) on_projected_target_changed: Hook<(Option<ElementHandle>, Option<ElementHandle>)>,
}

#[derive(Default)]
pub(crate) struct PinData {
    pub(crate) target: Option<ElementHandle>,
    pub(crate) projected_target: Option<ElementHandle>,
    pub(crate) attributes: AttributeMap,
    pub(crate) hooks: PinHooks,
}

#[derive(Default)]
pub(crate) struct ConnectorHooks {
    pub(crate) on_projected_parent_changed: Hook<(Option<ElementHandle>, Option<ElementHandle>)>,
}

pub(crate) struct ConnectorData {
    pub(crate) start: PinData,
    pub(crate) end: PinData,
    pub(crate) projected_parent: Option<ElementHandle>,
    pub(crate) attributes: AttributeMap,
    pub(crate) hooks: ConnectorHooks,
}

impl Default for ConnectorData {
    fn default() -> Self {
        ConnectorData {
            start: PinData::default(),
            end: PinData::default(),
            projected_parent: None,
            attributes: AttributeMap::default(),
            hooks: ConnectorHooks::default(),
        }
    }
}

/// Owning container for a visualization tree: every [`ElementHandle`],
/// [`ConnectorHandle`] and [`PinHandle`] obtained from a given `Tree` is only
/// valid when used with that same `Tree`. Handles are never invalidated:
/// elements and connectors are never removed from the arena (see
/// `Lifecycles` in the data model and DESIGN.md).
#[derive(Default)]
pub struct Tree {
    pub(crate) elements: Vec<ElementData>,
    pub(crate) connectors: Vec<ConnectorData>,
}

impl Tree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Tree::default()
    }

    /// Creates a new element with the given tag name and no parent, pins, or attributes.
    pub fn new_element(&mut self, tag_name: impl Into<String>) -> ElementHandle {
        self.elements.push(ElementData::new(tag_name.into()));
        ElementHandle(self.elements.len() - 1)
    }

    /// Creates a new connector with two detached pins, `start` and `end`.
    pub fn new_connector(&mut self) -> ConnectorHandle {
        self.connectors.push(ConnectorData::default());
        ConnectorHandle(self.connectors.len() - 1)
    }

    pub(crate) fn element(&self, handle: ElementHandle) -> &ElementData {
        &self.elements[handle.0]
    }

    pub(crate) fn element_mut(&mut self, handle: ElementHandle) -> &mut ElementData {
        &mut self.elements[handle.0]
    }

    pub(crate) fn connector(&self, handle: ConnectorHandle) -> &ConnectorData {
        &self.connectors[handle.0]
    }

    pub(crate) fn connector_mut(&mut self, handle: ConnectorHandle) -> &mut ConnectorData {
        &mut self.connectors[handle.0]
    }

    pub(crate) fn pin(&self, handle: PinHandle) -> &PinData {
        match handle.endpoint {
            Endpoint::Start => &self.connector(handle.connector).start,
            Endpoint::End => &self.connector(handle.connector).end,
        }
    }

    pub(crate) fn pin_mut(&mut self, handle: PinHandle) -> &mut PinData {
        match handle.endpoint {
            Endpoint::Start => &mut self.connector_mut(handle.connector).start,
            Endpoint::End => &mut self.connector_mut(handle.connector).end,
        }
    }

    /// True iff `candidate` is `ancestor` itself, or a descendant of it.
    fn is_or_descends_from(&self, candidate: ElementHandle, ancestor: ElementHandle) -> bool {
        let mut current = Some(candidate);
        while let Some(element) = current {
            if element == ancestor {
                return true;
            }
            current = self.element(element).parent;
        }
        false
    }

    /// Reassigns `element`'s parent (§4.3.1). Fails, leaving the tree
    /// unchanged, iff `new_parent` is `element` itself or one of its
    /// descendants.
    pub(crate) fn set_parent(
        &mut self,
        element: ElementHandle,
        new_parent: Option<ElementHandle>,
    ) -> Result<(), StructureViolation> {
        let old_parent = self.element(element).parent;
        if old_parent == new_parent {
            return Ok(());
        }
        if let Some(new_parent) = new_parent {
            if self.is_or_descends_from(new_parent, element) {
                return Err(StructureViolation);
            }
        }

        if let Some(old_parent) = old_parent {
            self.element_mut(old_parent).children.retain(|&c| c != element);
        }
        self.element_mut(element).parent = new_parent;
        if let Some(new_parent) = new_parent {
            self.element_mut(new_parent).children.push(element);
        }

        hook::fire(
            move |tree| &mut tree.element_mut(element).hooks.on_parent_changed,
            self,
            (new_parent, old_parent),
        );
        if let Some(new_parent) = new_parent {
            hook::fire(
                move |tree| &mut tree.element_mut(new_parent).hooks.on_add_child,
                self,
                element,
            );
        }

        self.recompute_subtree_projections(element);
        Ok(())
    }

    /// Reassigns a pin's target element (§4.3.2). Total: never fails.
    pub(crate) fn set_target(&mut self, pin: PinHandle, new_target: Option<ElementHandle>) {
        let old_target = self.pin(pin).target;
        if old_target == new_target {
            return;
        }

        if let Some(old_target) = old_target {
            self.element_mut(old_target).pins.retain(|&p| p != pin);
        }
        self.pin_mut(pin).target = new_target;
        if let Some(new_target) = new_target {
            self.element_mut(new_target).pins.push(pin);
        }

        hook::fire(
            move |tree| &mut tree.pin_mut(pin).hooks.on_target_changed,
            self,
            (new_target, old_target),
        );
        if let Some(new_target) = new_target {
            hook::fire(
                move |tree| &mut tree.element_mut(new_target).hooks.on_add_pin,
                self,
                pin,
            );
        }

        self.recompute_connector_projection(pin.connector);
    }

    /// Root-to-`element` chain of ancestors, inclusive of `element`.
    fn ancestor_chain(&self, element: ElementHandle) -> Vec<ElementHandle> {
        let mut chain = Vec::new();
        let mut current = Some(element);
        while let Some(e) = current {
            chain.push(e);
            current = self.element(e).parent;
        }
        chain.reverse();
        chain
    }

    /// Recomputes and applies the projection of every connector reachable
    /// from `moved_root`'s subtree (§4.3.5): a conservative but sufficient
    /// approximation of "every connector whose projection might have
    /// changed" after `moved_root`'s parent changed.
    fn recompute_subtree_projections(&mut self, moved_root: ElementHandle) {
        let mut affected = std::collections::HashSet::new();
        let mut stack = vec![moved_root];
        while let Some(element) = stack.pop() {
            for &pin in &self.element(element).pins {
                affected.insert(pin.connector);
            }
            stack.extend(self.element(element).children.iter().copied());
        }
        for connector in affected {
            self.recompute_connector_projection(connector);
        }
    }

    /// Recomputes connector's projected parent and both projected targets
    /// from scratch (§4.3.4) and applies the result, updating mirror
    /// indexes and firing change hooks for whichever fields actually changed.
    pub(crate) fn recompute_connector_projection(&mut self, connector: ConnectorHandle) {
        let start_target = self.connector(connector).start.target;
        let end_target = self.connector(connector).end.target;

        let (new_parent, new_start, new_end) = match (start_target, end_target) {
            (Some(start), Some(end)) => {
                let path_start = self.ancestor_chain(start);
                let path_end = self.ancestor_chain(end);
                let mut shared = 0;
                while shared < path_start.len()
                    && shared < path_end.len()
                    && path_start[shared] == path_end[shared]
                {
                    shared += 1;
                }
                if shared == 0 {
                    (None, None, None)
                } else {
                    let parent = path_start[shared - 1];
                    let start_projected = path_start.get(shared).copied().unwrap_or(parent);
                    let end_projected = path_end.get(shared).copied().unwrap_or(parent);
                    (Some(parent), Some(start_projected), Some(end_projected))
                }
            }
            _ => (None, None, None),
        };

        self.apply_projection(connector, new_parent, new_start, new_end);
    }

    fn apply_projection(
        &mut self,
        connector: ConnectorHandle,
        new_parent: Option<ElementHandle>,
        new_start: Option<ElementHandle>,
        new_end: Option<ElementHandle>,
    ) {
        let old_parent = self.connector(connector).projected_parent;
        let old_start = self.connector(connector).start.projected_target;
        let old_end = self.connector(connector).end.projected_target;

        let start_pin = PinHandle::new(connector, Endpoint::Start);
        let end_pin = PinHandle::new(connector, Endpoint::End);

        // Step 3: every mirror index is brought up to date before any hook fires.
        if old_start != new_start {
            self.move_projected_pin(old_start, new_start, start_pin);
            self.pin_mut(start_pin).projected_target = new_start;
        }
        if old_end != new_end {
            self.move_projected_pin(old_end, new_end, end_pin);
            self.pin_mut(end_pin).projected_target = new_end;
        }
        if old_parent != new_parent {
            if let Some(old_parent) = old_parent {
                self.element_mut(old_parent).projected_connectors.retain(|&c| c != connector);
            }
            if let Some(new_parent) = new_parent {
                self.element_mut(new_parent).projected_connectors.push(connector);
            }
            self.connector_mut(connector).projected_parent = new_parent;
        }

        // Step 4: hooks fire only for fields that changed, in the prescribed order.
        if old_start != new_start {
            hook::fire(
                move |tree| &mut tree.pin_mut(start_pin).hooks.on_projected_target_changed,
                self,
                (new_start, old_start),
            );
            if let Some(target) = new_start {
                hook::fire(
                    move |tree| &mut tree.element_mut(target).hooks.on_add_projected_pin,
                    self,
                    start_pin,
                );
            }
        }
        if old_end != new_end {
            hook::fire(
                move |tree| &mut tree.pin_mut(end_pin).hooks.on_projected_target_changed,
                self,
                (new_end, old_end),
            );
            if let Some(target) = new_end {
                hook::fire(
                    move |tree| &mut tree.element_mut(target).hooks.on_add_projected_pin,
                    self,
                    end_pin,
                );
            }
        }
        if old_parent != new_parent {
            hook::fire(
                move |tree| &mut tree.connector_mut(connector).hooks.on_projected_parent_changed,
                self,
                (new_parent, old_parent),
            );
            if let Some(parent) = new_parent {
                hook::fire(
                    move |tree| &mut tree.element_mut(parent).hooks.on_add_projected_connector,
                    self,
                    connector,
                );
            }
        }
    }

    fn move_projected_pin(
        &mut self,
        old_target: Option<ElementHandle>,
        new_target: Option<ElementHandle>,
        pin: PinHandle,
    ) {
        if let Some(old_target) = old_target {
            self.element_mut(old_target).projected_pins.retain(|&p| p != pin);
        }
        if let Some(new_target) = new_target {
            self.element_mut(new_target).projected_pins.push(pin);
        }
    }
}
