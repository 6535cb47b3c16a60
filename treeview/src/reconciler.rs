//! The reconciler (§4.4): tracks the live subtree of every registered root,
//! owns a view per live element and per live-and-attached connector, and
//! translates structural vis-tree events into create/embed/destroy calls on
//! the view contract of [`crate::view`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use aili_vistree::{ConnectorHandle, ElementHandle, HookHandle, Tree};

use crate::view::{ConnectorView, ConnectorViewHandle, Embedding, ElementView, ElementViewHandle, Slot};

struct Inner<EF, CF> {
    element_view_factory: EF,
    connector_view_factory: CF,
    element_views: HashMap<ElementHandle, ElementViewHandle>,
    connector_views: HashMap<ConnectorHandle, ConnectorViewHandle>,
    element_hooks: HashMap<ElementHandle, Vec<HookHandle>>,
    connector_hooks: HashMap<ConnectorHandle, Vec<HookHandle>>,
}

/// Keeps a population of element/connector views synchronized with the live
/// subtrees of whichever elements have been registered as roots via
/// [`TreeView::add_root`].
///
/// `EF` and `CF` are the element-view and connector-view factories (§6):
/// given a handle, they construct the opaque rendering for it. Kept behind
/// `Rc<RefCell<_>>` because hook callbacks subscribed deep in the tracked
/// subtree must be able to mutate the same reconciler state reentrantly,
/// mirroring how `aili-parser` shares its lexer/error-handler state across
/// mutually recursive callbacks.
pub struct TreeView<EF, CF> {
    inner: Rc<RefCell<Inner<EF, CF>>>,
}

impl<EF, CF> Clone for TreeView<EF, CF> {
    fn clone(&self) -> Self {
        TreeView { inner: self.inner.clone() }
    }
}

impl<EF, CF> TreeView<EF, CF>
where
    EF: Fn(ElementHandle) -> Box<dyn ElementView> + 'static,
    CF: Fn(ConnectorHandle) -> Box<dyn ConnectorView> + 'static,
{
    pub fn new(element_view_factory: EF, connector_view_factory: CF) -> Self {
        TreeView {
            inner: Rc::new(RefCell::new(Inner {
                element_view_factory,
                connector_view_factory,
                element_views: HashMap::new(),
                connector_views: HashMap::new(),
                element_hooks: HashMap::new(),
                connector_hooks: HashMap::new(),
            })),
        }
    }

    /// Registers `element` as a root, embedded in `slot` (§4.4.1).
    pub fn add_root(&self, tree: &mut Tree, element: ElementHandle, slot: Box<dyn Slot>) {
        self.register_element(tree, element, Embedding::slot(slot));
    }

    /// Unregisters `element` as a root and tears down its whole tracked
    /// subtree, provided it is still explicitly embedded (§4.4.1). A no-op
    /// if it was never registered or has since been reparented and torn
    /// down already.
    pub fn remove_root(&self, tree: &mut Tree, element: ElementHandle) {
        let explicitly_embedded = self
            .inner
            .borrow()
            .element_views
            .get(&element)
            .map(|view| view.borrow().has_explicit_embedding())
            .unwrap_or(false);
        if explicitly_embedded {
            self.teardown_subtree(tree, element);
        }
    }

    /// Fetches or creates the view for `element`, applies `embedding` to it
    /// (subject to the sticky-explicit-embedding rule), and if the view was
    /// newly created, runs after-new-element registration (§4.4.2).
    fn register_element(
        &self,
        tree: &mut Tree,
        element: ElementHandle,
        embedding: Embedding,
    ) -> ElementViewHandle {
        let (view, created) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(view) = inner.element_views.get(&element) {
                (view.clone(), false)
            } else {
                let view: ElementViewHandle =
                    Rc::new(RefCell::new((inner.element_view_factory)(element)));
                inner.element_views.insert(element, view.clone());
                (view, true)
            }
        };

        let apply = embedding.parent.is_none() || !view.borrow().has_explicit_embedding();
        if apply {
            view.borrow_mut().use_embedding(embedding);
        }

        if created {
            self.after_new_element_registration(tree, element, view.clone());
        }
        view
    }

    /// §4.4.2: wires up a freshly created element view to everything that
    /// can make it gain children, gain pins, or need tearing down.
    fn after_new_element_registration(
        &self,
        tree: &mut Tree,
        element: ElementHandle,
        view: ElementViewHandle,
    ) {
        let mut hooks = Vec::new();

        let children: Vec<_> = element.children(tree).collect();
        for child in children {
            self.register_element(tree, child, Embedding::parent(view.clone()));
        }
        {
            let this = self.clone();
            let parent_view = view.clone();
            hooks.push(element.on_add_child(tree, move |tree, child| {
                this.register_element(tree, child, Embedding::parent(parent_view.clone()));
            }));
        }

        let pins: Vec<_> = element.pins(tree).collect();
        for pin in pins {
            self.connector_pin_attached(tree, pin.connector);
        }
        {
            let this = self.clone();
            hooks.push(element.on_add_pin(tree, move |tree, pin| {
                this.connector_pin_attached(tree, pin.connector);
            }));
        }

        if !view.borrow().has_explicit_embedding() {
            let this = self.clone();
            hooks.push(element.on_parent_changed(tree, move |tree, _new, _old| {
                this.teardown_subtree(tree, element);
            }));
        }

        self.inner.borrow_mut().element_hooks.insert(element, hooks);
    }

    /// §4.4.5: given a pin whose target just entered the tracked set (or was
    /// pre-attached when its target was registered), attaches or creates the
    /// connector's view once both endpoints have a live view.
    fn connector_pin_attached(&self, tree: &mut Tree, connector: ConnectorHandle) {
        let Some(start_target) = connector.start().target(tree) else { return };
        let Some(end_target) = connector.end().target(tree) else { return };

        let (start_view, end_view) = {
            let inner = self.inner.borrow();
            let Some(start_view) = inner.element_views.get(&start_target).cloned() else { return };
            let Some(end_view) = inner.element_views.get(&end_target).cloned() else { return };
            (start_view, end_view)
        };

        let (view, created) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(view) = inner.connector_views.get(&connector) {
                (view.clone(), false)
            } else {
                let view: ConnectorViewHandle =
                    Rc::new(RefCell::new((inner.connector_view_factory)(connector)));
                inner.connector_views.insert(connector, view.clone());
                (view, true)
            }
        };

        view.borrow_mut().use_endpoints(start_view, end_view);

        if created {
            let this = self.clone();
            let start_hook = connector.start().on_target_changed(tree, move |tree, _new, _old| {
                this.remove_connector_view(tree, connector);
            });
            let this = self.clone();
            let end_hook = connector.end().on_target_changed(tree, move |tree, _new, _old| {
                this.remove_connector_view(tree, connector);
            });
            self.inner
                .borrow_mut()
                .connector_hooks
                .insert(connector, vec![start_hook, end_hook]);
        }
    }

    /// §4.4.3: unhooks and destroys `element`'s view, then recurses into its
    /// current children and removes the view of every connector currently
    /// pinned to it.
    fn teardown_subtree(&self, tree: &mut Tree, element: ElementHandle) {
        let view = self.inner.borrow_mut().element_views.remove(&element);
        let hooks = self.inner.borrow_mut().element_hooks.remove(&element);
        if let Some(hooks) = hooks {
            for hook in hooks {
                hook.unhook(tree);
            }
        }
        if let Some(view) = view {
            view.borrow_mut().destroy();
        }

        let children: Vec<_> = element.children(tree).collect();
        for child in children {
            self.teardown_subtree(tree, child);
        }

        let pins: Vec<_> = element.pins(tree).collect();
        for pin in pins {
            self.remove_connector_view(tree, pin.connector);
        }
    }

    /// Unhooks both of a connector's endpoint-target-changed observers and
    /// destroys its view, if it has one.
    fn remove_connector_view(&self, tree: &mut Tree, connector: ConnectorHandle) {
        let view = self.inner.borrow_mut().connector_views.remove(&connector);
        let hooks = self.inner.borrow_mut().connector_hooks.remove(&connector);
        if let Some(hooks) = hooks {
            for hook in hooks {
                hook.unhook(tree);
            }
        }
        if let Some(view) = view {
            view.borrow_mut().destroy();
        }
    }
}
