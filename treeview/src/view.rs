//! The view contract the reconciler drives (§4.4): opaque element and
//! connector renderings, and the slot they are embedded into.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle to an already-registered element view, handed to a newly
/// registered child so it can ask its parent for an appropriate slot. Opaque
/// to the reconciler: it never calls anything on it but [`ElementView`]'s own
/// methods.
pub type ElementViewHandle = Rc<RefCell<dyn ElementView>>;

/// Handle to a registered connector view.
pub type ConnectorViewHandle = Rc<RefCell<dyn ConnectorView>>;

/// Where a view is rendered: an explicit slot (used for registered roots) or
/// inherited from a parent view (the view itself requests an appropriate
/// slot, inline or companion, based on its own preferred layout). Both
/// fields absent means "detach."
pub struct Embedding {
    pub parent: Option<ElementViewHandle>,
    pub slot: Option<Box<dyn Slot>>,
}

impl Embedding {
    pub fn none() -> Self {
        Embedding { parent: None, slot: None }
    }

    pub fn parent(view: ElementViewHandle) -> Self {
        Embedding { parent: Some(view), slot: None }
    }

    pub fn slot(slot: Box<dyn Slot>) -> Self {
        Embedding { parent: None, slot: Some(slot) }
    }
}

/// A place a view's rendering can be put: populated on embedding, released
/// on [`Slot::destroy`]. Opaque to the reconciler and to [`ElementView`]
/// implementations of views other than the one that owns it.
pub trait Slot {
    fn destroy(&mut self);
}

/// The rendering of one element, created and owned by the reconciler for as
/// long as the element stays in a tracked subtree.
pub trait ElementView {
    /// Moves this view's rendering per `embedding`. Once embedded via an
    /// explicit slot, the view is sticky: later calls with `embedding.parent`
    /// set must be ignored (§4.4, element view contract).
    fn use_embedding(&mut self, embedding: Embedding);

    /// True iff the last accepted embedding was an explicit slot.
    fn has_explicit_embedding(&self) -> bool;

    /// Releases all resources, including the current slot.
    fn destroy(&mut self);
}

/// The rendering of one connector, created and owned by the reconciler for
/// as long as both of its pins target tracked elements.
pub trait ConnectorView {
    /// Attaches or moves the connector's rendering between the views of its
    /// two current endpoint targets.
    fn use_endpoints(&mut self, start: ElementViewHandle, end: ElementViewHandle);

    fn destroy(&mut self);
}
