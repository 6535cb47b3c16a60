//! Handles that identify elements, connectors and pins in a [`Tree`](crate::Tree).
//!
//! The tree is realized as arenas indexed by these handles (§9 of the design
//! notes): cross-references (parent, target, projection) are plain `Copy`
//! values rather than a graph of owning pointers, which sidesteps the cycles
//! inherent in the data model. Arena slots are never reclaimed — an
//! element/connector is "discarded" only in the sense that the client
//! stops using its handle, which has no operational effect here. See
//! DESIGN.md.

use derive_more::{Display, Error};

/// Owning handle to an [`Element`](crate::Element) in a [`Tree`](crate::Tree).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementHandle(pub(crate) usize);

/// Owning handle to a [`Connector`](crate::Connector) in a [`Tree`](crate::Tree).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ConnectorHandle(pub(crate) usize);

/// Identifies which of a connector's two pins is meant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Endpoint {
    Start,
    End,
}

/// Identifies one pin: the `endpoint` of `connector`. Pins have no handle of
/// their own, as they are owned by their connector and never reassigned to
/// another one (§3); this pair of a connector handle and an endpoint
/// selector is stable identity enough to use them as keys in the
/// projected-pins index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PinHandle {
    pub connector: ConnectorHandle,
    pub endpoint: Endpoint,
}

impl PinHandle {
    pub(crate) fn new(connector: ConnectorHandle, endpoint: Endpoint) -> Self {
        PinHandle { connector, endpoint }
    }
}

/// Error returned by a parent assignment that would introduce a cycle in the
/// parent/child relation (including assigning an element as its own parent).
///
/// The only operation in the core that can fail; it leaves the tree
/// completely unchanged (§4.3.6).
#[derive(Clone, Copy, Debug, Display, Default, Error)]
#[display("visualization tree operation was rejected because it would create a cycle")]
pub struct StructureViolation;
