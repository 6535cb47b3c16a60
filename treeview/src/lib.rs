#![doc = include_str!("../README.md")]

mod reconciler;
mod view;

pub use reconciler::TreeView;
pub use view::{ConnectorView, ConnectorViewHandle, Embedding, ElementView, ElementViewHandle, Slot};
