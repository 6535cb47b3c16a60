#![doc = include_str!("../README.md")]

mod attr;
mod connector;
mod element;
mod handle;
mod hook;
mod model_impl;
mod tree;

pub use handle::{ConnectorHandle, ElementHandle, Endpoint, PinHandle, StructureViolation};
pub use hook::HookHandle;
pub use model_impl::{ConnectorRef, ElementRef, PinRef};
pub use tree::Tree;
