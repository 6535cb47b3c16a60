//! Keyed string-valued properties with change notifications.

use crate::hook::{self, Hook, HookHandle};
use crate::Tree;
use std::collections::HashMap;

/// A single named property and the hook that observes changes to it.
#[derive(Default)]
pub(crate) struct AttrEntry {
    value: Option<String>,
    hook: Hook<(Option<String>, Option<String>)>,
}

/// Per-node keyed string store with change notifications.
///
/// Entries are created lazily on first access by name, so a callback can be
/// registered for an attribute before it is ever written (the initial read
/// simply reports absence). Owned by exactly one [`Element`](crate::Element),
/// [`Pin`](crate::Pin) or [`Connector`](crate::Connector); never shared.
#[derive(Default)]
pub(crate) struct AttributeMap {
    entries: HashMap<String, AttrEntry>,
}

impl AttributeMap {
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name)?.value.as_deref()
    }

    fn entry_mut(&mut self, name: &str) -> &mut AttrEntry {
        self.entries.entry(name.to_owned()).or_default()
    }
}

/// Reads the current value of attribute `name` from the map that `site` addresses.
pub(crate) fn read_attribute<'t>(
    site: impl Fn(&'t Tree) -> &'t AttributeMap,
    tree: &'t Tree,
    name: &str,
) -> Option<&'t str> {
    site(tree).get(name)
}

/// Writes a new value into attribute `name` of the map that `site` addresses,
/// firing its change hook iff the value actually changed (§4.1: a write that
/// repeats the current value, including a write of absence to an
/// already-absent entry, is a no-op and must not fire).
pub(crate) fn write_attribute(
    site: impl Fn(&mut Tree) -> &mut AttributeMap + Clone + 'static,
    tree: &mut Tree,
    name: &str,
    value: Option<&str>,
) {
    let entry = site(tree).entry_mut(name);
    if entry.value.as_deref() == value {
        return;
    }
    let old = entry.value.take();
    entry.value = value.map(str::to_owned);
    let new = value.map(str::to_owned);
    let name = name.to_owned();
    hook::fire(
        move |tree| &mut site(tree).entry_mut(&name).hook,
        tree,
        (new, old),
    );
}

/// Subscribes `callback` to changes of attribute `name` of the map that `site` addresses.
pub(crate) fn subscribe_attribute(
    site: impl Fn(&mut Tree) -> &mut AttributeMap + Clone + 'static,
    tree: &mut Tree,
    name: &str,
    callback: impl FnMut(&mut Tree, Option<&str>, Option<&str>) + 'static,
) -> HookHandle {
    let name = name.to_owned();
    let mut callback = callback;
    hook::subscribe(
        move |tree| &mut site(tree).entry_mut(&name).hook,
        tree,
        move |tree, (new, old)| callback(tree, new.as_deref(), old.as_deref()),
    )
}

/// Subscribes every `(name, callback)` pair in `bindings` to the attribute it
/// names on the map that `site` addresses, immediately invoking any callback
/// whose attribute already has a present value (the "initial-value
/// propagation" rule of §4.1).
///
/// Returns a single handle that unhooks every subscription it made, so a
/// consumer that bound a batch of style properties to one entity can tear
/// them all down atomically when that entity stops being styled.
pub fn bind_many(
    tree: &mut Tree,
    site: impl Fn(&mut Tree) -> &mut AttributeMap + Clone + 'static,
    bindings: impl IntoIterator<Item = (String, Box<dyn FnMut(&mut Tree, Option<&str>, Option<&str>)>)>,
) -> HookHandle {
    let mut handles = Vec::new();
    for (name, mut callback) in bindings {
        if let Some(value) = site(tree).entry_mut(&name).value.clone() {
            callback(tree, Some(value.as_str()), None);
        }
        handles.push(subscribe_attribute(site.clone(), tree, &name, move |tree, new, old| {
            callback(tree, new, old)
        }));
    }
    HookHandle::new(0, move |tree, _| {
        for handle in &handles {
            handle.unhook(tree);
        }
    })
}
