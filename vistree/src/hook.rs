//! Synchronous multi-observer event channels.

use crate::Tree;
use std::collections::{HashMap, HashSet};

/// Identifies one registration of a callback with a [`Hook`].
///
/// Returned by the various `on_*` subscription methods of [`Element`](crate::Element),
/// [`Pin`](crate::Pin) and [`Connector`](crate::Connector). Unlike the handles that
/// identify vis tree entities, a hook registration lives inside the [`Tree`] that
/// created it, so removing it takes the tree as an argument rather than being
/// self-sufficient.
pub struct HookHandle {
    id: ListenerId,
    unhook: Box<dyn Fn(&mut Tree, ListenerId)>,
}

impl std::fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookHandle").field("id", &self.id).finish_non_exhaustive()
    }
}

impl HookHandle {
    pub(crate) fn new(id: ListenerId, unhook: impl Fn(&mut Tree, ListenerId) + 'static) -> Self {
        HookHandle { id, unhook: Box::new(unhook) }
    }

    /// Removes this registration. Idempotent: calling it again, or calling it
    /// after the tree has already dropped this registration for other reasons,
    /// has no effect and does not disturb other registrations of the same hook.
    pub fn unhook(&self, tree: &mut Tree) {
        (self.unhook)(tree, self.id);
    }
}

pub(crate) type ListenerId = u64;
type Listener<T> = Box<dyn FnMut(&mut Tree, T)>;

/// Multi-observer synchronous event channel.
///
/// Every structural hook exposed by the vis tree (`on_add_child`, `on_parent_changed`, ...)
/// is backed by one of these. Registering the same callback more than once creates
/// independent registrations that can be removed independently. Triggering invokes
/// every listener that was already registered when the trigger started, in
/// registration order; listeners registered during the trigger are not invoked
/// until the next one.
pub struct Hook<T> {
    listeners: HashMap<ListenerId, Listener<T>>,
    order: Vec<ListenerId>,
    /// Ids unhooked while their callback was being invoked (and therefore
    /// temporarily absent from `listeners`); consulted by [`fire`] so the
    /// callback is not resurrected once it returns.
    removed_mid_call: HashSet<ListenerId>,
    next_id: ListenerId,
}

impl<T> Default for Hook<T> {
    fn default() -> Self {
        Hook {
            listeners: HashMap::new(),
            order: Vec::new(),
            removed_mid_call: HashSet::new(),
            next_id: 0,
        }
    }
}

impl<T> Hook<T> {
    /// Registers a callback, returning the id of the new registration.
    pub(crate) fn subscribe(&mut self, callback: impl FnMut(&mut Tree, T) + 'static) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, Box::new(callback));
        self.order.push(id);
        id
    }

    /// Removes a registration by id. A no-op if it is not currently registered.
    pub(crate) fn unhook(&mut self, id: ListenerId) {
        if self.listeners.remove(&id).is_some() {
            self.order.retain(|&x| x != id);
        } else {
            // Either this id was never registered, already removed, or its
            // callback is currently executing: `fire` checks this set before
            // putting a just-invoked callback back.
            self.removed_mid_call.insert(id);
        }
    }
}

/// Registers `callback` with the hook that `site` points to, returning a
/// [`HookHandle`] that can later unhook it without needing to know `T` or
/// which field of the tree `site` refers to.
pub(crate) fn subscribe<T: Clone + 'static>(
    site: impl Fn(&mut Tree) -> &mut Hook<T> + 'static,
    tree: &mut Tree,
    callback: impl FnMut(&mut Tree, T) + 'static,
) -> HookHandle {
    let id = site(tree).subscribe(callback);
    HookHandle::new(id, move |tree, id| site(tree).unhook(id))
}

/// Invokes every listener of the hook returned by `site` with `arg`, following
/// the reentrancy rules documented on [`Hook`].
///
/// `site` re-derives the `&mut Hook<T>` from the tree on every call instead of
/// being captured once, so that listener invocations (which themselves take
/// `&mut Tree`) can freely read and mutate the rest of the tree, including the
/// very hook being fired.
pub(crate) fn fire<T: Clone>(site: impl Fn(&mut Tree) -> &mut Hook<T>, tree: &mut Tree, arg: T) {
    let ids = site(tree).order.clone();
    for id in ids {
        let Some(mut callback) = site(tree).listeners.remove(&id) else {
            continue;
        };
        callback(tree, arg.clone());
        let hook = site(tree);
        if hook.removed_mid_call.remove(&id) {
            hook.order.retain(|&x| x != id);
        } else {
            hook.listeners.insert(id, callback);
        }
    }
}
