use std::{cell::RefCell, fmt, rc::Rc};

use crate::node::Node;

/// A slot that captures an element while it is being built, see
/// [`Props::node_ref`](crate::props::Props::node_ref).
///
/// Handlers on a page usually reach the page's own nodes through one of
/// these. Emptying it with [`take`](Self::take) on disposal breaks the
/// node to handler to node cycle.
#[derive(Clone, Default)]
pub struct NodeRef {
    slot: Rc<RefCell<Option<Node>>>,
}

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn try_get(&self) -> Option<Node> {
        self.slot.borrow().clone()
    }

    /// # Panics
    ///
    /// Panics if nothing has been captured, or the slot was emptied.
    pub fn get(&self) -> Node {
        match self.try_get() {
            Some(node) => node,
            None => panic!("node reference read while empty"),
        }
    }

    /// Runs `f` on the captured node, if any.
    pub fn with<T>(&self, f: impl FnOnce(&Node) -> T) -> Option<T> {
        let node = self.try_get()?;
        Some(f(&node))
    }

    pub fn set(&self, node: Node) -> Option<Node> {
        self.slot.replace(Some(node))
    }

    pub fn take(&self) -> Option<Node> {
        self.slot.take()
    }
}

impl Eq for NodeRef {}
impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self
            .slot
            .borrow()
            .as_ref()
            .map(|node| node.tag_name().unwrap_or("#text").to_owned());
        f.debug_tuple("NodeRef").field(&tag).finish()
    }
}
