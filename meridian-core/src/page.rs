use std::{fmt, mem, rc::Rc};

use crate::node::Node;

/// Cleanup work owned by a page or a subscription.
///
/// Callbacks run once, most recently registered first, either on
/// [`dispose`](Self::dispose) or when the disposer is dropped.
#[derive(Default)]
pub struct Disposer {
    callbacks: Vec<Box<dyn FnOnce()>>,
}

impl Disposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fn<F: FnOnce() + 'static>(f: F) -> Self {
        let mut disposer = Self::new();
        disposer.on_dispose(f);
        disposer
    }

    /// Keeps `guard` alive until disposal, then drops it.
    pub fn holding<T: 'static>(guard: T) -> Self {
        let mut disposer = Self::new();
        disposer.hold(guard);
        disposer
    }

    pub fn on_dispose<F: FnOnce() + 'static>(&mut self, f: F) {
        self.callbacks.push(Box::new(f));
    }

    pub fn hold<T: 'static>(&mut self, guard: T) {
        self.on_dispose(move || drop(guard));
    }

    pub fn merge(&mut self, mut other: Self) {
        self.callbacks.append(&mut other.callbacks);
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        for f in mem::take(&mut self.callbacks).into_iter().rev() {
            f();
        }
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// A rendered page: its root node plus whatever must be released when the
/// page is replaced.
#[derive(Debug)]
pub struct Page {
    root: Node,
    disposer: Disposer,
}

impl Page {
    pub fn new(root: Node) -> Self {
        Self::with_disposer(root, Disposer::new())
    }

    pub fn with_disposer(root: Node, disposer: Disposer) -> Self {
        Self { root, disposer }
    }

    pub fn on_dispose<F: FnOnce() + 'static>(mut self, f: F) -> Self {
        self.disposer.on_dispose(f);
        self
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_parts(self) -> (Node, Disposer) {
        (self.root, self.disposer)
    }
}

impl From<Node> for Page {
    fn from(value: Node) -> Self {
        Self::new(value)
    }
}

pub type PageFactory = Rc<dyn Fn() -> Page>;
