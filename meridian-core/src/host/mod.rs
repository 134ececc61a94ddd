//! The document a router drives.
//!
//! [`Host`] is the narrow surface the router needs from its environment: the
//! navigation fragment, element lookups, and the three event sources it
//! subscribes to. Every subscription hands back a [`Disposer`] that cancels it.

mod memory;

pub use memory::MemoryHost;

use crate::{node::Node, page::Disposer};

pub trait Host: Clone + 'static {
    /// The raw fragment, including its leading `#` when there is one.
    fn fragment(&self) -> String;

    /// Changes the fragment. A change is reported to navigation listeners;
    /// setting the current value again is not.
    fn set_fragment(&self, fragment: &str);

    fn element_by_id(&self, id: &str) -> Option<Node>;

    /// Live query, evaluated at call time.
    fn elements_with_class(&self, class: &str) -> Vec<Node>;

    fn on_navigation(&self, f: Box<dyn FnMut()>) -> Disposer;

    /// Runs `f` once the document has loaded, immediately if it already has.
    fn on_ready(&self, f: Box<dyn FnOnce()>) -> Disposer;

    fn interval(&self, period_ms: u32, f: Box<dyn FnMut()>) -> Disposer;
}
