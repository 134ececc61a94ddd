use std::cell::Cell;

use gloo_timers::callback::Interval;
use meridian_core::{
    env::{self, Env},
    host::Host,
    page::Disposer,
    Node,
};
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, Window};

/// The live browser document.
#[derive(Clone, Debug)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Binds to the current window and switches node creation to the
    /// browser. Returns `None` outside a browser.
    pub fn new() -> Option<Self> {
        if !env::browser_available() {
            return None;
        }
        let window = web_sys::window()?;
        let document = window.document()?;

        env::replace(Env::Browser);
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_ready(&self) -> bool {
        self.document.ready_state() != "loading"
    }
}

impl Host for WebHost {
    fn fragment(&self) -> String {
        self.window.location().hash().unwrap_or_else(|err| {
            log::error!("failed to read location hash: {err:?}");
            String::new()
        })
    }

    fn set_fragment(&self, fragment: &str) {
        if let Err(err) = self.window.location().set_hash(fragment) {
            log::error!("failed to set location hash to `{fragment}`: {err:?}");
        }
    }

    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.document.get_element_by_id(id).map(Node::from_native)
    }

    fn elements_with_class(&self, class: &str) -> Vec<Node> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .map(Node::from_native)
            .collect()
    }

    fn on_navigation(&self, mut f: Box<dyn FnMut()>) -> Disposer {
        listen(&self.window, "hashchange", move |_| f())
    }

    fn on_ready(&self, f: Box<dyn FnOnce()>) -> Disposer {
        when_ready(&self.document, self.is_ready(), f)
    }

    fn interval(&self, period_ms: u32, f: Box<dyn FnMut()>) -> Disposer {
        Disposer::holding(Interval::new(period_ms, f))
    }
}

/// Runs `f` now if the document has loaded, otherwise on `DOMContentLoaded`.
pub(crate) fn when_ready(document: &Document, ready: bool, f: Box<dyn FnOnce()>) -> Disposer {
    if ready {
        f();
        return Disposer::new();
    }

    let f = Cell::new(Some(f));
    listen(document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })
}

/// Adds a native listener that stays attached until the disposer runs.
fn listen<F>(target: &EventTarget, name: &'static str, f: F) -> Disposer
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(f);
    if let Err(err) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
        log::error!("failed to listen for `{name}`: {err:?}");
    }

    let target = target.clone();
    Disposer::from_fn(move || {
        let _ = target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    })
}
