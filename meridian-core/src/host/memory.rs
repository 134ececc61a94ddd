use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;

use crate::{host::Host, node::Node, page::Disposer};

type Callback = Rc<RefCell<Box<dyn FnMut()>>>;

/// A [`Host`] that lives entirely in memory.
///
/// The document is a plain `body` [`Node`]. Time only moves when
/// [`advance`](Self::advance) is called, and loading only finishes on
/// [`finish_loading`](Self::finish_loading).
#[derive(Clone)]
pub struct MemoryHost(Rc<Inner>);

struct Inner {
    document: Node,
    fragment: RefCell<String>,
    ready: Cell<bool>,
    next_id: Cell<u64>,

    navigation: RefCell<IndexMap<u64, Callback>>,
    pending_navigations: Cell<usize>,
    dispatching: Cell<bool>,

    ready_callbacks: RefCell<IndexMap<u64, Box<dyn FnOnce()>>>,

    timers: RefCell<IndexMap<u64, Timer>>,
    now: Cell<u64>,
}

struct Timer {
    period: u64,
    due: u64,
    callback: Callback,
}

impl MemoryHost {
    /// A host whose document is still loading.
    pub fn new() -> Self {
        let inner = Inner {
            document: Node::element("body"),
            fragment: RefCell::default(),
            ready: Cell::new(false),
            next_id: Cell::new(0),
            navigation: RefCell::default(),
            pending_navigations: Cell::new(0),
            dispatching: Cell::new(false),
            ready_callbacks: RefCell::default(),
            timers: RefCell::default(),
            now: Cell::new(0),
        };
        Self(Rc::new(inner))
    }

    /// A host whose document has already loaded.
    pub fn loaded() -> Self {
        let host = Self::new();
        host.0.ready.set(true);
        host
    }

    pub fn document(&self) -> &Node {
        &self.0.document
    }

    pub fn is_ready(&self) -> bool {
        self.0.ready.get()
    }

    /// Marks the document loaded and runs the pending ready callbacks in
    /// registration order.
    pub fn finish_loading(&self) {
        if self.0.ready.replace(true) {
            return;
        }

        let callbacks = self.0.ready_callbacks.take();
        for (_, f) in callbacks {
            f();
        }
    }

    pub fn now(&self) -> u64 {
        self.0.now.get()
    }

    /// Moves the clock forward by `ms`, firing every interval that falls due
    /// on the way, earliest first.
    pub fn advance(&self, ms: u64) {
        let target = self.0.now.get() + ms;

        loop {
            let next = {
                let mut timers = self.0.timers.borrow_mut();
                let due = timers
                    .iter()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| timer.due)
                    .map(|(id, _)| *id);

                due.and_then(|id| timers.get_mut(&id)).map(|timer| {
                    let fired_at = timer.due;
                    timer.due += timer.period;
                    (fired_at, timer.callback.clone())
                })
            };

            let Some((fired_at, callback)) = next else {
                break;
            };
            self.0.now.set(fired_at);
            call(&callback);
        }

        self.0.now.set(target);
    }

    pub fn active_timers(&self) -> usize {
        self.0.timers.borrow().len()
    }

    pub fn navigation_listeners(&self) -> usize {
        self.0.navigation.borrow().len()
    }

    fn next_id(&self) -> u64 {
        let id = self.0.next_id.get();
        self.0.next_id.set(id + 1);
        id
    }

    fn weak(&self) -> Weak<Inner> {
        Rc::downgrade(&self.0)
    }

    /// Delivers queued navigation events one at a time. A navigation started
    /// by a listener is queued behind the one being delivered.
    fn deliver_navigations(&self) {
        if self.0.dispatching.replace(true) {
            return;
        }

        while self.0.pending_navigations.get() > 0 {
            self.0
                .pending_navigations
                .set(self.0.pending_navigations.get() - 1);

            let ids = self.0.navigation.borrow().keys().copied().collect::<Vec<_>>();
            for id in ids {
                let callback = self.0.navigation.borrow().get(&id).cloned();
                if let Some(callback) = callback {
                    call(&callback);
                }
            }
        }

        self.0.dispatching.set(false);
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn fragment(&self) -> String {
        self.0.fragment.borrow().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        let fragment = match fragment {
            "" | "#" => String::new(),
            f if f.starts_with('#') => f.to_owned(),
            f => format!("#{f}"),
        };

        if *self.0.fragment.borrow() == fragment {
            return;
        }
        log::trace!("fragment changed to `{fragment}`");
        self.0.fragment.replace(fragment);

        self.0
            .pending_navigations
            .set(self.0.pending_navigations.get() + 1);
        self.deliver_navigations();
    }

    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.0.document.find_by_id(id)
    }

    fn elements_with_class(&self, class: &str) -> Vec<Node> {
        self.0.document.find_by_class(class)
    }

    fn on_navigation(&self, f: Box<dyn FnMut()>) -> Disposer {
        let id = self.next_id();
        self.0
            .navigation
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(f)));

        let weak = self.weak();
        Disposer::from_fn(move || {
            if let Some(inner) = weak.upgrade() {
                inner.navigation.borrow_mut().shift_remove(&id);
            }
        })
    }

    fn on_ready(&self, f: Box<dyn FnOnce()>) -> Disposer {
        if self.is_ready() {
            f();
            return Disposer::new();
        }

        let id = self.next_id();
        self.0.ready_callbacks.borrow_mut().insert(id, f);

        let weak = self.weak();
        Disposer::from_fn(move || {
            if let Some(inner) = weak.upgrade() {
                inner.ready_callbacks.borrow_mut().shift_remove(&id);
            }
        })
    }

    fn interval(&self, period_ms: u32, f: Box<dyn FnMut()>) -> Disposer {
        let id = self.next_id();
        // browsers clamp a zero delay, keep the clock moving the same way
        let period = u64::from(period_ms.max(1));
        let timer = Timer {
            period,
            due: self.now() + period,
            callback: Rc::new(RefCell::new(f)),
        };
        self.0.timers.borrow_mut().insert(id, timer);

        let weak = self.weak();
        Disposer::from_fn(move || {
            if let Some(inner) = weak.upgrade() {
                inner.timers.borrow_mut().shift_remove(&id);
            }
        })
    }
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHost")
            .field("fragment", &*self.0.fragment.borrow())
            .field("ready", &self.0.ready.get())
            .field("now", &self.0.now.get())
            .field("timers", &self.0.timers.borrow().len())
            .finish_non_exhaustive()
    }
}

fn call(callback: &Callback) {
    match callback.try_borrow_mut() {
        Ok(mut f) => f(),
        Err(_) => log::warn!("skipped re-entrant host callback"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<u32>>, Box<dyn FnMut()>) {
        let count = Rc::new(Cell::new(0));
        let f: Box<dyn FnMut()> = clone!(count; Box::new(move || count.set(count.get() + 1)));
        (count, f)
    }

    #[test]
    fn fragments_are_normalized_and_changes_reported() {
        let host = MemoryHost::loaded();
        let (count, f) = counter();
        let _sub = host.on_navigation(f);

        host.set_fragment("/news");
        assert_eq!(host.fragment(), "#/news");

        host.set_fragment("#/news");
        assert_eq!(count.get(), 1);

        host.set_fragment("#");
        assert_eq!(host.fragment(), "");
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn navigations_from_listeners_are_queued() {
        let host = MemoryHost::loaded();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _sub = host.on_navigation(Box::new(clone!(host, seen; move || {
            let fragment = host.fragment();
            seen.borrow_mut().push(fragment.clone());
            if fragment == "#/a" {
                host.set_fragment("#/b");
                // the nested change is delivered after this listener returns
                assert_eq!(seen.borrow().len(), 1);
            }
        })));

        host.set_fragment("#/a");
        assert_eq!(*seen.borrow(), vec!["#/a", "#/b"]);
    }

    #[test]
    fn disposed_listeners_stop_receiving() {
        let host = MemoryHost::loaded();
        let (count, f) = counter();
        let sub = host.on_navigation(f);
        assert_eq!(host.navigation_listeners(), 1);

        sub.dispose();
        host.set_fragment("#/x");
        assert_eq!(count.get(), 0);
        assert_eq!(host.navigation_listeners(), 0);
    }

    #[test]
    fn ready_callbacks_wait_for_loading() {
        let host = MemoryHost::new();
        let ran = Rc::new(Cell::new(0));

        let _pending = host.on_ready(Box::new(clone!(ran; move || ran.set(ran.get() + 1))));
        let cancelled = host.on_ready(Box::new(clone!(ran; move || ran.set(ran.get() + 10))));
        cancelled.dispose();
        assert_eq!(ran.get(), 0);

        host.finish_loading();
        host.finish_loading();
        assert_eq!(ran.get(), 1);

        let _late = host.on_ready(Box::new(clone!(ran; move || ran.set(ran.get() + 1))));
        assert_eq!(ran.get(), 2);
    }

    #[test]
    fn intervals_follow_the_clock() {
        let host = MemoryHost::loaded();
        let (count, f) = counter();
        let timer = host.interval(1000, f);

        host.advance(999);
        assert_eq!(count.get(), 0);
        host.advance(1);
        assert_eq!(count.get(), 1);
        host.advance(2500);
        assert_eq!(count.get(), 3);
        assert_eq!(host.now(), 3500);

        drop(timer);
        host.advance(5000);
        assert_eq!(count.get(), 3);
        assert_eq!(host.active_timers(), 0);
    }

    #[test]
    fn queries_search_the_document() {
        let host = MemoryHost::loaded();
        let main = Node::element("main");
        main.set_attr("id", "app-root");
        let link = Node::element("a");
        link.set_attr("class", "nav-link");
        host.document().append(&main);
        host.document().append(&link);

        assert_eq!(host.element_by_id("app-root"), Some(main));
        assert_eq!(host.elements_with_class("nav-link"), vec![link]);
        assert_eq!(host.element_by_id("other"), None);
    }
}
