pub mod render;

use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;
use thiserror::Error;
use wasm_bindgen::{intern, prelude::*};

use crate::{
    env::{document, is_browser},
    events::Event,
};

type EventClosure = Closure<dyn FnMut(web_sys::Event)>;
type Handler = Rc<RefCell<Box<dyn FnMut(Event)>>>;

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum NodeError {
    #[error("invalid tag name `{0}`")]
    InvalidTagName(String),
    #[error("platform error: {0}")]
    Platform(String),
}

pub(crate) enum NodeKind {
    Element {
        name: String,
        attrs: RefCell<IndexMap<String, String>>,
    },
    Text(RefCell<String>),
}

/// A document node.
///
/// The tree is always kept in memory. In the browser environment every node is
/// also backed by a native DOM node that mirrors it, and listeners are attached
/// natively. Clones are handles to the same node; equality is identity.
#[derive(Clone)]
pub struct Node(Rc<RawNode>);

struct RawNode {
    kind: NodeKind,

    parent: RefCell<Option<Weak<RawNode>>>,
    children: RefCell<Vec<Node>>,
    listeners: RefCell<Vec<Listener>>,

    native: Option<web_sys::Node>,
}

struct Listener {
    name: String,
    handler: Handler,
    closure: Option<EventClosure>,
}

impl Node {
    // Node Creation //

    fn create(kind: NodeKind, native: Option<web_sys::Node>) -> Self {
        let raw = RawNode {
            kind,
            parent: RefCell::default(),
            children: RefCell::default(),
            listeners: RefCell::default(),
            native,
        };
        Self(Rc::new(raw))
    }

    /// Creates an element, failing the way `document.createElement` does for
    /// names that are not valid element names.
    pub fn try_element(name: &str) -> Result<Self, NodeError> {
        if !is_valid_name(name) {
            return Err(NodeError::InvalidTagName(name.to_owned()));
        }
        let name = name.to_ascii_lowercase();

        let native = match document() {
            Some(document) => Some(
                document
                    .create_element(intern(&name))
                    .map_err(|err| NodeError::Platform(describe(&err)))?
                    .unchecked_into(),
            ),
            None if is_browser() => {
                return Err(NodeError::Platform("document unavailable".to_owned()));
            }
            None => None,
        };

        let kind = NodeKind::Element {
            name,
            attrs: RefCell::default(),
        };
        Ok(Self::create(kind, native))
    }

    /// # Panics
    ///
    /// Panics with the platform error when the element cannot be created.
    pub fn element(name: &str) -> Self {
        Self::try_element(name).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        let native = document().map(|document| document.create_text_node(&content).unchecked_into());
        Self::create(NodeKind::Text(RefCell::new(content)), native)
    }

    /// Adopts an element that already lives in the document.
    ///
    /// Attribute reads go to the native element, so state set by markup or
    /// other scripts is visible.
    pub fn from_native(element: web_sys::Element) -> Self {
        let kind = NodeKind::Element {
            name: element.tag_name().to_ascii_lowercase(),
            attrs: RefCell::default(),
        };
        Self::create(kind, Some(element.unchecked_into()))
    }

    // Containers //

    pub fn append(&self, child: &Self) {
        self.expect_kind(Expect::Element);

        if let Some(parent) = child.parent() {
            parent.remove(child);
        }

        child.0.parent.replace(Some(Rc::downgrade(&self.0)));
        self.0.children.borrow_mut().push(child.clone());

        if let (Some(native), Some(child_native)) = (&self.0.native, &child.0.native) {
            if let Err(err) = native.append_child(child_native) {
                log::error!("failed to append native node: {}", describe(&err));
            }
        }
    }

    /// Detaches `child`, returning `false` if it is not a child of `self`.
    pub fn remove(&self, child: &Self) -> bool {
        let removed = {
            let mut children = self.0.children.borrow_mut();
            match children.iter().position(|node| node == child) {
                Some(index) => {
                    children.remove(index);
                    true
                }
                None => false,
            }
        };

        if removed {
            child.0.parent.replace(None);

            if let (Some(native), Some(child_native)) = (&self.0.native, &child.0.native) {
                if let Err(err) = native.remove_child(child_native) {
                    log::error!("failed to remove native node: {}", describe(&err));
                }
            }
        }
        removed
    }

    /// Removes every child, including native children this tree never saw.
    pub fn clear(&self) {
        for child in self.0.children.take() {
            child.0.parent.replace(None);
        }

        if let Some(native) = &self.0.native {
            native.set_text_content(None);
        }
    }

    pub fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    pub fn children_ref(&self) -> Ref<Vec<Self>> {
        self.0.children.borrow()
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().as_ref().and_then(Weak::upgrade).map(Self)
    }

    // Text //

    pub fn set_text(&self, value: impl Into<String>) {
        if let NodeKind::Text(content) = &self.0.kind {
            let value = value.into();
            if let Some(native) = &self.0.native {
                native.set_text_content(Some(&value));
            }
            *content.borrow_mut() = value;
        } else {
            self.expect_kind(Expect::Text);
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match &self.0.kind {
            NodeKind::Text(content) => content.borrow().clone(),
            NodeKind::Element { .. } => self
                .0
                .children
                .borrow()
                .iter()
                .map(Self::text_content)
                .collect(),
        }
    }

    // Elements //

    pub fn tag_name(&self) -> Option<&str> {
        match &self.0.kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.0.kind, NodeKind::Element { .. })
    }

    pub fn attr(&self, key: &str) -> Option<String> {
        let attrs = self.attr_cell();
        match self.native_element() {
            Some(element) => element.get_attribute(key),
            None => attrs.borrow().get(key).cloned(),
        }
    }

    pub fn set_attr(&self, key: &str, value: &str) {
        let attrs = self.attr_cell();
        if let Some(element) = self.native_element() {
            if let Err(err) = element.set_attribute(intern(key), value) {
                log::error!("failed to set attribute `{key}`: {}", describe(&err));
            }
        }
        attrs.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    pub fn remove_attr(&self, key: &str) {
        let attrs = self.attr_cell();
        if let Some(element) = self.native_element() {
            if let Err(err) = element.remove_attribute(key) {
                log::error!("failed to remove attribute `{key}`: {}", describe(&err));
            }
        }
        attrs.borrow_mut().shift_remove(key);
    }

    pub fn attrs(&self) -> Vec<(String, String)> {
        self.attr_map()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Sets one inline declaration. `property` is in CSS (kebab-case) form.
    pub fn set_style(&self, property: &str, value: &str) {
        self.expect_kind(Expect::Element);

        if let Some(element) = self.native_element() {
            match element.dyn_ref::<web_sys::HtmlElement>() {
                Some(html) => {
                    if let Err(err) = html.style().set_property(property, value) {
                        log::error!("failed to set style `{property}`: {}", describe(&err));
                    }
                }
                None => log::warn!("inline style ignored on non-HTML element"),
            }
        }

        let mut declarations = parse_style(&self.attr_map().get("style").cloned().unwrap_or_default());
        declarations.insert(property.to_owned(), value.to_owned());
        self.attr_cell()
            .borrow_mut()
            .insert("style".to_owned(), format_style(&declarations));
    }

    pub fn style(&self, property: &str) -> Option<String> {
        parse_style(self.attr_map().get("style")?).shift_remove(property)
    }

    pub fn class_names(&self) -> Vec<String> {
        self.attr("class")
            .map(|classes| classes.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_names().iter().any(|name| name == class)
    }

    pub fn add_class(&self, class: &str) {
        let mut names = self.class_names();
        if !names.iter().any(|name| name == class) {
            names.push(class.to_owned());
            self.set_attr("class", &names.join(" "));
        }
    }

    pub fn remove_class(&self, class: &str) {
        let names = self.class_names();
        if names.iter().any(|name| name == class) {
            let kept = names
                .into_iter()
                .filter(|name| name != class)
                .collect::<Vec<_>>();
            self.set_attr("class", &kept.join(" "));
        }
    }

    pub fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // Events //

    pub fn listen<F>(&self, name: &str, f: F)
    where
        F: FnMut(Event) + 'static,
    {
        self.expect_kind(Expect::Element);

        let handler: Handler = Rc::new(RefCell::new(Box::new(f)));
        let closure = self.0.native.as_ref().map(|native| {
            let handler = handler.clone();
            let closure = EventClosure::new(move |ev: web_sys::Event| {
                call(&handler, Event::from_native(ev));
            });

            if let Err(err) =
                native.add_event_listener_with_callback(intern(name), closure.as_ref().unchecked_ref())
            {
                log::error!("failed to listen for `{name}`: {}", describe(&err));
            }
            closure
        });

        self.0.listeners.borrow_mut().push(Listener {
            name: name.to_owned(),
            handler,
            closure,
        });
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.name == name)
            .count()
    }

    /// Fires a cancelable event named `name` at this node and returns it.
    pub fn dispatch(&self, name: &str) -> Event {
        if let Some(native) = &self.0.native {
            let init = web_sys::EventInit::new();
            init.set_cancelable(true);
            match web_sys::Event::new_with_event_init_dict(name, &init) {
                Ok(event) => {
                    if let Err(err) = native.dispatch_event(&event) {
                        log::error!("failed to dispatch `{name}`: {}", describe(&err));
                    }
                    return Event::from_native(event);
                }
                Err(err) => log::error!("failed to create `{name}` event: {}", describe(&err)),
            }
        }

        let event = Event::synthetic(name);
        let handlers = self
            .0
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.name == name)
            .map(|listener| listener.handler.clone())
            .collect::<Vec<_>>();
        for handler in handlers {
            call(&handler, event.clone());
        }
        event
    }

    // Queries //

    /// This node and all of its descendants, in document order.
    pub fn descendants(&self) -> Vec<Self> {
        let mut out = vec![self.clone()];
        for child in &*self.0.children.borrow() {
            out.extend(child.descendants());
        }
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<Self> {
        self.descendants()
            .into_iter()
            .find(|node| node.is_element() && node.attr("id").as_deref() == Some(id))
    }

    pub fn find_by_class(&self, class: &str) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|node| node.is_element() && node.has_class(class))
            .collect()
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<Self> {
        self.descendants()
            .into_iter()
            .filter(|node| node.tag_name() == Some(tag))
            .collect()
    }

    pub fn native(&self) -> Option<&web_sys::Node> {
        self.0.native.as_ref()
    }

    // Internal //

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    fn native_element(&self) -> Option<&web_sys::Element> {
        self.0.native.as_ref().and_then(|native| native.dyn_ref())
    }

    fn attr_cell(&self) -> &RefCell<IndexMap<String, String>> {
        match &self.0.kind {
            NodeKind::Element { attrs, .. } => attrs,
            NodeKind::Text(_) => self.mismatch("element"),
        }
    }

    fn attr_map(&self) -> Ref<IndexMap<String, String>> {
        self.attr_cell().borrow()
    }

    fn expect_kind(&self, kind: Expect) {
        match (kind, &self.0.kind) {
            (Expect::Element, NodeKind::Element { .. }) | (Expect::Text, NodeKind::Text(_)) => {}
            (Expect::Element, _) => self.mismatch("element"),
            (Expect::Text, _) => self.mismatch("text"),
        }
    }

    fn mismatch(&self, expected: &str) -> ! {
        let found = match &self.0.kind {
            NodeKind::Element { .. } => "element",
            NodeKind::Text(_) => "text",
        };

        panic!("expected {}, found {}", expected, found);
    }
}

impl Drop for RawNode {
    fn drop(&mut self) {
        let Some(native) = &self.native else {
            return;
        };
        for listener in self.listeners.get_mut().drain(..) {
            if let Some(closure) = &listener.closure {
                let _ = native.remove_event_listener_with_callback(
                    &listener.name,
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

impl Eq for Node {}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            NodeKind::Element { name, attrs } => f
                .debug_struct("Element")
                .field("name", name)
                .field("attrs", &*attrs.borrow())
                .field("children", &*self.0.children.borrow())
                .finish(),
            NodeKind::Text(content) => f.debug_tuple("Text").field(&*content.borrow()).finish(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::render(f, render::Mode::empty(), self)
    }
}

#[derive(Clone, Copy)]
enum Expect {
    Element,
    Text,
}

fn call(handler: &Handler, event: Event) {
    match handler.try_borrow_mut() {
        Ok(mut f) => f(event),
        Err(_) => log::warn!("skipped re-entrant `{}` listener", event.name()),
    }
}

/// Mirrors the XML `Name` production that `createElement` enforces.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    let start = |c: char| c.is_alphabetic() || c == '_' || c == ':';
    start(first) && chars.all(|c| start(c) || c.is_alphanumeric() || matches!(c, '-' | '.'))
}

fn parse_style(style: &str) -> IndexMap<String, String> {
    style
        .split(';')
        .filter_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_owned(), value.trim().to_owned()))
        })
        .collect()
}

fn format_style(declarations: &IndexMap<String, String>) -> String {
    declarations
        .iter()
        .map(|(key, value)| format!("{key}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}
