use std::{borrow::Cow, fmt};

use convert_case::{Case, Casing};
use indexmap::IndexMap;

use crate::{
    events::{event_name, Event},
    node::Node,
    node_ref::NodeRef,
};

pub type EventHandler = Box<dyn FnMut(Event)>;
pub type RefCallback = Box<dyn FnOnce(&Node)>;

/// One entry of a property bag, applied to a freshly created element.
pub enum Prop {
    /// Invoked once with the new element; never becomes an attribute.
    Reference(RefCallback),
    Event {
        name: String,
        handler: EventHandler,
    },
    /// Written verbatim to the `class` attribute.
    ClassName(String),
    Style(StyleMap),
    Attribute {
        name: String,
        value: AttrValue,
    },
}

impl Prop {
    pub fn apply(self, node: &Node) {
        match self {
            Self::Reference(f) => f(node),
            Self::Event { name, handler } => node.listen(&name, handler),
            Self::ClassName(class) => node.set_attr("class", &class),
            Self::Style(style) => {
                for (property, value) in style.iter() {
                    node.set_style(property, value);
                }
            }
            Self::Attribute { name, value } => match value {
                AttrValue::Text(text) => node.set_attr(&name, &text),
                AttrValue::Flag(true) => node.set_attr(&name, ""),
                AttrValue::Flag(false) | AttrValue::Absent => {}
            },
        }
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(_) => f.write_str("Reference(..)"),
            Self::Event { name, .. } => f.debug_struct("Event").field("name", name).finish(),
            Self::ClassName(class) => f.debug_tuple("ClassName").field(class).finish(),
            Self::Style(style) => f.debug_tuple("Style").field(style).finish(),
            Self::Attribute { name, value } => f
                .debug_struct("Attribute")
                .field("name", name)
                .field("value", value)
                .finish(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AttrValue {
    Text(String),
    /// `true` sets a present-but-empty attribute, `false` sets nothing.
    Flag(bool),
    Absent,
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Flag(true))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<'a> From<Cow<'a, str>> for AttrValue {
    fn from(value: Cow<'a, str>) -> Self {
        Self::Text(value.into_owned())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<char> for AttrValue {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

macro_rules! attr_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

attr_from_display!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Inline style declarations, in insertion order.
///
/// Keys are stored in CSS (kebab-case) form: `backgroundColor` becomes
/// `background-color` and `WebkitTransform` becomes `-webkit-transform`.
/// Custom properties (`--accent`) are kept as written.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct StyleMap(IndexMap<String, String>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: &str, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: &str, value: impl Into<String>) -> Option<String> {
        self.0.insert(css_property(property), value.into())
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(&css_property(property)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StyleMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), |style, (key, value)| {
            style.set(key.as_ref(), value)
        })
    }
}

impl<K, V, const LEN: usize> From<[(K, V); LEN]> for StyleMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from(value: [(K, V); LEN]) -> Self {
        value.into_iter().collect()
    }
}

fn css_property(key: &str) -> String {
    if key.starts_with("--") || !key.contains(|c: char| c.is_ascii_uppercase()) {
        key.to_owned()
    } else if key.starts_with(|c: char| c.is_ascii_uppercase()) {
        format!("-{}", key.to_case(Case::Kebab))
    } else {
        key.to_case(Case::Kebab)
    }
}

/// A property bag: the typed entries applied to one element, in order.
pub struct Props(Vec<Prop>);

impl Props {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, prop: Prop) {
        self.0.push(prop);
    }

    pub fn with(mut self, prop: Prop) -> Self {
        self.push(prop);
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.with(Prop::ClassName(class.into()))
    }

    pub fn style(self, style: impl Into<StyleMap>) -> Self {
        self.with(Prop::Style(style.into()))
    }

    pub fn attr(self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.with(Prop::Attribute {
            name: name.into(),
            value: value.into(),
        })
    }

    pub fn flag(self, name: impl Into<String>, value: bool) -> Self {
        self.attr(name, value)
    }

    /// Registers a listener. See [`event_name`] for how `key` maps to the event.
    pub fn on<F>(self, key: &str, handler: F) -> Self
    where
        F: FnMut(Event) + 'static,
    {
        self.on_event(event_name(key), handler)
    }

    /// Registers a listener for the event called exactly `name`.
    pub fn on_event<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(Event) + 'static,
    {
        self.with(Prop::Event {
            name: name.into(),
            handler: Box::new(handler),
        })
    }

    pub fn reference<F>(self, f: F) -> Self
    where
        F: FnOnce(&Node) + 'static,
    {
        self.with(Prop::Reference(Box::new(f)))
    }

    pub fn node_ref(self, node_ref: &NodeRef) -> Self {
        let node_ref = node_ref.clone();
        self.reference(move |node| {
            node_ref.set(node.clone());
        })
    }

    /// The value of the last `Attribute` entry called `name`.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.iter().rev().find_map(|prop| match prop {
            Prop::Attribute { name: key, value } if key == name => Some(value),
            _ => None,
        })
    }

    /// Text of the attribute `name`; `class` also answers for a `ClassName` entry.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.iter().rev().find_map(|prop| match prop {
            Prop::Attribute { name: key, value } if key == name => value.as_text(),
            Prop::ClassName(class) if name == "class" => Some(class.as_str()),
            _ => None,
        })
    }

    /// Removes every `ClassName` entry, returning the last one.
    pub fn take_class(&mut self) -> Option<String> {
        let mut class = None;
        self.0.retain_mut(|prop| match prop {
            Prop::ClassName(value) => {
                class = Some(std::mem::take(value));
                false
            }
            _ => true,
        });
        class
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prop> {
        self.0.iter()
    }
}

impl Default for Props {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl From<()> for Props {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<Option<Self>> for Props {
    fn from(value: Option<Self>) -> Self {
        value.unwrap_or_default()
    }
}

impl From<Vec<Prop>> for Props {
    fn from(value: Vec<Prop>) -> Self {
        Self(value)
    }
}

impl Extend<Prop> for Props {
    fn extend<T: IntoIterator<Item = Prop>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Props {
    type Item = Prop;
    type IntoIter = std::vec::IntoIter<Prop>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn style_keys_are_normalized() {
        let style = StyleMap::from([
            ("backgroundColor", "navy"),
            ("margin-top", "4px"),
            ("--accent", "gold"),
            ("WebkitTransform", "none"),
        ]);

        let keys = style.iter().map(|(key, _)| key).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec!["background-color", "margin-top", "--accent", "-webkit-transform"]
        );
        assert_eq!(style.get("backgroundColor"), Some("navy"));
    }

    #[test]
    fn attribute_values_convert() {
        assert_eq!(AttrValue::from(3), AttrValue::Text("3".into()));
        assert_eq!(AttrValue::from(1.5), AttrValue::Text("1.5".into()));
        assert_eq!(AttrValue::from(None::<&str>), AttrValue::Absent);
        assert_eq!(AttrValue::from(Some(true)), AttrValue::Flag(true));
        assert!(!AttrValue::Flag(false).is_set());
    }

    #[test]
    fn each_variant_applies_once() {
        let node = Node::element("input");
        let refs = Rc::new(Cell::new(0));
        let clicks = Rc::new(Cell::new(0));

        let props = Props::new()
            .reference(clone!(refs; move |_| refs.set(refs.get() + 1)))
            .on("onClick", clone!(clicks; move |_| clicks.set(clicks.get() + 1)))
            .class("field wide")
            .style([("fontSize", "12px")])
            .flag("disabled", true)
            .flag("hidden", false)
            .attr("placeholder", "Name")
            .attr("title", None::<String>);

        for prop in props {
            prop.apply(&node);
        }

        assert_eq!(refs.get(), 1);
        assert_eq!(node.attr("class").as_deref(), Some("field wide"));
        assert_eq!(node.style("font-size").as_deref(), Some("12px"));
        assert_eq!(node.attr("disabled").as_deref(), Some(""));
        assert_eq!(node.attr("hidden"), None);
        assert_eq!(node.attr("placeholder").as_deref(), Some("Name"));
        assert_eq!(node.attr("title"), None);
        assert_eq!(node.attr("ref"), None);
        assert_eq!(node.listener_count("click"), 1);

        node.dispatch("click");
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn lowercase_and_bare_event_keys() {
        let node = Node::element("button");
        let hits = Rc::new(Cell::new(0));

        let props = Props::new()
            .on("onclick", clone!(hits; move |_| hits.set(hits.get() + 1)))
            .on_event("online", clone!(hits; move |_| hits.set(hits.get() + 10)));
        for prop in props {
            prop.apply(&node);
        }

        assert_eq!(node.listener_count("click"), 1);
        assert_eq!(node.listener_count("onclick"), 0);
        assert_eq!(node.listener_count("online"), 1);

        node.dispatch("click");
        assert_eq!(hits.get(), 1);
        node.dispatch("online");
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn lookups_and_class_extraction() {
        let mut props = Props::new()
            .class("card")
            .attr("title", "First")
            .attr("title", "Second");

        assert_eq!(props.text("title"), Some("Second"));
        assert_eq!(props.text("class"), Some("card"));
        assert_eq!(props.take_class().as_deref(), Some("card"));
        assert_eq!(props.text("class"), None);
        assert_eq!(props.len(), 2);
    }
}
