//! The element builder.
//!
//! [`h`] turns a tag, a property bag and a list of children straight into a
//! live [`Node`] tree. Nothing is retained between calls: attributes are set,
//! listeners bound and reference callbacks run before `h` returns.

use std::{borrow::Cow, fmt};

use crate::{
    node::{Node, NodeError},
    props::Props,
};

pub type Component = Box<dyn FnOnce(ComponentProps) -> Node>;

pub enum Tag {
    Element(Cow<'static, str>),
    /// Anything callable that turns its properties and children into a node.
    Component(Component),
}

impl Tag {
    pub fn component<F>(f: F) -> Self
    where
        F: FnOnce(ComponentProps) -> Node + 'static,
    {
        Self::Component(Box::new(f))
    }
}

impl From<&'static str> for Tag {
    fn from(value: &'static str) -> Self {
        Self::Element(Cow::Borrowed(value))
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self::Element(Cow::Owned(value))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(name) => f.debug_tuple("Element").field(name).finish(),
            Self::Component(_) => f.write_str("Component(..)"),
        }
    }
}

/// What a component receives: the caller's property bag and its children,
/// exactly as passed.
#[derive(Debug, Default)]
pub struct ComponentProps {
    pub props: Props,
    pub children: Vec<Child>,
}

impl ComponentProps {
    pub fn into_parts(self) -> (Props, Vec<Child>) {
        (self.props, self.children)
    }
}

#[derive(Debug)]
pub enum Child {
    Node(Node),
    Text(String),
    Empty,
    List(Vec<Child>),
}

impl From<Node> for Child {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<&Node> for Child {
    fn from(value: &Node) -> Self {
        Self::Node(value.clone())
    }
}

impl From<&str> for Child {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Child {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Child {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<'a> From<Cow<'a, str>> for Child {
    fn from(value: Cow<'a, str>) -> Self {
        Self::Text(value.into_owned())
    }
}

impl From<()> for Child {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl<T: Into<Self>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Child {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

macro_rules! child_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Child {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

child_from_display!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Builds a node, propagating the platform error for an invalid tag name.
pub fn try_h<T, P, C>(tag: T, props: P, children: C) -> Result<Node, NodeError>
where
    T: Into<Tag>,
    P: Into<Props>,
    C: IntoIterator,
    C::Item: Into<Child>,
{
    let props = props.into();
    let children = children.into_iter().map(Into::into).collect::<Vec<_>>();

    match tag.into() {
        Tag::Component(component) => Ok(component(ComponentProps { props, children })),
        Tag::Element(name) => {
            let node = Node::try_element(&name)?;
            for prop in props {
                prop.apply(&node);
            }
            append_children(&node, children);
            Ok(node)
        }
    }
}

/// Builds a node.
///
/// # Panics
///
/// Panics with the platform error when `tag` names an invalid element.
pub fn h<T, P, C>(tag: T, props: P, children: C) -> Node
where
    T: Into<Tag>,
    P: Into<Props>,
    C: IntoIterator,
    C::Item: Into<Child>,
{
    try_h(tag, props, children).unwrap_or_else(|err| panic!("{err}"))
}

/// Flattens `children` by exactly one level.
pub fn flatten(children: Vec<Child>) -> Vec<Child> {
    children
        .into_iter()
        .flat_map(|child| match child {
            Child::List(items) => items,
            other => vec![other],
        })
        .collect()
}

pub fn append_children(node: &Node, children: Vec<Child>) {
    for child in flatten(children) {
        match child {
            Child::Node(child) => node.append(&child),
            Child::Text(text) => node.append(&Node::text(text)),
            Child::Empty => {}
            Child::List(items) => {
                log::warn!(
                    "dropped a list of {} children nested more than one level deep",
                    items.len()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{node_ref::NodeRef, props::StyleMap};

    fn texts(node: &Node) -> Vec<String> {
        node.children().iter().map(Node::text_content).collect()
    }

    #[test]
    fn element_with_every_prop_kind() {
        let captured = NodeRef::new();
        let refs = Rc::new(Cell::new(0));
        let clicks = Rc::new(Cell::new(0));

        let button = h(
            "button",
            Props::new()
                .node_ref(&captured)
                .reference(clone!(refs; move |_| refs.set(refs.get() + 1)))
                .on("onClick", clone!(clicks; move |_| clicks.set(clicks.get() + 1)))
                .class("btn btn-primary")
                .style(StyleMap::new().set("backgroundColor", "teal"))
                .flag("disabled", true)
                .flag("hidden", false)
                .attr("type", "submit")
                .attr("tabindex", 2),
            children!["Send"],
        );

        assert_eq!(captured.get(), button);
        assert_eq!(refs.get(), 1);
        assert_eq!(button.attr("class").as_deref(), Some("btn btn-primary"));
        assert_eq!(button.style("background-color").as_deref(), Some("teal"));
        assert_eq!(button.attr("disabled").as_deref(), Some(""));
        assert_eq!(button.attr("hidden"), None);
        assert_eq!(button.attr("type").as_deref(), Some("submit"));
        assert_eq!(button.attr("tabindex").as_deref(), Some("2"));

        button.dispatch("click");
        assert_eq!(clicks.get(), 1);
        assert_eq!(button.listener_count("click"), 1);
    }

    #[test]
    fn children_are_flattened_one_level_and_filtered() {
        let em = h("em", (), children!["b"]);
        let list = h(
            "p",
            (),
            children![
                "a",
                &em,
                None::<&str>,
                3,
                vec![Child::from("c"), Child::Empty, Child::from(4.5)],
                (),
                Some("d"),
            ],
        );

        assert_eq!(texts(&list), vec!["a", "b", "3", "c", "4.5", "d"]);
        assert_eq!(list.children()[1], em);
        assert_eq!(list.children().len(), 6);
    }

    #[test]
    fn deeper_lists_are_dropped() {
        let nested = Child::List(vec![Child::from("x")]);
        let node = h("div", (), vec![Child::List(vec![nested]), Child::from("y")]);

        assert_eq!(texts(&node), vec!["y"]);
    }

    #[test]
    fn component_receives_props_and_children() {
        let card = Tag::component(|ComponentProps { mut props, children }| {
            let class = props.take_class().unwrap_or_default();
            let title = props.text("title").unwrap_or("untitled").to_owned();
            assert_eq!(children.len(), 2);

            let mut items = children![h("h2", (), children![title])];
            items.extend(children);
            h("article", Props::new().class(format!("card {class}")), items)
        });

        let node = h(
            card,
            Props::new().class("wide").attr("title", "News"),
            children!["one", vec!["two", "three"]],
        );

        assert_eq!(node.tag_name(), Some("article"));
        assert_eq!(node.attr("class").as_deref(), Some("card wide"));
        assert_eq!(node.text_content(), "Newsonetwothree");
    }

    #[test]
    fn component_result_is_returned_untouched() {
        let target = Node::element("aside");
        let same = target.clone();
        let node = h(
            Tag::component(move |_| same),
            Props::new().class("ignored"),
            children!["ignored"],
        );

        assert_eq!(node, target);
        assert_eq!(node.attr("class"), None);
        assert!(node.children().is_empty());
    }

    #[test]
    fn invalid_tag_is_an_error() {
        let err = try_h("bad tag", (), children![]).unwrap_err();
        assert_eq!(err, NodeError::InvalidTagName("bad tag".into()));
    }

    #[test]
    #[should_panic(expected = "invalid tag name")]
    fn invalid_tag_panics_through_h() {
        h("", (), children![]);
    }

    #[test]
    fn arrays_of_one_kind_work_without_the_macro() {
        let node = h(String::from("ul"), None::<Props>, ["x", "y"]);
        assert_eq!(texts(&node), vec!["x", "y"]);
    }
}
