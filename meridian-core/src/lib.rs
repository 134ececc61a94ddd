#![warn(clippy::use_self)]

#[macro_use]
mod macros;

pub mod builder;
pub mod env;
pub mod events;
pub mod host;
pub mod node;
pub mod page;
pub mod props;
pub mod router;

mod node_ref;

pub use node::Node;
pub use node_ref::NodeRef;

pub mod prelude {
    pub use crate::{
        builder::{h, try_h, Child, ComponentProps, Tag},
        children, clone,
        events::Event,
        host::Host,
        node::{Node, NodeError},
        page::{Disposer, Page, PageFactory},
        props::{AttrValue, Prop, Props, StyleMap},
        router::{RouteTable, Router, RouterConfig, RouterError, RouterHandle},
        NodeRef,
    };
}
