use meridian_core::prelude::*;

use crate::{config, content};

pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const LINKS: &[NavLink] = &[
    NavLink {
        label: "Home",
        href: "#/",
    },
    NavLink {
        label: "About us",
        href: "#/about-us",
    },
    NavLink {
        label: "News",
        href: "#/news",
    },
    NavLink {
        label: "Gallery",
        href: "#/gallery",
    },
    NavLink {
        label: "Contact",
        href: "#/contact",
    },
];

/// The site header: brand mark plus one highlighted link per page.
pub fn header() -> Node {
    let items = LINKS
        .iter()
        .map(|link| h("li", (), children![nav_link(link)]))
        .collect::<Vec<_>>();

    h(
        "nav",
        Props::new().class("site-nav"),
        children![
            h(
                "a",
                Props::new().class("brand").attr("href", "#/"),
                children![content::SITE_NAME],
            ),
            h("ul", (), items),
        ],
    )
}

fn nav_link(link: &NavLink) -> Node {
    h(
        "a",
        Props::new()
            .class(format!("{} {}", config::LINK_CLASS, config::HOVER_CLASSES.join(" ")))
            .attr("href", link.href),
        children![link.label],
    )
}
