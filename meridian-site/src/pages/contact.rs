use meridian_core::prelude::*;

use crate::content;

pub fn contact() -> Page {
    let panel = NodeRef::new();

    let form = h(
        "form",
        Props::new()
            .class("contact-form")
            .on("onSubmit", clone!(panel; move |ev: Event| {
                ev.prevent_default();
                panel.with(|panel| {
                    panel.clear();
                    panel.append(&confirmation());
                });
            })),
        children![
            field("name", "Name", "text"),
            field("email", "Email", "email"),
            h(
                "label",
                Props::new().attr("for", "contact-message"),
                children!["Message"],
            ),
            h(
                "textarea",
                Props::new()
                    .attr("id", "contact-message")
                    .attr("name", "message")
                    .attr("rows", 5)
                    .flag("required", true),
                children![],
            ),
            h(
                "button",
                Props::new().class("button").attr("type", "submit"),
                children!["Send message"],
            ),
        ],
    );

    let root = h(
        "section",
        Props::new().class("page contact"),
        children![
            h("h1", (), children!["Contact"]),
            h(
                "address",
                (),
                children![
                    h(
                        "a",
                        Props::new().attr("href", format!("mailto:{}", content::CONTACT_EMAIL)),
                        children![content::CONTACT_EMAIL],
                    ),
                    h("p", (), children![content::CONTACT_ADDRESS]),
                ],
            ),
            h(
                "div",
                Props::new().node_ref(&panel).class("contact-panel"),
                children![form],
            ),
        ],
    );

    Page::new(root).on_dispose(move || {
        panel.take();
    })
}

fn field(name: &str, label: &str, kind: &str) -> Node {
    let id = format!("contact-{name}");
    h(
        "p",
        Props::new().class("field"),
        children![
            h("label", Props::new().attr("for", &id), children![label]),
            h(
                "input",
                Props::new()
                    .attr("id", &id)
                    .attr("name", name)
                    .attr("type", kind)
                    .flag("required", true),
                children![],
            ),
        ],
    )
}

fn confirmation() -> Node {
    h(
        "div",
        Props::new().class("confirmation").attr("role", "status"),
        children![
            h("h2", (), children!["Thank you!"]),
            h("p", (), children!["We read every message and reply within two working days."]),
        ],
    )
}
