use meridian_core::prelude::*;

use crate::content;

pub fn about() -> Page {
    let values = content::VALUES
        .iter()
        .map(|(name, text)| {
            h(
                "li",
                (),
                children![h("strong", (), children![*name]), " ", *text],
            )
        })
        .collect::<Vec<_>>();

    let team = content::TEAM
        .iter()
        .map(|member| {
            h(
                "li",
                Props::new().class("member"),
                children![
                    h("h3", (), children![member.name]),
                    h("p", (), children![member.role]),
                ],
            )
        })
        .collect::<Vec<_>>();

    h(
        "section",
        Props::new().class("page about"),
        children![
            h("h1", (), children!["About us"]),
            h("p", Props::new().class("lead"), children![content::MISSION]),
            h("h2", (), children!["What we value"]),
            h("ul", Props::new().class("values"), values),
            h("h2", (), children!["The team"]),
            h("ul", Props::new().class("team"), team),
        ],
    )
    .into()
}
