use meridian_core::prelude::*;

pub fn not_found() -> Page {
    h(
        "section",
        Props::new().class("page not-found"),
        children![
            h("h1", (), children!["404"]),
            h("p", (), children!["That page does not exist, or it moved."]),
            h(
                "a",
                Props::new().class("button").attr("href", "#/"),
                children!["Go home"],
            ),
        ],
    )
    .into()
}

#[cfg(test)]
mod tests {
    use meridian_core::router::link_path;

    use super::*;

    #[test]
    fn links_back_home() {
        let page = not_found();
        let root = page.root();
        assert_eq!(root.class_names(), vec!["page", "not-found"]);

        let links = root.find_by_tag("a");
        assert_eq!(links.len(), 1);
        let href = links[0].attr("href").unwrap_or_default();
        assert_eq!(link_path(&href), "/");
    }
}
