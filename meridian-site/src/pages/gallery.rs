use meridian_core::prelude::*;

use crate::content::{self, Photo};

/// A photo grid. Clicking a photo opens it in a lightbox overlay.
pub fn gallery() -> Page {
    let overlay = NodeRef::new();
    let image = NodeRef::new();
    let caption = NodeRef::new();

    let lightbox = h(
        "div",
        Props::new()
            .node_ref(&overlay)
            .class("lightbox hidden")
            .attr("role", "dialog")
            .on("onClick", clone!(overlay; move |_| close(&overlay))),
        children![
            h(
                "img",
                Props::new().node_ref(&image).attr("src", "").attr("alt", ""),
                children![],
            ),
            h("p", Props::new().node_ref(&caption).class("caption"), children![]),
            h(
                "button",
                Props::new()
                    .class("close")
                    .attr("type", "button")
                    .attr("aria-label", "Close")
                    .on("onClick", clone!(overlay; move |_| close(&overlay))),
                children!["×"],
            ),
        ],
    );

    let grid = content::PHOTOS
        .iter()
        .map(|photo| thumbnail(photo, &overlay, &image, &caption))
        .collect::<Vec<_>>();

    let root = h(
        "section",
        Props::new().class("page gallery"),
        children![
            h("h1", (), children!["Gallery"]),
            h("div", Props::new().class("grid"), grid),
            lightbox,
        ],
    );

    // the overlay's own listeners reach it through these refs
    Page::new(root).on_dispose(move || {
        for node_ref in [overlay, image, caption] {
            node_ref.take();
        }
    })
}

fn thumbnail(photo: &'static Photo, overlay: &NodeRef, image: &NodeRef, caption: &NodeRef) -> Node {
    let (overlay, image, caption) = (overlay.clone(), image.clone(), caption.clone());
    let open = move |_: Event| {
        let (Some(overlay), Some(image), Some(caption)) =
            (overlay.try_get(), image.try_get(), caption.try_get())
        else {
            return;
        };
        image.set_attr("src", photo.src);
        image.set_attr("alt", photo.alt);
        caption.clear();
        caption.append(&Node::text(photo.alt));
        overlay.remove_class("hidden");
    };

    h(
        "figure",
        Props::new().class("thumbnail"),
        children![h(
            "img",
            Props::new()
                .attr("src", photo.src)
                .attr("alt", photo.alt)
                .attr("loading", "lazy")
                .on("onClick", open),
            children![],
        )],
    )
}

fn close(overlay: &NodeRef) {
    overlay.with(|overlay| overlay.add_class("hidden"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_a_photo_opens_the_lightbox() {
        let page = gallery();
        let root = page.root().clone();
        let lightbox = root.find_by_class("lightbox").remove(0);
        assert!(lightbox.has_class("hidden"));

        let thumbs = root.find_by_class("thumbnail");
        assert_eq!(thumbs.len(), content::PHOTOS.len());
        thumbs[2].children()[0].dispatch("click");

        assert!(!lightbox.has_class("hidden"));
        let image = lightbox.find_by_tag("img").remove(0);
        assert_eq!(image.attr("src").as_deref(), Some("img/gallery/sketches.jpg"));
        assert_eq!(
            lightbox.find_by_class("caption")[0].text_content(),
            "Wireframe sketches on the wall"
        );

        lightbox.find_by_class("close")[0].dispatch("click");
        assert!(lightbox.has_class("hidden"));
    }

    #[test]
    fn disposed_gallery_ignores_clicks() {
        let page = gallery();
        let (root, disposer) = page.into_parts();
        disposer.dispose();

        root.find_by_class("thumbnail")[0].children()[0].dispatch("click");
        assert!(root.find_by_class("lightbox")[0].has_class("hidden"));
    }
}
