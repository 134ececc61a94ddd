use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use meridian_core::prelude::*;

use crate::{
    config,
    content::{self, Slide},
};

pub fn home<H: Host>(host: &H) -> Page {
    let (carousel, disposer) = carousel(host, content::SLIDES);

    let root = h(
        "section",
        Props::new().class("page home"),
        children![
            h(
                "div",
                Props::new().class("hero"),
                children![
                    h("h1", (), children![content::TAGLINE]),
                    h("p", (), children![content::INTRO]),
                    h(
                        "a",
                        Props::new().class("button").attr("href", "#/contact"),
                        children!["Start a project"],
                    ),
                ],
            ),
            carousel,
        ],
    );
    Page::with_disposer(root, disposer)
}

struct Carousel {
    slides: Vec<Node>,
    dots: Vec<Node>,
    current: Cell<usize>,
}

impl Carousel {
    fn show(&self, index: usize) {
        let index = index % self.slides.len();
        for (i, slide) in self.slides.iter().enumerate() {
            slide.toggle_class("hidden", i != index);
        }
        for (i, dot) in self.dots.iter().enumerate() {
            dot.toggle_class("active", i == index);
        }
        self.current.set(index);
    }

    fn next(&self) {
        self.show(self.current.get() + 1);
    }

    fn prev(&self) {
        self.show(self.current.get() + self.slides.len() - 1);
    }
}

/// A rotating slide show with previous/next buttons, one dot per slide and
/// autoplay. The returned disposer stops autoplay.
pub fn carousel<H: Host>(host: &H, slides: &[Slide]) -> (Node, Disposer) {
    if slides.is_empty() {
        return (h("div", Props::new().class("carousel"), children![]), Disposer::new());
    }

    let slide_nodes = slides.iter().map(slide).collect::<Vec<_>>();
    let dot_nodes = slides
        .iter()
        .map(|slide| {
            h(
                "button",
                Props::new()
                    .class("dot")
                    .attr("type", "button")
                    .attr("aria-label", slide.title),
                children![],
            )
        })
        .collect::<Vec<_>>();

    let state = Rc::new(Carousel {
        slides: slide_nodes.clone(),
        dots: dot_nodes.clone(),
        current: Cell::new(0),
    });
    state.show(0);

    // listeners hold the state weakly, the page disposer owns it
    let weak = Rc::downgrade(&state);
    for (index, dot) in dot_nodes.iter().enumerate() {
        dot.listen(
            "click",
            clone!(weak; move |_| with(&weak, |carousel| carousel.show(index))),
        );
    }

    let root = h(
        "div",
        Props::new().class("carousel"),
        children![
            h("div", Props::new().class("slides"), slide_nodes),
            h(
                "button",
                Props::new()
                    .class("prev")
                    .attr("type", "button")
                    .on("onClick", clone!(weak; move |_| with(&weak, Carousel::prev))),
                children!["‹"],
            ),
            h(
                "button",
                Props::new()
                    .class("next")
                    .attr("type", "button")
                    .on("onClick", clone!(weak; move |_| with(&weak, Carousel::next))),
                children!["›"],
            ),
            h("div", Props::new().class("dots"), dot_nodes),
        ],
    );

    let mut disposer = host.interval(
        config::AUTOPLAY_MS,
        Box::new(move || with(&weak, Carousel::next)),
    );
    disposer.hold(state);

    (root, disposer)
}

fn slide(slide: &Slide) -> Node {
    h(
        "figure",
        Props::new().class("slide"),
        children![
            h(
                "img",
                Props::new().attr("src", slide.image).attr("alt", slide.title),
                children![],
            ),
            h(
                "figcaption",
                (),
                children![
                    h("h2", (), children![slide.title]),
                    h("p", (), children![slide.caption]),
                ],
            ),
        ],
    )
}

fn with(weak: &Weak<Carousel>, f: impl FnOnce(&Carousel)) {
    if let Some(carousel) = weak.upgrade() {
        f(&carousel);
    }
}

#[cfg(test)]
mod tests {
    use meridian_core::host::MemoryHost;

    use super::*;

    fn visible(root: &Node) -> Vec<String> {
        root.find_by_class("slide")
            .iter()
            .filter(|slide| !slide.has_class("hidden"))
            .map(|slide| slide.find_by_tag("h2")[0].text_content())
            .collect()
    }

    fn button(root: &Node, class: &str) -> Node {
        root.find_by_class(class).remove(0)
    }

    #[test]
    fn buttons_and_dots_move_between_slides() {
        let host = MemoryHost::loaded();
        let (root, _disposer) = carousel(&host, content::SLIDES);
        assert_eq!(visible(&root), vec!["Strategy"]);

        button(&root, "next").dispatch("click");
        assert_eq!(visible(&root), vec!["Design"]);

        button(&root, "prev").dispatch("click");
        button(&root, "prev").dispatch("click");
        assert_eq!(visible(&root), vec!["Engineering"]);

        let dots = root.find_by_class("dot");
        dots[1].dispatch("click");
        assert_eq!(visible(&root), vec!["Design"]);
        assert!(dots[1].has_class("active"));
        assert!(!dots[2].has_class("active"));
    }

    #[test]
    fn autoplay_runs_until_disposed() {
        let host = MemoryHost::loaded();
        let (root, disposer) = carousel(&host, content::SLIDES);

        host.advance(u64::from(config::AUTOPLAY_MS) * 2);
        assert_eq!(visible(&root), vec!["Engineering"]);

        disposer.dispose();
        assert_eq!(host.active_timers(), 0);

        host.advance(u64::from(config::AUTOPLAY_MS));
        assert_eq!(visible(&root), vec!["Engineering"]);
        button(&root, "next").dispatch("click");
        assert_eq!(visible(&root), vec!["Engineering"]);
    }

    #[test]
    fn empty_carousel_has_no_timer() {
        let host = MemoryHost::loaded();
        let (root, disposer) = carousel(&host, &[]);

        assert!(root.children().is_empty());
        assert!(disposer.is_empty());
        assert_eq!(host.active_timers(), 0);
    }

    #[test]
    fn home_page_owns_the_carousel_timer() {
        let host = MemoryHost::loaded();
        let page = home(&host);

        assert!(page.root().has_class("home"));
        assert_eq!(page.root().find_by_class("carousel").len(), 1);
        assert_eq!(host.active_timers(), 1);

        drop(page);
        assert_eq!(host.active_timers(), 0);
    }
}
