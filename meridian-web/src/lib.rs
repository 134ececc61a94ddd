//! Browser backend for meridian.
//!
//! [`WebHost`] drives a router from the live document: the location hash,
//! `hashchange` and `DOMContentLoaded` events, and `setInterval` timers.

#![warn(clippy::use_self)]

mod host;
mod logger;

use std::{mem, rc::Rc};

use meridian_core::router::{RouteTable, Router, RouterConfig};

pub use host::WebHost;
pub use logger::{init_logging, ConsoleLogger};

/// Starts a router on `host` and keeps it running for the life of the page.
pub fn run(host: WebHost, routes: RouteTable, config: RouterConfig) -> Rc<Router<WebHost>> {
    let router = Rc::new(Router::with_config(host, routes, config));
    mem::forget(router.start());
    router
}

#[cfg(all(test, target_family = "wasm"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg(all(test, target_family = "wasm"))]
mod tests {
    use std::cell::Cell;

    use gloo_timers::future::TimeoutFuture;
    use meridian_core::{host::Host, prelude::*};
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    fn host() -> WebHost {
        WebHost::new().expect("tests run in a browser")
    }

    fn attach(host: &WebHost, node: &Node) {
        let body = host.document().body().expect("document has a body");
        let body = Node::from_native(body.into());
        body.append(node);
    }

    #[wasm_bindgen_test]
    fn fragment_round_trip() {
        let host = host();
        host.set_fragment("#/news");
        assert_eq!(host.fragment(), "#/news");
    }

    #[wasm_bindgen_test]
    fn queries_see_built_nodes() {
        let host = host();
        let link = h(
            "a",
            Props::new().class("web-test-link").attr("href", "#/gallery"),
            children!["Gallery"],
        );
        let root = h("div", Props::new().attr("id", "web-test-root"), children![&link]);
        attach(&host, &root);

        let found = host.element_by_id("web-test-root").unwrap();
        assert_eq!(found.tag_name(), Some("div"));

        let links = host.elements_with_class("web-test-link");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attr("href").as_deref(), Some("#/gallery"));

        links[0].add_class("active");
        assert!(link.has_class("active"));
    }

    #[wasm_bindgen_test]
    fn ready_fires_for_a_loaded_document() {
        let host = host();
        let ran = Rc::new(Cell::new(false));
        let _ready = host.on_ready(Box::new(clone!(ran; move || ran.set(true))));
        assert!(ran.get());
    }

    #[wasm_bindgen_test]
    fn ready_waits_for_content_loaded_while_loading() {
        let host = host();
        assert!(host.is_ready());
        let ran = Rc::new(Cell::new(0));
        let loaded = || web_sys::Event::new("DOMContentLoaded").unwrap();

        let ready = crate::host::when_ready(
            host.document(),
            false,
            Box::new(clone!(ran; move || ran.set(ran.get() + 1))),
        );
        assert_eq!(ran.get(), 0);

        host.document().dispatch_event(&loaded()).unwrap();
        assert_eq!(ran.get(), 1);
        host.document().dispatch_event(&loaded()).unwrap();
        assert_eq!(ran.get(), 1);

        let late = crate::host::when_ready(
            host.document(),
            false,
            Box::new(clone!(ran; move || ran.set(ran.get() + 1))),
        );
        late.dispose();
        host.document().dispatch_event(&loaded()).unwrap();
        assert_eq!(ran.get(), 1);
        drop(ready);
    }

    #[wasm_bindgen_test]
    async fn intervals_stop_when_disposed() {
        let host = host();
        let ticks = Rc::new(Cell::new(0));
        let timer = host.interval(10, Box::new(clone!(ticks; move || ticks.set(ticks.get() + 1))));

        TimeoutFuture::new(55).await;
        timer.dispose();
        let seen = ticks.get();
        assert!(seen >= 1);

        TimeoutFuture::new(40).await;
        assert_eq!(ticks.get(), seen);
    }

    #[wasm_bindgen_test]
    fn router_mounts_into_the_document() {
        let host = host();
        let main = h("main", Props::new().attr("id", "web-test-mount"), children![]);
        attach(&host, &main);

        let routes = RouteTable::new().route("/", || Page::from(h("p", (), children!["home"])));
        let config = RouterConfig::default().mount_id("web-test-mount");
        host.set_fragment("");
        let router = Router::with_config(host.clone(), routes, config);
        router.navigate().unwrap();

        let native = host.document().get_element_by_id("web-test-mount").unwrap();
        assert_eq!(native.inner_html(), "<p>home</p>");
    }
}
