//! Hash based routing.
//!
//! A [`Router`] maps the path held in the navigation fragment (`#/news`) to a
//! page factory from its [`RouteTable`], mounts the page into a single
//! container and restyles the navigation links to match.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    builder::h,
    host::Host,
    node::Node,
    page::{Disposer, Page, PageFactory},
    props::Props,
};

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum RouterError {
    #[error("mount point `#{id}` not found in the document")]
    MissingMountPoint { id: String },
}

/// Path held by a fragment: one leading `#` removed, empty meaning `/`.
pub fn path_from_fragment(fragment: &str) -> String {
    let path = fragment.strip_prefix('#').unwrap_or(fragment);
    if path.is_empty() {
        "/".to_owned()
    } else {
        path.to_owned()
    }
}

/// Route targeted by a link's `href`: everything after its first `#`, or `/`.
pub fn link_path(href: &str) -> String {
    match href.split_once('#') {
        Some((_, fragment)) if !fragment.is_empty() => fragment.to_owned(),
        _ => "/".to_owned(),
    }
}

pub struct RouteTable {
    routes: IndexMap<String, PageFactory>,
    not_found: PageFactory,
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            routes: IndexMap::new(),
            not_found: Rc::new(default_not_found),
        }
    }

    pub fn route<F>(mut self, path: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Page + 'static,
    {
        self.insert(path, factory);
        self
    }

    /// Replaces the built-in fallback page.
    pub fn not_found<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Page + 'static,
    {
        self.not_found = Rc::new(factory);
        self
    }

    pub fn insert<F>(&mut self, path: impl Into<String>, factory: F) -> Option<PageFactory>
    where
        F: Fn() -> Page + 'static,
    {
        self.routes.insert(path.into(), Rc::new(factory))
    }

    pub fn get(&self, path: &str) -> Option<&PageFactory> {
        self.routes.get(path)
    }

    /// The factory for `path`, falling back to the not-found page.
    pub fn resolve(&self, path: &str) -> &PageFactory {
        self.get(path).unwrap_or(&self.not_found)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("paths", &self.paths().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn default_not_found() -> Page {
    h(
        "section",
        Props::new().class("not-found"),
        children![
            h("h1", (), children!["Page not found"]),
            h("a", Props::new().attr("href", "#/"), children!["Back to the home page"]),
        ],
    )
    .into()
}

/// Where the router mounts pages and how it marks the active link.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RouterConfig {
    pub mount_id: String,
    pub link_class: String,
    pub active_classes: Vec<String>,
    pub hover_classes: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mount_id: "app-root".to_owned(),
            link_class: "nav-link".to_owned(),
            active_classes: vec!["text-indigo-600".to_owned(), "font-semibold".to_owned()],
            hover_classes: vec!["hover:text-indigo-600".to_owned()],
        }
    }
}

impl RouterConfig {
    pub fn mount_id(mut self, id: impl Into<String>) -> Self {
        self.mount_id = id.into();
        self
    }

    pub fn link_class(mut self, class: impl Into<String>) -> Self {
        self.link_class = class.into();
        self
    }

    pub fn active_classes<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.active_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn hover_classes<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.hover_classes = classes.into_iter().map(Into::into).collect();
        self
    }
}

struct Mounted {
    path: String,
    root: Node,
    disposer: Disposer,
}

/// Clears a flag when dropped, also while a factory panic unwinds.
struct Reset<'a>(&'a Cell<bool>);

impl Drop for Reset<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct Router<H: Host> {
    host: H,
    routes: RouteTable,
    config: RouterConfig,
    mounted: RefCell<Option<Mounted>>,
    rendering: Cell<bool>,
    rerender: Cell<bool>,
}

impl<H: Host> Router<H> {
    pub fn new(host: H, routes: RouteTable) -> Self {
        Self::with_config(host, routes, RouterConfig::default())
    }

    pub fn with_config(host: H, routes: RouteTable, config: RouterConfig) -> Self {
        Self {
            host,
            routes,
            config,
            mounted: RefCell::new(None),
            rendering: Cell::new(false),
            rerender: Cell::new(false),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn current_path(&self) -> String {
        path_from_fragment(&self.host.fragment())
    }

    pub fn mounted_path(&self) -> Option<String> {
        self.mounted.borrow().as_ref().map(|mounted| mounted.path.clone())
    }

    pub fn mounted_root(&self) -> Option<Node> {
        self.mounted.borrow().as_ref().map(|mounted| mounted.root.clone())
    }

    /// Renders the page for the current fragment.
    ///
    /// When the mount container is missing nothing is rendered and nothing
    /// changes, not even the link styling.
    ///
    /// A call made while a page is being built, for example by a factory that
    /// redirects, is deferred: the outer call renders again once it has
    /// mounted, so the last fragment always wins.
    pub fn navigate(&self) -> Result<(), RouterError> {
        if self.rendering.get() {
            log::trace!("navigation requested while rendering, deferred");
            self.rerender.set(true);
            return Ok(());
        }

        self.rendering.set(true);
        let _rendering = Reset(&self.rendering);
        loop {
            self.rerender.set(false);
            let result = self.render();
            if result.is_err() || !self.rerender.get() {
                break result;
            }
        }
    }

    fn render(&self) -> Result<(), RouterError> {
        let path = self.current_path();

        let container = self.host.element_by_id(&self.config.mount_id).ok_or_else(|| {
            RouterError::MissingMountPoint {
                id: self.config.mount_id.clone(),
            }
        })?;

        if !self.routes.contains(&path) {
            log::debug!("no route for `{path}`, rendering the fallback page");
        }
        let factory = self.routes.resolve(&path).clone();
        let (root, disposer) = factory().into_parts();

        if let Some(previous) = self.mounted.take() {
            log::trace!("disposing `{}`", previous.path);
            previous.disposer.dispose();
        }
        container.clear();
        container.append(&root);

        log::debug!("mounted `{path}`");
        self.highlight(&path);
        self.mounted.replace(Some(Mounted {
            path,
            root,
            disposer,
        }));
        Ok(())
    }

    /// Points the fragment at `path`; the host's navigation event does the
    /// rendering.
    pub fn go(&self, path: &str) {
        self.host.set_fragment(&format!("#{path}"));
    }

    /// Marks the links whose target is `path` active and all others hoverable.
    pub fn highlight(&self, path: &str) {
        for link in self.host.elements_with_class(&self.config.link_class) {
            let target = link
                .attr("href")
                .map_or_else(|| "/".to_owned(), |href| link_path(&href));
            let active = target == path;

            for class in &self.config.active_classes {
                link.toggle_class(class, active);
            }
            for class in &self.config.hover_classes {
                link.toggle_class(class, !active);
            }
        }
    }

    /// Subscribes to document ready and navigation events.
    ///
    /// The subscriptions hold the router weakly; the returned handle keeps
    /// it alive.
    pub fn start(self: &Rc<Self>) -> RouterHandle<H> {
        let mut subscriptions = Disposer::new();

        let router = Rc::downgrade(self);
        subscriptions.merge(self.host.on_ready(Box::new(clone!(router; move || {
            if let Some(router) = router.upgrade() {
                router.handle_navigation();
            }
        }))));
        subscriptions.merge(self.host.on_navigation(Box::new(move || {
            if let Some(router) = router.upgrade() {
                router.handle_navigation();
            }
        })));

        RouterHandle {
            router: self.clone(),
            subscriptions,
        }
    }

    /// Releases the mounted page's resources. Its nodes stay in the document.
    pub fn stop(&self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.disposer.dispose();
        }
    }

    fn handle_navigation(&self) {
        if let Err(err) = self.navigate() {
            log::error!("navigation to `{}` abandoned: {err}", self.current_path());
        }
    }
}

impl<H: Host + fmt::Debug> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("host", &self.host)
            .field("routes", &self.routes)
            .field("config", &self.config)
            .field("mounted", &self.mounted_path())
            .finish_non_exhaustive()
    }
}

/// A started router. Dropping it unsubscribes and disposes the mounted page.
pub struct RouterHandle<H: Host> {
    router: Rc<Router<H>>,
    subscriptions: Disposer,
}

impl<H: Host> RouterHandle<H> {
    pub fn router(&self) -> &Rc<Router<H>> {
        &self.router
    }
}

impl<H: Host> Drop for RouterHandle<H> {
    fn drop(&mut self) {
        std::mem::take(&mut self.subscriptions).dispose();
        self.router.stop();
    }
}
