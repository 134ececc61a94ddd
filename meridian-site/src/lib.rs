//! The Meridian marketing site.

#![warn(clippy::use_self)]

pub mod config;
pub mod content;
pub mod nav;
pub mod pages;

use meridian_core::{host::Host, router::RouteTable};

pub use config::router_config;

/// Every page of the site, keyed by the path its nav link points at.
pub fn routes<H: Host>(host: &H) -> RouteTable {
    let host = host.clone();
    RouteTable::new()
        .route("/", move || pages::home(&host))
        .route("/about-us", pages::about)
        .route("/news", pages::news)
        .route("/gallery", pages::gallery)
        .route("/contact", pages::contact)
        .not_found(pages::not_found)
}
