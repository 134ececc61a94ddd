use meridian_core::router::RouterConfig;

pub const MOUNT_ID: &str = "app-root";
pub const HEADER_ID: &str = "site-header";
pub const LINK_CLASS: &str = "nav-link";
pub const ACTIVE_CLASSES: &[&str] = &["text-indigo-600", "font-semibold"];
pub const HOVER_CLASSES: &[&str] = &["hover:text-indigo-600"];

pub const AUTOPLAY_MS: u32 = 5000;

pub fn router_config() -> RouterConfig {
    RouterConfig::default()
        .mount_id(MOUNT_ID)
        .link_class(LINK_CLASS)
        .active_classes(ACTIVE_CLASSES.iter().copied())
        .hover_classes(HOVER_CLASSES.iter().copied())
}
