//! Page factories. Each returns the page root plus anything to release when
//! the router replaces it.

mod about;
mod contact;
mod gallery;
mod home;
mod news;
mod not_found;

pub use about::about;
pub use contact::contact;
pub use gallery::gallery;
pub use home::{carousel, home};
pub use news::news;
pub use not_found::not_found;
