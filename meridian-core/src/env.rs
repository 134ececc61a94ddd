use std::{cell::Cell, thread_local};

thread_local! {
    static ENV: Cell<Env> = const { Cell::new(Env::Render) };
}

/// Where nodes live. `Render` keeps them purely in memory; `Browser` mirrors
/// every node into the live document.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Render,
    Browser,
}

pub fn current() -> Env {
    ENV.get()
}

pub fn is_browser() -> bool {
    matches!(ENV.get(), Env::Browser)
}

pub fn browser_available() -> bool {
    cfg!(target_family = "wasm") && web_sys::window().is_some()
}

/// Switches the environment, returning the previous one.
///
/// # Panics
///
/// Panics when switching to [`Env::Browser`] outside a browser.
pub fn replace(env: Env) -> Env {
    if matches!(env, Env::Browser) && !browser_available() {
        panic!("browser rendering unsupported in this environment");
    }

    ENV.replace(env)
}

pub fn with<T, F>(env: Env, f: F) -> T
where
    F: FnOnce() -> T,
{
    let prev = replace(env);
    let value = f();
    replace(prev);
    value
}

pub(crate) fn document() -> Option<web_sys::Document> {
    if is_browser() {
        web_sys::window().and_then(|window| window.document())
    } else {
        None
    }
}
