use std::{cell::Cell, fmt, rc::Rc};

/// The event handed to listeners registered with [`Node::listen`](crate::Node::listen).
///
/// In the browser it wraps the native event; in the render environment it is
/// synthesized by [`Node::dispatch`](crate::Node::dispatch).
#[derive(Clone)]
pub struct Event {
    name: String,
    native: Option<web_sys::Event>,
    prevented: Rc<Cell<bool>>,
}

impl Event {
    pub(crate) fn synthetic(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            native: None,
            prevented: Rc::default(),
        }
    }

    pub(crate) fn from_native(native: web_sys::Event) -> Self {
        Self {
            name: native.type_(),
            native: Some(native),
            prevented: Rc::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn native(&self) -> Option<&web_sys::Event> {
        self.native.as_ref()
    }

    pub fn prevent_default(&self) {
        self.prevented.set(true);
        if let Some(native) = &self.native {
            native.prevent_default();
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
            || self
                .native
                .as_ref()
                .is_some_and(web_sys::Event::default_prevented)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("native", &self.native.is_some())
            .field("default_prevented", &self.default_prevented())
            .finish()
    }
}

/// Derives the listener name from an event property key.
///
/// The `on` prefix is stripped and the remainder lowercased, so `onClick`,
/// `onclick` and `onMouseEnter` name `click`, `click` and `mouseenter`. A key
/// without the prefix, or the bare `on`, is only lowercased. Events whose own
/// name starts with `on` (`online`) are registered with
/// [`Props::on_event`](crate::props::Props::on_event) instead.
pub fn event_name(key: &str) -> String {
    match key.strip_prefix("on") {
        Some(rest) if !rest.is_empty() => rest.to_lowercase(),
        _ => key.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_stripped_whatever_follows() {
        assert_eq!(event_name("onClick"), "click");
        assert_eq!(event_name("onclick"), "click");
        assert_eq!(event_name("onMouseEnter"), "mouseenter");
        assert_eq!(event_name("onOnline"), "online");
        assert_eq!(event_name("Submit"), "submit");
        assert_eq!(event_name("on"), "on");
    }

    #[test]
    fn synthetic_events_track_prevent_default() {
        let event = Event::synthetic("submit");
        let copy = event.clone();
        assert!(!event.default_prevented());

        copy.prevent_default();
        assert!(event.default_prevented());
        assert_eq!(event.name(), "submit");
    }
}
