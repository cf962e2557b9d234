//! The standard widget event set and its client trigger templates.
//!
//! Every widget gets one connector per entry of [`STANDARD_EVENTS`]. The
//! templates are client code that reports the DOM event back to the server
//! with `sendCallback` (no data) or `sendCallbackParam` (a params object).

use crate::event::source::{forward, EventDecl};

pub const ONCLICK: &str = "onclick";
pub const ONDBLCLICK: &str = "ondblclick";
pub const ONCONTEXTMENU: &str = "oncontextmenu";
pub const ONFOCUS: &str = "onfocus";
pub const ONBLUR: &str = "onblur";
pub const ONMOUSEDOWN: &str = "onmousedown";
pub const ONMOUSEUP: &str = "onmouseup";
pub const ONMOUSEMOVE: &str = "onmousemove";
pub const ONMOUSEOUT: &str = "onmouseout";
pub const ONMOUSELEAVE: &str = "onmouseleave";
pub const ONTOUCHSTART: &str = "ontouchstart";
pub const ONTOUCHMOVE: &str = "ontouchmove";
pub const ONTOUCHEND: &str = "ontouchend";
pub const ONTOUCHENTER: &str = "ontouchenter";
pub const ONTOUCHLEAVE: &str = "ontouchleave";
pub const ONTOUCHCANCEL: &str = "ontouchcancel";
pub const ONKEYUP: &str = "onkeyup";
pub const ONKEYDOWN: &str = "onkeydown";

const POSITION: &[&str] = &["x", "y"];
const KEY: &[&str] = &["key", "ctrl", "shift", "alt"];

/// Notification without data. Stops propagation and the default action.
const CALLBACK: &str = concat!(
    "sendCallback('{emitter_identifier}','{event_name}');",
    "event.stopPropagation();event.preventDefault();"
);

/// As [`CALLBACK`], and also returns `false` from the inline handler.
const CALLBACK_CANCEL: &str = concat!(
    "sendCallback('{emitter_identifier}','{event_name}');",
    "event.stopPropagation();event.preventDefault();",
    "return false;"
);

const MOUSE_POSITION: &str = concat!(
    "var params={};",
    "var boundingBox = this.getBoundingClientRect();",
    "params['x']=event.clientX-boundingBox.left;",
    "params['y']=event.clientY-boundingBox.top;",
    "sendCallbackParam('{emitter_identifier}','{event_name}',params);",
    "event.stopPropagation();event.preventDefault();",
    "return false;"
);

const TOUCH_POSITION: &str = concat!(
    "var params={};",
    "var boundingBox = this.getBoundingClientRect();",
    "params['x']=parseInt(event.changedTouches[0].clientX)-boundingBox.left;",
    "params['y']=parseInt(event.changedTouches[0].clientY)-boundingBox.top;",
    "sendCallbackParam('{emitter_identifier}','{event_name}',params);",
    "event.stopPropagation();event.preventDefault();",
    "return false;"
);

const KEY_STATE: &str = concat!(
    "var params={};params['key']=event.key;",
    "params['ctrl']=event.ctrlKey;",
    "params['shift']=event.shiftKey;",
    "params['alt']=event.altKey;",
    "sendCallbackParam('{emitter_identifier}','{event_name}',params);",
    "event.stopPropagation();event.preventDefault();",
    "return false;"
);

/// Events installed on every widget. Each forwards its arguments as the
/// payload.
pub static STANDARD_EVENTS: &[EventDecl] = &[
    EventDecl::new(ONFOCUS, &[], forward).with_client_trigger(CALLBACK_CANCEL),
    EventDecl::new(ONBLUR, &[], forward).with_client_trigger(CALLBACK_CANCEL),
    EventDecl::new(ONCLICK, &[], forward).with_client_trigger(CALLBACK),
    EventDecl::new(ONDBLCLICK, &[], forward).with_client_trigger(CALLBACK),
    EventDecl::new(ONCONTEXTMENU, &[], forward).with_client_trigger(CALLBACK_CANCEL),
    EventDecl::new(ONMOUSEDOWN, POSITION, forward).with_client_trigger(MOUSE_POSITION),
    EventDecl::new(ONMOUSEUP, POSITION, forward).with_client_trigger(MOUSE_POSITION),
    EventDecl::new(ONMOUSEOUT, &[], forward).with_client_trigger(CALLBACK_CANCEL),
    EventDecl::new(ONMOUSELEAVE, &[], forward).with_client_trigger(CALLBACK_CANCEL),
    EventDecl::new(ONMOUSEMOVE, POSITION, forward).with_client_trigger(MOUSE_POSITION),
    EventDecl::new(ONTOUCHMOVE, POSITION, forward).with_client_trigger(TOUCH_POSITION),
    EventDecl::new(ONTOUCHSTART, POSITION, forward).with_client_trigger(TOUCH_POSITION),
    EventDecl::new(ONTOUCHEND, POSITION, forward).with_client_trigger(TOUCH_POSITION),
    EventDecl::new(ONTOUCHENTER, POSITION, forward).with_client_trigger(TOUCH_POSITION),
    EventDecl::new(ONTOUCHLEAVE, &[], forward).with_client_trigger(CALLBACK_CANCEL),
    EventDecl::new(ONTOUCHCANCEL, &[], forward).with_client_trigger(CALLBACK_CANCEL),
    EventDecl::new(ONKEYUP, KEY, forward).with_client_trigger(KEY_STATE),
    EventDecl::new(ONKEYDOWN, KEY, forward).with_client_trigger(KEY_STATE),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn decl(name: &str) -> &'static EventDecl {
        STANDARD_EVENTS.iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = STANDARD_EVENTS.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), STANDARD_EVENTS.len());
        assert_eq!(STANDARD_EVENTS.len(), 18);
    }

    #[test]
    fn every_event_has_a_trigger() {
        for d in STANDARD_EVENTS {
            let t = d.client_trigger.unwrap();
            assert!(t.contains("{emitter_identifier}"), "{}", d.name);
            assert!(t.contains("{event_name}"), "{}", d.name);
        }
    }

    #[test]
    fn click_omits_return_false() {
        let click = decl(ONCLICK).client_trigger.unwrap();
        let menu = decl(ONCONTEXTMENU).client_trigger.unwrap();
        assert!(click.contains("event.preventDefault();"));
        assert!(!click.contains("return false;"));
        assert!(menu.contains("event.preventDefault();"));
        assert_eq!(menu.strip_suffix("return false;"), Some(click));
    }

    #[test]
    fn parameter_lists() {
        assert_eq!(decl(ONMOUSEDOWN).params, &["x", "y"]);
        assert_eq!(decl(ONTOUCHSTART).params, &["x", "y"]);
        assert_eq!(decl(ONKEYDOWN).params, &["key", "ctrl", "shift", "alt"]);
        assert!(decl(ONBLUR).params.is_empty());
    }

    #[test]
    fn touch_reads_changed_touches() {
        assert!(decl(ONTOUCHEND)
            .client_trigger
            .unwrap()
            .contains("event.changedTouches[0].clientX"));
    }
}
