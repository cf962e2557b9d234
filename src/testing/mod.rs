//! Test helpers: recording listeners.
//!
//! [`ListenerLog`] hands out listener callbacks that record every delivery,
//! so tests can assert exactly what a connector passed along.
//!
//! ```ignore
//! let log = ListenerLog::new();
//! dom.connect(button, ONCLICK, log.listener())?;
//! dom.invoke(button, ONCLICK, &[])?;
//! assert_eq!(log.len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::value::Value;

/// One listener call.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub emitter: NodeId,
    pub args: Vec<Value>,
}

/// Shared record of listener calls. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct ListenerLog {
    deliveries: Rc<RefCell<Vec<Delivery>>>,
}

impl ListenerLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends to this log.
    pub fn listener(&self) -> impl Fn(&mut Dom, NodeId, &[Value]) + 'static {
        let deliveries = Rc::clone(&self.deliveries);
        move |_, emitter, args| {
            deliveries.borrow_mut().push(Delivery {
                emitter,
                args: args.to_vec(),
            });
        }
    }

    /// Snapshot of all deliveries so far.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.deliveries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.borrow().is_empty()
    }

    pub fn last(&self) -> Option<Delivery> {
        self.deliveries.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.deliveries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::Element;
    use crate::widget::events::{ONCLICK, ONKEYDOWN};

    #[test]
    fn records_deliveries() {
        let mut dom = Dom::new();
        let button = dom.insert(Element::widget_tag("button"));
        let log = ListenerLog::new();
        dom.connect_with(button, ONCLICK, log.listener(), vec![Value::from("ctx")])
            .unwrap();
        dom.invoke(button, ONCLICK, &[]).unwrap();
        assert_eq!(
            log.last(),
            Some(Delivery {
                emitter: button,
                args: vec![Value::from("ctx")],
            })
        );
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn key_event_payload() {
        let mut dom = Dom::new();
        let field = dom.insert(Element::widget_tag("input"));
        let log = ListenerLog::new();
        dom.connect(field, ONKEYDOWN, log.listener()).unwrap();
        let args = [
            Value::from("a"),
            Value::from(true),
            Value::from(false),
            Value::from(false),
        ];
        dom.invoke(field, ONKEYDOWN, &args).unwrap();
        assert_eq!(log.deliveries()[0].args, args.to_vec());
    }
}
