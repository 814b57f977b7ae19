//! Ordered handler lists for merging consumer callbacks with the
//! controller's own behaviour.
//!
//! Handlers run in insertion order. Consumer handlers only observe the event;
//! the only way to cut dispatch short is returning [`Dispatch::Stop`]. A chain
//! whose event already had propagation stopped by an inner element does not
//! run at all.

use std::fmt;
use std::rc::Rc;

use crate::event_handler::Propagating;

/// Whether dispatch continues to the next handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Stop,
}

/// Consumer-supplied event observer.
pub type ConsumerHandler<E> = Rc<dyn Fn(&E) -> Dispatch>;

pub enum Handler<E> {
    Consumer(ConsumerHandler<E>),
    /// Slot where the controller's own handling runs.
    Controller,
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        match self {
            Handler::Consumer(handler) => Handler::Consumer(handler.clone()),
            Handler::Controller => Handler::Controller,
        }
    }
}

pub struct HandlerChain<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> Default for HandlerChain<E> {
    fn default() -> Self {
        Self { handlers: Vec::new() }
    }
}

impl<E> Clone for HandlerChain<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<E> fmt::Debug for HandlerChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<&str> = self
            .handlers
            .iter()
            .map(|h| match h {
                Handler::Consumer(_) => "consumer",
                Handler::Controller => "controller",
            })
            .collect();
        f.debug_tuple("HandlerChain").field(&slots).finish()
    }
}

impl<E: Propagating> HandlerChain<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build `[first..., controller]`, skipping absent consumers.
    pub fn ending_with_controller(consumers: impl IntoIterator<Item = Option<ConsumerHandler<E>>>) -> Self {
        let mut chain = Self::new();
        for handler in consumers.into_iter().flatten() {
            chain.push(handler);
        }
        chain.push_controller();
        chain
    }

    pub fn push(&mut self, handler: ConsumerHandler<E>) {
        self.handlers.push(Handler::Consumer(handler));
    }

    pub fn push_controller(&mut self) {
        self.handlers.push(Handler::Controller);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler in order, invoking `controller` at the controller slot.
    pub fn dispatch(&self, event: &mut E, mut controller: impl FnMut(&mut E) -> Dispatch) -> Dispatch {
        if event.is_propagation_stopped() {
            return Dispatch::Stop;
        }

        for handler in &self.handlers {
            let flow = match handler {
                Handler::Consumer(observe) => observe(&*event),
                Handler::Controller => controller(event),
            };
            if flow == Dispatch::Stop {
                return Dispatch::Stop;
            }
        }
        Dispatch::Continue
    }
}
