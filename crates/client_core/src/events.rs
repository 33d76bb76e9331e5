//! Stacked event dispatch for UI input events.

use std::cell::RefCell;
use std::rc::Rc;

/// An ordered registry of handlers for one named event, dispatched
/// most-recently-registered first.
///
/// The stack lets the most specific currently-active UI mode get first look
/// at a raw input event: a handler returns `false` to swallow the event, and
/// dispatch stops before any handler registered earlier. The map module owns
/// one stack per event it publishes; collaborators hold a shared reference
/// and only ever `push`, `pop`, or `fire`; the handler list itself is never
/// exposed.
///
/// Single-threaded by construction (`Rc`-shared handlers, interior
/// mutability); all mutation and dispatch are synchronous.
pub struct EventStack<A> {
    handlers: RefCell<Vec<Rc<dyn Fn(&A) -> bool>>>,
}

impl<A> EventStack<A> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Appends `handler`. Subsequent `fire` calls invoke it before any
    /// handler registered earlier. Duplicates are permitted.
    pub fn push<F>(&self, handler: F)
    where
        F: Fn(&A) -> bool + 'static,
    {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    /// Removes the most recently registered handler, if any; no-op on an
    /// empty stack. There is deliberately no way to name *which* handler to
    /// remove; `pop` always takes the tail.
    pub fn pop(&self) {
        self.handlers.borrow_mut().pop();
    }

    /// Invokes handlers newest to oldest, passing `args` to each. A `false`
    /// return stops dispatch immediately; older handlers are not invoked.
    ///
    /// The handler list is snapshotted on entry: a handler may `push` or
    /// `pop` on this same stack while dispatch is running (e.g. a one-shot
    /// handler popping itself once consumed), and such mutation affects
    /// subsequent `fire` calls only, never the dispatch in flight. A handler
    /// panic is not caught and aborts the remaining dispatch.
    pub fn fire(&self, args: &A) {
        let snapshot: Vec<Rc<dyn Fn(&A) -> bool>> = self.handlers.borrow().clone();
        for handler in snapshot.into_iter().rev() {
            if !handler(args) {
                break;
            }
        }
    }
}

impl<A> Default for EventStack<A> {
    fn default() -> Self {
        Self::new()
    }
}
