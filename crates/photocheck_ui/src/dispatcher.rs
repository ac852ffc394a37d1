//! Message dispatch loop
//!
//! The dispatcher owns the application behind `Rc<RefCell<_>>` so event
//! listeners, timers and futures can all hold a handle to it. Messages are
//! queued and drained one at a time: if a command executor (or anything it
//! calls synchronously) dispatches while a message is being processed, the new
//! message waits in the queue instead of re-entering `update`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::application::Application;
use crate::patch::ElementPatch;

/// Something that can display a view.
pub trait Surface {
    /// Apply the full page description produced by `Application::view`.
    fn apply(&mut self, patches: &[ElementPatch]);
}

type Executor<A> = Box<dyn FnMut(<A as Application>::Command, &Dispatcher<A>)>;

struct Inner<A: Application> {
    app: RefCell<A>,
    surface: RefCell<Box<dyn Surface>>,
    executor: RefCell<Option<Executor<A>>>,
    queue: RefCell<VecDeque<A::Message>>,
    draining: Cell<bool>,
}

/// Shared handle to a running application.
pub struct Dispatcher<A: Application> {
    inner: Rc<Inner<A>>,
}

impl<A: Application> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: Application + 'static> Dispatcher<A> {
    /// Wrap an application and the surface it renders to.
    pub fn new(app: A, surface: impl Surface + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                app: RefCell::new(app),
                surface: RefCell::new(Box::new(surface)),
                executor: RefCell::new(None),
                queue: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
            }),
        }
    }

    /// Install the function that performs commands returned by `update`.
    pub fn set_executor<F>(&self, executor: F)
    where
        F: FnMut(A::Command, &Dispatcher<A>) + 'static,
    {
        *self.inner.executor.borrow_mut() = Some(Box::new(executor));
    }

    /// Render the initial view and run startup commands.
    pub fn start(&self, commands: Vec<A::Command>) {
        self.render();
        // Messages dispatched by startup commands wait until all of them ran.
        let was_draining = self.inner.draining.replace(true);
        self.execute(commands);
        self.inner.draining.set(was_draining);
        self.drain();
    }

    /// Queue a message and process the queue unless already processing.
    pub fn dispatch(&self, message: A::Message) {
        self.inner.queue.borrow_mut().push_back(message);
        self.drain();
    }

    /// Read application state.
    pub fn with_app<R>(&self, f: impl FnOnce(&A) -> R) -> R {
        f(&self.inner.app.borrow())
    }

    fn drain(&self) {
        if self.inner.draining.replace(true) {
            return;
        }
        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(message) = next else { break };
            let commands = self.inner.app.borrow_mut().update(message);
            self.render();
            self.execute(commands);
        }
        self.inner.draining.set(false);
    }

    fn render(&self) {
        let patches = self.inner.app.borrow().view();
        self.inner.surface.borrow_mut().apply(&patches);
    }

    fn execute(&self, commands: Vec<A::Command>) {
        if commands.is_empty() {
            return;
        }
        let Ok(mut slot) = self.inner.executor.try_borrow_mut() else {
            log::error!("Command executor re-entered; dropping {} command(s)", commands.len());
            return;
        };
        match slot.as_mut() {
            Some(executor) => {
                for command in commands {
                    executor(command, self);
                }
            }
            None => log::warn!("No command executor installed; dropping {} command(s)", commands.len()),
        }
    }
}
