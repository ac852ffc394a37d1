//! Callback abstraction for event-to-message mapping
//!
//! Event bindings translate a raw input (a DOM event, a file list, a key) into an
//! application message. Instead of passing `Rc<dyn Fn(T) -> Option<M>>` around,
//! bindings use `Callback<T, M>`.
//!
//! # Examples
//!
//! ```
//! use photocheck_ui::Callback;
//!
//! #[derive(Debug, PartialEq)]
//! enum Message {
//!     Clicked,
//!     Tab(String),
//! }
//!
//! let click = Callback::new(|_: ()| Message::Clicked);
//! assert_eq!(click.call(()), Some(Message::Clicked));
//!
//! let tab = Callback::filter_map(|id: &str| {
//!     (!id.is_empty()).then(|| Message::Tab(id.to_string()))
//! });
//! assert_eq!(tab.call(""), None);
//! assert_eq!(tab.call("exif"), Some(Message::Tab("exif".into())));
//! ```

use std::fmt;
use std::rc::Rc;

/// A shareable handler that maps an input to an optional message.
///
/// # Type Parameters
///
/// - `T`: The input type for the callback (e.g., a DOM event)
/// - `M`: The message type returned by the callback
pub struct Callback<T, M> {
    f: Rc<dyn Fn(T) -> Option<M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a callback that always produces a message.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Rc::new(move |value| Some(f(value))),
        }
    }

    /// Create a callback that may decline to produce a message.
    ///
    /// Used for delegated listeners where only some targets are relevant.
    pub fn filter_map<F>(f: F) -> Self
    where
        F: Fn(T) -> Option<M> + 'static,
    {
        Self { f: Rc::new(f) }
    }

    /// Call the callback with a value. `None` when the handler declined.
    pub fn call(&self, value: T) -> Option<M> {
        (self.f)(value)
    }
}

impl<T, M> Clone for Callback<T, M> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
        }
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}
