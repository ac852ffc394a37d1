use crate::patch::ElementPatch;

/// Core application trait that defines the lifecycle of a photocheck_ui application.
///
/// This trait follows the Elm Architecture. Applications keep all UI state in
/// `self`, respond to messages, and produce a declarative description of the page.
/// Side effects (timers, network, storage) never happen inside `update`; they are
/// returned as commands and executed by the runtime, which keeps `update` testable
/// without a browser.
pub trait Application: Sized {
    /// The message type that this application handles.
    /// Messages represent events that can update the application state.
    type Message: 'static;

    /// Side effects requested by `update`, executed by the runtime.
    type Command: 'static;

    /// Update the application state in response to a message.
    fn update(&mut self, message: Self::Message) -> Vec<Self::Command>;

    /// Produce the page description for the current application state.
    fn view(&self) -> Vec<ElementPatch>;
}
