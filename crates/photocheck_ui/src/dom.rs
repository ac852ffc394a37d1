//! Browser DOM glue (wasm32 only).
//!
//! Element lookup, event binding, timers, and [`DomSurface`], which applies
//! [`ElementPatch`]es to the live document and skips writes whose value has not
//! changed since the last frame.

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::application::Application;
use crate::callback::Callback;
use crate::dispatcher::{Dispatcher, Surface};
use crate::error::DomError;
use crate::patch::{ElementPatch, PatchOp, Target};

/// The global `window`.
pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoGlobal("window"))
}

/// The global `document`.
pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoGlobal("document"))
}

/// Look up a required element by id.
pub fn element_by_id(id: &str) -> Result<Element, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))
}

/// Look up a required element by id and cast it to a concrete interface.
pub fn typed_element_by_id<T: JsCast>(id: &str, expected: &'static str) -> Result<T, DomError> {
    element_by_id(id)?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

/// Fail with the first id in `ids` that is not present on the page.
pub fn require_elements(ids: &[&str]) -> Result<(), DomError> {
    let document = document()?;
    match ids.iter().find(|id| document.get_element_by_id(id).is_none()) {
        Some(missing) => Err(DomError::MissingElement((*missing).to_string())),
        None => Ok(()),
    }
}

/// Extract a readable message from a thrown JavaScript value.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(js_error_message(&value))
    }
}

/// The nearest ancestor (or self) of the event target matching `selector`.
pub fn closest_target(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

/// Attach a listener that turns events into messages for `dispatcher`.
///
/// The listener lives for the lifetime of the page.
pub fn bind<A>(
    dispatcher: &Dispatcher<A>,
    target: &EventTarget,
    event: &'static str,
    callback: Callback<Event, A::Message>,
) -> Result<(), DomError>
where
    A: Application + 'static,
{
    let dispatcher = dispatcher.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(message) = callback.call(event) {
            dispatcher.dispatch(message);
        }
    });
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `f` once after `delay_ms` milliseconds.
pub fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) -> Result<i32, DomError> {
    let callback = Closure::once_into_js(f);
    let handle = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    )?;
    Ok(handle)
}

/// Applies patches to the live document.
#[derive(Default)]
pub struct DomSurface {
    /// Last value written per (target, slot)
    applied: HashMap<(Target, String), String>,
}

impl DomSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(target: &Target) -> Result<Vec<Element>, DomError> {
        let document = document()?;
        let found = match target {
            Target::Id(id) => document.get_element_by_id(id).into_iter().collect(),
            Target::Body => document.body().map(Element::from).into_iter().collect(),
            Target::Selector(selector) => document.query_selector(selector)?.into_iter().collect(),
            Target::All(selector) => {
                let list = document.query_selector_all(selector)?;
                (0..list.length())
                    .filter_map(|i| list.get(i))
                    .filter_map(|node| node.dyn_into::<Element>().ok())
                    .collect()
            }
        };
        Ok(found)
    }

    /// Forget writes to elements that replaced markup may have recreated.
    ///
    /// Id targets are dropped when they are gone or live inside `owner`;
    /// selector targets are always dropped.
    fn invalidate_inside(&mut self, owner: &Target) {
        let Ok(owners) = Self::resolve(owner) else {
            self.applied.clear();
            return;
        };
        let Ok(document) = document() else {
            return;
        };
        self.applied.retain(|(target, _), _| match target {
            _ if target == owner => true,
            Target::Body => true,
            Target::Selector(_) | Target::All(_) => false,
            Target::Id(id) => match document.get_element_by_id(id) {
                Some(element) => !owners.iter().any(|o| o.contains(Some(element.as_ref()))),
                None => false,
            },
        });
    }

    /// Returns `false` when the target is not on the page.
    fn apply_op(target: &Target, op: &PatchOp) -> Result<bool, DomError> {
        let elements = Self::resolve(target)?;
        if elements.is_empty() {
            return Ok(false);
        }
        for element in &elements {
            match op {
                PatchOp::Display(value) => {
                    if let Some(html) = element.dyn_ref::<HtmlElement>() {
                        html.style().set_property("display", value)?;
                    }
                }
                PatchOp::Class(name, on) => {
                    element.class_list().toggle_with_force(name, *on)?;
                }
                PatchOp::Text(content) => element.set_text_content(Some(content)),
                PatchOp::InnerHtml(markup) => element.set_inner_html(markup),
                PatchOp::Attr(name, value) => element.set_attribute(name, value)?,
                PatchOp::Disabled(disabled) => {
                    element.toggle_attribute_with_force("disabled", *disabled)?;
                }
                PatchOp::StyleFromData {
                    property,
                    key,
                    suffix,
                } => {
                    if let Some(html) = element.dyn_ref::<HtmlElement>() {
                        let value = html.dataset().get(key).unwrap_or_else(|| "0".to_string());
                        html.style().set_property(property, &format!("{value}{suffix}"))?;
                    }
                }
            }
        }
        Ok(true)
    }
}

impl Surface for DomSurface {
    fn apply(&mut self, patches: &[ElementPatch]) {
        for patch in patches {
            for op in &patch.ops {
                let key = (patch.target.clone(), op.slot());
                let value = op.value();
                if self.applied.get(&key) == Some(&value) {
                    continue;
                }
                match Self::apply_op(&patch.target, op) {
                    Ok(true) => {
                        if matches!(op, PatchOp::InnerHtml(_)) {
                            self.invalidate_inside(&patch.target);
                        }
                        self.applied.insert(key, value);
                    }
                    Ok(false) => log::trace!("Patch target {:?} not on page", patch.target),
                    Err(e) => log::warn!("Failed to apply {:?} to {:?}: {}", op, patch.target, e),
                }
            }
        }
    }
}
