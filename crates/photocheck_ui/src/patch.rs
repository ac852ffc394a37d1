//! Declarative page updates
//!
//! A view is a list of [`ElementPatch`]es. Each patch addresses existing page
//! elements and states what they should look like; surfaces apply them.

/// Which element(s) a patch addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Element with this id
    Id(&'static str),
    /// The document body
    Body,
    /// First element matching a CSS selector
    Selector(&'static str),
    /// Every element matching a CSS selector
    All(&'static str),
}

/// One property of the addressed element(s).
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Set `style.display` (`"none"` hides)
    Display(&'static str),
    /// Add (`true`) or remove (`false`) a class
    Class(&'static str, bool),
    /// Replace text content
    Text(String),
    /// Replace inner HTML with pre-rendered markup
    InnerHtml(String),
    /// Set an attribute
    Attr(&'static str, String),
    /// Set the `disabled` property
    Disabled(bool),
    /// Set a style property from a `data-*` value on each element, plus suffix
    StyleFromData {
        /// CSS property to set
        property: &'static str,
        /// Dataset key to read (`data-score` -> `"score"`)
        key: &'static str,
        /// Text appended to the data value
        suffix: &'static str,
    },
}

impl PatchOp {
    /// Stable key identifying which property this op controls.
    pub fn slot(&self) -> String {
        match self {
            PatchOp::Display(_) => "display".to_string(),
            PatchOp::Class(name, _) => format!("class:{name}"),
            PatchOp::Text(_) => "text".to_string(),
            PatchOp::InnerHtml(_) => "html".to_string(),
            PatchOp::Attr(name, _) => format!("attr:{name}"),
            PatchOp::Disabled(_) => "disabled".to_string(),
            PatchOp::StyleFromData { property, .. } => format!("style:{property}"),
        }
    }

    /// The value this op assigns, used to skip unchanged writes.
    pub fn value(&self) -> String {
        match self {
            PatchOp::Display(v) => (*v).to_string(),
            PatchOp::Class(_, on) | PatchOp::Disabled(on) => on.to_string(),
            PatchOp::Text(v) | PatchOp::InnerHtml(v) | PatchOp::Attr(_, v) => v.clone(),
            PatchOp::StyleFromData { key, suffix, .. } => format!("data:{key}{suffix}"),
        }
    }
}

/// A set of operations applied to one target.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementPatch {
    pub target: Target,
    pub ops: Vec<PatchOp>,
}

impl ElementPatch {
    /// Start a patch for the element with `id`.
    pub fn id(id: &'static str) -> Self {
        Self::new(Target::Id(id))
    }

    /// Start a patch for an arbitrary target.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ops: Vec::new(),
        }
    }

    /// Show with the given display value, or hide.
    pub fn display(self, visible: bool, shown_as: &'static str) -> Self {
        self.op(PatchOp::Display(if visible { shown_as } else { "none" }))
    }

    pub fn class(self, name: &'static str, on: bool) -> Self {
        self.op(PatchOp::Class(name, on))
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.op(PatchOp::Text(content.into()))
    }

    pub fn html(self, markup: impl Into<String>) -> Self {
        self.op(PatchOp::InnerHtml(markup.into()))
    }

    pub fn attr(self, name: &'static str, value: impl Into<String>) -> Self {
        self.op(PatchOp::Attr(name, value.into()))
    }

    pub fn disabled(self, disabled: bool) -> Self {
        self.op(PatchOp::Disabled(disabled))
    }

    pub fn op(mut self, op: PatchOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Find the op controlling `slot` (see [`PatchOp::slot`]).
    pub fn find(&self, slot: &str) -> Option<&PatchOp> {
        self.ops.iter().find(|op| op.slot() == slot)
    }
}
