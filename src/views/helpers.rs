//! Helper functions for building common markup patterns.

use photocheck_ui::{el, text, Node};

/// Font Awesome icon element, e.g. `icon("fas fa-search")`.
pub fn icon(classes: &str) -> Node {
    el("i").class(classes).into()
}

/// Icon followed by a label, as used on buttons.
pub fn icon_label(classes: &str, label: &str) -> Node {
    Node::Fragment(vec![icon(classes), text(format!(" {label}"))])
}

/// One `label: value` row of a metadata tab.
///
/// The value doubles as the tooltip unless a `title` is given.
pub fn metadata_item(label: &str, value: &str, title: Option<&str>) -> Node {
    el("div")
        .class("metadata-item")
        .child(el("div").class("metadata-label").text(label))
        .child(
            el("div")
                .class("metadata-value")
                .attr("title", title.unwrap_or(value))
                .text(value),
        )
        .into()
}

/// Paragraph used when a tab has nothing to show.
pub fn placeholder(message: &str) -> Node {
    el("p").text(message).into()
}

/// Whether `value` is a CSS hex color literal (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`).
///
/// Only such values are written into `style` attributes.
pub fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}
