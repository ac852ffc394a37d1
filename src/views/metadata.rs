//! Metadata tab contents.
//!
//! Each tab is a list of [`MetadataEntry`] values derived from the flat
//! metadata map. Entries render to HTML for the page and to plain text for
//! the command-line report.

use photocheck_ui::{el, Node};

use super::helpers::{is_hex_color, metadata_item, placeholder};
use crate::model::Metadata;
use crate::state::MetadataTab;

/// One row of a metadata tab.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataEntry {
    /// Plain `label: value` row
    Field {
        label: String,
        value: String,
        /// Tooltip when different from the value
        title: Option<String>,
    },
    /// Average color swatch
    AverageColor { hex: String, rgb: Option<String> },
    /// Dominant color chips
    Palette(Vec<String>),
}

impl MetadataEntry {
    fn field(label: &str, value: impl Into<String>) -> Self {
        MetadataEntry::Field {
            label: label.to_string(),
            value: value.into(),
            title: None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MetadataEntry::Field { label, .. } => label,
            MetadataEntry::AverageColor { .. } => "Average Color",
            MetadataEntry::Palette(_) => "Dominant Colors",
        }
    }

    /// Value as plain text.
    pub fn plain_value(&self) -> String {
        match self {
            MetadataEntry::Field { value, .. } => value.clone(),
            MetadataEntry::AverageColor { hex, rgb: Some(rgb) } => format!("{hex} ({rgb})"),
            MetadataEntry::AverageColor { hex, rgb: None } => hex.clone(),
            MetadataEntry::Palette(colors) => colors.join(", "),
        }
    }

    pub fn to_node(&self) -> Node {
        match self {
            MetadataEntry::Field {
                label,
                value,
                title,
            } => metadata_item(label, value, title.as_deref()),
            MetadataEntry::AverageColor { hex, rgb } => {
                let mut swatch = el("div").class("color-swatch");
                if is_hex_color(hex) {
                    swatch = swatch.attr("style", format!("background-color: {hex}"));
                }
                let mut value = el("div")
                    .class("metadata-value")
                    .child(el("span").text(hex.as_str()));
                if let Some(rgb) = rgb {
                    value = value.child(el("br")).child(el("span").text(rgb.as_str()));
                }
                el("div")
                    .class("metadata-item")
                    .child(el("div").class("metadata-label").text(self.label()))
                    .child(
                        el("div")
                            .attr("style", "display: flex; align-items: center;")
                            .child(swatch)
                            .child(value),
                    )
                    .into()
            }
            MetadataEntry::Palette(colors) => {
                let chips = colors.iter().map(|hex| {
                    let chip = el("div").class("color-chip").attr("title", hex.as_str());
                    if is_hex_color(hex) {
                        chip.attr("style", format!("background-color: {hex};"))
                    } else {
                        chip
                    }
                });
                el("div")
                    .class("metadata-item")
                    .child(el("div").class("metadata-label").text(self.label()))
                    .child(el("div").class("color-palette").children(chips))
                    .into()
            }
        }
    }
}

/// Entries shown in `tab` for the given metadata, in display order.
pub fn tab_entries(tab: MetadataTab, metadata: &Metadata) -> Vec<MetadataEntry> {
    match tab {
        MetadataTab::Basic => basic_entries(metadata),
        MetadataTab::Camera => camera_entries(metadata),
        MetadataTab::Technical => technical_entries(metadata),
        MetadataTab::Color => color_entries(metadata),
        MetadataTab::Exif => metadata
            .exif_entries()
            .into_iter()
            .map(|(key, value)| MetadataEntry::Field {
                label: key,
                value,
                title: None,
            })
            .collect(),
    }
}

/// Rendered tab content, or the tab's placeholder when it has no entries.
pub fn render_tab(tab: MetadataTab, metadata: &Metadata) -> Node {
    let entries = tab_entries(tab, metadata);
    if entries.is_empty() {
        return placeholder(tab.placeholder());
    }
    Node::Fragment(entries.iter().map(MetadataEntry::to_node).collect())
}

/// Append `label: metadata[key]` when the value is available.
fn push_text(entries: &mut Vec<MetadataEntry>, metadata: &Metadata, label: &str, key: &str) {
    if let Some(value) = metadata.text(key) {
        entries.push(MetadataEntry::field(label, value));
    }
}

fn basic_entries(metadata: &Metadata) -> Vec<MetadataEntry> {
    let mut entries = Vec::new();
    push_text(&mut entries, metadata, "File Name", "filename");
    push_text(&mut entries, metadata, "File Size", "file_size");
    if let (Some(width), Some(height)) = (metadata.text("width"), metadata.text("height")) {
        entries.push(MetadataEntry::field("Dimensions", format!("{width} x {height}px")));
    }
    push_text(&mut entries, metadata, "Aspect Ratio", "aspect_ratio");
    if let Some(hash) = metadata.text("hash") {
        entries.push(MetadataEntry::Field {
            label: "Image Hash (MD5)".to_string(),
            title: Some(hash.clone()),
            value: hash,
        });
    }
    entries
}

fn camera_entries(metadata: &Metadata) -> Vec<MetadataEntry> {
    let mut entries = Vec::new();
    push_text(&mut entries, metadata, "Camera", "camera");
    push_text(&mut entries, metadata, "Lens", "lens");
    push_text(&mut entries, metadata, "Exposure", "exposure_formatted");
    push_text(&mut entries, metadata, "Aperture", "aperture");
    push_text(&mut entries, metadata, "ISO", "iso");
    push_text(&mut entries, metadata, "Focal Length", "focal_length");
    push_text(&mut entries, metadata, "Date Taken", "date_taken_formatted");
    if metadata.flag("has_location") {
        entries.push(MetadataEntry::field("Location", "GPS data present"));
    }
    entries
}

fn technical_entries(metadata: &Metadata) -> Vec<MetadataEntry> {
    let mut entries = Vec::new();
    push_text(&mut entries, metadata, "Format", "format");
    push_text(&mut entries, metadata, "Color Mode", "mode");
    push_text(&mut entries, metadata, "Total Processing Time", "total_processing_time");
    if let Some(seconds) = metadata.number("request_time").filter(|s| *s != 0.0) {
        entries.push(MetadataEntry::field("API Request Time", format!("{seconds:.2} seconds")));
    }
    entries
}

fn color_entries(metadata: &Metadata) -> Vec<MetadataEntry> {
    let mut entries = Vec::new();

    if let Some(hex) = metadata.text("avg_color_hex") {
        entries.push(MetadataEntry::AverageColor {
            hex,
            rgb: metadata.text("avg_color"),
        });
    }

    let palette = metadata.dominant_colors();
    if !palette.is_empty() {
        entries.push(MetadataEntry::Palette(palette));
    }

    if let Some(category) = metadata.text("brightness_category") {
        let value = match metadata.text("brightness") {
            Some(brightness) => format!("{brightness}% ({category})"),
            None => category,
        };
        entries.push(MetadataEntry::field("Brightness", value));
    }

    if let Some(contrast) = metadata.number("contrast").filter(|c| *c != 0.0) {
        entries.push(MetadataEntry::field("Contrast", format!("{:.0}%", contrast.round())));
    }

    entries
}
