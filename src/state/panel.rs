//! Metadata panel: open/closed toggle and the active tab.

/// Toggle state of the metadata panel. Changes only on toggle clicks and
/// resets to `Closed` whenever a new file is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataPanel {
    #[default]
    Closed,
    Open,
}

impl MetadataPanel {
    pub fn toggled(self) -> Self {
        match self {
            MetadataPanel::Closed => MetadataPanel::Open,
            MetadataPanel::Open => MetadataPanel::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, MetadataPanel::Open)
    }

    /// Chevron icon on the toggle button.
    pub fn icon(self) -> &'static str {
        match self {
            MetadataPanel::Closed => "fas fa-chevron-down",
            MetadataPanel::Open => "fas fa-chevron-up",
        }
    }
}

/// Wording of the toggle label, which depends on how results were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleWording {
    /// After a successful classification
    Detailed,
    /// After a partial result or an empty prediction list
    Image,
}

impl ToggleWording {
    pub fn label(self, panel: MetadataPanel) -> &'static str {
        match (self, panel) {
            (ToggleWording::Detailed, MetadataPanel::Closed) => "Show Detailed Information",
            (ToggleWording::Detailed, MetadataPanel::Open) => "Hide Detailed Information",
            (ToggleWording::Image, MetadataPanel::Closed) => "Show Image Information",
            (ToggleWording::Image, MetadataPanel::Open) => "Hide Image Information",
        }
    }
}

/// The five metadata tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MetadataTab {
    #[default]
    Basic,
    Camera,
    Technical,
    Color,
    Exif,
}

impl MetadataTab {
    pub const ALL: [MetadataTab; 5] = [
        MetadataTab::Basic,
        MetadataTab::Camera,
        MetadataTab::Technical,
        MetadataTab::Color,
        MetadataTab::Exif,
    ];

    /// Value of the `data-tab` attribute on the tab link.
    pub fn id(self) -> &'static str {
        match self {
            MetadataTab::Basic => "basic",
            MetadataTab::Camera => "camera",
            MetadataTab::Technical => "technical",
            MetadataTab::Color => "color",
            MetadataTab::Exif => "exif",
        }
    }

    /// Id of the tab panel (`tab-{id}`).
    pub fn panel_id(self) -> &'static str {
        match self {
            MetadataTab::Basic => "tab-basic",
            MetadataTab::Camera => "tab-camera",
            MetadataTab::Technical => "tab-technical",
            MetadataTab::Color => "tab-color",
            MetadataTab::Exif => "tab-exif",
        }
    }

    /// Id of the element receiving the rendered items.
    pub fn content_id(self) -> &'static str {
        match self {
            MetadataTab::Basic => "basic-metadata",
            MetadataTab::Camera => "camera-metadata",
            MetadataTab::Technical => "technical-metadata",
            MetadataTab::Color => "color-analysis-content",
            MetadataTab::Exif => "exif-metadata",
        }
    }

    /// Selector for the tab link.
    pub fn link_selector(self) -> &'static str {
        match self {
            MetadataTab::Basic => r#".tab-link[data-tab="basic"]"#,
            MetadataTab::Camera => r#".tab-link[data-tab="camera"]"#,
            MetadataTab::Technical => r#".tab-link[data-tab="technical"]"#,
            MetadataTab::Color => r#".tab-link[data-tab="color"]"#,
            MetadataTab::Exif => r#".tab-link[data-tab="exif"]"#,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MetadataTab::Basic => "Basic",
            MetadataTab::Camera => "Camera",
            MetadataTab::Technical => "Technical",
            MetadataTab::Color => "Color",
            MetadataTab::Exif => "EXIF",
        }
    }

    /// Text shown when the tab has no items.
    pub fn placeholder(self) -> &'static str {
        match self {
            MetadataTab::Basic => "No basic information available.",
            MetadataTab::Camera => "No camera information available in EXIF data.",
            MetadataTab::Technical => "No technical details available.",
            MetadataTab::Color => "No color analysis available.",
            MetadataTab::Exif => "No EXIF data available for this image.",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_closed_look() {
        let panel = MetadataPanel::default();
        let wording = ToggleWording::Detailed;
        let before = (panel.icon(), wording.label(panel));

        let opened = panel.toggled();
        assert!(opened.is_open());
        assert_eq!(wording.label(opened), "Hide Detailed Information");

        let closed = opened.toggled();
        assert_eq!((closed.icon(), wording.label(closed)), before);
    }

    #[test]
    fn test_tab_ids_round_trip() {
        for tab in MetadataTab::ALL {
            assert_eq!(MetadataTab::from_id(tab.id()), Some(tab));
            assert_eq!(tab.panel_id(), format!("tab-{}", tab.id()));
            assert!(tab.link_selector().contains(tab.id()));
        }
        assert_eq!(MetadataTab::from_id("gps"), None);
    }
}
