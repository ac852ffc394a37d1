//! Results panel markup.

use photocheck_ui::{el, ElementNode, Node};

use super::helpers::{icon, icon_label};
use crate::constants::ids;
use crate::model::{Classification, Prediction, ResultKind};
use crate::state::{MetadataPanel, ResultsContent, ToggleWording};

pub const NO_RESULTS_TEXT: &str =
    "Could not identify any specific objects. The model may not be suitable for this image type.";
pub const PARTIAL_RESULTS_TEXT: &str =
    "API classification failed, but we've analyzed the image metadata.";

/// Full content of `#results-content`.
///
/// The metadata toggle is rendered closed; its live state is patched
/// separately so toggling never rebuilds the list.
pub fn results_content(content: &ResultsContent) -> Node {
    let mut nodes = match content {
        ResultsContent::Predictions(classification) => prediction_nodes(classification),
        ResultsContent::NoResults { .. } => {
            vec![el("p").class("no-results").text(NO_RESULTS_TEXT).into()]
        }
        ResultsContent::Partial { .. } => vec![
            el("div")
                .class("error-banner")
                .child(icon("fas fa-exclamation-circle"))
                .child(el("p").text(PARTIAL_RESULTS_TEXT))
                .into(),
        ],
    };

    if content.metadata().is_some() {
        nodes.push(metadata_toggle(content.toggle_wording()).into());
    }
    Node::Fragment(nodes)
}

/// Inner markup of the toggle button for a panel state.
pub fn toggle_label(wording: ToggleWording, panel: MetadataPanel) -> Node {
    icon_label(panel.icon(), wording.label(panel))
}

fn metadata_toggle(wording: ToggleWording) -> ElementNode {
    el("div").class("btn-container").child(
        el("button")
            .class("metadata-toggle")
            .id(ids::METADATA_TOGGLE)
            .attr("type", "button")
            .child(toggle_label(wording, MetadataPanel::Closed)),
    )
}

fn prediction_nodes(classification: &Classification) -> Vec<Node> {
    let mut nodes = Vec::new();

    if !classification.insights.is_empty() {
        nodes.push(
            el("div")
                .class("insights-section")
                .child(
                    el("h3")
                        .child(icon("fas fa-lightbulb"))
                        .text(" Image Insights"),
                )
                .child(
                    el("div")
                        .class("insights-content")
                        .children(classification.insights.iter().map(|i| el("p").text(i.as_str()))),
                )
                .into(),
        );
    }

    let kind = match classification.kind() {
        ResultKind::Classification => "classification",
        ResultKind::Detection => "detection",
    };
    nodes.push(el("h3").class("results-subtitle").text("Classification Results").into());
    nodes.push(
        el("ul")
            .class("result-list")
            .attr("data-kind", kind)
            .children(classification.predictions.iter().map(result_item))
            .into(),
    );
    nodes
}

/// One prediction: badge, bar (filled later from `data-score`) and score.
fn result_item(prediction: &Prediction) -> ElementNode {
    let percentage = prediction.percentage();
    el("li")
        .class("result-item")
        .child(
            el("div")
                .class("result-info")
                .child(el("span").class("category-badge").text(prediction.label.as_str()))
                .child(
                    el("div").class("progress-bar").child(
                        el("div")
                            .class("progress-fill")
                            .attr("style", "width: 0%")
                            .attr("data-score", format!("{:.2}", prediction.bar_width())),
                    ),
                ),
        )
        .child(el("div").class("result-score").text(format!("{percentage}%")))
}
