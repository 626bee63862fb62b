//! Export button.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;
use memegen_core::ExportFailure;

use crate::raster::{self, ExportRequest};

/// Props for the [`ExportButton`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ExportButtonProps {
    /// What to export when clicked.
    request: ExportRequest,
}

/// Rasterizes the composite region and downloads it.
///
/// Failures are logged, never shown: recognized cross-origin failures as
/// warnings, everything else as errors. The button is disabled while an
/// export is in flight.
#[component]
pub fn ExportButton(props: ExportButtonProps) -> Element {
    let mut exporting = use_signal(|| false);

    let on_click = {
        let request = props.request;
        move |_| {
            if exporting() {
                return;
            }
            exporting.set(true);
            let request = request.clone();
            spawn(async move {
                if let Err(e) = raster::export_composite(&request).await {
                    ExportFailure::report(&e);
                }
                exporting.set(false);
            });
        }
    };

    rsx! {
        button {
            class: "form--button",
            disabled: exporting(),
            onclick: on_click,
            Icon { width: 18, height: 18, icon: LdDownload }
            if exporting() { "Exporting..." } else { "Download Meme" }
        }
    }
}
