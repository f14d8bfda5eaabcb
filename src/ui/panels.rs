use eframe::egui::{Color32, RichText, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Top bar – page navigation and status
// ---------------------------------------------------------------------------

/// Render the top navigation / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("WineScope");
        ui.separator();

        ui.selectable_value(&mut state.page, Page::Inference, "Prediction");
        ui.selectable_value(&mut state.page, Page::About, "About");

        ui.separator();

        if let Some(model) = &state.loaded {
            ui.label(format!("Model '{}' loaded", model.name));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

/// Shared page footer.
pub fn footer(ui: &mut Ui) {
    ui.separator();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.small("© 2025 — WineScope, ML model inference for wine quality");
    });
}
