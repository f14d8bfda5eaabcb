use eframe::egui::{RichText, Ui};

// ---------------------------------------------------------------------------
// About page – static text only
// ---------------------------------------------------------------------------

/// Render the static about page.
pub fn about_page(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(24.0);
        ui.heading("About the author");
        ui.add_space(16.0);

        ui.label(RichText::new("Author: Egor A. Chamshin").size(18.0));
        ui.label(RichText::new("Group: MO-231").size(18.0));
        ui.label(
            RichText::new("Project: desktop application for ML model inference and data analysis")
                .size(18.0),
        );

        ui.add_space(24.0);
        ui.small("Omsk, 2025");
    });
}
