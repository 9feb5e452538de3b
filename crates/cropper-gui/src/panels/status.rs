use crate::app::CropperApp;

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let Some(ref cropper) = app.cropper else {
                ui.label("No image");
                return;
            };
            let crop = cropper.crop_size();
            let offset = cropper.offset();
            let range = cropper.pan_range();
            ui.label(format!("Crop: {:.0}x{:.0}", crop.width, crop.height));
            ui.separator();
            ui.label(format!("Offset: ({:.1}, {:.1})", offset.x, offset.y));
            ui.separator();
            ui.label(format!(
                "Pan: x [{:.0}, {:.0}]  y [{:.0}, {:.0}]",
                range.x.min, range.x.max, range.y.min, range.y.max
            ));
            ui.separator();
            ui.label(cropper.options().show_type.to_string());
            if cropper.is_dragging() {
                ui.separator();
                ui.label("dragging");
            }
        });

        ui.add_space(2.0);
    });
}
