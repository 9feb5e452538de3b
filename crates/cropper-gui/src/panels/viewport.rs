use crate::app::CropperApp;
use crate::convert;
use crate::panels::crop_interaction;
use crate::states::viewport::CONTAINER_SIZE;

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let board_texture = app.viewport.board_texture.as_ref().map(|t| t.id());
        let Some(board_texture) = board_texture else {
            show_placeholder(ui);
            return;
        };

        let container_rect = egui::Rect::from_center_size(rect.center(), CONTAINER_SIZE.into());
        let response = ui.allocate_rect(container_rect, egui::Sense::drag());

        crop_interaction::handle_crop_interaction(ctx, &response, app, container_rect);

        let Some(ref cropper) = app.cropper else {
            return;
        };
        let painter = ui.painter_at(container_rect);
        painter.rect_filled(container_rect, 0.0, convert::mask_color());

        // Masked board behind, clean crop surface on top.
        let board_rect = crop_interaction::container_to_screen(&cropper.board_rect(), container_rect);
        draw_image(&painter, board_texture, board_rect);

        let window = cropper.crop_window();
        if let Some(ref crop_texture) = app.viewport.crop_texture {
            let crop_rect = crop_interaction::container_to_screen(&window, container_rect);
            let [w, h] = crop_texture.size();
            draw_image(
                &painter,
                crop_texture.id(),
                egui::Rect::from_min_size(crop_rect.min, egui::vec2(w as f32, h as f32)),
            );
        }

        crop_interaction::draw_crop_overlay(ui, &window, container_rect);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn draw_image(painter: &egui::Painter, texture_id: egui::TextureId, img_rect: egui::Rect) {
    painter.image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image to begin cropping")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
