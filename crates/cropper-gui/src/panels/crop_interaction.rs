use cropper_core::geometry::{Handle, Point, Rect};
use cropper_core::gesture::{Gesture, HitTarget};

use crate::app::CropperApp;

const HANDLE_DRAW_SIZE: f32 = 8.0;

/// Screen position to container coordinates.
pub fn screen_to_container(pos: egui::Pos2, container_rect: egui::Rect) -> Point {
    Point::new(
        (pos.x - container_rect.left()) as f64,
        (pos.y - container_rect.top()) as f64,
    )
}

/// Container rectangle to screen space.
pub fn container_to_screen(rect: &Rect, container_rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        container_rect.min + egui::vec2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

/// Route primary-button drags into the cropper's pointer operations and set
/// the cursor from the hit test.
pub fn handle_crop_interaction(
    ctx: &egui::Context,
    response: &egui::Response,
    app: &mut CropperApp,
    container_rect: egui::Rect,
) {
    let Some(ref mut cropper) = app.cropper else {
        return;
    };

    if response.drag_started_by(egui::PointerButton::Primary) {
        // The press origin, not the current position, is the gesture reference.
        let origin = ctx.input(|i| i.pointer.press_origin());
        if let Some(pos) = origin.or_else(|| response.interact_pointer_pos()) {
            cropper.pointer_down(screen_to_container(pos, container_rect));
        }
    }

    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            if cropper.pointer_move(screen_to_container(pos, container_rect)) {
                app.viewport.crop_dirty = true;
            }
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        let ended = cropper.pointer_up();
        if let Gesture::Resizing(_) = ended {
            let crop = cropper.crop_size();
            app.ui_state.pending_clip = Some([crop.width, crop.height]);
        }
    }

    update_cursor(ctx, response, app, container_rect);
}

fn update_cursor(
    ctx: &egui::Context,
    response: &egui::Response,
    app: &CropperApp,
    container_rect: egui::Rect,
) {
    let Some(ref cropper) = app.cropper else {
        return;
    };

    let target = match cropper.session().gesture() {
        Gesture::Panning(_) => {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            return;
        }
        Gesture::Resizing(drag) => HitTarget::Handle(drag.handle),
        Gesture::Idle => {
            let Some(hover) = response.hover_pos() else {
                return;
            };
            cropper.hit_test(screen_to_container(hover, container_rect))
        }
    };

    let icon = match target {
        HitTarget::Handle(Handle::TopLeft) => egui::CursorIcon::ResizeNorthWest,
        HitTarget::Handle(Handle::BottomLeft) => egui::CursorIcon::ResizeSouthWest,
        HitTarget::Handle(Handle::TopRight) => egui::CursorIcon::ResizeNorthEast,
        HitTarget::Handle(Handle::BottomRight) => egui::CursorIcon::ResizeSouthEast,
        HitTarget::CropWindow | HitTarget::Board => egui::CursorIcon::Grab,
        HitTarget::Outside => egui::CursorIcon::Default,
    };
    ctx.set_cursor_icon(icon);
}

/// Draw the crop border, the four corner handles and a size label.
pub fn draw_crop_overlay(ui: &egui::Ui, window: &Rect, container_rect: egui::Rect) {
    let painter = ui.painter();
    let screen = container_to_screen(window, container_rect);

    let border = egui::Stroke::new(1.0, egui::Color32::WHITE);
    painter.rect_stroke(screen, 0.0, border, egui::StrokeKind::Middle);

    for handle in Handle::ALL {
        let corner = handle.corner(window);
        let center = container_rect.min + egui::vec2(corner.x as f32, corner.y as f32);
        let square = egui::Rect::from_center_size(center, egui::vec2(HANDLE_DRAW_SIZE, HANDLE_DRAW_SIZE));
        painter.rect_filled(square, 1.0, egui::Color32::WHITE);
        painter.rect_stroke(
            square,
            1.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(40)),
            egui::StrokeKind::Outside,
        );
    }

    let label = format!("{:.0} x {:.0}", window.width, window.height);
    let label_pos = screen.left_bottom() + egui::vec2(0.0, 6.0);
    painter.text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(12.0),
        egui::Color32::from_white_alpha(220),
    );
}
