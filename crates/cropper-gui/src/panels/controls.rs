use cropper_core::config::ClipSize;
use cropper_core::consts::MIN_CROP_SIZE;
use cropper_core::geometry::DisplayMode;

use crate::app::CropperApp;
use crate::panels::menu_bar;

const LEFT_PANEL_WIDTH: f32 = 260.0;
const MIME_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/webp", "image/bmp"];

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file_section(ui, app);
                ui.separator();
                display_section(ui, app);
                ui.separator();
                crop_section(ui, app);
                ui.separator();
                output_section(ui, app);
                ui.separator();
                actions_section(ui, app);
            });
        });
}

fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

fn file_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    section_header(ui, "File", None);
    ui.add_space(4.0);

    if ui.button("Open...").clicked() {
        menu_bar::open_file(app);
    }

    if let Some(ref path) = app.ui_state.file_path {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }

    if let Some(ref cropper) = app.cropper {
        let board = cropper.board().size();
        ui.small(format!("Board {}x{}", board.width, board.height));
    }
}

fn display_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    let status = app
        .cropper
        .as_ref()
        .filter(|c| c.options().show_type != app.options.show_type)
        .map(|_| "reload to apply");
    section_header(ui, "Display", status);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.radio_value(&mut app.options.show_type, DisplayMode::Cover, "Cover");
        ui.radio_value(&mut app.options.show_type, DisplayMode::Contain, "Contain");
    });
}

fn crop_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    let current = app.cropper.as_ref().map(|c| c.crop_size());
    let status = current.map(|c| format!("{:.0} x {:.0}", c.width, c.height));
    section_header(ui, "Crop", status.as_deref());
    ui.add_space(4.0);

    let [mut w, mut h] = app
        .ui_state
        .pending_clip
        .or_else(|| current.map(|c| [c.width, c.height]))
        .unwrap_or([app.options.clip_size.w, app.options.clip_size.h]);

    ui.horizontal(|ui| {
        ui.label("W");
        ui.add(egui::DragValue::new(&mut w).range(MIN_CROP_SIZE..=4096.0).speed(1.0));
        ui.label("H");
        ui.add(egui::DragValue::new(&mut h).range(MIN_CROP_SIZE..=4096.0).speed(1.0));
    });
    app.ui_state.pending_clip = Some([w, h]);

    ui.checkbox(&mut app.options.clip_size.fixed, "Lock aspect ratio");

    let dragging = app.cropper.as_ref().is_some_and(|c| c.is_dragging());
    if ui
        .add_enabled(!dragging, egui::Button::new("Apply size"))
        .clicked()
    {
        let clip = ClipSize {
            w,
            h,
            fixed: app.options.clip_size.fixed,
        };
        app.options.clip_size = clip;
        if let Some(ref mut cropper) = app.cropper {
            match cropper.set_crop_size(clip) {
                Ok(()) => {
                    app.viewport.crop_dirty = true;
                    let crop = cropper.crop_size();
                    app.ui_state.pending_clip = Some([crop.width, crop.height]);
                    app.ui_state
                        .add_log(format!("Crop size set to {:.0}x{:.0}", crop.width, crop.height));
                }
                Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
            }
        }
    }
}

fn output_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    section_header(ui, "Output", None);
    ui.add_space(4.0);

    let before = app.options.output.clone();

    egui::ComboBox::from_label("Format")
        .selected_text(app.options.output.mime.as_str())
        .show_ui(ui, |ui| {
            for mime in MIME_TYPES {
                ui.selectable_value(&mut app.options.output.mime, mime.to_string(), mime);
            }
        });

    let lossy = app.options.output.mime == "image/jpeg";
    ui.add_enabled(
        lossy,
        egui::Slider::new(&mut app.options.output.quality, 0.0..=1.0).text("Quality"),
    );

    if app.options.output != before {
        if let Some(ref mut cropper) = app.cropper {
            if let Err(e) = cropper.set_output_options(app.options.output.clone()) {
                app.ui_state.add_log(format!("ERROR: {e}"));
            }
        }
    }
}

fn actions_section(ui: &mut egui::Ui, app: &mut CropperApp) {
    section_header(ui, "Actions", None);
    ui.add_space(4.0);

    let has_session = app.cropper.is_some();
    ui.horizontal(|ui| {
        let path = app.ui_state.file_path.clone();
        if ui
            .add_enabled(path.is_some(), egui::Button::new("Reload"))
            .on_hover_text("Re-open the image with the current options")
            .clicked()
        {
            if let Some(path) = path {
                app.load_path(path);
            }
        }

        if ui
            .add_enabled(has_session, egui::Button::new("Save Crop..."))
            .clicked()
        {
            menu_bar::save_crop(app);
        }
    });
}
