use cropper_core::config::CropperOptions;
use cropper_core::io::encode::OutputFormat;

use crate::app::{load_session, CropperApp};
use crate::messages::AppMessage;

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app);
                }

                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                if ui.add(egui::Button::new("Save Crop As...").shortcut_text(ctx.format_shortcut(&save_shortcut))).clicked() {
                    ui.close();
                    save_crop(app);
                }

                ui.separator();

                if ui.button("Import Options...").clicked() {
                    ui.close();
                    import_options(app);
                }

                if ui.button("Export Options...").clicked() {
                    ui.close();
                    export_options(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Options").clicked() {
                    ui.close();
                    app.options = CropperOptions::default();
                    app.ui_state.add_log("Options reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            save_crop(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub fn open_file(app: &CropperApp) {
    let tx = app.msg_tx.clone();
    let ctx = app.ctx.clone();
    let options = app.options.clone();
    let container = app.viewport.container();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            load_session(&tx, &ctx, container, path, options);
        }
    });
}

pub fn save_crop(app: &mut CropperApp) {
    let Some(ref mut cropper) = app.cropper else {
        app.ui_state.add_log("Nothing to save: open an image first".into());
        return;
    };
    let artifact = match pollster::block_on(cropper.crop_artifact()) {
        Ok(artifact) => artifact,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
    };
    let (name, extension) = match OutputFormat::from_mime(&artifact.mime) {
        Ok(format) => (format!("crop.{}", format.extension()), format.extension()),
        Err(_) => ("crop.png".to_string(), "png"),
    };

    let tx = app.msg_tx.clone();
    let ctx = app.ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter(&artifact.mime, &[extension])
            .set_file_name(&name)
            .save_file()
        {
            let msg = match std::fs::write(&path, &artifact.bytes) {
                Ok(()) => AppMessage::Saved { path },
                Err(e) => AppMessage::Error {
                    message: format!("Failed to write {}: {e}", path.display()),
                },
            };
            let _ = tx.send(msg);
            ctx.request_repaint();
        }
    });
}

fn import_options(app: &CropperApp) {
    let tx = app.msg_tx.clone();
    let ctx = app.ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
            return;
        };
        let msg = match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str::<CropperOptions>(&content).map_err(|e| e.to_string()))
        {
            Ok(options) => AppMessage::OptionsImported { options },
            Err(e) => AppMessage::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        let _ = tx.send(msg);
        ctx.request_repaint();
    });
}

fn export_options(app: &CropperApp) {
    let options = app.options.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("cropper.toml")
            .save_file()
        {
            if let Ok(content) = toml::to_string_pretty(&options) {
                let _ = std::fs::write(path, content);
            }
        }
    });
}
