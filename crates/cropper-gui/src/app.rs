use std::path::PathBuf;
use std::sync::mpsc;

use cropper_core::config::CropperOptions;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::Size;
use cropper_core::io::loader::FileSource;
use cropper_core::surface::Surface;

use crate::convert::rgba_to_color_image;
use crate::messages::AppMessage;
use crate::panels;
use crate::states::{UIState, ViewportState};

pub struct CropperApp {
    pub msg_tx: mpsc::Sender<AppMessage>,
    pub msg_rx: mpsc::Receiver<AppMessage>,
    pub ctx: egui::Context,
    pub cropper: Option<Cropper>,
    /// Options used for the next session that is opened.
    pub options: CropperOptions,
    pub ui_state: UIState,
    pub viewport: ViewportState,
}

impl CropperApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            msg_tx,
            msg_rx,
            ctx: ctx.clone(),
            cropper: None,
            options: CropperOptions::default(),
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
        }
    }

    /// Drain all pending messages from background threads.
    fn poll_messages(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            match msg {
                AppMessage::Loaded { path, cropper } => {
                    let board = cropper.board().size();
                    self.ui_state.add_log(format!(
                        "Opened: {} (board {}x{}, {})",
                        path.display(),
                        board.width,
                        board.height,
                        cropper.options().show_type
                    ));
                    self.ui_state.file_path = Some(path);
                    self.ui_state.pending_clip = None;
                    self.install_session(ctx, *cropper);
                }
                AppMessage::OptionsImported { options } => {
                    self.options = options;
                    self.ui_state
                        .add_log("Options imported; reload the image to apply".into());
                }
                AppMessage::Saved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                AppMessage::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    fn install_session(&mut self, ctx: &egui::Context, cropper: Cropper) {
        let board = rgba_to_color_image(cropper.board().display());
        self.viewport.board_texture =
            Some(ctx.load_texture("board", board, egui::TextureOptions::LINEAR));
        self.viewport.crop_texture = None;
        self.viewport.crop_dirty = true;
        self.cropper = Some(cropper);
    }

    /// Re-upload the crop surface if the last interaction redrew it.
    fn sync_crop_texture(&mut self, ctx: &egui::Context) {
        if !self.viewport.crop_dirty {
            return;
        }
        let Some(ref cropper) = self.cropper else {
            return;
        };
        let image = rgba_to_color_image(cropper.surface().pixels());
        match self.viewport.crop_texture {
            Some(ref mut texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.viewport.crop_texture =
                    Some(ctx.load_texture("crop", image, egui::TextureOptions::NEAREST));
            }
        }
        self.viewport.crop_dirty = false;
    }

    /// Open `path` on a background thread with the current options.
    pub fn load_path(&self, path: PathBuf) {
        let tx = self.msg_tx.clone();
        let ctx = self.ctx.clone();
        let options = self.options.clone();
        let container = self.viewport.container();
        std::thread::spawn(move || load_session(&tx, &ctx, container, path, options));
    }
}

/// Initialize a cropper for `path` and report the result. Blocks; call from a
/// worker thread.
pub fn load_session(
    tx: &mpsc::Sender<AppMessage>,
    ctx: &egui::Context,
    container: Size,
    path: PathBuf,
    options: CropperOptions,
) {
    let source = FileSource::new(&path);
    let msg = match pollster::block_on(Cropper::initialize(container, &source, options)) {
        Ok(cropper) => AppMessage::Loaded {
            path,
            cropper: Box::new(cropper),
        },
        Err(e) => AppMessage::Error {
            message: format!("Failed to open {}: {e}", path.display()),
        },
    };
    let _ = tx.send(msg);
    ctx.request_repaint();
}

impl eframe::App for CropperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.sync_crop_texture(ctx);

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About Cropper")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Cropper");
                        ui.label("Pan-and-resize image cropping");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
