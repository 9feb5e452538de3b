mod app;
mod convert;
mod messages;
mod panels;
mod states;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([900.0, 640.0])
            .with_title("Cropper"),
        ..Default::default()
    };

    eframe::run_native(
        "Cropper",
        options,
        Box::new(|cc| Ok(Box::new(app::CropperApp::new(&cc.egui_ctx)))),
    )
}
