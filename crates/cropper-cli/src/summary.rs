use std::path::Path;

use console::Style;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::{FitStrategy, Span};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

fn span(s: &Span) -> String {
    format!("[{:.1}, {:.1}]", s.min, s.max)
}

pub fn print_session_summary(cropper: &Cropper, source: &Path) {
    let s = Styles::new();
    let fit = cropper.board().fit();
    let container = cropper.container();
    let board = cropper.board().size();
    let offset = cropper.offset();
    let crop = cropper.crop_size();
    let window = cropper.crop_window();
    let range = cropper.pan_range();
    let options = cropper.options();

    println!();
    println!("  {}", s.title.apply_to("Cropper Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.path.apply_to(source.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Container"),
        s.value.apply_to(format!("{}x{}", container.width, container.height))
    );
    let strategy = match fit.strategy {
        FitStrategy::FitWidth => "fit width",
        FitStrategy::FitHeight => "fit height",
    };
    println!(
        "  {:<14}{} ({})",
        s.label.apply_to("Display"),
        s.method.apply_to(options.show_type),
        strategy
    );
    println!();

    println!("  {}", s.header.apply_to("Board"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{}x{}", board.width, board.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Offset"),
        s.value.apply_to(format!("({:.1}, {:.1})", offset.x, offset.y))
    );
    println!(
        "    {:<12}{} x {}",
        s.label.apply_to("Pan range"),
        span(&range.x),
        span(&range.y)
    );
    println!();

    println!("  {}", s.header.apply_to("Crop"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value
            .apply_to(format!("{:.1}x{:.1}", crop.width, crop.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Window"),
        s.value
            .apply_to(format!("({:.1}, {:.1})", window.x, window.y))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Aspect"),
        s.method
            .apply_to(if crop.aspect_locked { "locked" } else { "free" })
    );
    println!(
        "    {:<12}{} @ {:.2}",
        s.label.apply_to("Output"),
        s.method.apply_to(&options.output.mime),
        options.output.quality
    );
    println!();
}
