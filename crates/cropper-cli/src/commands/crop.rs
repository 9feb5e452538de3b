use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Args;
use cropper_core::consts::HANDLE_HIT_RADIUS;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::{Handle, Point};
use cropper_core::gesture::HitTarget;
use cropper_core::io::encode::OutputFormat;

use tracing::debug;

use super::SessionArgs;

/// One scripted pointer gesture. Deltas are raw pointer travel in container
/// pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureArg {
    /// `pan:DX,DY`: drag from the crop window center.
    Pan { dx: f64, dy: f64 },
    /// `resize:HANDLE:DX,DY`: drag a corner handle.
    Resize { handle: Handle, dx: f64, dy: f64 },
}

impl FromStr for GestureArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            ["pan", delta] => {
                let (dx, dy) = parse_delta(delta)?;
                Ok(Self::Pan { dx, dy })
            }
            ["resize", handle, delta] => {
                let handle = handle.parse::<Handle>().map_err(|e| e.to_string())?;
                let (dx, dy) = parse_delta(delta)?;
                Ok(Self::Resize { handle, dx, dy })
            }
            _ => Err(format!(
                "expected 'pan:DX,DY' or 'resize:HANDLE:DX,DY', got '{s}'"
            )),
        }
    }
}

fn parse_delta(s: &str) -> std::result::Result<(f64, f64), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
    let dx = dx.trim().parse().map_err(|_| format!("invalid dx '{dx}'"))?;
    let dy = dy.trim().parse().map_err(|_| format!("invalid dy '{dy}'"))?;
    Ok((dx, dy))
}

#[derive(Args)]
pub struct CropArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output file (auto-generated if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Gesture to replay, in order (repeatable): pan:DX,DY or
    /// resize:top-left|bottom-left|top-right|bottom-right:DX,DY
    #[arg(short, long = "gesture", value_parser = GestureArg::from_str)]
    pub gestures: Vec<GestureArg>,

    /// Also print the base64 data URL to stdout
    #[arg(long)]
    pub data_url: bool,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let mut cropper = args.session.open()?;

    for gesture in &args.gestures {
        replay(&mut cropper, gesture)?;
    }

    let artifact = pollster::block_on(cropper.crop_artifact())?;
    let crop = cropper.crop_size();
    let format = OutputFormat::from_mime(&artifact.mime)?;

    let output_path = args.output.clone().unwrap_or_else(|| {
        crop_output_path(
            &args.session.file,
            crop.width as u32,
            crop.height as u32,
            format.extension(),
        )
    });
    std::fs::write(&output_path, &artifact.bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    crate::summary::print_session_summary(&cropper, &args.session.file);
    println!("Saved to {}", output_path.display());
    if args.data_url {
        println!("{}", artifact.data_url);
    }
    Ok(())
}

/// Drive one pointer down/move/up sequence through the widget.
fn replay(cropper: &mut Cropper, gesture: &GestureArg) -> Result<()> {
    debug!(?gesture, "Replaying gesture");
    let window = cropper.crop_window();
    match *gesture {
        GestureArg::Pan { dx, dy } => {
            let Some(start) = pan_start(cropper) else {
                bail!("No pannable point: handles cover the crop window and the board is not reachable");
            };
            let target = cropper.pointer_down(start);
            if !matches!(target, HitTarget::CropWindow | HitTarget::Board) {
                cropper.pointer_up();
                bail!("Pan did not start on the crop window or board (hit {target:?})");
            }
            cropper.pointer_move(start + Point::new(dx, dy));
        }
        GestureArg::Resize { handle, dx, dy } => {
            let start = handle.corner(&window);
            let target = cropper.pointer_down(start);
            if target != HitTarget::Handle(handle) {
                cropper.pointer_up();
                bail!("Handle {handle} is not reachable (hit {target:?})");
            }
            cropper.pointer_move(start + Point::new(dx, dy));
        }
    }
    cropper.pointer_up();
    Ok(())
}

/// A press point that starts a pan. The window center is preferred; when the
/// handle hit boxes cover it (small crops), try the board just outside each
/// window edge, beyond handle reach.
fn pan_start(cropper: &Cropper) -> Option<Point> {
    let window = cropper.crop_window();
    let center = Point::new(window.x + window.width / 2.0, window.y + window.height / 2.0);
    let reach = HANDLE_HIT_RADIUS + 1.0;
    let candidates = [
        center,
        Point::new(window.x - reach, center.y),
        Point::new(window.right() + reach, center.y),
        Point::new(center.x, window.y - reach),
        Point::new(center.x, window.bottom() + reach),
    ];
    candidates.into_iter().find(|&p| {
        matches!(
            cropper.hit_test(p),
            HitTarget::CropWindow | HitTarget::Board
        )
    })
}

fn crop_output_path(source: &Path, w: u32, h: u32, ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let parent = source.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_crop{w}x{h}.{ext}"))
}
