//! The crop widget: owns the board, the crop surface and the gesture session,
//! and re-runs the render pipeline after every offset or crop-size change.

use tracing::{debug, info};

use crate::config::{ClipSize, CropperOptions, OutputOptions};
use crate::error::{CropperError, Result};
use crate::geometry::{
    crop_window, fit_image, pan_range, CropSize, Handle, PanRange, Point, Rect, Size,
};
use crate::gesture::{Gesture, HitTarget, Session};
use crate::io::encode::{decode_data_url, encode_data_url, CropArtifact};
use crate::io::loader::ImageSource;
use crate::render::{render_crop, Board, RenderOutcome};
use crate::surface::{RasterSurface, Surface};

pub struct Cropper<S: Surface = RasterSurface> {
    container: Size,
    options: CropperOptions,
    board: Board,
    /// Committed board translation; always inside `pan_range`.
    offset: Point,
    crop: CropSize,
    pan_range: PanRange,
    window: Rect,
    session: Session,
    surface: S,
    artifact: Option<CropArtifact>,
}

impl Cropper<RasterSurface> {
    /// Load the source, fit it into `container`, rasterize the board and do
    /// the first render. No pointer input is accepted before this resolves.
    pub async fn initialize(
        container: Size,
        source: &impl ImageSource,
        options: CropperOptions,
    ) -> Result<Self> {
        Self::initialize_with_surface(container, source, options, RasterSurface::default()).await
    }
}

impl<S: Surface> Cropper<S> {
    pub async fn initialize_with_surface(
        container: Size,
        source: &impl ImageSource,
        options: CropperOptions,
        surface: S,
    ) -> Result<Self> {
        if !container.is_valid() {
            return Err(CropperError::InvalidDimensions {
                width: container.width,
                height: container.height,
            });
        }
        options.validate()?;

        let image = source.load().await?;
        let image_size = Size::new(image.width() as f64, image.height() as f64);
        let fit = fit_image(container, image_size, options.show_type);
        let board = Board::rasterize(&image, fit)?;

        let crop = options.clip_size.to_crop_size().floored();
        let range = pan_range(container, crop.size(), board.size());

        let mut cropper = Self {
            container,
            options,
            board,
            offset: fit.offset,
            crop,
            pan_range: range,
            window: crop_window(container, crop.size()),
            session: Session::default(),
            surface,
            artifact: None,
        };
        cropper.render();

        info!(
            container = %container,
            image = %image_size,
            board = %cropper.board.size(),
            mode = %cropper.options.show_type,
            "Cropper initialized"
        );
        Ok(cropper)
    }

    /// Recompute the pan range for the current crop size, pull the offset
    /// back inside it and redraw the crop surface.
    pub fn render(&mut self) -> RenderOutcome {
        self.pan_range = pan_range(self.container, self.crop.size(), self.board.size());
        self.offset = self.pan_range.clamp(self.offset);

        let outcome = render_crop(
            &mut self.surface,
            &self.board,
            self.container,
            self.crop.size(),
            self.offset,
        );
        self.window = outcome.window;
        outcome
    }

    /// Classify a container-space point: handles first, then the crop
    /// window, then the visible part of the board.
    pub fn hit_test(&self, at: Point) -> HitTarget {
        if let Some(handle) = Handle::ALL
            .into_iter()
            .find(|h| h.hit_box(&self.window).contains(at))
        {
            return HitTarget::Handle(handle);
        }
        if self.window.contains(at) {
            return HitTarget::CropWindow;
        }
        let container = Rect::from_min_size(Point::ZERO, self.container);
        let on_board = self
            .board_rect()
            .intersect(&container)
            .is_some_and(|visible| visible.contains(at));
        if on_board {
            HitTarget::Board
        } else {
            HitTarget::Outside
        }
    }

    pub fn pointer_down(&mut self, at: Point) -> HitTarget {
        let target = self.hit_test(at);
        self.session.press(target, at, self.offset, self.crop);
        target
    }

    /// Feed a pointer position. Returns `true` if geometry changed and the
    /// crop surface was redrawn; moves with no active gesture are ignored.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        match *self.session.gesture() {
            Gesture::Idle => false,
            Gesture::Panning(drag) => {
                let next = drag.update(at, &self.pan_range);
                if next == self.offset {
                    return false;
                }
                self.offset = next;
                self.render();
                true
            }
            Gesture::Resizing(drag) => {
                let next = drag.update(at);
                if next == self.crop {
                    return false;
                }
                self.crop = next;
                self.render();
                true
            }
        }
    }

    /// Finish the gesture; the committed offset and size become the
    /// reference for the next one.
    pub fn pointer_up(&mut self) -> Gesture {
        let ended = self.session.release();
        if !matches!(ended, Gesture::Idle) {
            debug!(
                offset_x = self.offset.x,
                offset_y = self.offset.y,
                crop_w = self.crop.width,
                crop_h = self.crop.height,
                "Gesture committed"
            );
        }
        ended
    }

    /// Replace the crop size outside of a gesture.
    pub fn set_crop_size(&mut self, clip: ClipSize) -> Result<()> {
        if self.session.is_active() {
            return Err(CropperError::GestureInProgress);
        }
        let options = CropperOptions {
            clip_size: clip,
            ..self.options.clone()
        };
        options.validate()?;
        self.options = options;
        self.crop = clip.to_crop_size().floored();
        self.render();
        Ok(())
    }

    /// Replace the encoder settings used by the next artifact.
    pub fn set_output_options(&mut self, output: OutputOptions) -> Result<()> {
        output.validate()?;
        debug!(mime = %output.mime, quality = output.quality, "Output options updated");
        self.options.output = output;
        Ok(())
    }

    /// Encode the last rendered crop surface.
    pub async fn crop_artifact(&mut self) -> Result<CropArtifact> {
        if self.session.is_active() {
            return Err(CropperError::GestureInProgress);
        }
        let data_url = encode_data_url(&self.surface, &self.options.output)?;
        let artifact = decode_data_url(&data_url).await?;
        info!(
            mime = %artifact.mime,
            bytes = artifact.bytes.len(),
            width = self.surface.width(),
            height = self.surface.height(),
            "Crop artifact produced"
        );
        self.artifact = Some(artifact.clone());
        Ok(artifact)
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn options(&self) -> &CropperOptions {
        &self.options
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board placement in container coordinates.
    pub fn board_rect(&self) -> Rect {
        Rect::from_min_size(self.offset, self.board.size())
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn crop_size(&self) -> CropSize {
        self.crop
    }

    pub fn pan_range(&self) -> PanRange {
        self.pan_range
    }

    pub fn crop_window(&self) -> Rect {
        self.window
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    /// Artifact from the most recent [`Cropper::crop_artifact`] call.
    pub fn last_artifact(&self) -> Option<&CropArtifact> {
        self.artifact.as_ref()
    }
}
