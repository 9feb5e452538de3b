use cropper_core::consts::MASK_COLOR;
use image::RgbaImage;

/// Convert straight-alpha RGBA pixels to an egui ColorImage.
pub fn rgba_to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let (w, h) = image.dimensions();
    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], image.as_raw())
}

/// The board mask color, also used for the container background.
pub fn mask_color() -> egui::Color32 {
    let [r, g, b, a] = MASK_COLOR;
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_color_matches_board_mask() {
        let c = mask_color();
        assert_eq!(c.a(), MASK_COLOR[3]);
        assert_eq!((c.r(), c.g(), c.b()), (0, 0, 0));
    }

    #[test]
    fn test_color_image_keeps_dimensions() {
        let img = RgbaImage::new(3, 2);
        assert_eq!(rgba_to_color_image(&img).size, [3, 2]);
    }
}
