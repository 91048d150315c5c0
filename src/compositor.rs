//! Preview compositing: scale-to-fit, dark-pixel material blend, letterbox placement

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Channel sum below which a pixel counts as dark: mean(R, G, B) < 128.
const DARK_SUM_LIMIT: u32 = 128 * 3;

/// Where the scaled design lands on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub draw_width: f32,
    pub draw_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    buffer_width: u32,
    buffer_height: u32,
}

impl Placement {
    /// Integer size of the intermediate buffer (fractions truncated, never empty).
    pub fn buffer_size(&self) -> (u32, u32) {
        (self.buffer_width, self.buffer_height)
    }

    pub fn origin(&self) -> (i64, i64) {
        (self.offset_x.round() as i64, self.offset_y.round() as i64)
    }
}

/// Fit an image into the surface preserving aspect ratio, centered on the free axis.
///
/// Ratios are compared by cross-multiplying and the scaled side is truncated in
/// integer arithmetic, so exact fits like 1280x600 -> 544x255 never lose a row.
pub fn fit_to_surface(image_w: u32, image_h: u32, surface_w: u32, surface_h: u32) -> Placement {
    let (iw, ih) = (u64::from(image_w.max(1)), u64::from(image_h.max(1)));
    let (sw, sh) = (u64::from(surface_w), u64::from(surface_h));

    if sw * ih > iw * sh {
        let draw_width = sh as f64 * iw as f64 / ih as f64;
        Placement {
            draw_width: draw_width as f32,
            draw_height: surface_h as f32,
            offset_x: ((sw as f64 - draw_width) / 2.0) as f32,
            offset_y: 0.0,
            buffer_width: ((sh * iw / ih) as u32).max(1),
            buffer_height: surface_h.max(1),
        }
    } else {
        let draw_height = sw as f64 * ih as f64 / iw as f64;
        Placement {
            draw_width: surface_w as f32,
            draw_height: draw_height as f32,
            offset_x: 0.0,
            offset_y: ((sh as f64 - draw_height) / 2.0) as f32,
            buffer_width: surface_w.max(1),
            buffer_height: ((sw * ih / iw) as u32).max(1),
        }
    }
}

fn scale_to(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        img.clone()
    } else {
        imageops::resize(img, width, height, FilterType::Triangle)
    }
}

pub fn is_dark(px: &Rgba<u8>) -> bool {
    (px[0] as u32 + px[1] as u32 + px[2] as u32) < DARK_SUM_LIMIT
}

/// Average dark design pixels 50/50 with the material; bright pixels and alpha are untouched.
/// Both buffers must have the same dimensions.
pub fn blend_dark_pixels(design: &mut RgbaImage, material: &RgbaImage) {
    debug_assert_eq!(design.dimensions(), material.dimensions());
    for (d, m) in design.pixels_mut().zip(material.pixels()) {
        if is_dark(d) {
            for c in 0..3 {
                d[c] = ((d[c] as u16 + m[c] as u16 + 1) / 2) as u8;
            }
        }
    }
}

/// A fully rendered surface
pub struct Frame {
    pub image: RgbaImage,
    pub placement: Placement,
}

/// Render the design (and optional material) onto a transparent surface.
pub fn compose(
    design: &RgbaImage,
    material: Option<&RgbaImage>,
    surface_w: u32,
    surface_h: u32,
) -> Frame {
    let placement = fit_to_surface(design.width(), design.height(), surface_w, surface_h);
    let (w, h) = placement.buffer_size();

    let mut layer = scale_to(design, w, h);
    if let Some(material) = material {
        let material = scale_to(material, w, h);
        blend_dark_pixels(&mut layer, &material);
    }

    let mut image = RgbaImage::new(surface_w, surface_h);
    let (x, y) = placement.origin();
    imageops::replace(&mut image, &layer, x, y);

    Frame { image, placement }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solid;

    #[test]
    fn wide_image_fits_width_and_centers_vertically() {
        let p = fit_to_surface(544, 272, 544, 544);
        assert_eq!(p.draw_width, 544.0);
        assert_eq!(p.draw_height, 272.0);
        assert_eq!(p.offset_x, 0.0);
        assert_eq!(p.offset_y, 136.0);
    }

    #[test]
    fn tall_image_fits_height_and_centers_horizontally() {
        let p = fit_to_surface(100, 400, 544, 544);
        assert_eq!(p.draw_height, 544.0);
        assert_eq!(p.draw_width, 136.0);
        assert_eq!(p.offset_x, 204.0);
        assert_eq!(p.offset_y, 0.0);
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        for &(w, h) in &[(1, 1), (3, 7), (1920, 1080), (13, 5), (640, 641)] {
            let p = fit_to_surface(w, h, 544, 544);
            let ratio = w as f32 / h as f32;
            assert!((p.draw_width / p.draw_height - ratio).abs() < 1e-3, "{w}x{h}");
            assert!((p.draw_width.max(p.draw_height) - 544.0).abs() < 1e-3);
        }
    }

    #[test]
    fn buffer_size_is_exact_for_whole_number_fits() {
        assert_eq!(fit_to_surface(1280, 600, 544, 544).buffer_size(), (544, 255));
        assert_eq!(fit_to_surface(640, 600, 544, 544).buffer_size(), (544, 510));
        assert_eq!(fit_to_surface(1152, 1080, 544, 544).buffer_size(), (544, 510));
        assert_eq!(fit_to_surface(8, 7, 544, 544).buffer_size(), (544, 476));
        assert_eq!(fit_to_surface(600, 1280, 544, 544).buffer_size(), (255, 544));
        // 544 * 1080 / 1920 = 306.0
        assert_eq!(fit_to_surface(1920, 1080, 544, 544).buffer_size(), (544, 306));
    }

    #[test]
    fn buffer_size_truncates_fractional_fits() {
        // 544 * 5 / 13 = 209.23
        assert_eq!(fit_to_surface(13, 5, 544, 544).buffer_size(), (544, 209));
        assert_eq!(fit_to_surface(10_000, 1, 544, 544).buffer_size(), (544, 1));
    }

    #[test]
    fn compose_fills_the_fitted_area_without_a_seam() {
        let design = solid(1280, 600, [9, 9, 9, 255]);
        let frame = compose(&design, None, 544, 544);
        // (544 - 255) / 2 = 144.5 rounds to 145; rows 145..=399 are covered
        assert_eq!(frame.placement.origin(), (0, 145));
        assert_eq!(frame.image.get_pixel(0, 144).0, [0, 0, 0, 0]);
        assert_eq!(frame.image.get_pixel(0, 145).0, [9, 9, 9, 255]);
        assert_eq!(frame.image.get_pixel(543, 399).0, [9, 9, 9, 255]);
        assert_eq!(frame.image.get_pixel(543, 400).0, [0, 0, 0, 0]);
    }

    #[test]
    fn dark_pixel_is_averaged_with_material() {
        let mut design = solid(1, 1, [0, 0, 0, 255]);
        let material = solid(1, 1, [200, 200, 200, 255]);
        blend_dark_pixels(&mut design, &material);
        assert_eq!(design.get_pixel(0, 0).0, [100, 100, 100, 255]);
    }

    #[test]
    fn bright_pixels_and_alpha_are_untouched() {
        let mut design = RgbaImage::from_raw(
            3,
            1,
            vec![
                128, 128, 128, 255, // mean exactly 128
                255, 0, 130, 40, // mean 128.3
                127, 128, 128, 7, // mean 127.67, dark
            ],
        )
        .unwrap();
        let material = solid(3, 1, [0, 50, 255, 0]);
        blend_dark_pixels(&mut design, &material);
        assert_eq!(design.get_pixel(0, 0).0, [128, 128, 128, 255]);
        assert_eq!(design.get_pixel(1, 0).0, [255, 0, 130, 40]);
        assert_eq!(design.get_pixel(2, 0).0, [64, 89, 192, 7]);
    }

    #[test]
    fn blend_rounds_halves_up() {
        let mut design = solid(1, 1, [1, 2, 3, 255]);
        let material = solid(1, 1, [0, 0, 0, 255]);
        blend_dark_pixels(&mut design, &material);
        assert_eq!(design.get_pixel(0, 0).0, [1, 1, 2, 255]);
    }

    #[test]
    fn compose_without_material_letterboxes_design_unmodified() {
        let mut design = RgbaImage::new(544, 272);
        for (x, y, px) in design.enumerate_pixels_mut() {
            *px = Rgba([(x % 256) as u8, (y % 256) as u8, 10, 255]);
        }
        let frame = compose(&design, None, 544, 544);
        assert_eq!(frame.image.dimensions(), (544, 544));
        assert_eq!(frame.placement.origin(), (0, 136));
        assert_eq!(frame.image.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(frame.image.get_pixel(543, 135).0, [0, 0, 0, 0]);
        assert_eq!(frame.image.get_pixel(0, 408).0, [0, 0, 0, 0]);
        for (x, y, px) in design.enumerate_pixels() {
            assert_eq!(frame.image.get_pixel(x, y + 136), px);
        }
    }

    #[test]
    fn compose_blends_only_dark_design_pixels() {
        let mut design = solid(544, 272, [250, 250, 250, 255]);
        design.put_pixel(10, 20, Rgba([0, 0, 0, 255]));
        let material = solid(8, 8, [200, 200, 200, 255]);
        let frame = compose(&design, Some(&material), 544, 544);
        assert_eq!(frame.image.get_pixel(10, 20 + 136).0, [100, 100, 100, 255]);
        assert_eq!(frame.image.get_pixel(11, 20 + 136).0, [250, 250, 250, 255]);
    }

    #[test]
    fn compose_scales_small_designs_up() {
        let design = solid(2, 4, [5, 5, 5, 255]);
        let frame = compose(&design, None, 544, 544);
        assert_eq!(frame.placement.buffer_size(), (272, 544));
        assert_eq!(frame.placement.origin(), (136, 0));
        assert_eq!(frame.image.get_pixel(135, 300).0, [0, 0, 0, 0]);
        assert_eq!(frame.image.get_pixel(136, 300).0, [5, 5, 5, 255]);
        assert_eq!(frame.image.get_pixel(407, 300).0, [5, 5, 5, 255]);
        assert_eq!(frame.image.get_pixel(408, 300).0, [0, 0, 0, 0]);
    }
}
