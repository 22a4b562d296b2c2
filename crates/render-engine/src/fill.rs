//! Aspect-fill drawing.
//!
//! The image is scaled by the larger of the two axis ratios so it covers the
//! target rectangle, centred, and the overflow on the longer axis is cropped.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::layout::SlotRect;

/// Placement of a scaled image relative to its target rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillPlacement {
    pub scale: f64,
    /// Left edge of the scaled image relative to the rectangle (≤ 0).
    pub offset_x: f64,
    /// Top edge of the scaled image relative to the rectangle (≤ 0).
    pub offset_y: f64,
    pub draw_width: f64,
    pub draw_height: f64,
}

/// Compute the aspect-fill placement of an `image_w × image_h` image in a
/// `rect_w × rect_h` rectangle. `None` when either has a zero dimension.
pub fn aspect_fill(
    image_w: u32,
    image_h: u32,
    rect_w: u32,
    rect_h: u32,
) -> Option<FillPlacement> {
    if image_w == 0 || image_h == 0 || rect_w == 0 || rect_h == 0 {
        return None;
    }

    let (iw, ih) = (image_w as f64, image_h as f64);
    let (rw, rh) = (rect_w as f64, rect_h as f64);

    let scale = (rw / iw).max(rh / ih);
    let draw_width = iw * scale;
    let draw_height = ih * scale;

    Some(FillPlacement {
        scale,
        offset_x: (rw - draw_width) / 2.0,
        offset_y: (rh - draw_height) / 2.0,
        draw_width,
        draw_height,
    })
}

/// Source-pixel window of an aspect-filled image that ends up visible in
/// the rectangle: `(x, y, width, height)`, centred, clamped to the image.
pub fn visible_window(
    image_w: u32,
    image_h: u32,
    rect_w: u32,
    rect_h: u32,
) -> Option<(u32, u32, u32, u32)> {
    let placement = aspect_fill(image_w, image_h, rect_w, rect_h)?;
    let win_w = ((rect_w as f64 / placement.scale).round() as u32).clamp(1, image_w);
    let win_h = ((rect_h as f64 / placement.scale).round() as u32).clamp(1, image_h);
    Some(((image_w - win_w) / 2, (image_h - win_h) / 2, win_w, win_h))
}

/// Draw `image` into `rect` on `canvas` with aspect-fill, clipped to `rect`.
///
/// Only the visible window of the source is resampled, straight to the
/// rectangle size. Returns `false` when nothing could be drawn (degenerate
/// sizes).
pub fn draw_aspect_fill(canvas: &mut RgbaImage, image: &RgbaImage, rect: SlotRect) -> bool {
    let Some((x, y, w, h)) = visible_window(image.width(), image.height(), rect.width, rect.height)
    else {
        return false;
    };

    let window = imageops::crop_imm(image, x, y, w, h).to_image();
    let visible = if (w, h) == (rect.width, rect.height) {
        window
    } else {
        imageops::resize(&window, rect.width, rect.height, FilterType::CatmullRom)
    };

    imageops::replace(canvas, &visible, rect.x as i64, rect.y as i64);
    true
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn wide_image_is_cropped_horizontally() {
        // 16:9 frame into the 4:3 slot.
        let p = aspect_fill(1920, 1080, 1000, 750).unwrap();
        assert!((p.scale - 750.0 / 1080.0).abs() < 1e-12);
        assert!((p.draw_height - 750.0).abs() < 1e-9);
        assert!(p.draw_width > 1000.0);
        assert!(p.offset_x < 0.0);
        assert!(p.offset_y.abs() < 1e-9);
    }

    #[test]
    fn tall_image_is_cropped_vertically() {
        let p = aspect_fill(600, 1200, 1000, 750).unwrap();
        assert!((p.scale - 1000.0 / 600.0).abs() < 1e-12);
        assert!((p.draw_width - 1000.0).abs() < 1e-9);
        assert!(p.draw_height > 750.0);
        assert!(p.offset_y < 0.0);
    }

    #[test]
    fn degenerate_sizes_have_no_placement() {
        assert!(aspect_fill(0, 10, 10, 10).is_none());
        assert!(aspect_fill(10, 10, 10, 0).is_none());
    }

    #[test]
    fn draw_fills_rect_and_leaves_outside_untouched() {
        let white = Rgba([255, 255, 255, 255]);
        let red = Rgba([200, 20, 20, 255]);
        let mut canvas = RgbaImage::from_pixel(120, 120, white);
        let photo = RgbaImage::from_pixel(160, 90, red);
        let rect = SlotRect::new(10, 20, 100, 75);

        assert!(draw_aspect_fill(&mut canvas, &photo, rect));

        for (x, y, px) in canvas.enumerate_pixels() {
            if rect.contains(x, y) {
                assert_eq!(*px, red, "inside pixel ({x},{y}) not covered");
            } else {
                assert_eq!(*px, white, "outside pixel ({x},{y}) was drawn");
            }
        }
    }

    #[test]
    fn draw_keeps_the_centre_of_the_source() {
        // Left and right thirds green, middle third blue; a square slot keeps
        // only the middle of a 3:1 image.
        let mut photo = RgbaImage::from_pixel(300, 100, Rgba([0, 200, 0, 255]));
        for y in 0..100 {
            for x in 100..200 {
                photo.put_pixel(x, y, Rgba([0, 0, 200, 255]));
            }
        }
        let mut canvas = RgbaImage::new(50, 50);
        assert!(draw_aspect_fill(&mut canvas, &photo, SlotRect::new(0, 0, 50, 50)));

        let centre = canvas.get_pixel(25, 25);
        assert!(centre[2] > 150 && centre[1] < 50);
    }

    #[test]
    fn window_of_a_wide_frame_is_its_centre() {
        // 16:9 into 4:3 keeps a 1440x1080 window, 240 px in from each side.
        assert_eq!(visible_window(1920, 1080, 1000, 750), Some((240, 0, 1440, 1080)));
    }

    #[test]
    fn extreme_aspect_ratio_never_scales_the_whole_source() {
        // A 20x2000 sliver needs scale 50; only a 20x15 window is resampled.
        assert_eq!(visible_window(20, 2000, 1000, 750), Some((0, 992, 20, 15)));

        let mut photo = RgbaImage::from_pixel(20, 2000, Rgba([0, 0, 200, 255]));
        for y in 990..1010 {
            for x in 0..20 {
                photo.put_pixel(x, y, Rgba([200, 0, 0, 255]));
            }
        }
        let mut canvas = RgbaImage::from_pixel(1200, 1000, Rgba([255, 255, 255, 255]));
        let rect = SlotRect::new(100, 100, 1000, 750);

        let started = std::time::Instant::now();
        assert!(draw_aspect_fill(&mut canvas, &photo, rect));
        assert!(
            started.elapsed() < std::time::Duration::from_secs(5),
            "draw took {:?}",
            started.elapsed()
        );

        assert_eq!(canvas.dimensions(), (1200, 1000));
        let centre = canvas.get_pixel(600, 475);
        assert!(centre[0] > 150 && centre[2] < 50, "centre rows expected: {centre:?}");
        assert_eq!(*canvas.get_pixel(50, 50), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(600, 900), Rgba([255, 255, 255, 255]));
    }

    proptest! {
        #[test]
        fn fill_covers_rect_on_one_axis_and_overlaps_the_other(
            iw in 1u32..4000,
            ih in 1u32..4000,
            rw in 1u32..2000,
            rh in 1u32..2000,
        ) {
            let p = aspect_fill(iw, ih, rw, rh).unwrap();
            let expected = (rw as f64 / iw as f64).max(rh as f64 / ih as f64);
            prop_assert!((p.scale - expected).abs() <= expected * 1e-12);

            let eps = 1e-6 * (rw.max(rh) as f64);
            prop_assert!(p.draw_width >= rw as f64 - eps);
            prop_assert!(p.draw_height >= rh as f64 - eps);
            let exact_w = (p.draw_width - rw as f64).abs() <= eps;
            let exact_h = (p.draw_height - rh as f64).abs() <= eps;
            prop_assert!(exact_w || exact_h);

            // Centred: equal overflow on both sides of each axis.
            prop_assert!((p.offset_x * 2.0 + p.draw_width - rw as f64).abs() <= eps);
            prop_assert!((p.offset_y * 2.0 + p.draw_height - rh as f64).abs() <= eps);

            let (x, y, w, h) = visible_window(iw, ih, rw, rh).unwrap();
            prop_assert!(w >= 1 && h >= 1 && x + w <= iw && y + h <= ih);
            prop_assert!(x.abs_diff(iw - x - w) <= 1 && y.abs_diff(ih - y - h) <= 1);
        }
    }
}
