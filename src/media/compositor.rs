// SPDX-License-Identifier: MPL-2.0
//! Offscreen compositing of the photo and hat into a square output.
//!
//! The editor works in a fixed square box of [`EDIT_BOX_SIZE`] units. The
//! photo is letterboxed inside that box, and the hat transform is expressed
//! in box units. Rendering scales everything by `output / EDIT_BOX_SIZE`.

use super::image::rgba_from_pixmap;
use crate::app::config::{EDIT_BOX_SIZE, THUMBNAIL_JPEG_QUALITY, THUMBNAIL_SIZE};
use crate::editor::HatTransform;
use crate::error::{Error, Result};
use base64::{engine::general_purpose, Engine as _};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, RgbImage};
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

/// Scale that fits an image of the given size inside the editing box.
#[must_use]
pub fn fit_ratio(width: u32, height: u32) -> f32 {
    (EDIT_BOX_SIZE / width as f32).min(EDIT_BOX_SIZE / height as f32)
}

/// Placement of the photo inside an output canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Box units to output pixels.
    pub box_scale: f32,
    /// Image pixels to output pixels.
    pub draw_ratio: f32,
    pub draw_width: f32,
    pub draw_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Layout {
    #[must_use]
    pub fn new(image_width: u32, image_height: u32, output_size: u32) -> Self {
        let output = output_size as f32;
        let box_scale = output / EDIT_BOX_SIZE;
        let draw_ratio = fit_ratio(image_width, image_height) * box_scale;
        let draw_width = image_width as f32 * draw_ratio;
        let draw_height = image_height as f32 * draw_ratio;

        Self {
            box_scale,
            draw_ratio,
            draw_width,
            draw_height,
            offset_x: (output - draw_width) / 2.0,
            offset_y: (output - draw_height) / 2.0,
        }
    }

    fn image_transform(&self) -> Transform {
        Transform::from_row(
            self.draw_ratio,
            0.0,
            0.0,
            self.draw_ratio,
            self.offset_x,
            self.offset_y,
        )
    }

    /// Maps overlay pixels onto the hat's box, rotated about its center.
    fn overlay_transform(&self, hat: &HatTransform, overlay: &Pixmap) -> Transform {
        let (center_x, center_y) = hat.center();
        let scale_x = hat.width * self.box_scale / overlay.width() as f32;
        let scale_y = hat.height * self.box_scale / overlay.height() as f32;

        Transform::from_translate(center_x * self.box_scale, center_y * self.box_scale)
            .pre_concat(Transform::from_rotate(hat.normalized_rotation()))
            .pre_concat(Transform::from_scale(scale_x, scale_y))
            .pre_concat(Transform::from_translate(
                -(overlay.width() as f32) / 2.0,
                -(overlay.height() as f32) / 2.0,
            ))
    }
}

/// Renders the photo letterboxed and the hat on top into a square canvas.
///
/// # Errors
///
/// Returns [`Error::Canvas`] when the canvas cannot be allocated or the
/// photo has no pixels.
pub fn render(
    image: &Pixmap,
    hat: &HatTransform,
    overlay: &Pixmap,
    output_size: u32,
) -> Result<Pixmap> {
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::Canvas("image has no pixels".into()));
    }
    let mut canvas = Pixmap::new(output_size, output_size).ok_or_else(|| {
        Error::Canvas(format!("cannot allocate {output_size}x{output_size} canvas"))
    })?;

    let layout = Layout::new(image.width(), image.height(), output_size);
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };

    canvas.draw_pixmap(0, 0, image.as_ref(), &paint, layout.image_transform(), None);
    canvas.draw_pixmap(
        0,
        0,
        overlay.as_ref(),
        &paint,
        layout.overlay_transform(hat, overlay),
        None,
    );
    Ok(canvas)
}

/// Encodes a rendered canvas as PNG.
pub fn encode_png(canvas: &Pixmap) -> Result<Vec<u8>> {
    canvas
        .encode_png()
        .map_err(|e| Error::Canvas(format!("PNG encoding failed: {e}")))
}

/// Produces a small JPEG preview of `canvas` as a `data:` URL.
///
/// The canvas is scaled to a [`THUMBNAIL_SIZE`] square over white.
pub fn encode_thumbnail(canvas: &Pixmap) -> Result<String> {
    let mut thumb = Pixmap::new(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
        .ok_or_else(|| Error::Canvas("cannot allocate thumbnail".into()))?;
    thumb.fill(Color::WHITE);

    let scale_x = THUMBNAIL_SIZE as f32 / canvas.width().max(1) as f32;
    let scale_y = THUMBNAIL_SIZE as f32 / canvas.height().max(1) as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    thumb.draw_pixmap(
        0,
        0,
        canvas.as_ref(),
        &paint,
        Transform::from_scale(scale_x, scale_y),
        None,
    );

    let rgb: RgbImage = DynamicImage::ImageRgba8(rgba_from_pixmap(&thumb)).to_rgb8();
    let mut jpeg = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, THUMBNAIL_JPEG_QUALITY))
        .map_err(|e| Error::Canvas(format!("thumbnail encoding failed: {e}")))?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        general_purpose::STANDARD.encode(jpeg)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::image::pixmap_from_rgba;
    use image_rs::{Rgba, RgbaImage};

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Pixmap {
        pixmap_from_rgba(&RgbaImage::from_pixel(width, height, Rgba(rgba))).expect("pixmap")
    }

    fn hat_at(x: f32, y: f32, size: f32, rotation: f32) -> HatTransform {
        HatTransform {
            width: size,
            height: size,
            x,
            y,
            rotation,
        }
    }

    #[test]
    fn output_is_square_for_any_aspect_ratio() {
        let overlay = solid(8, 8, [0, 0, 255, 255]);
        for (w, h) in [(300, 100), (100, 300), (50, 50), (1, 999)] {
            let canvas = render(&solid(w, h, [255, 0, 0, 255]), &HatTransform::default(), &overlay, 240)
                .expect("render");
            assert_eq!((canvas.width(), canvas.height()), (240, 240), "{w}x{h}");
        }
    }

    #[test]
    fn wide_image_is_letterboxed_vertically() {
        let image = solid(400, 200, [255, 0, 0, 255]);
        let tiny_hat = hat_at(0.0, 0.0, 1.0, 0.0);
        let overlay = solid(4, 4, [0, 0, 0, 0]);
        let canvas = render(&image, &tiny_hat, &overlay, 400).expect("render");

        let top = canvas.pixel(200, 10).expect("in bounds");
        assert_eq!(top.alpha(), 0, "letterbox band should stay transparent");

        let middle = canvas.pixel(200, 200).expect("in bounds");
        assert_eq!(middle.alpha(), 255);
        assert_eq!(middle.red(), 255);
    }

    #[test]
    fn layout_centers_image() {
        let layout = Layout::new(800, 400, 1200);
        assert!((layout.box_scale - 3.0).abs() < f32::EPSILON);
        assert!((layout.draw_width - 1200.0).abs() < 0.01);
        assert!((layout.draw_height - 600.0).abs() < 0.01);
        assert!((layout.offset_x).abs() < 0.01);
        assert!((layout.offset_y - 300.0).abs() < 0.01);
    }

    #[test]
    fn hat_is_scaled_into_output_space() {
        let image = solid(100, 100, [255, 255, 255, 255]);
        let overlay = solid(10, 10, [0, 0, 255, 255]);
        // Box units 100..200 map to output pixels 200..400 at 2x.
        let canvas = render(&image, &hat_at(100.0, 100.0, 100.0, 0.0), &overlay, 800).expect("render");

        let inside = canvas.pixel(300, 300).expect("in bounds");
        assert_eq!((inside.red(), inside.blue()), (0, 255));

        let outside = canvas.pixel(450, 450).expect("in bounds");
        assert_eq!((outside.red(), outside.blue()), (255, 255));
    }

    #[test]
    fn full_turn_renders_like_no_rotation() {
        let image = solid(120, 80, [200, 30, 30, 255]);
        let overlay = solid(16, 16, [20, 20, 220, 255]);

        let upright = render(&image, &hat_at(150.0, 50.0, 120.0, 0.0), &overlay, 200).expect("render");
        let full_turn = render(&image, &hat_at(150.0, 50.0, 120.0, 360.0), &overlay, 200).expect("render");

        assert_eq!(upright.data(), full_turn.data());
    }

    #[test]
    fn quarter_turn_moves_pixels() {
        let image = solid(100, 100, [255, 255, 255, 255]);
        let half = RgbaImage::from_fn(20, 20, |x, _| {
            if x < 10 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let overlay = pixmap_from_rgba(&half).expect("pixmap");
        let flat = render(&image, &hat_at(100.0, 100.0, 200.0, 0.0), &overlay, 400).expect("render");
        let turned = render(&image, &hat_at(100.0, 100.0, 200.0, 90.0), &overlay, 400).expect("render");
        assert_ne!(flat.data(), turned.data());
    }

    #[test]
    fn zero_output_size_is_a_canvas_error() {
        let image = solid(4, 4, [0, 0, 0, 255]);
        match render(&image, &HatTransform::default(), &image, 0) {
            Err(Error::Canvas(_)) => {}
            other => panic!("expected Canvas error, got {other:?}"),
        }
    }

    #[test]
    fn encode_png_produces_png_signature() {
        let canvas = solid(10, 10, [1, 2, 3, 255]);
        let png = encode_png(&canvas).expect("png");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn thumbnail_is_a_jpeg_data_url() {
        let canvas = solid(300, 300, [0, 128, 0, 128]);
        let url = encode_thumbnail(&canvas).expect("thumbnail");
        let encoded = url
            .strip_prefix("data:image/jpeg;base64,")
            .expect("data url prefix");

        let bytes = general_purpose::STANDARD.decode(encoded).expect("base64");
        let decoded = image_rs::load_from_memory(&bytes).expect("jpeg");
        assert_eq!((decoded.width(), decoded.height()), (THUMBNAIL_SIZE, THUMBNAIL_SIZE));
    }
}
