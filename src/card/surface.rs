use ab_glyph::{point, Font, FontRef, PxScale, ScaleFont};
use anyhow::Result;
use image::{Rgb, RgbImage};

use std::io::Cursor;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Sans,
    SansBold,
    Mono,
}

struct Fonts {
    sans: FontRef<'static>,
    sans_bold: FontRef<'static>,
    mono: FontRef<'static>,
}

impl Fonts {
    fn get() -> &'static Fonts {
        static INSTANCE: OnceLock<Fonts> = OnceLock::new();
        INSTANCE.get_or_init(|| Fonts {
            sans: FontRef::try_from_slice(include_bytes!("../../assets/fonts/DejaVuSans.ttf"))
                .expect("valid embedded font"),
            sans_bold: FontRef::try_from_slice(include_bytes!(
                "../../assets/fonts/DejaVuSans-Bold.ttf"
            ))
            .expect("valid embedded font"),
            mono: FontRef::try_from_slice(include_bytes!(
                "../../assets/fonts/DejaVuSansMono.ttf"
            ))
            .expect("valid embedded font"),
        })
    }

    fn face(&self, face: FontFace) -> &FontRef<'static> {
        match face {
            FontFace::Sans => &self.sans,
            FontFace::SansBold => &self.sans_bold,
            FontFace::Mono => &self.mono,
        }
    }
}

/// Minimal 2D drawing surface for card composition. Text positions are
/// baseline coordinates.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fills the whole surface with a top-left to bottom-right linear
    /// gradient with stops at 0, 0.5, and 1.
    fn fill_diagonal_gradient(&mut self, stops: [[u8; 3]; 3]);

    fn fill_rounded_rect(&mut self, x: i32, y: i32, w: u32, h: u32, radius: f32, rgb: [u8; 3]);

    fn text_width(&self, face: FontFace, px: f32, text: &str) -> f32;

    fn draw_text(
        &mut self,
        face: FontFace,
        px: f32,
        x: f32,
        baseline: f32,
        rgb: [u8; 3],
        alpha: f32,
        text: &str,
    );

    fn png_bytes(&self) -> Result<Vec<u8>>;
}

/// CPU raster backend over an RGB pixel buffer.
pub struct RasterSurface {
    img: RgbImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, Rgb([0, 0, 0])),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    fn blend_pixel(&mut self, x: i32, y: i32, rgb: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x as u32 >= self.img.width() || y as u32 >= self.img.height() {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let dst = self.img.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let d = f32::from(dst.0[channel]);
            let s = f32::from(rgb[channel]);
            dst.0[channel] = (d + (s - d) * alpha) as u8;
        }
    }
}

fn interpolate(c1: [u8; 3], c2: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        ((1.0 - t) * f32::from(c1[0]) + t * f32::from(c2[0])) as u8,
        ((1.0 - t) * f32::from(c1[1]) + t * f32::from(c2[1])) as u8,
        ((1.0 - t) * f32::from(c1[2]) + t * f32::from(c2[2])) as u8,
    ]
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.img.width()
    }

    fn height(&self) -> u32 {
        self.img.height()
    }

    fn fill_diagonal_gradient(&mut self, stops: [[u8; 3]; 3]) {
        let w = self.img.width() as f32;
        let h = self.img.height() as f32;
        // Projection of each pixel onto the top-left -> bottom-right axis.
        let denom = w * w + h * h;

        for y in 0..self.img.height() {
            for x in 0..self.img.width() {
                let t = (x as f32 * w + y as f32 * h) / denom;
                let rgb = if t < 0.5 {
                    interpolate(stops[0], stops[1], t / 0.5)
                } else {
                    interpolate(stops[1], stops[2], (t - 0.5) / 0.5)
                };
                self.img.put_pixel(x, y, Rgb(rgb));
            }
        }
    }

    fn fill_rounded_rect(&mut self, x: i32, y: i32, w: u32, h: u32, radius: f32, rgb: [u8; 3]) {
        let right = x + w as i32;
        let bottom = y + h as i32;
        let (fx, fy, fr, fb) = (x as f32, y as f32, right as f32, bottom as f32);

        for py in y..bottom {
            for px in x..right {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);

                // Nearest corner-circle center, if the point is in a corner
                // square; everywhere else the plain rectangle test applies.
                let corner_x = if cx < fx + radius {
                    Some(fx + radius)
                } else if cx > fr - radius {
                    Some(fr - radius)
                } else {
                    None
                };
                let corner_y = if cy < fy + radius {
                    Some(fy + radius)
                } else if cy > fb - radius {
                    Some(fb - radius)
                } else {
                    None
                };

                let inside = match (corner_x, corner_y) {
                    (Some(ox), Some(oy)) => {
                        let (dx, dy) = (cx - ox, cy - oy);
                        dx * dx + dy * dy <= radius * radius
                    }
                    _ => true,
                };

                if inside {
                    self.blend_pixel(px, py, rgb, 1.0);
                }
            }
        }
    }

    fn text_width(&self, face: FontFace, px: f32, text: &str) -> f32 {
        let font = Fonts::get().face(face);
        let scaled = font.as_scaled(PxScale::from(px));

        let mut width = 0.0;
        let mut last = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = last {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            last = Some(id);
        }
        width
    }

    fn draw_text(
        &mut self,
        face: FontFace,
        px: f32,
        x: f32,
        baseline: f32,
        rgb: [u8; 3],
        alpha: f32,
        text: &str,
    ) {
        let font = Fonts::get().face(face).clone();
        let scaled = font.as_scaled(PxScale::from(px));

        let mut caret = x;
        let mut last = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = last {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(PxScale::from(px), point(caret, baseline));
            caret += scaled.h_advance(id);
            last = Some(id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px_x = bounds.min.x as i32 + gx as i32;
                    let px_y = bounds.min.y as i32 + gy as i32;
                    self.blend_pixel(px_x, px_y, rgb, alpha * coverage);
                });
            }
        }
    }

    fn png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.img.write_to(&mut buffer, image::ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_hits_its_stops() {
        let mut surface = RasterSurface::new(1200, 628);
        surface.fill_diagonal_gradient([[100, 0, 0], [0, 100, 0], [0, 0, 100]]);

        // Top-left is exactly the first stop.
        assert_eq!(surface.image().get_pixel(0, 0).0, [100, 0, 0]);

        // (600, 314) projects to exactly t = 0.5, the middle stop.
        assert_eq!(surface.image().get_pixel(600, 314).0, [0, 100, 0]);

        // Bottom-right is within truncation distance of the last stop.
        let corner = surface.image().get_pixel(1199, 627).0;
        assert!(corner[0] <= 1 && corner[1] <= 1 && corner[2] >= 98);
    }

    #[test]
    fn rounded_rect_spares_the_corners() {
        let mut surface = RasterSurface::new(300, 200);
        surface.fill_rounded_rect(48, 48, 140, 36, 6.0, [16, 185, 129]);

        // Corner pixel is outside the corner radius.
        assert_eq!(surface.image().get_pixel(48, 48).0, [0, 0, 0]);
        // Just inside the corner arc.
        assert_eq!(surface.image().get_pixel(52, 52).0, [16, 185, 129]);
        // Center and edge midpoints are filled.
        assert_eq!(surface.image().get_pixel(118, 66).0, [16, 185, 129]);
        assert_eq!(surface.image().get_pixel(118, 48).0, [16, 185, 129]);
        // Outside the rectangle is untouched.
        assert_eq!(surface.image().get_pixel(47, 66).0, [0, 0, 0]);
    }

    #[test]
    fn text_width_grows_with_content() {
        let surface = RasterSurface::new(100, 100);

        assert_eq!(surface.text_width(FontFace::Sans, 28.0, ""), 0.0);
        let one = surface.text_width(FontFace::Sans, 28.0, "w");
        let two = surface.text_width(FontFace::Sans, 28.0, "ww");
        assert!(one > 0.0);
        assert!(two > one);

        // Trailing spaces still advance the caret.
        let spaced = surface.text_width(FontFace::Sans, 28.0, "w ");
        assert!(spaced > one);
    }

    #[test]
    fn draw_text_blends_and_clips() {
        let mut surface = RasterSurface::new(200, 100);
        surface.draw_text(FontFace::SansBold, 32.0, 10.0, 60.0, [255, 255, 255], 1.0, "AB");

        let touched = surface
            .image()
            .pixels()
            .filter(|pixel| pixel.0 != [0, 0, 0])
            .count();
        assert!(touched > 0);

        // Text positioned past every edge must not panic.
        surface.draw_text(FontFace::Mono, 20.0, -500.0, -50.0, [255, 255, 255], 0.5, "off");
        surface.draw_text(FontFace::Mono, 20.0, 1000.0, 1000.0, [255, 255, 255], 0.5, "off");
    }

    #[test]
    fn png_bytes_round_trips() {
        let mut surface = RasterSurface::new(64, 32);
        surface.fill_diagonal_gradient([[6, 78, 59], [6, 95, 70], [0, 0, 0]]);

        let bytes = surface.png_bytes().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 32);
    }
}
