//! Premultiplied alpha for resampling.
//!
//! Filtering straight-alpha RGBA lets the colour of fully transparent
//! pixels bleed into sprite edges. Levels are therefore resampled from a
//! premultiplied copy of the master and converted back afterwards.
//! Channels are widened to 16 bits so low-alpha colours survive the round
//! trip.

use image::{ImageBuffer, Rgba, RgbaImage};
use rayon::prelude::*;

/// 16-bit RGBA with colour channels premultiplied by alpha.
pub type PremultipliedImage = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// 8-bit to 16-bit channel scale, `65535 / 255`.
const WIDEN: u32 = 257;

/// Premultiply `image` into 16-bit channels.
pub fn premultiply(image: &RgbaImage) -> PremultipliedImage {
    let (width, height) = image.dimensions();
    let mut out = PremultipliedImage::new(width, height);

    out.par_chunks_exact_mut(4)
        .zip(image.as_raw().par_chunks_exact(4))
        .for_each(|(dst, src)| {
            let alpha = u32::from(src[3]) * WIDEN;
            for (d, &c) in dst[..3].iter_mut().zip(&src[..3]) {
                *d = ((u32::from(c) * alpha + 127) / 255) as u16;
            }
            dst[3] = alpha as u16;
        });

    out
}

/// Convert a premultiplied image back to 8-bit straight alpha.
///
/// Pixels whose alpha rounds to zero become transparent black.
pub fn unpremultiply(image: &PremultipliedImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);

    out.par_chunks_exact_mut(4)
        .zip(image.as_raw().par_chunks_exact(4))
        .for_each(|(dst, src)| {
            let alpha = u32::from(src[3]);
            let alpha8 = (alpha + WIDEN / 2) / WIDEN;
            if alpha8 == 0 {
                dst.fill(0);
                return;
            }
            for (d, &c) in dst[..3].iter_mut().zip(&src[..3]) {
                let straight = (u32::from(c) * 255 + alpha / 2) / alpha;
                *d = straight.min(255) as u8;
            }
            dst[3] = alpha8 as u8;
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_pixels_round_trip_exactly() {
        let image = RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, 200, 255])
        });
        assert_eq!(unpremultiply(&premultiply(&image)), image);
    }

    #[test]
    fn test_translucent_colour_survives_round_trip() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 128, 7, 14]));
        let back = unpremultiply(&premultiply(&image));
        assert_eq!(*back.get_pixel(0, 0), Rgba([255, 128, 7, 14]));
    }

    #[test]
    fn test_premultiply_scales_colour_by_alpha() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128]));
        let premultiplied = premultiply(&image);
        let pixel = premultiplied.get_pixel(0, 0);
        assert_eq!(pixel.0[3], 128 * 257);
        assert_eq!(pixel.0[0], pixel.0[3]);
    }

    #[test]
    fn test_transparent_pixels_become_transparent_black() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([90, 90, 90, 0]));
        let back = unpremultiply(&premultiply(&image));
        assert_eq!(*back.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }
}
