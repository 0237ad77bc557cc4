//! Image gates — cheap content checks run before the classifier.
//!
//! Two independent checks, in order: a quality gate (brightness + contrast on
//! the greyscale image) and a leaf gate (green-pixel ratio in HSV space).
//! Either failure short-circuits the request with a specific message, so the
//! expensive forward pass only ever sees plausible leaf photos.

use image::RgbImage;

// ═══════════════════════════════════════════════════════════
// Thresholds
// ═══════════════════════════════════════════════════════════

/// Mean greyscale brightness below this is "too dark".
const MIN_MEAN_BRIGHTNESS: f64 = 20.0;

/// Greyscale standard deviation below this is "too uniform" (a wall, a
/// covered lens, a solid color).
const MIN_BRIGHTNESS_STDDEV: f64 = 10.0;

/// Green band in HSV. Hue covers yellow-green through blue-green; the
/// saturation/value floors exclude near-grey and near-black pixels that
/// have no usable hue. Tuned on field photos of crop leaves.
const GREEN_HUE_MIN_DEG: f32 = 40.0;
const GREEN_HUE_MAX_DEG: f32 = 180.0;
const GREEN_MIN_SATURATION: f32 = 20.0 / 255.0;
const GREEN_MIN_VALUE: f32 = 20.0 / 255.0;

/// Minimum fraction of green pixels for an image to count as "contains a leaf".
const MIN_GREEN_RATIO: f64 = 0.05;

// ═══════════════════════════════════════════════════════════
// Verdict
// ═══════════════════════════════════════════════════════════

/// Why the gate rejected an upload. The message is user-facing and actionable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    LowQuality,
    NoLeafDetected,
}

impl GateRejection {
    pub fn message(&self) -> &'static str {
        match self {
            GateRejection::LowQuality => {
                "Image quality is too low (e.g., too dark, too uniform). \
                 Please upload a clearer image."
            }
            GateRejection::NoLeafDetected => {
                "No significant plant leaf detected in the image. \
                 Please upload an image of a plant leaf."
            }
        }
    }
}

/// Run both gates in order: quality first, then leaf detection.
pub fn check_image(image: &RgbImage) -> Result<(), GateRejection> {
    if is_low_quality(image) {
        return Err(GateRejection::LowQuality);
    }
    if !is_leaf_detected(image) {
        return Err(GateRejection::NoLeafDetected);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Quality gate
// ═══════════════════════════════════════════════════════════

/// Greyscale brightness statistics check.
///
/// Degenerate input (zero pixels) fails closed — an image we cannot
/// measure is treated as low quality.
pub fn is_low_quality(image: &RgbImage) -> bool {
    let pixel_count = (image.width() as u64) * (image.height() as u64);
    if pixel_count == 0 {
        return true;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for p in image.pixels() {
        // ITU-R BT.601 luminance, same weighting as a greyscale conversion
        let luma =
            0.299 * p.0[0] as f64 + 0.587 * p.0[1] as f64 + 0.114 * p.0[2] as f64;
        sum += luma;
        sum_sq += luma * luma;
    }

    let mean = sum / pixel_count as f64;
    let variance = (sum_sq / pixel_count as f64) - (mean * mean);
    let stddev = variance.max(0.0).sqrt();

    mean < MIN_MEAN_BRIGHTNESS || stddev < MIN_BRIGHTNESS_STDDEV
}

// ═══════════════════════════════════════════════════════════
// Leaf gate
// ═══════════════════════════════════════════════════════════

/// Green-pixel ratio check in HSV space.
///
/// Degenerate input (zero pixels) fails open as "not detected" — nothing to
/// count means no leaf.
pub fn is_leaf_detected(image: &RgbImage) -> bool {
    let pixel_count = (image.width() as u64) * (image.height() as u64);
    if pixel_count == 0 {
        return false;
    }

    let green_pixels = image
        .pixels()
        .filter(|p| is_green(p.0[0], p.0[1], p.0[2]))
        .count() as u64;

    (green_pixels as f64 / pixel_count as f64) > MIN_GREEN_RATIO
}

fn is_green(r: u8, g: u8, b: u8) -> bool {
    let (h, s, v) = rgb_to_hsv(r, g, b);
    (GREEN_HUE_MIN_DEG..=GREEN_HUE_MAX_DEG).contains(&h)
        && s >= GREEN_MIN_SATURATION
        && v >= GREEN_MIN_VALUE
}

/// RGB → HSV. Hue in degrees [0, 360), saturation and value in [0, 1].
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Alternating two-color image: non-zero stddev, controllable hue mix.
    fn checkered(a: [u8; 3], b: [u8; 3]) -> RgbImage {
        RgbImage::from_fn(64, 64, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb(a)
            } else {
                Rgb(b)
            }
        })
    }

    #[test]
    fn dark_image_is_low_quality() {
        let img = checkered([5, 5, 5], [10, 10, 10]);
        assert!(is_low_quality(&img));
    }

    #[test]
    fn uniform_grey_is_low_quality() {
        let img = RgbImage::from_pixel(64, 64, Rgb([128, 128, 128]));
        assert!(is_low_quality(&img));
    }

    #[test]
    fn textured_bright_image_passes_quality() {
        let img = checkered([40, 180, 40], [240, 240, 240]);
        assert!(!is_low_quality(&img));
    }

    #[test]
    fn empty_image_fails_closed() {
        let img = RgbImage::new(0, 0);
        assert!(is_low_quality(&img));
    }

    #[test]
    fn green_leaf_image_is_detected() {
        let img = checkered([40, 180, 40], [240, 240, 240]);
        assert!(is_leaf_detected(&img));
    }

    #[test]
    fn red_image_is_not_a_leaf() {
        let img = checkered([200, 30, 30], [120, 20, 20]);
        assert!(!is_leaf_detected(&img));
    }

    #[test]
    fn empty_image_is_not_a_leaf() {
        let img = RgbImage::new(0, 0);
        assert!(!is_leaf_detected(&img));
    }

    #[test]
    fn grey_pixels_have_no_usable_hue() {
        // Saturation floor excludes near-grey even though hue defaults to 0..
        assert!(!is_green(128, 128, 128));
        assert!(!is_green(0, 0, 0));
    }

    #[test]
    fn pure_green_is_green() {
        assert!(is_green(0, 255, 0));
        // Yellow-green foliage sits at the low end of the band
        assert!(is_green(150, 200, 40));
    }

    #[test]
    fn hsv_conversion_known_values() {
        let (h, s, v) = rgb_to_hsv(255, 0, 0);
        assert!(h.abs() < 0.01);
        assert!((s - 1.0).abs() < 0.01);
        assert!((v - 1.0).abs() < 0.01);

        let (h, _, _) = rgb_to_hsv(0, 255, 0);
        assert!((h - 120.0).abs() < 0.01);

        let (h, _, _) = rgb_to_hsv(0, 0, 255);
        assert!((h - 240.0).abs() < 0.01);
    }

    #[test]
    fn check_image_reports_quality_before_leaf() {
        // Uniform red fails both checks; quality must win the ordering.
        let img = RgbImage::from_pixel(32, 32, Rgb([200, 0, 0]));
        assert_eq!(check_image(&img), Err(GateRejection::LowQuality));
    }

    #[test]
    fn check_image_accepts_leafy_photo() {
        let img = checkered([40, 180, 40], [240, 240, 240]);
        assert_eq!(check_image(&img), Ok(()));
    }

    #[test]
    fn rejection_messages_are_specific() {
        assert!(GateRejection::LowQuality.message().contains("quality"));
        assert!(GateRejection::NoLeafDetected.message().contains("leaf"));
    }
}
