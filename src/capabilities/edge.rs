//! Error-screen heuristic: mean edge response over the centre of a frame.
//!
//! Error screens ("stream unavailable", "geo-blocked", ...) put text in the middle of the picture,
//! which produces far more edges than ordinary video. Only the band between
//! [`EdgeConsts::CROP_TOP`] and [`EdgeConsts::CROP_BOTTOM`] of the middle half width is scored,
//! so subtitles near the bottom do not count.

use anyhow::Result;
use std::path::Path;

use super::FrameAnalyzer;
use crate::utils::config::EdgeConsts;

/// Scores frames with a 3x3 edge kernel. Only functional with the `edge-detect` feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeAnalyzer;

impl EdgeAnalyzer {
    /// Whether this build can score frames.
    pub const AVAILABLE: bool = cfg!(feature = "edge-detect");
}

#[cfg(feature = "edge-detect")]
impl FrameAnalyzer for EdgeAnalyzer {
    fn analyze(&self, image_path: &Path) -> Result<f64> {
        use anyhow::Context;
        let img = image::open(image_path)
            .with_context(|| format!("open frame {}", image_path.display()))?
            .to_luma8();
        center_edge_score(&img)
    }
}

#[cfg(not(feature = "edge-detect"))]
impl FrameAnalyzer for EdgeAnalyzer {
    fn analyze(&self, _image_path: &Path) -> Result<f64> {
        anyhow::bail!("built without the edge-detect feature")
    }
}

/// Crop bounds `(left, top, right, bottom)` for a `width` x `height` frame.
pub fn center_crop(width: u32, height: u32) -> (u32, u32, u32, u32) {
    let left = width / 4;
    let right = 3 * width / 4;
    let top = (f64::from(height) * EdgeConsts::CROP_TOP) as u32;
    let bottom = (f64::from(height) * EdgeConsts::CROP_BOTTOM) as u32;
    (left, top, right, bottom.max(top))
}

/// Mean edge response over the centre crop of a greyscale frame.
#[cfg(feature = "edge-detect")]
pub fn center_edge_score(img: &image::GrayImage) -> Result<f64> {
    let (w, h) = img.dimensions();
    let (left, top, right, bottom) = center_crop(w, h);
    if right <= left || bottom <= top {
        anyhow::bail!("frame too small to score ({w}x{h})");
    }
    let crop = image::imageops::crop_imm(img, left, top, right - left, bottom - top).to_image();
    Ok(mean_edge(&crop))
}

/// Mean of a 3x3 "find edges" filter (centre 8, neighbours -1), clamped to 0..=255.
/// Border pixels pass through unchanged, as the classic filter does.
#[cfg(feature = "edge-detect")]
fn mean_edge(img: &image::GrayImage) -> f64 {
    let (w, h) = img.dimensions();
    let px = |x: u32, y: u32| i32::from(img.get_pixel(x, y)[0]);
    let mut total: u64 = 0;
    for y in 0..h {
        for x in 0..w {
            let v = if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
                px(x, y)
            } else {
                let mut sum = 8 * px(x, y);
                for dy in [-1i32, 0, 1] {
                    for dx in [-1i32, 0, 1] {
                        if dx != 0 || dy != 0 {
                            sum -= px((x as i32 + dx) as u32, (y as i32 + dy) as u32);
                        }
                    }
                }
                sum.clamp(0, 255)
            };
            total += v as u64;
        }
    }
    total as f64 / (u64::from(w) * u64::from(h)) as f64
}
