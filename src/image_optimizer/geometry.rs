//! Target dimension math for the optimized image and the thumbnail

/// Aspect-preserving downscale into a `max_width` x `max_height` box
///
/// Width is bounded first; the possibly reduced height is then bounded
/// against `max_height`. Dimensions are rounded to the nearest pixel and
/// never grow.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let mut w = width as f64;
    let mut h = height as f64;

    if w > max_width as f64 {
        let ratio = max_width as f64 / w;
        w *= ratio;
        h *= ratio;
    }

    if h > max_height as f64 {
        let ratio = max_height as f64 / h;
        w *= ratio;
        h *= ratio;
    }

    let w = (w.round() as u32).clamp(1, width.max(1));
    let h = (h.round() as u32).clamp(1, height.max(1));
    (w, h)
}

/// Region of the source that fills a fixed-size thumbnail canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverCrop {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Center crop of the source matching the thumbnail's aspect ratio
///
/// Equivalent to scaling by `max(tw / w, th / h)` and cutting the overflow
/// evenly from both edges, but expressed in source pixels so the resampler
/// goes straight to `tw` x `th`. The crop never leaves the source bounds
/// and is at least one pixel on each side.
pub fn cover_crop(width: u32, height: u32, thumbnail_width: u32, thumbnail_height: u32) -> CoverCrop {
    let width = width.max(1);
    let height = height.max(1);
    let scale = f64::max(
        thumbnail_width as f64 / width as f64,
        thumbnail_height as f64 / height as f64,
    );

    let crop_width = ((thumbnail_width as f64 / scale).round() as u32).clamp(1, width);
    let crop_height = ((thumbnail_height as f64 / scale).round() as u32).clamp(1, height);

    CoverCrop {
        left: (width - crop_width) / 2,
        top: (height - crop_height) / 2,
        width: crop_width,
        height: crop_height,
    }
}
