//! Drawing surfaces
//!
//! A `DrawingSurface` is an owned RGBA bitmap used for the intermediate
//! steps of an optimization call. Surfaces never outlive the call that
//! created them; their buffers are reclaimed on drop or by `release`.

use fast_image_resize::{CropBox, FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::{imageops, DynamicImage, Rgba, RgbaImage};
use std::num::NonZeroU32;

use super::error::OptimizeError;
use super::geometry::CoverCrop;

#[derive(Debug, Clone)]
pub struct DrawingSurface {
    pixels: RgbaImage,
}

impl DrawingSurface {
    /// Copy a decoded bitmap onto a new surface
    pub fn from_image(img: &DynamicImage) -> Self {
        Self {
            pixels: img.to_rgba8(),
        }
    }

    /// A surface of the given size painted with a single color
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(color)),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Raw RGBA pixel data, 4 bytes per pixel
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    /// Resample onto a new surface using a Lanczos3 convolution
    ///
    /// Alpha is premultiplied around the convolution so transparent pixels
    /// don't bleed their color into opaque neighbours.
    pub fn resized(&self, target_w: u32, target_h: u32) -> Result<DrawingSurface, OptimizeError> {
        if (target_w, target_h) == self.dimensions() {
            return Ok(self.clone());
        }
        let (width, height) = self.dimensions();
        let full = CoverCrop {
            left: 0,
            top: 0,
            width,
            height,
        };
        self.resized_region(full, target_w, target_h)
    }

    /// Resample only `region` of this surface onto a `target_w` x `target_h`
    /// surface
    ///
    /// Only the destination buffer is allocated, whatever the scale factor.
    pub fn resized_region(
        &self,
        region: CoverCrop,
        target_w: u32,
        target_h: u32,
    ) -> Result<DrawingSurface, OptimizeError> {
        let src_width = NonZeroU32::new(self.width())
            .ok_or_else(|| OptimizeError::resize_failed("Source width is 0"))?;
        let src_height = NonZeroU32::new(self.height())
            .ok_or_else(|| OptimizeError::resize_failed("Source height is 0"))?;
        let dst_width = NonZeroU32::new(target_w)
            .ok_or_else(|| OptimizeError::resize_failed("Target width is 0"))?;
        let dst_height = NonZeroU32::new(target_h)
            .ok_or_else(|| OptimizeError::resize_failed("Target height is 0"))?;
        let crop_box = CropBox {
            left: region.left,
            top: region.top,
            width: NonZeroU32::new(region.width)
                .ok_or_else(|| OptimizeError::resize_failed("Crop width is 0"))?,
            height: NonZeroU32::new(region.height)
                .ok_or_else(|| OptimizeError::resize_failed("Crop height is 0"))?,
        };

        let mut src_image = Image::from_vec_u8(
            src_width,
            src_height,
            self.pixels.as_raw().clone(),
            PixelType::U8x4,
        )
        .map_err(|e| {
            OptimizeError::resize_failed(format!("Failed to create source image: {:?}", e))
        })?;

        let alpha_mul_div = MulDiv::default();
        alpha_mul_div
            .multiply_alpha_inplace(&mut src_image.view_mut())
            .map_err(|e| OptimizeError::resize_failed(format!("Alpha premultiply failed: {:?}", e)))?;

        let mut src_view = src_image.view();
        src_view
            .set_crop_box(crop_box)
            .map_err(|e| OptimizeError::resize_failed(format!("Invalid crop region: {}", e)))?;

        let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
        let mut dst_view = dst_image.view_mut();

        let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
        resizer
            .resize(&src_view, &mut dst_view)
            .map_err(|e| OptimizeError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

        alpha_mul_div
            .divide_alpha_inplace(&mut dst_view)
            .map_err(|e| OptimizeError::resize_failed(format!("Alpha unpremultiply failed: {:?}", e)))?;

        let pixels = RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
            .ok_or_else(|| OptimizeError::resize_failed("Failed to create output image buffer"))?;

        Ok(DrawingSurface { pixels })
    }

    /// Alpha-blend `source` onto this surface with its top-left at (x, y)
    ///
    /// Offsets may be negative or push past the far edge; anything outside
    /// this surface is clipped.
    pub fn draw(&mut self, source: &DrawingSurface, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, &source.pixels, x, y);
    }

    /// Reclaim the pixel buffer now rather than at end of scope
    pub fn release(self) {
        drop(self);
    }
}
