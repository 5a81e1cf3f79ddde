use log::debug;

use crate::error::{CoreError, Result};
use crate::pixel::Pixel;

// =============================================================================
// Orientation
// =============================================================================

/// How a bitmap's stored pixels are meant to be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl Orientation {
    /// True for every orientation other than upright or upside-down. Decoding
    /// swaps the stated width and height for these.
    pub fn swaps_dimensions(self) -> bool {
        !matches!(self, Self::Up | Self::Down)
    }

    /// Swap `(width, height)` when this orientation calls for it.
    pub fn apply_to_size(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

// =============================================================================
// Bitmap boundary
// =============================================================================

/// Byte length of a `width * height` RGBA8 grid, or `None` if it overflows.
pub fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
}

/// The platform bitmap handed in by the UI layer and handed back to it.
///
/// The core never inspects a bitmap's native pixel format: it asks the bitmap
/// to draw itself into an RGBA8 canvas and rebuilds one from RGBA8 bytes.
pub trait Bitmap: Sized {
    /// Stated size, as presented (orientation already accounted for).
    fn size(&self) -> (u32, u32);

    fn orientation(&self) -> Orientation;

    /// Pixels per point.
    fn scale(&self) -> f64;

    /// Render into a `width * height` RGBA8 canvas (red first, 4 bytes per
    /// pixel, row-major). `None` if there is no pixel data to draw.
    fn draw_rgba(&self, width: u32, height: u32) -> Option<Vec<u8>>;

    /// Build a bitmap from RGBA8 bytes. `None` if the platform rejects them.
    fn from_rgba(
        width: u32,
        height: u32,
        data: Vec<u8>,
        orientation: Orientation,
        scale: f64,
    ) -> Option<Self>;
}

/// In-memory bitmap: an RGBA8 grid plus presentation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBitmap {
    width: u32,
    height: u32,
    data: Option<Vec<u8>>,
    orientation: Orientation,
    scale: f64,
}

impl RasterBitmap {
    /// Wrap stored RGBA8 data. `None` if the length doesn't match the grid.
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        orientation: Orientation,
        scale: f64,
    ) -> Option<Self> {
        if Some(data.len()) != rgba_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            data: Some(data),
            orientation,
            scale,
        })
    }

    /// A bitmap that reports a size but carries no backing pixels.
    pub fn without_pixels(width: u32, height: u32, orientation: Orientation) -> Self {
        Self {
            width,
            height,
            data: None,
            orientation,
            scale: 1.0,
        }
    }

    /// Stored grid dimensions, before orientation.
    pub fn stored_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

impl Bitmap for RasterBitmap {
    fn size(&self) -> (u32, u32) {
        self.orientation.apply_to_size(self.width, self.height)
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn draw_rgba(&self, width: u32, height: u32) -> Option<Vec<u8>> {
        let src = self.data.as_ref()?;
        if width == self.width && height == self.height {
            return Some(src.clone());
        }
        let len = rgba_len(width, height)?;
        if self.width == 0 || self.height == 0 {
            return Some(vec![0u8; len]);
        }

        // Nearest-neighbor stretch onto the requested canvas
        let mut out = vec![0u8; len];
        let src_stride = self.width as usize * 4;
        let dst_stride = width as usize * 4;
        for dy in 0..height {
            let sy = ((dy as u64 * self.height as u64) / height as u64) as usize;
            for dx in 0..width {
                let sx = ((dx as u64 * self.width as u64) / width as u64) as usize;
                let si = sy * src_stride + sx * 4;
                let di = dy as usize * dst_stride + dx as usize * 4;
                out[di..di + 4].copy_from_slice(&src[si..si + 4]);
            }
        }
        Some(out)
    }

    fn from_rgba(
        width: u32,
        height: u32,
        data: Vec<u8>,
        orientation: Orientation,
        scale: f64,
    ) -> Option<Self> {
        Self::new(width, height, data, orientation, scale)
    }
}

// =============================================================================
// PixelBuffer
// =============================================================================

/// An owned, canonical RGBA8 image: `width * height` packed pixels in
/// row-major order plus the orientation and scale needed to rebuild a bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
    orientation: Orientation,
    scale: f64,
}

impl PixelBuffer {
    /// Create a transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width as usize * height as usize],
            orientation: Orientation::Up,
            scale: 1.0,
        }
    }

    /// Create from packed pixels. Panics if the count doesn't match dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count {} doesn't match {}x{}",
            pixels.len(),
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
            orientation: Orientation::Up,
            scale: 1.0,
        }
    }

    /// Create from RGBA8 bytes. Panics if data length doesn't match dimensions.
    pub fn from_rgba_bytes(width: u32, height: u32, data: &[u8]) -> Self {
        assert!(
            Some(data.len()) == rgba_len(width, height),
            "RGBA data length {} doesn't match {}x{}x4",
            data.len(),
            width,
            height
        );
        let pixels = data
            .chunks_exact(4)
            .map(|px| Pixel::from_bytes([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Replace the presentation metadata carried back to the bitmap.
    pub fn with_presentation(mut self, orientation: Orientation, scale: f64) -> Self {
        self.orientation = orientation;
        self.scale = scale;
        self
    }

    /// Decode a platform bitmap into the canonical layout.
    pub fn decode<B: Bitmap>(bitmap: &B) -> Result<Self> {
        let orientation = bitmap.orientation();
        let (stated_w, stated_h) = bitmap.size();
        let (width, height) = orientation.apply_to_size(stated_w, stated_h);
        if width == 0 || height == 0 {
            return Err(CoreError::DecodeFailure(format!(
                "bitmap has empty size {width}x{height}"
            )));
        }

        let expected = rgba_len(width, height).ok_or_else(|| {
            CoreError::DecodeFailure(format!("bitmap size {width}x{height} is too large"))
        })?;
        let data = bitmap.draw_rgba(width, height).ok_or_else(|| {
            CoreError::DecodeFailure("bitmap has no underlying pixel data".into())
        })?;
        if data.len() != expected {
            return Err(CoreError::DecodeFailure(format!(
                "drew {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }

        debug!("decoded {width}x{height} bitmap ({orientation:?}, scale {})", bitmap.scale());
        Ok(Self::from_rgba_bytes(width, height, &data)
            .with_presentation(orientation, bitmap.scale()))
    }

    /// Rebuild a platform bitmap, re-applying the stored orientation and scale.
    pub fn to_bitmap<B: Bitmap>(&self) -> Result<B> {
        debug!(
            "encoding {}x{} buffer ({:?}, scale {})",
            self.width, self.height, self.orientation, self.scale
        );
        B::from_rgba(
            self.width,
            self.height,
            self.to_rgba_bytes(),
            self.orientation,
            self.scale,
        )
        .ok_or_else(|| {
            CoreError::EncodeFailure(format!(
                "platform rejected {}x{} RGBA data",
                self.width, self.height
            ))
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Mutable access to the pixels. The slice cannot change length.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Get the pixel at (x, y). Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    /// Get the mutable pixel at (x, y). Panics if out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Pixel {
        let idx = self.index(x, y);
        &mut self.pixels[idx]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Flatten into RGBA8 bytes, red first.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buf = PixelBuffer::new(4, 3);
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.pixel_count(), 12);
        assert!(buf.pixels().iter().all(|p| p.value() == 0));
    }

    #[test]
    fn test_pixel_access_row_major() {
        let mut buf = PixelBuffer::new(3, 2);
        buf.pixel_mut(2, 1).set_red(200);
        assert_eq!(buf.pixels()[5].red(), 200);
        assert_eq!(buf.pixel(2, 1).red(), 200);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds() {
        let buf = PixelBuffer::new(2, 2);
        buf.pixel(2, 0);
    }

    #[test]
    #[should_panic(expected = "RGBA data length")]
    fn test_from_rgba_bytes_wrong_size() {
        PixelBuffer::from_rgba_bytes(2, 2, &[0; 10]);
    }

    #[test]
    fn test_rgba_bytes_order() {
        let buf = PixelBuffer::from_rgba_bytes(2, 1, &[255, 0, 0, 255, 0, 255, 0, 128]);
        assert_eq!(buf.pixel(0, 0).to_rgba(), [255, 0, 0, 255]);
        assert_eq!(buf.pixel(1, 0).to_rgba(), [0, 255, 0, 128]);
        assert_eq!(buf.to_rgba_bytes(), vec![255, 0, 0, 255, 0, 255, 0, 128]);
    }

    #[test]
    fn test_orientation_swaps() {
        assert!(!Orientation::Up.swaps_dimensions());
        assert!(!Orientation::Down.swaps_dimensions());
        assert!(Orientation::Left.swaps_dimensions());
        assert!(Orientation::RightMirrored.swaps_dimensions());
        assert!(Orientation::UpMirrored.swaps_dimensions());
        assert_eq!(Orientation::Right.apply_to_size(4, 2), (2, 4));
        assert_eq!(Orientation::Down.apply_to_size(4, 2), (4, 2));
    }

    #[test]
    fn test_decode_upright() {
        let data: Vec<u8> = (0..2 * 2 * 4).map(|i| i as u8).collect();
        let bmp = RasterBitmap::new(2, 2, data.clone(), Orientation::Up, 2.0).unwrap();
        let buf = PixelBuffer::decode(&bmp).unwrap();
        assert_eq!((buf.width(), buf.height()), (2, 2));
        assert_eq!(buf.to_rgba_bytes(), data);
        assert_eq!(buf.scale(), 2.0);
    }

    #[test]
    fn test_decode_rotated_uses_stored_grid() {
        let data = vec![7u8; 4 * 2 * 4];
        let bmp = RasterBitmap::new(4, 2, data, Orientation::Left, 1.0).unwrap();
        assert_eq!(bmp.size(), (2, 4));
        let buf = PixelBuffer::decode(&bmp).unwrap();
        assert_eq!((buf.width(), buf.height()), (4, 2));
        assert_eq!(buf.orientation(), Orientation::Left);
    }

    #[test]
    fn test_decode_without_pixels_fails() {
        let bmp = RasterBitmap::without_pixels(3, 3, Orientation::Up);
        let err = PixelBuffer::decode(&bmp).unwrap_err();
        assert!(matches!(err, CoreError::DecodeFailure(_)));
    }

    #[test]
    fn test_decode_empty_size_fails() {
        let bmp = RasterBitmap::new(0, 0, Vec::new(), Orientation::Up, 1.0).unwrap();
        assert!(matches!(
            PixelBuffer::decode(&bmp),
            Err(CoreError::DecodeFailure(_))
        ));
    }

    #[test]
    fn test_raster_bitmap_rejects_overflowing_size() {
        assert!(RasterBitmap::new(u32::MAX, u32::MAX, Vec::new(), Orientation::Up, 1.0).is_none());
        assert_eq!(rgba_len(u32::MAX, u32::MAX), None);
        assert_eq!(rgba_len(3, 2), Some(24));
    }

    #[test]
    fn test_to_bitmap_carries_presentation() {
        let buf = PixelBuffer::new(3, 1).with_presentation(Orientation::Down, 3.0);
        let bmp: RasterBitmap = buf.to_bitmap().unwrap();
        assert_eq!(bmp.stored_size(), (3, 1));
        assert_eq!(bmp.orientation(), Orientation::Down);
        assert_eq!(bmp.scale(), 3.0);
    }

    #[test]
    fn test_draw_rgba_stretches_nearest() {
        let bmp = RasterBitmap::new(1, 1, vec![1, 2, 3, 4], Orientation::Up, 1.0).unwrap();
        let out = bmp.draw_rgba(2, 2).unwrap();
        assert_eq!(out, [1, 2, 3, 4].repeat(4));
    }
}
