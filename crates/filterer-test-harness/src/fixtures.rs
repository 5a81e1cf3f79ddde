use filterer_core::buffer::{Orientation, RasterBitmap};

/// A black and white checkerboard bitmap with opaque pixels.
pub fn checkerboard(width: u32, height: u32, orientation: Orientation) -> RasterBitmap {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| if (x + y) % 2 == 0 { 255u8 } else { 0u8 }))
        .flat_map(|v| [v, v, v, 255])
        .collect();
    RasterBitmap::new(width, height, data, orientation, 2.0)
        .expect("checkerboard data length matches dimensions")
}

/// A bitmap of one repeated color.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RasterBitmap {
    let data = rgba.repeat(width as usize * height as usize);
    RasterBitmap::new(width, height, data, Orientation::Up, 1.0)
        .expect("solid data length matches dimensions")
}
