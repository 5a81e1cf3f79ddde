use filterer_core::buffer::{Orientation, PixelBuffer};
use filterer_core::pixel::Pixel;

/// Builder for test PixelBuffers with sensible defaults.
pub struct PixelBufferBuilder {
    width: u32,
    height: u32,
    fill: Pixel,
    overrides: Vec<(u32, u32, Pixel)>,
    orientation: Orientation,
    scale: f64,
}

impl PixelBufferBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fill: Pixel::from_rgba(0, 0, 0, 255),
            overrides: Vec::new(),
            orientation: Orientation::Up,
            scale: 1.0,
        }
    }

    pub fn fill(mut self, r: u8, g: u8, b: u8, a: u8) -> Self {
        self.fill = Pixel::from_rgba(r, g, b, a);
        self
    }

    pub fn pixel(mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Self {
        self.overrides.push((x, y, Pixel::from_rgba(r, g, b, a)));
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn build(self) -> PixelBuffer {
        let count = self.width as usize * self.height as usize;
        let mut buffer = PixelBuffer::from_pixels(self.width, self.height, vec![self.fill; count])
            .with_presentation(self.orientation, self.scale);
        for (x, y, pixel) in self.overrides {
            *buffer.pixel_mut(x, y) = pixel;
        }
        buffer
    }
}

/// A buffer where every channel varies with position, alpha included.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                Pixel::from_rgba(
                    (x * 37 % 256) as u8,
                    (y * 53 % 256) as u8,
                    ((x + y) * 29 % 256) as u8,
                    (255 - (x * y) % 256) as u8,
                )
            })
        })
        .collect();
    PixelBuffer::from_pixels(width, height, pixels)
}

/// A buffer whose pixels are all gray (red == green == blue).
pub fn gray_ramp(width: u32, height: u32) -> PixelBuffer {
    let pixels = (0..width * height)
        .map(|i| {
            let v = (i * 7 % 256) as u8;
            Pixel::from_rgba(v, v, v, 200)
        })
        .collect();
    PixelBuffer::from_pixels(width, height, pixels)
}
