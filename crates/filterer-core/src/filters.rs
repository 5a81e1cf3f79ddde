use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::pixel::Pixel;

// =============================================================================
// Filter kinds and slider metadata
// =============================================================================

/// The kinds of filter the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    Monochrome,
    Brightness,
    Contrast,
}

impl FilterKind {
    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Monochrome => "Monochrome",
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
        }
    }

    /// The slider parameter for this kind, if it has one. The ranges are
    /// presentation hints only; filters never clamp to them.
    pub fn parameter_definition(&self) -> Option<ParameterDefinition> {
        match self {
            Self::Monochrome => None,
            Self::Brightness => Some(ParameterDefinition {
                name: "factor",
                label: "Brightness",
                default: BrightnessFilter::DEFAULT_FACTOR,
                min: 0.0,
                max: 2.0,
            }),
            Self::Contrast => Some(ParameterDefinition {
                name: "factor",
                label: "Contrast",
                default: ContrastFilter::DEFAULT_FACTOR,
                min: 0.0,
                max: 3.0,
            }),
        }
    }

    /// A filter of this kind with default parameters.
    pub fn default_filter(&self) -> Filter {
        match self {
            Self::Monochrome => Filter::Monochrome,
            Self::Brightness => Filter::Brightness(BrightnessFilter::default()),
            Self::Contrast => Filter::Contrast(ContrastFilter::default()),
        }
    }

    /// All built-in filter kinds.
    pub fn all_builtin() -> Vec<FilterKind> {
        vec![Self::Monochrome, Self::Brightness, Self::Contrast]
    }
}

/// Definition of a filter's single float parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub default: f32,
    pub min: f32,
    pub max: f32,
}

// =============================================================================
// PixelFilter trait
// =============================================================================

/// A per-pixel transform producing a buffer of the same dimensions.
pub trait PixelFilter: Send + Sync {
    /// Transform a buffer the caller has handed over. Implementations work in
    /// place on `input` and return it.
    fn process(&self, input: PixelBuffer) -> PixelBuffer;

    /// Transform a copy of `image`, leaving the caller's buffer untouched.
    fn process_image(&self, image: &PixelBuffer) -> PixelBuffer {
        self.process(image.clone())
    }
}

// Row-based parallelism to avoid rayon micro-task overhead
fn for_each_pixel<F>(buffer: &mut PixelBuffer, f: F)
where
    F: Fn(&mut Pixel) + Send + Sync,
{
    let row_len = (buffer.width() as usize).max(1);
    buffer
        .pixels_mut()
        .par_chunks_mut(row_len)
        .for_each(|row| row.iter_mut().for_each(&f));
}

/// Replaces red, green and blue with their truncated average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonochromeFilter;

impl PixelFilter for MonochromeFilter {
    fn process(&self, mut input: PixelBuffer) -> PixelBuffer {
        for_each_pixel(&mut input, |pixel| {
            let sum = pixel.red() as u16 + pixel.green() as u16 + pixel.blue() as u16;
            let average = (sum / 3) as u8;
            pixel.set_red(average);
            pixel.set_green(average);
            pixel.set_blue(average);
            // alpha unchanged
        });
        input
    }
}

/// Scales red, green and blue by `factor`, capped at 255.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBrightness")]
pub struct BrightnessFilter {
    factor: f32,
}

// Presets are raw input, so they go through the same sign normalization as `new`.
#[derive(Deserialize)]
struct RawBrightness {
    factor: f32,
}

impl From<RawBrightness> for BrightnessFilter {
    fn from(raw: RawBrightness) -> Self {
        Self::new(raw.factor)
    }
}

impl BrightnessFilter {
    pub const DEFAULT_FACTOR: f32 = 1.5;

    /// Build from a raw input; the sign is dropped.
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.abs(),
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Replace the factor as-is, without normalizing the sign.
    pub fn set_factor(&mut self, factor: f32) {
        self.factor = factor;
    }
}

impl Default for BrightnessFilter {
    fn default() -> Self {
        Self {
            factor: Self::DEFAULT_FACTOR,
        }
    }
}

impl PixelFilter for BrightnessFilter {
    fn process(&self, mut input: PixelBuffer) -> PixelBuffer {
        let factor = self.factor;
        // f32::round is ties-away-from-zero; `as u8` saturates below zero
        let scale = move |c: u8| (c as f32 * factor).min(255.0).round() as u8;
        for_each_pixel(&mut input, |pixel| {
            pixel.set_red(scale(pixel.red()));
            pixel.set_green(scale(pixel.green()));
            pixel.set_blue(scale(pixel.blue()));
        });
        input
    }
}

/// Scales each channel's distance from the image-wide channel mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastFilter {
    factor: f32,
}

impl ContrastFilter {
    pub const DEFAULT_FACTOR: f32 = 0.5;

    /// Negative or large factors are accepted and invert or exaggerate contrast.
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn set_factor(&mut self, factor: f32) {
        self.factor = factor;
    }
}

impl Default for ContrastFilter {
    fn default() -> Self {
        Self {
            factor: Self::DEFAULT_FACTOR,
        }
    }
}

/// Per-channel (red, green, blue) mean, rounded to the nearest integer.
///
/// Each pixel contributes `channel / count` so the accumulator stays in
/// `[0, 255]`. Summation is sequential so the result doesn't depend on
/// thread scheduling.
pub fn channel_means(pixels: &[Pixel]) -> [i32; 3] {
    if pixels.is_empty() {
        return [0; 3];
    }
    let count = pixels.len() as f32;
    let mut means = [0f32; 3];
    for pixel in pixels {
        means[0] += pixel.red() as f32 / count;
        means[1] += pixel.green() as f32 / count;
        means[2] += pixel.blue() as f32 / count;
    }
    means.map(|m| m.round() as i32)
}

impl PixelFilter for ContrastFilter {
    fn process(&self, mut input: PixelBuffer) -> PixelBuffer {
        let [mean_r, mean_g, mean_b] = channel_means(input.pixels());
        let factor = self.factor;
        let adjust = move |c: u8, mean: i32| {
            let delta = c as i32 - mean;
            let scaled = (delta as f32 * factor).round() as i32;
            mean.saturating_add(scaled).clamp(0, 255) as u8
        };
        for_each_pixel(&mut input, |pixel| {
            pixel.set_red(adjust(pixel.red(), mean_r));
            pixel.set_green(adjust(pixel.green(), mean_g));
            pixel.set_blue(adjust(pixel.blue(), mean_b));
        });
        input
    }
}

// =============================================================================
// Filter
// =============================================================================

/// One configured filter: the closed set of transforms a chain can hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Filter {
    Monochrome,
    Brightness(BrightnessFilter),
    Contrast(ContrastFilter),
}

impl Filter {
    pub fn monochrome() -> Self {
        Self::Monochrome
    }

    /// Brightness from a raw input; the factor's sign is dropped.
    pub fn brightness(factor: f32) -> Self {
        Self::Brightness(BrightnessFilter::new(factor))
    }

    pub fn contrast(factor: f32) -> Self {
        Self::Contrast(ContrastFilter::new(factor))
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Monochrome => FilterKind::Monochrome,
            Self::Brightness(_) => FilterKind::Brightness,
            Self::Contrast(_) => FilterKind::Contrast,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }

    /// Current slider parameter, if the filter has one.
    pub fn parameter(&self) -> Option<f32> {
        match self {
            Self::Monochrome => None,
            Self::Brightness(f) => Some(f.factor()),
            Self::Contrast(f) => Some(f.factor()),
        }
    }

    /// A copy with the slider parameter replaced. Monochrome ignores it.
    pub fn with_parameter(mut self, value: f32) -> Self {
        match &mut self {
            Self::Monochrome => {}
            Self::Brightness(f) => f.set_factor(value),
            Self::Contrast(f) => f.set_factor(value),
        }
        self
    }

    fn as_pixel_filter(&self) -> &dyn PixelFilter {
        match self {
            Self::Monochrome => &MonochromeFilter,
            Self::Brightness(f) => f,
            Self::Contrast(f) => f,
        }
    }
}

impl PixelFilter for Filter {
    fn process(&self, input: PixelBuffer) -> PixelBuffer {
        self.as_pixel_filter().process(input)
    }
}
