use log::debug;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::filters::{Filter, PixelFilter};

/// An ordered list of filters applied left to right. Empty is the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Replace the whole filter list.
    pub fn set_filters(&mut self, filters: Vec<Filter>) {
        self.filters = filters;
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Run every filter in order on a copy of `image`, threading each output
    /// into the next filter.
    pub fn process_image(&self, image: &PixelBuffer) -> PixelBuffer {
        debug!(
            "applying {} filter(s) to {}x{} image",
            self.filters.len(),
            image.width(),
            image.height()
        );
        self.filters
            .iter()
            .fold(image.clone(), |buffer, filter| filter.process(buffer))
    }

    /// Export as a JSON preset.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import a JSON preset.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::pixel::Pixel;

    fn colored() -> PixelBuffer {
        PixelBuffer::from_pixels(
            2,
            1,
            vec![Pixel::from_rgba(200, 40, 10, 255), Pixel::from_rgba(0, 90, 30, 128)],
        )
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let buf = colored();
        let out = FilterChain::default().process_image(&buf);
        assert_eq!(out, buf);
    }

    #[test]
    fn test_chain_order_matches_manual_application() {
        let buf = colored();
        let chain = FilterChain::new(vec![Filter::monochrome(), Filter::brightness(2.0)]);
        let manual = Filter::brightness(2.0).process_image(&Filter::monochrome().process_image(&buf));
        let reversed = Filter::monochrome().process_image(&Filter::brightness(2.0).process_image(&buf));
        let out = chain.process_image(&buf);
        assert_eq!(out, manual);
        assert_ne!(out, reversed);
    }

    #[test]
    fn test_set_filters_replaces_list() {
        let mut chain = FilterChain::new(vec![Filter::monochrome()]);
        chain.set_filters(vec![Filter::contrast(2.0), Filter::brightness(1.0)]);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.filters()[0], Filter::contrast(2.0));
        chain.clear();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_json_preset_roundtrip() {
        let chain = FilterChain::new(vec![
            Filter::monochrome(),
            Filter::brightness(1.25),
            Filter::contrast(-0.5),
        ]);
        let json = chain.to_json().unwrap();
        assert_eq!(FilterChain::from_json(&json).unwrap(), chain);
    }

    #[test]
    fn test_json_preset_format() {
        let chain = FilterChain::from_json(
            r#"{"filters":[{"kind":"Monochrome"},{"kind":"Contrast","factor":2.0}]}"#,
        )
        .unwrap();
        assert_eq!(chain.filters(), &[Filter::monochrome(), Filter::contrast(2.0)]);
    }

    #[test]
    fn test_json_preset_negative_brightness_normalized() {
        let chain =
            FilterChain::from_json(r#"{"filters":[{"kind":"Brightness","factor":-1.5}]}"#)
                .unwrap();
        assert_eq!(chain.filters(), &[Filter::brightness(1.5)]);

        let buf = PixelBuffer::from_pixels(1, 1, vec![Pixel::from_rgba(100, 100, 100, 255)]);
        assert_eq!(
            chain.process_image(&buf).pixel(0, 0).to_rgba(),
            [150, 150, 150, 255]
        );
    }

    #[test]
    fn test_json_preset_invalid() {
        let err = FilterChain::from_json(r#"{"filters":[{"kind":"Sepia"}]}"#).unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
