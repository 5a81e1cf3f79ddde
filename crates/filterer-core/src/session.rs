use log::debug;
use uuid::Uuid;

use crate::buffer::PixelBuffer;
use crate::chain::FilterChain;
use crate::error::{CoreError, Result};
use crate::filters::{Filter, PixelFilter};

/// Identifies one application of a filter. Slider events carry it so the
/// session never has to guess which filter they target.
pub type FilterId = Uuid;

/// The filter currently applied to the session's image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveFilter {
    pub id: FilterId,
    pub filter: Filter,
}

/// Editing state for one source image.
///
/// Filtering always starts from the original, so adjusting or re-applying
/// never compounds rounding from earlier results.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: PixelBuffer,
    chain: FilterChain,
    active: Option<ActiveFilter>,
    filtered: Option<PixelBuffer>,
    comparing: bool,
}

impl EditSession {
    pub fn new(original: PixelBuffer) -> Self {
        Self {
            original,
            chain: FilterChain::default(),
            active: None,
            filtered: None,
            comparing: false,
        }
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    pub fn filtered(&self) -> Option<&PixelBuffer> {
        self.filtered.as_ref()
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn active(&self) -> Option<&ActiveFilter> {
        self.active.as_ref()
    }

    /// The original with `filter` applied, without touching session state.
    pub fn preview(&self, filter: &Filter) -> PixelBuffer {
        filter.process_image(&self.original)
    }

    /// Make `filter` the only filter and render it from the original.
    pub fn apply(&mut self, filter: Filter) -> FilterId {
        let id = Uuid::new_v4();
        debug!("applying {} as {id}", filter.display_name());
        self.render(ActiveFilter { id, filter });
        id
    }

    /// Slider event for the filter applied as `id`. NaN and infinite values
    /// are rejected since they can't be stored in a preset.
    pub fn adjust(&mut self, id: FilterId, value: f32) -> Result<()> {
        if !value.is_finite() {
            return Err(CoreError::InvalidParameter(value));
        }
        let active = self
            .active
            .filter(|a| a.id == id)
            .ok_or(CoreError::FilterNotActive(id))?;
        debug!("adjusting {} to {value}", active.filter.display_name());
        self.render(ActiveFilter {
            id,
            filter: active.filter.with_parameter(value),
        });
        Ok(())
    }

    /// Drop the applied filter and go back to the original.
    pub fn undo(&mut self) -> Result<()> {
        let active = self.active.take().ok_or(CoreError::NothingToUndo)?;
        debug!("undoing {}", active.filter.display_name());
        self.chain.clear();
        self.filtered = None;
        self.comparing = false;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.active.is_some()
    }

    /// Show the original instead of the filtered image while set.
    pub fn set_comparing(&mut self, comparing: bool) {
        self.comparing = comparing;
    }

    pub fn is_comparing(&self) -> bool {
        self.comparing
    }

    /// The image the UI should show right now.
    pub fn displayed(&self) -> &PixelBuffer {
        match &self.filtered {
            Some(filtered) if !self.comparing => filtered,
            _ => &self.original,
        }
    }

    fn render(&mut self, active: ActiveFilter) {
        self.chain.set_filters(vec![active.filter]);
        self.filtered = Some(self.chain.process_image(&self.original));
        self.active = Some(active);
        self.comparing = false;
    }
}
