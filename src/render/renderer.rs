//! Renderer: applies one queue entry to the surface.

use super::carriage::CarriageReturn;
use crate::error::Result;
use crate::surface::TextSurface;

/// Writes text into a surface on behalf of the drain loop.
///
/// Every call unlocks the surface, mutates it and locks it again, so the
/// surface is read-only to the user between ticks.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    /// Carriage-return state of the surface.
    carriage: CarriageReturn,
    /// Follow new output when the view is already at the bottom.
    auto_scroll: bool,
}

impl Renderer {
    /// Create a renderer.
    pub const fn new(auto_scroll: bool) -> Self {
        Self {
            carriage: CarriageReturn::new(),
            auto_scroll,
        }
    }

    /// Carriage-return state.
    pub const fn carriage(&self) -> &CarriageReturn {
        &self.carriage
    }

    /// Erase the surface if `erase` is set, then append `text` if given.
    ///
    /// The surface is made read-only again even when a step fails.
    pub fn render<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: Option<&str>,
        erase: bool,
    ) -> Result<()> {
        surface.set_editable(true);
        let result = self.render_unlocked(surface, text, erase);
        surface.set_editable(false);
        result
    }

    /// Erase everything.
    pub fn erase<S: TextSurface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        self.render(surface, None, true)
    }

    /// Append text without erasing.
    pub fn append<S: TextSurface + ?Sized>(&mut self, surface: &mut S, text: &str) -> Result<()> {
        self.render(surface, Some(text), false)
    }

    fn render_unlocked<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: Option<&str>,
        erase: bool,
    ) -> Result<()> {
        if erase {
            surface.clear_all()?;
            self.carriage.reset();
        }

        if let Some(text) = text {
            // Sampled before the append: growing content moves the fraction off 1.0.
            let at_bottom = surface.scroll_fraction() >= 1.0;
            self.carriage.write_text(surface, text)?;
            if self.auto_scroll && at_bottom {
                surface.scroll_to_end()?;
            }
        }

        Ok(())
    }
}
