// Checkbox-driven visibility toggle for the raster base layers.
use serde_json::{json, Value};

use crate::style::{photo_opacity_ramp, PALE_LAYER, PHOTO_LAYER};
use crate::surface::MapSurface;

/// Applies the background checkbox state to the two base layers. Holds the
/// photo layer's startup opacity ramp so re-enabling restores it verbatim.
pub struct BackgroundToggle {
    photo_opacity: Value,
}

impl BackgroundToggle {
    pub fn new() -> Self {
        BackgroundToggle {
            photo_opacity: photo_opacity_ramp(),
        }
    }

    /// Checked shows both base layers (the photo layer back on its zoom
    /// ramp); unchecked makes both fully transparent.
    pub fn apply(&self, surface: &dyn MapSurface, visible: bool) {
        let pale_opacity = if visible { json!(1) } else { json!(0) };
        surface.set_paint_property(PALE_LAYER, "raster-opacity", &pale_opacity);

        if visible {
            surface.set_paint_property(PHOTO_LAYER, "raster-opacity", &self.photo_opacity);
        } else {
            surface.set_paint_property(PHOTO_LAYER, "raster-opacity", &json!(0));
        }
    }
}

impl Default for BackgroundToggle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    #[test]
    fn unchecked_hides_both_base_layers() {
        let surface = RecordingSurface::new();
        let toggle = BackgroundToggle::new();

        toggle.apply(&surface, false);

        assert_eq!(
            surface.last_paint(PALE_LAYER, "raster-opacity"),
            Some(json!(0))
        );
        assert_eq!(
            surface.last_paint(PHOTO_LAYER, "raster-opacity"),
            Some(json!(0))
        );
    }

    #[test]
    fn rechecking_restores_the_original_photo_ramp() {
        let surface = RecordingSurface::new();
        let toggle = BackgroundToggle::new();

        toggle.apply(&surface, false);
        toggle.apply(&surface, true);

        assert_eq!(
            surface.last_paint(PALE_LAYER, "raster-opacity"),
            Some(json!(1))
        );
        // Round-trip: the exact startup breakpoints, not a constant
        assert_eq!(
            surface.last_paint(PHOTO_LAYER, "raster-opacity"),
            Some(photo_opacity_ramp())
        );
    }
}
