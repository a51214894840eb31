/// Default editor and preview font size in px.
pub const DEFAULT_FONT_SIZE: u16 = 14;
pub const MIN_FONT_SIZE: u16 = 10;
pub const MAX_FONT_SIZE: u16 = 24;
pub const FONT_SIZE_STEP: u16 = 2;

/// Viewports this wide or narrower stack the panes vertically.
pub const NARROW_VIEWPORT_WIDTH: u32 = 768;

/// Bounds for the preview pane, as fractions of the container.
const MIN_SPLIT: f64 = 0.15;
const MAX_SPLIT: f64 = 0.85;

/// Font size shared by the editor and the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSize(u16);

impl FontSize {
    pub const fn px(self) -> u16 {
        self.0
    }

    /// Grow by one step. Returns `false` at the maximum.
    pub fn increase(&mut self) -> bool {
        if self.0 >= MAX_FONT_SIZE {
            return false;
        }
        self.0 = (self.0 + FONT_SIZE_STEP).min(MAX_FONT_SIZE);
        true
    }

    /// Shrink by one step. Returns `false` at the minimum.
    pub fn decrease(&mut self) -> bool {
        if self.0 <= MIN_FONT_SIZE {
            return false;
        }
        self.0 = self.0.saturating_sub(FONT_SIZE_STEP).max(MIN_FONT_SIZE);
        true
    }

    /// CSS custom properties the page reads its font sizes from.
    pub fn css_variables(self) -> String {
        format!(
            "--editor-font-size: {px}px; --preview-font-size: {px}px;",
            px = self.0
        )
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(DEFAULT_FONT_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Editor and preview side by side.
    Horizontal,
    /// Preview stacked above the editor.
    Vertical,
}

/// Split between the editor and preview panes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLayout {
    orientation: Orientation,
    /// Preview pane size as a percentage of the container.
    preview_percent: f64,
}

impl SplitLayout {
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub const fn preview_percent(&self) -> f64 {
        self.preview_percent
    }

    /// Pick the orientation for a viewport `width` px wide.
    pub fn viewport_resized(&mut self, width: u32) {
        self.orientation = if width <= NARROW_VIEWPORT_WIDTH {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
    }

    /// Apply a drag that would make the preview `proposed` px out of
    /// `container` px. Proposals outside 15%-85% are rejected.
    ///
    /// Returns whether the split changed.
    pub fn propose(&mut self, proposed: f64, container: f64) -> bool {
        if container.is_nan() || container <= 0.0 || !proposed.is_finite() {
            return false;
        }
        if proposed < container * MIN_SPLIT || proposed > container * MAX_SPLIT {
            return false;
        }
        self.preview_percent = proposed / container * 100.0;
        true
    }
}

impl Default for SplitLayout {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            preview_percent: 50.0,
        }
    }
}
