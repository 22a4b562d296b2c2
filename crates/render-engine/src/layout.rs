//! Strip geometry.
//!
//! All values are output pixels.

use chacha_common::error::{BoothError, BoothResult};

/// Rectangle a photo is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SlotRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn overlaps(&self, other: &SlotRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Where the date stamp goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampPlacement {
    /// Horizontal centre of the text.
    pub center_x: f32,
    /// Text baseline.
    pub baseline_y: f32,
    /// Font size (CSS pixels, i.e. em height).
    pub size_px: f32,
}

/// Full strip layout.
#[derive(Debug, Clone, PartialEq)]
pub struct StripLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Photo rectangles, top to bottom, indexed by slot.
    pub slots: Vec<SlotRect>,
    pub stamp: StampPlacement,
}

pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 3150;
pub const SLOT_X: u32 = 100;
pub const SLOT_WIDTH: u32 = 1000;
pub const SLOT_HEIGHT: u32 = 750;
pub const SLOT_Y: [u32; 3] = [280, 1180, 2080];

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            slots: SLOT_Y
                .iter()
                .map(|&y| SlotRect::new(SLOT_X, y, SLOT_WIDTH, SLOT_HEIGHT))
                .collect(),
            stamp: StampPlacement {
                center_x: 600.0,
                baseline_y: 3080.0,
                size_px: 50.0,
            },
        }
    }
}

impl StripLayout {
    /// Rectangle for a slot, if the layout has one.
    pub fn slot(&self, index: usize) -> Option<SlotRect> {
        self.slots.get(index).copied()
    }

    /// Check that every slot lies on the canvas and no two slots overlap.
    pub fn validate(&self) -> BoothResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(BoothError::config("Strip canvas must not be empty"));
        }

        for (i, slot) in self.slots.iter().enumerate() {
            if slot.width == 0 || slot.height == 0 {
                return Err(BoothError::config(format!("Slot {i} has zero size")));
            }
            if slot.right() > self.canvas_width || slot.bottom() > self.canvas_height {
                return Err(BoothError::config(format!(
                    "Slot {i} extends past the {}x{} canvas",
                    self.canvas_width, self.canvas_height
                )));
            }
            for (j, other) in self.slots.iter().enumerate().skip(i + 1) {
                if slot.overlaps(other) {
                    return Err(BoothError::config(format!("Slots {i} and {j} overlap")));
                }
            }
        }
        Ok(())
    }
}
