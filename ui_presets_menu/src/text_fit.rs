// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common label text size for menu items.
//!
//! In [`TextSizingMode::MinimumCommon`] the largest font size at which every active
//! label fits its cell is searched with a linear decrement. The search can take many
//! measurements, so [`TextFitProbe`] is a resumable state object: the host calls
//! [`TextFitProbe::step`] once per frame until it reports [`FitStep::Ready`].
//!
//! ```
//! use kurbo::Size;
//! use ui_presets_menu::{FitStep, TextFitProbe, TextMeasure};
//!
//! // Pretend every glyph is half as wide as the font size.
//! struct Monospace;
//! impl TextMeasure for Monospace {
//!     fn fits(&self, text: &str, font_size: f64, cell: Size) -> bool {
//!         text.len() as f64 * font_size * 0.5 <= cell.width && font_size <= cell.height
//!     }
//! }
//!
//! let mut probe = TextFitProbe::new(["Copy", "Paste"], Size::new(50.0, 20.0));
//! let size = loop {
//!     if let FitStep::Ready(size) = probe.step(&Monospace) {
//!         break size;
//!     }
//! };
//! // Both labels fit at 20; a quarter is shaved off for padding.
//! assert_eq!(size, 15.0);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;

/// Font size the search starts from.
pub const START_TEXT_SIZE: f64 = 80.0;
/// Decrement per measurement.
pub const TEXT_SIZE_STEP: f64 = 2.0;
/// Smallest size the search goes down to.
pub const MIN_TEXT_SIZE: f64 = 2.0;

/// How a menu derives the text size of its item labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextSizingMode {
    /// Largest size at which every active label fits, minus a fixed 25% padding.
    #[default]
    MinimumCommon,
    /// The trigger's own text size multiplied by a scale factor.
    Scaled(f64),
}

impl TextSizingMode {
    /// Label size for `Scaled`, given the trigger's text size. `None` for `MinimumCommon`.
    pub fn scaled_size(self, base_text_size: f64) -> Option<f64> {
        match self {
            Self::MinimumCommon => None,
            Self::Scaled(scale) => Some(scale * base_text_size),
        }
    }
}

/// Host text measurement.
pub trait TextMeasure {
    /// Whether `text` rendered at `font_size` fits inside `cell`.
    fn fits(&self, text: &str, font_size: f64, cell: Size) -> bool;
}

/// Progress of a [`TextFitProbe`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitStep {
    /// The size was reduced; call [`TextFitProbe::step`] again on the next frame.
    Pending,
    /// Final label size, padding already applied.
    Ready(f64),
}

/// Resumable search for the common label size. Dropping the probe cancels it.
///
/// The size carries over from one label to the next, so the result is the
/// largest size that fits the most demanding label.
#[derive(Clone, Debug)]
pub struct TextFitProbe {
    labels: Vec<String>,
    cell: Size,
    size: f64,
    next: usize,
}

impl TextFitProbe {
    /// Start a search over `labels` for cells of size `cell`.
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>, cell: Size) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            cell,
            size: START_TEXT_SIZE,
            next: 0,
        }
    }

    /// Size currently being tried.
    pub fn current_size(&self) -> f64 {
        self.size
    }

    /// Cell the labels are measured against.
    pub fn cell(&self) -> Size {
        self.cell
    }

    /// Returns `true` once every label has been checked.
    pub fn is_done(&self) -> bool {
        self.next >= self.labels.len()
    }

    /// Advance the search by at most one size decrement.
    ///
    /// Labels that already fit are consumed without yielding. Once the floor is
    /// reached the remaining labels are accepted as they are.
    pub fn step(&mut self, measure: &impl TextMeasure) -> FitStep {
        while let Some(label) = self.labels.get(self.next) {
            if self.size <= MIN_TEXT_SIZE || measure.fits(label, self.size, self.cell) {
                self.next += 1;
                continue;
            }
            self.size = (self.size - TEXT_SIZE_STEP).max(MIN_TEXT_SIZE);
            return FitStep::Pending;
        }
        FitStep::Ready(padded(self.size))
    }

    /// Run the search without yielding.
    pub fn run_to_completion(mut self, measure: &impl TextMeasure) -> f64 {
        loop {
            if let FitStep::Ready(size) = self.step(measure) {
                tracing::trace!(size, "common text size resolved");
                return size;
            }
        }
    }
}

fn padded(size: f64) -> f64 {
    size - size / 4.0
}
