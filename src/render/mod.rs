//! # Render Module
//!
//! Hands a finished [`DailyCountMatrix`] to whatever draws the video.
//!
//! The crate does not encode video itself. A [`Renderer`] receives the
//! matrix together with a [`RenderLayout`] and returns the bytes of the
//! finished file. [`CommandRenderer`] does this by calling an external
//! program with the matrix as CSV and the layout as JSON.

mod command;
mod export;

use serde::Serialize;

use crate::{errors::TimelapseError, timeline::DailyCountMatrix};

pub use command::CommandRenderer;
pub use export::write_matrix_csv;

/// Presentation settings passed along with the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderLayout {
    pub title: String,
    /// Widest label line in characters.
    pub label_width: usize,
    /// Left figure margin reserved for labels, as a fraction of the width.
    pub left_margin: f64,
    pub bars: usize,
    pub steps_per_period: u32,
    pub period_length_ms: u32,
    /// Width and height in inches.
    pub figure_size: (f64, f64),
    pub dpi: u32,
    /// The period summary shows the total of this many leading bars.
    pub summary_top: usize,
    /// Fixed upper bound of the value axis.
    pub x_limit: f64,
}

impl RenderLayout {
    /// Layout for `matrix` with the fixed chart settings.
    ///
    /// # Arguments
    ///
    /// * `title` - Text above the chart
    /// * `label_width` - Widest label line in characters, sets the left margin
    /// * `matrix` - The pruned table; its largest value fixes the axis
    pub fn new(title: String, label_width: usize, matrix: &DailyCountMatrix) -> Self {
        Self {
            title,
            label_width,
            left_margin: label_width as f64 / 110.0,
            bars: crate::timeline::TOP_ENTITIES,
            steps_per_period: 15,
            period_length_ms: 250,
            figure_size: (8.0, 4.5),
            dpi: 250,
            summary_top: 6,
            x_limit: matrix.max_value() as f64 + 0.5,
        }
    }
}

/// Produces a video from a count matrix.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    async fn render(
        &self,
        matrix: &DailyCountMatrix,
        layout: &RenderLayout,
    ) -> Result<Vec<u8>, TimelapseError>;
}
