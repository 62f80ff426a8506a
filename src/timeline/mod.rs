//! # Timeline Module
//!
//! Turns pages of scrobbles into the table a bar chart race is drawn from.
//!
//! ```text
//! pages -> labelled events -> counts per day -> dense running totals
//!       -> top entities per day -> held values for dropped entities
//! ```
//!
//! [`build_table`] produces the cumulative [`DailyCountMatrix`] and
//! [`optimize_table`] bounds it to what a frame can show. Both are pure and
//! deterministic; the same pages always give the same table.

mod builder;
mod labels;
mod matrix;
mod prune;

pub use builder::BuiltTable;
pub use builder::build_table;
pub use builder::count_per_day;
pub use builder::scrobble_date;
pub use builder::scrobble_events;
pub use labels::entity_label;
pub use labels::label_width;
pub use matrix::DailyCountMatrix;
pub use prune::TOP_ENTITIES;
pub use prune::drop_empty_columns;
pub use prune::forward_fill_zeros;
pub use prune::keep_top_per_row;
pub use prune::optimize_table;
