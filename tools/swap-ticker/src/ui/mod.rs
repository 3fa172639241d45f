//! UI module - TUI rendering components.
//!
//! - `layout.rs`: header, card grid and footer
//! - `card.rs`: one instrument card with its sparkline
//!
//! Rendering is a pure function of the dashboard state.

mod card;
mod layout;

pub use card::{card_color, sparkline_points, y_bounds, CARD_HEIGHT};
pub use layout::{card_columns, render, WIDE_LAYOUT_MIN_WIDTH};
