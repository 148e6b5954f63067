//! Sanitization and formatting helpers shared by every template and surface.
//!
//! Everything here is total: malformed input degrades to a safe value and
//! never aborts a render.

pub mod color;
pub mod date;
pub mod length;
pub mod text;

pub use color::{docx_hex, sanitize_color, DEFAULT_ACCENT};
pub use date::{date_range, format_date};
pub use length::{page_margin, sanitize_padding, DEFAULT_MARGIN_TWIPS};
pub use text::{escape_html, slugify, split_lines};
