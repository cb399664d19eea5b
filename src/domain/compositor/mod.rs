pub mod badge_font;
pub mod compose;
pub mod geometry;
pub mod layout;
pub mod text;

// --- public re-exports ---
pub use badge_font::{BadgeFont, FontError};
pub use compose::{compose, Canvas, CompositionReport};
pub use layout::BadgeLayout;
pub use text::{fit_font_size, TextPainter};
