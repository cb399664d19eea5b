pub mod acquisition;
pub mod badge_name;
pub mod composer;
pub mod compositor;
pub mod exporter;
pub mod session;

// --- public re-exports ---
pub use badge_name::BadgeName;
pub use composer::BadgeComposer;
pub use session::{Photo, Session, TemplateState};
