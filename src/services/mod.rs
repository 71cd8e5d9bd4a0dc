pub mod contact_lifecycle;

pub use contact_lifecycle::{ContactLifecycleService, ImageTransition};
