pub mod compatibility;
pub mod requirement;

pub use compatibility::{evaluate, CompatibilityVerdict};
pub use requirement::LoaderRequirement;
