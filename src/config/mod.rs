//! Configuration module

mod build;

pub use build::BuildConfig;
pub use build::HighlightConfig;
pub use build::PassConfig;
pub use build::StylesheetConfig;
