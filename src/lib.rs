pub mod clean;
pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod plots;
pub mod preprocess;
pub mod stats;
