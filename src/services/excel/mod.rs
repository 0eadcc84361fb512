pub mod loader;
pub mod preview;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
pub mod fixtures;

pub use loader::SiigoLoader;
pub use preview::preview_export;
pub use writer::write_report;
