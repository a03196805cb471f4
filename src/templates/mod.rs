pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{property_grid, status_banner};
pub use layouts::desktop::desktop_layout;
