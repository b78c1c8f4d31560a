// src/ui/widgets/mod.rs

// One module per screen region.
pub mod disclaimer_popup;
pub mod footer;
pub mod input;
pub mod log_view;
pub mod report_view;
pub mod summary;
