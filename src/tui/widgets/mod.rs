pub mod form;
pub mod header;
pub mod heatmap;
pub mod history;
pub mod progress;
pub mod stats;
pub mod statusbar;
