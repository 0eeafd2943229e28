pub mod app;
pub mod events;
pub mod form;
pub mod theme;
pub mod widgets;
