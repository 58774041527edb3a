pub mod app;
pub mod editor;
pub mod effects;
pub mod logging;
pub mod persistence;
pub mod terminal;
pub mod ui;
