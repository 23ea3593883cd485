pub mod animation;
pub mod calendar;
pub mod cmds;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod month;
pub mod navigation;
pub mod ui;
