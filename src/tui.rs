//! Ratatui front-end: a menu to configure the table and a table view that forwards key
//! presses to [`crate::table::Table`].

pub mod app;
pub mod controller;
mod ui;
