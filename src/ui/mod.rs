//! Terminal presentation for the `deploy` binary

pub mod blocks;
pub mod components;
pub mod context;
pub mod error;
pub mod events;
pub mod output;
pub mod primitives;
pub mod prompt;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
