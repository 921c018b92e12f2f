pub mod breakpoint;
pub mod chrome;
pub mod config;
pub mod error;
pub mod images;
pub mod log;
pub mod nav_highlight;
pub mod parallax;
pub mod pointer;
pub mod reveal;
pub mod slider;
pub mod startup;
pub mod tracking;
pub mod typing;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(test)]
mod fake_view;
