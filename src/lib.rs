pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod generation;
pub mod i18n;
pub mod render;
pub mod session;
