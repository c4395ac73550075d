//! UI layer for the desktop app: app shell and grid table rendering.

pub mod app;
pub mod table;

pub use app::{ArchiveApp, StartupConfig};
