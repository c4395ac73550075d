//! Controller layer: UI events, reducer-like grid state, and command
//! orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
