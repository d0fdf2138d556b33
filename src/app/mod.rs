//! Application layer: navigation and the design flow.

mod flow;
mod navigation;

pub use flow::{CUSTOM_DESIGN_TITLE, DesignFlow};
pub use navigation::{NavigationState, Screen};
