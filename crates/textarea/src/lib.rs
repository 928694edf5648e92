//! An autosizing textarea component built on the `autosize` measurement core.
//!
//! [`TextareaAutosize`] owns the per-element state the core leaves to its
//! caller: the measurement cache slot, the last applied heights, the
//! height-change callback and the viewport-resize subscription.

pub mod component;
pub mod config;
pub mod events;

pub use component::{AutosizeProps, ChangeCallback, HeightChangeCallback, Heights, RenderedStyle, TextareaAutosize};
pub use config::AutosizeConfig;
pub use events::ResizeEvents;
