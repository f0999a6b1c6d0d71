//! Model module - Viewer state and data types
//!
//! All state here is ephemeral and owned by the mounted viewer:
//!
//! - `types`: Small shared types (rotation, fit mode, seek cue, page input)
//! - `resource`: Learning-material descriptors and course files
//! - `playback`: Video playback state
//! - `viewer`: Document and image viewer state
//! - `visibility`: Auto-hide state for on-screen controls
//! - `app_model`: Course shell model holding the mounted viewer

mod types;
mod resource;
mod playback;
mod viewer;
mod visibility;
mod app_model;

pub use types::{InputFocus, PageJumpInput, Rotation, SeekDirection, SeekFeedback};

pub use resource::{CourseFile, ResourceDescriptor, ResourceKind};

pub use playback::PlaybackState;

pub use viewer::{ImageState, ViewerState};

pub use app_model::{AppModel, ViewerKind};
