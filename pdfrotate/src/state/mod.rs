//! Rotation state for one document session.
//!
//! - [`rotation`]: the normalized quarter-turn view of an angle
//! - [`store`]: the action-driven store holding per-page rotation, thumbnail
//!   size and the processing flag

pub mod rotation;
pub mod store;

pub use rotation::PageRotation;
pub use store::{
    Action, DEFAULT_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE, MIN_THUMBNAIL_SIZE, PageRotationEntry,
    RotationSnapshot, RotationState, RotationStore, THUMBNAIL_SIZE_STEP, reduce,
};
