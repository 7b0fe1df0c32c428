//! Interaction core of the editor: wall placement, selection, gizmo
//! constraints, label sync and furniture load bookkeeping.
//!
//! Nothing here knows about windows or GPUs.

mod assets;
mod editor;
mod gizmo;
mod labels;
mod notices;
mod placement;
mod selection;
mod settings;

pub use assets::{LoadRequest, LoadToken, LoadTracker};
pub use editor::{ClickOutcome, Editor, LoadOutcome};
pub use gizmo::{GizmoAxis, GizmoDrag, TransformMode, constrain_wall_transform};
pub use labels::sync_labels;
pub use notices::{NOTICE_CAPACITY, Notice, NoticeLevel, NoticeLog};
pub use placement::{PlacementOutcome, PlacementState, WallDraft, WallPlacement};
pub use selection::{Outline, Selection, SelectionState};
pub use settings::{
    DEFAULT_GROUND_HALF_EXTENT, DEFAULT_LABEL_GAP, DEFAULT_WALL_HEIGHT, EditorSettings,
    MIN_WALL_HEIGHT, WALL_HEIGHT_STEP,
};
