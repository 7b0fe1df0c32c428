use archviz_geometry::{PlanePoint, snap_angle};
use archviz_scene::Wall;

const MIN_WALL_LENGTH: f64 = 1.0e-9;

/// Where the wall tool stands between clicks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PlacementState {
    #[default]
    Idle,
    AwaitingFirstPoint,
    AwaitingSecondPoint { start: PlanePoint },
}

impl PlacementState {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// A wall segment resolved from two snapped ground points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallDraft {
    pub start: PlanePoint,
    pub end: PlanePoint,
    pub length: f64,
    pub yaw: f64,
    pub center: PlanePoint,
}

impl WallDraft {
    /// `None` when both points coincide.
    pub fn between(start: PlanePoint, end: PlanePoint, angle_step: f64) -> Option<Self> {
        let length = start.distance(end);
        if !length.is_finite() || length <= MIN_WALL_LENGTH {
            return None;
        }
        Some(Self {
            start,
            end,
            length,
            yaw: snap_angle(start.heading_to(end), angle_step),
            center: start.midpoint(end),
        })
    }

    pub fn build(&self, height: f64, thickness: f64) -> Wall {
        Wall::new(self.length, height, thickness, self.center, self.yaw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementOutcome {
    /// Not placing, or the click missed the ground.
    Ignored,
    Started(PlanePoint),
    Committed(WallDraft),
    /// Second point landed on the first; the start is kept.
    Degenerate(PlanePoint),
}

/// Point-by-point wall authoring.
#[derive(Clone, Debug, Default)]
pub struct WallPlacement {
    state: PlacementState,
    preview: Option<(PlanePoint, PlanePoint)>,
}

impl WallPlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Flips placing mode and returns the new value.
    pub fn toggle(&mut self) -> bool {
        let active = !self.is_active();
        self.set_active(active);
        active
    }

    pub fn set_active(&mut self, active: bool) {
        if active {
            if !self.is_active() {
                self.state = PlacementState::AwaitingFirstPoint;
            }
        } else {
            self.cancel();
        }
    }

    pub fn captured_point(&self) -> Option<PlanePoint> {
        match self.state {
            PlacementState::AwaitingSecondPoint { start } => Some(start),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<(PlanePoint, PlanePoint)> {
        self.preview
    }

    /// Feeds a ground click. `point` is the raw ground hit, `None` when the
    /// pointer is off the floor.
    pub fn click(
        &mut self,
        point: Option<PlanePoint>,
        grid_step: f64,
        angle_step: f64,
    ) -> PlacementOutcome {
        let Some(point) = point else {
            return PlacementOutcome::Ignored;
        };
        let point = point.snapped(grid_step);
        match self.state {
            PlacementState::Idle => PlacementOutcome::Ignored,
            PlacementState::AwaitingFirstPoint => {
                self.state = PlacementState::AwaitingSecondPoint { start: point };
                PlacementOutcome::Started(point)
            }
            PlacementState::AwaitingSecondPoint { start } => {
                match WallDraft::between(start, point, angle_step) {
                    Some(draft) => {
                        self.state = PlacementState::AwaitingFirstPoint;
                        self.preview = None;
                        PlacementOutcome::Committed(draft)
                    }
                    None => PlacementOutcome::Degenerate(start),
                }
            }
        }
    }

    /// Refreshes the live segment. A pointer off the floor hides it.
    pub fn pointer_moved(&mut self, point: Option<PlanePoint>, grid_step: f64) {
        self.preview = match (self.captured_point(), point) {
            (Some(start), Some(point)) => Some((start, point.snapped(grid_step))),
            _ => None,
        };
    }

    pub fn cancel(&mut self) {
        self.state = PlacementState::Idle;
        self.preview = None;
    }
}
