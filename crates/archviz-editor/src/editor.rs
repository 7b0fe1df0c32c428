use archviz_base::{Guid, Result};
use archviz_geometry::{PlanePoint, Ray, Transform};
use archviz_scene::{EntityRef, FurnitureInstance, FurnitureKind, ModelAsset, Scene, WallLabel};
use tracing::{debug, info, warn};

use crate::{
    EditorSettings, GizmoAxis, GizmoDrag, LoadRequest, LoadToken, LoadTracker, NoticeLog,
    PlacementOutcome, PlacementState, Selection, SelectionState, TransformMode, WallPlacement,
    constrain_wall_transform, sync_labels,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickOutcome {
    Ignored,
    WallStarted(PlanePoint),
    WallCommitted(Guid),
    WallRejected,
    Selected(EntityRef),
    Cleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Added { guid: Guid, selected: bool },
    Stale,
    Failed,
}

/// The whole interaction state, owned in one place.
///
/// Pointer input arrives as rays already unprojected through the camera;
/// `None` means the pointer is outside the viewport.
#[derive(Debug, Default)]
pub struct Editor {
    settings: EditorSettings,
    scene: Scene,
    placement: WallPlacement,
    selection: SelectionState,
    mode: TransformMode,
    drag: Option<GizmoDrag>,
    loads: LoadTracker,
    notices: NoticeLog,
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Result<Self> {
        Ok(Self {
            settings: settings.validated()?,
            ..Self::default()
        })
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn placement(&self) -> &WallPlacement {
        &self.placement
    }

    pub fn placement_state(&self) -> PlacementState {
        self.placement.state()
    }

    pub fn selection(&self) -> Selection {
        self.selection.selection()
    }

    pub fn selection_state(&self) -> &SelectionState {
        &self.selection
    }

    pub fn gizmo_target(&self) -> Option<EntityRef> {
        self.selection.gizmo_target()
    }

    pub fn transform_mode(&self) -> TransformMode {
        self.mode
    }

    pub fn active_drag(&self) -> Option<&GizmoDrag> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    pub fn pending_load(&self) -> Option<LoadRequest> {
        self.loads.pending()
    }

    pub fn toggle_wall_placement(&mut self) -> bool {
        let active = self.placement.toggle();
        info!(active, "wall placement toggled");
        active
    }

    pub fn set_wall_placement(&mut self, active: bool) {
        if self.placement.is_active() != active {
            self.placement.set_active(active);
            info!(active, "wall placement toggled");
        }
    }

    /// Routes a click to the wall tool while placing, to picking otherwise.
    pub fn click(&mut self, ray: Option<&Ray>) -> ClickOutcome {
        if self.placement.is_active() {
            self.place_click(ray)
        } else {
            self.select_click(ray)
        }
    }

    fn place_click(&mut self, ray: Option<&Ray>) -> ClickOutcome {
        let point = ray.and_then(|ray| self.settings.project_to_ground(ray));
        let outcome = self
            .placement
            .click(point, self.settings.grid_step, self.settings.angle_step);
        match outcome {
            PlacementOutcome::Ignored => ClickOutcome::Ignored,
            PlacementOutcome::Started(point) => {
                debug!(x = point.x, z = point.z, "wall start set");
                ClickOutcome::WallStarted(point)
            }
            PlacementOutcome::Committed(draft) => {
                let wall = draft.build(self.settings.wall_height, self.settings.wall_thickness);
                let label = WallLabel::for_length(draft.length, self.settings.unit);
                info!(
                    length = draft.length,
                    yaw = draft.yaw,
                    label = %label.text,
                    "wall added"
                );
                let guid = self.scene.add_wall(wall, label);
                sync_labels(&mut self.scene, &self.settings);
                ClickOutcome::WallCommitted(guid)
            }
            PlacementOutcome::Degenerate(start) => {
                warn!(x = start.x, z = start.z, "zero-length wall rejected");
                self.notices
                    .warn("Wall end matches its start; pick another point");
                ClickOutcome::WallRejected
            }
        }
    }

    fn select_click(&mut self, ray: Option<&Ray>) -> ClickOutcome {
        match ray.and_then(|ray| self.scene.pick(ray)) {
            Some(hit) => {
                self.select(hit.entity);
                ClickOutcome::Selected(hit.entity)
            }
            None => {
                self.clear_selection();
                ClickOutcome::Cleared
            }
        }
    }

    pub fn select(&mut self, entity: EntityRef) -> bool {
        self.drag = None;
        let selected = self.selection.select(&self.scene, entity);
        if selected {
            info!(
                kind = entity.category(),
                id = %entity.guid().short(),
                mode = self.mode.label(),
                "selection changed"
            );
        }
        selected
    }

    pub fn clear_selection(&mut self) {
        self.drag = None;
        if !self.selection.selection().is_none() {
            debug!("selection cleared");
        }
        self.selection.clear();
    }

    pub fn pointer_moved(&mut self, ray: Option<&Ray>) {
        let point = ray.and_then(|ray| self.settings.project_to_ground(ray));
        self.placement.pointer_moved(point, self.settings.grid_step);
    }

    /// Global reset: placement off, nothing selected, no drag.
    pub fn escape(&mut self) {
        self.placement.cancel();
        self.clear_selection();
        debug!("escape");
    }

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        if self.mode != mode {
            self.drag = None;
            self.mode = mode;
            info!(mode = mode.label(), "transform mode changed");
        }
    }

    pub fn begin_gizmo_drag(&mut self, axis: GizmoAxis) -> bool {
        let Some(entity) = self.selection.gizmo_target() else {
            return false;
        };
        let Some(origin) = self.scene.transform_of(entity) else {
            return false;
        };
        self.drag = Some(GizmoDrag {
            entity,
            mode: self.mode,
            axis,
            origin,
        });
        true
    }

    /// Moves the active handle; the result is already constrained.
    pub fn drag_gizmo(&mut self, amount: f64) -> Option<Transform> {
        let proposed = self.drag?.apply(amount);
        self.apply_gizmo_transform(proposed)
    }

    pub fn end_gizmo_drag(&mut self) {
        if self.drag.take().is_some() {
            self.selection.refresh_outline(&self.scene);
        }
    }

    /// Writes a gizmo-proposed transform to the selection.
    ///
    /// Walls land back on the grid immediately; furniture is placed freely.
    /// Non-finite proposals are dropped.
    pub fn apply_gizmo_transform(&mut self, proposed: Transform) -> Option<Transform> {
        let entity = self.selection.gizmo_target()?;
        if !proposed.is_finite() {
            warn!("non-finite gizmo transform dropped");
            return None;
        }
        let transform = match entity {
            EntityRef::Wall(_) => constrain_wall_transform(
                proposed,
                self.settings.grid_step,
                self.settings.angle_step,
            ),
            EntityRef::Furniture(_) => proposed,
        };
        if !self.scene.set_transform(entity, transform) {
            return None;
        }
        self.selection.refresh_outline(&self.scene);
        Some(transform)
    }

    pub fn request_furniture(&mut self, kind: FurnitureKind) -> LoadRequest {
        let request = self.loads.request(kind, self.selection.epoch());
        info!(furniture = kind.name(), token = %request.token, "furniture requested");
        request
    }

    /// Applies a finished load. Only the latest request lands.
    ///
    /// The model is selected unless the user changed the selection while
    /// it was loading.
    pub fn finish_furniture_load(
        &mut self,
        token: LoadToken,
        result: Result<ModelAsset>,
    ) -> LoadOutcome {
        let Some(request) = self.loads.resolve(token) else {
            debug!(%token, "stale furniture load discarded");
            return LoadOutcome::Stale;
        };
        let mut asset = match result {
            Ok(asset) => asset,
            Err(err) => {
                warn!(furniture = request.kind.name(), error = %err, "furniture load failed");
                self.notices
                    .error(format!("Failed to load {}: {err}", request.kind.name()));
                return LoadOutcome::Failed;
            }
        };
        for part in &mut asset.parts {
            part.cast_shadow = true;
            part.receive_shadow = true;
        }
        let instance = FurnitureInstance::from_asset(request.kind, asset);
        let guid = self.scene.add_furniture(instance);
        let entity = EntityRef::Furniture(guid);
        let selected = request.selection_epoch == self.selection.epoch() && self.select(entity);
        info!(furniture = request.kind.name(), id = %guid.short(), selected, "furniture added");
        self.notices.info(format!("{} added", request.kind.name()));
        LoadOutcome::Added { guid, selected }
    }

    /// Stores a new height for future walls. Existing walls keep their size.
    pub fn set_wall_height(&mut self, height: f64) -> Result<f64> {
        match self.settings.set_wall_height(height) {
            Ok(applied) => {
                info!(height = applied, "wall height changed");
                Ok(applied)
            }
            Err(err) => {
                warn!(error = %err, "wall height rejected");
                self.notices.warn(format!("Height rejected: {err}"));
                Err(err)
            }
        }
    }

    pub fn set_wall_height_text(&mut self, text: &str) -> Result<f64> {
        match EditorSettings::parse_wall_height(text) {
            Ok(height) => self.set_wall_height(height),
            Err(err) => {
                warn!(error = %err, "wall height rejected");
                self.notices.warn(format!("Height rejected: {err}"));
                Err(err)
            }
        }
    }

    /// Per-frame work.
    pub fn update_frame(&mut self) {
        sync_labels(&mut self.scene, &self.settings);
    }
}
