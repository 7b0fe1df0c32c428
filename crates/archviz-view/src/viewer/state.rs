use archviz_geometry::{Point3, Ray, Vector3};
use cgmath::{EuclideanSpace, InnerSpace};

use super::input::ViewerInput;
use super::ui::{Point2, Rect, pos2};

const DEFAULT_FOV_DEG: f64 = 20.0;
const ORBIT_SPEED: f64 = 0.005;
const ORBIT_DAMPING: f64 = 0.09;
const ORBIT_REST: f64 = 1.0e-5;
const PITCH_LIMIT: f64 = 1.55;
const PAN_SPEED: f64 = 0.0012;
const MIN_DISTANCE: f64 = 2.0;
const MAX_DISTANCE: f64 = 150.0;
const NEAR: f64 = 0.05;

#[derive(Clone, Copy, Debug)]
struct CameraBasis {
    pos: Point3,
    right: Vector3,
    up: Vector3,
    forward: Vector3,
}

/// Perspective orbit camera around a target on a Y-up world.
///
/// Orbiting keeps a velocity that decays each frame, so the view glides to
/// a stop after the pointer is released.
#[derive(Clone, Debug)]
pub struct ViewerState {
    target: Point3,
    yaw: f64,
    pitch: f64,
    distance: f64,
    fov_deg: f64,
    orbit_velocity: (f64, f64),
    orbit_enabled: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::looking_at(Point3::new(5.0, 10.0, 10.0), Point3::new(0.0, 0.0, 0.0))
    }
}

impl ViewerState {
    pub fn looking_at(eye: Point3, target: Point3) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let pitch = (offset.y / offset.magnitude().max(f64::EPSILON))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            target,
            yaw: offset.z.atan2(offset.x),
            pitch,
            distance,
            fov_deg: DEFAULT_FOV_DEG,
            orbit_velocity: (0.0, 0.0),
            orbit_enabled: true,
        }
    }

    pub fn reset_view(&mut self) {
        *self = Self::default();
    }

    pub fn fov_deg(&self) -> f64 {
        self.fov_deg
    }

    pub fn camera_position(&self) -> Point3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw);
        self.target + offset * self.distance
    }

    pub fn camera_target(&self) -> Point3 {
        self.target
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Orbiting is switched off while a gizmo handle is held.
    pub fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
        if !enabled {
            self.orbit_velocity = (0.0, 0.0);
        }
    }

    /// Left drag orbits, right or middle drag pans, the wheel zooms.
    /// Returns `true` when the camera moved.
    pub fn handle_input(&mut self, input: &ViewerInput) -> bool {
        let delta = input.pointer_delta;
        let dragging = delta.x != 0.0 || delta.y != 0.0;
        let mut moved = false;

        if input.primary_down && dragging && self.orbit_enabled {
            self.orbit_velocity.0 += delta.x as f64 * ORBIT_SPEED;
            self.orbit_velocity.1 += delta.y as f64 * ORBIT_SPEED;
            moved = true;
        } else if (input.secondary_down || input.middle_down) && dragging {
            let basis = self.camera_basis();
            let scale = self.distance * PAN_SPEED;
            let shift =
                -basis.right * (delta.x as f64 * scale) + basis.up * (delta.y as f64 * scale);
            self.target = self.target + shift;
            moved = true;
        }

        if input.hovered && input.scroll_delta != 0.0 {
            let zoom = (-input.scroll_delta as f64 * 0.002).exp();
            self.distance = (self.distance * zoom).clamp(MIN_DISTANCE, MAX_DISTANCE);
            moved = true;
        }
        moved
    }

    /// Advances the damped orbit. Returns `true` while still gliding.
    pub fn update(&mut self) -> bool {
        let (yaw_speed, pitch_speed) = self.orbit_velocity;
        if yaw_speed.abs() < ORBIT_REST && pitch_speed.abs() < ORBIT_REST {
            self.orbit_velocity = (0.0, 0.0);
            return false;
        }
        self.yaw += yaw_speed * ORBIT_DAMPING;
        self.pitch = (self.pitch + pitch_speed * ORBIT_DAMPING).clamp(0.05, PITCH_LIMIT);
        let keep = 1.0 - ORBIT_DAMPING;
        self.orbit_velocity = (yaw_speed * keep, pitch_speed * keep);
        true
    }

    /// Screen position and view depth of a world point.
    pub fn project(&self, point: Point3, rect: Rect) -> Option<(Point2, f64)> {
        let basis = self.camera_basis();
        let rel = point - basis.pos;
        let depth = rel.dot(basis.forward);
        if depth <= NEAR {
            return None;
        }
        let focal = self.focal_length(rect);
        let center = rect.center();
        let sx = center.x + (rel.dot(basis.right) / depth * focal) as f32;
        let sy = center.y - (rel.dot(basis.up) / depth * focal) as f32;
        Some((pos2(sx, sy), depth))
    }

    pub fn project_point(&self, point: Point3, rect: Rect) -> Option<Point2> {
        self.project(point, rect).map(|(pos, _)| pos)
    }

    /// Ray from the eye through a viewport pixel.
    pub fn screen_ray(&self, pos: Point2, rect: Rect) -> Option<Ray> {
        if !rect.contains(pos) {
            return None;
        }
        let basis = self.camera_basis();
        let focal = self.focal_length(rect);
        let center = rect.center();
        let dx = (pos.x - center.x) as f64 / focal;
        let dy = (center.y - pos.y) as f64 / focal;
        Ray::new(basis.pos, basis.forward + basis.right * dx + basis.up * dy)
    }

    /// World length covered by one pixel at `point`'s depth.
    pub fn world_per_pixel(&self, point: Point3, rect: Rect) -> f64 {
        let basis = self.camera_basis();
        let depth = (point - basis.pos).dot(basis.forward).max(NEAR);
        depth / self.focal_length(rect)
    }

    pub fn view_direction(&self) -> Vector3 {
        self.camera_basis().forward
    }

    fn focal_length(&self, rect: Rect) -> f64 {
        let half_height = (rect.height().max(1.0) * 0.5) as f64;
        half_height / (self.fov_deg.to_radians() * 0.5).tan()
    }

    fn camera_basis(&self) -> CameraBasis {
        let pos = self.camera_position();
        let forward = (self.target.to_vec() - pos.to_vec()).normalize();
        let mut right = forward.cross(Vector3::unit_y());
        if right.magnitude() <= 1.0e-9 {
            right = Vector3::unit_x();
        }
        let right = right.normalize();
        let up = right.cross(forward).normalize();
        CameraBasis {
            pos,
            right,
            up,
            forward,
        }
    }
}
