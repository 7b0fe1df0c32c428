use archviz_base::{Error, LengthUnit, Result};
use archviz_geometry::{DEFAULT_ANGLE_STEP, DEFAULT_GRID_STEP, PlanePoint, Ray, ray_plane_y};
use archviz_scene::DEFAULT_WALL_THICKNESS;

pub const DEFAULT_WALL_HEIGHT: f64 = 3.0;
pub const MIN_WALL_HEIGHT: f64 = 0.1;
pub const WALL_HEIGHT_STEP: f64 = 0.1;
pub const DEFAULT_LABEL_GAP: f64 = 0.2;
pub const DEFAULT_GROUND_HALF_EXTENT: f64 = 10.0;

/// Every tunable of the editor in one place.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorSettings {
    pub wall_height: f64,
    pub grid_step: f64,
    pub angle_step: f64,
    pub wall_thickness: f64,
    pub label_gap: f64,
    pub ground_half_extent: f64,
    pub ground_height: f64,
    pub unit: LengthUnit,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            wall_height: DEFAULT_WALL_HEIGHT,
            grid_step: DEFAULT_GRID_STEP,
            angle_step: DEFAULT_ANGLE_STEP,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            label_gap: DEFAULT_LABEL_GAP,
            ground_half_extent: DEFAULT_GROUND_HALF_EXTENT,
            ground_height: 0.0,
            unit: LengthUnit::Meter,
        }
    }
}

impl EditorSettings {
    pub fn validated(mut self) -> Result<Self> {
        positive("grid step", self.grid_step)?;
        positive("angle step", self.angle_step)?;
        positive("wall thickness", self.wall_thickness)?;
        positive("ground half extent", self.ground_half_extent)?;
        if !self.label_gap.is_finite() || self.label_gap < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "label gap must be finite and non-negative, got {}",
                self.label_gap
            )));
        }
        if !self.ground_height.is_finite() {
            return Err(Error::InvalidParameter(
                "ground height must be finite".to_string(),
            ));
        }
        self.set_wall_height(self.wall_height)?;
        Ok(self)
    }

    /// Applies a new wall height, clamping to the minimum.
    ///
    /// Returns the height actually stored. NaN and infinities are rejected and
    /// leave the current height untouched.
    pub fn set_wall_height(&mut self, height: f64) -> Result<f64> {
        if !height.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "wall height must be a finite number, got {height}"
            )));
        }
        self.wall_height = height.max(MIN_WALL_HEIGHT);
        Ok(self.wall_height)
    }

    /// Parses the text of the height field.
    pub fn parse_wall_height(text: &str) -> Result<f64> {
        let trimmed = text.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| Error::InvalidParameter(format!("'{trimmed}' is not a number")))?;
        if !value.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "'{trimmed}' is not a finite number"
            )));
        }
        Ok(value)
    }

    pub fn within_ground(&self, point: PlanePoint) -> bool {
        point.x.abs() <= self.ground_half_extent && point.z.abs() <= self.ground_half_extent
    }

    /// Where `ray` meets the floor, if it meets it inside the floor extent.
    pub fn project_to_ground(&self, ray: &Ray) -> Option<PlanePoint> {
        let (_, point) = ray_plane_y(ray, self.ground_height)?;
        let point = PlanePoint::from_point(point);
        self.within_ground(point).then_some(point)
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
