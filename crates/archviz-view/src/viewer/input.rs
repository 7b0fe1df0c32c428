use super::ui::Vec2;

/// Pointer buttons and motion for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewerInput {
    pub pointer_delta: Vec2,
    pub primary_down: bool,
    pub secondary_down: bool,
    pub middle_down: bool,
    pub scroll_delta: f32,
    pub hovered: bool,
}
