use anyhow::Result;
use archviz_editor::{
    Editor, EditorSettings, GizmoAxis, NoticeLevel, PlacementState, Selection, TransformMode,
    WALL_HEIGHT_STEP,
};
use archviz_scene::{EntityRef, FurnitureKind};
use egui_wgpu::winit::Painter;
use egui_wgpu::{RendererOptions, WgpuConfiguration, WgpuSetup, WgpuSetupCreateNew};
use egui_winit::State as EguiWinitState;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::viewer::{
    Align2, Color32, GizmoHandle, OverlayPainter, Point2, Rect, Vec2, ViewerInput, ViewerState, drag_amount,
    draw_gizmo, gizmo_handles, paint_ground, paint_labels, paint_outline, paint_preview,
    paint_scene, pick_gizmo,
};
use self::loader::FurnitureLoader;
use self::painter::EguiOverlayPainter;

mod loader;
mod painter;

const CLICK_DRAG_THRESHOLD: f32 = 4.0;
const MODE_HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);
const NOTICE_ROWS: usize = 40;

#[derive(Default)]
struct InputState {
    pointer_pos: Option<Point2>,
    pointer_delta: Vec2,
    primary_down: bool,
    secondary_down: bool,
    middle_down: bool,
    primary_pressed: bool,
    primary_clicked: bool,
    press_pos: Option<Point2>,
    dragged: bool,
    scroll_delta: f32,
    escape_pressed: bool,
}

struct HandleDrag {
    handle: GizmoHandle,
    press: Point2,
}

pub fn run_gui(settings: EditorSettings, models_dir: PathBuf) -> Result<()> {
    let editor = Editor::new(settings)?;
    let event_loop = EventLoop::new().map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = event_loop
        .create_window(
            winit::window::Window::default_attributes()
                .with_title("Archviz Editor")
                .with_min_inner_size(LogicalSize::new(1100.0, 700.0)),
        )
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = Arc::new(window);

    let egui_ctx = egui::Context::default();
    let mut painter = create_painter(egui_ctx.clone())?;
    pollster::block_on(painter.set_window(egui::ViewportId::ROOT, Some(window.clone())))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    let mut egui_state = EguiWinitState::new(
        egui_ctx.clone(),
        egui::ViewportId::ROOT,
        &event_loop,
        Some(window.scale_factor() as f32),
        window.theme(),
        painter.max_texture_side(),
    );

    let mut app = ArchvizApp::new(editor, models_dir);
    info!(models = %app.loader.models_dir().display(), "editor started");

    let clear_color = egui_ctx.style().visuals.window_fill;
    let [r, g, b, a] = clear_color.to_array();
    let clear_color = [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ];

    #[allow(deprecated)]
    event_loop
        .run(move |event, event_loop| {
            event_loop.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => {
                    if matches!(event, WindowEvent::CloseRequested) {
                        event_loop.exit();
                        return;
                    }

                    let response = egui_state.on_window_event(&window, &event);
                    if response.repaint {
                        window.request_redraw();
                    }

                    match event {
                        WindowEvent::Resized(size) => {
                            if let (Some(width), Some(height)) =
                                (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                            {
                                painter.on_window_resized(egui::ViewportId::ROOT, width, height);
                            }
                        }
                        WindowEvent::ScaleFactorChanged { .. } => {
                            let size = window.inner_size();
                            if let (Some(width), Some(height)) =
                                (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                            {
                                painter.on_window_resized(egui::ViewportId::ROOT, width, height);
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let raw_input = egui_state.take_egui_input(&window);
                            let full_output = egui_ctx.run(raw_input, |ctx| {
                                app.ui(ctx);
                            });

                            egui_state.handle_platform_output(&window, full_output.platform_output);

                            let clipped_primitives = egui_ctx
                                .tessellate(full_output.shapes, full_output.pixels_per_point);
                            let _ = painter.paint_and_update_textures(
                                egui::ViewportId::ROOT,
                                full_output.pixels_per_point,
                                clear_color,
                                &clipped_primitives,
                                &full_output.textures_delta,
                                Vec::new(),
                            );
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(())
}

fn create_painter(ctx: egui::Context) -> Result<Painter> {
    let mut configuration = WgpuConfiguration::default();
    let power_preference = match std::env::var("ARCHVIZ_POWER_PREF") {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "high" | "high_performance" | "high-performance" => {
                wgpu::PowerPreference::HighPerformance
            }
            "default" => wgpu::PowerPreference::default(),
            _ => wgpu::PowerPreference::LowPower,
        },
        Err(_) => wgpu::PowerPreference::LowPower,
    };
    configuration.wgpu_setup = WgpuSetup::CreateNew(WgpuSetupCreateNew {
        power_preference,
        device_descriptor: Arc::new(|adapter| {
            let required_limits =
                wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());
            wgpu::DeviceDescriptor {
                label: Some("archviz-view"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::default(),
            }
        }),
        ..Default::default()
    });

    let painter = pollster::block_on(Painter::new(
        ctx,
        configuration,
        false,
        RendererOptions::default(),
    ));
    Ok(painter)
}

struct ArchvizApp {
    editor: Editor,
    viewer: ViewerState,
    loader: FurnitureLoader,
    furniture_choice: FurnitureKind,
    height_text: String,
    input: InputState,
    handle_drag: Option<HandleDrag>,
    hovered_axis: Option<GizmoAxis>,
}

impl ArchvizApp {
    fn new(editor: Editor, models_dir: PathBuf) -> Self {
        let height_text = format_height(editor.settings().wall_height);
        Self {
            editor,
            viewer: ViewerState::default(),
            loader: FurnitureLoader::new(models_dir),
            furniture_choice: FurnitureKind::default(),
            height_text,
            input: InputState::default(),
            handle_drag: None,
            hovered_axis: None,
        }
    }

    fn ui(&mut self, ctx: &egui::Context) {
        self.finish_loads();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(10.0, 0.0);
                ui.heading("Archviz");
                ui.add(egui::Separator::default().vertical());
                self.mode_buttons(ui);
                ui.add(egui::Separator::default().vertical());
                self.wall_controls(ui);
                ui.add(egui::Separator::default().vertical());
                self.furniture_controls(ui);
                ui.add(egui::Separator::default().vertical());
                if ui.button("Reset View").clicked() {
                    self.viewer.reset_view();
                }
            });
        });

        egui::SidePanel::right("side_panel")
            .resizable(false)
            .exact_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(8.0, 8.0);
                    ui.add_space(12.0);
                    ui.group(|ui| self.selection_panel(ui));
                    ui.group(|ui| self.view_panel(ui));
                    ui.group(|ui| self.notice_panel(ui));
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let (rect, response) = ui.allocate_exact_size(available, egui::Sense::click_and_drag());
            if response.clicked() {
                response.request_focus();
            }
            self.draw_viewport(ctx, ui, rect);
        });
    }

    fn mode_buttons(&mut self, ui: &mut egui::Ui) {
        let current = self.editor.transform_mode();
        for mode in TransformMode::ALL {
            let mut button = egui::Button::new(mode.label());
            if mode == current {
                button = button.fill(MODE_HIGHLIGHT);
            }
            if ui.add(button).clicked() {
                self.cancel_handle_drag();
                self.editor.set_transform_mode(mode);
            }
        }
    }

    fn wall_controls(&mut self, ui: &mut egui::Ui) {
        let label = if self.editor.placement().is_active() {
            "Stop Wall"
        } else {
            "Place Wall"
        };
        if ui.button(label).clicked() {
            self.editor.toggle_wall_placement();
        }

        ui.label("Height");
        let response = ui.add(egui::TextEdit::singleline(&mut self.height_text).desired_width(48.0));
        if response.lost_focus() {
            let text = self.height_text.clone();
            self.apply_height(|editor| editor.set_wall_height_text(&text));
        }
        if ui.small_button("-").clicked() {
            let height = self.editor.settings().wall_height - WALL_HEIGHT_STEP;
            self.apply_height(|editor| editor.set_wall_height(height));
        }
        if ui.small_button("+").clicked() {
            let height = self.editor.settings().wall_height + WALL_HEIGHT_STEP;
            self.apply_height(|editor| editor.set_wall_height(height));
        }
    }

    fn apply_height(&mut self, apply: impl FnOnce(&mut Editor) -> archviz_base::Result<f64>) {
        apply(&mut self.editor).ok();
        self.height_text = format_height(self.editor.settings().wall_height);
    }

    fn furniture_controls(&mut self, ui: &mut egui::Ui) {
        egui::ComboBox::from_id_salt("furniture_choice")
            .selected_text(self.furniture_choice.name())
            .show_ui(ui, |ui| {
                for kind in FurnitureKind::ALL {
                    ui.selectable_value(&mut self.furniture_choice, kind, kind.name());
                }
            });
        if ui.button("Add Furniture").clicked() {
            let request = self.editor.request_furniture(self.furniture_choice);
            self.loader.spawn(request);
        }
        if let Some(pending) = self.editor.pending_load() {
            ui.label(format!("Loading {}…", pending.kind.name()));
        }
    }

    fn selection_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Selection");
        ui.label(format!("Mode: {}", self.editor.transform_mode().label()));
        ui.label(self.placement_status());
        ui.add(egui::Separator::default());

        let scene = self.editor.scene();
        match self.editor.selection() {
            Selection::None => {
                ui.label("Nothing selected");
            }
            Selection::Wall(guid) => {
                if let Some(placed) = scene.wall(guid) {
                    let wall = &placed.wall;
                    ui.label(format!("{} {}", wall.name, guid.short()));
                    ui.label(format!("Length: {}", placed.label.text));
                    ui.label(format!("Height: {:.2}", wall.height));
                    ui.label(format!(
                        "Position: {:.2}, {:.2}, {:.2}",
                        wall.position().x,
                        wall.position().y,
                        wall.position().z
                    ));
                    ui.label(format!("Yaw: {:.1}°", wall.yaw().to_degrees()));
                }
            }
            Selection::Furniture(guid) => {
                if let Some(item) = scene.furniture_item(guid) {
                    let t = item.transform;
                    ui.label(format!("{} {}", item.kind.name(), guid.short()));
                    ui.label(format!("Parts: {}", item.parts.len()));
                    ui.label(format!(
                        "Position: {:.2}, {:.2}, {:.2}",
                        t.translation.x, t.translation.y, t.translation.z
                    ));
                    ui.label(format!(
                        "Rotation: {:.1}°, {:.1}°, {:.1}°",
                        t.rotation.x.to_degrees(),
                        t.rotation.y.to_degrees(),
                        t.rotation.z.to_degrees()
                    ));
                    ui.label(format!(
                        "Scale: {:.2}, {:.2}, {:.2}",
                        t.scale.x, t.scale.y, t.scale.z
                    ));
                }
            }
        }
        ui.label(format!(
            "Walls: {}  Furniture: {}",
            scene.walls().len(),
            scene.furniture().len()
        ));
    }

    fn view_panel(&self, ui: &mut egui::Ui) {
        ui.heading("View");
        let eye = self.viewer.camera_position();
        let target = self.viewer.camera_target();
        ui.label(format!("Camera: {:.1}, {:.1}, {:.1}", eye.x, eye.y, eye.z));
        ui.label(format!("Target: {:.1}, {:.1}, {:.1}", target.x, target.y, target.z));
        ui.label(format!(
            "Distance: {:.1}  FOV: {:.0}°",
            self.viewer.distance(),
            self.viewer.fov_deg()
        ));
    }

    fn notice_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Log");
        for notice in self.editor.notices().iter().rev().take(NOTICE_ROWS) {
            let color = match notice.level {
                NoticeLevel::Info => ui.visuals().text_color(),
                NoticeLevel::Warning => ui.visuals().warn_fg_color,
                NoticeLevel::Error => ui.visuals().error_fg_color,
            };
            ui.colored_label(color, notice.message.as_str());
        }
    }

    fn placement_status(&self) -> String {
        match self.editor.placement_state() {
            PlacementState::Idle => "Wall tool: off".to_string(),
            PlacementState::AwaitingFirstPoint => "Wall tool: click the first point".to_string(),
            PlacementState::AwaitingSecondPoint { start } => format!(
                "Wall tool: click the second point (from {:.0}, {:.0})",
                start.x, start.z
            ),
        }
    }

    fn draw_viewport(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, rect: egui::Rect) {
        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_rgb(222, 226, 230));

        let pointer_pos = ctx.input(|i| i.pointer.interact_pos());
        let hovered = pointer_pos.map(|pos| rect.contains(pos)).unwrap_or(false);
        self.update_input(ctx, rect, hovered);

        let viewport = Rect::from_min_size(
            Point2::new(0.0, 0.0),
            Vec2::new(rect.width(), rect.height()),
        );
        let handles = self.tick_viewport(viewport, hovered);

        let overlay_painter = ui.painter().with_clip_rect(rect);
        let mut overlay = EguiOverlayPainter::new(&overlay_painter, rect.min.to_vec2());
        let settings = self.editor.settings();
        paint_ground(
            &mut overlay,
            &self.viewer,
            viewport,
            settings.ground_half_extent,
            settings.ground_height,
        );
        paint_scene(&mut overlay, &self.viewer, viewport, self.editor.scene());
        paint_outline(
            &mut overlay,
            &self.viewer,
            viewport,
            self.editor.selection_state().outline(),
        );
        paint_preview(
            &mut overlay,
            &self.viewer,
            viewport,
            self.editor.placement().preview(),
            settings.ground_height,
        );
        paint_labels(&mut overlay, &self.viewer, viewport, self.editor.scene());
        draw_gizmo(
            &mut overlay,
            &handles,
            self.editor.transform_mode(),
            self.hovered_axis,
        );

        let hint = "Left click: select / place | Left drag: orbit | Right drag: pan | Wheel: zoom | Esc: reset";
        overlay.text(
            viewport.left_top() + Vec2::new(8.0, 8.0),
            Align2::LeftTop,
            hint.to_string(),
            12.0,
            Color32::from_gray(90),
        );
    }

    /// Applies one frame of input to the gizmo, camera and editor.
    fn tick_viewport(&mut self, viewport: Rect, hovered: bool) -> Vec<GizmoHandle> {
        if self.input.escape_pressed {
            self.cancel_handle_drag();
            self.editor.escape();
        }

        let mode = self.editor.transform_mode();
        let mut handles = self.current_handles(viewport);

        if self.input.primary_pressed && self.handle_drag.is_none() {
            if let Some(pos) = self.input.pointer_pos {
                let picked = pick_gizmo(&handles, pos)
                    .and_then(|axis| handles.iter().find(|handle| handle.axis == axis));
                if let Some(handle) = picked {
                    if self.editor.begin_gizmo_drag(handle.axis) {
                        debug!(axis = ?handle.axis, mode = mode.label(), "gizmo drag started");
                        self.handle_drag = Some(HandleDrag {
                            handle: handle.clone(),
                            press: pos,
                        });
                        self.viewer.set_orbit_enabled(false);
                    }
                }
            }
        }

        if self.handle_drag.is_some() {
            if self.input.primary_down {
                if let (Some(drag), Some(pos)) = (&self.handle_drag, self.input.pointer_pos) {
                    let amount = drag_amount(&self.viewer, &drag.handle, mode, drag.press, pos);
                    self.editor.drag_gizmo(amount);
                }
            } else {
                self.cancel_handle_drag();
                self.input.primary_clicked = false;
            }
            handles = self.current_handles(viewport);
        }

        self.hovered_axis = match &self.handle_drag {
            Some(drag) => Some(drag.handle.axis),
            None => self
                .input
                .pointer_pos
                .and_then(|pos| pick_gizmo(&handles, pos)),
        };

        let input = self.build_input(hovered);
        if self.handle_drag.is_none() {
            self.viewer.handle_input(&input);
        }

        let ray = self
            .input
            .pointer_pos
            .and_then(|pos| self.viewer.screen_ray(pos, viewport));
        self.editor.pointer_moved(ray.as_ref());
        if self.input.primary_clicked {
            let outcome = self.editor.click(ray.as_ref());
            debug!(?outcome, "viewport click");
        }

        self.viewer.update();
        self.editor.update_frame();

        self.input.primary_pressed = false;
        self.input.primary_clicked = false;
        self.input.scroll_delta = 0.0;
        self.input.escape_pressed = false;
        handles
    }

    fn current_handles(&self, viewport: Rect) -> Vec<GizmoHandle> {
        let origin = self
            .editor
            .gizmo_target()
            .and_then(|entity: EntityRef| self.editor.scene().transform_of(entity))
            .map(|transform| transform.translation);
        match origin {
            Some(origin) => gizmo_handles(&self.viewer, viewport, origin, self.editor.transform_mode()),
            None => Vec::new(),
        }
    }

    fn cancel_handle_drag(&mut self) {
        if self.handle_drag.take().is_some() {
            self.editor.end_gizmo_drag();
        }
        self.viewer.set_orbit_enabled(true);
    }

    fn finish_loads(&mut self) {
        for loaded in self.loader.drain() {
            self.editor
                .finish_furniture_load(loaded.request.token, loaded.result);
        }
    }

    fn update_input(&mut self, ctx: &egui::Context, rect: egui::Rect, hovered: bool) {
        let pointer_pos = ctx.input(|i| i.pointer.interact_pos());
        self.input.pointer_pos = pointer_pos
            .filter(|_| hovered)
            .map(|pos| Point2::new(pos.x - rect.min.x, pos.y - rect.min.y));

        let delta = ctx.input(|i| i.pointer.delta());
        self.input.pointer_delta = if hovered {
            Vec2::new(delta.x, delta.y)
        } else {
            Vec2::new(0.0, 0.0)
        };

        self.input.primary_down =
            ctx.input(|i| i.pointer.button_down(egui::PointerButton::Primary));
        self.input.secondary_down =
            ctx.input(|i| i.pointer.button_down(egui::PointerButton::Secondary));
        self.input.middle_down =
            ctx.input(|i| i.pointer.button_down(egui::PointerButton::Middle));

        if hovered {
            let scroll = ctx.input(|i| i.raw_scroll_delta);
            self.input.scroll_delta += scroll.y;
        }

        if hovered && ctx.input(|i| i.pointer.button_pressed(egui::PointerButton::Primary)) {
            self.input.primary_pressed = true;
            self.input.press_pos = self.input.pointer_pos;
            self.input.dragged = false;
        }

        if self.input.primary_down {
            if let (Some(start), Some(pos)) = (self.input.press_pos, self.input.pointer_pos) {
                if start.distance(pos) > CLICK_DRAG_THRESHOLD {
                    self.input.dragged = true;
                }
            }
        }

        if ctx.input(|i| i.pointer.button_released(egui::PointerButton::Primary)) {
            if hovered && self.input.press_pos.is_some() && !self.input.dragged {
                self.input.primary_clicked = true;
            }
            self.input.press_pos = None;
            self.input.dragged = false;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.input.escape_pressed = true;
        }
    }

    fn build_input(&mut self, hovered: bool) -> ViewerInput {
        let delta = self.input.pointer_delta;
        self.input.pointer_delta = Vec2::new(0.0, 0.0);
        ViewerInput {
            pointer_delta: delta,
            primary_down: self.input.primary_down && self.input.dragged,
            secondary_down: self.input.secondary_down,
            middle_down: self.input.middle_down,
            scroll_delta: self.input.scroll_delta,
            hovered,
        }
    }
}

fn format_height(height: f64) -> String {
    format!("{height:.1}")
}
