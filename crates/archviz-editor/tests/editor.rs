use archviz_base::{Error, Guid, Result};
use archviz_editor::{
    ClickOutcome, Editor, GizmoAxis, LoadOutcome, NoticeLevel, PlacementState, Selection,
    TransformMode,
};
use archviz_geometry::{Aabb, Matrix4, PlanePoint, Point3, Ray, Transform, Vector3};
use archviz_scene::{EntityRef, FurnitureKind, MeshPart, ModelAsset};
use std::f64::consts::PI;

const EPS: f64 = 1.0e-9;

fn place_wall(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) -> Guid {
    editor.set_wall_placement(true);
    editor.click(Some(&Ray::downward(from.0, from.1)));
    match editor.click(Some(&Ray::downward(to.0, to.1))) {
        ClickOutcome::WallCommitted(guid) => guid,
        other => panic!("expected a wall, got {other:?}"),
    }
}

fn chair_asset() -> ModelAsset {
    let seat = MeshPart::new(
        "seat",
        Aabb::centered(Vector3::new(1.0, 0.5, 1.0)),
        Matrix4::from_translation(Vector3::new(0.0, 0.25, 0.0)),
    );
    let back = MeshPart::new(
        "back",
        Aabb::centered(Vector3::new(1.0, 1.0, 0.1)),
        Matrix4::from_translation(Vector3::new(0.0, 1.0, -0.45)),
    );
    ModelAsset {
        name: "Chair".to_string(),
        parts: vec![seat, back],
    }
}

fn load_chair(editor: &mut Editor) -> Guid {
    let request = editor.request_furniture(FurnitureKind::Chair);
    match editor.finish_furniture_load(request.token, Ok(chair_asset())) {
        LoadOutcome::Added { guid, .. } => guid,
        other => panic!("expected furniture, got {other:?}"),
    }
}

#[test]
fn two_clicks_make_a_three_metre_wall() {
    let mut editor = Editor::default();
    let guid = place_wall(&mut editor, (0.0, 0.0), (3.0, 0.0));

    let placed = editor.scene().wall(guid).expect("wall");
    assert!((placed.wall.length - 3.0).abs() < EPS);
    assert!(placed.wall.yaw().abs() < EPS);
    assert!((placed.wall.height - 3.0).abs() < EPS);
    assert_eq!(placed.label.text, "3.00m");
    assert_eq!(placed.wall.position(), Point3::new(1.5, 1.5, 0.0));
    assert_eq!(editor.placement_state(), PlacementState::AwaitingFirstPoint);
}

#[test]
fn escape_after_one_click_creates_nothing() {
    let mut editor = Editor::default();
    assert!(editor.toggle_wall_placement());
    editor.click(Some(&Ray::downward(1.0, 1.0)));
    assert!(editor.placement().captured_point().is_some());

    editor.escape();
    assert_eq!(editor.placement_state(), PlacementState::Idle);
    assert_eq!(editor.placement().captured_point(), None);
    assert!(editor.scene().walls().is_empty());
}

#[test]
fn escape_resets_everything() {
    let mut editor = Editor::default();
    place_wall(&mut editor, (0.0, 0.0), (2.0, 0.0));
    load_chair(&mut editor);
    editor.set_wall_placement(true);
    editor.click(Some(&Ray::downward(4.0, 4.0)));
    editor.pointer_moved(Some(&Ray::downward(5.0, 4.0)));
    assert!(editor.begin_gizmo_drag(GizmoAxis::X));

    editor.escape();
    assert_eq!(editor.placement_state(), PlacementState::Idle);
    assert_eq!(editor.placement().preview(), None);
    assert_eq!(editor.selection(), Selection::None);
    assert_eq!(editor.gizmo_target(), None);
    assert!(editor.selection_state().outline().is_none());
    assert!(!editor.is_dragging());
}

#[test]
fn clicks_outside_the_floor_capture_nothing() {
    let mut editor = Editor::default();
    editor.set_wall_placement(true);
    assert_eq!(editor.click(Some(&Ray::downward(30.0, 0.0))), ClickOutcome::Ignored);
    assert_eq!(editor.click(None), ClickOutcome::Ignored);

    let upward = Ray::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(editor.click(upward.as_ref()), ClickOutcome::Ignored);
    assert_eq!(editor.placement_state(), PlacementState::AwaitingFirstPoint);
}

#[test]
fn zero_length_wall_is_rejected_with_notice() {
    let mut editor = Editor::default();
    editor.set_wall_placement(true);
    editor.click(Some(&Ray::downward(2.0, 2.0)));
    let outcome = editor.click(Some(&Ray::downward(2.3, 1.8)));

    assert_eq!(outcome, ClickOutcome::WallRejected);
    assert!(editor.scene().walls().is_empty());
    assert_eq!(
        editor.placement_state(),
        PlacementState::AwaitingSecondPoint {
            start: PlanePoint::new(2.0, 2.0)
        }
    );
    assert_eq!(
        editor.notices().latest().map(|notice| notice.level),
        Some(NoticeLevel::Warning)
    );
}

#[test]
fn preview_hides_when_pointer_leaves_the_floor() {
    let mut editor = Editor::default();
    editor.set_wall_placement(true);
    editor.click(Some(&Ray::downward(0.0, 0.0)));

    editor.pointer_moved(Some(&Ray::downward(2.2, 0.0)));
    assert_eq!(
        editor.placement().preview(),
        Some((PlanePoint::new(0.0, 0.0), PlanePoint::new(2.0, 0.0)))
    );

    editor.pointer_moved(Some(&Ray::downward(40.0, 0.0)));
    assert_eq!(editor.placement().preview(), None);
}

#[test]
fn clicking_a_wall_selects_it_and_empty_space_clears() {
    let mut editor = Editor::default();
    let guid = place_wall(&mut editor, (0.0, 0.0), (3.0, 0.0));
    editor.set_wall_placement(false);

    let outcome = editor.click(Some(&Ray::downward(1.5, 0.0)));
    assert_eq!(outcome, ClickOutcome::Selected(EntityRef::Wall(guid)));
    assert_eq!(editor.selection(), Selection::Wall(guid));
    assert_eq!(editor.gizmo_target(), Some(EntityRef::Wall(guid)));
    let outline = editor.selection_state().outline().expect("outline");
    assert_eq!(outline.owner, EntityRef::Wall(guid));
    assert_eq!(outline.segments.len(), 12);

    assert_eq!(editor.click(Some(&Ray::downward(-5.0, -5.0))), ClickOutcome::Cleared);
    assert_eq!(editor.selection(), Selection::None);
    assert!(editor.selection_state().outline().is_none());
}

#[test]
fn clicking_any_part_selects_the_whole_model() {
    let mut editor = Editor::default();
    let guid = load_chair(&mut editor);
    editor.clear_selection();

    let toward_back = Ray::new(Point3::new(0.0, 1.2, 5.0), Vector3::new(0.0, 0.0, -1.0));
    let outcome = editor.click(toward_back.as_ref());
    assert_eq!(outcome, ClickOutcome::Selected(EntityRef::Furniture(guid)));
    assert_eq!(editor.selection(), Selection::Furniture(guid));
}

#[test]
fn selection_stays_a_singleton() {
    let mut editor = Editor::default();
    let wall = place_wall(&mut editor, (3.0, 3.0), (6.0, 3.0));
    editor.set_wall_placement(false);
    let chair = load_chair(&mut editor);

    let picks = [(4.5, 3.0), (0.0, 0.0), (-8.0, 8.0), (4.5, 3.0), (0.0, 0.0)];
    for (x, z) in picks {
        editor.click(Some(&Ray::downward(x, z)));
        let selection = editor.selection();
        assert!(matches!(
            selection,
            Selection::None | Selection::Wall(_) | Selection::Furniture(_)
        ));
        assert_eq!(editor.gizmo_target(), selection.entity());
        if let Some(outline) = editor.selection_state().outline() {
            assert_eq!(Some(outline.owner), selection.entity());
        }
    }
    assert_eq!(editor.selection(), Selection::Furniture(chair));
    editor.click(Some(&Ray::downward(4.5, 3.0)));
    assert_eq!(editor.selection(), Selection::Wall(wall));
}

#[test]
fn dragged_wall_snaps_to_grid() {
    let mut editor = Editor::default();
    let guid = place_wall(&mut editor, (0.0, 0.0), (3.0, 0.0));
    editor.set_wall_placement(false);
    editor.click(Some(&Ray::downward(1.5, 0.0)));

    let proposed = Transform::from_translation(Point3::new(2.3, 0.0, 1.7));
    let applied = editor.apply_gizmo_transform(proposed).expect("applied");
    assert_eq!(applied.translation, Point3::new(2.0, 0.0, 2.0));
    let placed = editor.scene().wall(guid).expect("wall");
    assert_eq!(placed.wall.position(), Point3::new(2.0, 0.0, 2.0));
}

#[test]
fn handle_drag_snaps_every_step() -> Result<()> {
    let mut editor = Editor::default();
    let guid = place_wall(&mut editor, (0.0, 0.0), (4.0, 0.0));
    editor.set_wall_placement(false);
    editor.click(Some(&Ray::downward(2.0, 0.0)));

    assert!(editor.begin_gizmo_drag(GizmoAxis::Z));
    let step = editor.drag_gizmo(0.4).expect("dragged");
    assert!(step.translation.z.abs() < EPS);
    let step = editor.drag_gizmo(0.7).expect("dragged");
    assert!((step.translation.z - 1.0).abs() < EPS);
    editor.end_gizmo_drag();

    editor.set_transform_mode(TransformMode::Rotate);
    assert!(editor.begin_gizmo_drag(GizmoAxis::Y));
    let turned = editor.drag_gizmo(0.3).expect("rotated");
    assert!((turned.rotation.y - PI / 12.0).abs() < EPS);
    editor.end_gizmo_drag();

    let outline = editor.selection_state().outline().expect("outline");
    let expected = editor.scene().entity_edges(EntityRef::Wall(guid));
    assert_eq!(outline.segments, expected);
    Ok(())
}

#[test]
fn furniture_moves_freely() {
    let mut editor = Editor::default();
    let guid = load_chair(&mut editor);

    let proposed = Transform::from_translation(Point3::new(2.3, 0.0, 1.7)).with_yaw(0.1);
    let applied = editor.apply_gizmo_transform(proposed).expect("applied");
    assert_eq!(applied, proposed);
    let item = editor.scene().furniture_item(guid).expect("furniture");
    assert_eq!(item.transform, proposed);
}

#[test]
fn transform_mode_persists_across_selections() {
    let mut editor = Editor::default();
    let wall = place_wall(&mut editor, (3.0, 3.0), (6.0, 3.0));
    editor.set_wall_placement(false);
    load_chair(&mut editor);

    editor.set_transform_mode(TransformMode::Scale);
    editor.click(Some(&Ray::downward(4.5, 3.0)));
    assert_eq!(editor.selection(), Selection::Wall(wall));
    assert_eq!(editor.transform_mode(), TransformMode::Scale);
    assert!(editor.begin_gizmo_drag(GizmoAxis::X));
    assert_eq!(editor.active_drag().map(|drag| drag.mode), Some(TransformMode::Scale));

    editor.escape();
    assert_eq!(editor.transform_mode(), TransformMode::Scale);
}

#[test]
fn height_change_moves_labels_but_not_walls() {
    let mut editor = Editor::default();
    let guid = place_wall(&mut editor, (0.0, 0.0), (3.0, 0.0));
    editor.update_frame();
    let label_y = |editor: &Editor| editor.scene().wall(guid).map(|placed| placed.label.position.y);
    let y = label_y(&editor).expect("label");
    assert!((y - (1.5 + 1.5 + 0.2)).abs() < EPS);

    assert_eq!(editor.set_wall_height(5.0).ok(), Some(5.0));
    editor.update_frame();

    let placed = editor.scene().wall(guid).expect("wall");
    assert!((placed.wall.height - 3.0).abs() < EPS);
    assert_eq!(placed.wall.position(), Point3::new(1.5, 1.5, 0.0));
    let y = label_y(&editor).expect("label");
    assert!((y - (1.5 + 2.5 + 0.2)).abs() < EPS);
}

#[test]
fn bad_height_text_keeps_previous_height() {
    let mut editor = Editor::default();
    assert!(editor.set_wall_height_text("abc").is_err());
    assert!(editor.set_wall_height(f64::INFINITY).is_err());
    assert_eq!(editor.settings().wall_height, 3.0);
    assert_eq!(editor.notices().len(), 2);

    assert_eq!(editor.set_wall_height_text("0").ok(), Some(0.1));
}

#[test]
fn loaded_furniture_is_selected_with_shadows() {
    let mut editor = Editor::default();
    let guid = load_chair(&mut editor);

    assert_eq!(editor.selection(), Selection::Furniture(guid));
    let item = editor.scene().furniture_item(guid).expect("furniture");
    assert_eq!(item.transform, Transform::default());
    assert!(item.parts.iter().all(|part| part.cast_shadow && part.receive_shadow));
    let outline = editor.selection_state().outline().expect("outline");
    assert_eq!(outline.segments.len(), 24);
}

#[test]
fn stale_load_is_discarded() {
    let mut editor = Editor::default();
    let first = editor.request_furniture(FurnitureKind::Sofa);
    let second = editor.request_furniture(FurnitureKind::Chair);

    assert_eq!(
        editor.finish_furniture_load(first.token, Ok(chair_asset())),
        LoadOutcome::Stale
    );
    assert!(editor.scene().furniture().is_empty());

    let outcome = editor.finish_furniture_load(second.token, Ok(chair_asset()));
    assert!(matches!(outcome, LoadOutcome::Added { selected: true, .. }));
    assert_eq!(editor.scene().furniture()[0].kind, FurnitureKind::Chair);
}

#[test]
fn load_does_not_steal_a_newer_selection() {
    let mut editor = Editor::default();
    let wall = place_wall(&mut editor, (3.0, 3.0), (6.0, 3.0));
    editor.set_wall_placement(false);

    let request = editor.request_furniture(FurnitureKind::Bed);
    editor.click(Some(&Ray::downward(4.5, 3.0)));
    assert_eq!(editor.selection(), Selection::Wall(wall));

    let outcome = editor.finish_furniture_load(request.token, Ok(chair_asset()));
    assert!(matches!(outcome, LoadOutcome::Added { selected: false, .. }));
    assert_eq!(editor.selection(), Selection::Wall(wall));
    assert_eq!(editor.scene().furniture().len(), 1);
}

#[test]
fn empty_click_with_nothing_selected_keeps_autoselect() {
    let mut editor = Editor::default();
    let request = editor.request_furniture(FurnitureKind::Chair);
    assert_eq!(
        editor.click(Some(&Ray::downward(-8.0, -8.0))),
        ClickOutcome::Cleared
    );
    assert_eq!(editor.selection(), Selection::None);

    let outcome = editor.finish_furniture_load(request.token, Ok(chair_asset()));
    let LoadOutcome::Added { guid, selected } = outcome else {
        panic!("expected furniture, got {outcome:?}");
    };
    assert!(selected);
    assert_eq!(editor.selection(), Selection::Furniture(guid));
}

#[test]
fn escape_with_nothing_selected_keeps_autoselect() {
    let mut editor = Editor::default();
    let request = editor.request_furniture(FurnitureKind::Lamp);
    editor.escape();

    let outcome = editor.finish_furniture_load(request.token, Ok(chair_asset()));
    assert!(matches!(outcome, LoadOutcome::Added { selected: true, .. }));
    assert!(editor.gizmo_target().is_some());
}

#[test]
fn escape_clearing_a_selection_blocks_autoselect() {
    let mut editor = Editor::default();
    let wall = place_wall(&mut editor, (3.0, 3.0), (6.0, 3.0));
    editor.set_wall_placement(false);
    editor.click(Some(&Ray::downward(4.5, 3.0)));
    assert_eq!(editor.selection(), Selection::Wall(wall));

    let request = editor.request_furniture(FurnitureKind::Sofa);
    editor.escape();

    let outcome = editor.finish_furniture_load(request.token, Ok(chair_asset()));
    assert!(matches!(outcome, LoadOutcome::Added { selected: false, .. }));
    assert_eq!(editor.selection(), Selection::None);
}

#[test]
fn failed_load_surfaces_a_notice() {
    let mut editor = Editor::default();
    let request = editor.request_furniture(FurnitureKind::Tv);
    let failure = Error::AssetLoad {
        name: "TV".to_string(),
        reason: "file not found".to_string(),
    };

    let outcome = editor.finish_furniture_load(request.token, Err(failure));
    assert_eq!(outcome, LoadOutcome::Failed);
    assert!(editor.scene().furniture().is_empty());
    let notice = editor.notices().latest().expect("notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("TV"));
}
