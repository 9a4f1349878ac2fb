use super::*;

fn ball(prop: PropertyName) -> PropertyPath {
    PropertyPath::new("C001-BouncingBall", "ArcJump", prop)
}

#[test]
fn select_motion_keeps_previous_property() {
    let mut ed = EditorState::new(Scene::demo());
    ed.select_motion("C001-BouncingBall", "ArcJump");
    assert_eq!(ed.selection().unwrap().property_name, PropertyName::PositionY);

    ed.select_property(PropertyName::PositionX);
    ed.select_motion("O002-SlidingBox", "SlideIn");
    let sel = ed.selected().unwrap();
    assert_eq!(sel.object.id, "O002-SlidingBox");
    assert_eq!(sel.property.start().value, 800.0);
}

#[test]
fn unresolvable_selection_reads_as_nothing() {
    let mut ed = EditorState::new(Scene::demo());
    ed.select(ball(PropertyName::Rotation));
    assert!(ed.selection().is_some());
    assert!(ed.selected().is_none());
    assert!(!ed.apply_preset("ease-in"));
}

#[test]
fn apply_preset_swaps_scene_pointer() {
    let mut ed = EditorState::new(Scene::demo());
    ed.select(ball(PropertyName::PositionX));
    let before = Arc::clone(ed.scene());

    assert!(ed.apply_preset("linear"));
    assert!(!Arc::ptr_eq(&before, ed.scene()));
    let curve = ed.selected().unwrap().property.curve;
    assert!((curve.p1.x - 100.0 / 3.0).abs() < 1e-9);
    assert!((curve.p1.y - 300.0).abs() < 1e-9);
}

#[test]
fn unknown_preset_keeps_scene_pointer() {
    let mut ed = EditorState::new(Scene::demo());
    ed.select(ball(PropertyName::PositionX));
    let before = Arc::clone(ed.scene());
    assert!(!ed.apply_preset("wobble"));
    assert!(Arc::ptr_eq(&before, ed.scene()));
}

#[test]
fn drag_clamps_to_motion_span() {
    let mut ed = EditorState::new(Scene::demo());
    ed.select(ball(PropertyName::PositionY));
    assert!(ed.drag_selected(Handle::P2, Point::new(250.0, -40.0)));
    let curve = ed.selected().unwrap().property.curve;
    assert_eq!(curve.p2, Point::new(100.0, -40.0));
}

#[test]
fn drag_without_selection_is_noop() {
    let mut ed = EditorState::new(Scene::demo());
    assert!(!ed.drag_selected(Handle::P1, Point::new(10.0, 10.0)));
}

#[test]
fn create_object_adds_default_prop_and_selects_it() {
    let mut ed = EditorState::new(Scene::demo());
    let id = ed.create_object();
    assert_eq!(id, "NewObj-003");
    assert_eq!(ed.scene().objects.len(), 3);

    let sel = ed.selected().unwrap();
    assert_eq!(sel.object.id, id);
    assert_eq!(sel.object.kind, ObjectKind::Prop);
    assert_eq!(sel.object.start_position, Point::new(350.0, 250.0));
    assert_eq!(sel.motion.name, "Default Motion");
    assert_eq!(sel.property.keyframes[0].value, 250.0);
    assert_eq!(sel.property.keyframes[1].value, 250.0);

    let x = sel.motion.properties.get(PropertyName::PositionX).unwrap();
    assert_eq!(x.keyframes[1].value, 550.0);
    ed.scene().validate().unwrap();
}

#[test]
fn create_object_skips_taken_ids() {
    let mut scene = Scene::demo();
    scene.objects.push(Arc::new(SceneObject {
        id: "NewObj-004".to_owned(),
        ..SceneObject::clone(&scene.objects[1])
    }));
    let mut ed = EditorState::new(scene);
    let id = ed.create_object();
    assert_eq!(id, "NewObj-005");
    let again = ed.create_object();
    assert_eq!(again, "NewObj-006");
}

#[test]
fn delete_object_clears_matching_selection() {
    let mut ed = EditorState::new(Scene::demo());
    ed.select(ball(PropertyName::PositionY));

    assert!(!ed.delete_object("O002-Missing"));
    assert!(ed.delete_object("O002-SlidingBox"));
    assert!(ed.selection().is_some());

    assert!(ed.delete_object("C001-BouncingBall"));
    assert!(ed.selection().is_none());
    assert!(ed.scene().objects.is_empty());
}

#[test]
fn clear_selection_drops_the_path() {
    let mut ed = EditorState::new(Scene::demo());
    ed.select(ball(PropertyName::PositionY));
    assert!(ed.selected().is_some());
    ed.clear_selection();
    assert!(ed.selection().is_none());
    assert!(ed.selected().is_none());
    assert!(!ed.apply_preset("ease-in"));
}

#[test]
fn stale_selection_after_scene_swap_reads_as_nothing() {
    let mut ed = EditorState::new(Scene::demo());
    ed.select(ball(PropertyName::PositionY));
    ed.replace_scene(Arc::new(Scene::empty("blank")));
    assert_eq!(ed.scene().id, "blank");
    assert_eq!(ed.selection(), Some(&ball(PropertyName::PositionY)));
    assert!(ed.selected().is_none());

    ed.replace_scene(Arc::new(Scene::demo()));
    assert_eq!(ed.selected().unwrap().property.end().value, 400.0);
}
