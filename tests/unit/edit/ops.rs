use super::*;
use crate::scene::model::PropertyName;

fn ball_y() -> PropertyPath {
    PropertyPath::new("C001-BouncingBall", "ArcJump", PropertyName::PositionY)
}

fn new_curve() -> EasingCurve {
    EasingCurve {
        p1: Point::new(20.0, 10.0),
        p2: Point::new(80.0, 10.0),
    }
}

#[test]
fn curve_edit_replaces_only_the_target_property() {
    let scene = Scene::demo();
    let edited = apply_curve_edit(&scene, &ball_y(), new_curve());

    let r = edited.resolve(&ball_y()).unwrap();
    assert_eq!(r.property.curve, new_curve());
    // Keyframes are untouched.
    assert_eq!(
        r.property.keyframes,
        scene.resolve(&ball_y()).unwrap().property.keyframes
    );
    // Sibling property keeps its curve.
    let x = PropertyPath::new("C001-BouncingBall", "ArcJump", PropertyName::PositionX);
    assert_eq!(
        edited.resolve(&x).unwrap().property,
        scene.resolve(&x).unwrap().property
    );
    // The input scene is not mutated.
    assert_ne!(scene.resolve(&ball_y()).unwrap().property.curve, new_curve());
}

#[test]
fn curve_edit_shares_untouched_siblings() {
    let scene = Scene::demo();
    let edited = apply_curve_edit(&scene, &ball_y(), new_curve());
    assert!(!Arc::ptr_eq(&scene.objects[0], &edited.objects[0]));
    assert!(Arc::ptr_eq(&scene.objects[1], &edited.objects[1]));
}

#[test]
fn unresolved_edit_is_a_noop() {
    let scene = Scene::demo();
    for path in [
        PropertyPath::new("ghost", "ArcJump", PropertyName::PositionY),
        PropertyPath::new("C001-BouncingBall", "ghost", PropertyName::PositionY),
        PropertyPath::new("C001-BouncingBall", "ArcJump", PropertyName::Scale),
    ] {
        let out = apply_curve_edit(&scene, &path, new_curve());
        assert_eq!(out, scene);
        assert!(
            out.objects
                .iter()
                .zip(&scene.objects)
                .all(|(a, b)| Arc::ptr_eq(a, b))
        );
        assert!(try_apply_curve_edit(&scene, &path, new_curve()).is_none());
    }
}

#[test]
fn drag_clamps_time_but_not_value() {
    let scene = Scene::demo();
    let slide = PropertyPath::new("O002-SlidingBox", "SlideIn", PropertyName::PositionX);

    let out = drag_handle(&scene, &slide, Handle::P1, Point::new(-50.0, 9999.0));
    let c = out.resolve(&slide).unwrap().property.curve;
    assert_eq!(c.p1, Point::new(10.0, 9999.0));

    let out = drag_handle(&out, &slide, Handle::P2, Point::new(500.0, -3000.0));
    let c = out.resolve(&slide).unwrap().property.curve;
    assert_eq!(c.p2, Point::new(90.0, -3000.0));
    assert_eq!(c.p1, Point::new(10.0, 9999.0));

    let out = drag_handle(&out, &slide, Handle::P2, Point::new(42.5, 1.0));
    assert_eq!(
        out.resolve(&slide).unwrap().property.curve.p2,
        Point::new(42.5, 1.0)
    );
}

#[test]
fn drag_on_missing_path_is_a_noop() {
    let scene = Scene::demo();
    let path = PropertyPath::new("ghost", "m", PropertyName::PositionX);
    assert_eq!(
        drag_handle(&scene, &path, Handle::P1, Point::new(1.0, 1.0)),
        scene
    );
}
