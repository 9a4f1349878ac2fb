use super::*;
use crate::scene::path::PropertyPath;

fn track_object() -> SceneObject {
    let mut frame_data = FrameData::new();
    frame_data.insert(0, vec![[0.0, 0.0], [10.0, 10.0]]);
    frame_data.insert(2, vec![[1.0, 1.0], [11.0, 11.0]]);
    SceneObject {
        id: "line-5".to_owned(),
        kind: ObjectKind::TrackLine,
        color: "#fbbf24".to_owned(),
        start_position: Point::ZERO,
        motions: vec![Arc::new(Motion {
            name: "Tracked Line".to_owned(),
            start_frame: FrameIndex(0),
            end_frame: FrameIndex(2),
            properties: MotionProperties::default(),
        })],
        frame_data: Some(frame_data),
    }
}

#[test]
fn json_roundtrip_is_field_for_field() {
    let mut scene = Scene::demo();
    scene.objects.push(Arc::new(track_object()));

    let s = scene.to_json_pretty().unwrap();
    let de = Scene::from_json_str(&s).unwrap();
    assert_eq!(de, scene);
}

#[test]
fn export_uses_documented_field_names() {
    let mut scene = Scene::demo();
    scene.objects.push(Arc::new(track_object()));
    let v: serde_json::Value = serde_json::from_str(&scene.to_json_pretty().unwrap()).unwrap();

    let ball = &v["objects"][0];
    assert_eq!(ball["kind"], "character");
    assert_eq!(ball["startPosition"]["x"], 100.0);
    assert_eq!(ball["motions"][0]["startFrame"], 0);
    assert_eq!(ball["motions"][0]["endFrame"], 100);
    assert!(ball["motions"][0]["properties"]["positionY"]["curve"]["p1"].is_object());
    assert!(ball["motions"][0]["properties"].get("rotation").is_none());
    assert!(ball.get("frameData").is_none());

    let line = &v["objects"][2];
    assert_eq!(line["kind"], "track-line");
    assert_eq!(line["frameData"]["2"][1][0], 11.0);
}

#[test]
fn import_accepts_legacy_type_field_and_spellings() {
    let json = r##"{
      "id": "legacy",
      "duration": 10,
      "objects": [
        { "id": "a", "type": "object", "color": "#fff", "startPosition": {"x": 1, "y": 2}, "motions": [] },
        { "id": "b", "type": "line", "color": "#fff", "startPosition": {"x": 0, "y": 0},
          "motions": [{ "name": "Tracked Line", "startFrame": 0, "endFrame": 3, "properties": {} }] },
        { "id": "c", "type": "curve", "color": "#fff", "startPosition": {"x": 0, "y": 0} }
      ]
    }"##;
    let scene = Scene::from_json_str(json).unwrap();
    assert_eq!(scene.objects[0].kind, ObjectKind::Prop);
    assert_eq!(scene.objects[1].kind, ObjectKind::TrackLine);
    assert_eq!(scene.objects[2].kind, ObjectKind::FittedCurve);
    assert!(scene.objects[2].motions.is_empty());
    assert!(scene.objects[1].motions[0].properties.is_empty());
}

#[test]
fn properties_iterate_in_canonical_order() {
    let span = crate::foundation::core::FrameSpan::new(FrameIndex(0), FrameIndex(10));
    let mut props = MotionProperties::default();
    props.insert(PropertyName::Scale, MotionProperty::linear(span, 1.0, 2.0));
    props.insert(PropertyName::PositionX, MotionProperty::linear(span, 0.0, 5.0));

    let names: Vec<_> = props.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec![PropertyName::PositionX, PropertyName::Scale]);
    assert!(props.get(PropertyName::Rotation).is_none());
}

#[test]
fn property_names_parse_from_wire_names() {
    for name in PropertyName::ALL {
        assert_eq!(name.as_str().parse::<PropertyName>().unwrap(), name);
    }
    assert!("opacity".parse::<PropertyName>().is_err());
}

#[test]
fn default_values_follow_start_position() {
    let scene = Scene::demo();
    let ball = &scene.objects[0];
    assert_eq!(ball.default_value(PropertyName::PositionX), 100.0);
    assert_eq!(ball.default_value(PropertyName::PositionY), 400.0);
    assert_eq!(ball.default_value(PropertyName::Rotation), 0.0);
    assert_eq!(ball.default_value(PropertyName::Scale), 1.0);
}

#[test]
fn demo_scene_validates() {
    Scene::demo().validate().unwrap();
}

#[test]
fn validate_rejects_duplicate_ids() {
    let mut scene = Scene::demo();
    let dup = scene.objects[0].clone();
    scene.objects.push(dup);
    assert!(scene.validate().is_err());
}

#[test]
fn validate_rejects_reversed_motion() {
    let mut scene = Scene::demo();
    let obj = Arc::make_mut(&mut scene.objects[1]);
    let motion = Arc::make_mut(&mut obj.motions[0]);
    motion.start_frame = FrameIndex(95);
    assert!(scene.validate().is_err());
}

#[test]
fn resolve_returns_none_for_missing_segments() {
    let scene = Scene::demo();
    let ok = PropertyPath::new("C001-BouncingBall", "ArcJump", PropertyName::PositionY);
    let r = scene.resolve(&ok).unwrap();
    assert_eq!(r.object_index, 0);
    assert_eq!(r.property.end().value, 400.0);

    for bad in [
        PropertyPath::new("nope", "ArcJump", PropertyName::PositionY),
        PropertyPath::new("C001-BouncingBall", "nope", PropertyName::PositionY),
        PropertyPath::new("C001-BouncingBall", "ArcJump", PropertyName::Rotation),
    ] {
        assert!(scene.resolve(&bad).is_none());
    }
}

#[test]
fn frame_points_are_absent_in_gaps() {
    let obj = track_object();
    assert_eq!(obj.frame_points(FrameIndex(0)).unwrap().len(), 2);
    assert!(obj.frame_points(FrameIndex(1)).is_none());
    assert!(Scene::demo().objects[0].frame_points(FrameIndex(0)).is_none());
}

#[test]
fn nominal_span_covers_every_motion() {
    let mut obj = track_object();
    assert_eq!(
        obj.nominal_span(),
        Some(FrameSpan::new(FrameIndex(0), FrameIndex(2)))
    );
    obj.motions.push(Arc::new(Motion {
        name: "Later".to_owned(),
        start_frame: FrameIndex(30),
        end_frame: FrameIndex(45),
        properties: MotionProperties::default(),
    }));
    assert_eq!(
        obj.nominal_span(),
        Some(FrameSpan::new(FrameIndex(0), FrameIndex(45)))
    );
    obj.motions.clear();
    assert_eq!(obj.nominal_span(), None);
}
