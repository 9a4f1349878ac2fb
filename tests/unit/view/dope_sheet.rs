use super::*;
use crate::scene::model::PropertyName;

#[test]
fn bars_are_fractions_of_duration() {
    let scene = Scene::demo();
    let sheet = DopeSheet::build(&scene, None, FrameIndex(60));
    assert_eq!(sheet.playhead, 0.5);
    assert_eq!(sheet.rows.len(), 2);

    let slide = &sheet.rows[1].bars[0];
    assert_eq!(slide.motion_name, "SlideIn");
    assert!((slide.left - 10.0 / 120.0).abs() < 1e-12);
    assert!((slide.width - 80.0 / 120.0).abs() < 1e-12);
    assert!(!slide.selected);
}

#[test]
fn selection_marks_one_bar() {
    let scene = Scene::demo();
    let path = PropertyPath::new("O002-SlidingBox", "SlideIn", PropertyName::PositionX);
    let sheet = DopeSheet::build(&scene, Some(&path), FrameIndex(0));
    let selected: Vec<_> = sheet
        .rows
        .iter()
        .flat_map(|r| r.bars.iter())
        .filter(|b| b.selected)
        .map(|b| b.motion_name.as_str())
        .collect();
    assert_eq!(selected, vec!["SlideIn"]);
}

#[test]
fn empty_timeline_has_zero_fractions() {
    let mut scene = Scene::demo();
    scene.duration = FrameIndex(0);
    let sheet = DopeSheet::build(&scene, None, FrameIndex(5));
    assert_eq!(sheet.playhead, 0.0);
    assert!(sheet.rows.iter().flat_map(|r| &r.bars).all(|b| b.left == 0.0 && b.width == 0.0));
}

#[test]
fn hit_finds_bar_under_click() {
    let sheet = DopeSheet::build(&Scene::demo(), None, FrameIndex(0));
    assert_eq!(sheet.hit(1, 0.5), Some(("O002-SlidingBox", "SlideIn")));
    assert_eq!(sheet.hit(1, 0.01), None);
    assert_eq!(sheet.hit(9, 0.5), None);
}

#[test]
fn bars_past_duration_are_cut_at_the_end() {
    let mut scene = Scene::demo();
    scene.duration = FrameIndex(40);
    let sheet = DopeSheet::build(&scene, None, FrameIndex(90));
    assert_eq!(sheet.playhead, 1.0);

    let slide = &sheet.rows[1].bars[0];
    assert_eq!(slide.end_frame, FrameIndex(90));
    assert!((slide.left - 0.25).abs() < 1e-12);
    assert!((slide.width - 0.75).abs() < 1e-12);
    for bar in sheet.rows.iter().flat_map(|r| &r.bars) {
        assert!((0.0..=1.0).contains(&bar.left), "{bar:?}");
        assert!(bar.left + bar.width <= 1.0 + 1e-12, "{bar:?}");
    }
}
