use super::*;

#[test]
fn frame_span_contains_inclusive_boundaries() {
    let s = FrameSpan::new(FrameIndex(2), FrameIndex(5));
    assert!(!s.contains(FrameIndex(1)));
    assert!(s.contains(FrameIndex(2)));
    assert!(s.contains(FrameIndex(5)));
    assert!(!s.contains(FrameIndex(6)));
}

#[test]
fn frame_span_orders_reversed_bounds_and_grows() {
    let s = FrameSpan::new(FrameIndex(9), FrameIndex(3));
    assert_eq!(s.start, FrameIndex(3));
    assert_eq!(s.end, FrameIndex(9));
    assert_eq!(s.len_frames(), 6);

    let g = FrameSpan::single(FrameIndex(4))
        .include(FrameIndex(1))
        .include(FrameIndex(7));
    assert_eq!(g, FrameSpan::new(FrameIndex(1), FrameIndex(7)));
}

#[test]
fn frame_span_clamps_continuous_coordinates() {
    let s = FrameSpan::new(FrameIndex(10), FrameIndex(90));
    assert_eq!(s.clamp_f64(-4.0), 10.0);
    assert_eq!(s.clamp_f64(55.5), 55.5);
    assert_eq!(s.clamp_f64(120.0), 90.0);
}

#[test]
fn frame_fraction_handles_empty_timeline() {
    assert_eq!(FrameIndex(5).fraction_of(FrameIndex(0)), 0.0);
    assert_eq!(FrameIndex(30).fraction_of(FrameIndex(120)), 0.25);
    assert_eq!(FrameIndex(130).clamp_to(FrameIndex(120)), FrameIndex(120));
}

#[test]
fn frame_index_serializes_as_bare_integer() {
    assert_eq!(serde_json::to_string(&FrameIndex(42)).unwrap(), "42");
    let f: FrameIndex = serde_json::from_str("7").unwrap();
    assert_eq!(f, FrameIndex(7));
}
