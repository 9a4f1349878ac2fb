use super::*;

const TWO: &str = r#"{"frame_index":0,"lines":[{"id":5,"points":[[0,0],[10,10]]}]}
{"frame_index":2,"lines":[{"id":5,"points":[[1,1],[11,11]]}]}"#;

#[test]
fn splits_concatenated_objects() {
    let mut d = FrameStreamDecoder::new();
    let recs = d.push(TWO);
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[1].frame_index.0, 2);
    assert_eq!(d.buffered_len(), 0);
}

#[test]
fn records_survive_arbitrary_chunking() {
    for size in [1, 3, 7, 40] {
        let mut d = FrameStreamDecoder::new();
        let mut got = Vec::new();
        for chunk in TWO.as_bytes().chunks(size) {
            got.extend(d.push_bytes(chunk));
        }
        got.extend(d.finish());
        assert_eq!(got.len(), 2, "chunk size {size}");
        assert_eq!(got[0].lines[0].points[1], [10.0, 10.0]);
        assert_eq!(d.skipped(), 0);
    }
}

#[test]
fn braces_inside_strings_do_not_count() {
    let text = r#"{"frame_index":1,"note":"a } tricky { \" } value","lines":[]}{"frame_index":2}"#;
    let mut d = FrameStreamDecoder::new();
    let recs = d.push(text);
    assert_eq!(
        recs.iter().map(|r| r.frame_index.0).collect::<Vec<_>>(),
        vec![1, 2]
    );
}

#[test]
fn array_wrapper_and_commas_are_ignored() {
    let mut d = FrameStreamDecoder::new();
    let recs = d.push(r#"[{"frame_index":3}, {"frame_index":4}]"#);
    assert_eq!(recs.len(), 2);
}

#[test]
fn malformed_objects_are_skipped() {
    let mut d = FrameStreamDecoder::new();
    let recs = d.push(r#"{"lines":[]}{"frame_index":"x"}{"frame_index":9}"#);
    assert_eq!(recs.len(), 1);
    assert_eq!(d.skipped(), 2);
    assert_eq!(d.decoded(), 1);
}

#[test]
fn split_multibyte_character_is_reassembled() {
    let text = "{\"frame_index\":1,\"label\":\"é\"}";
    let bytes = text.as_bytes();
    let cut = text.find('é').unwrap() + 1;
    let mut d = FrameStreamDecoder::new();
    assert!(d.push_bytes(&bytes[..cut]).is_empty());
    let recs = d.push_bytes(&bytes[cut..]);
    assert_eq!(recs.len(), 1);
}

#[test]
fn finish_drops_trailing_partial_record() {
    let mut d = FrameStreamDecoder::new();
    let recs = d.push(r#"{"frame_index":1}{"frame_index":2,"lines":["#);
    assert_eq!(recs.len(), 1);
    assert!(d.buffered_len() > 0);
    assert!(d.finish().is_empty());
    assert_eq!(d.skipped(), 1);
    assert_eq!(d.buffered_len(), 0);
}

#[test]
fn frames_wrapper_expands_into_records() {
    let text = r#"{"frames":[{"frame_index":1},{"frame_index":"x"},{"frame_index":4}]}"#;
    let mut d = FrameStreamDecoder::new();
    let mut recs = Vec::new();
    for chunk in text.as_bytes().chunks(5) {
        recs.extend(d.push_bytes(chunk));
    }
    recs.extend(d.finish());
    let frames: Vec<u64> = recs.iter().map(|r| r.frame_index.0).collect();
    assert_eq!(frames, vec![1, 4]);
    assert_eq!(d.decoded(), 2);
    assert_eq!(d.skipped(), 1);
}
