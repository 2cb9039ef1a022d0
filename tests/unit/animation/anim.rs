use super::*;

fn a() -> Transform {
    Transform {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    }
}

fn b() -> Transform {
    Transform {
        scale_x: 2.0,
        scale_y: 4.0,
        translate_x: 100.0,
        translate_y: -20.0,
    }
}

fn two_point() -> KeyframeTrack<Transform> {
    KeyframeTrack::new(vec![Keyframe::new(0.0, a()), Keyframe::new(5.0, b())]).unwrap()
}

#[test]
fn two_point_track_hits_keys_and_midpoint() {
    let track = two_point();
    assert_eq!(track.sample(0.0), a());
    assert_eq!(track.sample(5.0), b());
    assert_eq!(
        track.sample(2.5),
        Transform {
            scale_x: 1.5,
            scale_y: 2.5,
            translate_x: 50.0,
            translate_y: -10.0,
        }
    );
}

#[test]
fn sampling_clamps_outside_key_range() {
    let track = two_point();
    assert_eq!(track.sample(-1.0), a());
    assert_eq!(track.sample(10.0), b());
    assert_eq!(track.sample(f64::INFINITY), b());
    assert_eq!(track.sample(f64::NAN), a());
}

#[test]
fn sampling_is_bit_identical_when_repeated() {
    let track = two_point();
    let first = track.sample(1.2345);
    for _ in 0..8 {
        let again = track.sample(1.2345);
        assert_eq!(first.scale_x.to_bits(), again.scale_x.to_bits());
        assert_eq!(first.translate_y.to_bits(), again.translate_y.to_bits());
    }
}

#[test]
fn single_key_track_is_constant() {
    let track = KeyframeTrack::constant(b());
    assert!(track.is_constant());
    for t in [-3.0, 0.0, 0.5, 5.0, 1e9] {
        assert_eq!(track.sample(t), b());
    }
}

#[test]
fn three_key_track_interpolates_per_segment() {
    let track = KeyframeTrack::new(vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(2.0, 10.0),
        Keyframe::new(4.0, 0.0),
    ])
    .unwrap();
    assert_eq!(track.sample(1.0), 5.0);
    assert_eq!(track.sample(2.0), 10.0);
    assert_eq!(track.sample(3.0), 5.0);
    assert_eq!(track.end_time(), 4.0);
}

#[test]
fn construction_rejects_empty_and_non_increasing() {
    let empty: Vec<Keyframe<f64>> = vec![];
    assert!(matches!(
        KeyframeTrack::new(empty),
        Err(ReelError::InvalidTrack(_))
    ));

    let back = vec![
        Keyframe::new(0.0, 1.0),
        Keyframe::new(2.0, 2.0),
        Keyframe::new(0.0, 3.0),
    ];
    assert!(matches!(
        KeyframeTrack::new(back),
        Err(ReelError::InvalidTrack(_))
    ));

    let dup = vec![Keyframe::new(1.0, 1.0), Keyframe::new(1.0, 2.0)];
    assert!(matches!(
        KeyframeTrack::new(dup),
        Err(ReelError::InvalidTrack(_))
    ));
}

#[test]
fn construction_rejects_negative_and_non_finite_times() {
    assert!(KeyframeTrack::new(vec![Keyframe::new(-0.5, 1.0)]).is_err());
    assert!(KeyframeTrack::new(vec![Keyframe::new(f64::NAN, 1.0)]).is_err());
    assert!(
        KeyframeTrack::new(vec![
            Keyframe::new(0.0, 1.0),
            Keyframe::new(f64::INFINITY, 2.0)
        ])
        .is_err()
    );
}

#[test]
fn vec2_lerp_is_field_wise() {
    let v = <Vec2 as Lerp>::lerp(&Vec2::new(0.0, 10.0), &Vec2::new(4.0, 20.0), 0.25);
    assert_eq!(v, Vec2::new(1.0, 12.5));
}

#[test]
fn json_roundtrip_revalidates() {
    let track = two_point();
    let s = serde_json::to_string(&track).unwrap();
    let de: KeyframeTrack<Transform> = serde_json::from_str(&s).unwrap();
    assert_eq!(de, track);

    let bad = r#"[{"time": 2.0, "value": 1.0}, {"time": 1.0, "value": 2.0}]"#;
    assert!(serde_json::from_str::<KeyframeTrack<f64>>(bad).is_err());
    assert!(serde_json::from_str::<KeyframeTrack<f64>>("[]").is_err());
}

#[test]
fn validated_tracks_report_key_count() {
    let track = two_point();
    assert_eq!(track.len(), 2);
    assert!(!track.is_empty());
    assert!(!KeyframeTrack::constant(a()).is_empty());
}
