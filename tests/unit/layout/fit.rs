use super::*;

const SIDES: [f64; 7] = [0.5, 1.0, 3.0, 100.0, 199.0, 1080.0, 7680.0];

fn canvas() -> Size {
    Size::new(400.0, 400.0)
}

#[test]
fn landscape_image_on_square_canvas() {
    let fit = compute_fit(Size::new(200.0, 100.0), canvas()).unwrap();
    assert_eq!(fit.scale, 2.0);
    assert_eq!(fit.offset_x, 0.0);
    assert_eq!(fit.offset_y, 100.0);
}

#[test]
fn portrait_image_on_square_canvas() {
    let fit = compute_fit(Size::new(100.0, 200.0), canvas()).unwrap();
    assert_eq!(fit.scale, 2.0);
    assert_eq!(fit.offset_x, 100.0);
    assert_eq!(fit.offset_y, 0.0);
}

#[test]
fn square_media_takes_the_height_branch() {
    let fit = compute_fit(Size::new(50.0, 50.0), Size::new(640.0, 360.0)).unwrap();
    assert_eq!(fit.scale, 360.0 / 50.0);
    assert_eq!(fit.offset_y, 0.0);
    assert_eq!(fit.offset_x, 140.0);
}

#[test]
fn wide_media_spans_canvas_width_for_all_sizes() {
    for &mw in &SIDES {
        for &mh in &SIDES {
            if mw / mh <= 1.0 {
                continue;
            }
            for &cw in &SIDES {
                for &ch in &SIDES {
                    let fit = compute_fit(Size::new(mw, mh), Size::new(cw, ch)).unwrap();
                    assert_eq!(fit.scale, cw / mw);
                    assert_eq!(fit.offset_x, 0.0);
                    assert!(fit.scale > 0.0 && fit.offset_y.is_finite());
                }
            }
        }
    }
}

#[test]
fn tall_or_square_media_spans_canvas_height_for_all_sizes() {
    for &mw in &SIDES {
        for &mh in &SIDES {
            if mw / mh > 1.0 {
                continue;
            }
            for &cw in &SIDES {
                for &ch in &SIDES {
                    let fit = compute_fit(Size::new(mw, mh), Size::new(cw, ch)).unwrap();
                    assert_eq!(fit.scale, ch / mh);
                    assert_eq!(fit.offset_y, 0.0);
                    assert!(fit.scale > 0.0 && fit.offset_x.is_finite());
                }
            }
        }
    }
}

#[test]
fn fit_is_idempotent() {
    let media = Size::new(1919.0, 1077.0);
    let canvas = Size::new(401.0, 333.0);
    let a = compute_fit(media, canvas).unwrap();
    let b = compute_fit(media, canvas).unwrap();
    assert_eq!(a.scale.to_bits(), b.scale.to_bits());
    assert_eq!(a.offset_x.to_bits(), b.offset_x.to_bits());
    assert_eq!(a.offset_y.to_bits(), b.offset_y.to_bits());
}

#[test]
fn centered_on_the_non_dominant_axis() {
    let media = Size::new(1920.0, 1080.0);
    let fit = compute_fit(media, canvas()).unwrap();
    let scaled = fit.scaled(media);
    assert!((scaled.width - 400.0).abs() < 1e-9);
    assert!((fit.offset_y * 2.0 + scaled.height - 400.0).abs() < 1e-9);
}

#[test]
fn rejects_zero_negative_and_non_finite_dimensions() {
    for bad in [
        Size::new(0.0, 100.0),
        Size::new(100.0, 0.0),
        Size::new(-1.0, 100.0),
        Size::new(f64::NAN, 100.0),
        Size::new(100.0, f64::INFINITY),
    ] {
        assert!(matches!(
            compute_fit(bad, canvas()),
            Err(ReelError::InvalidDimensions(_))
        ));
        assert!(matches!(
            compute_fit(Size::new(10.0, 10.0), bad),
            Err(ReelError::InvalidDimensions(_))
        ));
    }
}

#[test]
fn rejects_unrepresentable_results() {
    let fit = compute_fit(Size::new(1e-320, 1e-310), canvas());
    assert!(matches!(fit, Err(ReelError::InvalidDimensions(_))));
}

#[test]
fn static_framing_is_constant() {
    let fit = compute_fit(Size::new(200.0, 100.0), canvas()).unwrap();
    let track = Framing::Static.track(fit).unwrap();
    assert!(track.is_constant());
    assert_eq!(track.sample(3.0), fit.to_transform());
}

#[test]
fn slide_framing_eases_in_vertical_offset() {
    let fit = compute_fit(Size::new(200.0, 100.0), canvas()).unwrap();
    let track = Framing::Slide { window_secs: 5.0 }.track(fit).unwrap();
    assert_eq!(track.len(), 2);
    assert_eq!(track.sample(0.0).translate_y, 0.0);
    assert_eq!(track.sample(2.5).translate_y, 50.0);
    assert_eq!(track.sample(5.0), fit.to_transform());
    assert_eq!(track.sample(2.5).scale_x, 2.0);
}

#[test]
fn slide_framing_collapses_when_nothing_moves() {
    let fit = compute_fit(Size::new(100.0, 200.0), canvas()).unwrap();
    let track = Framing::Slide { window_secs: 5.0 }.track(fit).unwrap();
    assert!(track.is_constant());
}

#[test]
fn grow_framing_starts_untransformed() {
    let fit = compute_fit(Size::new(100.0, 200.0), canvas()).unwrap();
    let track = Framing::Grow { window_secs: 1.0 }.track(fit).unwrap();
    assert_eq!(track.sample(0.0), Transform::IDENTITY);
    assert_eq!(track.sample(1.0), fit.to_transform());
}

#[test]
fn framing_rejects_degenerate_windows() {
    let fit = compute_fit(Size::new(200.0, 100.0), canvas()).unwrap();
    assert!(matches!(
        Framing::Grow { window_secs: 0.0 }.track(fit),
        Err(ReelError::InvalidTrack(_))
    ));
    assert!(matches!(
        Framing::Slide { window_secs: -2.0 }.track(fit),
        Err(ReelError::InvalidTrack(_))
    ));
}

#[test]
fn framing_serde_shape() {
    let f: Framing = serde_json::from_str(r#"{"kind":"slide","window_secs":5.0}"#).unwrap();
    assert_eq!(f, Framing::Slide { window_secs: 5.0 });
    let f: Framing = serde_json::from_str(r#"{"kind":"static"}"#).unwrap();
    assert_eq!(f, Framing::Static);
}
