use super::*;

#[test]
fn canvas_rejects_zero_sides() {
    assert!(Canvas::new(400, 0).is_err());
    assert!(Canvas::new(0, 400).is_err());
    let c = Canvas::new(640, 360).unwrap();
    assert_eq!(c.size(), Size::new(640.0, 360.0));
}

#[test]
fn size_positive_finite_guard() {
    assert!(Size::new(1.0, 1.0).is_positive_finite());
    assert!(!Size::new(0.0, 1.0).is_positive_finite());
    assert!(!Size::new(-1.0, 1.0).is_positive_finite());
    assert!(!Size::new(f64::INFINITY, 1.0).is_positive_finite());
    assert!(!Size::new(1.0, f64::NAN).is_positive_finite());
}

#[test]
fn identity_is_neutral_for_composition() {
    let t = Transform {
        scale_x: 2.0,
        scale_y: 3.0,
        translate_x: 5.0,
        translate_y: -1.0,
    };
    assert_eq!(t * Transform::IDENTITY, t);
    assert_eq!(Transform::IDENTITY * t, t);
    assert_eq!(Transform::default().to_affine(), Affine::IDENTITY);
}

#[test]
fn composition_matches_affine_product() {
    let a = Transform::scale(2.0, 2.0);
    let b = Transform::translate(10.0, 0.0);
    let ab = a * b;
    assert_eq!(ab.to_affine(), a.to_affine() * b.to_affine());
    assert_eq!(ab.apply(Point::new(1.0, 1.0)), Point::new(22.0, 2.0));

    let ba = b * a;
    assert_eq!(ba.apply(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
}

#[test]
fn apply_agrees_with_affine() {
    let t = Transform {
        scale_x: 0.5,
        scale_y: 4.0,
        translate_x: 100.0,
        translate_y: 25.0,
    };
    let p = Point::new(40.0, -2.0);
    assert_eq!(t.apply(p), t.to_affine() * p);
}
