use super::*;

#[test]
fn parses_names_and_hex_forms() {
    assert_eq!(Rgba8::parse("red").unwrap(), Rgba8::RED);
    assert_eq!(Rgba8::parse(" Black ").unwrap(), Rgba8::BLACK);
    assert_eq!(Rgba8::parse("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::parse("#ff0000").unwrap(), Rgba8::RED);
    assert_eq!(
        Rgba8::parse("#11223344").unwrap(),
        Rgba8 {
            r: 0x11,
            g: 0x22,
            b: 0x33,
            a: 0x44
        }
    );
}

#[test]
fn rejects_malformed_colors() {
    assert!(Rgba8::parse("#12345").is_err());
    assert!(Rgba8::parse("#zzzzzz").is_err());
    assert!(Rgba8::parse("chartreuse-ish").is_err());
}

#[test]
fn serializes_as_hex_string() {
    let s = serde_json::to_string(&Rgba8::RED).unwrap();
    assert_eq!(s, "\"#ff0000ff\"");
    let back: Rgba8 = serde_json::from_str(&s).unwrap();
    assert_eq!(back, Rgba8::RED);
    assert!(serde_json::from_str::<Rgba8>("\"#xyz\"").is_err());
}
