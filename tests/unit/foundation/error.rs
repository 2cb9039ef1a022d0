use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::invalid_dimensions("x")
            .to_string()
            .contains("invalid dimensions:")
    );
    assert!(
        ReelError::invalid_track("x")
            .to_string()
            .contains("invalid track:")
    );
    assert!(
        ReelError::asset_load("x")
            .to_string()
            .contains("asset load failure:")
    );
    assert!(
        ReelError::playback("x")
            .to_string()
            .contains("playback failure:")
    );
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn asset_retag_keeps_message_and_closed() {
    let err = ReelError::validation("bad bytes").into_asset_load();
    assert!(matches!(&err, ReelError::AssetLoadFailure(m) if m.contains("bad bytes")));

    let err = ReelError::SessionClosed.into_asset_load();
    assert!(matches!(err, ReelError::SessionClosed));
}

#[test]
fn playback_retag_wraps_foreign_errors() {
    let err = ReelError::Other(anyhow::anyhow!("device lost")).into_playback();
    assert!(matches!(&err, ReelError::PlaybackFailure(m) if m.contains("device lost")));
}

#[test]
fn serde_json_errors_convert() {
    let err: ReelError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ReelError::Serde(_)));
}
