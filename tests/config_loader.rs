mod common;

use common::temp_config;
use phonics_garden::config::{Config, ConfigError, VoiceConfig};
use std::path::PathBuf;

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.player.name, "Yaya");
    assert!(config.storage.state_path.is_none());

    assert!(config.cloud.url.is_none());
    assert!(config.cloud.anon_key.is_none());
    assert_eq!(config.cloud.timeout_seconds, 10);

    assert_eq!(config.speech.bind_addr, "127.0.0.1:3001");
    assert_eq!(config.speech.proxy_url, "http://127.0.0.1:3001");
    assert_eq!(config.speech.upstream_url, "https://api.elevenlabs.io");
    assert_eq!(config.speech.voice_id, "EXAVITQu4vr4xnSDxMaL");
    assert_eq!(config.speech.model_id, "eleven_monolingual_v1");
    assert_eq!(config.speech.timeout_seconds, 30);
    assert!(config.speech.api_key.is_none());

    assert_eq!(config.voice.rate, 0.8);
    assert_eq!(config.voice.pitch, 1.1);
    assert_eq!(config.voice.volume, 1.0);
    assert!(config.voice.fallback_command.is_none());

    assert!(config.validate().is_ok());
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("phonics-garden/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let (dir, _) = temp_config("");
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config(
        r#"
[player]
name = "Milo"

[cloud]
url = "https://demo.supabase.co"
anon_key = "anon"

[voice]
fallback_command = "espeak"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.player.name, "Milo");
    assert_eq!(config.cloud.url.as_deref(), Some("https://demo.supabase.co"));
    assert_eq!(config.cloud.anon_key.as_deref(), Some("anon"));
    assert_eq!(config.cloud.timeout_seconds, 10);
    assert_eq!(config.voice.fallback_command.as_deref(), Some("espeak"));
    assert_eq!(config.voice.rate, 0.8);
    assert_eq!(config.speech, Config::default().speech);
}

#[test]
fn test_state_path_override() {
    let (_dir, path) = temp_config(
        r#"
[storage]
state_path = "/tmp/phonics-state.json"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.state_path(), PathBuf::from("/tmp/phonics-state.json"));
    assert!(Config::default().state_path().ends_with("phonics-garden/state.json"));
}

#[test]
fn test_parse_error_names_the_file() {
    let (_dir, path) = temp_config("[player\nname = ");
    let err = Config::load_from(&path).unwrap_err();
    match &err {
        ConfigError::ParseError { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected ParseError, got {other:?}"),
    }
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_wrong_type_is_a_parse_error() {
    let (_dir, path) = temp_config("[cloud]\ntimeout_seconds = \"ten\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_validation_rejects_blank_player_name() {
    let (_dir, path) = temp_config("[player]\nname = \"   \"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("player.name"));
}

#[test]
fn test_validation_rejects_bad_bind_addr() {
    let mut config = Config::default();
    config.speech.bind_addr = "localhost".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("speech.bind_addr"));
}

#[test]
fn test_validation_rejects_out_of_range_prosody() {
    let cases = [
        VoiceConfig {
            rate: 0.0,
            ..VoiceConfig::default()
        },
        VoiceConfig {
            pitch: 2.5,
            ..VoiceConfig::default()
        },
        VoiceConfig {
            volume: -0.1,
            ..VoiceConfig::default()
        },
    ];

    for voice in cases {
        let config = Config {
            voice,
            ..Config::default()
        };
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "accepted {:?}",
            config.voice
        );
    }
}

#[test]
fn test_validation_rejects_zero_timeout() {
    let mut config = Config::default();
    config.cloud.timeout_seconds = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.speech.timeout_seconds = 0;
    assert!(config.validate().is_err());
}
