mod credentials;
mod loader;
mod types;

pub use credentials::{
    resolve_value, CredentialStatus, SecureString, CLOUD_KEY_ENV, CLOUD_URL_ENV, SPEECH_KEY_ENV,
};
pub use loader::ConfigError;
pub use types::{CloudConfig, Config, PlayerConfig, SpeechConfig, StorageConfig, VoiceConfig};
