//! Text-to-speech: the proxy server in front of the vendor API and the
//! narrator that plays its audio.

mod error;
mod narrator;
mod server;
mod shutdown;
mod upstream;

pub use error::{ErrorResponse, SpeechError};
pub use narrator::{
    digraph_line, AudioSink, CommandVoice, FileSink, LocalVoice, Narrator, Prosody, ProxyVoice,
    SilentVoice, SpeakOutcome, SpeechSource,
};
pub use server::{build_router, HealthStatus, SpeechHandle, SpeechServer};
pub use shutdown::ShutdownManager;
pub use upstream::{VoiceClient, VoiceSettings};
