//! Google Cloud Text-to-Speech backend.

mod client;
mod conversion;
mod dto;

pub use client::{GoogleCredentials, GoogleTtsClient};
pub use conversion::{from_synthesize_response, to_synthesize_request};
pub use dto::{
    SynthesisInput, SynthesizeRequest, SynthesizeResponse, TimepointType, TtsAudioConfig,
    TtsTimepoint, TtsVoice,
};
