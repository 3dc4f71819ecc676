mod format_resolver;
mod transcription_orchestrator;

pub use format_resolver::resolve_encoding;
pub use transcription_orchestrator::{
    ErrorKind, OrchestrationError, PollPolicy, TranscriptionOrchestrator, TranscriptionOutcome,
};
