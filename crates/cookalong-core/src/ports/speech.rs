//! Speech recognition port.

/// Events emitted by a speech recognition adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// An interim hypothesis; display only, never interpreted.
    Partial(String),
    /// A finalised transcript, ready for command interpretation.
    Final(String),
    /// Recognition failed; the message is adapter-specific.
    Error(String),
    /// The recognition session ended on the adapter's side.
    End,
}

/// Port for driving a speech recognition capability.
///
/// Transcripts, errors, and session end arrive as [`SpeechEvent`]s on a
/// channel owned by the runtime. Both calls are fire-and-forget.
pub trait SpeechPort: Send + Sync {
    /// Begin a recognition session.
    fn start_listening(&self);

    /// Abort the active recognition session, if any.
    fn stop_listening(&self);
}
