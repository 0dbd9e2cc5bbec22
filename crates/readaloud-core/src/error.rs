use crate::speech::Channel;

/// Recoverable failures of the engine. None of them is fatal; callers return
/// to an idle, unhighlighted state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A scrub or resume target outside `0..len`.
    #[error("word index {index} outside 0..{len}")]
    OutOfRangeWordIndex { index: i64, len: usize },
    /// The document has no words to speak.
    #[error("document has no words")]
    EmptyDocument,
    /// The speech engine rejected a speak/pause/resume/stop request.
    #[error("{0} speech engine unavailable")]
    EngineUnavailable(Channel),
    /// The text canvas rejected a restyle or scroll request.
    #[error("text canvas rejected request")]
    Canvas,
}
