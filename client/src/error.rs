use thiserror::Error;

/// Everything that can go wrong while feeding the observatory.
///
/// No variant is fatal: connection failures feed the reconnect loop,
/// protocol failures drop the offending frame, an unreachable status
/// endpoint hands the session over to the synthetic feed, and action
/// failures surface as a one-shot notice.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("status feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("action failed: {0}")]
    Action(String),
}
