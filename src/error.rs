use thiserror::Error;

/// A `Token` authorization header whose payload could not be split into
/// `key="value"` pairs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedHeader {
    #[error("credential segment {0:?} is not a key=value pair")]
    Segment(String),
    #[error("token credentials are not valid UTF-8")]
    Encoding,
}
