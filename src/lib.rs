//! `Authorization: Token ...` credentials for [`tower`] services.
//!
//! [`TokenAuthLayer`] parses the `Token` scheme out of the `Authorization`
//! header, hands the token and its auxiliary parameters to a caller
//! supplied [`Predicate`] and forwards the request only when it agrees.
//! Refused requests get a `401`, requests with a malformed `Token` header a
//! `400`; both responders can be replaced.

mod credential;
pub use credential::{parse, parse_str, Credential, Params, ParseOutcome};

mod error;
pub use error::MalformedHeader;

mod request;
pub use request::{Authorization, FormParams, ParameterFallback, RequestExt, DEFAULT_PARAMETER};

mod response;
pub use response::{DefaultUnauthorized, DefaultUnprocessable, Responder};

mod service;
pub use service::{Predicate, ResponseFuture, TokenAuth, TokenAuthLayer};
