use crate::credential::Credential;
use crate::error::MalformedHeader;
use http::Request;

mod auth;
pub use auth::Authorization;

mod params;
pub use params::FormParams;

/// Parameter consulted when the `Authorization` header carries no token.
pub const DEFAULT_PARAMETER: &str = "api_token";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterFallback {
    Disabled,
    /// Reads [`DEFAULT_PARAMETER`].
    Default,
    Named(String),
}

impl ParameterFallback {
    pub fn name(&self) -> Option<&str> {
        match self {
            ParameterFallback::Disabled => None,
            ParameterFallback::Default => Some(DEFAULT_PARAMETER),
            ParameterFallback::Named(name) => Some(name.as_str()),
        }
    }
}

impl Default for ParameterFallback {
    fn default() -> Self {
        ParameterFallback::Disabled
    }
}

impl From<bool> for ParameterFallback {
    fn from(enabled: bool) -> Self {
        if enabled {
            ParameterFallback::Default
        } else {
            ParameterFallback::Disabled
        }
    }
}

impl From<&str> for ParameterFallback {
    fn from(name: &str) -> Self {
        ParameterFallback::Named(name.to_owned())
    }
}

impl From<String> for ParameterFallback {
    fn from(name: String) -> Self {
        ParameterFallback::Named(name)
    }
}

pub trait RequestExt {
    fn authorization(&self) -> Authorization<'_>;

    fn parameter(&self, name: &str) -> Option<String>;

    /// Header credential, falling back to a request parameter when the
    /// header produced no token. A malformed header never falls back.
    fn credential(&self, fallback: &ParameterFallback) -> Result<Credential, MalformedHeader>;
}

impl<B> RequestExt for Request<B> {
    #[inline]
    fn authorization(&self) -> Authorization<'_> {
        Authorization::new(self)
    }

    #[inline]
    fn parameter(&self, name: &str) -> Option<String> {
        params::lookup(self, name)
    }

    fn credential(&self, fallback: &ParameterFallback) -> Result<Credential, MalformedHeader> {
        let credential = self.authorization().outcome().into_credential()?;
        if credential.token().is_some() {
            return Ok(credential);
        }

        let name = match fallback.name() {
            Some(name) => name,
            None => return Ok(credential),
        };
        match self.parameter(name) {
            Some(token) if !token.is_empty() => {
                tracing::trace!(parameter = name, "token taken from request parameter");
                Ok(Credential::from_token(token))
            }
            _ => Ok(credential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::ParseOutcome;
    use http::header;

    fn request(uri: &str, authorization: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn authorization_outcome() {
        let req = request("/", Some(r#"Token token="abc", foo="bar""#));
        let credential = req.authorization().outcome().into_credential().unwrap();
        assert_eq!(credential.token(), Some("abc"));
        assert_eq!(credential.params()["foo"], "bar");

        assert!(!request("/", None).authorization().is_present());
        assert_eq!(
            request("/", None).authorization().outcome(),
            ParseOutcome::NoHeader
        );
    }

    #[test]
    fn fallback_disabled_ignores_parameter() {
        let req = request("http://example.com/test?api_token=abc", None);
        let credential = req.credential(&ParameterFallback::Disabled).unwrap();
        assert_eq!(credential, Credential::empty());
    }

    #[test]
    fn fallback_default_name() {
        let req = request("http://example.com/test?api_token=abc", None);
        let credential = req.credential(&true.into()).unwrap();
        assert_eq!(credential.token(), Some("abc"));
        assert!(credential.params().is_empty());
    }

    #[test]
    fn fallback_custom_name() {
        let req = request("http://example.com/test?wieslaw=abc", None);
        let credential = req.credential(&"wieslaw".into()).unwrap();
        assert_eq!(credential.token(), Some("abc"));

        let credential = req.credential(&ParameterFallback::Default).unwrap();
        assert_eq!(credential.token(), None);
    }

    #[test]
    fn fallback_empty_parameter_leaves_token_unset() {
        let req = request("http://example.com/test?api_token=", None);
        assert_eq!(
            req.credential(&ParameterFallback::Default).unwrap(),
            Credential::empty()
        );
    }

    #[test]
    fn fallback_replaces_header_params() {
        let req = request("/test?api_token=abc", Some(r#"Token foo="bar""#));
        let credential = req.credential(&ParameterFallback::Default).unwrap();
        assert_eq!(credential.token(), Some("abc"));
        assert!(credential.params().is_empty());
    }

    #[test]
    fn header_token_wins_over_parameter() {
        let req = request("/test?api_token=abc", Some(r#"Token token="xyz""#));
        let credential = req.credential(&ParameterFallback::Default).unwrap();
        assert_eq!(credential.token(), Some("xyz"));
    }

    #[test]
    fn malformed_header_never_falls_back() {
        let req = request("/test?api_token=abc", Some("Token foobar"));
        assert_eq!(
            req.credential(&ParameterFallback::Default),
            Err(MalformedHeader::Segment("foobar".into()))
        );
    }

    #[test]
    fn foreign_scheme_falls_back() {
        let req = request("/test?api_token=abc", Some("Basic QWxhZGluOnNlc2FtIG9wZW4="));
        let credential = req.credential(&ParameterFallback::Default).unwrap();
        assert_eq!(credential.token(), Some("abc"));
    }
}
