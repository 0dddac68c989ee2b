use crate::error::MalformedHeader;
use std::collections::HashMap;

pub type Params = HashMap<String, String>;

const SCHEME: &[u8] = b"Token ";
const TOKEN_KEY: &str = "token";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credential {
    token: Option<String>,
    params: Params,
}

impl Credential {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_token(token: String) -> Self {
        Self {
            token: Some(token),
            params: Params::new(),
        }
    }

    #[inline]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline]
    pub fn into_parts(self) -> (Option<String>, Params) {
        (self.token, self.params)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    NoHeader,
    /// Present, but not using the `Token` scheme (`Basic ...`, `Bearer ...`).
    ForeignScheme,
    WellFormed(Credential),
    Malformed(MalformedHeader),
}

impl ParseOutcome {
    /// Collapses the absent and foreign cases into [`Credential::empty`].
    pub fn into_credential(self) -> Result<Credential, MalformedHeader> {
        match self {
            ParseOutcome::NoHeader | ParseOutcome::ForeignScheme => Ok(Credential::empty()),
            ParseOutcome::WellFormed(credential) => Ok(credential),
            ParseOutcome::Malformed(error) => Err(error),
        }
    }

    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseOutcome::Malformed(_))
    }
}

pub fn parse(header: Option<&[u8]>) -> ParseOutcome {
    let header = match header {
        Some(header) => header,
        None => return ParseOutcome::NoHeader,
    };
    let payload = match header.strip_prefix(SCHEME) {
        Some(payload) => payload,
        None => return ParseOutcome::ForeignScheme,
    };

    let parsed = std::str::from_utf8(payload)
        .map_err(|_| MalformedHeader::Encoding)
        .and_then(parse_payload);

    match parsed {
        Ok(credential) => ParseOutcome::WellFormed(credential),
        Err(error) => ParseOutcome::Malformed(error),
    }
}

/// [`parse`] for a header value already known to be a string.
#[inline]
pub fn parse_str(header: &str) -> Result<Credential, MalformedHeader> {
    parse(Some(header.as_bytes())).into_credential()
}

fn parse_payload(payload: &str) -> Result<Credential, MalformedHeader> {
    let mut segments: Vec<&str> = payload.split(',').collect();
    // `Token a="b",` is accepted, only empty pieces at the very end are ignored.
    while segments.last().map_or(false, |segment| segment.is_empty()) {
        segments.pop();
    }

    let mut params = segments
        .into_iter()
        .map(parse_segment)
        .collect::<Result<Params, _>>()?;
    let token = params.remove(TOKEN_KEY);

    Ok(Credential { token, params })
}

fn parse_segment(segment: &str) -> Result<(String, String), MalformedHeader> {
    let segment = segment.trim();
    let (key, value) = segment
        .split_once('=')
        .ok_or_else(|| MalformedHeader::Segment(segment.to_owned()))?;

    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);

    Ok((key.to_owned(), value.replace("\\\"", "\"")))
}
