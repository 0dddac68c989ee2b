use crate::credential::{self, ParseOutcome};
use http::{header, HeaderValue, Request};

pub struct Authorization<'a> {
    header: Option<&'a HeaderValue>,
}

impl<'a> Authorization<'a> {
    pub fn new<'r, B>(req: &'r Request<B>) -> Self
    where
        'r: 'a,
    {
        Self {
            header: req.headers().get(header::AUTHORIZATION),
        }
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.header.is_some()
    }

    /// Runs the `Token` scheme parser over the raw header bytes.
    #[inline]
    pub fn outcome(&self) -> ParseOutcome {
        credential::parse(self.header.map(HeaderValue::as_bytes))
    }
}
