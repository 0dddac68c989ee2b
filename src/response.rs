use http::{header, HeaderValue, Request, Response, StatusCode};

pub trait Responder<B, ResBody> {
    fn respond(&self, req: Request<B>) -> Response<ResBody>;
}

impl<F, B, ResBody> Responder<B, ResBody> for F
where
    F: Fn(Request<B>) -> Response<ResBody>,
{
    #[inline]
    fn respond(&self, req: Request<B>) -> Response<ResBody> {
        self(req)
    }
}

/// `401 Unauthorized` with the plain text body `Unauthorized`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultUnauthorized;

impl<B, ResBody> Responder<B, ResBody> for DefaultUnauthorized
where
    ResBody: From<&'static str>,
{
    fn respond(&self, _req: Request<B>) -> Response<ResBody> {
        text(StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

/// `400 Bad Request` with the plain text body
/// `Unprocessable Authorization header`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultUnprocessable;

impl<B, ResBody> Responder<B, ResBody> for DefaultUnprocessable
where
    ResBody: From<&'static str>,
{
    fn respond(&self, _req: Request<B>) -> Response<ResBody> {
        text(StatusCode::BAD_REQUEST, "Unprocessable Authorization header")
    }
}

fn text<ResBody>(status: StatusCode, body: &'static str) -> Response<ResBody>
where
    ResBody: From<&'static str>,
{
    let mut res = Response::new(ResBody::from(body));
    *res.status_mut() = status;
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res
}
