use crate::credential::Params;
use crate::request::{ParameterFallback, RequestExt};
use crate::response::{DefaultUnauthorized, DefaultUnprocessable, Responder};
use http::{Request, Response};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

mod future;
pub use future::ResponseFuture;

/// Implemented for any `Fn(Option<&str>, &Params, &Request<B>) -> bool`.
pub trait Predicate<B> {
    fn allow(&self, token: Option<&str>, params: &Params, req: &Request<B>) -> bool;
}

impl<F, B> Predicate<B> for F
where
    F: Fn(Option<&str>, &Params, &Request<B>) -> bool,
{
    #[inline]
    fn allow(&self, token: Option<&str>, params: &Params, req: &Request<B>) -> bool {
        self(token, params, req)
    }
}

struct Config<P, U, H> {
    predicate: P,
    unauthorized: U,
    unprocessable: H,
    fallback: ParameterFallback,
}

#[derive(Clone, Debug)]
pub struct TokenAuthLayer<P, U = DefaultUnauthorized, H = DefaultUnprocessable> {
    predicate: P,
    unauthorized: U,
    unprocessable: H,
    fallback: ParameterFallback,
}

impl<P> TokenAuthLayer<P> {
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            unauthorized: DefaultUnauthorized,
            unprocessable: DefaultUnprocessable,
            fallback: ParameterFallback::Disabled,
        }
    }
}

impl<P, U, H> TokenAuthLayer<P, U, H> {
    pub fn unauthorized_app<U2>(self, responder: U2) -> TokenAuthLayer<P, U2, H> {
        TokenAuthLayer {
            predicate: self.predicate,
            unauthorized: responder,
            unprocessable: self.unprocessable,
            fallback: self.fallback,
        }
    }

    pub fn unprocessable_header_app<H2>(self, responder: H2) -> TokenAuthLayer<P, U, H2> {
        TokenAuthLayer {
            predicate: self.predicate,
            unauthorized: self.unauthorized,
            unprocessable: responder,
            fallback: self.fallback,
        }
    }

    /// Accept the token from the `api_token` request parameter when the
    /// header has none.
    pub fn check_parameter(self) -> Self {
        self.parameter_fallback(ParameterFallback::Default)
    }

    pub fn check_parameter_named(self, name: impl Into<String>) -> Self {
        self.parameter_fallback(ParameterFallback::Named(name.into()))
    }

    pub fn parameter_fallback(mut self, fallback: impl Into<ParameterFallback>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl<S, P, U, H> Layer<S> for TokenAuthLayer<P, U, H>
where
    P: Clone,
    U: Clone,
    H: Clone,
{
    type Service = TokenAuth<S, P, U, H>;

    fn layer(&self, inner: S) -> Self::Service {
        TokenAuth {
            inner,
            config: Arc::new(Config {
                predicate: self.predicate.clone(),
                unauthorized: self.unauthorized.clone(),
                unprocessable: self.unprocessable.clone(),
                fallback: self.fallback.clone(),
            }),
        }
    }
}

pub struct TokenAuth<S, P, U = DefaultUnauthorized, H = DefaultUnprocessable> {
    inner: S,
    config: Arc<Config<P, U, H>>,
}

impl<P> TokenAuth<(), P> {
    pub fn layer(predicate: P) -> TokenAuthLayer<P> {
        TokenAuthLayer::new(predicate)
    }
}

impl<S, P> TokenAuth<S, P> {
    pub fn new(inner: S, predicate: P) -> Self {
        TokenAuthLayer::new(predicate).into_service(inner)
    }
}

impl<P, U, H> TokenAuthLayer<P, U, H> {
    fn into_service<S>(self, inner: S) -> TokenAuth<S, P, U, H> {
        TokenAuth {
            inner,
            config: Arc::new(Config {
                predicate: self.predicate,
                unauthorized: self.unauthorized,
                unprocessable: self.unprocessable,
                fallback: self.fallback,
            }),
        }
    }
}

impl<S, P, U, H> TokenAuth<S, P, U, H> {
    #[inline]
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Clone, P, U, H> Clone for TokenAuth<S, P, U, H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S, P, U, H, ReqBody, ResBody> Service<Request<ReqBody>> for TokenAuth<S, P, U, H>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    P: Predicate<ReqBody>,
    U: Responder<ReqBody, ResBody>,
    H: Responder<ReqBody, ResBody>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let config = &*self.config;

        let credential = match req.credential(&config.fallback) {
            Ok(credential) => credential,
            Err(error) => {
                tracing::debug!(%error, "unprocessable authorization header");
                return ResponseFuture::refused(config.unprocessable.respond(req));
            }
        };

        if config
            .predicate
            .allow(credential.token(), credential.params(), &req)
        {
            tracing::trace!("request authorized");
            ResponseFuture::inner(self.inner.call(req))
        } else {
            tracing::debug!(
                has_token = credential.token().is_some(),
                "request not authorized"
            );
            ResponseFuture::refused(config.unauthorized.respond(req))
        }
    }
}
