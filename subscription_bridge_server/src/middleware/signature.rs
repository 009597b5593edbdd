//! Request signature middleware for Actix Web.
//!
//! Storefront app proxy requests carry a `signature` query parameter: the hex HMAC-SHA256, keyed with the app's client
//! secret, of all the other query parameters sorted by name and concatenated as `name=value`.
//!
//! Wrap every scope that returns customer data or changes a subscription with this middleware. Requests that fail the
//! check are rejected with [`ServerError::Unauthenticated`] before they reach a handler. Requests that pass are
//! forwarded untouched.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::LocalBoxFuture;
use log::{trace, warn};
use ssb_common::Secret;
use subscription_engine::{check_signature, SignatureError};

use crate::{
    config::ServerOptions,
    errors::ServerError,
    helpers::{query_parameters, remote_label},
};

pub struct SignatureMiddlewareFactory {
    key: Secret<String>,
    options: ServerOptions,
}

impl SignatureMiddlewareFactory {
    pub fn new(key: Secret<String>, options: ServerOptions) -> Self {
        SignatureMiddlewareFactory { key, options }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SignatureMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = SignatureMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SignatureMiddlewareService {
            key: self.key.clone(),
            options: self.options,
            service: Rc::new(service),
        }))
    }
}

pub struct SignatureMiddlewareService<S> {
    key: Secret<String>,
    options: ServerOptions,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SignatureMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        trace!("🔐️ Checking signature for request to {}", req.path());
        let verdict = match query_parameters(req.query_string()) {
            Some(params) => check_signature(params, self.key.as_bytes()),
            None => {
                warn!("🔐️ Could not parse the query string of a request to {}", req.path());
                Err(SignatureError::MissingSignature)
            },
        };
        match verdict {
            Ok(()) => {
                trace!("🔐️ Signature check for request ✅️");
                Box::pin(async move { service.call(req).await })
            },
            Err(e) => {
                let from = remote_label(req.request(), self.options);
                warn!("🔐️ Unauthenticated request to {} from {from}. {e}. Denying access.", req.path());
                Box::pin(ready(Err(ServerError::Unauthenticated.into())))
            },
        }
    }
}
