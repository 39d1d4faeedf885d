//! Tower service adapter exposing hero search as a fetch seam.

use crate::{HeroClient, HttpRequest, HttpResponse};
use futures::future::BoxFuture;
use heroes_core::{Hero, TransportError};
use std::task::{Context, Poll};
use tower::Service;

/// `tower::Service<String>` over [`HeroClient::search_heroes`].
///
/// This is the glue between the client and a search pipeline: the pipeline
/// pushes surviving terms into any `Service<String>`, and this adapter maps
/// each term to a name-filtered collection query. Because the client already
/// recovers from transport failures, the adapter resolves with the fallback
/// (empty) list rather than erroring.
pub struct SearchHeroes<S> {
    client: HeroClient<S>,
}

impl<S> SearchHeroes<S> {
    /// Wraps a client as a search fetch service.
    pub fn new(client: HeroClient<S>) -> Self {
        Self { client }
    }
}

impl<S: Clone> Clone for SearchHeroes<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<S> Service<String> for SearchHeroes<S>
where
    S: Service<HttpRequest, Response = HttpResponse, Error = TransportError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    type Response = Vec<Hero>;
    type Error = TransportError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, term: String) -> Self::Future {
        let client = self.client.clone();
        Box::pin(async move { Ok(client.search_heroes(&term).await.into_value()) })
    }
}
