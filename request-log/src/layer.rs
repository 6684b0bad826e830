//! The tower layer and service.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use http::{Request, Response};
use tower::{Layer, Service};

use crate::body::{LogBody, ResponseObserver};
use crate::sink::{LogSink, StdoutSink};

/// Layer that emits one line per request once the response has been
/// fully transmitted.
#[derive(Clone)]
pub struct RequestLogLayer {
    sink: Arc<dyn LogSink>,
}

impl RequestLogLayer {
    /// Log to the given sink.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Log to process stdout.
    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink))
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogService {
            inner,
            sink: self.sink.clone(),
        }
    }
}

/// Service produced by [`RequestLogLayer`].
///
/// The clock starts when the request arrives, before the inner service
/// runs. Method, target and status are captured eagerly; the line
/// itself is deferred to the [`LogBody`] wrapping the response, so it
/// appears only once the body has gone out (or is abandoned).
#[derive(Clone)]
pub struct RequestLogService<S> {
    inner: S,
    sink: Arc<dyn LogSink>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLogService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
{
    type Response = Response<LogBody<ResBody>>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let method = request.method().clone();
        // Original target including the query string, not the matched route.
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| request.uri().path().to_string());
        let sink = self.sink.clone();

        let response = self.inner.call(request);

        Box::pin(async move {
            let response = response.await?;
            let status = response.status().as_u16();
            let (parts, body) = response.into_parts();
            let observer = ResponseObserver {
                method,
                target,
                status,
                start,
                sink,
            };
            Ok(Response::from_parts(parts, LogBody::new(body, observer)))
        })
    }
}
