//! Response body wrapper that detects full transmission.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use http::Method;
use http_body::{Body, Frame, SizeHint};
use pin_project::{pin_project, pinned_drop};

use crate::sink::LogSink;

/// Everything needed to emit the line for one request once its response
/// has actually been sent.
pub(crate) struct ResponseObserver {
    pub(crate) method: Method,
    pub(crate) target: String,
    pub(crate) status: u16,
    pub(crate) start: Instant,
    pub(crate) sink: Arc<dyn LogSink>,
}

impl ResponseObserver {
    fn fire(self) {
        let marker = if self.status < 400 { "✅" } else { "❌" };
        let duration_ms = self.start.elapsed().as_millis();
        let line = format!(
            "{marker} {} {} {} {duration_ms}ms",
            self.method, self.target, self.status
        );
        // A broken sink must never take the response down with it.
        let _ = self.sink.write_line(&line);
    }
}

/// Body wrapper that fires its observer exactly once: when the stream
/// ends, when it errors, or when the body is dropped mid-flight.
///
/// Wrapping the body rather than the handler future is what makes the
/// logged duration cover transmission, not just handler latency, and
/// what guarantees a line even for responses abandoned partway through.
#[pin_project(PinnedDrop)]
pub struct LogBody<B> {
    #[pin]
    inner: B,
    observer: Option<ResponseObserver>,
}

impl<B> LogBody<B> {
    pub(crate) fn new(inner: B, observer: ResponseObserver) -> Self {
        Self {
            inner,
            observer: Some(observer),
        }
    }
}

impl<B> Body for LogBody<B>
where
    B: Body,
{
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.project();
        match this.inner.poll_frame(cx) {
            Poll::Ready(None) => {
                if let Some(observer) = this.observer.take() {
                    observer.fire();
                }
                Poll::Ready(None)
            }
            Poll::Ready(Some(Err(err))) => {
                if let Some(observer) = this.observer.take() {
                    observer.fire();
                }
                Poll::Ready(Some(Err(err)))
            }
            other => other,
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

#[pinned_drop]
impl<B> PinnedDrop for LogBody<B> {
    fn drop(self: Pin<&mut Self>) {
        let this = self.project();
        if let Some(observer) = this.observer.take() {
            observer.fire();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use bytes::Bytes;
    use http_body_util::{BodyExt, Full, StreamBody};

    use super::*;

    #[derive(Default)]
    struct MemorySink {
        lines: Mutex<Vec<String>>,
    }

    impl MemorySink {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl LogSink for MemorySink {
        fn write_line(&self, line: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(line.to_string());
            Ok(())
        }
    }

    fn observer(status: u16, sink: Arc<MemorySink>) -> ResponseObserver {
        ResponseObserver {
            method: Method::GET,
            target: "/ping".to_string(),
            status,
            start: Instant::now(),
            sink,
        }
    }

    #[tokio::test]
    async fn fires_once_when_the_stream_ends() {
        let sink = Arc::new(MemorySink::default());
        let body = LogBody::new(
            Full::new(Bytes::from_static(b"pong")),
            observer(200, sink.clone()),
        );

        let collected = body.collect().await.unwrap();
        assert_eq!(collected.to_bytes(), Bytes::from_static(b"pong"));

        // End of stream fired the line; the drop afterwards must not.
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("✅ GET /ping 200 "));
        assert!(lines[0].ends_with("ms"));
    }

    #[tokio::test]
    async fn fires_once_when_the_stream_errors() {
        let sink = Arc::new(MemorySink::default());
        let frames: Vec<Result<Frame<Bytes>, io::Error>> = vec![
            Ok(Frame::data(Bytes::from_static(b"partial"))),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ];
        let body = LogBody::new(
            StreamBody::new(futures::stream::iter(frames)),
            observer(200, sink.clone()),
        );

        assert!(body.collect().await.is_err());
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn fires_on_drop_without_any_polling() {
        let sink = Arc::new(MemorySink::default());
        let body = LogBody::new(
            Full::new(Bytes::from_static(b"never sent")),
            observer(500, sink.clone()),
        );
        drop(body);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("❌ GET /ping 500 "));
    }

    #[test]
    fn status_400_and_up_gets_the_failure_marker() {
        let sink = Arc::new(MemorySink::default());
        drop(LogBody::new(
            Full::new(Bytes::new()),
            observer(404, sink.clone()),
        ));
        drop(LogBody::new(
            Full::new(Bytes::new()),
            observer(399, sink.clone()),
        ));

        let lines = sink.lines();
        assert!(lines[0].starts_with("❌"));
        assert!(lines[1].starts_with("✅"));
    }
}
