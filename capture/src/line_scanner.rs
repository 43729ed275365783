//! Scan source fed by an external decoder's line output.
//!
//! Decoders such as `zbarcam --raw` print one decoded payload per line. The
//! scanner opens a fresh reader on every mount, spawns a producer task that
//! forwards each line as a [`ScanEvent::Decoded`], and aborts the task when
//! the subscription is released.

use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use crate::scan::{ScanEvent, ScanSource, ScanSubscription, DEFAULT_EVENT_BUFFER};
use crate::CaptureError;

/// A scan source reading newline-delimited decoded text.
pub struct LineScanner<F> {
    open: F,
    buffer: usize,
}

fn open_stdin() -> io::Result<tokio::io::Stdin> {
    Ok(tokio::io::stdin())
}

impl LineScanner<fn() -> io::Result<tokio::io::Stdin>> {
    /// Read decoded payloads from standard input.
    ///
    /// Every mount opens a fresh handle. Releasing aborts the producer, but a
    /// read already parked on the blocking pool still completes and its line
    /// is lost, as is anything left in the dropped buffer. Fine for a single
    /// scan per process; a second mount may miss the first line sent after
    /// the previous release.
    pub fn stdin() -> Self {
        Self::new(open_stdin)
    }
}

impl<F, R> LineScanner<F>
where
    F: FnMut() -> io::Result<R>,
    R: AsyncRead + Unpin + Send + 'static,
{
    /// `open` is called on every mount to acquire the underlying stream.
    pub fn new(open: F) -> Self {
        Self {
            open,
            buffer: DEFAULT_EVENT_BUFFER,
        }
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }
}

impl<F, R> ScanSource for LineScanner<F>
where
    F: FnMut() -> io::Result<R>,
    R: AsyncRead + Unpin + Send + 'static,
{
    /// Must be called from within a Tokio runtime.
    fn mount(&mut self) -> Result<ScanSubscription, CaptureError> {
        let reader = (self.open)().map_err(|e| CaptureError::ScanDevice(e.to_string()))?;
        let (tx, subscription) = ScanSubscription::channel(self.buffer);
        let producer = tokio::spawn(produce_lines(BufReader::new(reader), tx));
        tracing::debug!("line scanner mounted");
        Ok(subscription.on_release(move || {
            producer.abort();
            tracing::debug!("line scanner released");
        }))
    }
}

async fn produce_lines<R>(reader: BufReader<R>, tx: mpsc::Sender<ScanEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let (event, stop) = match lines.next_line().await {
            Ok(Some(line)) => (ScanEvent::Decoded(line.trim_end_matches('\r').to_string()), false),
            Ok(None) => {
                tracing::debug!("scan input reached end of stream");
                return;
            }
            Err(e) => (ScanEvent::Error(e.to_string()), true),
        };
        if tx.send(event).await.is_err() {
            // Unsubscribed.
            return;
        }
        if stop {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn forwards_each_line() {
        let mut scanner = LineScanner::new(|| Ok(Cursor::new(b"45CSE001,x\r\nSECOND\n".to_vec())));
        let mut sub = scanner.mount().expect("mount");
        assert_eq!(sub.next().await, Some(ScanEvent::Decoded("45CSE001,x".into())));
        assert_eq!(sub.next().await, Some(ScanEvent::Decoded("SECOND".into())));
        assert_eq!(sub.next().await, None);
    }

    #[tokio::test]
    async fn mount_failure_is_a_device_error() {
        let mut scanner = LineScanner::new(|| -> io::Result<Cursor<Vec<u8>>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "camera busy"))
        });
        match scanner.mount() {
            Err(CaptureError::ScanDevice(msg)) => assert!(msg.contains("camera busy")),
            other => panic!("expected device error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn remounting_opens_a_fresh_reader() {
        let mut opened = 0;
        let mut scanner = LineScanner::new(move || {
            opened += 1;
            Ok(Cursor::new(format!("mount-{opened}\n").into_bytes()))
        });
        let mut first = scanner.mount().unwrap();
        assert_eq!(first.next().await, Some(ScanEvent::Decoded("mount-1".into())));
        drop(first);
        let mut second = scanner.mount().unwrap();
        assert_eq!(second.next().await, Some(ScanEvent::Decoded("mount-2".into())));
    }
}
