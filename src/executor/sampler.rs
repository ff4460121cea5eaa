//! Timed stream sampling

use crate::{
    client::ByteStream,
    error::AppError,
    stats::{SampleResult, SampleWindow},
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::timeout;

/// Totals of a sampled stream plus the fault that ended it early, if any
#[derive(Debug)]
pub struct SampleOutcome {
    pub result: SampleResult,
    pub interruption: Option<AppError>,
}

/// Read `body` until it ends or `duration` has elapsed since the window opened
///
/// Every read waits at most `read_timeout`. A read error or a stalled read
/// stops sampling and is returned as the interruption; the bytes received
/// until then are kept. The body is dropped on return, closing the connection.
pub async fn sample_stream(
    mut body: ByteStream,
    duration: Duration,
    chunk_size: usize,
    read_timeout: Duration,
) -> SampleOutcome {
    let mut window = SampleWindow::open(duration, chunk_size);
    let mut interruption = None;

    loop {
        match timeout(read_timeout, body.next()).await {
            Ok(Some(Ok(chunk))) => {
                window.record(chunk.len());
                if window.is_expired() {
                    break;
                }
            }
            Ok(Some(Err(e))) => {
                interruption = Some(e);
                break;
            }
            Ok(None) => break,
            Err(_) => {
                interruption = Some(AppError::timeout(format!(
                    "no data received for {:.1}s",
                    read_timeout.as_secs_f64()
                )));
                break;
            }
        }
    }

    SampleOutcome {
        result: window.close(),
        interruption,
    }
}
