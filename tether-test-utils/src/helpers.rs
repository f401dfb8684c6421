// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;

/// Asserts that `stream` yields nothing within `timeout_ms`.
///
/// # Panics
///
/// Panics if an element arrives, or the stream ends, before the timeout.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected item emitted, expected no output: {item:?}");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Waits up to `timeout_ms` for the next element of `stream`.
///
/// # Panics
///
/// Panics if the stream ends or the timeout elapses first.
pub async fn next_within<S>(stream: &mut S, timeout_ms: u64) -> S::Item
where
    S: Stream + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            item.unwrap_or_else(|| panic!("Expected an item but stream ended"))
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("Timeout: No item received within {timeout_ms} ms")
        }
    }
}

/// Asserts that `stream` ends within `timeout_ms`.
///
/// # Panics
///
/// Panics if an item arrives instead, or the timeout elapses first.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            if let Some(item) = item {
                panic!("Expected stream to end but got: {item:?}");
            }
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("Timeout: stream did not end within {timeout_ms} ms");
        }
    }
}
