// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use async_stream::stream;

use crate::{InlineVec, PinnedInputStream};

/// The main constructors are:
/// - [`super::InputDeviceExtMock::new_mock()`]
/// - [`super::InputDeviceExtMock::new_mock_with_delay()`]
pub fn gen_input_stream<T>(generator_vec: InlineVec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

pub fn gen_input_stream_with_delay<T>(
    generator_vec: InlineVec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// A stream that yields `generator_vec` and then stays open forever, like a terminal
/// that the user stopped typing into. Useful to test the abort signal.
pub fn gen_input_stream_then_pending<T>(generator_vec: InlineVec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
        std::future::pending::<()>().await;
    };
    Box::pin(it)
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;
    use smallvec::smallvec;

    use super::*;

    #[tokio::test]
    async fn test_gen_input_stream() {
        let mut input_stream = gen_input_stream(smallvec![1, 2, 3]);
        for _ in 1..=3 {
            input_stream.next().await;
        }
        pretty_assertions::assert_eq!(input_stream.next().await, None);
    }

    #[tokio::test]
    async fn test_gen_input_stream_with_delay() {
        const DELAY: u64 = 50;

        let start_time = std::time::Instant::now();

        let mut input_stream =
            gen_input_stream_with_delay(smallvec![1, 2, 3], Duration::from_millis(DELAY));
        for _ in 1..=3 {
            input_stream.next().await;
        }

        let elapsed = start_time.elapsed();

        pretty_assertions::assert_eq!(input_stream.next().await, None);
        assert!(elapsed >= Duration::from_millis(DELAY * 3));
    }

    #[tokio::test]
    async fn test_gen_input_stream_then_pending() {
        let mut input_stream = gen_input_stream_then_pending(smallvec![1]);
        pretty_assertions::assert_eq!(input_stream.next().await, Some(1));
        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), input_stream.next()).await;
        assert!(timed_out.is_err());
    }
}
