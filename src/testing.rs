//! Helpers shared by the unit tests.

use std::task::Poll;

/// Suspends the current task exactly once, waking it so any executor polls again.
pub(crate) async fn yield_now() {
    let mut yielded = false;
    futures::future::poll_fn(move |cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use futures::executor::block_on;

    #[test]
    fn test_yield_now_suspends_once() {
        let mut polls = 0;
        let mut future = Box::pin(yield_now());
        block_on(futures::future::poll_fn(|cx| {
            polls += 1;
            future.poll_unpin(cx)
        }));
        assert_eq!(polls, 2);
    }

    #[test]
    fn test_yield_now_completes_under_block_on() {
        let r = block_on(crate::ResultAsync::<_, ()>::from_future(async {
            yield_now().await;
            Ok(1)
        }));
        assert_eq!(r, Ok(1));
    }
}
