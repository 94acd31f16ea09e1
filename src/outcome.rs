//! Results of debounced callbacks, synchronous or asynchronous.
//!
//! A debounced callback may return a plain value or a deferred one. The
//! [`Outcome`] trait lets the debouncer treat both uniformly: it settles the
//! value, keeps a still-pending one around for the next service call, and
//! forwards any failure to a diagnostic sink.

use core::convert::Infallible;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

/// State of an outcome after one settle attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled<P, E> {
    /// Completed successfully.
    Done,
    /// Completed with a failure to report.
    Failed(E),
    /// Not complete yet. Holds the remainder to settle later.
    Pending(P),
}

/// A value returned by a debounced callback.
pub trait Outcome: Sized {
    /// Failure type routed to the diagnostic sink.
    type Error;

    /// Attempts to settle the outcome.
    ///
    /// Synchronous outcomes settle on the first attempt. Asynchronous ones may
    /// return [`Settled::Pending`] with themselves to be retried.
    fn settle(self, cx: &mut Context<'_>) -> Settled<Self, Self::Error>;
}

impl Outcome for () {
    type Error = Infallible;

    fn settle(self, _cx: &mut Context<'_>) -> Settled<Self, Self::Error> {
        Settled::Done
    }
}

impl<T, E> Outcome for Result<T, E> {
    type Error = E;

    fn settle(self, _cx: &mut Context<'_>) -> Settled<Self, Self::Error> {
        match self {
            Ok(_) => Settled::Done,
            Err(err) => Settled::Failed(err),
        }
    }
}

/// Asynchronous outcome wrapping a future.
///
/// Return `Deferred(fut)` from a debounced callback to run asynchronous work.
/// A rejection (`Err`) is reported to the sink instead of being dropped
/// silently.
///
/// The future must be `Unpin` because the debouncer moves it between service
/// calls. `async` blocks and `async fn` futures are not `Unpin`: with the
/// `std` feature wrap them with `Deferred::boxed`. Without an allocator only
/// futures that are `Unpin` by construction (hand-written state machines,
/// `core::future::Ready`, etc.) can be returned.
#[derive(Debug)]
pub struct Deferred<F>(pub F);

#[cfg(feature = "std")]
impl<Fut> Deferred<Pin<std::boxed::Box<Fut>>>
where
    Fut: Future,
{
    /// Pins `fut` on the heap so `async` blocks can be returned.
    pub fn boxed(fut: Fut) -> Self {
        Deferred(std::boxed::Box::pin(fut))
    }
}

impl<F, T, E> Outcome for Deferred<F>
where
    F: Future<Output = Result<T, E>> + Unpin,
{
    type Error = E;

    fn settle(mut self, cx: &mut Context<'_>) -> Settled<Self, Self::Error> {
        match Pin::new(&mut self.0).poll(cx) {
            Poll::Ready(Ok(_)) => Settled::Done,
            Poll::Ready(Err(err)) => Settled::Failed(err),
            Poll::Pending => Settled::Pending(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::task::Waker;

    struct PendingOnce<T> {
        polled: bool,
        value: Option<T>,
    }

    impl<T: Unpin> Future for PendingOnce<T> {
        type Output = T;

        fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<T> {
            if !self.polled {
                self.polled = true;
                return Poll::Pending;
            }
            match self.value.take() {
                Some(value) => Poll::Ready(value),
                None => Poll::Pending,
            }
        }
    }

    #[test]
    fn sync_outcomes_settle_immediately() {
        let mut cx = Context::from_waker(Waker::noop());
        assert_eq!(().settle(&mut cx), Settled::Done);
        assert_eq!(Ok::<u8, u8>(1).settle(&mut cx), Settled::Done);
        assert_eq!(Err::<u8, u8>(9).settle(&mut cx), Settled::Failed(9));
    }

    #[test]
    fn deferred_outcome_stays_pending_until_ready() {
        let mut cx = Context::from_waker(Waker::noop());
        let fut = PendingOnce {
            polled: false,
            value: Some(Err::<(), &str>("timeout")),
        };

        let remainder = match Deferred(fut).settle(&mut cx) {
            Settled::Pending(rest) => rest,
            _ => panic!("expected pending"),
        };

        assert!(matches!(remainder.settle(&mut cx), Settled::Failed("timeout")));
    }

    #[cfg(feature = "std")]
    #[test]
    fn boxed_async_block_settles() {
        let mut cx = Context::from_waker(Waker::noop());
        let deferred = Deferred::boxed(async { Err::<(), u8>(7) });
        assert!(matches!(deferred.settle(&mut cx), Settled::Failed(7)));
    }
}
