use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use pin_project::pin_project;
use tokio::sync::oneshot;
use tokio::time::Sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayOutcome {
    Elapsed,
    Cancelled,
}

/// A one-shot delayed completion that can be cancelled through its [`DelayHandle`].
///
/// Dropping the handle without cancelling leaves the delay running to completion.
#[pin_project]
#[derive(Debug)]
pub struct Delayed {
    #[pin]
    sleep: Sleep,
    cancel: Option<oneshot::Receiver<()>>,
}

#[derive(Debug)]
pub struct DelayHandle {
    tx: oneshot::Sender<()>,
}

/// Create a delay of `period`. Must be called from within a tokio runtime.
pub fn delay(period: Duration) -> (Delayed, DelayHandle) {
    let (tx, rx) = oneshot::channel();
    (
        Delayed {
            sleep: tokio::time::sleep(period),
            cancel: Some(rx),
        },
        DelayHandle { tx },
    )
}

impl DelayHandle {
    /// Returns `false` if the delay already finished or was dropped.
    pub fn cancel(self) -> bool {
        self.tx.send(()).is_ok()
    }
}

impl Future for Delayed {
    type Output = DelayOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        if let Some(rx) = this.cancel.as_mut() {
            match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(())) => return Poll::Ready(DelayOutcome::Cancelled),
                // handle dropped, nobody can cancel anymore
                Poll::Ready(Err(_)) => *this.cancel = None,
                Poll::Pending => {}
            }
        }

        this.sleep.poll(cx).map(|()| DelayOutcome::Elapsed)
    }
}
