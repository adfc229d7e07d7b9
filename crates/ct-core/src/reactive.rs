//! Latest-value broadcast cell.
//!
//! A [`BroadcastCell`] holds one value and hands out streams that replay the
//! current value on subscribe and then follow every publish. Writers never
//! wait on readers; a slow reader may skip intermediate values but always
//! observes the latest one.

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

pub struct BroadcastCell<T> {
    tx: watch::Sender<T>,
}

impl<T> BroadcastCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and wake every subscriber. Succeeds with no
    /// subscribers attached.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate the value in place, then notify subscribers.
    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.tx.send_modify(modify);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Stream that yields the current value immediately, then every later
    /// publish. Ends when the cell is dropped.
    pub fn subscribe(&self) -> BoxStream<'static, T> {
        watch_stream(self.tx.subscribe())
    }

    /// Like [`BroadcastCell::subscribe`] without the initial replay: yields
    /// only values published after the call.
    pub fn subscribe_changes(&self) -> BoxStream<'static, T> {
        changes_stream(self.tx.subscribe())
    }
}

impl<T> Default for BroadcastCell<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Adapt a watch receiver into a replaying stream.
pub fn watch_stream<T>(rx: watch::Receiver<T>) -> BoxStream<'static, T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
    .boxed()
}

fn changes_stream<T>(rx: watch::Receiver<T>) -> BoxStream<'static, T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let value = rx.borrow_and_update().clone();
        Some((value, rx))
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_subscriber_sees_latest_value() {
        let cell = BroadcastCell::new(1);
        cell.publish(2);
        cell.publish(3);

        let mut stream = cell.subscribe();
        assert_eq!(stream.next().await, Some(3));
    }

    #[tokio::test]
    async fn test_subscriber_follows_publishes() {
        let cell = BroadcastCell::new(false);
        let mut stream = cell.subscribe();

        assert_eq!(stream.next().await, Some(false));
        cell.publish(true);
        assert_eq!(stream.next().await, Some(true));
        cell.update(|v| *v = !*v);
        assert_eq!(stream.next().await, Some(false));
    }

    #[tokio::test]
    async fn test_change_subscriber_skips_current_value() {
        let cell = BroadcastCell::new(1);
        let mut changes = cell.subscribe_changes();

        cell.publish(2);
        assert_eq!(changes.next().await, Some(2));

        drop(cell);
        assert_eq!(changes.next().await, None);
    }

    #[tokio::test]
    async fn test_stream_ends_when_cell_dropped() {
        let cell = BroadcastCell::new(String::from("a"));
        let mut stream = cell.subscribe();
        assert_eq!(stream.next().await.as_deref(), Some("a"));

        drop(cell);
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_detached_subscribers_do_not_affect_value() {
        let cell = BroadcastCell::new(10);
        {
            let mut stream = cell.subscribe();
            assert_eq!(stream.next().await, Some(10));
            assert_eq!(cell.subscriber_count(), 1);
        }
        assert_eq!(cell.subscriber_count(), 0);

        cell.publish(11);
        assert_eq!(cell.current(), 11);
    }
}
