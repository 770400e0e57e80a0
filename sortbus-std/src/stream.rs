//! Broadcast bus with stream subscriptions.
//!
//! [`StreamBus`] delivers every value to each subscription listening for
//! its exact key, in send order, until the subscription is dropped. Each
//! subscription owns an unbounded channel, so traffic under other keys never
//! displaces its values. There are no priorities and no consumption.

use futures::{
    Stream, StreamExt,
    channel::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use parking_lot::Mutex;
use sortbus_core::{Message, TypeKey};
use std::{
    any::Any,
    collections::HashMap,
    fmt,
    marker::PhantomData,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

type Payload = Arc<dyn Any + Send + Sync>;

/// A publish/subscribe bus filtering by key.
///
/// Subscribers receive the sent value as a shared `Arc<E>`: they all observe
/// the same allocation.
///
/// Senders never wait. A subscription buffers whatever it has not consumed
/// yet, without bound, so a subscription that is kept alive should be
/// polled.
///
/// # Example
///
/// ```rust,ignore
/// let bus = StreamBus::new();
/// let mut logins = bus.listen::<Login>();
///
/// bus.send(Login { user: "ada".into() });
/// let login = logins.next().await;
/// ```
#[derive(Default)]
pub struct StreamBus {
    subscribers: Mutex<HashMap<TypeKey, Vec<UnboundedSender<Payload>>>>,
}

impl StreamBus {
    /// Create a bus without subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `value` under `TypeKey::of::<E>()`.
    ///
    /// Returns the number of live subscriptions on that key the value was
    /// delivered to. Zero means nobody was listening.
    pub fn send<E: Message>(&self, value: E) -> usize {
        self.send_as(value, TypeKey::of::<E>())
    }

    /// Publish `value` under an explicit `key`.
    pub fn send_as<E: Message>(&self, value: E, key: TypeKey) -> usize {
        let payload: Payload = Arc::new(value);
        let mut subscribers = self.subscribers.lock();
        let Some(senders) = subscribers.get_mut(&key) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(%key, "no subscribers, value dropped");
            return 0;
        };

        // A failed send means the subscription was dropped.
        senders.retain(|sender| sender.unbounded_send(payload.clone()).is_ok());
        let delivered = senders.len();
        if delivered == 0 {
            subscribers.remove(&key);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(%key, delivered, "value published");
        delivered
    }

    /// Subscribe to values of type `E` sent under `TypeKey::of::<E>()`.
    ///
    /// Only values sent after this call are delivered.
    pub fn listen<E: Message>(&self) -> Subscription<E> {
        self.listen_as(TypeKey::of::<E>())
    }

    /// Subscribe to values of type `E` sent under `key`.
    ///
    /// Values sent under `key` with a different type are skipped.
    pub fn listen_as<E: Message>(&self, key: TypeKey) -> Subscription<E> {
        let (sender, receiver) = mpsc::unbounded();
        self.subscribers
            .lock()
            .entry(key.clone())
            .or_default()
            .push(sender);
        Subscription {
            receiver,
            key,
            _event: PhantomData,
        }
    }

    /// Number of live subscriptions, across all keys.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .values()
            .flatten()
            .filter(|sender| !sender.is_closed())
            .count()
    }
}

impl fmt::Debug for StreamBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A live subscription to a [`StreamBus`].
///
/// Yields matching values in send order. The stream ends once the bus is
/// dropped and the buffered values are drained. Dropping the subscription
/// unsubscribes.
pub struct Subscription<E> {
    receiver: UnboundedReceiver<Payload>,
    key: TypeKey,
    _event: PhantomData<fn() -> E>,
}

impl<E> Subscription<E> {
    /// The key this subscription listens for.
    pub fn key(&self) -> &TypeKey {
        &self.key
    }
}

impl<E: Message> Stream for Subscription<E> {
    type Item = Arc<E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match self.receiver.poll_next_unpin(cx) {
                Poll::Ready(Some(payload)) => match payload.downcast::<E>() {
                    Ok(value) => return Poll::Ready(Some(value)),
                    Err(_) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            key = %self.key,
                            expected = std::any::type_name::<E>(),
                            "value of another type sent under key, skipped"
                        );
                    }
                },
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<E> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("event_type", &std::any::type_name::<E>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_without_subscribers() {
        let bus = StreamBus::new();
        assert_eq!(bus.send(1), 0);
    }

    #[test]
    fn test_send_counts_subscribers_on_key() {
        let bus = StreamBus::new();
        let first = bus.listen::<i32>();
        let second = bus.listen::<String>();
        assert_eq!(bus.subscriber_count(), 2);
        assert_eq!(bus.send(1), 1);
        assert_eq!(bus.send(String::from("x")), 1);
        drop(first);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(bus.send(1), 0);
        drop(second);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_filters_by_type() {
        let bus = StreamBus::new();
        let ints = bus.listen::<i32>();
        bus.send("other");
        bus.send(1);
        bus.send(2u8);
        bus.send(3);
        drop(bus);

        let values: Vec<i32> = ints.map(|v| *v).collect().await;
        assert_eq!(values, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_named_key_skips_other_types() {
        let bus = StreamBus::new();
        let key = TypeKey::named("numbers");
        let numbers = bus.listen_as::<i32>(key.clone());
        assert_eq!(numbers.key(), &key);
        bus.send_as("not a number", key.clone());
        bus.send_as(7, key.clone());
        bus.send(8);
        drop(bus);

        let values: Vec<i32> = numbers.map(|v| *v).collect().await;
        assert_eq!(values, vec![7]);
    }

    #[tokio::test]
    async fn test_traffic_on_other_keys_does_not_displace_values() {
        let bus = StreamBus::new();
        let ints = bus.listen::<i32>();
        let strings = bus.listen::<String>();
        bus.send(1);
        for i in 0..1000 {
            bus.send(format!("noise {i}"));
        }
        bus.send(2);
        drop(bus);

        let values: Vec<i32> = ints.map(|v| *v).collect().await;
        assert_eq!(values, vec![1, 2]);
        assert_eq!(strings.count().await, 1000);
    }
}
