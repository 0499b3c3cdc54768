//! Device location feeds.
//!
//! The platform owns the actual GPS watch and pushes samples in; the session only
//! ever sees a stream of [`LocationSample`]s. A feed that never produces anything
//! (permission denied, no signal) simply leaves the distance unknown.

use std::pin::Pin;

use futures_core::Stream;
use tokio::sync::broadcast;

use crate::models::LocationSample;

const DEFAULT_CAPACITY: usize = 16;

/// A live subscription. Dropping it unsubscribes.
pub type LocationSubscription = Pin<Box<dyn Stream<Item = LocationSample> + Send>>;

pub trait LocationProvider: Send + Sync {
    fn subscribe(&self) -> LocationSubscription;
}

/// Provider fed by the host's platform location callback
#[derive(Clone)]
pub struct BroadcastLocationProvider {
    sender: broadcast::Sender<LocationSample>,
}

impl BroadcastLocationProvider {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Deliver a sample to every current subscriber
    pub fn publish(&self, sample: LocationSample) {
        // No subscribers is fine; the sample is just superseded by the next one
        let _ = self.sender.send(sample);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for BroadcastLocationProvider {
    fn subscribe(&self) -> LocationSubscription {
        let receiver = self.sender.subscribe();

        Box::pin(futures_util::stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(sample) => return Some((sample, receiver)),
                    // Only the newest position matters, so skipped samples are no loss
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::trace!(skipped, "location subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn test_samples_arrive_in_order() {
        let provider = BroadcastLocationProvider::new();
        let mut subscription = provider.subscribe();

        provider.publish(LocationSample::now(1.0, 2.0));
        provider.publish(LocationSample::now(3.0, 4.0));

        assert_eq!(subscription.next().await.unwrap().latitude, 1.0);
        assert_eq!(subscription.next().await.unwrap().latitude, 3.0);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_to_newest() {
        let provider = BroadcastLocationProvider::with_capacity(2);
        let mut subscription = provider.subscribe();

        for i in 0..5 {
            provider.publish(LocationSample::now(i as f64, 0.0));
        }

        assert_eq!(subscription.next().await.unwrap().latitude, 3.0);
        assert_eq!(subscription.next().await.unwrap().latitude, 4.0);
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let provider = BroadcastLocationProvider::new();
        let subscription = provider.subscribe();
        assert_eq!(provider.subscriber_count(), 1);

        drop(subscription);
        assert_eq!(provider.subscriber_count(), 0);
        provider.publish(LocationSample::now(0.0, 0.0));
    }

    #[tokio::test]
    async fn test_stream_ends_when_provider_dropped() {
        let provider = BroadcastLocationProvider::new();
        let mut subscription = provider.subscribe();
        drop(provider);
        assert!(subscription.next().await.is_none());
    }
}
