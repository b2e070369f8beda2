//! "Last fetched value" cache with change notification.
//!
//! The owner is the only writer (`publish`); everyone else reads `latest` or
//! subscribes and receives each new value.

pub type SubscriptionId = u64;

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

pub struct BroadcastCache<T> {
    latest: Option<T>,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: SubscriptionId,
}

impl<T> Default for BroadcastCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BroadcastCache<T> {
    pub fn new() -> Self {
        Self {
            latest: None,
            subscribers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    /// Store `value` and hand it to every subscriber
    pub fn publish(&mut self, value: T) {
        for (_, subscriber) in &self.subscribers {
            subscriber(&value);
        }
        self.latest = Some(value);
    }

    /// Register `subscriber`; it is called immediately if a value is cached
    pub fn subscribe(&mut self, subscriber: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        if let Some(value) = &self.latest {
            subscriber(value);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<i32>>>, impl Fn(&i32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &i32| sink.lock().unwrap().push(*v))
    }

    #[test]
    fn test_publish_reaches_subscribers() {
        let mut cache = BroadcastCache::new();
        let (seen, sub) = recorder();
        cache.subscribe(sub);
        cache.publish(1);
        cache.publish(2);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
        assert_eq!(cache.latest(), Some(&2));
    }

    #[test]
    fn test_late_subscriber_gets_cached_value() {
        let mut cache = BroadcastCache::new();
        cache.publish(7);
        let (seen, sub) = recorder();
        cache.subscribe(sub);
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut cache = BroadcastCache::new();
        let (seen, sub) = recorder();
        let id = cache.subscribe(sub);
        cache.unsubscribe(id);
        cache.publish(3);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(cache.subscriber_count(), 0);
    }
}
