//! # Bag
//!
//! Bounded probabilistic priority store.
//!
//! Items live in a key map and, by key, in two bucket arrays of `granularity`
//! buckets each:
//! - priority buckets, indexed by `floor(priority * N)` clamped to `N - 1`;
//! - quality buckets, indexed the same way by `1 - quality`.
//!
//! Sampling picks a bucket with the two-draw acceptance test (a uniform start
//! bucket, accepted when a second uniform draw does not exceed its index,
//! otherwise moving to the next bucket), then an item uniformly within it.
//! Higher buckets are accepted more often, so sampling the priority buckets
//! favors high priority and sampling the quality buckets (for eviction)
//! favors low quality.
//!
//! Budgets change only through the bag's methods, which move the item to its
//! new bucket.

use super::item::{Budget, Item};
use crate::primitives::QUALITY_STRENGTHEN_VALUE;
use crate::truth::{and, or};
use rand::Rng;
use std::collections::HashMap;

/// Bounded probabilistic priority store keyed by string.
#[derive(Debug, Clone)]
pub struct Bag<T> {
    capacity: usize,
    granularity: usize,
    items: HashMap<String, Item<T>>,
    priority_buckets: Vec<Vec<String>>,
    quality_buckets: Vec<Vec<String>>,
}

impl<T> Bag<T> {
    /// An empty bag. Capacity and granularity are raised to at least 1.
    #[must_use]
    pub fn new(capacity: usize, granularity: usize) -> Self {
        let granularity = granularity.max(1);
        Self {
            capacity: capacity.max(1),
            granularity,
            items: HashMap::new(),
            priority_buckets: vec![Vec::new(); granularity],
            quality_buckets: vec![Vec::new(); granularity],
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Look up an item by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Item<T>> {
        self.items.get(key)
    }

    /// Mutable access to a value. The budget stays under the bag's control.
    pub fn value_mut(&mut self, key: &str) -> Option<&mut T> {
        self.items.get_mut(key).map(Item::value_mut)
    }

    /// All items, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Item<T>> {
        self.items.values()
    }

    // -------------------------------------------------------------------------
    // Insertion and removal
    // -------------------------------------------------------------------------

    /// Insert with the default budget. See [`Bag::put_new_with_budget`].
    pub fn put_new<R: Rng>(&mut self, key: String, value: T, rng: &mut R) -> Option<(String, T)> {
        self.put_new_with_budget(key, value, Budget::default(), rng)
    }

    /// Insert a new item, first evicting one via [`Bag::take_min`] when the
    /// bag is full. Returns the evicted entry.
    ///
    /// An existing key is left untouched.
    pub fn put_new_with_budget<R: Rng>(
        &mut self,
        key: String,
        value: T,
        budget: Budget,
        rng: &mut R,
    ) -> Option<(String, T)> {
        if self.items.contains_key(&key) {
            return None;
        }
        let evicted = if self.items.len() >= self.capacity {
            self.take_min(rng)
        } else {
            None
        };

        let p = self.bucket_index(budget.priority());
        let q = self.bucket_index(1.0 - budget.quality());
        self.priority_buckets[p].push(key.clone());
        self.quality_buckets[q].push(key.clone());
        self.items.insert(key.clone(), Item::new(key, value, budget));
        evicted
    }

    /// Remove an item by key.
    pub fn take_using_key(&mut self, key: &str) -> Option<T> {
        let item = self.items.remove(key)?;
        self.unlink(key, item.budget());
        Some(item.into_parts().1)
    }

    /// Remove an item sampled from the quality buckets, favoring low quality.
    pub fn take_min<R: Rng>(&mut self, rng: &mut R) -> Option<(String, T)> {
        let key = sample(&self.quality_buckets, self.items.len(), rng)?.to_string();
        let value = self.take_using_key(&key)?;
        Some((key, value))
    }

    /// Sample an item from the priority buckets, favoring high priority.
    pub fn peek_random<R: Rng>(&self, rng: &mut R) -> Option<&Item<T>> {
        let key = sample(&self.priority_buckets, self.items.len(), rng)?;
        self.items.get(key)
    }

    // -------------------------------------------------------------------------
    // Budget changes
    // -------------------------------------------------------------------------

    /// Set an item's priority, moving it to the matching bucket.
    pub fn change_priority(&mut self, key: &str, priority: f64) -> bool {
        let Some(old) = self.items.get(key).map(Item::budget) else {
            return false;
        };
        let mut budget = old;
        budget.set_priority(priority);
        self.relocate(key, old, budget);
        true
    }

    /// Set an item's quality, moving it to the matching bucket.
    pub fn change_quality(&mut self, key: &str, quality: f64) -> bool {
        let Some(old) = self.items.get(key).map(Item::budget) else {
            return false;
        };
        let mut budget = old;
        budget.set_quality(quality);
        self.relocate(key, old, budget);
        true
    }

    /// `p ← OR(p, multiplier)`
    pub fn strengthen_priority(&mut self, key: &str, multiplier: f64) -> bool {
        match self.items.get(key) {
            Some(item) => {
                let p = or(&[item.budget().priority(), multiplier]);
                self.change_priority(key, p)
            }
            None => false,
        }
    }

    /// `q ← OR(q, QUALITY_STRENGTHEN_VALUE)`
    pub fn strengthen_quality(&mut self, key: &str) -> bool {
        match self.items.get(key) {
            Some(item) => {
                let q = or(&[item.budget().quality(), QUALITY_STRENGTHEN_VALUE]);
                self.change_quality(key, q)
            }
            None => false,
        }
    }

    /// `p ← AND(p, multiplier)`
    pub fn decay(&mut self, key: &str, multiplier: f64) -> bool {
        match self.items.get(key) {
            Some(item) => {
                let p = and(&[item.budget().priority(), multiplier]);
                self.change_priority(key, p)
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Buckets
    // -------------------------------------------------------------------------

    fn bucket_index(&self, value: f64) -> usize {
        let scaled = (value * self.granularity as f64).floor();
        if scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(self.granularity - 1)
        }
    }

    /// Index of the priority bucket holding `key`.
    #[must_use]
    pub fn priority_bucket_of(&self, key: &str) -> Option<usize> {
        self.items
            .get(key)
            .map(|item| self.bucket_index(item.budget().priority()))
    }

    fn relocate(&mut self, key: &str, old: Budget, new: Budget) {
        self.unlink(key, old);
        let p = self.bucket_index(new.priority());
        let q = self.bucket_index(1.0 - new.quality());
        self.priority_buckets[p].push(key.to_string());
        self.quality_buckets[q].push(key.to_string());
        if let Some(item) = self.items.get_mut(key) {
            *item.budget_mut() = new;
        }
    }

    fn unlink(&mut self, key: &str, budget: Budget) {
        let p = self.bucket_index(budget.priority());
        let q = self.bucket_index(1.0 - budget.quality());
        remove_key(&mut self.priority_buckets[p], key);
        remove_key(&mut self.quality_buckets[q], key);
    }
}

fn remove_key(bucket: &mut Vec<String>, key: &str) {
    if let Some(pos) = bucket.iter().position(|k| k == key) {
        bucket.remove(pos);
    }
}

/// Two-draw bucket sampling. `count` is the number of keys across buckets.
fn sample<'b, R: Rng>(buckets: &'b [Vec<String>], count: usize, rng: &mut R) -> Option<&'b str> {
    if count == 0 || buckets.is_empty() {
        return None;
    }
    let n = buckets.len();
    let draw_max = (n - 1).max(1);
    let mut level = rng.gen_range(0..draw_max);
    loop {
        let bucket = &buckets[level];
        if !bucket.is_empty() && rng.gen_range(0..draw_max) <= level {
            let index = rng.gen_range(0..bucket.len());
            return bucket.get(index).map(String::as_str);
        }
        level = (level + 1) % n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn put_and_get() {
        let mut rng = rng();
        let mut bag: Bag<u32> = Bag::new(10, 100);
        assert!(bag.put_new("a".into(), 1, &mut rng).is_none());
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get("a").map(|i| *i.value()), Some(1));
        assert_eq!(bag.priority_bucket_of("a"), Some(99));
        // existing key is not replaced
        bag.put_new("a".into(), 2, &mut rng);
        assert_eq!(bag.get("a").map(|i| *i.value()), Some(1));
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut rng = rng();
        let mut bag: Bag<usize> = Bag::new(5, 10);
        let mut evicted = 0;
        for i in 0..20 {
            if bag.put_new(format!("k{}", i), i, &mut rng).is_some() {
                evicted += 1;
            }
            assert!(bag.len() <= 5);
        }
        assert_eq!(bag.len(), 5);
        assert_eq!(evicted, 15);
    }

    #[test]
    fn change_priority_relocates() {
        let mut rng = rng();
        let mut bag: Bag<()> = Bag::new(10, 100);
        bag.put_new("x".into(), (), &mut rng);
        assert!(bag.change_priority("x", 0.123));
        assert_eq!(bag.priority_bucket_of("x"), Some(12));
        assert!(bag.decay("x", 0.5));
        assert_eq!(bag.priority_bucket_of("x"), Some(6));
        assert!(bag.strengthen_priority("x", 0.5));
        // OR(0.0615, 0.5) = 0.53075
        assert_eq!(bag.priority_bucket_of("x"), Some(53));
        assert!(!bag.change_priority("missing", 0.5));
    }

    #[test]
    fn take_using_key_unlinks() {
        let mut rng = rng();
        let mut bag: Bag<u8> = Bag::new(4, 4);
        bag.put_new("a".into(), 1, &mut rng);
        bag.put_new("b".into(), 2, &mut rng);
        assert_eq!(bag.take_using_key("a"), Some(1));
        assert!(!bag.contains("a"));
        for _ in 0..50 {
            let item = bag.peek_random(&mut rng).expect("non-empty");
            assert_eq!(item.key(), "b");
        }
    }

    #[test]
    fn peek_on_empty_bag() {
        let mut rng = rng();
        let bag: Bag<u8> = Bag::new(4, 100);
        assert!(bag.peek_random(&mut rng).is_none());
    }

    #[test]
    fn single_bucket_bag_samples() {
        let mut rng = rng();
        let mut bag: Bag<u8> = Bag::new(3, 1);
        bag.put_new("only".into(), 0, &mut rng);
        assert_eq!(bag.peek_random(&mut rng).map(Item::key), Some("only"));
    }

    #[test]
    fn peek_favors_high_priority() {
        let mut rng = rng();
        let mut bag: Bag<()> = Bag::new(10, 100);
        bag.put_new("high".into(), (), &mut rng);
        bag.put_new("low".into(), (), &mut rng);
        bag.change_priority("high", 0.95);
        bag.change_priority("low", 0.05);
        let mut high = 0;
        for _ in 0..2000 {
            if bag.peek_random(&mut rng).map(Item::key) == Some("high") {
                high += 1;
            }
        }
        assert!(high > 1500, "high priority sampled {} times", high);
    }
}
