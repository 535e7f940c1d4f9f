// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential asynchronous iteration.
//!
//! [`queue`] visits the entries of a collection in declared order and awaits
//! the handler for each entry before starting the next one. It is the only
//! scheduling primitive the lifecycle uses: children, component maps and mount
//! bindings all go through it, which is what makes loading deterministic.
//!
//! # Behavior
//!
//! - Keys are snapshotted before the first handler runs (index order for
//!   vectors, insertion order for maps).
//! - `Ok(Some(item))` from the handler overwrites the entry; `Ok(None)` leaves
//!   it untouched.
//! - The first `Err` stops iteration and is returned; later entries are never
//!   visited.
//! - An empty collection resolves immediately without calling the handler.
//!
//! # Example
//!
//! ```rust
//! use the_assembly::engine::queue;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let doubled = queue(vec![1, 2, 3], |item, _index| async move {
//!     Ok::<_, std::convert::Infallible>(Some(item * 2))
//! })
//! .await
//! .unwrap();
//!
//! assert_eq!(doubled, vec![2, 4, 6]);
//! # }
//! ```

use std::future::Future;

use indexmap::IndexMap;

/// A keyed collection that [`queue`] can walk.
pub trait Sequence {
    type Key: Clone;
    type Item: Clone;

    /// Keys in visiting order.
    fn keys(&self) -> Vec<Self::Key>;

    fn item(&self, key: &Self::Key) -> Option<&Self::Item>;

    fn replace(&mut self, key: &Self::Key, item: Self::Item);
}

impl<T: Clone> Sequence for Vec<T> {
    type Key = usize;
    type Item = T;

    fn keys(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    fn item(&self, key: &usize) -> Option<&T> {
        self.get(*key)
    }

    fn replace(&mut self, key: &usize, item: T) {
        if let Some(slot) = self.get_mut(*key) {
            *slot = item;
        }
    }
}

impl<T: Clone> Sequence for IndexMap<String, T> {
    type Key = String;
    type Item = T;

    fn keys(&self) -> Vec<String> {
        IndexMap::keys(self).cloned().collect()
    }

    fn item(&self, key: &String) -> Option<&T> {
        self.get(key)
    }

    fn replace(&mut self, key: &String, item: T) {
        if let Some(slot) = self.get_mut(key) {
            *slot = item;
        }
    }
}

/// Run `handler` over every entry of `collection`, one at a time.
pub async fn queue<S, F, Fut, E>(mut collection: S, mut handler: F) -> Result<S, E>
where
    S: Sequence,
    F: FnMut(S::Item, S::Key) -> Fut,
    Fut: Future<Output = Result<Option<S::Item>, E>>,
{
    for key in collection.keys() {
        let Some(item) = collection.item(&key).cloned() else {
            continue;
        };
        if let Some(replacement) = handler(item, key.clone()).await? {
            collection.replace(&key, replacement);
        }
    }
    Ok(collection)
}
