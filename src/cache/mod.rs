use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::geo::Cell;
use crate::route::Route;

/// Bounded cache of planned routes keyed by their resolved endpoint cells.
///
/// The graph a simulation owns never changes after construction, so cached
/// routes stay valid for its whole lifetime; the cache only bounds repeated
/// query work within a run.
#[derive(Debug)]
pub struct RouteCache {
    cache: Mutex<LruCache<(Cell, Cell), Arc<Route>>>,
}

impl RouteCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(NonZeroUsize::new(capacity).unwrap())),
        }
    }

    pub fn get(&self, key: &(Cell, Cell)) -> Option<Arc<Route>> {
        let mut cache = self.cache.lock().unwrap();
        cache.get(key).cloned()
    }

    pub fn insert(&self, key: (Cell, Cell), route: Arc<Route>) {
        let mut cache = self.cache.lock().unwrap();
        cache.put(key, route);
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.clear();
    }
}
