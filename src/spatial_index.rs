//! Spatial Index Module
//!
//! Provides R-tree based spatial indexing for hit testing on the canvas.
//! Each board keeps one index for pins and one for groups, keyed by id.

use crate::types::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;
use std::hash::Hash;

/// A spatial entry representing an object's bounding box.
#[derive(Debug, Clone)]
pub struct SpatialEntry<K> {
    pub key: K,
    pub bounds: Rect,
}

impl<K> SpatialEntry<K> {
    pub fn new(key: K, bounds: Rect) -> Self {
        Self { key, bounds }
    }
}

impl<K> RTreeObject for SpatialEntry<K> {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_x, self.bounds.min_y],
            [self.bounds.max_x, self.bounds.max_y],
        )
    }
}

impl<K: PartialEq> PartialEq for SpatialEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// R-tree over object bounds with O(log n) point and range queries.
#[derive(Debug, Clone)]
pub struct SpatialIndex<K> {
    tree: RTree<SpatialEntry<K>>,
    entries: HashMap<K, Rect>,
}

impl<K: Clone + Eq + Hash> SpatialIndex<K> {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Build an index from (key, bounds) pairs in one bulk load.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Rect)>,
    {
        let mut index = Self::new();
        index.rebuild(entries);
        index
    }

    /// Insert or replace the bounds stored for `key`.
    pub fn insert(&mut self, key: K, bounds: Rect) {
        self.remove(&key);
        self.tree.insert(SpatialEntry::new(key.clone(), bounds));
        self.entries.insert(key, bounds);
    }

    pub fn remove(&mut self, key: &K) -> bool {
        if let Some(bounds) = self.entries.remove(key) {
            self.tree.remove(&SpatialEntry::new(key.clone(), bounds));
            true
        } else {
            false
        }
    }

    /// Keys whose bounds contain the point.
    pub fn query_point(&self, p: Point) -> Vec<K> {
        let envelope = AABB::from_point([p.x, p.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.contains(p))
            .map(|entry| entry.key.clone())
            .collect()
    }

    /// Keys whose bounds intersect the rectangle.
    pub fn query_rect(&self, rect: &Rect) -> Vec<K> {
        let envelope = AABB::from_corners([rect.min_x, rect.min_y], [rect.max_x, rect.max_y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.key.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Rect)>,
    {
        let entries: Vec<SpatialEntry<K>> = entries
            .into_iter()
            .map(|(key, bounds)| SpatialEntry::new(key, bounds))
            .collect();

        self.entries = entries.iter().map(|e| (e.key.clone(), e.bounds)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl<K: Clone + Eq + Hash> Default for SpatialIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
