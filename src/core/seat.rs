//! Diver identification and per-diver storage.
//!
//! ## DiverId
//!
//! Seat index of a diver, 0-based, in turn order.
//!
//! ## DiverMap
//!
//! Per-diver data backed by `Vec` for O(1) access, indexable by `DiverId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Fewest divers a game accepts.
pub const MIN_DIVERS: usize = 2;

/// Most divers a game accepts.
pub const MAX_DIVERS: usize = 6;

/// Seat of a diver in turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiverId(pub u8);

impl DiverId {
    /// Create a new diver ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `diver_count` divers.
    ///
    /// ```
    /// use deep_sea::core::DiverId;
    ///
    /// let seats: Vec<_> = DiverId::all(3).collect();
    /// assert_eq!(seats, vec![DiverId::new(0), DiverId::new(1), DiverId::new(2)]);
    /// ```
    pub fn all(diver_count: usize) -> impl Iterator<Item = DiverId> {
        (0..diver_count as u8).map(DiverId)
    }
}

impl std::fmt::Display for DiverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Diver {}", self.0)
    }
}

/// Per-diver data storage with O(1) access.
///
/// ```
/// use deep_sea::core::{DiverId, DiverMap};
///
/// let mut air_used: DiverMap<i32> = DiverMap::with_value(4, 0);
/// air_used[DiverId::new(1)] += 3;
/// assert_eq!(air_used[DiverId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiverMap<T> {
    data: Vec<T>,
}

impl<T> DiverMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(diver_count: usize, factory: impl Fn(DiverId) -> T) -> Self {
        Self {
            data: DiverId::all(diver_count).map(factory).collect(),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(diver_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(diver_count, |_| value.clone())
    }

    /// Number of divers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the map holds no divers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked access.
    #[must_use]
    pub fn get(&self, diver: DiverId) -> Option<&T> {
        self.data.get(diver.index())
    }

    /// Checked mutable access.
    pub fn get_mut(&mut self, diver: DiverId) -> Option<&mut T> {
        self.data.get_mut(diver.index())
    }

    /// Iterate over (DiverId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (DiverId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (DiverId(i as u8), v))
    }

    /// Iterate over (DiverId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (DiverId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (DiverId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over mutable values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// Iterate over all seats.
    pub fn ids(&self) -> impl Iterator<Item = DiverId> {
        DiverId::all(self.data.len())
    }
}

impl<T> From<Vec<T>> for DiverMap<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> Index<DiverId> for DiverMap<T> {
    type Output = T;

    fn index(&self, diver: DiverId) -> &Self::Output {
        &self.data[diver.index()]
    }
}

impl<T> IndexMut<DiverId> for DiverMap<T> {
    fn index_mut(&mut self, diver: DiverId) -> &mut Self::Output {
        &mut self.data[diver.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diver_id_basics() {
        let d0 = DiverId::new(0);
        let d3 = DiverId::new(3);

        assert_eq!(d0.index(), 0);
        assert_eq!(d3.index(), 3);
        assert!(d0 < d3);
        assert_eq!(format!("{}", d3), "Diver 3");
    }

    #[test]
    fn test_diver_map_new() {
        let map: DiverMap<usize> = DiverMap::new(4, |d| d.index() * 10);

        assert_eq!(map.len(), 4);
        assert_eq!(map[DiverId::new(2)], 20);
        assert_eq!(map.get(DiverId::new(4)), None);
    }

    #[test]
    fn test_diver_map_iter() {
        let map: DiverMap<&str> = DiverMap::from(vec!["ann", "bo"]);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(DiverId::new(0), &"ann"), (DiverId::new(1), &"bo")]);
        assert_eq!(map.ids().count(), 2);
    }

    #[test]
    fn test_diver_map_mutation() {
        let mut map: DiverMap<i32> = DiverMap::with_value(2, 0);

        map[DiverId::new(0)] = 10;
        if let Some(v) = map.get_mut(DiverId::new(1)) {
            *v = 20;
        }

        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn test_diver_map_serialization() {
        let map: DiverMap<i32> = DiverMap::new(3, |d| d.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: DiverMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
