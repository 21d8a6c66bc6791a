//! Grouping records by plate number
//!
//! Groups remember the order in which plates were first seen, so that
//! count-ordered listings break ties the same way on every run.

use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct PlateGroups<T> {
    groups: IndexMap<String, Vec<T>>,
}

impl<T> Default for PlateGroups<T> {
    fn default() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }
}

impl<T> PlateGroups<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group items by the plate returned from `plate_of`
    pub fn from_items<I, F>(items: I, plate_of: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        let mut groups = Self::new();
        for item in items {
            let plate = plate_of(&item);
            groups.push(plate, item);
        }
        groups
    }

    pub fn push(&mut self, plate: impl Into<String>, item: T) {
        self.groups.entry(plate.into()).or_default().push(item);
    }

    /// Insert a whole group, replacing any previous one for the plate
    pub fn insert(&mut self, plate: impl Into<String>, items: Vec<T>) {
        self.groups.insert(plate.into(), items);
    }

    pub fn get(&self, plate: &str) -> Option<&Vec<T>> {
        self.groups.get(plate)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of items across all plates
    pub fn item_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Groups in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups.iter().map(|(p, items)| (p.as_str(), items.as_slice()))
    }

    /// Groups ordered by plate (code point order)
    pub fn sorted_by_plate(&self) -> Vec<(&str, &[T])> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }

    /// Groups ordered by size, largest first; ties keep first-seen order
    pub fn sorted_by_count_desc(&self) -> Vec<(&str, &[T])> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        sorted
    }

    /// Plates in code point order
    pub fn plates_sorted(&self) -> Vec<&str> {
        let mut plates: Vec<_> = self.groups.keys().map(String::as_str).collect();
        plates.sort();
        plates
    }

    /// Comma-joined plates in code point order
    pub fn plates_joined(&self) -> String {
        self.plates_sorted().join(",")
    }

    /// Keep groups that satisfy `keep`, preserving order
    pub fn filter<F>(&self, keep: F) -> PlateGroups<T>
    where
        T: Clone,
        F: Fn(&str, &[T]) -> bool,
    {
        let groups = self
            .groups
            .iter()
            .filter(|(plate, items)| keep(plate, items))
            .map(|(plate, items)| (plate.clone(), items.clone()))
            .collect();
        PlateGroups { groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlateGroups<u32> {
        PlateGroups::from_items(
            vec![
                ("黑M2D002", 1),
                ("黑E2080U", 2),
                ("黑E3CA62", 3),
                ("黑E2080U", 4),
                ("黑E3CA62", 5),
                ("黑A00001", 6),
            ],
            |(plate, _)| plate.to_string(),
        )
        .map_items(|(_, n)| n)
    }

    impl<T> PlateGroups<T> {
        fn map_items<U>(self, f: impl Fn(T) -> U) -> PlateGroups<U> {
            PlateGroups {
                groups: self
                    .groups
                    .into_iter()
                    .map(|(p, items)| (p, items.into_iter().map(&f).collect()))
                    .collect(),
            }
        }
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let groups = sample();
        let plates: Vec<_> = groups.iter().map(|(p, _)| p).collect();
        assert_eq!(plates, vec!["黑M2D002", "黑E2080U", "黑E3CA62", "黑A00001"]);
        assert_eq!(groups.get("黑E2080U"), Some(&vec![2, 4]));
        assert_eq!(groups.item_count(), 6);
    }

    #[test]
    fn test_count_order_is_stable() {
        let groups = sample();
        let plates: Vec<_> = groups
            .sorted_by_count_desc()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(plates, vec!["黑E2080U", "黑E3CA62", "黑M2D002", "黑A00001"]);
    }

    #[test]
    fn test_plate_order_and_join() {
        let groups = sample();
        assert_eq!(
            groups.plates_joined(),
            "黑A00001,黑E2080U,黑E3CA62,黑M2D002"
        );
    }

    #[test]
    fn test_filter_keeps_matching_groups() {
        let duplicates = sample().filter(|_, items| items.len() > 1);
        assert_eq!(duplicates.len(), 2);
        assert!(duplicates.get("黑M2D002").is_none());
    }
}
