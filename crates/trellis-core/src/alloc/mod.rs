//! Allocation and collection types for Trellis.
//!
//! - Re-export of the AHash-backed hash map
//! - [`SparseSet`](sparse_set::SparseSet) generational slot arena

pub mod sparse_set;

pub use ahash::AHashMap as HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("key", "value");
        assert_eq!(map.get("key"), Some(&"value"));
    }
}
