//! Test data builders for namespace maps

use rhai::{Dynamic, Map};

/// Builder for nested Rhai object maps
#[derive(Default)]
pub struct MapBuilder {
    map: Map,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key holding `true`
    pub fn key(self, name: &str) -> Self {
        self.value(name, Dynamic::TRUE)
    }

    pub fn keys(self, names: &[&str]) -> Self {
        names.iter().fold(self, |b, name| b.key(name))
    }

    pub fn value(mut self, name: &str, value: Dynamic) -> Self {
        self.map.insert(name.into(), value);
        self
    }

    pub fn child(self, name: &str, child: MapBuilder) -> Self {
        self.value(name, Dynamic::from_map(child.build()))
    }

    pub fn build(self) -> Map {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_builder() {
        let map = MapBuilder::new()
            .keys(&["a", "b"])
            .child("c", MapBuilder::new().key("d"))
            .build();

        assert_eq!(map.len(), 3);
        assert!(map["c"].is_map());
    }
}
