//! Walking a symbol path through the live runtime value graph

use super::path::is_separator;
use crate::scripting::ForeignObject;
use rhai::{Dynamic, Map};

/// Source of the namespace root that completions resolve against
///
/// The root is fetched again for every query, so anything defined between two
/// keystrokes shows up on the next one.
pub trait Namespace {
    fn root(&self) -> Map;
}

impl Namespace for Map {
    fn root(&self) -> Map {
        self.clone()
    }
}

/// A runtime value, classified by how it can be indexed
#[derive(Debug, Clone)]
pub enum ResolvedValue {
    /// A Rhai object map
    Mapping(Map),
    /// A host object exposed through a [`HostObject`](crate::scripting::HostObject) descriptor
    Foreign(ForeignObject),
    /// Any other value; not indexable
    Scalar(Dynamic),
    /// A missing key, a unit value, or the result of indexing something unindexable
    Absent,
}

impl ResolvedValue {
    pub fn from_dynamic(value: Dynamic) -> Self {
        let value = value.flatten();

        if value.is_unit() {
            return ResolvedValue::Absent;
        }
        if value.is::<Map>() {
            if let Some(map) = value.clone().try_cast::<Map>() {
                return ResolvedValue::Mapping(map);
            }
        }
        if value.is::<ForeignObject>() {
            if let Some(obj) = value.clone().try_cast::<ForeignObject>() {
                return ResolvedValue::Foreign(obj);
            }
        }
        ResolvedValue::Scalar(value)
    }

    /// Read one member
    ///
    /// Reading a foreign member goes through its descriptor, which may run a getter
    /// with side effects.
    pub fn member(&self, name: &str) -> ResolvedValue {
        match self {
            ResolvedValue::Mapping(map) => map
                .get(name)
                .cloned()
                .map_or(ResolvedValue::Absent, ResolvedValue::from_dynamic),
            ResolvedValue::Foreign(obj) => obj
                .get(name)
                .map_or(ResolvedValue::Absent, ResolvedValue::from_dynamic),
            ResolvedValue::Scalar(_) | ResolvedValue::Absent => ResolvedValue::Absent,
        }
    }

    /// Member names that can be offered as completions, in enumeration order
    pub fn candidate_names(&self) -> Vec<String> {
        match self {
            ResolvedValue::Mapping(map) => map.keys().map(|k| k.to_string()).collect(),
            ResolvedValue::Foreign(obj) => obj.member_names(),
            ResolvedValue::Scalar(_) | ResolvedValue::Absent => Vec::new(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ResolvedValue::Absent)
    }
}

/// Resolve `path` starting at `root`
///
/// `.`, `:` and `::` all separate segments. An absent or empty path is the root;
/// an empty segment anywhere else (`"a..x"`) names nothing and resolves to
/// [`ResolvedValue::Absent`].
pub fn resolve_value(root: Map, path: Option<&str>) -> ResolvedValue {
    let mut current = ResolvedValue::Mapping(root);

    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return current;
    };

    for segment in path.split("::").flat_map(|part| part.split(is_separator)) {
        current = if segment.is_empty() {
            ResolvedValue::Absent
        } else {
            current.member(segment)
        };
        if current.is_absent() {
            tracing::debug!("Path {:?} did not resolve at segment {:?}", path, segment);
            break;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripting::MockHostObject;
    use std::sync::Arc;

    fn root() -> Map {
        let mut utils = Map::new();
        utils.insert("find".into(), Dynamic::from(1_i64));
        utils.insert("nothing".into(), Dynamic::UNIT);

        let mut scene = Map::new();
        scene.insert("Utils".into(), Dynamic::from_map(utils));

        let mut root = Map::new();
        root.insert("Scene".into(), Dynamic::from_map(scene));
        root.insert("count".into(), Dynamic::from(3_i64));
        root
    }

    #[test]
    fn test_no_path_is_root() {
        let resolved = resolve_value(root(), None);
        let mut names = resolved.candidate_names();
        names.sort();
        assert_eq!(names, vec!["Scene", "count"]);

        assert!(matches!(resolve_value(root(), Some("")), ResolvedValue::Mapping(_)));
    }

    #[test]
    fn test_nested_mapping() {
        let resolved = resolve_value(root(), Some("Scene.Utils"));
        assert_eq!(resolved.candidate_names(), vec!["find", "nothing"]);

        // Both separators are treated alike
        let resolved = resolve_value(root(), Some("Scene:Utils"));
        assert!(matches!(resolved, ResolvedValue::Mapping(_)));
        let resolved = resolve_value(root(), Some("Scene::Utils"));
        assert!(matches!(resolved, ResolvedValue::Mapping(_)));
    }

    #[test]
    fn test_empty_segment_is_absent() {
        assert!(matches!(
            resolve_value(root(), Some("")),
            ResolvedValue::Mapping(_)
        ));
        assert!(resolve_value(root(), Some("Scene..Utils")).is_absent());
        assert!(resolve_value(root(), Some("Scene.")).is_absent());
        assert!(resolve_value(root(), Some(".Scene")).is_absent());
        assert!(resolve_value(root(), Some("Scene:::Utils")).is_absent());
    }

    #[test]
    fn test_missing_key_is_absent() {
        let mut root = root();
        root.remove("Scene");
        assert!(resolve_value(root.clone(), Some("Scene.Utils")).is_absent());
        assert!(resolve_value(root, Some("Scene")).is_absent());
    }

    #[test]
    fn test_scalar_is_not_indexable() {
        assert!(matches!(
            resolve_value(root(), Some("count")),
            ResolvedValue::Scalar(_)
        ));
        assert!(resolve_value(root(), Some("count.x")).is_absent());
        assert!(resolve_value(root(), Some("Scene.Utils.find.x")).is_absent());
    }

    #[test]
    fn test_unit_is_absent() {
        assert!(resolve_value(root(), Some("Scene.Utils.nothing")).is_absent());
    }

    #[test]
    fn test_foreign_object_reads_through_descriptor() {
        let mut host = MockHostObject::new();
        host.expect_get()
            .withf(|name| name == "position")
            .times(1)
            .returning(|_| {
                let mut pos = Map::new();
                pos.insert("x".into(), Dynamic::from(1.0_f64));
                Some(Dynamic::from_map(pos))
            });
        host.expect_member_names().never();

        let mut root = Map::new();
        root.insert(
            "player".into(),
            Dynamic::from(ForeignObject::new(Arc::new(host))),
        );

        let resolved = resolve_value(root, Some("player.position"));
        assert_eq!(resolved.candidate_names(), vec!["x"]);
    }

    #[test]
    fn test_foreign_missing_member_is_absent() {
        let mut host = MockHostObject::new();
        host.expect_get().returning(|_| None);

        let mut root = Map::new();
        root.insert(
            "player".into(),
            Dynamic::from(ForeignObject::new(Arc::new(host))),
        );

        assert!(resolve_value(root, Some("player.ghost.name")).is_absent());
    }

    #[test]
    fn test_foreign_candidate_names() {
        let mut host = MockHostObject::new();
        host.expect_member_names()
            .returning(|| vec!["name".to_string(), "health".to_string()]);

        let resolved = ResolvedValue::Foreign(ForeignObject::new(Arc::new(host)));
        assert_eq!(resolved.candidate_names(), vec!["name", "health"]);
    }

    #[test]
    fn test_shared_value_is_flattened() {
        let shared = Dynamic::from_map(Map::new()).into_shared();
        assert!(matches!(
            ResolvedValue::from_dynamic(shared),
            ResolvedValue::Mapping(_)
        ));
    }
}
