//! Mapping between emitted output lines and the steps that produced them.

use std::collections::HashMap;
use std::iter::FromIterator;

/// Mapping from output line indices into values describing their origin. This type is generic
/// over the value type. The translator produces a `SourceMap<usize>` whose values are indices
/// into [Translation::steps](crate::translator::Translation::steps).
#[derive(Debug, Clone, Default)]
pub struct SourceMap<V> {
    inner: HashMap<usize, V>,
}

impl<V> FromIterator<(usize, V)> for SourceMap<V> {
    fn from_iter<I>(iter: I) -> Self
        where I: IntoIterator<Item = (usize, V)>
    {
        SourceMap {
            inner: HashMap::from_iter(iter),
        }
    }
}

impl<V> SourceMap<V> {
    /// Returns the origin of the output line with index `line`.
    pub fn get(&self, line: usize) -> Option<&V> {
        self.inner.get(&line)
    }

    /// Number of mapped output lines.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[test]
fn test_source_map() {
    let map: SourceMap<usize> = vec![(0, 0), (1, 0), (2, 1)].into_iter().collect();

    assert_eq!(map.get(1), Some(&0));
    assert_eq!(map.get(3), None);
    assert_eq!(map.get(2), Some(&1));
    assert_eq!(map.len(), 3);
    assert!(!map.is_empty());
}
