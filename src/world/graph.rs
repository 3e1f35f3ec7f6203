//! Sparse navigation graph over zone centers
//!
//! Adjacency links each zone to its nearest neighbors, which yields a
//! connected, locally-dense graph without explicit road modeling. Paths are
//! measured in hop count, not distance; agents only need a plausible chain
//! of waypoints, not an optimal route.

use crate::core::types::Vec2;
use crate::world::zone::Zone;
use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use std::collections::VecDeque;

/// How many nearest neighbors each zone links to
///
/// Symmetrization can push a zone's final degree above this.
const NEIGHBOR_LINKS: usize = 4;

/// Immutable zone-center navigation graph
#[derive(Debug, Clone)]
pub struct ZoneGraph {
    pos: AHashMap<String, Vec2>,
    adj: AHashMap<String, Vec<String>>,
}

impl ZoneGraph {
    /// Build the adjacency structure from a zone set
    pub fn build(zones: &[Zone]) -> Self {
        let mut pos = AHashMap::new();
        let mut adj: AHashMap<String, Vec<String>> = AHashMap::new();

        for zone in zones {
            pos.insert(zone.name.clone(), zone.center());
            adj.insert(zone.name.clone(), Vec::new());
        }

        // Iterate in declaration order so edge lists come out the same for
        // every build of the same zone set.
        let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
        for &a in &names {
            let here = pos[a];
            let mut dists: Vec<(OrderedFloat<f32>, &str)> = names
                .iter()
                .filter(|&&b| b != a)
                .map(|&b| (OrderedFloat(here.distance(&pos[b])), b))
                .collect();
            dists.sort();

            for &(_, nb) in dists.iter().take(NEIGHBOR_LINKS) {
                if let Some(list) = adj.get_mut(a) {
                    if !list.iter().any(|n| n == nb) {
                        list.push(nb.to_string());
                    }
                }
                if let Some(list) = adj.get_mut(nb) {
                    if !list.iter().any(|n| n == a) {
                        list.push(a.to_string());
                    }
                }
            }
        }

        Self { pos, adj }
    }

    /// Center coordinate of a zone, if it is part of the graph
    pub fn center_of(&self, name: &str) -> Option<Vec2> {
        self.pos.get(name).copied()
    }

    /// Neighbor names of a zone
    pub fn neighbors(&self, name: &str) -> &[String] {
        self.adj.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shortest path (in hops) from zone `start` to zone `end`, returned as
    /// an ordered sequence of zone centers
    ///
    /// `start == end` yields a single-point path. When no route exists the
    /// result degrades to the direct two-point path rather than failing;
    /// unknown zone names yield an empty path.
    pub fn find(&self, start: &str, end: &str) -> Vec<Vec2> {
        let (Some(&start_pos), Some(&end_pos)) = (self.pos.get(start), self.pos.get(end)) else {
            return Vec::new();
        };

        if start == end {
            return vec![start_pos];
        }

        let mut queue: VecDeque<&str> = VecDeque::from([start]);
        let mut seen: AHashSet<&str> = AHashSet::from_iter([start]);
        let mut parent: AHashMap<&str, &str> = AHashMap::new();

        while let Some(node) = queue.pop_front() {
            if node == end {
                let mut names = vec![node];
                let mut cursor = node;
                while let Some(&prev) = parent.get(cursor) {
                    names.push(prev);
                    cursor = prev;
                }
                names.reverse();
                return names.iter().filter_map(|n| self.center_of(n)).collect();
            }
            for nb in self.neighbors(node) {
                if seen.insert(nb.as_str()) {
                    parent.insert(nb.as_str(), node);
                    queue.push_back(nb.as_str());
                }
            }
        }

        vec![start_pos, end_pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Rect;
    use crate::world::zone::ZoneType;

    fn square(name: &str, x: f32, y: f32) -> Zone {
        Zone::new(name, ZoneType::Home, Rect::new(x, y, 10.0, 10.0), (0, 0, 0))
    }

    fn grid() -> Vec<Zone> {
        vec![
            square("a", 0.0, 0.0),
            square("b", 100.0, 0.0),
            square("c", 200.0, 0.0),
            square("d", 0.0, 100.0),
            square("e", 100.0, 100.0),
            square("f", 200.0, 100.0),
        ]
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = ZoneGraph::build(&grid());
        for zone in grid() {
            for nb in graph.neighbors(&zone.name) {
                assert!(
                    graph.neighbors(nb).contains(&zone.name),
                    "{} lists {} but not vice versa",
                    zone.name,
                    nb
                );
            }
        }
    }

    #[test]
    fn test_find_same_zone_is_single_point() {
        let graph = ZoneGraph::build(&grid());
        let path = graph.find("a", "a");
        assert_eq!(path, vec![graph.center_of("a").unwrap()]);
    }

    #[test]
    fn test_find_endpoints_are_zone_centers() {
        let graph = ZoneGraph::build(&grid());
        let path = graph.find("a", "f");
        assert!(!path.is_empty());
        assert_eq!(path[0], graph.center_of("a").unwrap());
        assert_eq!(*path.last().unwrap(), graph.center_of("f").unwrap());
    }

    #[test]
    fn test_find_unknown_zone_is_empty() {
        let graph = ZoneGraph::build(&grid());
        assert!(graph.find("a", "nowhere").is_empty());
        assert!(graph.find("nowhere", "a").is_empty());
    }

    #[test]
    fn test_two_zone_graph_connects() {
        let zones = vec![square("a", 0.0, 0.0), square("b", 500.0, 0.0)];
        let graph = ZoneGraph::build(&zones);
        let path = graph.find("a", "b");
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], graph.center_of("a").unwrap());
        assert_eq!(path[1], graph.center_of("b").unwrap());
    }

    #[test]
    fn test_disconnected_fallback_is_direct_path() {
        // Hand-build a graph with no edges to force the fallback branch.
        let zones = vec![square("a", 0.0, 0.0), square("b", 500.0, 0.0)];
        let mut graph = ZoneGraph::build(&zones);
        graph.adj.values_mut().for_each(Vec::clear);

        let path = graph.find("a", "b");
        assert_eq!(
            path,
            vec![
                graph.center_of("a").unwrap(),
                graph.center_of("b").unwrap()
            ]
        );
    }
}
