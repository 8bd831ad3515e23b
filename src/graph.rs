// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{find_route, BoundingBox, Node, Way};
use std::collections::btree_map::{BTreeMap, Entry};

/// Error conditions which may occur during [Graph::build].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A traversable way refers to a node absent from the node records.
    #[error("way {way} references unknown node {node}")]
    MalformedWayReference { way: i64, node: i64 },
}

/// Policy of turning the node list of a [Way] into edges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPairing {
    /// Connects every two consecutive nodes: 1st-2nd, 2nd-3rd, 3rd-4th, ...
    #[default]
    Chained,

    /// Connects disjoint pairs of nodes: 1st-2nd, 3rd-4th, 5th-6th, ...
    /// A trailing node without a partner is skipped.
    Disjoint,
}

/// Represents a road network as a set of [Nodes](Node) and undirected,
/// unweighted edges between them.
///
/// Graphs are immutable once [built](Graph::build).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    nodes: BTreeMap<i64, (Node, Vec<i64>)>,
    bbox: Option<BoundingBox>,
}

impl Graph {
    /// Builds a graph using the [default](SegmentPairing::Chained) segment pairing.
    pub fn build<N, W>(nodes: N, ways: W) -> Result<Self, GraphError>
    where
        N: IntoIterator<Item = Node>,
        W: IntoIterator<Item = Way>,
    {
        Self::build_with(nodes, ways, SegmentPairing::default())
    }

    /// Builds a graph from node and way records.
    ///
    /// The first node record seeds the bounding box, and every other record expands it.
    /// Each traversable way adds symmetric edges as per the `pairing` policy.
    /// Parallel edges are not deduplicated.
    ///
    /// All nodes of a traversable way must be present in `nodes`, otherwise
    /// [GraphError::MalformedWayReference] is returned.
    pub fn build_with<N, W>(nodes: N, ways: W, pairing: SegmentPairing) -> Result<Self, GraphError>
    where
        N: IntoIterator<Item = Node>,
        W: IntoIterator<Item = Way>,
    {
        let mut g = Self::default();

        for node in nodes {
            g.insert_node(node);
        }

        let mut edges: usize = 0;
        for way in ways {
            if way.traversable {
                edges += g.insert_way(&way, pairing)?;
            }
        }

        log::debug!("built graph with {} nodes and {} edges", g.len(), edges);
        Ok(g)
    }

    fn insert_node(&mut self, node: Node) {
        match &mut self.bbox {
            Some(bbox) => bbox.expand(node.lat, node.lon),
            None => self.bbox = Some(BoundingBox::around(node.lat, node.lon)),
        }

        match self.nodes.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert((node, Vec::default()));
            }
            Entry::Occupied(_) => {
                log::debug!("node {} is defined more than once, ignoring", node.id);
            }
        }
    }

    /// Adds edges of a single way, returning the number of added edges.
    fn insert_way(&mut self, way: &Way, pairing: SegmentPairing) -> Result<usize, GraphError> {
        if let Some(&node) = way.nodes.iter().find(|&&id| !self.nodes.contains_key(&id)) {
            return Err(GraphError::MalformedWayReference { way: way.id, node });
        }

        if way.nodes.len() < 2 {
            log::debug!("way {} is too short to form an edge", way.id);
            return Ok(0);
        }

        let pairs: Vec<(i64, i64)> = match pairing {
            SegmentPairing::Chained => way.nodes.windows(2).map(|p| (p[0], p[1])).collect(),
            SegmentPairing::Disjoint => way.nodes.chunks_exact(2).map(|p| (p[0], p[1])).collect(),
        };

        for &(a, b) in &pairs {
            self.insert_edge(a, b);
        }
        Ok(pairs.len())
    }

    fn insert_edge(&mut self, a: i64, b: i64) {
        if let Some((_, neighbors)) = self.nodes.get_mut(&a) {
            neighbors.push(b);
        }
        if a == b {
            return;
        }
        if let Some((_, neighbors)) = self.nodes.get_mut(&b) {
            neighbors.push(a);
        }
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().map(|(node, _)| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: i64) -> Option<Node> {
        self.nodes.get(&id).map(|&(node, _)| node)
    }

    /// Returns the [BoundingBox] of all nodes, or `None` if the graph is empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bbox
    }

    /// Gets the ids of all neighbors of a node, in edge insertion order.
    pub fn neighbor_ids(&self, id: i64) -> &[i64] {
        self.nodes
            .get(&id)
            .map(|(_, n)| n.as_slice())
            .unwrap_or_default()
    }

    /// Gets all neighbors of a node, in edge insertion order.
    ///
    /// Returns an empty iterator for unknown nodes and nodes without edges.
    pub fn neighbors(&self, id: i64) -> impl Iterator<Item = &Node> + '_ {
        self.neighbor_ids(id)
            .iter()
            .filter_map(|neighbor_id| self.nodes.get(neighbor_id).map(|(node, _)| node))
    }

    /// Returns every edge once per insertion, as a pair of nodes with `a.id <= b.id`.
    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node)> + '_ {
        self.nodes.values().flat_map(move |(node, _)| {
            self.neighbors(node.id)
                .filter(move |neighbor| node.id <= neighbor.id)
                .map(move |neighbor| (node, neighbor))
        })
    }

    /// Finds the route with the fewest hops between two nodes.
    /// See [find_route].
    pub fn compute_route(&self, from_id: i64, to_id: i64) -> Vec<Node> {
        find_route(self, from_id, to_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, lat: f64, lon: f64) -> Node {
        Node { id, lat, lon }
    }

    fn road(id: i64, nodes: &[i64]) -> Way {
        Way {
            id,
            nodes: nodes.to_vec(),
            traversable: true,
        }
    }

    fn five_nodes() -> Vec<Node> {
        vec![
            node(1, 0.0, 0.0),
            node(2, 0.0, 1.0),
            node(3, 0.0, 2.0),
            node(4, 0.0, 3.0),
            node(5, 0.0, 4.0),
        ]
    }

    #[test]
    fn edges_are_symmetric() {
        let g = Graph::build(five_nodes(), [road(10, &[1, 2])]).unwrap();
        assert_eq!(g.neighbor_ids(1), &[2]);
        assert_eq!(g.neighbor_ids(2), &[1]);
        assert_eq!(g.neighbors(1).next().unwrap().id, 2);
        assert_eq!(g.neighbors(2).next().unwrap().id, 1);
    }

    #[test]
    fn chained_pairing() {
        let g = Graph::build(five_nodes(), [road(10, &[1, 2, 3, 4, 5])]).unwrap();
        assert_eq!(g.neighbor_ids(1), &[2]);
        assert_eq!(g.neighbor_ids(2), &[1, 3]);
        assert_eq!(g.neighbor_ids(3), &[2, 4]);
        assert_eq!(g.neighbor_ids(4), &[3, 5]);
        assert_eq!(g.neighbor_ids(5), &[4]);
        assert_eq!(g.edges().count(), 4);
    }

    #[test]
    fn disjoint_pairing_skips_odd_node() {
        let g = Graph::build_with(
            five_nodes(),
            [road(10, &[1, 2, 3, 4, 5])],
            SegmentPairing::Disjoint,
        )
        .unwrap();
        assert_eq!(g.neighbor_ids(1), &[2]);
        assert_eq!(g.neighbor_ids(2), &[1]);
        assert_eq!(g.neighbor_ids(3), &[4]);
        assert_eq!(g.neighbor_ids(4), &[3]);
        assert!(g.neighbor_ids(5).is_empty());
    }

    #[test]
    fn parallel_edges_are_kept() {
        let g = Graph::build(five_nodes(), [road(10, &[1, 2]), road(11, &[2, 1])]).unwrap();
        assert_eq!(g.neighbor_ids(1), &[2, 2]);
        assert_eq!(g.neighbor_ids(2), &[1, 1]);
        assert_eq!(g.edges().count(), 2);
    }

    #[test]
    fn repeated_way_node_is_a_single_self_loop() {
        let g = Graph::build(five_nodes(), [road(10, &[1, 1, 2])]).unwrap();
        assert_eq!(g.neighbor_ids(1), &[1, 2]);
        assert_eq!(g.neighbor_ids(2), &[1]);
        assert_eq!(g.edges().count(), 2);
        assert_eq!(g.compute_route(1, 2).len(), 2);
    }

    #[test]
    fn duplicate_node_keeps_first_record() {
        let mut nodes = five_nodes();
        nodes.push(node(1, 5.0, -3.0));
        let g = Graph::build(nodes, [road(10, &[1, 2])]).unwrap();

        assert_eq!(g.len(), 5);
        assert_eq!(g.get_node(1), Some(node(1, 0.0, 0.0)));
        assert_eq!(g.neighbor_ids(1), &[2]);

        // The discarded position still stretches the bounding box
        let bbox = g.bounding_box().unwrap();
        assert_eq!(bbox.max_lat, 5.0);
        assert_eq!(bbox.min_lon, -3.0);
    }

    #[test]
    fn non_traversable_ways_are_ignored() {
        let footpath = Way {
            id: 10,
            nodes: vec![1, 2, 99],
            traversable: false,
        };
        let g = Graph::build(five_nodes(), [footpath]).unwrap();
        assert!(g.neighbor_ids(1).is_empty());
        assert_eq!(g.neighbors(2).count(), 0);
    }

    #[test]
    fn unknown_way_node_is_an_error() {
        let err = Graph::build(five_nodes(), [road(10, &[1, 2]), road(11, &[3, 42, 4])]).unwrap_err();
        assert_eq!(err, GraphError::MalformedWayReference { way: 11, node: 42 });
    }

    #[test]
    fn unknown_node_has_no_neighbors() {
        let g = Graph::build(five_nodes(), [road(10, &[1, 2])]).unwrap();
        assert_eq!(g.neighbors(42).count(), 0);
        assert!(g.get_node(42).is_none());
    }

    #[test]
    fn bounding_box() {
        let g = Graph::build(
            [
                node(1, 10.0, 20.0),
                node(2, 12.0, 19.0),
                node(3, 9.0, 21.5),
                node(4, 11.0, 20.0),
            ],
            Vec::new(),
        )
        .unwrap();

        assert_eq!(
            g.bounding_box(),
            Some(BoundingBox {
                min_lat: 9.0,
                max_lat: 12.0,
                min_lon: 19.0,
                max_lon: 21.5,
            })
        );
    }

    #[test]
    fn empty_graph_has_no_bounding_box() {
        let g = Graph::build(Vec::new(), Vec::new()).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.bounding_box(), None);
    }
}
