// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{Graph, Node};

fn reconstruct_path(g: &Graph, came_from: &HashMap<i64, i64>, mut last: i64) -> Vec<Node> {
    let mut path: Vec<Node> = g.get_node(last).into_iter().collect();

    while let Some(&nd) = came_from.get(&last) {
        path.extend(g.get_node(nd));
        last = nd;
    }

    path.reverse();
    return path;
}

/// Uses [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search)
/// to find the route with the fewest hops between two nodes in the provided graph.
///
/// Returns the [Nodes](Node) of the route, starting with `from_id` and ending with `to_id`.
/// If `from_id == to_id`, the route consists of that single node.
///
/// Returns an empty vector if there is no route between the two nodes,
/// or if either of them doesn't exist in the graph.
///
/// Neighbors are expanded in edge insertion order, which decides
/// between multiple routes with the same number of hops.
pub fn find_route(g: &Graph, from_id: i64, to_id: i64) -> Vec<Node> {
    if g.get_node(from_id).is_none() || g.get_node(to_id).is_none() {
        log::debug!("route {} -> {}: unknown endpoint", from_id, to_id);
        return vec![];
    }

    let mut queue: VecDeque<i64> = VecDeque::default();
    let mut visited: HashSet<i64> = HashSet::default();
    let mut came_from: HashMap<i64, i64> = HashMap::default();
    let mut steps: usize = 0;

    queue.push_back(from_id);
    visited.insert(from_id);

    while let Some(at) = queue.pop_front() {
        if at == to_id {
            let path = reconstruct_path(g, &came_from, to_id);
            log::debug!(
                "route {} -> {}: {} nodes after {} expansions",
                from_id,
                to_id,
                path.len(),
                steps,
            );
            return path;
        }

        steps += 1;

        for &neighbor_id in g.neighbor_ids(at) {
            if visited.insert(neighbor_id) {
                came_from.insert(neighbor_id, at);
                queue.push_back(neighbor_id);
            }
        }
    }

    log::debug!(
        "route {} -> {}: destination unreachable after {} expansions",
        from_id,
        to_id,
        steps,
    );
    return vec![];
}
