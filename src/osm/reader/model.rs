// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Node;
use std::collections::HashMap;

/// Represents an [OSM way](https://wiki.openstreetmap.org/wiki/Way) with all of its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub tags: HashMap<String, String>,
}

impl Way {
    /// Ways are traversable if they are tagged with
    /// [highway=*](https://wiki.openstreetmap.org/wiki/Key:highway).
    pub fn is_traversable(&self) -> bool {
        self.tags.contains_key("highway")
    }
}

impl From<Way> for crate::Way {
    fn from(w: Way) -> Self {
        let traversable = w.is_traversable();
        Self {
            id: w.id,
            nodes: w.nodes,
            traversable,
        }
    }
}

/// Union over the [OSM features/elements](https://wiki.openstreetmap.org/wiki/Elements)
/// relevant for routing. Relations are not represented.
#[derive(Debug, Clone)]
pub enum Feature {
    Node(Node),
    Way(Way),
}
