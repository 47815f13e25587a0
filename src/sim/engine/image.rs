//! Mirror-image sources.
//!
//! Images are stored in an arena. Each node refers to its parent by index and
//! parents are always pushed before their children, so every chain of parents
//! is finite and ends at the true source (index 0).

use crate::Point;
use crate::geom::EPS;
use crate::geom::segment::{Segment, mirror_image};

/// One (possibly mirrored) source position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Image {
    pub position: Point,
    /// `None` for the true source.
    pub parent: Option<usize>,
    /// Obstacle the parent was mirrored across.
    pub obstacle: Option<usize>,
    /// Number of reflections this image stands for.
    pub order: usize,
}

#[derive(Debug, Clone)]
pub struct ImageTree {
    nodes: Vec<Image>,
}

impl ImageTree {
    /// Mirrors `source` recursively across `obstacles` up to `max_order` reflections.
    ///
    /// An image is never mirrored back across the obstacle that produced it,
    /// since that only reproduces its parent.
    pub fn build(source: Point, obstacles: &[Segment], max_order: usize) -> Self {
        let mut tree = Self {
            nodes: vec![Image {
                position: source,
                parent: None,
                obstacle: None,
                order: 0,
            }],
        };
        tree.expand(0, obstacles, max_order);
        tree
    }

    fn expand(&mut self, index: usize, obstacles: &[Segment], max_order: usize) {
        let node = self.nodes[index];
        if node.order >= max_order {
            return;
        }
        for (oi, obstacle) in obstacles.iter().enumerate() {
            if node.obstacle == Some(oi) || obstacle.length() < EPS {
                continue;
            }
            self.nodes.push(Image {
                position: mirror_image(node.position, obstacle),
                parent: Some(index),
                obstacle: Some(oi),
                order: node.order + 1,
            });
            let child = self.nodes.len() - 1;
            self.expand(child, obstacles, max_order);
        }
    }

    pub fn root(&self) -> &Image {
        &self.nodes[0]
    }

    pub fn get(&self, index: usize) -> Option<&Image> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Image)> {
        self.nodes.iter().enumerate()
    }

    /// Walks from `index` up to the true source, both included.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = &Image> {
        let mut next = self.nodes.get(index);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent.and_then(|p| self.nodes.get(p));
            Some(current)
        })
    }
}
