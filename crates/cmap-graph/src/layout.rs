//! Fruchterman-Reingold spring layout
//!
//! Nodes start uniformly at random in the unit square. Each iteration moves
//! every node along its net displacement (repulsion `k^2 / d` from all
//! nodes, attraction `d^2 / k` along edges), capped by a temperature that
//! cools linearly from 10% of the initial extent. Final positions are
//! centered and rescaled so the largest coordinate magnitude equals `scale`.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use cmap_core::{LayoutConfig, Position};

use crate::{ConceptGraph, Layout};

const MIN_DISTANCE: f64 = 0.01;
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct SpringLayout {
    pub scale: f64,
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl SpringLayout {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            scale: config.scale,
            iterations: config.iterations,
            seed: config.seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Relaxed and rescaled `(n, 2)` positions for an `(n, n)` adjacency
    pub fn compute(&self, adjacency: &Array2<f64>) -> Array2<f64> {
        let n = adjacency.nrows();
        match n {
            0 => return Array2::zeros((0, 2)),
            1 => return Array2::zeros((1, 2)),
            _ => {}
        }

        let mut rng = self.rng();
        let mut pos = Array2::from_shape_fn((n, 2), |_| rng.gen::<f64>());
        let k = (1.0 / n as f64).sqrt();

        let extent = |col: usize| {
            let column = pos.column(col);
            let max = column.fold(f64::MIN, |a, &b| a.max(b));
            let min = column.fold(f64::MAX, |a, &b| a.min(b));
            max - min
        };
        let mut temperature = extent(0).max(extent(1)) * 0.1;
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for iteration in 0..self.iterations {
            let mut displacement = Array2::<f64>::zeros((n, 2));
            for i in 0..n {
                for j in 0..n {
                    let dx = pos[[i, 0]] - pos[[j, 0]];
                    let dy = pos[[i, 1]] - pos[[j, 1]];
                    let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                    let force = k * k / (distance * distance) - adjacency[[i, j]] * distance / k;
                    displacement[[i, 0]] += dx * force;
                    displacement[[i, 1]] += dy * force;
                }
            }

            let lengths: Array1<f64> = displacement
                .map_axis(Axis(1), |row| row.dot(&row).sqrt())
                .mapv(|l| if l < MIN_DISTANCE { 0.1 } else { l });
            let step = &displacement * &(temperature / &lengths).insert_axis(Axis(1));
            pos += &step;
            temperature -= cooling;

            let movement = step.iter().map(|v| v * v).sum::<f64>().sqrt() / n as f64;
            if movement < CONVERGENCE_THRESHOLD {
                debug!(iteration, "Spring layout converged");
                break;
            }
        }

        rescale(pos, self.scale)
    }
}

/// Center on the origin and scale so the largest coordinate magnitude is
/// `scale`
fn rescale(mut pos: Array2<f64>, scale: f64) -> Array2<f64> {
    if let Some(mean) = pos.mean_axis(Axis(0)) {
        pos -= &mean;
    }
    let limit = pos.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if limit > 0.0 {
        pos *= scale / limit;
    }
    pos
}

impl Layout for SpringLayout {
    fn positions(&self, graph: &ConceptGraph) -> Vec<Position> {
        self.compute(&graph.adjacency())
            .rows()
            .into_iter()
            .map(|row| Position {
                x: row[0],
                y: row[1],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_core::ConceptTriple;
    use ndarray::array;
    use proptest::prelude::*;

    fn seeded(seed: u64) -> SpringLayout {
        SpringLayout::default().with_seed(seed)
    }

    fn chain(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, n), |(i, j)| {
            if i + 1 == j || j + 1 == i {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(seeded(1).compute(&Array2::zeros((0, 0))).nrows(), 0);
        assert_eq!(seeded(1).compute(&array![[0.0]]), array![[0.0, 0.0]]);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let adjacency = chain(5);
        assert_eq!(seeded(42).compute(&adjacency), seeded(42).compute(&adjacency));
    }

    #[test]
    fn test_rescaled_to_scale() {
        let pos = seeded(3).compute(&chain(4));
        let limit = pos.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        assert!((limit - 1000.0).abs() < 1e-6);

        let mean = pos.mean_axis(Axis(0)).unwrap();
        assert!(mean[0].abs() < 1e-6 && mean[1].abs() < 1e-6);
    }

    #[test]
    fn test_connected_nodes_closer_than_unconnected() {
        // a-b joined, c isolated
        let adjacency = array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let pos = seeded(11).compute(&adjacency);
        let dist = |i: usize, j: usize| {
            let d = &pos.row(i) - &pos.row(j);
            d.dot(&d).sqrt()
        };
        assert!(dist(0, 1) < dist(0, 2));
        assert!(dist(0, 1) < dist(1, 2));
    }

    #[test]
    fn test_positions_follow_node_order() {
        let graph = ConceptGraph::from_triples(&[ConceptTriple::new("a", "r", "b")]);
        let positions = seeded(5).positions(&graph);
        assert_eq!(positions.len(), 2);
        // two nodes end up mirrored through the origin
        assert!((positions[0].x + positions[1].x).abs() < 1e-6);
        assert!((positions[0].y + positions[1].y).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn test_positions_bounded(n in 2usize..8, seed in any::<u64>()) {
            let pos = seeded(seed).compute(&chain(n));
            prop_assert_eq!(pos.nrows(), n);
            for v in pos.iter() {
                prop_assert!(v.is_finite());
                prop_assert!(v.abs() <= 1000.0 + 1e-6);
            }
        }
    }
}
