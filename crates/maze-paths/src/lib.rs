//! Graph searches over maze grids.
//!
//! - **Dijkstra** shortest path, run to completion ([`PathRange::dijkstra_path`])
//! - **BFS** unweighted distance maps ([`PathRange::bfs_map`])
//! - **Connected components** labelling ([`PathRange::cc_map_all`])
//! - **Incremental Dijkstra / A\*** that advances one expansion per call
//!   ([`Frontier`]), for callers that want to show the search as it runs
//!
//! The one-shot searches run through [`PathRange`], which owns and reuses its
//! caches so repeated queries do not allocate after warm-up. A [`Frontier`]
//! owns its own node array, so an animated search never shares state with a
//! one-shot query.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, connected components |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | [`Frontier`] |

mod bfs;
mod cc;
mod dijkstra;
mod distance;
mod frontier;
mod pathrange;
mod traits;

#[cfg(test)]
mod testing;

pub use distance::manhattan;
pub use frontier::{Expansion, Frontier, SearchKind};
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
