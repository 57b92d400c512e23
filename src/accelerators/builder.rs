//! Top-down binned construction of the BVH.
//!
//! Split positions are chosen with the 2D analog of the surface-area
//! heuristic: candidate splits are scored by `perimeter(box) * count` on each
//! side, accumulated over a fixed number of centroid buckets per axis. Large
//! subtrees fork onto scoped worker threads; every fork hands each side a
//! disjoint slice of the primitive info array, so workers never contend.

use partition::partition;

use super::bvh::{Bvh, BvhNode};
use crate::parallel;
use crate::shape::Primitive;
use crate::space::{Bounds, Point};

const NUM_BUCKETS: usize = 16;

// Subtrees over fewer primitives than this build inline on whichever worker
// reached them
const PARALLEL_THRESHOLD: usize = 1024;

/// Knobs for the builder. The defaults match interactive use.
#[derive(Copy, Clone, Debug)]
pub struct BuildConfig {
    /// Ranges of at most this many primitives always become leaves
    pub min_leaf: usize,
    /// Ranges of at least this many primitives split whenever a legal split
    /// exists, even at a heuristic loss
    pub max_leaf: usize,
    /// Worker count for construction; 0 uses one per logical CPU
    pub threads: usize
}

impl Default for BuildConfig {
    fn default() -> BuildConfig {
        BuildConfig { min_leaf: 1, max_leaf: 8, threads: 0 }
    }
}

/// Bounding box and centroid of one primitive, gathered up front so the
/// recursion never touches the primitives themselves
struct PrimitiveInfo {
    index: u32,
    bounds: Bounds,
    centroid: Point
}

// Tree shape produced by the recursive phase; flattened into linear nodes
// once the shape is final
enum BuildNode {
    Leaf { bounds: Bounds, first: usize, count: usize },
    Interior { bounds: Bounds, children: Box<(BuildNode, BuildNode)> }
}

#[derive(Copy, Clone)]
struct Bucket {
    count: usize,
    bounds: Bounds
}

struct SplitCandidate {
    axis: usize,
    bucket: usize,
    cost: f64
}

/// Build a tree over the given primitives and reorder them into contiguous
/// leaf order. The returned `prim_ids` maps each slot of the reordered array
/// to the primitive's original position.
pub fn build(primitives: &mut Vec<Primitive>, config: &BuildConfig) -> Bvh {
    let threads = if config.threads == 0 { parallel::max_threads() } else { config.threads };

    let mut info = parallel::map_chunks(primitives, threads, |i, prim| PrimitiveInfo {
        index: i as u32,
        bounds: *prim.bounds(),
        centroid: prim.centroid()
    });

    if info.is_empty() {
        return Bvh { nodes: Vec::new(), prim_ids: Vec::new() };
    }

    let (root, node_count) = build_subtree(&mut info, 0, threads, config);

    let mut nodes = Vec::with_capacity(node_count);
    nodes.push(unset_node());
    flatten(root, 0, &mut nodes);
    debug_assert_eq!(nodes.len(), node_count);
    debug_assert!(nodes.len() <= 2 * info.len() - 1);

    // Leaf ranges index primitive storage directly, so pull the primitives
    // into leaf order
    let prim_ids: Vec<u32> = info.iter().map(|p| p.index).collect();
    let reordered: Vec<Primitive> = prim_ids.iter()
        .map(|&i| primitives[i as usize].clone())
        .collect();
    *primitives = reordered;

    Bvh { nodes, prim_ids }
}

fn unset_node() -> BvhNode {
    BvhNode {
        bounds: Bounds::none(),
        first_index: std::u32::MAX,
        prim_count: std::u32::MAX
    }
}

/// Recursively build the subtree over `info`, whose first primitive sits at
/// offset `first` of the full leaf ordering. Returns the subtree and its
/// node count.
fn build_subtree(
    info: &mut [PrimitiveInfo],
    first: usize,
    threads: usize,
    config: &BuildConfig
) -> (BuildNode, usize) {
    let count = info.len();
    debug_assert!(count > 0);

    let bounds = info.iter().fold(Bounds::none(), |b, p| b.union(&p.bounds));
    if count <= config.min_leaf {
        return (BuildNode::Leaf { bounds, first, count }, 1);
    }

    let centroid_bounds = info.iter()
        .fold(Bounds::none(), |b, p| b.point_union(&p.centroid));

    // Without centroid spread there is no legal split; a forced split could
    // only produce an empty side
    let split = match find_best_split(info, &centroid_bounds) {
        Some(split) => split,
        None => return (BuildNode::Leaf { bounds, first, count }, 1)
    };

    // Splitting must beat the cost of scanning the whole range as a leaf,
    // unless the leaf would grow past the size bound
    let leaf_cost = bounds.perimeter() * count as f64;
    if split.cost >= leaf_cost && count < config.max_leaf {
        return (BuildNode::Leaf { bounds, first, count }, 1);
    }

    let (left, right) = partition(info, |p| {
        bucket_index(&p.centroid, &centroid_bounds, split.axis) <= split.bucket
    });
    debug_assert!(!left.is_empty() && !right.is_empty());
    let left_len = left.len();

    let ((left_node, left_count), (right_node, right_count)) =
        if count >= PARALLEL_THRESHOLD && threads > 1 {
            parallel::join(
                threads,
                move |t| build_subtree(left, first, t, config),
                move |t| build_subtree(right, first + left_len, t, config)
            )
        } else {
            (
                build_subtree(left, first, threads, config),
                build_subtree(right, first + left_len, threads, config)
            )
        };

    let node = BuildNode::Interior {
        bounds,
        children: Box::new((left_node, right_node))
    };
    (node, left_count + right_count + 1)
}

// Bucket holding a centroid when the centroid bounds are divided evenly
// along the axis
#[inline]
fn bucket_index(centroid: &Point, centroid_bounds: &Bounds, axis: usize) -> usize {
    let (low, high, at) = match axis {
        0 => (centroid_bounds.min.x, centroid_bounds.max.x, centroid.x),
        _ => (centroid_bounds.min.y, centroid_bounds.max.y, centroid.y)
    };
    if high <= low {
        return 0;
    }
    let relative = (at - low) / (high - low);
    ((relative * NUM_BUCKETS as f64) as usize).min(NUM_BUCKETS - 1)
}

/// Scan both axes for the cheapest bucket split. One binning pass per axis,
/// then a backward sweep accumulating the right-hand boxes and a forward
/// sweep scoring every split position. Candidates with an empty side are
/// never produced.
fn find_best_split(info: &[PrimitiveInfo], centroid_bounds: &Bounds) -> Option<SplitCandidate> {
    let mut best: Option<SplitCandidate> = None;

    for axis in 0..2 {
        let extent = match axis {
            0 => centroid_bounds.max.x - centroid_bounds.min.x,
            _ => centroid_bounds.max.y - centroid_bounds.min.y
        };
        if extent <= 0.0 {
            continue;
        }

        let mut buckets = [Bucket { count: 0, bounds: Bounds::none() }; NUM_BUCKETS];
        for p in info {
            let bucket = &mut buckets[bucket_index(&p.centroid, centroid_bounds, axis)];
            bucket.count += 1;
            bucket.bounds = bucket.bounds.union(&p.bounds);
        }

        let mut right_bounds = [Bounds::none(); NUM_BUCKETS];
        let mut right_counts = [0usize; NUM_BUCKETS];
        let mut accum = Bounds::none();
        let mut total = 0;
        for i in (0..NUM_BUCKETS).rev() {
            accum = accum.union(&buckets[i].bounds);
            total += buckets[i].count;
            right_bounds[i] = accum;
            right_counts[i] = total;
        }

        let mut left_bounds = Bounds::none();
        let mut left_count = 0;
        for i in 0..NUM_BUCKETS - 1 {
            left_bounds = left_bounds.union(&buckets[i].bounds);
            left_count += buckets[i].count;
            if left_count == 0 || right_counts[i + 1] == 0 {
                continue;
            }
            let cost = left_bounds.perimeter() * left_count as f64
                + right_bounds[i + 1].perimeter() * right_counts[i + 1] as f64;
            if best.as_ref().map_or(true, |b| cost < b.cost) {
                best = Some(SplitCandidate { axis, bucket: i, cost });
            }
        }
    }

    best
}

// Write the subtree rooted at `node` into `nodes[slot]`, appending storage
// for children so siblings always end up adjacent
fn flatten(node: BuildNode, slot: usize, nodes: &mut Vec<BvhNode>) {
    match node {
        BuildNode::Leaf { bounds, first, count } => {
            nodes[slot] = BvhNode {
                bounds,
                first_index: first as u32,
                prim_count: count as u32
            };
        }
        BuildNode::Interior { bounds, children } => {
            let first = nodes.len();
            nodes.push(unset_node());
            nodes.push(unset_node());
            nodes[slot] = BvhNode {
                bounds,
                first_index: first as u32,
                prim_count: 0
            };
            let (left, right) = *children;
            flatten(left, first, nodes);
            flatten(right, first + 1, nodes);
        }
    }
}
