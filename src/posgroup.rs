//! Dense point -> group-handle map, with the union-find-by-rewrite `merge`.

use crate::group::{GroupArena, GroupHandle};
use crate::point::GridPoint;

/// A `width x height` dense map from [`GridPoint`] to [`GroupHandle`]. Empty
/// points map to `end()`.
#[derive(Clone)]
pub struct PosGroup {
    width: usize,
    height: usize,
    handles: Vec<GroupHandle>,
}

impl PosGroup {
    pub fn new(width: usize, height: usize, end: GroupHandle) -> Self {
        PosGroup {
            width,
            height,
            handles: vec![end; width * height],
        }
    }

    #[inline]
    fn index(&self, p: GridPoint) -> usize {
        debug_assert!(p.in_bounds(self.width, self.height));
        p.x * self.height + p.y
    }

    #[inline]
    pub fn get(&self, p: GridPoint) -> GroupHandle {
        self.handles[self.index(p)]
    }

    #[inline]
    pub fn set(&mut self, p: GridPoint, handle: GroupHandle) {
        let i = self.index(p);
        self.handles[i] = handle;
    }

    /// Rewrite every point currently mapped to `get(b)` so it maps to `get(a)`
    /// instead. A self-merge (`get(a) == get(b)`) is a no-op.
    pub fn merge(&mut self, a: GridPoint, b: GridPoint) {
        let target = self.get(a);
        let source = self.get(b);
        if target == source {
            return;
        }
        for h in &mut self.handles {
            if *h == source {
                *h = target;
            }
        }
    }
}
