//! Branch-and-bound node representation.
//!
//! Each node narrows the integer bounds of the program. The bound stored on a
//! node is the relaxed objective of its parent, oriented for maximization.

use rust_decimal::Decimal;

/// A node in the branch-and-bound tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchNode {
    /// Per-variable lower bounds at this node.
    lower: Vec<i64>,

    /// Per-variable upper bounds at this node.
    upper: Vec<i64>,

    /// Depth in the search tree (0 = root).
    depth: usize,

    /// Optimistic bound inherited from the parent's relaxation.
    /// The root has none and is never pruned.
    bound: Option<Decimal>,
}

impl BranchNode {
    /// Creates the root node over the program's own bounds.
    pub fn root(lower: Vec<i64>, upper: Vec<i64>) -> Self {
        Self {
            lower,
            upper,
            depth: 0,
            bound: None,
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn bound(&self) -> Option<Decimal> {
        self.bound
    }

    pub fn lower(&self) -> &[i64] {
        &self.lower
    }

    pub fn upper(&self) -> &[i64] {
        &self.upper
    }

    /// Splits this node between `floor` and `floor + 1` on `variable`.
    ///
    /// Returns `(down, up)`: the down child caps the variable at `floor`, the
    /// up child raises it to `floor + 1`. Both carry `bound`.
    pub fn branch(&self, variable: usize, floor: i64, bound: Decimal) -> (BranchNode, BranchNode) {
        let mut down = self.child(bound);
        down.upper[variable] = floor;

        let mut up = self.child(bound);
        up.lower[variable] = floor.saturating_add(1);

        (down, up)
    }

    /// Partitions this node's box minus the single integer `point`.
    ///
    /// For each variable `j` in order, the children fix every earlier variable
    /// to its value in `point` and keep `x_j` strictly below or above
    /// `point[j]`. Empty halves are skipped, so the children are disjoint and
    /// together cover every other point of the box.
    pub fn exclude(&self, point: &[i64], bound: Decimal) -> Vec<BranchNode> {
        let mut children = Vec::with_capacity(2 * point.len());
        let mut prefix = self.child(bound);

        for (j, &value) in point.iter().enumerate() {
            if value > prefix.lower[j] {
                let mut below = prefix.clone();
                below.upper[j] = value - 1;
                children.push(below);
            }
            if value < prefix.upper[j] {
                let mut above = prefix.clone();
                above.lower[j] = value + 1;
                children.push(above);
            }
            prefix.lower[j] = value;
            prefix.upper[j] = value;
        }
        children
    }

    fn child(&self, bound: Decimal) -> BranchNode {
        BranchNode {
            lower: self.lower.clone(),
            upper: self.upper.clone(),
            depth: self.depth + 1,
            bound: Some(bound),
        }
    }

    /// Checks if this node can be pruned against the incumbent.
    ///
    /// A node is pruned when its bound does not exceed `threshold`.
    pub fn can_prune(&self, threshold: Decimal) -> bool {
        match self.bound {
            Some(bound) => bound <= threshold,
            None => false,
        }
    }
}
