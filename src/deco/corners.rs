//! Corner propagation.
//!
//! Only the corners of the tree as a whole get rounded. The root of a tree
//! gets every corner, and each container hands the corners it was given to
//! the children that touch them: the leading ones to its first child and
//! the trailing ones to its last. Children in between get none.

use tracing::trace;

use crate::tree::{Node, SplitMode};
use crate::types::Corners;

use super::Decoration;

/// Splits `mask` into the corners of the first and the last child of a
/// container laid out with `mode`.
///
/// Vertical containers stack their children, so the first child touches
/// the top corners and the last the bottom ones. Every other mode places
/// children left to right.
pub fn split_corners(mode: SplitMode, mask: Corners) -> (Corners, Corners) {
    match mode {
        SplitMode::Vertical => (mask & Corners::TOP, mask & Corners::BOTTOM),
        SplitMode::Horizontal | SplitMode::Tabbed | SplitMode::Stacked => {
            (mask & Corners::LEFT, mask & Corners::RIGHT)
        }
    }
}

/// Assigns `mask` to the decoration of `node`, and distributes it through
/// the subtree below.
///
/// Nodes without a decoration are skipped, but their children still get
/// their share. Nothing is announced: every decoration touched recomputes
/// its region and requests a redraw if its corners changed.
pub fn set_outer_corners(node: &Node, mask: Corners) {
    trace!("node {}: outer corners {:?}", node.id(), mask);

    if let Some(deco) = Decoration::of(node) {
        deco.apply_outer_corners(mask);
    }

    let children = node.children();
    match children.as_slice() {
        [] => {}
        [only] => set_outer_corners(only, mask),
        [first, middle @ .., last] => {
            let mode = node.split_mode().unwrap_or(SplitMode::Horizontal);
            let (leading, trailing) = split_corners(mode, mask);

            set_outer_corners(first, leading);
            for child in middle {
                set_outer_corners(child, Corners::NONE);
            }
            set_outer_corners(last, trailing);
        }
    }
}

/// The corners currently assigned to the decoration of `node`.
pub fn outer_corners(node: &Node) -> Corners {
    Decoration::of(node)
        .map(|deco| deco.outer_corners())
        .unwrap_or(Corners::NONE)
}

/// Distributes the corners of `node` through its subtree again.
pub fn repropagate(node: &Node) {
    set_outer_corners(node, outer_corners(node));
}

/// Takes every corner away from the subtree below `node`.
pub fn clear_outer_corners(node: &Node) {
    set_outer_corners(node, Corners::NONE);
}
