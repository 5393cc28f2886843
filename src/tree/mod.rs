//! The narrow tree surface that a tiling engine drives.
//!
//! The layout algorithm is not part of tiledeco. The host creates
//! [`Node`]s, arranges them into a tree and sets their geometry; the nodes
//! only store what they are told and announce every change. The
//! [`Output`] carries the signals and state that span a whole screen.

pub mod node;
pub mod output;

#[doc(inline)]
pub use node::{Node, NodeId, NodeSignals, SplitMode, WeakNode};
#[doc(inline)]
pub use output::{Output, OutputSignals, WorkspaceId};
