//! # tiledeco - decorations for a tiling tree
//!
//! tiledeco draws and maintains window decorations (borders, rounded outer corners
//! and tab bars) for the tree of windows and containers that a tiling window manager
//! keeps, and keeps that decoration state correct as the tree is restructured,
//! resized, refocused or reconfigured.
//!
//! ## Design
//!
//! Everything in tiledeco is event driven. The tiling tree announces what happens to it
//! through [`Signal`](core::signal::Signal)s, and each decoration subscribes to the signals
//! of the node(s) it is bound to. Decorations never walk or poll the tree on their own:
//! all derived state (colors, outer corners, tab order, hit-test and damage regions) is
//! updated incrementally in response to those signals.
//!
//! ### The tree surface
//!
//! The layout algorithm is not part of this crate. What it provides instead is the
//! narrow surface a layout engine drives: [`Node`](tree::Node) handles that store geometry,
//! padding, titles and children and emit a signal for every change, and an
//! [`Output`](tree::Output) that carries output-wide signals, the scene of mapped
//! decoration surfaces, and accumulated damage.
//!
//! Nodes and decorations are reference counted, and use [`std::cell::RefCell`] for
//! interior mutability. The tree owns its nodes; each node owns its decoration through
//! its side table, and decorations only keep weak references back to their node.
//!
//! ### Drawing
//!
//! Decorations draw through the [`Renderer`](render::Renderer) trait, which asks for only
//! three primitives: filled rectangles, filled annulus sectors and cached text labels.
//!
//! ### A Basic Example
//!
//! ```no_run
//! use tiledeco::{Decorator, DecorationConfig};
//! use tiledeco::tree::{Node, Output, SplitMode, WorkspaceId};
//!
//! let output = Output::new("HDMI-A-1");
//! let decorator = Decorator::init(&output, DecorationConfig::new()).unwrap();
//!
//! let root = Node::container(SplitMode::Horizontal);
//! output.attach_node(&root);
//! output.set_root(WorkspaceId(0), false, Some(&root));
//!
//! let term = Node::window("terminal");
//! output.attach_node(&term);
//! root.push_child(&term).unwrap();
//!
//! output.set_active_node(Some(&term));
//! # drop(decorator);
//! ```

#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs
)]

#[macro_use]
extern crate bitflags;

#[macro_use]
mod log;

pub mod config;
pub mod core;
pub mod deco;
pub mod manager;
pub mod render;
pub mod tree;

pub use crate::core::types;
#[doc(inline)]
pub use crate::config::{DecorationConfig, DecorationConfigBuilder};
#[doc(inline)]
pub use crate::manager::Decorator;

use crate::tree::NodeId;

use thiserror::Error;

/// Everything that can go wrong when driving tiledeco.
///
/// These are all caused by the host misusing the tree surface. Broken internal
/// invariants are not represented here: they abort through `fatal!`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DecoError {
    /// A child index was out of range for the container.
    #[error("Child index {index} out of bounds for container {node} with {len} children")]
    ChildIndex {
        /// The container.
        node: NodeId,
        /// The offending index.
        index: usize,
        /// The number of children the container had.
        len: usize,
    },

    /// The operation needs a container node, but was given a window.
    #[error("Node {0} is not a container")]
    NotAContainer(NodeId),

    /// The operation needs a window node, but was given a container.
    #[error("Node {0} is not a window")]
    NotAWindow(NodeId),

    /// The node already has a parent and cannot be inserted elsewhere.
    #[error("Node {0} already has a parent")]
    AlreadyParented(NodeId),

    /// The node is not a child of the given container.
    #[error("Node {child} is not a child of {parent}")]
    NotAChild {
        /// The container that was searched.
        parent: NodeId,
        /// The node that was not found.
        child: NodeId,
    },

    /// The node has already been detached from the tree.
    #[error("Node {0} has been detached")]
    Detached(NodeId),

    /// Inserting the node would make it its own ancestor.
    #[error("Inserting {0} would create a cycle")]
    Cycle(NodeId),

    /// One or more configuration invariants was not upheld.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The general result type used by tiledeco.
pub type Result<T> = ::core::result::Result<T, DecoError>;
