//! The output hub.
//!
//! An [`Output`] is the piece of the host that spans a whole screen: it
//! announces nodes as they are created, tracks the active node and the
//! root node of every workspace, carries configuration changes, and keeps
//! the [`Scene`] of decoration surfaces together with the damage that
//! accumulated since the host last repainted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use glam::Mat4;
use tracing::{debug, trace, warn};

use crate::core::{Region, Signal};
use crate::render::{Renderer, Scene, Surface};
use crate::types::{Point, Rectangle};

use super::{Node, NodeId, WeakNode};

/// Identifies a workspace on an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspaceId(pub u32);

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node was created and needs a decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAttached {
    #[allow(missing_docs)]
    pub node: Node,
}

/// The active node changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNodeChanged {
    /// The previously active node.
    pub old: Option<Node>,
    /// The newly active node.
    pub new: Option<Node>,
}

/// The root of a workspace's tiled or floating tree changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNodeChanged {
    /// The workspace whose root changed.
    pub workspace: WorkspaceId,
    /// Whether this is the root of the floating layer.
    pub floating: bool,
    /// The previous root.
    pub old: Option<Node>,
    /// The new root.
    pub new: Option<Node>,
}

/// The decoration configuration changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigChanged;

/// A decoration surface was attached to, or detached from, the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceChanged {
    /// The node the surface decorates.
    pub id: NodeId,
}

/// Everything an output announces.
#[allow(missing_docs)]
#[derive(Debug, Default)]
pub struct OutputSignals {
    pub view_node_attached: Signal<NodeAttached>,
    pub container_node_attached: Signal<NodeAttached>,
    pub active_node_changed: Signal<ActiveNodeChanged>,
    pub root_node_changed: Signal<RootNodeChanged>,
    pub config_changed: Signal<ConfigChanged>,
    pub surface_attached: Signal<SurfaceChanged>,
    pub surface_detached: Signal<SurfaceChanged>,
}

#[derive(Debug)]
struct OutputInner {
    name: String,
    active: RefCell<WeakNode>,
    roots: RefCell<HashMap<(WorkspaceId, bool), Node>>,
    scene: RefCell<Scene>,
    damage: RefCell<Region>,
    signals: OutputSignals,
}

/// A handle to an output.
#[derive(Debug, Clone)]
pub struct Output(Rc<OutputInner>);

impl Output {
    /// Creates a new Output.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(Rc::new(OutputInner {
            name: name.into(),
            active: RefCell::new(WeakNode::new()),
            roots: RefCell::new(HashMap::new()),
            scene: RefCell::new(Scene::new()),
            damage: RefCell::new(Region::new()),
            signals: OutputSignals::default(),
        }))
    }

    /// The name of the output.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The signals this output emits.
    pub fn signals(&self) -> &OutputSignals {
        &self.0.signals
    }

    /// Announces a newly created node.
    pub fn attach_node(&self, node: &Node) {
        let ev = NodeAttached { node: node.clone() };

        if node.is_container() {
            debug!("output {}: container {} attached", self.name(), node.id());
            self.0.signals.container_node_attached.emit(&ev);
        } else {
            debug!("output {}: window {} attached", self.name(), node.id());
            self.0.signals.view_node_attached.emit(&ev);
        }
    }

    /*
     * Active node
     */

    /// The active node, if any.
    pub fn active_node(&self) -> Option<Node> {
        self.0.active.borrow().upgrade()
    }

    /// Sets the active node. Nothing is announced if it did not change.
    pub fn set_active_node(&self, node: Option<&Node>) {
        let old = self.active_node();
        if old.as_ref() == node {
            return;
        }

        *self.0.active.borrow_mut() = node.map(Node::downgrade).unwrap_or_default();

        debug!(
            "output {}: active node {:?} -> {:?}",
            self.name(),
            old.as_ref().map(Node::id),
            node.map(Node::id)
        );
        self.0.signals.active_node_changed.emit(&ActiveNodeChanged {
            old,
            new: node.cloned(),
        });
    }

    /*
     * Roots
     */

    /// The root of the tiled or floating tree of a workspace.
    pub fn root(&self, workspace: WorkspaceId, floating: bool) -> Option<Node> {
        self.0.roots.borrow().get(&(workspace, floating)).cloned()
    }

    /// Sets the root of the tiled or floating tree of a workspace.
    ///
    /// Nothing is announced if it did not change.
    pub fn set_root(&self, workspace: WorkspaceId, floating: bool, node: Option<&Node>) {
        let old = {
            let mut roots = self.0.roots.borrow_mut();
            match node {
                Some(node) => roots.insert((workspace, floating), node.clone()),
                None => roots.remove(&(workspace, floating)),
            }
        };
        if old.as_ref() == node {
            return;
        }

        debug!(
            "output {}: workspace {} {} root {:?} -> {:?}",
            self.name(),
            workspace,
            if floating { "floating" } else { "tiled" },
            old.as_ref().map(Node::id),
            node.map(Node::id)
        );
        self.0.signals.root_node_changed.emit(&RootNodeChanged {
            workspace,
            floating,
            old,
            new: node.cloned(),
        });
    }

    /// Every registered root.
    pub fn roots(&self) -> Vec<Node> {
        self.0.roots.borrow().values().cloned().collect()
    }

    /// Returns true if `node` is the root of any tree on this output.
    pub fn is_root(&self, node: &Node) -> bool {
        self.0.roots.borrow().values().any(|root| root == node)
    }

    /*
     * Config
     */

    /// Announces that the decoration configuration changed.
    pub fn config_changed(&self) {
        self.0.signals.config_changed.emit(&ConfigChanged);
    }

    /*
     * Scene and damage
     */

    /// Places a decoration surface in the scene.
    pub fn attach_surface(&self, id: NodeId, surface: Weak<RefCell<dyn Surface>>) {
        let attached = self.0.scene.borrow_mut().attach(id, surface);
        if !attached {
            warn!("output {}: surface of {} attached twice", self.name(), id);
            return;
        }

        trace!("output {}: surface of {} attached", self.name(), id);
        self.0.signals.surface_attached.emit(&SurfaceChanged { id });
    }

    /// Removes a decoration surface from the scene.
    pub fn detach_surface(&self, id: NodeId) {
        let detached = self.0.scene.borrow_mut().detach(id);
        if !detached {
            warn!("output {}: surface of {} was not attached", self.name(), id);
            return;
        }

        trace!("output {}: surface of {} detached", self.name(), id);
        self.0.signals.surface_detached.emit(&SurfaceChanged { id });
    }

    /// Returns true if a surface is attached for `id`.
    pub fn has_surface(&self, id: NodeId) -> bool {
        self.0.scene.borrow().contains(id)
    }

    /// The number of surfaces in the scene.
    pub fn surface_count(&self) -> usize {
        self.0.scene.borrow().len()
    }

    /// Marks a rectangle as needing a repaint.
    pub fn damage(&self, rect: Rectangle) {
        self.0.damage.borrow_mut().add_rect(rect);
    }

    /// Marks a region as needing a repaint.
    pub fn damage_region(&self, region: &Region) {
        self.0.damage.borrow_mut().union(region);
    }

    /// Takes everything that needs a repaint, leaving nothing behind.
    pub fn take_damage(&self) -> Region {
        std::mem::take(&mut *self.0.damage.borrow_mut())
    }

    /// Draws every mapped surface in the scene.
    pub fn render(&self, renderer: &mut dyn Renderer, transform: &Mat4) {
        self.0.scene.borrow().render(renderer, transform)
    }

    /// Finds the topmost surface accepting input at `pt`.
    pub fn surface_at(&self, pt: Point) -> Option<NodeId> {
        self.0.scene.borrow().surface_at(pt)
    }
}
