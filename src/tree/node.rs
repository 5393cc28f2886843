//! Handles into the tiling tree.
//!
//! A [`Node`] is either a *window* (a leaf wrapping one client window) or a
//! *container* (an ordered list of children laid out by a [`SplitMode`]).
//! Nodes only store what the host tells them: geometry, padding, titles and
//! children. Every change is announced through the node's [`NodeSignals`].
//!
//! Nodes are reference counted handles, and compare equal by identity. The
//! tree owns its nodes: a container holds strong references to its children,
//! while children only hold a weak reference to their parent.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use strum::{Display, EnumIs};
use tracing::{debug, trace};

use crate::core::Signal;
use crate::types::{Padding, Rectangle};
use crate::{DecoError::*, Result};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value of the id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a container lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitMode {
    /// Children are placed side by side, along the x axis.
    Horizontal,
    /// Children are placed on top of each other, along the y axis.
    Vertical,
    /// Children are stacked, and only one of them is visible at a time.
    Stacked,
    /// Children are stacked behind a row of tabs.
    Tabbed,
}

/// The outer geometry of a node changed.
///
/// `old` and `new` are equal when the host asked for a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryChanged {
    #[allow(missing_docs)]
    pub old: Rectangle,
    #[allow(missing_docs)]
    pub new: Rectangle,
}

/// The padding of a node changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingChanged {
    #[allow(missing_docs)]
    pub old: Padding,
    #[allow(missing_docs)]
    pub new: Padding,
}

/// The title of a node changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleChanged {
    /// The node whose title changed.
    pub node: Node,
    /// The new title.
    pub title: String,
}

/// A child was inserted into a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildInserted {
    /// Where the child now sits.
    pub index: usize,
    /// The inserted child.
    pub node: Node,
}

/// A child was removed from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRemoved {
    /// Where the child used to sit.
    pub index: usize,
    /// The removed child.
    pub node: Node,
}

/// A child of a container was replaced by another node, in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSwapped {
    /// The position of the replaced child.
    pub index: usize,
    /// The child that was taken out.
    pub old: Node,
    /// The node that took its place.
    pub new: Node,
}

/// Two children of a container exchanged positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildrenSwapped {
    #[allow(missing_docs)]
    pub a: usize,
    #[allow(missing_docs)]
    pub b: usize,
}

/// The split mode of a container changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitModeChanged {
    #[allow(missing_docs)]
    pub old: SplitMode,
    #[allow(missing_docs)]
    pub new: SplitMode,
}

/// The split direction a window would like its next sibling placed in changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferredSplitChanged {
    #[allow(missing_docs)]
    pub old: SplitMode,
    #[allow(missing_docs)]
    pub new: SplitMode,
}

/// A window was asked to enter or leave fullscreen.
///
/// Emitted even when the state did not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullscreenChanged {
    #[allow(missing_docs)]
    pub fullscreen: bool,
}

/// The node was detached from the tree for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDetached {
    #[allow(missing_docs)]
    pub id: NodeId,
}

/// Everything a node announces.
#[allow(missing_docs)]
#[derive(Debug, Default)]
pub struct NodeSignals {
    pub geometry_changed: Signal<GeometryChanged>,
    pub padding_changed: Signal<PaddingChanged>,
    pub title_changed: Signal<TitleChanged>,
    pub child_inserted: Signal<ChildInserted>,
    pub child_removed: Signal<ChildRemoved>,
    pub child_swapped: Signal<ChildSwapped>,
    pub children_swapped: Signal<ChildrenSwapped>,
    pub split_mode_changed: Signal<SplitModeChanged>,
    pub preferred_split_changed: Signal<PreferredSplitChanged>,
    pub fullscreen_changed: Signal<FullscreenChanged>,
    pub detached: Signal<NodeDetached>,
}

#[derive(Debug)]
enum NodeKind {
    Window {
        fullscreen: bool,
        preferred_split: SplitMode,
    },
    Container {
        mode: SplitMode,
        children: Vec<Node>,
    },
}

struct NodeInner {
    id: NodeId,
    kind: RefCell<NodeKind>,
    title: RefCell<String>,
    geometry: Cell<Rectangle>,
    padding: Cell<Padding>,
    parent: RefCell<Weak<NodeInner>>,
    detached: Cell<bool>,
    data: RefCell<HashMap<TypeId, Box<dyn Any>>>,
    signals: NodeSignals,
}

/// A handle to a node in the tiling tree.
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

/// A weak handle to a node, that does not keep it alive.
#[derive(Clone, Default)]
pub struct WeakNode(Weak<NodeInner>);

impl Node {
    fn new(kind: NodeKind, title: String) -> Self {
        Self(Rc::new(NodeInner {
            id: NodeId::next(),
            kind: RefCell::new(kind),
            title: RefCell::new(title),
            geometry: Cell::new(Rectangle::zeroed()),
            padding: Cell::new(Padding::zeroed()),
            parent: RefCell::new(Weak::new()),
            detached: Cell::new(false),
            data: RefCell::new(HashMap::new()),
            signals: NodeSignals::default(),
        }))
    }

    /// Creates a new window node with the given title.
    pub fn window<S: Into<String>>(title: S) -> Self {
        Self::new(
            NodeKind::Window {
                fullscreen: false,
                preferred_split: SplitMode::Horizontal,
            },
            title.into(),
        )
    }

    /// Creates a new, empty container node.
    pub fn container(mode: SplitMode) -> Self {
        Self::new(
            NodeKind::Container {
                mode,
                children: Vec::new(),
            },
            String::new(),
        )
    }

    /// The node's id.
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// Creates a weak handle to the node.
    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }

    /// The signals this node emits.
    pub fn signals(&self) -> &NodeSignals {
        &self.0.signals
    }

    /// Returns true if the node is a window.
    pub fn is_window(&self) -> bool {
        matches!(*self.0.kind.borrow(), NodeKind::Window { .. })
    }

    /// Returns true if the node is a container.
    pub fn is_container(&self) -> bool {
        matches!(*self.0.kind.borrow(), NodeKind::Container { .. })
    }

    /// Returns true once the node has been detached from the tree.
    pub fn is_detached(&self) -> bool {
        self.0.detached.get()
    }

    fn check_live(&self) -> Result<()> {
        if self.is_detached() {
            Err(Detached(self.id()))
        } else {
            Ok(())
        }
    }

    /*
     * Geometry
     */

    /// The outer geometry of the node.
    pub fn geometry(&self) -> Rectangle {
        self.0.geometry.get()
    }

    /// Sets the outer geometry of the node.
    pub fn set_geometry(&self, new: Rectangle) {
        let old = self.0.geometry.replace(new);
        trace!("node {}: geometry {:?} -> {:?}", self.id(), old, new);

        self.0.signals.geometry_changed.emit(&GeometryChanged { old, new });
    }

    /// Announces the current geometry again, as if it had changed.
    ///
    /// Use this after something that derives from the geometry changed,
    /// such as the padding a decoration reserves.
    pub fn refresh_geometry(&self) {
        let geom = self.geometry();
        self.0.signals.geometry_changed.emit(&GeometryChanged {
            old: geom,
            new: geom,
        });
    }

    /// The space reserved on each edge for decorations.
    pub fn padding(&self) -> Padding {
        self.0.padding.get()
    }

    /// Sets the padding. Nothing is announced if it did not change.
    pub fn set_padding(&self, new: Padding) {
        let old = self.0.padding.get();
        if old == new {
            return;
        }
        self.0.padding.set(new);
        trace!("node {}: padding {:?} -> {:?}", self.id(), old, new);

        self.0.signals.padding_changed.emit(&PaddingChanged { old, new });
    }

    /// The outer geometry shrunk by the padding.
    pub fn inner_geometry(&self) -> Rectangle {
        self.geometry().shrink(self.padding())
    }

    /*
     * Titles and window state
     */

    /// The node's title.
    pub fn title(&self) -> String {
        self.0.title.borrow().clone()
    }

    /// Sets the node's title. Nothing is announced if it did not change.
    pub fn set_title<S: Into<String>>(&self, title: S) {
        let title = title.into();
        {
            let mut current = self.0.title.borrow_mut();
            if *current == title {
                return;
            }
            current.clone_from(&title);
        }

        self.0.signals.title_changed.emit(&TitleChanged {
            node: self.clone(),
            title,
        });
    }

    /// Returns true if the node is a fullscreen window.
    pub fn is_fullscreen(&self) -> bool {
        matches!(*self.0.kind.borrow(), NodeKind::Window { fullscreen: true, .. })
    }

    /// Sets whether the window is fullscreen.
    ///
    /// The change is announced even if the state stays the same.
    pub fn set_fullscreen(&self, value: bool) -> Result<()> {
        {
            let mut kind = self.0.kind.borrow_mut();
            let NodeKind::Window { fullscreen, .. } = &mut *kind else {
                return Err(NotAWindow(self.id()));
            };
            *fullscreen = value;
        }

        self.0
            .signals
            .fullscreen_changed
            .emit(&FullscreenChanged { fullscreen: value });
        Ok(())
    }

    /// The split direction the window would like its next sibling placed in.
    pub fn preferred_split(&self) -> Option<SplitMode> {
        match *self.0.kind.borrow() {
            NodeKind::Window { preferred_split, .. } => Some(preferred_split),
            NodeKind::Container { .. } => None,
        }
    }

    /// Sets the preferred split direction of a window.
    pub fn set_preferred_split(&self, new: SplitMode) -> Result<()> {
        let old = {
            let mut kind = self.0.kind.borrow_mut();
            let NodeKind::Window { preferred_split, .. } = &mut *kind else {
                return Err(NotAWindow(self.id()));
            };
            std::mem::replace(preferred_split, new)
        };

        if old != new {
            self.0
                .signals
                .preferred_split_changed
                .emit(&PreferredSplitChanged { old, new });
        }
        Ok(())
    }

    /*
     * Structure
     */

    /// The parent of the node, if it has one.
    pub fn parent(&self) -> Option<Node> {
        self.0.parent.borrow().upgrade().map(Node)
    }

    /// Every ancestor of the node, starting with its parent.
    pub fn ancestors(&self) -> Vec<Node> {
        let mut ret = Vec::new();
        let mut current = self.parent();

        while let Some(node) = current {
            current = node.parent();
            ret.push(node);
        }

        ret
    }

    /// Returns true if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Node) -> bool {
        other.ancestors().iter().any(|a| a == self)
    }

    /// The split mode of a container.
    pub fn split_mode(&self) -> Option<SplitMode> {
        match *self.0.kind.borrow() {
            NodeKind::Container { mode, .. } => Some(mode),
            NodeKind::Window { .. } => None,
        }
    }

    /// Sets the split mode of a container. Nothing is announced if it did not change.
    pub fn set_split_mode(&self, new: SplitMode) -> Result<()> {
        let old = {
            let mut kind = self.0.kind.borrow_mut();
            let NodeKind::Container { mode, .. } = &mut *kind else {
                return Err(NotAContainer(self.id()));
            };
            std::mem::replace(mode, new)
        };

        if old != new {
            debug!("node {}: split mode {} -> {}", self.id(), old, new);
            self.0
                .signals
                .split_mode_changed
                .emit(&SplitModeChanged { old, new });
        }
        Ok(())
    }

    /// The children of a container, in order. Windows have none.
    pub fn children(&self) -> Vec<Node> {
        match &*self.0.kind.borrow() {
            NodeKind::Container { children, .. } => children.clone(),
            NodeKind::Window { .. } => Vec::new(),
        }
    }

    /// The number of children.
    pub fn child_count(&self) -> usize {
        match &*self.0.kind.borrow() {
            NodeKind::Container { children, .. } => children.len(),
            NodeKind::Window { .. } => 0,
        }
    }

    /// The child at `index`.
    pub fn child_at(&self, index: usize) -> Option<Node> {
        match &*self.0.kind.borrow() {
            NodeKind::Container { children, .. } => children.get(index).cloned(),
            NodeKind::Window { .. } => None,
        }
    }

    /// The position of `child` among the children.
    pub fn index_of(&self, child: &Node) -> Option<usize> {
        match &*self.0.kind.borrow() {
            NodeKind::Container { children, .. } => children.iter().position(|c| c == child),
            NodeKind::Window { .. } => None,
        }
    }

    fn check_insertable(&self, child: &Node) -> Result<()> {
        self.check_live()?;
        child.check_live()?;

        if child == self || child.is_ancestor_of(self) {
            return Err(Cycle(child.id()));
        }
        if child.parent().is_some() {
            return Err(AlreadyParented(child.id()));
        }
        Ok(())
    }

    /// Inserts `child` into a container at `index`.
    ///
    /// `child` must not have a parent.
    pub fn insert_child(&self, index: usize, child: &Node) -> Result<()> {
        self.check_insertable(child)?;

        {
            let mut kind = self.0.kind.borrow_mut();
            let NodeKind::Container { children, .. } = &mut *kind else {
                return Err(NotAContainer(self.id()));
            };
            if index > children.len() {
                return Err(ChildIndex {
                    node: self.id(),
                    index,
                    len: children.len(),
                });
            }
            children.insert(index, child.clone());
        }
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);

        debug!("node {}: inserted {} at {}", self.id(), child.id(), index);
        self.0.signals.child_inserted.emit(&ChildInserted {
            index,
            node: child.clone(),
        });
        Ok(())
    }

    /// Appends `child` to the children of a container.
    pub fn push_child(&self, child: &Node) -> Result<()> {
        self.insert_child(self.child_count(), child)
    }

    /// Removes `child` from a container, returning the position it sat at.
    pub fn remove_child(&self, child: &Node) -> Result<usize> {
        let index = {
            let mut kind = self.0.kind.borrow_mut();
            let NodeKind::Container { children, .. } = &mut *kind else {
                return Err(NotAContainer(self.id()));
            };
            let Some(index) = children.iter().position(|c| c == child) else {
                return Err(NotAChild {
                    parent: self.id(),
                    child: child.id(),
                });
            };
            children.remove(index);
            index
        };
        *child.0.parent.borrow_mut() = Weak::new();

        debug!("node {}: removed {} from {}", self.id(), child.id(), index);
        self.0.signals.child_removed.emit(&ChildRemoved {
            index,
            node: child.clone(),
        });
        Ok(index)
    }

    /// Puts `new` in the place of the child `old`, returning its position.
    ///
    /// `new` must not have a parent; `old` is left without one.
    pub fn replace_child(&self, old: &Node, new: &Node) -> Result<usize> {
        self.check_insertable(new)?;

        let index = {
            let mut kind = self.0.kind.borrow_mut();
            let NodeKind::Container { children, .. } = &mut *kind else {
                return Err(NotAContainer(self.id()));
            };
            let Some(index) = children.iter().position(|c| c == old) else {
                return Err(NotAChild {
                    parent: self.id(),
                    child: old.id(),
                });
            };
            children[index] = new.clone();
            index
        };
        *old.0.parent.borrow_mut() = Weak::new();
        *new.0.parent.borrow_mut() = Rc::downgrade(&self.0);

        debug!("node {}: replaced {} with {} at {}", self.id(), old.id(), new.id(), index);
        self.0.signals.child_swapped.emit(&ChildSwapped {
            index,
            old: old.clone(),
            new: new.clone(),
        });
        Ok(index)
    }

    /// Exchanges the positions of the children at `a` and `b`.
    pub fn swap_children(&self, a: usize, b: usize) -> Result<()> {
        {
            let mut kind = self.0.kind.borrow_mut();
            let NodeKind::Container { children, .. } = &mut *kind else {
                return Err(NotAContainer(self.id()));
            };
            let len = children.len();
            if let Some(index) = [a, b].into_iter().find(|i| *i >= len) {
                return Err(ChildIndex {
                    node: self.id(),
                    index,
                    len,
                });
            }
            if a == b {
                return Ok(());
            }
            children.swap(a, b);
        }

        debug!("node {}: swapped children {} and {}", self.id(), a, b);
        self.0
            .signals
            .children_swapped
            .emit(&ChildrenSwapped { a, b });
        Ok(())
    }

    /// Detaches the node from the tree for good.
    ///
    /// The node is removed from its parent first, if it has one.
    pub fn detach(&self) -> Result<()> {
        self.check_live()?;

        if let Some(parent) = self.parent() {
            parent.remove_child(self)?;
        }
        self.0.detached.set(true);

        debug!("node {}: detached", self.id());
        self.0.signals.detached.emit(&NodeDetached { id: self.id() });
        Ok(())
    }

    /*
     * Side table
     */

    /// Stores `data` on the node, returning what was stored for its type before.
    pub fn store_data<T: Any>(&self, data: T) -> Option<T> {
        let old = self
            .0
            .data
            .borrow_mut()
            .insert(TypeId::of::<T>(), Box::new(data));

        old.and_then(|b| b.downcast::<T>().ok()).map(|b| *b)
    }

    /// Retrieves a copy of the data stored for type `T`.
    pub fn get_data<T: Any + Clone>(&self) -> Option<T> {
        self.0
            .data
            .borrow()
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref::<T>())
            .cloned()
    }

    /// Returns true if data of type `T` is stored on the node.
    pub fn has_data<T: Any>(&self) -> bool {
        self.0.data.borrow().contains_key(&TypeId::of::<T>())
    }

    /// Removes and returns the data stored for type `T`.
    ///
    /// The value is handed back to the caller, so it is dropped outside
    /// of the side table.
    pub fn erase_data<T: Any>(&self) -> Option<T> {
        let boxed = self.0.data.borrow_mut().remove(&TypeId::of::<T>());

        boxed.and_then(|b| b.downcast::<T>().ok()).map(|b| *b)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &*self.0.kind.borrow() {
            NodeKind::Window { .. } => "window",
            NodeKind::Container { .. } => "container",
        };
        f.debug_struct("Node")
            .field("id", &self.0.id)
            .field("kind", &kind)
            .field("title", &*self.0.title.borrow())
            .field("geometry", &self.0.geometry.get())
            .finish()
    }
}

impl WeakNode {
    /// Creates a weak handle that never upgrades.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to get a strong handle to the node.
    pub fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(Node)
    }

    /// Returns true if the handle points to `node`.
    pub fn is(&self, node: &Node) -> bool {
        Weak::ptr_eq(&self.0, &Rc::downgrade(&node.0))
    }
}

impl fmt::Debug for WeakNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(node) => write!(f, "WeakNode({})", node.id()),
            None => write!(f, "WeakNode(dropped)"),
        }
    }
}
