//! Decorations, and the shared state they are built from.
//!
//! Every node in the tree gets exactly one decoration, stored in its side
//! table as [`DecorationData`]: a [`WindowDecoration`] for windows, a
//! [`ContainerDecoration`] for containers. Decorations subscribe to the
//! signals of their node and of the output, and keep their derived state
//! (padding, outer corners, regions and colors) up to date from there.
//!
//! Decorations are owned by their node. Their signal handlers only hold
//! weak references back to them, and every subscription is dropped again
//! when the decoration goes away, so no handler ever outlives its
//! decoration.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use strum::Display;
use tracing::trace;

use crate::config::DecorationConfig;
use crate::core::{Connection, Signal};
use crate::tree::{Node, Output};
use crate::types::Corners;

pub mod border;
pub mod container;
pub mod corners;
pub mod tabs;
pub mod window;

#[doc(inline)]
pub use border::{Border, BorderColors, BorderSpec};
#[doc(inline)]
pub use container::{ContainerDecoration, ContainerState};
#[doc(inline)]
pub use corners::set_outer_corners;
#[doc(inline)]
pub use tabs::TabBar;
#[doc(inline)]
pub use window::{WindowDecoration, WindowState};

/// Every decoration is being torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Finish;

/// The state shared by every decoration on an output.
#[derive(Debug)]
pub struct DecoContext {
    output: Output,
    config: RefCell<Rc<DecorationConfig>>,
    finish: Signal<Finish>,
}

impl DecoContext {
    /// Creates a new DecoContext.
    ///
    /// The config is not validated here.
    pub fn new(output: Output, config: DecorationConfig) -> Rc<Self> {
        Rc::new(Self {
            output,
            config: RefCell::new(Rc::new(config)),
            finish: Signal::new(),
        })
    }

    /// The output the decorations live on.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// The current configuration.
    pub fn config(&self) -> Rc<DecorationConfig> {
        Rc::clone(&self.config.borrow())
    }

    /// Replaces the configuration without announcing it.
    pub(crate) fn replace_config(&self, config: DecorationConfig) -> Rc<DecorationConfig> {
        self.config.replace(Rc::new(config))
    }

    /// Emitted when the decorations should tear themselves down.
    pub fn finish(&self) -> &Signal<Finish> {
        &self.finish
    }
}

/// The decoration of a node, as stored in its side table.
#[derive(Debug, Clone)]
pub struct DecorationData(pub Decoration);

/// A decoration of either kind.
#[derive(Debug, Clone)]
pub enum Decoration {
    /// The decoration of a window.
    Window(Rc<RefCell<WindowDecoration>>),
    /// The decoration of a container.
    Container(Rc<RefCell<ContainerDecoration>>),
}

impl Decoration {
    /// Looks up the decoration of `node`.
    pub fn of(node: &Node) -> Option<Self> {
        node.get_data::<DecorationData>().map(|data| data.0)
    }

    /// The outer corners currently assigned to the decoration.
    pub fn outer_corners(&self) -> Corners {
        match self {
            Self::Window(deco) => deco.borrow().outer_corners(),
            Self::Container(deco) => deco.borrow().outer_corners(),
        }
    }

    /// Assigns the outer corners, without touching any other node.
    pub(crate) fn apply_outer_corners(&self, mask: Corners) {
        match self {
            Self::Window(deco) => WindowDecoration::apply_outer_corners(deco, mask),
            Self::Container(deco) => ContainerDecoration::apply_outer_corners(deco, mask),
        }
    }

    /// Returns true if the node is the active node, or holds it.
    pub fn is_active_bearing(&self) -> bool {
        match self {
            Self::Window(deco) => deco.borrow().is_active(),
            Self::Container(deco) => {
                let deco = deco.borrow();
                deco.is_active() || deco.has_active_descendant()
            }
        }
    }

    /// Marks the node as being the active node, or not.
    pub fn set_active(&self, active: bool) {
        let before = self.is_active_bearing();
        match self {
            Self::Window(deco) => WindowDecoration::set_active(deco, active),
            Self::Container(deco) => ContainerDecoration::on_set_active(deco, active),
        }
        self.notify_parent(before);
    }

    /// Marks the node as holding the active node, or not.
    ///
    /// Windows have nothing beneath them, so this only affects containers.
    pub fn set_child_active(&self, active: bool) {
        if let Self::Container(deco) = self {
            let before = self.is_active_bearing();
            ContainerDecoration::on_set_child_active(deco, active);
            self.notify_parent(before);
        }
    }

    fn node(&self) -> Option<Node> {
        match self {
            Self::Window(deco) => deco.borrow().node(),
            Self::Container(deco) => deco.borrow().node(),
        }
    }

    /// The tab of this node is colored by whether it is active-bearing.
    fn notify_parent(&self, before: bool) {
        if self.is_active_bearing() == before {
            return;
        }
        let parent = self.node().and_then(|node| node.parent());
        if let Some(Self::Container(parent)) = parent.as_ref().and_then(Self::of) {
            ContainerDecoration::damage(&parent);
        }
    }
}

/// Wraps a decoration handler into a signal slot.
///
/// The slot only keeps a weak reference to the decoration. Every
/// subscription is disconnected before its decoration is dropped, so
/// failing to upgrade means a lifecycle bug.
pub(crate) fn bind<D, T>(deco: &Rc<RefCell<D>>, handler: fn(&Rc<RefCell<D>>, &T)) -> impl Fn(&T) + 'static
where
    D: 'static,
    T: 'static,
{
    let weak: Weak<RefCell<D>> = Rc::downgrade(deco);

    move |event: &T| match weak.upgrade() {
        Some(deco) => handler(&deco, event),
        None => fatal!("signal delivered to a dropped decoration"),
    }
}

/// The signals a decoration subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum Hook {
    Geometry,
    Padding,
    PreferredSplit,
    Fullscreen,
    SplitMode,
    ChildInserted,
    ChildRemoved,
    ChildSwapped,
    ChildrenSwapped,
    Detached,
    Config,
    Finish,
}

/// The subscriptions of one decoration.
///
/// Whatever is still connected when this is dropped gets disconnected.
#[derive(Debug, Default)]
pub(crate) struct Subscriptions {
    hooks: IndexMap<Hook, Connection>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hook: Hook, conn: Connection) {
        if let Some(old) = self.hooks.insert(hook, conn) {
            old.disconnect();
        }
    }

    /// Disconnects one subscription. Returns whether it was connected.
    pub fn disconnect(&mut self, hook: Hook) -> bool {
        match self.hooks.shift_remove(&hook) {
            Some(conn) => {
                trace!("disconnecting {} hook", hook);
                conn.disconnect()
            }
            None => false,
        }
    }

    /// Disconnects every subscription, returning how many were connected.
    pub fn disconnect_all(&mut self) -> usize {
        self.hooks
            .drain(..)
            .filter(|(_, conn)| conn.disconnect())
            .count()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.disconnect_all();
    }
}
