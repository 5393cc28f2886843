//! The lifecycle coordinator.
//!
//! A [`Decorator`] is what a host creates to get its tree decorated. It
//! decorates every node the output announces, keeps track of which node
//! is active and which nodes are roots, and tears every decoration down
//! again when it is finished or dropped.

use std::cell::RefCell;
use std::rc::Rc;

use custom_debug_derive::Debug;
use tracing::{debug, instrument, trace, warn};

use crate::config::{no_checks, DecorationConfig};
use crate::core::Connection;
use crate::deco::{
    corners, ContainerDecoration, DecoContext, Decoration, DecorationData, Finish,
    WindowDecoration,
};
use crate::tree::output::{ActiveNodeChanged, NodeAttached, RootNodeChanged};
use crate::tree::{Node, Output, WeakNode};
use crate::types::Corners;
use crate::Result;

/// What the decorator's signal handlers need.
#[derive(Debug)]
struct Shared {
    ctx: Rc<DecoContext>,
    /// The active node and its ancestors, as of the last time they were marked.
    marked: RefCell<Vec<WeakNode>>,
}

/// Decorates the tree on an output.
///
/// # Lifecycle
///
/// Creating a `Decorator` with [`init`](Decorator::init) subscribes it to
/// the output, and decorates every tree already registered as a root.
/// From then on, every node the output announces through
/// [`Output::attach_node`] gets its decoration, which tears itself down
/// when its node is detached.
///
/// Calling [`finish`](Decorator::finish), or dropping the `Decorator`,
/// removes every decoration and gives the nodes their padding back.
#[derive(Debug)]
pub struct Decorator {
    shared: Rc<Shared>,
    #[debug(skip)]
    conns: Vec<Connection>,
    finished: bool,
}

impl Decorator {
    /// Starts decorating the tree on `output`.
    ///
    /// Returns an error if `config` does not hold up.
    #[instrument(level = "debug", skip_all)]
    pub fn init(output: &Output, config: DecorationConfig) -> Result<Self> {
        config.validate(no_checks)?;

        let shared = Rc::new(Shared {
            ctx: DecoContext::new(output.clone(), config),
            marked: RefCell::new(Vec::new()),
        });

        let signals = output.signals();
        let conns = vec![
            signals
                .view_node_attached
                .connect(hook(&shared, Shared::on_node_attached)),
            signals
                .container_node_attached
                .connect(hook(&shared, Shared::on_node_attached)),
            signals
                .active_node_changed
                .connect(hook(&shared, Shared::on_active_node_changed)),
            signals
                .root_node_changed
                .connect(hook(&shared, Shared::on_root_node_changed)),
        ];

        debug!("decorating output {}", output.name());
        for root in output.roots() {
            shared.decorate_tree(&root);
        }

        Ok(Self {
            shared,
            conns,
            finished: false,
        })
    }

    /// The output being decorated.
    pub fn output(&self) -> &Output {
        self.shared.ctx.output()
    }

    /// The state shared with every decoration.
    pub fn context(&self) -> &Rc<DecoContext> {
        &self.shared.ctx
    }

    /// The current configuration.
    pub fn config(&self) -> Rc<DecorationConfig> {
        self.shared.ctx.config()
    }

    /// Returns true once the decorator has torn everything down.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Decorates `node`, if it is not decorated yet.
    ///
    /// Nodes announced by the output are decorated automatically; this is
    /// for nodes the host created before the decorator existed.
    pub fn decorate_node(&self, node: &Node) {
        self.shared.decorate(node);
    }

    /// Decorates `root` and everything below it.
    pub fn decorate_tree(&self, root: &Node) {
        self.shared.decorate_tree(root);
    }

    /// Swaps in a new configuration, and lets every decoration know.
    #[instrument(level = "debug", skip_all)]
    pub fn reconfigure(&self, config: DecorationConfig) -> Result<()> {
        config.validate(no_checks)?;

        self.shared.ctx.replace_config(config);
        self.output().config_changed();
        Ok(())
    }

    /// Tears down every decoration.
    ///
    /// # Panics
    ///
    /// Finishing twice is a bug, and panics.
    #[instrument(level = "debug", skip_all)]
    pub fn finish(&mut self) {
        if self.finished {
            fatal!("decorator finished twice");
        }
        self.finished = true;

        for conn in self.conns.drain(..) {
            conn.disconnect();
        }
        self.shared.marked.borrow_mut().clear();

        debug!("finishing, {} decorations left", self.shared.ctx.finish().len());
        self.shared.ctx.finish().emit(&Finish);
    }
}

impl Drop for Decorator {
    fn drop(&mut self) {
        if !self.finished {
            self.finish();
        }
    }
}

/// Wraps a decorator handler into a signal slot holding a weak reference.
fn hook<T: 'static>(shared: &Rc<Shared>, handler: fn(&Shared, &T)) -> impl Fn(&T) + 'static {
    let weak = Rc::downgrade(shared);

    move |event: &T| match weak.upgrade() {
        Some(shared) => handler(&shared, event),
        None => fatal!("event delivered to a dropped decorator"),
    }
}

impl Shared {
    fn decorate(&self, node: &Node) {
        if node.has_data::<DecorationData>() {
            trace!("node {} is already decorated", node.id());
            return;
        }
        if node.is_detached() {
            warn!("not decorating detached node {}", node.id());
            return;
        }

        debug!("decorating node {}", node.id());
        if node.is_container() {
            ContainerDecoration::attach(&self.ctx, node);
        } else {
            WindowDecoration::attach(&self.ctx, node);
        }

        self.seed_corners(node);
        self.seed_active(node);
    }

    fn decorate_tree(&self, root: &Node) {
        self.decorate(root);
        for child in root.children() {
            self.decorate_tree(&child);
        }
    }

    /// Gives a freshly decorated node the corners it would have gotten,
    /// had it been decorated all along.
    fn seed_corners(&self, node: &Node) {
        let output = self.ctx.output();
        if output.is_root(node) {
            corners::set_outer_corners(node, Corners::ALL);
            return;
        }

        let anchor = node
            .ancestors()
            .into_iter()
            .find(|a| output.is_root(a) || a.has_data::<DecorationData>());

        match anchor {
            Some(root) if output.is_root(&root) => corners::set_outer_corners(&root, Corners::ALL),
            Some(ancestor) => corners::repropagate(&ancestor),
            None => trace!("node {} is not in a rooted tree yet", node.id()),
        }
    }

    fn seed_active(&self, node: &Node) {
        let Some(active) = self.ctx.output().active_node() else {
            return;
        };
        let Some(deco) = Decoration::of(node) else {
            return;
        };

        if active == *node {
            deco.set_active(true);
        } else if node.is_ancestor_of(&active) {
            deco.set_child_active(true);
        } else {
            return;
        }
        self.marked.borrow_mut().push(node.downgrade());
    }

    /// Moves the active marks from `old` to `new`.
    ///
    /// Everything is unmarked before anything is marked, and nodes that
    /// hold both `old` and `new` keep their mark throughout.
    fn propagate_active(&self, old: Option<&Node>, new: Option<&Node>) {
        if old == new {
            return;
        }

        // the last marked chain covers nodes that moved or left the tree
        let mut unmark: Vec<Node> = old.into_iter().cloned().collect();
        if let Some(old) = old {
            unmark.extend(old.ancestors());
        }
        let marked = std::mem::take(&mut *self.marked.borrow_mut());
        for node in marked.iter().filter_map(WeakNode::upgrade) {
            if !unmark.contains(&node) {
                unmark.push(node);
            }
        }

        for node in &unmark {
            let Some(deco) = Decoration::of(node) else {
                continue;
            };
            if Some(node) == old {
                deco.set_active(false);
            } else if new.is_some_and(|new| node.is_ancestor_of(new)) {
                trace!("node {} holds both, keeping its mark", node.id());
            } else {
                deco.set_child_active(false);
            }
        }

        let Some(new) = new else {
            return;
        };
        if let Some(deco) = Decoration::of(new) {
            deco.set_active(true);
        }
        let ancestors = new.ancestors();
        for ancestor in &ancestors {
            if let Some(deco) = Decoration::of(ancestor) {
                deco.set_child_active(true);
            }
        }

        let mut marked = self.marked.borrow_mut();
        marked.push(new.downgrade());
        marked.extend(ancestors.iter().map(Node::downgrade));
    }

    /*
     * Handlers
     */

    fn on_node_attached(&self, ev: &NodeAttached) {
        self.decorate(&ev.node);
    }

    fn on_active_node_changed(&self, ev: &ActiveNodeChanged) {
        debug!(
            "active node {:?} -> {:?}",
            ev.old.as_ref().map(Node::id),
            ev.new.as_ref().map(Node::id)
        );
        self.propagate_active(ev.old.as_ref(), ev.new.as_ref());
    }

    fn on_root_node_changed(&self, ev: &RootNodeChanged) {
        if let Some(old) = &ev.old {
            corners::clear_outer_corners(old);
        }
        if let Some(new) = &ev.new {
            corners::set_outer_corners(new, Corners::ALL);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::tree::{SplitMode, WorkspaceId};

    fn is_active_bearing(node: &Node) -> bool {
        Decoration::of(node).is_some_and(|d| d.is_active_bearing())
    }

    fn child_active(node: &Node) -> bool {
        match Decoration::of(node) {
            Some(Decoration::Container(deco)) => deco.borrow().has_active_descendant(),
            _ => false,
        }
    }

    #[test]
    fn test_decorates_attached_nodes() {
        let output = Output::new("test");
        let decorator = Decorator::init(&output, DecorationConfig::new()).unwrap();

        let root = Node::container(SplitMode::Horizontal);
        let win = Node::window("a");
        output.attach_node(&root);
        output.attach_node(&win);
        output.attach_node(&win);

        assert!(root.has_data::<DecorationData>());
        assert!(win.has_data::<DecorationData>());
        assert!(matches!(Decoration::of(&win), Some(Decoration::Window(_))));

        drop(decorator);
        assert!(!root.has_data::<DecorationData>());
        assert!(!win.has_data::<DecorationData>());
        assert!(output.signals().view_node_attached.is_empty());
    }

    #[test]
    fn test_init_decorates_existing_roots() {
        let output = Output::new("test");
        let root = Node::container(SplitMode::Horizontal);
        let (a, b) = (Node::window("a"), Node::window("b"));
        root.push_child(&a).unwrap();
        root.push_child(&b).unwrap();
        output.set_root(WorkspaceId(0), false, Some(&root));

        let _decorator = Decorator::init(&output, DecorationConfig::new()).unwrap();

        assert_eq!(corners::outer_corners(&root), Corners::ALL);
        assert_eq!(corners::outer_corners(&a), Corners::LEFT);
        assert_eq!(corners::outer_corners(&b), Corners::RIGHT);
    }

    #[test]
    fn test_active_moves_between_branches() {
        let output = Output::new("test");
        let _decorator = Decorator::init(&output, DecorationConfig::new()).unwrap();

        let root = Node::container(SplitMode::Horizontal);
        let (left, right) = (
            Node::container(SplitMode::Vertical),
            Node::container(SplitMode::Tabbed),
        );
        let (a, b) = (Node::window("a"), Node::window("b"));
        for node in [&root, &left, &right, &a, &b] {
            output.attach_node(node);
        }
        root.push_child(&left).unwrap();
        root.push_child(&right).unwrap();
        left.push_child(&a).unwrap();
        right.push_child(&b).unwrap();

        output.set_active_node(Some(&a));
        assert!(is_active_bearing(&a));
        assert!(child_active(&left));
        assert!(child_active(&root));
        assert!(!child_active(&right));

        output.set_active_node(Some(&b));
        assert!(!is_active_bearing(&a));
        assert!(!child_active(&left));
        assert!(child_active(&right));
        assert!(child_active(&root));

        // focusing a container takes the mark off its children
        output.set_active_node(Some(&right));
        assert!(!is_active_bearing(&b));
        assert!(!child_active(&right));
        assert!(is_active_bearing(&right));

        output.set_active_node(None);
        assert!(!is_active_bearing(&root));
    }

    #[test]
    fn test_late_decoration_seeds_active() {
        let output = Output::new("test");
        let root = Node::container(SplitMode::Horizontal);
        let win = Node::window("a");
        root.push_child(&win).unwrap();
        output.set_active_node(Some(&win));

        let decorator = Decorator::init(&output, DecorationConfig::new()).unwrap();
        decorator.decorate_tree(&root);

        assert!(is_active_bearing(&win));
        assert!(child_active(&root));
    }

    #[test]
    fn test_seeded_marks_clear_after_active_leaves() {
        let output = Output::new("test");
        let root = Node::container(SplitMode::Horizontal);
        let inner = Node::container(SplitMode::Vertical);
        let (a, b) = (Node::window("a"), Node::window("b"));
        root.push_child(&inner).unwrap();
        inner.push_child(&a).unwrap();
        root.push_child(&b).unwrap();
        output.set_root(WorkspaceId(0), false, Some(&root));
        output.set_active_node(Some(&a));

        let _decorator = Decorator::init(&output, DecorationConfig::new()).unwrap();
        assert!(child_active(&inner));

        a.detach().unwrap();
        output.set_active_node(Some(&b));

        assert!(!child_active(&inner));
        assert!(child_active(&root));
        assert!(is_active_bearing(&b));
    }

    #[test]
    fn test_reconfigure() {
        let output = Output::new("test");
        let decorator = Decorator::init(&output, DecorationConfig::new()).unwrap();

        let bad = DecorationConfig::builder().border_radius(-3);
        assert!(bad.finish(|_| Ok(())).is_err());

        let config = DecorationConfig::builder()
            .border_width(5)
            .finish(no_checks)
            .unwrap();
        decorator.reconfigure(config).unwrap();
        assert_eq!(decorator.config().border_width(), 5);
    }

    #[test]
    #[should_panic(expected = "finished twice")]
    fn test_double_finish_is_fatal() {
        let output = Output::new("test");
        let mut decorator = Decorator::init(&output, DecorationConfig::new()).unwrap();

        decorator.finish();
        assert!(decorator.is_finished());
        decorator.finish();
    }
}
