//! The decoration of a container: a title bar with one tab per child.
//!
//! The bar is only shown for tabbed containers, and only if title bars are
//! enabled. It sits right above the content of the container, in the space
//! the decoration reserves as top padding.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use custom_debug_derive::Debug;
use glam::Mat4;
use strum::{Display, EnumIs};
use tracing::{debug, trace, warn};

use crate::config::{ColorSet, DecorationColors, DecorationConfig};
use crate::core::{Connection, Region};
use crate::render::{HitTest, Mappable, Renderable, Renderer, Surface};
use crate::tree::node::{
    ChildInserted, ChildRemoved, ChildSwapped, ChildrenSwapped, GeometryChanged, NodeDetached,
    PaddingChanged, SplitModeChanged, TitleChanged,
};
use crate::tree::output::ConfigChanged;
use crate::tree::{Node, NodeId, SplitMode, WeakNode};
use crate::types::{Corners, Padding, Point, Rectangle, Size};

use super::tabs::TabBar;
use super::{bind, corners, DecoContext, Decoration, DecorationData, Finish, Hook, Subscriptions};

/// Whether a container shows its title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
#[strum(serialize_all = "snake_case")]
pub enum ContainerState {
    /// No title bar, and no space reserved for it.
    Hidden,
    /// The title bar is shown above the content.
    Visible,
    /// Torn down. Nothing happens in this state anymore.
    Destroyed,
}

impl ContainerState {
    /// The state a container laid out with `mode` should be in.
    pub fn for_mode(mode: SplitMode, config: &DecorationConfig) -> Self {
        if mode.is_tabbed() && config.title_bar() {
            Self::Visible
        } else {
            Self::Hidden
        }
    }
}

/// The decoration of a container.
#[derive(Debug)]
pub struct ContainerDecoration {
    id: NodeId,
    node: WeakNode,
    #[debug(skip)]
    ctx: Rc<DecoContext>,
    state: ContainerState,
    mapped: bool,
    active: bool,
    has_active_descendant: bool,
    outer_corners: Corners,
    /// Where the bar sits on the output.
    bar: Rectangle,
    sized: bool,
    tabs: TabBar,
    /// Ignore padding changes, as we are making them ourselves.
    padding_hook_enabled: bool,
    /// One title subscription per child, in child order.
    #[debug(skip)]
    titles: Vec<Connection>,
    #[debug(skip)]
    subs: Subscriptions,
}

impl ContainerDecoration {
    /// Decorates `node`, storing the decoration in its side table.
    pub fn attach(ctx: &Rc<DecoContext>, node: &Node) -> Rc<RefCell<Self>> {
        let children = node.children();
        let mut tabs = TabBar::new();
        tabs.rebuild(children.iter().map(Node::title));

        let deco = Rc::new(RefCell::new(Self {
            id: node.id(),
            node: node.downgrade(),
            ctx: Rc::clone(ctx),
            state: ContainerState::Hidden,
            mapped: true,
            active: false,
            has_active_descendant: false,
            outer_corners: Corners::NONE,
            bar: Rectangle::zeroed(),
            sized: false,
            tabs,
            padding_hook_enabled: true,
            titles: Vec::new(),
            subs: Subscriptions::new(),
        }));

        let titles: Vec<Connection> = children
            .iter()
            .map(|child| Self::watch_title(&deco, child))
            .collect();

        let signals = node.signals();
        let mut subs = Subscriptions::new();
        subs.insert(
            Hook::Geometry,
            signals.geometry_changed.connect(bind(&deco, Self::on_geometry_changed)),
        );
        subs.insert(
            Hook::Padding,
            signals.padding_changed.connect(bind(&deco, Self::on_padding_changed)),
        );
        subs.insert(
            Hook::SplitMode,
            signals.split_mode_changed.connect(bind(&deco, Self::on_split_mode_changed)),
        );
        subs.insert(
            Hook::ChildInserted,
            signals.child_inserted.connect(bind(&deco, Self::on_child_inserted)),
        );
        subs.insert(
            Hook::ChildRemoved,
            signals.child_removed.connect(bind(&deco, Self::on_child_removed)),
        );
        subs.insert(
            Hook::ChildSwapped,
            signals.child_swapped.connect(bind(&deco, Self::on_child_swapped)),
        );
        subs.insert(
            Hook::ChildrenSwapped,
            signals.children_swapped.connect(bind(&deco, Self::on_children_swapped)),
        );
        subs.insert(
            Hook::Detached,
            signals.detached.connect(bind(&deco, Self::on_detached)),
        );
        subs.insert(
            Hook::Config,
            ctx.output()
                .signals()
                .config_changed
                .connect(bind(&deco, Self::on_config_changed)),
        );
        subs.insert(Hook::Finish, ctx.finish().connect(bind(&deco, Self::on_finish)));
        {
            let mut d = deco.borrow_mut();
            d.subs = subs;
            d.titles = titles;
        }

        let data = DecorationData(Decoration::Container(Rc::clone(&deco)));
        if node.store_data(data).is_some() {
            warn!("container {}: replaced an existing decoration", node.id());
        }

        let mode = node.split_mode().unwrap_or(SplitMode::Horizontal);
        Self::transition(&deco, ContainerState::for_mode(mode, &ctx.config()));
        Self::resize(&deco);

        deco
    }

    fn watch_title(deco: &Rc<RefCell<Self>>, child: &Node) -> Connection {
        child
            .signals()
            .title_changed
            .connect(bind(deco, Self::on_title_changed))
    }

    /*
     * Accessors
     */

    /// The id of the decorated node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The decorated node, if it is still around.
    pub fn node(&self) -> Option<Node> {
        self.node.upgrade()
    }

    /// The current state.
    pub fn state(&self) -> ContainerState {
        self.state
    }

    /// Returns true if the container itself is the active node.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if the active node lies somewhere below the container.
    pub fn has_active_descendant(&self) -> bool {
        self.has_active_descendant
    }

    /// The outer corners assigned to the container.
    pub fn outer_corners(&self) -> Corners {
        self.outer_corners
    }

    /// The tabs, one per child.
    pub fn tabs(&self) -> &TabBar {
        &self.tabs
    }

    /// Where the title bar sits on the output.
    pub fn bar(&self) -> Rectangle {
        self.bar
    }

    /// The region covered by the title bar, in surface-local coordinates.
    pub fn region(&self) -> Region {
        if self.state.is_visible() {
            Region::from(Rectangle::from_size(self.bar.size))
        } else {
            Region::new()
        }
    }

    /// The region covered by the title bar on the output.
    pub fn output_region(&self) -> Region {
        self.region().translate(self.bar.point)
    }

    /// The color set the bar is drawn with.
    pub fn color_set(&self) -> ColorSet {
        if self.active {
            ColorSet::Focused
        } else if self.has_active_descendant {
            ColorSet::FocusedInactive
        } else {
            ColorSet::Unfocused
        }
    }

    /// The padding the decoration reserves on its node.
    pub fn padding(&self) -> Padding {
        if self.state.is_visible() {
            Padding::top(self.ctx.config().title_bar_height())
        } else {
            Padding::zeroed()
        }
    }

    /// The colors of every tab, in order.
    fn tab_colors(&self, config: &DecorationConfig) -> Vec<DecorationColors> {
        let Some(node) = self.node() else {
            return Vec::new();
        };

        node.children()
            .iter()
            .map(|child| {
                let bearing = Decoration::of(child).is_some_and(|d| d.is_active_bearing());
                let set = if self.active || bearing {
                    ColorSet::Focused
                } else {
                    ColorSet::Unfocused
                };
                *config.color_set(set)
            })
            .collect()
    }

    /*
     * State changes
     */

    /// Applies `f`, then damages what the bar covered before and after,
    /// if `f` changed anything.
    fn update<F>(deco: &Rc<RefCell<Self>>, f: F)
    where
        F: FnOnce(&mut Self) -> bool,
    {
        let (ctx, damage) = {
            let mut d = deco.borrow_mut();
            let mut damage = d.output_region();
            if !f(&mut *d) {
                return;
            }
            damage.union(&d.output_region());
            (Rc::clone(&d.ctx), damage)
        };

        if !damage.is_empty() {
            ctx.output().damage_region(&damage);
        }
    }

    /// Requests a redraw of the whole bar.
    pub(crate) fn damage(deco: &Rc<RefCell<Self>>) {
        Self::update(deco, |_| true);
    }

    fn live_node(deco: &Rc<RefCell<Self>>) -> Node {
        let (id, node) = {
            let d = deco.borrow();
            (d.id, d.node())
        };
        match node {
            Some(node) => node,
            None => fatal!("container {}: node dropped before its decoration", id),
        }
    }

    /// Sets the padding of the node without reacting to it.
    fn reserve_padding(deco: &Rc<RefCell<Self>>, node: &Node) {
        let padding = deco.borrow().padding();

        deco.borrow_mut().padding_hook_enabled = false;
        node.set_padding(padding);
        deco.borrow_mut().padding_hook_enabled = true;
    }

    /// Places the bar above the content of the node.
    fn resize(deco: &Rc<RefCell<Self>>) {
        let node = Self::live_node(deco);
        let inner = node.inner_geometry();
        let height = deco.borrow().ctx.config().title_bar_height();

        Self::update(deco, |d| {
            d.bar = Rectangle::new(inner.point.x, inner.point.y - height, inner.size.width, height);
            d.sized = true;
            true
        });
    }

    fn transition(deco: &Rc<RefCell<Self>>, target: ContainerState) {
        let (from, id, ctx) = {
            let d = deco.borrow();
            (d.state, d.id, Rc::clone(&d.ctx))
        };
        if from == target {
            return;
        }
        let node = Self::live_node(deco);

        debug!("container {}: {} -> {}", id, from, target);
        match target {
            ContainerState::Visible => {
                deco.borrow_mut().state = target;

                let weak: Weak<RefCell<Self>> = Rc::downgrade(deco);
                let surface: Weak<RefCell<dyn Surface>> = weak;
                ctx.output().attach_surface(id, surface);
            }
            ContainerState::Hidden => {
                Self::damage(deco);
                deco.borrow_mut().state = target;
                ctx.output().detach_surface(id);
            }
            ContainerState::Destroyed => {
                fatal!("container {}: cannot transition to {}", id, target)
            }
        }

        Self::reserve_padding(deco, &node);
        Self::resize(deco);
        corners::repropagate(&node);
    }

    /// Marks the container as the active node, or not.
    pub fn on_set_active(deco: &Rc<RefCell<Self>>, active: bool) {
        Self::update(deco, |d| {
            let changed = d.active != active;
            d.active = active;
            changed
        });
    }

    /// Marks the container as holding the active node, or not.
    pub fn on_set_child_active(deco: &Rc<RefCell<Self>>, active: bool) {
        Self::update(deco, |d| {
            let changed = d.has_active_descendant != active;
            d.has_active_descendant = active;
            changed
        });
    }

    pub(crate) fn apply_outer_corners(deco: &Rc<RefCell<Self>>, mask: Corners) {
        Self::update(deco, |d| {
            let changed = d.outer_corners != mask;
            d.outer_corners = mask;
            changed
        });
    }

    /*
     * Handlers
     */

    fn on_geometry_changed(deco: &Rc<RefCell<Self>>, ev: &GeometryChanged) {
        if ev.old == ev.new && deco.borrow().sized {
            trace!("container {}: geometry unchanged", deco.borrow().id);
            return;
        }
        Self::resize(deco);
    }

    fn on_padding_changed(deco: &Rc<RefCell<Self>>, _: &PaddingChanged) {
        if !deco.borrow().padding_hook_enabled {
            return;
        }
        let node = Self::live_node(deco);

        Self::resize(deco);
        corners::repropagate(&node);
    }

    fn on_split_mode_changed(deco: &Rc<RefCell<Self>>, ev: &SplitModeChanged) {
        let config = deco.borrow().ctx.config();
        let node = Self::live_node(deco);

        Self::transition(deco, ContainerState::for_mode(ev.new, &config));
        corners::repropagate(&node);
        Self::damage(deco);
    }

    fn on_child_inserted(deco: &Rc<RefCell<Self>>, ev: &ChildInserted) {
        let node = Self::live_node(deco);

        deco.borrow_mut().tabs.insert(ev.index, ev.node.title());
        let conn = Self::watch_title(deco, &ev.node);
        deco.borrow_mut().titles.insert(ev.index, conn);

        corners::repropagate(&node);
        Self::damage(deco);
    }

    fn on_child_removed(deco: &Rc<RefCell<Self>>, ev: &ChildRemoved) {
        let node = Self::live_node(deco);

        let conn = {
            let mut d = deco.borrow_mut();
            if ev.index >= d.titles.len() {
                fatal!("container {}: no tab for removed child {}", d.id, ev.index);
            }
            d.titles.remove(ev.index)
        };
        conn.disconnect();
        deco.borrow_mut().tabs.remove(ev.index);

        corners::clear_outer_corners(&ev.node);
        corners::repropagate(&node);
        Self::damage(deco);
    }

    fn on_child_swapped(deco: &Rc<RefCell<Self>>, ev: &ChildSwapped) {
        let node = Self::live_node(deco);

        let conn = Self::watch_title(deco, &ev.new);
        let old = {
            let mut d = deco.borrow_mut();
            if ev.index >= d.titles.len() {
                fatal!("container {}: no tab for swapped child {}", d.id, ev.index);
            }
            let old = std::mem::replace(&mut d.titles[ev.index], conn);
            d.tabs.remove(ev.index);
            d.tabs.insert(ev.index, ev.new.title());
            old
        };
        old.disconnect();

        corners::clear_outer_corners(&ev.old);
        if ev.index == 0 || ev.index + 1 == node.child_count() {
            corners::repropagate(&node);
        } else {
            corners::clear_outer_corners(&ev.new);
        }
        Self::damage(deco);
    }

    fn on_children_swapped(deco: &Rc<RefCell<Self>>, ev: &ChildrenSwapped) {
        let node = Self::live_node(deco);

        {
            let mut d = deco.borrow_mut();
            d.tabs.swap(ev.a, ev.b);
            d.titles.swap(ev.a, ev.b);
        }

        corners::repropagate(&node);
        Self::damage(deco);
    }

    fn on_title_changed(deco: &Rc<RefCell<Self>>, ev: &TitleChanged) {
        let node = Self::live_node(deco);

        let Some(index) = node.index_of(&ev.node) else {
            warn!("container {}: title change from {}, which is not a child", node.id(), ev.node.id());
            return;
        };
        deco.borrow_mut().tabs.update_title(index, ev.title.clone());
        Self::damage(deco);
    }

    fn on_config_changed(deco: &Rc<RefCell<Self>>, _: &ConfigChanged) {
        let node = Self::live_node(deco);
        let config = deco.borrow().ctx.config();
        debug!("container {}: reconfiguring", node.id());

        let mode = node.split_mode().unwrap_or(SplitMode::Horizontal);
        Self::transition(deco, ContainerState::for_mode(mode, &config));

        // the bar height may have changed
        Self::reserve_padding(deco, &node);
        deco.borrow_mut().tabs.invalidate_all();
        Self::resize(deco);
        node.refresh_geometry();
        Self::damage(deco);
    }

    fn on_detached(deco: &Rc<RefCell<Self>>, _: &NodeDetached) {
        Self::finalize(deco, Hook::Detached);
    }

    fn on_finish(deco: &Rc<RefCell<Self>>, _: &Finish) {
        Self::finalize(deco, Hook::Finish);
    }

    /// Tears the decoration down.
    ///
    /// `trigger` is disconnected before anything else happens.
    fn finalize(deco: &Rc<RefCell<Self>>, trigger: Hook) {
        let (id, node, ctx, state, damage) = {
            let mut d = deco.borrow_mut();
            if d.state.is_destroyed() {
                fatal!("container {}: finalized twice", d.id);
            }
            d.subs.disconnect(trigger);
            (d.id, d.node(), Rc::clone(&d.ctx), d.state, d.output_region())
        };
        debug!("container {}: tearing down on {}", id, trigger);

        // keeps the decoration alive until we are done with it
        let data = node.as_ref().and_then(|n| n.erase_data::<DecorationData>());

        if state.is_visible() {
            ctx.output().detach_surface(id);
            ctx.output().damage_region(&damage);
        }

        {
            let mut d = deco.borrow_mut();
            d.unmap();
            for conn in d.titles.drain(..) {
                conn.disconnect();
            }
            let n = d.subs.disconnect_all();
            trace!("container {}: dropped {} subscriptions", id, n);
            d.state = ContainerState::Destroyed;
        }

        if let Some(node) = node.filter(|n| !n.is_detached()) {
            node.set_padding(Padding::zeroed());
        }
        drop(data);
    }
}

impl Drop for ContainerDecoration {
    fn drop(&mut self) {
        for conn in self.titles.drain(..) {
            conn.disconnect();
        }
        // the node went away without being detached
        if self.state.is_visible() {
            trace!("container {}: dropped while visible", self.id);
            self.ctx.output().detach_surface(self.id);
        }
    }
}

impl Mappable for ContainerDecoration {
    fn is_mapped(&self) -> bool {
        self.mapped && self.state.is_visible()
    }

    fn size(&self) -> Size {
        self.bar.size
    }

    fn unmap(&mut self) {
        self.mapped = false;
    }
}

impl HitTest for ContainerDecoration {
    fn accepts_input(&self, x: i32, y: i32) -> bool {
        self.region().contains_point(Point::new(x, y))
    }
}

impl Renderable for ContainerDecoration {
    fn render(&mut self, renderer: &mut dyn Renderer, origin: Point, transform: &Mat4) {
        let config = self.ctx.config();
        let bar = Rectangle::from_size(self.bar.size).translate(origin);

        let colors = config.color_set(self.color_set());
        renderer.draw_rect(bar, colors.background, transform);

        let tab_colors = self.tab_colors(&config);
        self.tabs
            .render(renderer, bar, config.title_font(), &tab_colors, transform);
    }
}

impl Surface for ContainerDecoration {
    fn offset(&self) -> Point {
        self.bar.point
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::tree::Output;

    fn setup(mode: SplitMode, children: &[&str]) -> (Rc<DecoContext>, Node, Vec<Node>) {
        let ctx = DecoContext::new(Output::new("test"), DecorationConfig::new());
        let node = Node::container(mode);
        node.set_geometry(Rectangle::new(0, 0, 300, 200));

        let kids: Vec<Node> = children.iter().map(|t| Node::window(*t)).collect();
        for kid in &kids {
            node.push_child(kid).unwrap();
        }
        (ctx, node, kids)
    }

    #[test]
    fn test_hidden_unless_tabbed() {
        let (ctx, node, _) = setup(SplitMode::Horizontal, &["a", "b"]);
        let deco = ContainerDecoration::attach(&ctx, &node);

        assert!(deco.borrow().state().is_hidden());
        assert_eq!(node.padding(), Padding::zeroed());
        assert!(!ctx.output().has_surface(node.id()));
        assert!(deco.borrow().region().is_empty());
        // tabs are tracked even while hidden
        assert_eq!(deco.borrow().tabs().titles(), ["a", "b"]);
    }

    #[test]
    fn test_dropped_node_leaves_scene() {
        let (ctx, node, kids) = setup(SplitMode::Tabbed, &["a", "b"]);
        drop(ContainerDecoration::attach(&ctx, &node));
        assert_eq!(ctx.output().surface_count(), 1);

        drop(node);
        assert_eq!(ctx.output().surface_count(), 0);
        assert!(kids[0].signals().title_changed.is_empty());
    }

    #[test]
    fn test_tabbed_reserves_bar() {
        let (ctx, node, _) = setup(SplitMode::Tabbed, &["a", "b"]);
        let deco = ContainerDecoration::attach(&ctx, &node);

        let d = deco.borrow();
        assert!(d.state().is_visible());
        assert_eq!(node.padding(), Padding::top(24));
        assert_eq!(d.bar(), Rectangle::new(0, 0, 300, 24));
        assert_eq!(node.inner_geometry(), Rectangle::new(0, 24, 300, 176));
        assert!(ctx.output().has_surface(node.id()));
        assert!(d.accepts_input(299, 23));
        assert!(!d.accepts_input(10, 24));
    }

    #[test]
    fn test_title_bar_disabled() {
        let config = DecorationConfig::builder()
            .title_bar(false)
            .finish(crate::config::no_checks)
            .unwrap();
        let ctx = DecoContext::new(Output::new("test"), config);
        let node = Node::container(SplitMode::Tabbed);

        let deco = ContainerDecoration::attach(&ctx, &node);
        assert!(deco.borrow().state().is_hidden());
    }

    #[test]
    fn test_split_mode_transitions() {
        let (ctx, node, _) = setup(SplitMode::Horizontal, &["a"]);
        let deco = ContainerDecoration::attach(&ctx, &node);

        node.set_split_mode(SplitMode::Tabbed).unwrap();
        assert!(deco.borrow().state().is_visible());
        assert_eq!(node.padding(), Padding::top(24));

        node.set_split_mode(SplitMode::Stacked).unwrap();
        assert!(deco.borrow().state().is_hidden());
        assert_eq!(node.padding(), Padding::zeroed());
        assert!(!ctx.output().has_surface(node.id()));
    }

    #[test]
    fn test_tabs_follow_children() {
        let (ctx, node, kids) = setup(SplitMode::Tabbed, &["a", "b", "c"]);
        let deco = ContainerDecoration::attach(&ctx, &node);

        let d = Node::window("d");
        node.insert_child(1, &d).unwrap();
        node.remove_child(&kids[0]).unwrap();
        node.swap_children(0, 2).unwrap();

        let e = Node::window("e");
        node.replace_child(&kids[1], &e).unwrap();

        let expected: Vec<String> = node.children().iter().map(Node::title).collect();
        assert_eq!(deco.borrow().tabs().titles(), expected);
        assert_eq!(deco.borrow().tabs().titles(), ["c", "e", "d"]);

        // only current children are watched
        kids[0].set_title("gone");
        kids[1].set_title("gone too");
        d.set_title("D");
        assert_eq!(deco.borrow().tabs().titles(), ["c", "e", "D"]);
        assert!(kids[0].signals().title_changed.is_empty());
    }

    #[test]
    fn test_geometry_moves_bar() {
        let (ctx, node, _) = setup(SplitMode::Tabbed, &["a"]);
        let deco = ContainerDecoration::attach(&ctx, &node);
        ctx.output().take_damage();

        node.refresh_geometry();
        assert!(ctx.output().take_damage().is_empty());

        node.set_geometry(Rectangle::new(50, 50, 200, 100));
        assert_eq!(deco.borrow().bar(), Rectangle::new(50, 50, 200, 24));
        assert_eq!(deco.borrow().offset(), Point::new(50, 50));

        let damage = ctx.output().take_damage();
        assert!(damage.contains_point(Point::new(5, 5)));
        assert!(damage.contains_point(Point::new(55, 55)));
    }

    #[test]
    fn test_active_color_sets() {
        let (ctx, node, _) = setup(SplitMode::Tabbed, &["a"]);
        let deco = ContainerDecoration::attach(&ctx, &node);
        ctx.output().take_damage();

        assert_eq!(deco.borrow().color_set(), ColorSet::Unfocused);

        ContainerDecoration::on_set_child_active(&deco, true);
        assert_eq!(deco.borrow().color_set(), ColorSet::FocusedInactive);
        assert!(!ctx.output().take_damage().is_empty());

        ContainerDecoration::on_set_child_active(&deco, true);
        assert!(ctx.output().take_damage().is_empty());

        ContainerDecoration::on_set_active(&deco, true);
        assert_eq!(deco.borrow().color_set(), ColorSet::Focused);
    }

    #[test]
    fn test_detach_disconnects_titles() {
        let (ctx, node, kids) = setup(SplitMode::Tabbed, &["a", "b"]);
        let deco = ContainerDecoration::attach(&ctx, &node);
        let weak = Rc::downgrade(&deco);
        drop(deco);

        node.detach().unwrap();

        assert!(weak.upgrade().is_none());
        assert!(!ctx.output().has_surface(node.id()));
        for kid in &kids {
            assert!(kid.signals().title_changed.is_empty());
        }
        assert!(node.signals().child_inserted.is_empty());
    }

    #[test]
    fn test_dropped_node_disconnects_titles() {
        let (ctx, node, kids) = setup(SplitMode::Tabbed, &["a"]);
        let _deco = ContainerDecoration::attach(&ctx, &node);
        drop(_deco);

        // the container goes away without being detached
        drop(node);

        assert!(kids[0].signals().title_changed.is_empty());
        assert!(ctx.output().signals().config_changed.is_empty());
    }
}
