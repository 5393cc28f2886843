//! The decoration of a window: a border with rounded outer corners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use custom_debug_derive::Debug;
use glam::Mat4;
use strum::{Display, EnumIs};
use tracing::{debug, trace, warn};

use crate::config::ColorSet;
use crate::core::Region;
use crate::render::{HitTest, Mappable, Renderable, Renderer, Surface};
use crate::tree::node::{
    FullscreenChanged, GeometryChanged, NodeDetached, PaddingChanged, PreferredSplitChanged,
};
use crate::tree::output::ConfigChanged;
use crate::tree::{Node, NodeId, SplitMode, WeakNode};
use crate::types::{Corners, Padding, Point, Rectangle, Size};

use super::border::{Border, BorderColors, BorderSpec};
use super::{bind, corners, DecoContext, Decoration, DecorationData, Finish, Hook, Subscriptions};

/// The lifecycle of a [`WindowDecoration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
#[strum(serialize_all = "snake_case")]
pub enum WindowState {
    /// Created, but not bound to its node yet.
    Unattached,
    /// Bound, with the border shown.
    Visible,
    /// Bound, but the window is fullscreen and has no border.
    Hidden,
    /// Torn down. Nothing happens in this state anymore.
    Destroyed,
}

/// The decoration of a window.
#[derive(Debug)]
pub struct WindowDecoration {
    id: NodeId,
    node: WeakNode,
    #[debug(skip)]
    ctx: Rc<DecoContext>,
    state: WindowState,
    mapped: bool,
    active: bool,
    outer_corners: Corners,
    /// The outer geometry of the node, as of the last geometry change.
    geometry: Rectangle,
    border: Border,
    #[debug(skip)]
    subs: Subscriptions,
}

impl WindowDecoration {
    /// Decorates `node`, storing the decoration in its side table.
    ///
    /// The decoration starts out hidden if the window is fullscreen.
    pub fn attach(ctx: &Rc<DecoContext>, node: &Node) -> Rc<RefCell<Self>> {
        let geometry = node.geometry();
        let config = ctx.config();
        let border = Border::compute(BorderSpec {
            size: geometry.size,
            border_width: config.border_width(),
            corner_radius: config.border_radius(),
            outer_corners: Corners::NONE,
        });

        let deco = Rc::new(RefCell::new(Self {
            id: node.id(),
            node: node.downgrade(),
            ctx: Rc::clone(ctx),
            state: WindowState::Unattached,
            mapped: true,
            active: false,
            outer_corners: Corners::NONE,
            geometry,
            border,
            subs: Subscriptions::new(),
        }));

        let signals = node.signals();
        let mut subs = Subscriptions::new();
        subs.insert(
            Hook::Padding,
            signals.padding_changed.connect(bind(&deco, Self::on_padding_changed)),
        );
        subs.insert(
            Hook::PreferredSplit,
            signals
                .preferred_split_changed
                .connect(bind(&deco, Self::on_preferred_split_changed)),
        );
        subs.insert(
            Hook::Geometry,
            signals.geometry_changed.connect(bind(&deco, Self::on_geometry_changed)),
        );
        subs.insert(
            Hook::Detached,
            signals.detached.connect(bind(&deco, Self::on_detached)),
        );
        subs.insert(
            Hook::Fullscreen,
            signals.fullscreen_changed.connect(bind(&deco, Self::on_fullscreen_changed)),
        );
        subs.insert(
            Hook::Config,
            ctx.output()
                .signals()
                .config_changed
                .connect(bind(&deco, Self::on_config_changed)),
        );
        subs.insert(Hook::Finish, ctx.finish().connect(bind(&deco, Self::on_finish)));
        deco.borrow_mut().subs = subs;

        let data = DecorationData(Decoration::Window(Rc::clone(&deco)));
        if node.store_data(data).is_some() {
            warn!("window {}: replaced an existing decoration", node.id());
        }

        let target = if node.is_fullscreen() {
            WindowState::Hidden
        } else {
            WindowState::Visible
        };
        Self::transition(&deco, target);

        deco
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
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Returns true if the window is the active node.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The outer corners assigned to the window.
    pub fn outer_corners(&self) -> Corners {
        self.outer_corners
    }

    /// The laid out border, in surface-local coordinates.
    pub fn border(&self) -> &Border {
        &self.border
    }

    /// The region covered by the border, in surface-local coordinates.
    pub fn region(&self) -> &Region {
        self.border.region()
    }

    /// The region covered by the border on the output.
    pub fn output_region(&self) -> Region {
        self.border.region().translate(self.geometry.point)
    }

    /// The color set the border is drawn with.
    pub fn color_set(&self) -> ColorSet {
        if self.active {
            ColorSet::Focused
        } else {
            ColorSet::Unfocused
        }
    }

    /// The padding the decoration reserves on its node.
    pub fn padding(&self) -> Padding {
        if self.state.is_visible() {
            Padding::uniform(self.ctx.config().border_width())
        } else {
            Padding::zeroed()
        }
    }

    /// The decorated geometry needed to show `content`.
    pub fn expand_geometry(&self, content: Rectangle) -> Rectangle {
        content.grow(self.padding())
    }

    /// The content size left when decorating a window of size `target`.
    pub fn content_size(&self, target: Size) -> Size {
        let pad = self.padding();
        Size::new(
            (target.width - pad.left - pad.right).max(0),
            (target.height - pad.top - pad.bottom).max(0),
        )
    }

    fn border_colors(&self) -> BorderColors {
        let config = self.ctx.config();
        let colors = config.color_set(self.color_set());
        let mut ret = BorderColors::uniform(colors.child_border);

        match self.node().and_then(|n| n.preferred_split()) {
            Some(SplitMode::Horizontal) => ret.right = colors.indicator,
            Some(SplitMode::Vertical) => ret.bottom = colors.indicator,
            _ => {}
        }
        ret
    }

    fn recompute(&mut self) {
        let config = self.ctx.config();
        self.border = Border::compute(BorderSpec {
            size: self.geometry.size,
            border_width: config.border_width(),
            corner_radius: config.border_radius(),
            outer_corners: self.outer_corners,
        });
    }

    /*
     * State changes
     */

    /// Applies `f`, then recomputes the border and damages what it covered
    /// before and after, if `f` changed anything.
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
            d.recompute();
            damage.union(&d.output_region());

            if !d.state.is_visible() {
                return;
            }
            (Rc::clone(&d.ctx), damage)
        };

        ctx.output().damage_region(&damage);
    }

    /// Requests a redraw of the whole border.
    fn damage(deco: &Rc<RefCell<Self>>) {
        Self::update(deco, |_| true);
    }

    fn transition(deco: &Rc<RefCell<Self>>, target: WindowState) {
        let (from, id, ctx) = {
            let d = deco.borrow();
            (d.state, d.id, Rc::clone(&d.ctx))
        };
        if from == target {
            return;
        }
        let node = deco.borrow().node();
        let Some(node) = node else {
            fatal!("window {}: node dropped before its decoration", id)
        };

        debug!("window {}: {} -> {}", id, from, target);
        match target {
            WindowState::Visible => {
                deco.borrow_mut().state = target;

                let weak: Weak<RefCell<Self>> = Rc::downgrade(deco);
                let surface: Weak<RefCell<dyn Surface>> = weak;
                ctx.output().attach_surface(id, surface);
                node.set_padding(Padding::uniform(ctx.config().border_width()));
            }
            WindowState::Hidden => {
                Self::damage(deco);
                deco.borrow_mut().state = target;

                if from.is_visible() {
                    ctx.output().detach_surface(id);
                }
                node.set_padding(Padding::zeroed());
            }
            WindowState::Unattached | WindowState::Destroyed => {
                fatal!("window {}: cannot transition to {}", id, target)
            }
        }
        Self::damage(deco);
    }

    /// Marks the window as the active node, or not.
    pub fn set_active(deco: &Rc<RefCell<Self>>, active: bool) {
        Self::update(deco, |d| {
            let changed = d.active != active;
            d.active = active;
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

    fn on_padding_changed(deco: &Rc<RefCell<Self>>, ev: &PaddingChanged) {
        trace!("window {}: padding {:?} -> {:?}", deco.borrow().id, ev.old, ev.new);
        let node = deco.borrow().node();
        if let Some(node) = node {
            corners::repropagate(&node);
        }
    }

    fn on_preferred_split_changed(deco: &Rc<RefCell<Self>>, ev: &PreferredSplitChanged) {
        trace!("window {}: preferred split {} -> {}", deco.borrow().id, ev.old, ev.new);
        Self::damage(deco);
    }

    fn on_geometry_changed(deco: &Rc<RefCell<Self>>, ev: &GeometryChanged) {
        Self::update(deco, |d| {
            d.geometry = ev.new;
            true
        });
    }

    fn on_fullscreen_changed(deco: &Rc<RefCell<Self>>, ev: &FullscreenChanged) {
        let target = if ev.fullscreen {
            WindowState::Hidden
        } else {
            WindowState::Visible
        };
        Self::transition(deco, target);
    }

    fn on_config_changed(deco: &Rc<RefCell<Self>>, _: &ConfigChanged) {
        let (node, padding) = {
            let d = deco.borrow();
            (d.node(), d.padding())
        };
        let Some(node) = node else {
            return;
        };

        debug!("window {}: reconfiguring", node.id());
        node.set_padding(padding);
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
                fatal!("window {}: finalized twice", d.id);
            }
            d.subs.disconnect(trigger);
            (d.id, d.node(), Rc::clone(&d.ctx), d.state, d.output_region())
        };
        debug!("window {}: tearing down on {}", id, trigger);

        // keeps the decoration alive until we are done with it
        let data = node.as_ref().and_then(|n| n.erase_data::<DecorationData>());

        if state.is_visible() {
            ctx.output().detach_surface(id);
            ctx.output().damage_region(&damage);
        }

        {
            let mut d = deco.borrow_mut();
            d.unmap();
            let n = d.subs.disconnect_all();
            trace!("window {}: dropped {} subscriptions", id, n);
            d.state = WindowState::Destroyed;
        }

        if let Some(node) = node.filter(|n| !n.is_detached()) {
            node.set_padding(Padding::zeroed());
        }
        drop(data);
    }
}

impl Drop for WindowDecoration {
    fn drop(&mut self) {
        // the node went away without being detached
        if self.state.is_visible() {
            trace!("window {}: dropped while visible", self.id);
            self.ctx.output().detach_surface(self.id);
        }
    }
}

impl Mappable for WindowDecoration {
    fn is_mapped(&self) -> bool {
        self.mapped && self.state.is_visible()
    }

    fn size(&self) -> Size {
        self.geometry.size
    }

    fn unmap(&mut self) {
        self.mapped = false;
    }
}

impl HitTest for WindowDecoration {
    fn accepts_input(&self, x: i32, y: i32) -> bool {
        self.border.contains_point(Point::new(x, y))
    }
}

impl Renderable for WindowDecoration {
    fn render(&mut self, renderer: &mut dyn Renderer, origin: Point, transform: &Mat4) {
        self.border.render(renderer, self.border_colors(), origin, transform);
    }
}

impl Surface for WindowDecoration {
    fn offset(&self) -> Point {
        self.geometry.point
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::config::DecorationConfig;
    use crate::tree::Output;

    fn setup() -> (Rc<DecoContext>, Node) {
        let output = Output::new("test");
        let ctx = DecoContext::new(output, DecorationConfig::new());
        let node = Node::window("term");
        node.set_geometry(Rectangle::new(0, 0, 200, 100));
        (ctx, node)
    }

    #[test]
    fn test_attach_visible() {
        let (ctx, node) = setup();
        let deco = WindowDecoration::attach(&ctx, &node);

        assert!(deco.borrow().state().is_visible());
        assert!(deco.borrow().is_mapped());
        assert!(ctx.output().has_surface(node.id()));
        assert_eq!(node.padding(), Padding::uniform(2));
        assert!(node.has_data::<DecorationData>());
        assert_eq!(deco.borrow().offset(), Point::new(0, 0));
    }

    #[test]
    fn test_dropped_node_leaves_scene() {
        let (ctx, node) = setup();
        drop(WindowDecoration::attach(&ctx, &node));
        assert_eq!(ctx.output().surface_count(), 1);

        drop(node);
        assert_eq!(ctx.output().surface_count(), 0);
    }

    #[test]
    fn test_attach_fullscreen_hidden() {
        let (ctx, node) = setup();
        node.set_fullscreen(true).unwrap();

        let deco = WindowDecoration::attach(&ctx, &node);

        assert!(deco.borrow().state().is_hidden());
        assert!(!ctx.output().has_surface(node.id()));
        assert_eq!(node.padding(), Padding::zeroed());
    }

    #[test]
    fn test_fullscreen_toggles() {
        let (ctx, node) = setup();
        let deco = WindowDecoration::attach(&ctx, &node);

        node.set_fullscreen(true).unwrap();
        assert!(deco.borrow().state().is_hidden());
        assert_eq!(node.padding(), Padding::zeroed());

        node.set_fullscreen(false).unwrap();
        assert!(deco.borrow().state().is_visible());
        assert_eq!(node.padding(), Padding::uniform(2));
        assert!(ctx.output().has_surface(node.id()));
    }

    #[test]
    fn test_geometry_tracks_node() {
        let (ctx, node) = setup();
        let deco = WindowDecoration::attach(&ctx, &node);
        ctx.output().take_damage();

        node.set_geometry(Rectangle::new(10, 10, 300, 150));

        let d = deco.borrow();
        assert_eq!(d.size(), Size::new(300, 150));
        assert_eq!(d.offset(), Point::new(10, 10));
        assert_eq!(d.region().bounds(), Rectangle::new(0, 0, 300, 150));
        assert_eq!(d.output_region().bounds(), Rectangle::new(10, 10, 300, 150));

        let damage = ctx.output().take_damage();
        // both where the border was and where it is now
        assert!(damage.contains_point(Point::new(1, 50)));
        assert!(damage.contains_point(Point::new(11, 150)));
    }

    #[test]
    fn test_active_damages_on_change_only() {
        let (ctx, node) = setup();
        let deco = WindowDecoration::attach(&ctx, &node);
        ctx.output().take_damage();

        WindowDecoration::set_active(&deco, false);
        assert!(ctx.output().take_damage().is_empty());

        WindowDecoration::set_active(&deco, true);
        assert!(!ctx.output().take_damage().is_empty());
        assert_eq!(deco.borrow().color_set(), ColorSet::Focused);
    }

    #[test]
    fn test_expand_and_content_size() {
        let (ctx, node) = setup();
        let deco = WindowDecoration::attach(&ctx, &node);
        let d = deco.borrow();

        assert_eq!(
            d.expand_geometry(Rectangle::new(10, 10, 100, 100)),
            Rectangle::new(8, 8, 104, 104)
        );
        assert_eq!(d.content_size(Size::new(104, 104)), Size::new(100, 100));
        assert_eq!(d.content_size(Size::new(3, 3)), Size::new(0, 0));
    }

    #[test]
    fn test_detach_tears_down() {
        let (ctx, node) = setup();
        let deco = WindowDecoration::attach(&ctx, &node);
        let weak = Rc::downgrade(&deco);
        drop(deco);

        node.detach().unwrap();

        assert!(weak.upgrade().is_none());
        assert!(!node.has_data::<DecorationData>());
        assert!(!ctx.output().has_surface(node.id()));
        assert!(node.signals().geometry_changed.is_empty());
        assert!(node.signals().detached.is_empty());
        assert!(ctx.output().signals().config_changed.is_empty());
        assert!(ctx.finish().is_empty());
    }

    #[test]
    fn test_finish_releases_padding() {
        let (ctx, node) = setup();
        let deco = WindowDecoration::attach(&ctx, &node);

        ctx.finish().emit(&Finish);

        assert!(deco.borrow().state().is_destroyed());
        assert!(!deco.borrow().is_mapped());
        assert_eq!(node.padding(), Padding::zeroed());
        assert!(node.signals().padding_changed.is_empty());
    }

    #[test]
    #[should_panic(expected = "finalized twice")]
    fn test_double_finalize_is_fatal() {
        let (ctx, node) = setup();
        let deco = WindowDecoration::attach(&ctx, &node);

        WindowDecoration::finalize(&deco, Hook::Finish);
        WindowDecoration::finalize(&deco, Hook::Finish);
    }
}
