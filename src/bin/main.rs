//! A scripted walk through tiledeco.
//!
//! This builds a small tree by hand, lays it out with a naive tiling
//! function standing in for a real layout engine, and pokes at it the way
//! a window manager would. The renderer only logs what it is asked to draw,
//! so run this with `RUST_LOG=trace` to see everything that happens.

use std::error::Error;

use glam::Mat4;
use tracing::{info, warn};
use tracing_subscriber::{fmt as logger, fmt::format::FmtSpan, EnvFilter};

use tiledeco::core::Sector;
use tiledeco::render::{LabelTexture, Renderer};
use tiledeco::tree::{Node, Output, SplitMode, WorkspaceId};
use tiledeco::types::{Color, Point, Rectangle, Size};
use tiledeco::{DecorationConfig, Decorator};

/// Logs every draw call instead of drawing.
#[derive(Debug, Default)]
struct TracingRenderer {
    next_label: u64,
    calls: usize,
}

impl Renderer for TracingRenderer {
    fn draw_rect(&mut self, rect: Rectangle, color: Color, _: &Mat4) {
        self.calls += 1;
        info!(target: "renderer", "rect {:?} in {}", rect, color.as_string());
    }

    fn draw_sector(&mut self, sector: &Sector, color: Color, _: &Mat4) {
        self.calls += 1;
        info!(target: "renderer", "sector at {:?} r={} in {}", sector.center, sector.outer_radius, color.as_string());
    }

    fn rasterize_label(&mut self, text: &str, font: &str, _: Color, max: Size) -> LabelTexture {
        self.next_label += 1;
        info!(target: "renderer", "rasterizing {:?} with {} into {:?}", text, font, max);

        // pretend every glyph is 7px wide
        let width = (text.chars().count() as i32 * 7).min(max.width);
        LabelTexture {
            id: self.next_label,
            size: Size::new(width, max.height.min(14)),
        }
    }

    fn draw_label(&mut self, label: &LabelTexture, at: Point, _: &Mat4) {
        self.calls += 1;
        info!(target: "renderer", "label #{} at {:?}", label.id, at);
    }

    fn release_label(&mut self, label: LabelTexture) {
        info!(target: "renderer", "releasing label #{}", label.id);
    }
}

/// Tiles `node` into `area`, the way a layout engine would.
fn layout(node: &Node, area: Rectangle) {
    node.set_geometry(area);

    let inner = node.inner_geometry();
    let children = node.children();
    if children.is_empty() {
        return;
    }

    let areas = match node.split_mode() {
        Some(SplitMode::Horizontal) => inner.split_vert_n(children.len()),
        Some(SplitMode::Vertical) => {
            let n = children.len() as i32;
            let height = inner.size.height / n;
            (0..n)
                .map(|i| {
                    let h = if i == n - 1 { inner.size.height - height * i } else { height };
                    Rectangle::new(inner.point.x, inner.point.y + height * i, inner.size.width, h)
                })
                .collect()
        }
        _ => vec![inner; children.len()],
    };

    for (child, area) in children.iter().zip(areas) {
        layout(child, area);
    }
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    logger::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .try_init()?;

    let screen = Rectangle::new(0, 0, 1920, 1080);
    let output = Output::new("HDMI-A-1");

    let config = DecorationConfig::builder()
        .border_width(3)
        .border_radius(10)
        .finish(|_| Ok(()))?;
    let mut decorator = Decorator::init(&output, config)?;

    let root = Node::container(SplitMode::Horizontal);
    output.attach_node(&root);
    output.set_root(WorkspaceId(1), false, Some(&root));

    let term = Node::window("terminal");
    let tabs = Node::container(SplitMode::Horizontal);
    for node in [&term, &tabs] {
        output.attach_node(node);
        root.push_child(node)?;
    }

    let pages: Vec<Node> = ["editor", "browser", "notes"]
        .into_iter()
        .map(Node::window)
        .collect();
    for page in &pages {
        output.attach_node(page);
        tabs.push_child(page)?;
    }

    layout(&root, screen);
    output.set_active_node(Some(&pages[1]));

    info!("switching the right side to tabs");
    tabs.set_split_mode(SplitMode::Tabbed)?;
    layout(&root, screen);

    let mut renderer = TracingRenderer::default();
    output.render(&mut renderer, &Mat4::IDENTITY);
    info!("first frame took {} draw calls", renderer.calls);

    pages[0].set_title("editor - main.rs");
    output.set_active_node(Some(&term));
    term.set_preferred_split(SplitMode::Vertical)?;
    output.render(&mut renderer, &Mat4::IDENTITY);

    let probe = Point::new(965, 5);
    match output.surface_at(probe) {
        Some(id) => info!("{:?} hits the decoration of {}", probe, id),
        None => warn!("{:?} hits nothing", probe),
    }

    info!("making the terminal fullscreen");
    term.set_fullscreen(true)?;
    term.set_fullscreen(true)?;
    layout(&root, screen);

    info!("thickening borders");
    decorator.reconfigure(
        DecorationConfig::builder()
            .border_width(6)
            .border_radius(10)
            .finish(|_| Ok(()))?,
    )?;
    layout(&root, screen);

    info!("closing the browser");
    pages[1].detach()?;
    layout(&root, screen);
    output.render(&mut renderer, &Mat4::IDENTITY);

    let damage = output.take_damage();
    info!("damage since the start covers {:?}", damage.bounds());

    decorator.finish();
    info!("{} surfaces left after finishing", output.surface_count());

    Ok(())
}
