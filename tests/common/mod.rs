#![allow(dead_code)]

use glam::Mat4;

use tiledeco::core::Sector;
use tiledeco::deco::Decoration;
use tiledeco::render::{LabelTexture, Renderer};
use tiledeco::tree::{Node, Output, SplitMode, WorkspaceId};
use tiledeco::types::{Color, Corners, Point, Rectangle, Size};
use tiledeco::{DecorationConfig, Decorator};

/// Records every call it gets.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next: u64,
    pub rects: Vec<(Rectangle, Color)>,
    pub sectors: Vec<Sector>,
    pub rasterized: Vec<String>,
    pub labels: Vec<(u64, Point)>,
    pub released: Vec<u64>,
}

impl RecordingRenderer {
    pub fn clear_draws(&mut self) {
        self.rects.clear();
        self.sectors.clear();
        self.labels.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn draw_rect(&mut self, rect: Rectangle, color: Color, _: &Mat4) {
        self.rects.push((rect, color));
    }

    fn draw_sector(&mut self, sector: &Sector, _: Color, _: &Mat4) {
        self.sectors.push(*sector);
    }

    fn rasterize_label(&mut self, text: &str, _: &str, _: Color, max: Size) -> LabelTexture {
        self.next += 1;
        self.rasterized.push(text.to_string());
        LabelTexture {
            id: self.next,
            size: Size::new(max.width.min(50), max.height.min(12)),
        }
    }

    fn draw_label(&mut self, label: &LabelTexture, at: Point, _: &Mat4) {
        self.labels.push((label.id, at));
    }

    fn release_label(&mut self, label: LabelTexture) {
        self.released.push(label.id);
    }
}

pub fn setup() -> (Output, Decorator) {
    setup_with(DecorationConfig::new())
}

pub fn setup_with(config: DecorationConfig) -> (Output, Decorator) {
    let output = Output::new("test");
    let decorator = Decorator::init(&output, config).expect("default config is valid");
    (output, decorator)
}

/// Creates a container registered as the tiled root of workspace 0.
pub fn root(output: &Output, mode: SplitMode) -> Node {
    let root = Node::container(mode);
    output.attach_node(&root);
    output.set_root(WorkspaceId(0), false, Some(&root));
    root.set_geometry(Rectangle::new(0, 0, 1200, 800));
    root
}

pub fn window(output: &Output, parent: &Node, title: &str) -> Node {
    let node = Node::window(title);
    output.attach_node(&node);
    parent.push_child(&node).expect("parent is a container");
    node
}

pub fn container(output: &Output, parent: &Node, mode: SplitMode) -> Node {
    let node = Node::container(mode);
    output.attach_node(&node);
    parent.push_child(&node).expect("parent is a container");
    node
}

pub fn corners(node: &Node) -> Corners {
    Decoration::of(node)
        .map(|d| d.outer_corners())
        .expect("node is decorated")
}

pub fn tab_titles(node: &Node) -> Vec<String> {
    match Decoration::of(node) {
        Some(Decoration::Container(deco)) => deco
            .borrow()
            .tabs()
            .titles()
            .into_iter()
            .map(String::from)
            .collect(),
        _ => panic!("{:?} has no container decoration", node),
    }
}

pub fn child_titles(node: &Node) -> Vec<String> {
    node.children().iter().map(Node::title).collect()
}

pub fn has_active_descendant(node: &Node) -> bool {
    match Decoration::of(node) {
        Some(Decoration::Container(deco)) => deco.borrow().has_active_descendant(),
        _ => panic!("{:?} has no container decoration", node),
    }
}

pub fn is_active(node: &Node) -> bool {
    match Decoration::of(node) {
        Some(Decoration::Container(deco)) => deco.borrow().is_active(),
        Some(Decoration::Window(deco)) => deco.borrow().is_active(),
        None => panic!("{:?} is not decorated", node),
    }
}

/// Tiles `node` into `area`, standing in for the host's layout engine.
pub fn layout(node: &Node, area: Rectangle) {
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

/// Every node in the subtree below `root`, depth first.
pub fn walk(root: &Node) -> Vec<Node> {
    let mut ret = vec![root.clone()];
    for child in root.children() {
        ret.extend(walk(&child));
    }
    ret
}
