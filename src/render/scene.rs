use std::cell::RefCell;
use std::rc::Weak;

use glam::Mat4;
use indexmap::IndexMap;
use tracing::trace;

use crate::tree::NodeId;
use crate::types::Point;

use super::{Renderer, Surface};

/// The set of decoration surfaces attached to an output.
///
/// Surfaces are keyed by the node they decorate, and stacked in attach
/// order: the last one attached is on top. The scene does not own its
/// surfaces; a surface whose decoration is gone is skipped.
#[derive(Default)]
pub struct Scene {
    surfaces: IndexMap<NodeId, Weak<RefCell<dyn Surface>>>,
}

impl Scene {
    /// Creates a new, empty Scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a surface. Returns false if one was already attached for `id`.
    pub fn attach(&mut self, id: NodeId, surface: Weak<RefCell<dyn Surface>>) -> bool {
        if self.surfaces.contains_key(&id) {
            return false;
        }
        self.surfaces.insert(id, surface);
        true
    }

    /// Detaches a surface. Returns false if none was attached for `id`.
    pub fn detach(&mut self, id: NodeId) -> bool {
        self.surfaces.shift_remove(&id).is_some()
    }

    /// Returns true if a surface is attached for `id`.
    pub fn contains(&self, id: NodeId) -> bool {
        self.surfaces.contains_key(&id)
    }

    /// The number of attached surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Returns true if no surface is attached.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// The ids of every attached surface, bottom first.
    pub fn ids(&self) -> Vec<NodeId> {
        self.surfaces.keys().copied().collect()
    }

    /// Draws every mapped surface, bottom first.
    pub fn render(&self, renderer: &mut dyn Renderer, transform: &Mat4) {
        for (id, surface) in &self.surfaces {
            let Some(surface) = surface.upgrade() else {
                continue;
            };
            let mut surface = surface.borrow_mut();
            if !surface.is_mapped() {
                continue;
            }

            trace!("rendering surface of node {}", id);
            let origin = surface.offset();
            surface.render(renderer, origin, transform);
        }
    }

    /// Finds the topmost mapped surface accepting input at `pt`.
    pub fn surface_at(&self, pt: Point) -> Option<NodeId> {
        self.surfaces.iter().rev().find_map(|(id, surface)| {
            let surface = surface.upgrade()?;
            let surface = surface.borrow();

            let local = pt - surface.offset();
            (surface.is_mapped() && surface.accepts_input(local.x, local.y)).then_some(*id)
        })
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("surfaces", &self.surfaces.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::rc::Rc;

    use crate::core::Sector;
    use crate::render::{HitTest, LabelTexture, Mappable, Renderable};
    use crate::tree::Node;
    use crate::types::{Color, Rectangle, Size};

    struct Block {
        rect: Rectangle,
        mapped: bool,
    }

    impl Mappable for Block {
        fn is_mapped(&self) -> bool {
            self.mapped
        }

        fn size(&self) -> Size {
            self.rect.size
        }

        fn unmap(&mut self) {
            self.mapped = false;
        }
    }

    impl HitTest for Block {
        fn accepts_input(&self, x: i32, y: i32) -> bool {
            Rectangle::from_size(self.rect.size).contains_point(Point::new(x, y))
        }
    }

    impl Renderable for Block {
        fn render(&mut self, renderer: &mut dyn Renderer, origin: Point, transform: &Mat4) {
            renderer.draw_rect(Rectangle::from_size(self.rect.size).translate(origin), Color::default(), transform);
        }
    }

    impl Surface for Block {
        fn offset(&self) -> Point {
            self.rect.point
        }
    }

    #[derive(Default)]
    struct Rects(Vec<Rectangle>);

    impl Renderer for Rects {
        fn draw_rect(&mut self, rect: Rectangle, _: Color, _: &Mat4) {
            self.0.push(rect)
        }

        fn draw_sector(&mut self, _: &Sector, _: Color, _: &Mat4) {}

        fn rasterize_label(&mut self, _: &str, _: &str, _: Color, max: Size) -> LabelTexture {
            LabelTexture { id: 0, size: max }
        }

        fn draw_label(&mut self, _: &LabelTexture, _: Point, _: &Mat4) {}
    }

    fn block(x: i32, y: i32, mapped: bool) -> Rc<RefCell<Block>> {
        Rc::new(RefCell::new(Block {
            rect: Rectangle::new(x, y, 10, 10),
            mapped,
        }))
    }

    #[test]
    fn test_scene_stacking() {
        let (a, b) = (Node::window("a"), Node::window("b"));
        let (lower, upper) = (block(0, 0, true), block(5, 5, true));

        let mut scene = Scene::new();
        let lower_weak = Rc::downgrade(&lower) as Weak<RefCell<dyn Surface>>;
        let upper_weak = Rc::downgrade(&upper) as Weak<RefCell<dyn Surface>>;
        assert!(scene.attach(a.id(), lower_weak.clone()));
        assert!(!scene.attach(a.id(), lower_weak));
        assert!(scene.attach(b.id(), upper_weak));

        assert_eq!(scene.surface_at(Point::new(7, 7)), Some(b.id()));
        assert_eq!(scene.surface_at(Point::new(2, 2)), Some(a.id()));
        assert_eq!(scene.surface_at(Point::new(30, 30)), None);

        upper.borrow_mut().unmap();
        assert_eq!(scene.surface_at(Point::new(7, 7)), Some(a.id()));

        assert!(scene.detach(a.id()));
        assert!(!scene.detach(a.id()));
        assert_eq!(scene.ids(), vec![b.id()]);
    }

    #[test]
    fn test_scene_render_skips_unmapped_and_dropped() {
        let (a, b, c) = (Node::window("a"), Node::window("b"), Node::window("c"));
        let shown = block(20, 0, true);
        let hidden = block(0, 0, false);

        let mut scene = Scene::new();
        scene.attach(a.id(), Rc::downgrade(&shown) as Weak<RefCell<dyn Surface>>);
        scene.attach(b.id(), Rc::downgrade(&hidden) as Weak<RefCell<dyn Surface>>);
        {
            let gone = block(40, 0, true);
            scene.attach(c.id(), Rc::downgrade(&gone) as Weak<RefCell<dyn Surface>>);
        }

        let mut renderer = Rects::default();
        scene.render(&mut renderer, &Mat4::IDENTITY);

        assert_eq!(renderer.0, vec![Rectangle::new(20, 0, 10, 10)]);
    }
}
