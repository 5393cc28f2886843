mod common;

use glam::Mat4;
use test_log::test;

use tiledeco::deco::{ContainerState, Decoration};
use tiledeco::tree::{Node, SplitMode};
use tiledeco::types::{Corners, Padding, Point, Rectangle};

use common::*;

/// Only the first and last child of a root carry its corners.
fn assert_boundary_corners(root: &Node, step: usize) {
    let kids = root.children();
    let last = kids.len().saturating_sub(1);
    for (i, kid) in kids.iter().enumerate() {
        let expected = match (i == 0, i == last) {
            (true, true) => Corners::ALL,
            (true, false) => Corners::LEFT,
            (false, true) => Corners::RIGHT,
            (false, false) => Corners::NONE,
        };
        assert_eq!(corners(kid), expected, "child {} after step {}", i, step);
    }
}

fn state(node: &Node) -> ContainerState {
    match Decoration::of(node) {
        Some(Decoration::Container(deco)) => deco.borrow().state(),
        _ => panic!("not a container"),
    }
}

#[test]
fn switching_to_tabbed_shows_every_child() {
    let (output, _decorator) = setup();
    let root = root(&output, SplitMode::Horizontal);
    for title in ["one", "two", "three"] {
        window(&output, &root, title);
    }

    assert!(state(&root).is_hidden());
    assert_eq!(root.padding(), Padding::zeroed());

    root.set_split_mode(SplitMode::Tabbed).unwrap();

    assert!(state(&root).is_visible());
    assert_eq!(tab_titles(&root), ["one", "two", "three"]);
    assert_eq!(root.padding(), Padding::top(24));
    assert!(output.has_surface(root.id()));
}

#[test]
fn tabs_track_children_through_mutations() {
    let (output, _decorator) = setup();
    let root = root(&output, SplitMode::Tabbed);
    let mut spare: Vec<Node> = Vec::new();

    // a small deterministic generator, so failures reproduce
    let mut seed: u32 = 0x2545_f491;
    let mut next = move |n: usize| {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed as usize % n.max(1)
    };

    for step in 0..200 {
        let len = root.child_count();
        match next(5) {
            0 | 1 => {
                let node = Node::window(format!("w{}", step));
                output.attach_node(&node);
                root.insert_child(next(len + 1), &node).unwrap();
            }
            2 if len > 0 => {
                let child = root.child_at(next(len)).unwrap();
                root.remove_child(&child).unwrap();
                spare.push(child);
            }
            3 if len > 1 => root.swap_children(next(len), next(len)).unwrap(),
            4 if len > 0 => {
                let old = root.child_at(next(len)).unwrap();
                let new = match spare.pop() {
                    Some(node) => node,
                    None => {
                        let node = Node::window(format!("r{}", step));
                        output.attach_node(&node);
                        node
                    }
                };
                root.replace_child(&old, &new).unwrap();
                spare.push(old);
            }
            _ => {
                if let Some(child) = root.child_at(next(len.max(1))) {
                    child.set_title(format!("t{}", step));
                }
            }
        }

        assert_eq!(tab_titles(&root), child_titles(&root), "after step {}", step);
        assert_boundary_corners(&root, step);
        for node in &spare {
            assert_eq!(corners(node), Corners::NONE, "spare {} after step {}", node.id(), step);
        }
    }

    // nodes taken out of the container no longer affect its tabs
    for node in &spare {
        node.set_title("stale");
    }
    assert_eq!(tab_titles(&root), child_titles(&root));
}

#[test]
fn detached_child_loses_its_tab() {
    let (output, _decorator) = setup();
    let root = root(&output, SplitMode::Tabbed);
    let a = window(&output, &root, "a");
    window(&output, &root, "b");

    a.detach().unwrap();

    assert_eq!(tab_titles(&root), ["b"]);
    assert!(Decoration::of(&a).is_none());
    assert!(!output.has_surface(a.id()));
}

#[test]
fn labels_only_rasterize_when_needed() {
    let (output, _decorator) = setup();
    let root = root(&output, SplitMode::Tabbed);
    let a = window(&output, &root, "a");
    window(&output, &root, "b");
    layout(&root, Rectangle::new(0, 0, 1200, 800));

    let mut r = RecordingRenderer::default();
    output.render(&mut r, &Mat4::IDENTITY);
    output.render(&mut r, &Mat4::IDENTITY);
    assert_eq!(r.rasterized, ["a", "b"]);

    // moving without resizing keeps every label
    layout(&root, Rectangle::new(100, 100, 1200, 800));
    output.render(&mut r, &Mat4::IDENTITY);
    assert_eq!(r.rasterized.len(), 2);

    // a new title only affects its own tab
    a.set_title("a2");
    output.render(&mut r, &Mat4::IDENTITY);
    assert_eq!(r.rasterized, ["a", "b", "a2"]);
    assert_eq!(r.released, [1]);

    // focusing a tab changes its text color
    output.set_active_node(Some(&a));
    output.render(&mut r, &Mat4::IDENTITY);
    assert_eq!(r.rasterized.len(), 4);
    assert_eq!(r.rasterized[3], "a2");

    // resizing changes every width
    layout(&root, Rectangle::new(100, 100, 900, 800));
    output.render(&mut r, &Mat4::IDENTITY);
    assert_eq!(r.rasterized.len(), 6);
}

#[test]
fn bar_sits_above_the_content() {
    let (output, _decorator) = setup();
    let root = root(&output, SplitMode::Tabbed);
    let a = window(&output, &root, "a");
    layout(&root, Rectangle::new(0, 0, 1200, 800));

    assert_eq!(a.geometry(), Rectangle::new(0, 24, 1200, 776));
    assert_eq!(output.surface_at(Point::new(600, 10)), Some(root.id()));
    assert_eq!(output.surface_at(Point::new(1, 400)), Some(a.id()));
    assert_eq!(output.surface_at(Point::new(600, 400)), None);
}

#[test]
fn title_bar_height_follows_config() {
    let (output, decorator) = setup();
    let root = root(&output, SplitMode::Tabbed);
    window(&output, &root, "a");

    let config = tiledeco::DecorationConfig::builder()
        .title_bar_height(30)
        .finish(tiledeco::config::no_checks)
        .unwrap();
    decorator.reconfigure(config).unwrap();
    assert_eq!(root.padding(), Padding::top(30));

    let config = tiledeco::DecorationConfig::builder()
        .title_bar(false)
        .finish(tiledeco::config::no_checks)
        .unwrap();
    decorator.reconfigure(config).unwrap();
    assert!(state(&root).is_hidden());
    assert_eq!(root.padding(), Padding::zeroed());
}
