//! End-to-end traversal behaviour over captured trees.

use std::collections::HashMap;

use ax_tree::{
    Action, AxProvider, NodeId, Rect, Registry, Role, SearchQuery, SnapshotNode, SnapshotTree,
    Traversal, traverse,
};

fn r(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, w, h)
}

fn button(id: u64, frame: Rect) -> SnapshotNode {
    SnapshotNode::new(id, Role::Button, frame).with_actions(vec![Action::Press])
}

fn window(children: Vec<SnapshotNode>) -> SnapshotNode {
    SnapshotNode::new(1, Role::Window, r(0.0, 0.0, 1000.0, 800.0)).with_children(children)
}

fn handles(reg: &Registry<u64>, ids: &[NodeId]) -> Vec<u64> {
    ids.iter().map(|id| *reg.get(*id).unwrap().handle()).collect()
}

fn hinted(tree: &SnapshotTree) -> Vec<u64> {
    let reg = traverse(tree, &1);
    handles(&reg, &reg.flatten())
}

#[test]
fn scroll_area_clips_and_prunes() {
    let scroll = SnapshotNode::new(10, Role::ScrollArea, r(0.0, 100.0, 400.0, 200.0))
        .with_children(vec![
            button(11, r(10.0, 120.0, 50.0, 20.0)),
            button(12, r(10.0, 290.0, 50.0, 20.0)),
            button(13, r(10.0, 400.0, 50.0, 20.0)),
        ]);
    let tree = SnapshotTree::from_roots(vec![window(vec![scroll])]).unwrap();
    let (reg, stats) = Traversal::new(&tree).run(&1);
    assert_eq!(handles(&reg, &reg.flatten()), vec![11, 12]);
    assert_eq!(stats.pruned, 1);

    let partial = reg.get(reg.id_of(&12).unwrap()).unwrap();
    assert_eq!(partial.frame(), r(10.0, 290.0, 50.0, 20.0));
    assert_eq!(partial.effective_frame(), r(10.0, 290.0, 50.0, 10.0));
}

#[test]
fn pruned_container_hides_its_subtree() {
    let group = SnapshotNode::new(10, Role::Group, r(2000.0, 0.0, 100.0, 100.0))
        .with_children(vec![button(11, r(0.0, 0.0, 10.0, 10.0))]);
    let tree = SnapshotTree::from_roots(vec![window(vec![group])]).unwrap();
    let reg = traverse(&tree, &1);
    assert!(!reg.contains(&10));
    assert!(!reg.contains(&11));
}

#[test]
fn non_clipping_parent_passes_its_clip_through() {
    // A button group wider than the window; its children are clipped to the
    // window, not to the group.
    let toolbar_role = Role::Unknown("AXToolbar".into());
    let toolbar = SnapshotNode::new(10, toolbar_role, r(0.0, 0.0, 2000.0, 50.0))
        .with_children(vec![
            button(11, r(900.0, 0.0, 200.0, 50.0)),
            button(12, r(1500.0, 0.0, 50.0, 50.0)),
        ]);
    let tree = SnapshotTree::from_roots(vec![window(vec![toolbar])]).unwrap();
    let reg = traverse(&tree, &1);
    assert_eq!(handles(&reg, &reg.flatten()), vec![11]);
    let b = reg.get(reg.id_of(&11).unwrap()).unwrap();
    assert_eq!(b.effective_frame(), r(900.0, 0.0, 100.0, 50.0));
}

#[test]
fn effective_frames_nest_inside_clipping_ancestors() {
    let inner = SnapshotNode::new(20, Role::Group, r(50.0, 150.0, 600.0, 600.0)).with_children(vec![
        button(21, r(60.0, 160.0, 700.0, 30.0)),
        button(22, r(0.0, 250.0, 100.0, 100.0)),
    ]);
    let scroll = SnapshotNode::new(10, Role::ScrollArea, r(0.0, 100.0, 500.0, 300.0))
        .with_children(vec![inner, button(11, r(450.0, 350.0, 100.0, 100.0))]);
    let tree = SnapshotTree::from_roots(vec![window(vec![scroll])]).unwrap();
    let reg = traverse(&tree, &1);
    assert!(reg.len() >= 5);
    for (id, node) in reg.iter() {
        let mut up = reg.parent(id);
        while let Some(p) = up {
            let ancestor = reg.get(p).unwrap();
            if ancestor.role().clips_children() {
                assert!(
                    ancestor.effective_frame().contains(&node.effective_frame()),
                    "{:?} escapes {:?}",
                    node.handle(),
                    ancestor.handle()
                );
                break;
            }
            up = reg.parent(p);
        }
    }
}

#[test]
fn tables_walk_visible_rows_only() {
    let table = SnapshotNode::new(10, Role::Table, r(0.0, 0.0, 500.0, 500.0))
        .with_visible_rows(vec![12])
        .with_children(vec![
            SnapshotNode::new(11, Role::Row, r(0.0, 0.0, 500.0, 20.0)),
            SnapshotNode::new(12, Role::Row, r(0.0, 20.0, 500.0, 20.0)),
        ]);
    let tree = SnapshotTree::from_roots(vec![window(vec![table])]).unwrap();
    let reg = traverse(&tree, &1);
    assert!(!reg.contains(&11));
    assert_eq!(handles(&reg, &reg.flatten()), vec![12]);
}

#[test]
fn row_with_only_static_text_stays_hintable() {
    let row = SnapshotNode::new(10, Role::Row, r(0.0, 0.0, 500.0, 20.0)).with_children(vec![
        SnapshotNode::new(11, Role::StaticText, r(0.0, 0.0, 100.0, 20.0)),
    ]);
    let table = SnapshotNode::new(9, Role::Outline, r(0.0, 0.0, 500.0, 500.0)).with_children(vec![row]);
    let tree = SnapshotTree::from_roots(vec![window(vec![table])]).unwrap();
    assert_eq!(hinted(&tree), vec![10]);
}

#[test]
fn web_area_search_results_are_flat_and_clipped() {
    let web = SnapshotNode::new(10, Role::WebArea, r(0.0, 100.0, 1000.0, 500.0))
        .with_search(vec![12, 11, 13, 11])
        .with_children(vec![SnapshotNode::new(20, Role::Group, r(0.0, 100.0, 1000.0, 2000.0))
            .with_children(vec![
                SnapshotNode::new(11, Role::Link, r(10.0, 120.0, 50.0, 20.0))
                    .with_actions(vec![Action::Press])
                    .with_children(vec![button(14, r(10.0, 120.0, 10.0, 10.0))]),
                SnapshotNode::new(12, Role::Link, r(10.0, 590.0, 50.0, 20.0))
                    .with_actions(vec![Action::Press]),
                button(13, r(10.0, 900.0, 50.0, 20.0)),
            ])]);
    let tree = SnapshotTree::from_roots(vec![window(vec![web])]).unwrap();
    let (reg, stats) = Traversal::new(&tree).run(&1);

    let web_id = reg.id_of(&10).unwrap();
    assert_eq!(handles(&reg, reg.children(web_id)), vec![12, 11]);
    assert!(!reg.contains(&20), "structural children are not walked");
    assert!(!reg.contains(&13), "off-screen result dropped");
    assert!(!reg.contains(&14), "results are not recursed");
    assert_eq!(stats.searches, 1);
    assert_eq!(stats.duplicates, 1);

    let clipped = reg.get(reg.id_of(&12).unwrap()).unwrap();
    assert_eq!(clipped.effective_frame(), r(10.0, 590.0, 50.0, 10.0));
}

#[test]
fn web_area_without_search_is_walked_structurally() {
    let web = SnapshotNode::new(10, Role::WebArea, r(0.0, 0.0, 1000.0, 500.0))
        .with_children(vec![button(11, r(0.0, 0.0, 10.0, 10.0))]);
    let tree = SnapshotTree::from_roots(vec![window(vec![web])]).unwrap();
    assert_eq!(hinted(&tree), vec![11]);
}

#[test]
fn unreadable_nodes_are_skipped() {
    let mut broken = SnapshotNode::new(10, Role::Button, r(0.0, 0.0, 10.0, 10.0));
    broken.frame = None;
    let mut no_actions = button(11, r(0.0, 0.0, 10.0, 10.0));
    no_actions.actions = None;
    let mut opaque = SnapshotNode::new(12, Role::Group, r(0.0, 0.0, 100.0, 100.0))
        .with_children(vec![button(13, r(0.0, 0.0, 10.0, 10.0))]);
    opaque.children_unreadable = true;
    let tree = SnapshotTree::from_roots(vec![window(vec![
        broken,
        no_actions,
        opaque,
        button(14, r(0.0, 0.0, 5.0, 5.0)),
    ])])
    .unwrap();
    let (reg, stats) = Traversal::new(&tree).run(&1);
    assert_eq!(stats.unreadable, 2);
    assert!(reg.contains(&12));
    assert!(reg.children(reg.id_of(&12).unwrap()).is_empty());
    assert_eq!(handles(&reg, &reg.flatten()), vec![14]);
}

#[test]
fn unreadable_root_gives_empty_registry() {
    let tree = SnapshotTree::default();
    let reg = traverse(&tree, &1);
    assert!(reg.is_empty());
    assert!(reg.flatten().is_empty());
}

#[test]
fn open_menu_replaces_window_content() {
    let menu = SnapshotNode::new(10, Role::Menu, r(100.0, 100.0, 200.0, 300.0)).with_children(vec![
        SnapshotNode::new(11, Role::MenuItem, r(100.0, 100.0, 200.0, 20.0))
            .with_actions(vec![Action::Press, Action::Cancel]),
        SnapshotNode::new(12, Role::MenuItem, r(100.0, 120.0, 200.0, 20.0))
            .with_actions(vec![Action::Press, Action::Cancel]),
    ]);
    let tree = SnapshotTree::from_roots(vec![window(vec![
        button(2, r(0.0, 0.0, 10.0, 10.0)),
        menu,
    ])])
    .unwrap();
    assert_eq!(hinted(&tree), vec![11, 12]);
}

/// A provider whose structure can contain cycles.
struct Graph {
    /// Children per node; every node is a 10x10 pressable group at the origin.
    edges: HashMap<u64, Vec<u64>>,
}

impl AxProvider for Graph {
    type Handle = u64;

    fn role(&self, node: &u64) -> Option<Role> {
        self.edges.contains_key(node).then_some(Role::Group)
    }

    fn frame(&self, node: &u64) -> Option<Rect> {
        self.edges
            .contains_key(node)
            .then_some(Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    fn actions(&self, _node: &u64) -> Option<Vec<Action>> {
        Some(vec![Action::Press])
    }

    fn children(&self, node: &u64) -> Option<Vec<u64>> {
        self.edges.get(node).cloned()
    }

    fn visible_rows(&self, node: &u64) -> Option<Vec<u64>> {
        self.children(node)
    }

    fn supports_parameterized_attribute(&self, _node: &u64, _name: &str) -> bool {
        false
    }

    fn search(&self, _node: &u64, _query: &SearchQuery) -> Option<Vec<u64>> {
        None
    }
}

#[test]
fn cycles_terminate() {
    let graph = Graph {
        edges: HashMap::from([(1, vec![2, 3]), (2, vec![1, 3]), (3, vec![2])]),
    };
    let (reg, stats) = Traversal::new(&graph).run(&1);
    assert_eq!(reg.len(), 3);
    assert_eq!(handles(&reg, &reg.flatten()), vec![1, 2, 3]);
    assert!(stats.duplicates >= 3);
}
