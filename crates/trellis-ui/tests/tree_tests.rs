//! Widget tree tests: allocation, removal, memory budget, plugins and
//! render order.

use trellis_test_utils::MockDisplay;
use trellis_ui::{
    AnyWidgetHandle, Color, Container, CreateFlags, CreateParams, DirtyFlags, KindFlags, Rect,
    UiConfig, WidgetDescriptor, WidgetError, WidgetEvent, WidgetKind, WidgetKindRegistry,
    WidgetPlugin, WidgetResult, WidgetTree,
};

fn setup() -> WidgetTree {
    trellis_core::logging::try_init();
    WidgetTree::new()
}

fn paint_fill(
    tree: &mut WidgetTree,
    handle: AnyWidgetHandle,
    event: &mut WidgetEvent<'_>,
) -> WidgetResult<bool> {
    match event {
        WidgetEvent::Draw(display) => {
            let handle = tree.downcast::<Swatch>(handle)?;
            display.fill_rect(tree.absolute_rect(handle)?, tree.color(handle, 1)?);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Leaf kind used to exercise plugins and the children check.
enum Swatch {}

static SWATCH: WidgetDescriptor = WidgetDescriptor {
    name: "SWATCH",
    size: 24,
    flags: KindFlags::empty(),
    callback: paint_fill,
    colors: &[Color::WHITE, Color::GREEN],
};

impl WidgetKind for Swatch {
    fn descriptor() -> &'static WidgetDescriptor {
        &SWATCH
    }
}

struct SwatchPlugin;

impl WidgetPlugin for SwatchPlugin {
    fn name(&self) -> &str {
        "swatch"
    }

    fn register_kinds(&self, registry: &mut WidgetKindRegistry) {
        registry.register::<Swatch>();
    }
}

fn container(tree: &mut WidgetTree, id: &str, parent: Option<AnyWidgetHandle>) -> AnyWidgetHandle {
    Container::create(tree, id, 0.0, 0.0, 10.0, 10.0, parent, None, CreateFlags::empty())
        .unwrap()
        .erase()
}

fn container_at(
    tree: &mut WidgetTree,
    id: &str,
    rect: Rect<f32>,
    parent: Option<AnyWidgetHandle>,
    flags: CreateFlags,
) -> AnyWidgetHandle {
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    Container::create(tree, id, x, y, w, h, parent, None, flags)
        .unwrap()
        .erase()
}

#[test]
fn test_new_tree_has_only_desktop() {
    let tree = setup();
    let desktop = tree.desktop();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.active_parent(), desktop);
    assert_eq!(tree.descriptor(desktop).unwrap().name, "DESKTOP");
    assert_eq!(tree.size(desktop).unwrap(), trellis_ui::Vec2::new(480.0, 272.0));
    assert_eq!(tree.memory_used(), 0);
    assert_eq!(tree.plugin_names().collect::<Vec<_>>(), ["core"]);
}

#[test]
fn test_desktop_cannot_be_removed() {
    let mut tree = setup();
    let desktop = tree.desktop();
    assert_eq!(tree.remove(desktop), Err(WidgetError::RootRemoval));
    assert!(tree.contains(desktop));
}

#[test]
fn test_remove_frees_subtree_and_memory() {
    let mut tree = setup();
    let outer = container(&mut tree, "outer", None);
    let inner = container(&mut tree, "inner", Some(outer));
    let sibling = container(&mut tree, "sibling", None);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.memory_used(), 3 * Container::descriptor().size);

    tree.remove(outer).unwrap();

    assert!(!tree.contains(outer));
    assert!(!tree.contains(inner));
    assert!(tree.contains(sibling));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.memory_used(), Container::descriptor().size);
    assert_eq!(tree.node(tree.desktop()).unwrap().children(), &[sibling]);
    assert_eq!(tree.position(inner), Err(WidgetError::StaleHandle));
    assert_eq!(tree.find_by_id("inner"), None);
}

#[test]
fn test_reused_slot_does_not_revive_old_handle() {
    let mut tree = setup();
    let first = container(&mut tree, "first", None);
    tree.remove(first).unwrap();
    let second = container(&mut tree, "second", None);

    assert_ne!(first, second);
    assert!(!tree.contains(first));
    assert!(tree.contains(second));
}

#[test]
fn test_removing_active_parent_resets_it() {
    let mut tree = setup();
    let outer = container(&mut tree, "outer", None);
    tree.set_active_parent(outer).unwrap();

    tree.remove(outer).unwrap();

    assert_eq!(tree.active_parent(), tree.desktop());
}

#[test]
fn test_out_of_memory() {
    let size = Container::descriptor().size;
    let mut tree = WidgetTree::with_config(UiConfig::default().with_memory_budget(2 * size));
    container(&mut tree, "a", None);
    container(&mut tree, "b", None);

    let result = Container::create(
        &mut tree,
        "c",
        0.0,
        0.0,
        1.0,
        1.0,
        None,
        None,
        CreateFlags::empty(),
    );

    assert_eq!(
        result.unwrap_err(),
        WidgetError::OutOfMemory {
            requested: size,
            available: 0,
        }
    );
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.find_by_id("c"), None);
}

#[test]
fn test_color_table_is_charged_once() {
    let size = Container::descriptor().size;
    let table = std::mem::size_of::<Color>();
    let mut tree = WidgetTree::with_config(UiConfig::default().with_memory_budget(size + table));
    let panel = container(&mut tree, "panel", None);

    tree.set_color(panel, 0, Color::WIN_BLUE).unwrap();
    assert_eq!(tree.memory_used(), size);
    assert!(!tree.node(panel).unwrap().has_color_overrides());

    tree.set_color(panel, 0, Color::RED).unwrap();
    tree.set_color(panel, 0, Color::GREEN).unwrap();
    assert_eq!(tree.memory_used(), size + table);
    assert_eq!(tree.color(panel, 0), Ok(Color::GREEN));
}

#[test]
fn test_color_override_out_of_memory_keeps_default() {
    let size = Container::descriptor().size;
    let mut tree = WidgetTree::with_config(UiConfig::default().with_memory_budget(size));
    let panel = container(&mut tree, "panel", None);

    let err = tree.set_color(panel, 0, Color::RED).unwrap_err();

    assert!(matches!(err, WidgetError::OutOfMemory { available: 0, .. }));
    assert_eq!(tree.color(panel, 0), Ok(Color::WIN_BLUE));
}

#[test]
fn test_invalid_color_index() {
    let mut tree = setup();
    let panel = container(&mut tree, "panel", None);

    let expected = WidgetError::InvalidColorIndex { index: 3, count: 1 };
    assert_eq!(tree.color(panel, 3), Err(expected.clone()));
    assert_eq!(tree.set_color(panel, 3, Color::RED), Err(expected));
}

#[test]
fn test_unregistered_kind_until_plugin_added() {
    let mut tree = setup();
    let params = CreateParams::new("swatch", 1.0, 1.0, 4.0, 4.0);

    assert_eq!(
        tree.create::<Swatch>(params).unwrap_err(),
        WidgetError::UnregisteredKind("SWATCH".to_string())
    );
    assert!(tree.create_by_name("SWATCH", params).is_err());

    tree.add_plugin(SwatchPlugin).unwrap();
    assert_eq!(
        tree.add_plugin(SwatchPlugin),
        Err(WidgetError::DuplicatePlugin("swatch".to_string()))
    );
    assert_eq!(tree.plugin_names().collect::<Vec<_>>(), ["core", "swatch"]);

    let swatch = tree.create::<Swatch>(params).unwrap();
    assert_eq!(tree.color(swatch, 1), Ok(Color::GREEN));
    let by_name = tree.create_by_name("SWATCH", params).unwrap();
    assert!(tree.is_kind::<Swatch>(by_name));
    assert!(!tree.is_kind::<Container>(by_name));
}

#[test]
fn test_leaf_kind_rejects_children() {
    let mut tree = setup();
    tree.add_plugin(SwatchPlugin).unwrap();
    let swatch = tree
        .create::<Swatch>(CreateParams::new("swatch", 0.0, 0.0, 4.0, 4.0))
        .unwrap();

    let err = Container::create(
        &mut tree,
        "child",
        0.0,
        0.0,
        1.0,
        1.0,
        Some(swatch.erase()),
        None,
        CreateFlags::empty(),
    )
    .unwrap_err();

    assert_eq!(err, WidgetError::ChildrenNotAllowed { parent: "SWATCH" });
    assert_eq!(
        tree.set_active_parent(swatch),
        Err(WidgetError::ChildrenNotAllowed { parent: "SWATCH" })
    );
}

#[test]
fn test_create_by_name_builds_container() {
    let mut tree = setup();
    let handle = tree
        .create_by_name("CONTAINER", CreateParams::new(7u32, 3.0, 4.0, 5.0, 6.0))
        .unwrap();

    let panel = tree.downcast::<Container>(handle).unwrap();
    assert_eq!(tree.absolute_rect(panel), Ok(Rect::new(3.0, 4.0, 5.0, 6.0)));
    assert_eq!(tree.find_by_id(7u32), Some(handle));
}

#[test]
fn test_latest_widget_wins_duplicate_id() {
    let mut tree = setup();
    let _first = container(&mut tree, "dup", None);
    let second = container(&mut tree, "dup", None);

    assert_eq!(tree.find_by_id("dup"), Some(second));
}

fn fail_init(
    tree: &mut WidgetTree,
    handle: AnyWidgetHandle,
    event: &mut WidgetEvent<'_>,
) -> WidgetResult<bool> {
    match event {
        WidgetEvent::Init => Err(WidgetError::StaleHandle),
        _ => tree.process_default(handle, event),
    }
}

#[test]
fn test_failed_init_rolls_back_allocation() {
    let mut tree = setup();

    let result = Container::create(
        &mut tree,
        "broken",
        0.0,
        0.0,
        1.0,
        1.0,
        None,
        Some(fail_init),
        CreateFlags::empty(),
    );

    assert_eq!(result.unwrap_err(), WidgetError::StaleHandle);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.memory_used(), 0);
    assert!(tree.node(tree.desktop()).unwrap().children().is_empty());
    assert_eq!(tree.find_by_id("broken"), None);
}

#[test]
fn test_failed_init_keeps_live_widget_with_same_id() {
    let mut tree = setup();
    let live = container(&mut tree, "dup", None);

    let result = Container::create(
        &mut tree,
        "dup",
        0.0,
        0.0,
        1.0,
        1.0,
        None,
        Some(fail_init),
        CreateFlags::empty(),
    );

    assert!(result.is_err());
    assert_eq!(tree.find_by_id("dup"), Some(live));
}

fn spawn_child_then_fail(
    tree: &mut WidgetTree,
    handle: AnyWidgetHandle,
    event: &mut WidgetEvent<'_>,
) -> WidgetResult<bool> {
    match event {
        WidgetEvent::Init => {
            Container::create(
                tree,
                "spawned",
                1.0,
                1.0,
                2.0,
                2.0,
                Some(handle),
                None,
                CreateFlags::empty(),
            )?;
            tree.set_active_parent(handle)?;
            Err(WidgetError::StaleHandle)
        }
        _ => tree.process_default(handle, event),
    }
}

#[test]
fn test_failed_init_frees_children_created_during_init() {
    let mut tree = setup();

    let result = Container::create(
        &mut tree,
        "parent",
        0.0,
        0.0,
        10.0,
        10.0,
        None,
        Some(spawn_child_then_fail),
        CreateFlags::empty(),
    );

    assert_eq!(result.unwrap_err(), WidgetError::StaleHandle);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.memory_used(), 0);
    assert_eq!(tree.find_by_id("spawned"), None);
    assert_eq!(tree.active_parent(), tree.desktop());
}

fn fail_remove(
    tree: &mut WidgetTree,
    handle: AnyWidgetHandle,
    event: &mut WidgetEvent<'_>,
) -> WidgetResult<bool> {
    match event {
        WidgetEvent::Remove => Err(WidgetError::RootRemoval),
        _ => tree.process_default(handle, event),
    }
}

#[test]
fn test_remove_frees_subtree_when_handler_fails() {
    let mut tree = setup();
    let outer = container(&mut tree, "outer", None);
    let inner = Container::create(
        &mut tree,
        "inner",
        0.0,
        0.0,
        1.0,
        1.0,
        Some(outer),
        Some(fail_remove),
        CreateFlags::empty(),
    )
    .unwrap();

    assert_eq!(tree.remove(outer), Err(WidgetError::RootRemoval));

    assert!(!tree.contains(outer));
    assert!(!tree.contains(inner));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.memory_used(), 0);
    assert!(tree.node(tree.desktop()).unwrap().children().is_empty());
}

#[test]
fn test_render_order_and_hidden_subtrees() {
    let mut tree = setup();
    let visible = CreateFlags::empty();
    let hidden = CreateFlags::HIDDEN;
    let a = container_at(&mut tree, "a", Rect::new(0.0, 0.0, 100.0, 100.0), None, visible);
    let a1 = container_at(&mut tree, "a1", Rect::new(10.0, 10.0, 5.0, 5.0), Some(a), visible);
    let b = container_at(&mut tree, "b", Rect::new(200.0, 0.0, 50.0, 50.0), None, hidden);
    container_at(&mut tree, "b1", Rect::new(1.0, 1.0, 5.0, 5.0), Some(b), visible);
    let c = container_at(&mut tree, "c", Rect::new(300.0, 0.0, 20.0, 20.0), None, visible);

    let mock = MockDisplay::default();
    let mut surface = mock.clone();
    assert_eq!(tree.render(&mut surface), Ok(3));

    let rects: Vec<_> = mock.filled_rects().into_iter().map(|(rect, _)| rect).collect();
    assert_eq!(
        rects,
        vec![
            tree.absolute_rect(a).unwrap(),
            tree.absolute_rect(a1).unwrap(),
            tree.absolute_rect(c).unwrap(),
        ]
    );

    tree.set_visible(b, true).unwrap();
    mock.clear_calls();
    assert_eq!(tree.render(&mut surface), Ok(5));
}

#[test]
fn test_dirty_tracking_cleared_by_render() {
    let mut tree = setup();
    let outer = container(&mut tree, "outer", None);
    let inner = container(&mut tree, "inner", Some(outer));
    assert!(tree.needs_redraw());
    assert!(tree.node(outer).unwrap().dirty().contains(DirtyFlags::CHILDREN));

    let mut surface = MockDisplay::default();
    tree.render(&mut surface).unwrap();
    assert!(!tree.needs_redraw());

    tree.set_color(inner, 0, Color::RED).unwrap();
    assert_eq!(tree.node(inner).unwrap().dirty(), DirtyFlags::COLOR);
    assert!(tree.node(outer).unwrap().dirty().is_empty());

    tree.render(&mut surface).unwrap();
    tree.set_position(inner, 2.0, 2.0).unwrap();
    assert_eq!(tree.node(inner).unwrap().dirty(), DirtyFlags::LAYOUT);
    assert_eq!(tree.node(outer).unwrap().dirty(), DirtyFlags::CHILDREN);

    tree.render(&mut surface).unwrap();
    tree.set_position(inner, 2.0, 2.0).unwrap();
    tree.set_color(inner, 0, Color::RED).unwrap();
    assert!(!tree.needs_redraw());
}
