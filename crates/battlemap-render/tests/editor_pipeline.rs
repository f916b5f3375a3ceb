//! End-to-end: pointer events through the editor, fragment caching, and
//! projection into the host display representation.

use battlemap_core::{MapEditor, PointerEvent, ToolKind};
use battlemap_render::{FragmentCache, PlainSketcher, project_visible};
use kurbo::{Point, Vec2};

fn click(editor: &mut MapEditor, x: f64, y: f64) {
    editor.handle_pointer(PointerEvent::Click {
        position: Point::new(x, y),
    });
}

#[test]
fn draw_and_project_shapes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut editor = MapEditor::new(40.0, Vec2::new(60.0, 60.0));
    let mut cache = FragmentCache::new(PlainSketcher);
    editor.scene_mut().subscribe(cache.listener());

    editor.set_tool(Some(ToolKind::Square));
    click(&mut editor, 41.0, 39.0);
    click(&mut editor, 119.0, 81.0);

    editor.set_tool(Some(ToolKind::Polygon));
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 40.0, 0.0);
    click(&mut editor, 40.0, 40.0);
    click(&mut editor, 40.0, 40.0); // duplicate terminates the polygon

    assert!(cache.flush(editor.scene()).unwrap());
    assert_eq!(cache.visible().len(), 2);
    assert_eq!(cache.cached_count(), 2);

    let elements = project_visible(cache.visible());
    // One stroke node per shape from the plain backend.
    assert_eq!(elements.len(), 2);
    for (element, placed) in elements.iter().zip(cache.visible()) {
        assert_eq!(element.tag, "path");
        assert_eq!(element.attributes["dataShapeId"], placed.shape_id.to_string());
        assert!(element.attributes.contains_key("d"));
    }

    // A second flush with no scene change does not touch the backend.
    assert!(!cache.flush(editor.scene()).unwrap());
}

#[test]
fn preview_is_not_part_of_the_scene() {
    let mut editor = MapEditor::new(40.0, Vec2::new(60.0, 60.0));
    let mut cache = FragmentCache::new(PlainSketcher);
    editor.scene_mut().subscribe(cache.listener());

    editor.set_tool(Some(ToolKind::Circle));
    click(&mut editor, 80.0, 80.0);
    editor.handle_pointer(PointerEvent::Move {
        position: Point::new(160.0, 80.0),
    });

    assert!(editor.session().preview().is_some());
    cache.flush(editor.scene()).unwrap();
    assert!(cache.visible().is_empty());
}
