//! End-to-end controller behaviour driven through the headless host.
//!
//! Layout used by most tests: an 800×600 viewport whose root group holds
//! panel `A` at (0,0,400,600) and panel `B` at (400,0,400,600).

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use panelkit::config::{DOUBLE_CLICK_SPACE_THRESHOLD_PX, DOUBLE_CLICK_TIME_THRESHOLD_MS};
use panelkit::{
    Controller, Element, ElementId, FilesDraggedArguments, ImagePanel, Inspector, Key,
    MouseAction, MouseButton, PanelGroup, Point, Rect, Size, Widget, share,
};
use panelkit_harness::{DrawCommand, HeadlessHost, RecordingCanvas};

type Log = Rc<RefCell<Vec<(ElementId, MouseAction, Option<ElementId>)>>>;

struct Scene {
    controller: Controller<HeadlessHost>,
    root: Rc<RefCell<PanelGroup>>,
    a: Rc<RefCell<Element>>,
    b: Rc<RefCell<Element>>,
    log: Log,
}

/// Make `panel` claim presses and record (panel, action, owner before) for
/// everything but moves.
fn instrument(panel: &Rc<RefCell<Element>>, log: &Log) {
    let id = panel.borrow().id();
    let log = log.clone();
    panel.borrow_mut().on_mouse.add(move |args| {
        if args.action == MouseAction::Moved {
            return;
        }
        if args.is_local() || args.action == MouseAction::Dragged {
            log.borrow_mut().push((id, args.action, args.owner_before()));
        }
        args.take_mouse_press(id);
    });
}

fn scene() -> Scene {
    let root = share(PanelGroup::new());
    let mut controller = Controller::new(HeadlessHost::new(Size::new(800.0, 600.0)));
    controller.init(root.clone()).unwrap();

    let a = share(Element::with_bounds(Rect::new(0.0, 0.0, 400.0, 600.0)));
    let b = share(Element::with_bounds(Rect::new(400.0, 0.0, 400.0, 600.0)));
    let log = Log::default();
    instrument(&a, &log);
    instrument(&b, &log);
    controller.add(a.clone());
    controller.add(b.clone());

    Scene {
        controller,
        root,
        a,
        b,
        log,
    }
}

fn id_of(panel: &Rc<RefCell<Element>>) -> ElementId {
    panel.borrow().id()
}

fn current_id(controller: &Controller<HeadlessHost>) -> Option<ElementId> {
    controller.current_panel().map(|panel| panel.borrow().id())
}

// =========================================================================
// Initialisation
// =========================================================================

#[test]
fn tree_operations_before_init_are_inert() {
    let root = share(PanelGroup::new());
    let mut controller = Controller::new(HeadlessHost::new(Size::new(800.0, 600.0)));

    let panel = share(Element::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)));
    controller.add(panel.clone());
    controller.drop(id_of(&panel));
    controller.clear();
    controller.add(panel.clone());
    controller.update();
    let mut canvas = RecordingCanvas::new();
    controller.draw(&mut canvas);
    controller.mouse_moved(Point::new(5.0, 5.0));

    assert!(canvas.commands().is_empty());
    assert!(controller.current_panel().is_none());

    controller.init(root.clone()).unwrap();
    assert!(root.borrow().is_empty());
    assert!(controller.is_initialised());
}

#[test]
fn init_warms_fonts_and_background() {
    let scene = scene();
    let host = scene.controller.host();
    let sizes: Vec<u32> = host.fonts().iter().map(|(_, size)| *size).collect();
    assert_eq!(sizes, vec![12, 14, 18, 24]);
    assert!(host.background().is_some());
    assert_eq!(scene.root.borrow().bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
}

// =========================================================================
// Hit-testing
// =========================================================================

#[test]
fn move_selects_panel_under_cursor() {
    let mut scene = scene();
    scene.controller.mouse_moved(Point::new(100.0, 100.0));
    assert_eq!(current_id(&scene.controller), Some(id_of(&scene.a)));
    assert_eq!(
        scene.controller.current_panel_bounds(),
        Rect::new(0.0, 0.0, 400.0, 600.0)
    );

    scene.controller.mouse_moved(Point::new(700.0, 100.0));
    assert_eq!(current_id(&scene.controller), Some(id_of(&scene.b)));
}

#[test]
fn point_outside_every_panel_finds_nothing() {
    let mut scene = scene();
    scene.controller.drop(id_of(&scene.b));

    let under = scene.controller.panel_under_cursor(Point::new(600.0, 100.0));
    assert!(under.is_none());

    scene.controller.mouse_moved(Point::new(600.0, 100.0));
    assert!(scene.controller.current_panel().is_none());
}

#[test]
fn press_without_move_uses_stale_current_panel() {
    let mut scene = scene();
    scene.controller.mouse_moved(Point::new(100.0, 100.0));
    scene.controller.mouse_pressed(Point::new(700.0, 100.0), MouseButton::Left);

    // Presses do not re-run hit-testing.
    assert_eq!(current_id(&scene.controller), Some(id_of(&scene.a)));
    // Dispatch itself still reaches the panel under the press.
    assert_eq!(scene.controller.mouse_owner(), Some(id_of(&scene.b)));
}

// =========================================================================
// Double click
// =========================================================================

#[test]
fn second_press_within_thresholds_is_double_click_on_same_panel() {
    let mut scene = scene();
    scene.controller.mouse_moved(Point::new(100.0, 100.0));
    assert_eq!(current_id(&scene.controller), Some(id_of(&scene.a)));

    scene.controller.mouse_pressed(Point::new(100.0, 100.0), MouseButton::Left);
    scene.controller.host_mut().advance(150);
    scene.controller.mouse_pressed(Point::new(105.0, 102.0), MouseButton::Left);

    let log = scene.log.borrow();
    let a = id_of(&scene.a);
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].0, a);
    assert_eq!(log[0].1, MouseAction::Pressed);
    assert_eq!(log[1].0, a);
    assert_eq!(log[1].1, MouseAction::DoubleClick);
}

#[test]
fn double_click_is_seeded_with_previous_owner() {
    let mut scene = scene();
    let a = id_of(&scene.a);

    scene.controller.mouse_pressed(Point::new(100.0, 100.0), MouseButton::Left);
    scene.controller.mouse_released(Point::new(100.0, 100.0), MouseButton::Left);
    scene.controller.host_mut().advance(100);
    scene.controller.mouse_pressed(Point::new(101.0, 100.0), MouseButton::Left);

    let log = scene.log.borrow();
    let double = log
        .iter()
        .find(|(_, action, _)| *action == MouseAction::DoubleClick)
        .copied();
    assert_eq!(double, Some((a, MouseAction::DoubleClick, Some(a))));
    assert_eq!(scene.controller.mouse_owner(), Some(a));
}

#[test]
fn slow_or_distant_second_press_is_plain_press() {
    let mut scene = scene();

    scene.controller.mouse_pressed(Point::new(100.0, 100.0), MouseButton::Left);
    scene.controller.mouse_released(Point::new(100.0, 100.0), MouseButton::Left);
    scene
        .controller
        .host_mut()
        .advance(DOUBLE_CLICK_TIME_THRESHOLD_MS);
    scene.controller.mouse_pressed(Point::new(100.0, 100.0), MouseButton::Left);
    scene.controller.mouse_released(Point::new(100.0, 100.0), MouseButton::Left);

    scene.controller.host_mut().advance(10);
    let far = 100.0 + DOUBLE_CLICK_SPACE_THRESHOLD_PX;
    scene.controller.mouse_pressed(Point::new(far, 100.0), MouseButton::Left);

    let presses: Vec<MouseAction> = scene
        .log
        .borrow()
        .iter()
        .map(|(_, action, _)| *action)
        .filter(|action| *action != MouseAction::Released)
        .collect();
    assert_eq!(
        presses,
        vec![MouseAction::Pressed, MouseAction::Pressed, MouseAction::Pressed]
    );
}

// =========================================================================
// Ownership
// =========================================================================

#[test]
fn drags_keep_owner_until_release() {
    let mut scene = scene();
    let a = id_of(&scene.a);

    scene.controller.mouse_pressed(Point::new(100.0, 100.0), MouseButton::Left);
    assert_eq!(scene.controller.mouse_owner(), Some(a));

    // Drag across into B: A still owns the gesture.
    scene.controller.mouse_dragged(Point::new(300.0, 100.0), MouseButton::Left);
    scene.controller.mouse_dragged(Point::new(500.0, 100.0), MouseButton::Left);
    assert_eq!(scene.controller.mouse_owner(), Some(a));

    let drag_owners: Vec<Option<ElementId>> = scene
        .log
        .borrow()
        .iter()
        .filter(|(_, action, _)| *action == MouseAction::Dragged)
        .map(|(_, _, owner)| *owner)
        .collect();
    assert!(!drag_owners.is_empty());
    assert!(drag_owners.iter().all(|owner| *owner == Some(a)));

    scene.controller.mouse_released(Point::new(500.0, 100.0), MouseButton::Left);
    assert_eq!(scene.controller.mouse_owner(), None);
    assert_eq!(scene.a.borrow().mouse_state(), panelkit::MouseState::Waiting);

    // Next press is a fresh gesture.
    scene.controller.host_mut().advance(1000);
    scene.log.borrow_mut().clear();
    scene.controller.mouse_pressed(Point::new(700.0, 100.0), MouseButton::Left);
    let log = scene.log.borrow();
    assert_eq!(log[0], (id_of(&scene.b), MouseAction::Pressed, None));
}

#[test]
fn drag_movement_is_delta_from_cached_point() {
    let mut scene = scene();
    let movements = Rc::new(RefCell::new(Vec::new()));
    let sink = movements.clone();
    scene.a.borrow_mut().on_mouse.add(move |args| {
        if args.action == MouseAction::Dragged {
            sink.borrow_mut().push(args.movement);
        }
    });

    scene.controller.mouse_pressed(Point::new(100.0, 100.0), MouseButton::Left);
    scene.controller.mouse_dragged(Point::new(110.0, 95.0), MouseButton::Left);
    scene.controller.mouse_dragged(Point::new(130.0, 95.0), MouseButton::Left);

    assert_eq!(
        *movements.borrow(),
        vec![Point::new(10.0, -5.0), Point::new(20.0, 0.0)]
    );
}

// =========================================================================
// Maximise
// =========================================================================

#[test]
fn maximise_round_trip_restores_bounds() {
    let mut scene = scene();
    scene.controller.mouse_moved(Point::new(500.0, 100.0));
    let before_current = scene.controller.current_panel_bounds();
    let before_root = scene.root.borrow().bounds();

    scene.controller.toggle_maximised();
    assert!(scene.controller.is_maximised());
    assert_eq!(scene.b.borrow().bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));

    scene.controller.toggle_maximised();
    assert!(!scene.controller.is_maximised());
    assert_eq!(scene.controller.current_panel_bounds(), before_current);
    assert_eq!(scene.root.borrow().bounds(), before_root);
    assert_eq!(scene.b.borrow().bounds(), Rect::new(400.0, 0.0, 400.0, 600.0));
    assert_eq!(current_id(&scene.controller), Some(id_of(&scene.b)));
}

#[test]
fn maximised_panel_receives_all_input() {
    let mut scene = scene();
    scene.controller.mouse_moved(Point::new(500.0, 100.0));
    scene.controller.key_pressed(Key::Character('m'));
    assert!(scene.controller.is_maximised());

    // Hit-testing is frozen while maximised.
    scene.controller.mouse_moved(Point::new(10.0, 10.0));
    assert_eq!(current_id(&scene.controller), Some(id_of(&scene.b)));
    let under = scene.controller.panel_under_cursor(Point::new(10.0, 10.0));
    assert_eq!(under.map(|panel| panel.borrow().id()), Some(id_of(&scene.b)));

    scene.log.borrow_mut().clear();
    scene.controller.mouse_pressed(Point::new(10.0, 10.0), MouseButton::Left);
    let log = scene.log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, id_of(&scene.b));
}

#[test]
fn maximise_without_current_panel_does_nothing() {
    let mut scene = scene();
    scene.controller.toggle_maximised();
    assert!(!scene.controller.is_maximised());
}

#[test]
fn resize_while_maximised_resizes_only_that_panel() {
    let mut scene = scene();
    scene.controller.mouse_moved(Point::new(100.0, 100.0));
    scene.controller.toggle_maximised();

    scene.controller.window_resized(1024.0, 768.0);
    assert_eq!(scene.a.borrow().bounds(), Rect::new(0.0, 0.0, 1024.0, 768.0));
    assert_eq!(scene.root.borrow().bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));

    scene.controller.window_resized(640.0, 480.0);
    scene.controller.toggle_maximised();
    assert_eq!(scene.a.borrow().bounds(), Rect::new(0.0, 0.0, 400.0, 600.0));
}

// =========================================================================
// Window, keyboard, files
// =========================================================================

#[test]
fn resize_relays_out_grid_root() {
    let root = share(PanelGroup::grid());
    let mut controller = Controller::new(HeadlessHost::new(Size::new(800.0, 600.0)));
    controller.init(root).unwrap();
    let a = share(Element::new());
    let b = share(Element::new());
    controller.add(a.clone());
    controller.add(b.clone());
    assert_eq!(b.borrow().bounds(), Rect::new(400.0, 0.0, 400.0, 600.0));

    controller.window_resized(1000.0, 500.0);
    assert_eq!(b.borrow().bounds(), Rect::new(500.0, 0.0, 500.0, 500.0));
}

#[test]
fn keys_broadcast_to_visible_panels() {
    let mut scene = scene();
    let seen = Rc::new(RefCell::new(Vec::new()));
    for panel in [&scene.a, &scene.b] {
        let id = panel.borrow().id();
        let seen = seen.clone();
        panel.borrow_mut().on_keyboard.add(move |args| {
            seen.borrow_mut().push((id, args.current_panel()));
        });
    }
    scene.b.borrow_mut().set_visible(false);
    scene.controller.mouse_moved(Point::new(100.0, 100.0));

    scene.controller.key_pressed(Key::Character('x'));
    let a = id_of(&scene.a);
    assert_eq!(*seen.borrow(), vec![(a, Some(a))]);
}

#[test]
fn fullscreen_key_toggles_host() {
    let mut scene = scene();
    scene.controller.key_pressed(Key::Character('f'));
    scene.controller.key_pressed(Key::Character('f'));
    assert_eq!(scene.controller.host().fullscreen_toggles(), 2);
}

#[test]
fn dropped_files_reach_panel_under_drop_point() {
    let mut scene = scene();
    let received: Rc<RefCell<Vec<FilesDraggedArguments>>> = Rc::default();
    let sink = received.clone();
    scene
        .b
        .borrow_mut()
        .on_files_dragged
        .add(move |args| sink.borrow_mut().push(args.clone()));

    let files = vec![PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b.png")];
    scene
        .controller
        .files_dragged(Point::new(450.0, 20.0), files.clone());

    let received = received.borrow();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].local_position, Point::new(50.0, 20.0));
    assert_eq!(received[0].global_position, Point::new(450.0, 20.0));
    assert_eq!(received[0].files, files);
}

#[test]
fn files_dropped_outside_panels_are_ignored() {
    let mut scene = scene();
    scene.controller.clear();
    scene
        .controller
        .files_dragged(Point::new(450.0, 20.0), vec![PathBuf::from("/tmp/a.png")]);
    assert!(scene.root.borrow().is_empty());
}

// =========================================================================
// Frame loop
// =========================================================================

#[test]
fn draw_highlights_current_panel() {
    let mut scene = scene();
    let mut canvas = RecordingCanvas::new();
    scene.controller.draw(&mut canvas);
    assert_eq!(canvas.fill_rects().count(), 0);

    scene.controller.mouse_moved(Point::new(500.0, 10.0));
    scene.controller.draw(&mut canvas);
    let highlight = scene.controller.config().highlight;
    assert_eq!(
        canvas.fill_rects().next(),
        Some((Rect::new(400.0, 0.0, 400.0, 600.0), highlight))
    );
}

#[test]
fn chrome_flag_reaches_panels() {
    let root = share(PanelGroup::new());
    let mut controller = Controller::new(HeadlessHost::new(Size::new(800.0, 600.0)));
    controller.init(root).unwrap();

    let mut panel = ImagePanel::new(image::RgbaImage::new(4, 4));
    panel.set_caption("camera");
    panel.set_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
    controller.add(share(panel));

    let mut canvas = RecordingCanvas::new();
    controller.draw(&mut canvas);
    assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["camera"]);

    controller.hide_chrome();
    canvas.clear();
    controller.draw(&mut canvas);
    assert_eq!(canvas.texts().count(), 0);
    assert!(
        canvas
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::Image { .. }))
    );

    controller.show_chrome();
    assert!(controller.is_chrome_visible());
}

#[test]
fn update_runs_inspector_then_tree() {
    struct CountingInspector(Rc<RefCell<Vec<&'static str>>>);
    impl Inspector for CountingInspector {
        fn update(&mut self) {
            self.0.borrow_mut().push("inspector");
        }
    }

    let mut scene = scene();
    let order = Rc::new(RefCell::new(Vec::new()));
    scene
        .controller
        .set_inspector(Box::new(CountingInspector(order.clone())));
    let sink = order.clone();
    scene
        .a
        .borrow_mut()
        .on_update
        .add(move |_| sink.borrow_mut().push("panel"));

    scene.controller.update();
    assert_eq!(*order.borrow(), vec!["inspector", "panel"]);
}
