//! The controller: owns the root panel group and routes host input into it.
//!
//! Two state machines live here:
//! - **current panel**: the panel under the cursor, recomputed by hit-testing
//!   on every `mouse_moved` while not maximised. Presses, drags and releases
//!   reuse the panel found by the last move.
//! - **maximise**: one panel is promoted to the full viewport and receives
//!   all input and drawing exclusively until restored.
//!
//! Gesture ownership is tracked by [`ElementId`]: the element that claims a
//! press keeps receiving the gesture until release, and a double click is
//! pre-seeded with the previous click's owner.
//!
//! Every reference into the tree (current panel, mouse owner) is weak. A panel
//! removed while referenced resolves to "no panel".

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::{Rc, Weak};

use tracing::{debug, error, info, warn};

use crate::arguments::{
    FilesDraggedArguments, Key, KeyboardAction, KeyboardArguments, MouseAction,
    MouseArguments, MouseButton,
};
use crate::config::{
    ControllerConfig, DOUBLE_CLICK_SPACE_THRESHOLD_PX, DOUBLE_CLICK_TIME_THRESHOLD_MS,
    FULLSCREEN_KEY, MAXIMISE_KEY,
};
use crate::dispatch;
use crate::draw::{Canvas, DrawArguments, DrawContext};
use crate::element::Widget;
use crate::element_id::ElementId;
use crate::error::GuiError;
use crate::host::{Host, InputEvent};
use crate::panel::{Panel, PanelGroup, PanelPtr, WeakPanel};
use crate::primitives::{Point, Rect, translation};

/// A collaborator updated once per frame before the tree.
pub trait Inspector {
    fn update(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct MouseClick {
    time_millis: u64,
    position: Point,
}

pub struct Controller<H: Host> {
    host: H,
    config: ControllerConfig,

    initialised: bool,
    maximised: bool,
    chrome_visible: bool,

    root: Option<Rc<RefCell<PanelGroup>>>,
    current_panel: Option<WeakPanel>,
    current_panel_bounds: Rect,
    /// Bounds of the maximised panel before it was promoted.
    maximised_restore: Option<Rect>,

    mouse_owner: Option<ElementId>,
    last_click_owner: Option<ElementId>,
    last_mouse_click: Option<MouseClick>,
    mouse_cached: Point,
    cursor: Point,

    inspector: Option<Box<dyn Inspector>>,
}

impl<H: Host> Controller<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, ControllerConfig::default())
    }

    pub fn with_config(host: H, config: ControllerConfig) -> Self {
        Self {
            host,
            chrome_visible: config.chrome_visible,
            config,
            initialised: false,
            maximised: false,
            root: None,
            current_panel: None,
            current_panel_bounds: Rect::ZERO,
            maximised_restore: None,
            mouse_owner: None,
            last_click_owner: None,
            last_mouse_click: None,
            mouse_cached: Point::ORIGIN,
            cursor: Point::ORIGIN,
            inspector: None,
        }
    }

    /// Bind to `root`, sizing it to the viewport.
    ///
    /// May only be called once; a second call leaves state untouched.
    pub fn init(&mut self, root: Rc<RefCell<PanelGroup>>) -> Result<(), GuiError> {
        if self.initialised {
            warn!("init called on an initialised gui");
            return Err(GuiError::AlreadyInitialised);
        }

        let viewport = self.host.viewport();
        root.borrow_mut().set_bounds(viewport);

        self.host.set_background(self.config.background);
        for &size in &self.config.font_sizes {
            self.host.warm_font(&self.config.font_family, size);
        }

        self.root = Some(root);
        self.current_panel = None;
        self.current_panel_bounds = viewport;
        self.initialised = true;
        info!(?viewport, "gui initialised");
        Ok(())
    }

    fn check_initialised(&self) -> bool {
        if !self.initialised {
            error!("{}", GuiError::NotInitialised);
        }
        self.initialised
    }

    // =====================================================================
    // Tree management
    // =====================================================================

    pub fn add(&mut self, panel: PanelPtr) {
        if !self.check_initialised() {
            return;
        }
        if let Some(root) = &self.root {
            root.borrow_mut().add(panel);
        }
    }

    pub fn drop(&mut self, id: ElementId) {
        if !self.check_initialised() {
            return;
        }
        if let Some(root) = &self.root {
            root.borrow_mut().drop(id);
        }
    }

    pub fn clear(&mut self) {
        if !self.check_initialised() {
            return;
        }
        if let Some(root) = &self.root {
            root.borrow_mut().clear();
        }
    }

    pub fn root(&self) -> Option<Rc<RefCell<PanelGroup>>> {
        self.root.clone()
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn is_maximised(&self) -> bool {
        self.maximised
    }

    pub fn is_chrome_visible(&self) -> bool {
        self.chrome_visible
    }

    /// The panel under the cursor (or the maximised panel), if it still
    /// exists.
    pub fn current_panel(&self) -> Option<PanelPtr> {
        self.current_panel.as_ref().and_then(Weak::upgrade)
    }

    /// Window-space bounds of the panel found by the last hit-test.
    pub fn current_panel_bounds(&self) -> Rect {
        self.current_panel_bounds
    }

    pub fn mouse_owner(&self) -> Option<ElementId> {
        self.mouse_owner
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn set_inspector(&mut self, inspector: Box<dyn Inspector>) {
        self.inspector = Some(inspector);
    }

    // =====================================================================
    // Display state
    // =====================================================================

    pub fn show_chrome(&mut self) {
        self.chrome_visible = true;
    }

    pub fn hide_chrome(&mut self) {
        self.chrome_visible = false;
    }

    pub fn toggle_fullscreen(&mut self) {
        info!("toggling fullscreen");
        self.host.toggle_fullscreen();
    }

    /// Maximise the current panel, or restore if already maximised.
    pub fn toggle_maximised(&mut self) {
        if self.maximised {
            self.clear_maximised();
        } else if let Some(panel) = self.current_panel() {
            self.set_maximised(panel.clone());
            if self.maximised {
                let viewport = self.host.viewport();
                panel
                    .borrow_mut()
                    .set_bounds(Rect::new(0.0, 0.0, viewport.width, viewport.height));
            }
        } else {
            debug!("no panel under cursor to maximise");
        }
    }

    /// Promote `panel` to fill the screen.
    ///
    /// [`toggle_maximised`](Self::toggle_maximised) then fits it to the
    /// viewport.
    pub fn set_maximised(&mut self, panel: PanelPtr) {
        if !self.check_initialised() {
            return;
        }
        let screen = self.host.screen_size();
        let full = Rect::new(0.0, 0.0, screen.width, screen.height);
        {
            let mut panel = panel.borrow_mut();
            if !self.maximised {
                self.maximised_restore = Some(panel.bounds());
            }
            panel.set_bounds(full);
            info!(panel = %panel.id(), "panel maximised");
        }
        self.current_panel = Some(Rc::downgrade(&panel));
        self.maximised = true;
    }

    /// Return the maximised panel to its place and resume hit-testing.
    pub fn clear_maximised(&mut self) {
        if !self.maximised {
            return;
        }
        self.maximised = false;

        let restore = self.maximised_restore.take();
        if let (Some(panel), Some(bounds)) = (self.current_panel(), restore) {
            panel.borrow_mut().set_bounds(bounds);
        }
        if let Some(root) = &self.root {
            root.borrow_mut().set_bounds(self.host.viewport());
        }
        self.update_current_panel();
        info!("maximise cleared");
    }

    // =====================================================================
    // Hit-testing
    // =====================================================================

    /// Deepest panel under `point` with its window-space bounds.
    fn find_panel(&self, point: Point) -> Option<(PanelPtr, Rect)> {
        if self.maximised {
            let panel = self.current_panel()?;
            let bounds = panel.borrow().bounds();
            return Some((panel, bounds));
        }
        let root = self.root.as_ref()?.borrow();
        let mut bounds = root.bounds();
        let panel = root.find_screen(point - bounds.origin(), &mut bounds)?;
        Some((panel, bounds))
    }

    /// The panel under `point`. While maximised this is always the maximised
    /// panel.
    pub fn panel_under_cursor(&self, point: Point) -> Option<PanelPtr> {
        self.find_panel(point).map(|(panel, _)| panel)
    }

    fn update_current_panel(&mut self) {
        if self.maximised {
            return;
        }
        let Some(root_bounds) = self.root.as_ref().map(|root| root.borrow().bounds()) else {
            return;
        };
        match self.find_panel(self.cursor) {
            Some((panel, bounds)) => {
                self.current_panel = Some(Rc::downgrade(&panel));
                self.current_panel_bounds = bounds;
            }
            None => {
                self.current_panel = None;
                self.current_panel_bounds = root_bounds;
            }
        }
    }

    // =====================================================================
    // Frame loop
    // =====================================================================

    pub fn update(&mut self) {
        if !self.initialised {
            return;
        }
        if let Some(inspector) = &mut self.inspector {
            inspector.update();
        }
        if let Some(root) = &self.root {
            root.borrow_mut().update();
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        if !self.initialised {
            return;
        }
        let viewport = self.host.viewport();
        let args = DrawArguments::root(viewport, self.chrome_visible);
        let mut ctx = DrawContext::new(canvas);
        let current = self.current_panel();
        let origin = translation(viewport.origin());

        if self.maximised {
            match current {
                Some(panel) => {
                    ctx.with_transform(origin, |ctx| panel.borrow_mut().draw(ctx, &args))
                }
                None => warn!("maximised panel has expired"),
            }
            return;
        }

        // Highlight bounds are already in window space.
        if current.is_some() {
            ctx.fill_rect(self.current_panel_bounds, self.config.highlight);
        }
        if let Some(root) = &self.root {
            ctx.with_transform(origin, |ctx| root.borrow_mut().draw(ctx, &args));
        }
    }

    // =====================================================================
    // Input
    // =====================================================================

    /// Route a raw host event to the matching handler.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::MouseMoved { position } => self.mouse_moved(position),
            InputEvent::MousePressed { position, button } => self.mouse_pressed(position, button),
            InputEvent::MouseReleased { position, button } => {
                self.mouse_released(position, button)
            }
            InputEvent::MouseDragged { position, button } => self.mouse_dragged(position, button),
            InputEvent::KeyPressed { key } => self.key_pressed(key),
            InputEvent::FilesDragged { position, files } => self.files_dragged(position, files),
            InputEvent::WindowResized { width, height } => self.window_resized(width, height),
        }
    }

    fn mouse_arguments(&self, action: MouseAction, button: MouseButton, position: Point) -> MouseArguments {
        let root_bounds = self
            .root
            .as_ref()
            .map(|root| root.borrow().bounds())
            .unwrap_or_default();
        let current = self.current_panel().map(|panel| panel.borrow().id());
        MouseArguments::new(action, button, position, root_bounds, current, self.mouse_owner)
    }

    fn dispatch_mouse(&mut self, args: &mut MouseArguments) {
        if self.maximised {
            match self.current_panel() {
                Some(panel) => dispatch::mouse_child(&mut *panel.borrow_mut(), args),
                None => warn!("maximised panel has expired"),
            }
        } else if let Some(root) = &self.root {
            root.borrow_mut().mouse_action(args);
        }
    }

    pub fn mouse_moved(&mut self, position: Point) {
        self.cursor = position;
        if !self.initialised {
            return;
        }
        let mut args = self.mouse_arguments(MouseAction::Moved, MouseButton::Left, position);
        self.dispatch_mouse(&mut args);
        self.update_current_panel();
    }

    pub fn mouse_pressed(&mut self, position: Point, button: MouseButton) {
        self.cursor = position;
        if !self.initialised {
            return;
        }
        let now = self.host.elapsed_millis();
        let double_click = self.last_mouse_click.is_some_and(|last| {
            now.saturating_sub(last.time_millis) < DOUBLE_CLICK_TIME_THRESHOLD_MS
                && last.position.distance(position) < DOUBLE_CLICK_SPACE_THRESHOLD_PX
        });

        let action = if double_click {
            self.mouse_owner = self.last_click_owner;
            debug!(owner = ?self.mouse_owner, "double click");
            MouseAction::DoubleClick
        } else {
            MouseAction::Pressed
        };

        let mut args = self.mouse_arguments(action, button, position);
        self.dispatch_mouse(&mut args);

        self.mouse_cached = args.global;
        self.mouse_owner = args.owner();
        self.last_mouse_click = Some(MouseClick {
            time_millis: now,
            position,
        });
    }

    pub fn mouse_released(&mut self, position: Point, button: MouseButton) {
        self.cursor = position;
        if !self.initialised {
            return;
        }
        let mut args = self.mouse_arguments(MouseAction::Released, button, position);
        self.dispatch_mouse(&mut args);

        self.last_click_owner = self.mouse_owner.take();
    }

    pub fn mouse_dragged(&mut self, position: Point, button: MouseButton) {
        self.cursor = position;
        if !self.initialised {
            return;
        }
        let mut args = self
            .mouse_arguments(MouseAction::Dragged, button, position)
            .with_movement(self.mouse_cached);
        self.dispatch_mouse(&mut args);

        self.mouse_cached = args.global;
    }

    /// Handle a key press. The fullscreen and maximise keys work even before
    /// init.
    pub fn key_pressed(&mut self, key: Key) {
        if key.is_char(FULLSCREEN_KEY) {
            self.toggle_fullscreen();
        }
        if key.is_char(MAXIMISE_KEY) {
            self.toggle_maximised();
        }
        if !self.initialised {
            return;
        }

        let current = self.current_panel();
        let current_id = current.as_ref().map(|panel| panel.borrow().id());
        let mut args = KeyboardArguments::new(KeyboardAction::Pressed, key, current_id);
        if self.maximised {
            match current {
                Some(panel) => panel.borrow_mut().keyboard_action(&mut args),
                None => warn!("maximised panel has expired"),
            }
        } else if let Some(root) = &self.root {
            root.borrow_mut().keyboard_action(&mut args);
        }
    }

    /// Deliver dropped files to the panel under the drop point.
    pub fn files_dragged(&mut self, position: Point, files: Vec<PathBuf>) {
        if !self.initialised {
            return;
        }
        let Some((panel, bounds)) = self.find_panel(position) else {
            debug!(?position, "files dropped outside any panel");
            return;
        };
        let mut args = FilesDraggedArguments {
            local_position: position - bounds.origin(),
            global_position: position,
            files,
        };
        panel.borrow_mut().files_dragged(&mut args);
    }

    pub fn window_resized(&mut self, width: f32, height: f32) {
        let viewport = Rect::new(0.0, 0.0, width, height);
        if self.maximised {
            if let Some(panel) = self.current_panel() {
                panel.borrow_mut().set_bounds(viewport);
            }
        } else if let Some(root) = &self.root {
            root.borrow_mut().set_bounds(viewport);
        }
    }
}
