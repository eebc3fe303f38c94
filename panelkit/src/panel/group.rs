use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::arguments::{KeyboardArguments, MouseArguments};
use crate::dispatch;
use crate::draw::{DrawArguments, DrawContext};
use crate::element::{Element, Widget};
use crate::element_id::ElementId;
use crate::panel::{Panel, PanelPtr};
use crate::primitives::{Point, Rect};

/// How a [`PanelGroup`] positions its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Children keep the bounds they were given.
    #[default]
    Manual,
    /// Equal cells, filled row by row. `columns` defaults to
    /// `ceil(sqrt(n))`.
    Grid { columns: Option<usize> },
    /// Equal-width columns, left to right.
    Horizontal,
    /// Equal-height rows, top to bottom.
    Vertical,
}

impl Layout {
    /// Cell rectangles for `count` children inside `bounds` (local frame).
    fn cells(self, count: usize, bounds: Rect) -> Option<Vec<Rect>> {
        if count == 0 {
            return Some(Vec::new());
        }
        let (columns, rows) = match self {
            Layout::Manual => return None,
            Layout::Grid { columns } => {
                let columns = columns
                    .unwrap_or_else(|| (count as f32).sqrt().ceil() as usize)
                    .max(1);
                (columns, count.div_ceil(columns))
            }
            Layout::Horizontal => (count, 1),
            Layout::Vertical => (1, count),
        };

        let width = bounds.width / columns as f32;
        let height = bounds.height / rows as f32;
        Some(
            (0..count)
                .map(|i| {
                    let column = (i % columns) as f32;
                    let row = (i / columns) as f32;
                    Rect::new(column * width, row * height, width, height)
                })
                .collect(),
        )
    }
}

/// Ordered collection of panels.
///
/// Insertion order is draw order; the last panel is topmost for hit-testing
/// and mouse dispatch.
#[derive(Default)]
pub struct PanelGroup {
    element: Element,
    panels: Vec<PanelPtr>,
    layout: Layout,
}

impl PanelGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// A grid with automatic column count.
    pub fn grid() -> Self {
        Self::with_layout(Layout::Grid { columns: None })
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.arrange();
    }

    pub fn add(&mut self, panel: PanelPtr) {
        self.panels.push(panel);
        self.arrange();
    }

    /// Add a concrete panel and return a typed handle to it.
    pub fn add_panel<P: Panel + 'static>(&mut self, panel: P) -> Rc<RefCell<P>> {
        let panel = Rc::new(RefCell::new(panel));
        self.add(panel.clone());
        panel
    }

    /// Remove the panel with `id`. Returns false if it is not a direct child.
    pub fn drop(&mut self, id: ElementId) -> bool {
        let before = self.panels.len();
        self.panels.retain(|panel| panel.borrow().id() != id);
        let removed = self.panels.len() != before;
        if removed {
            self.arrange();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.panels.clear();
    }

    pub fn panels(&self) -> &[PanelPtr] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Re-run the layout over the current children.
    pub fn arrange(&mut self) {
        let Some(cells) = self.layout.cells(self.panels.len(), self.element.local_bounds()) else {
            return;
        };
        for (panel, cell) in self.panels.iter().zip(cells) {
            panel.borrow_mut().set_bounds(cell);
        }
    }

    /// Union of the children's bounds, in this group's frame.
    pub fn children_bounds(&self) -> Rect {
        self.panels
            .iter()
            .map(|panel| panel.borrow().bounds())
            .reduce(|acc, bounds| acc.union(&bounds))
            .unwrap_or(Rect::ZERO)
    }
}

impl Widget for PanelGroup {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if self.element.set_bounds(bounds) {
            self.arrange();
        }
    }

    fn update(&mut self) {
        self.element.update();
        dispatch::dispatch_update(&self.panels);
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, args: &DrawArguments) {
        let panels = &self.panels;
        self.element
            .draw_with(ctx, args, |ctx| dispatch::dispatch_draw(panels, ctx, args));
    }

    fn mouse_action(&mut self, args: &mut MouseArguments) {
        if !self.element.accepts_input() {
            return;
        }
        dispatch::dispatch_mouse(&self.panels, args);
        self.element.mouse_action(args);
    }

    fn keyboard_action(&mut self, args: &mut KeyboardArguments) {
        if !self.element.accepts_input() {
            return;
        }
        dispatch::dispatch_keyboard(&self.panels, args);
        self.element.keyboard_action(args);
    }
}

impl Panel for PanelGroup {
    fn find_screen(&self, point: Point, bounds: &mut Rect) -> Option<PanelPtr> {
        for panel in self.panels.iter().rev() {
            let child = panel.borrow();
            if !child.element().is_visible() {
                continue;
            }
            let child_bounds = child.bounds();
            if !child_bounds.contains(point) {
                continue;
            }

            let mut hit = child_bounds.translate(bounds.origin());
            let deeper = child.find_screen(point - child_bounds.origin(), &mut hit);
            *bounds = hit;
            trace!(panel = %child.id(), ?hit, "hit-test matched");
            return Some(deeper.unwrap_or_else(|| panel.clone()));
        }
        None
    }
}
