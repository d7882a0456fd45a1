//! End-to-end click-through of a simulated page.
//!
//! Drives the controller against a self-contained surface the way a real
//! host would: hit testing from pointer coordinates, a scripted viewport
//! resize, and a mix of pointer, touch, and keyboard input.

use bubble_core::event::{Event, KeyCode, KeyEvent, PointerEvent};
use bubble_core::geometry::{Rect, Size};
use bubble_popover::placement::{HorizontalPlacement, Placement, VerticalPlacement};
use bubble_popover::surface::{Hit, Surface, TriggerId};
use bubble_popover::{BubbleConfig, Dispatch, SmartBubble};

/// Minimal page model: triggers with panels, presentation state projected
/// into plain fields.
#[derive(Debug, Default)]
struct Page {
    viewport: Size,
    scroll_top: f32,
    rects: Vec<Rect>,
    panels: Vec<Option<Size>>,
    expanded: Vec<bool>,
    placements: Vec<Option<Placement>>,
}

impl Page {
    fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    fn add_trigger(&mut self, rect: Rect, panel: Size) -> TriggerId {
        let id = TriggerId(self.rects.len());
        self.rects.push(rect);
        self.panels.push(Some(panel));
        self.expanded.push(false);
        self.placements.push(None);
        id
    }

    /// Resolve a pointer position to a hit the way a DOM host would via
    /// `closest()`: an open panel's area wins over its trigger, triggers win
    /// over the page.
    fn hit_test(&self, x: f32, y: f32) -> Hit {
        for (i, rect) in self.rects.iter().enumerate() {
            if self.expanded[i] {
                // Panel hangs below or above its trigger per current tags.
                let panel = self.panels[i].unwrap_or_default();
                let panel_rect = match self.placements[i].map(|p| p.vertical) {
                    Some(VerticalPlacement::Above) => {
                        Rect::new(rect.x, rect.y - panel.height, panel.width, panel.height)
                    }
                    _ => Rect::new(rect.x, rect.bottom(), panel.width, panel.height),
                };
                if panel_rect.contains(x, y) {
                    return Hit::Panel(TriggerId(i));
                }
            }
            if rect.contains(x, y) {
                return Hit::Trigger(TriggerId(i));
            }
        }
        Hit::Outside
    }
}

impl Surface for Page {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn trigger_rect(&self, id: TriggerId) -> Option<Rect> {
        self.rects.get(id.0).copied()
    }

    fn panel_size(&self, id: TriggerId) -> Option<Size> {
        self.panels.get(id.0).copied().flatten()
    }

    fn set_expanded(&mut self, id: TriggerId, expanded: bool) {
        self.expanded[id.0] = expanded;
    }

    fn set_active(&mut self, _id: TriggerId, _active: bool) {}

    fn apply_placement(&mut self, id: TriggerId, placement: Placement) {
        self.placements[id.0] = Some(placement);
    }

    fn clear_placement(&mut self, id: TriggerId) {
        self.placements[id.0] = None;
    }

    fn flush_layout(&mut self, _id: TriggerId) {}
}

fn click_at(bubbles: &mut SmartBubble<Page>, x: f32, y: f32) -> Dispatch {
    let hit = bubbles.surface().hit_test(x, y);
    bubbles.handle_event(&Event::Pointer(PointerEvent::new(x, y)), hit)
}

#[test]
fn full_page_walkthrough() {
    let mut page = Page::new(Size::new(1280.0, 800.0));
    // A trigger near the top-left corner, one mid-page, one near the bottom
    // edge.
    let top_left = page.add_trigger(Rect::new(2.0, 40.0, 16.0, 16.0), Size::new(220.0, 140.0));
    let mid = page.add_trigger(Rect::new(600.0, 380.0, 80.0, 30.0), Size::new(220.0, 140.0));
    let bottom = page.add_trigger(Rect::new(600.0, 740.0, 80.0, 30.0), Size::new(220.0, 140.0));

    let mut bubbles = SmartBubble::bind(page, [top_left, mid, bottom], BubbleConfig::default())
        .expect("viewport is measurable");

    // Open the top-left trigger: stays below, hugs the left edge.
    assert_eq!(click_at(&mut bubbles, 10.0, 48.0), Dispatch::Consumed);
    assert_eq!(bubbles.active_trigger(), Some(top_left));
    assert_eq!(
        bubbles.placement(top_left),
        Some(Placement {
            vertical: VerticalPlacement::Below,
            horizontal: HorizontalPlacement::AlignLeft,
        })
    );

    // Click inside the open panel: consumed, still open.
    assert_eq!(click_at(&mut bubbles, 100.0, 100.0), Dispatch::Consumed);
    assert_eq!(bubbles.active_trigger(), Some(top_left));

    // Activate the mid-page trigger: the first closes, the second opens
    // centered below.
    assert_eq!(click_at(&mut bubbles, 620.0, 390.0), Dispatch::Consumed);
    assert_eq!(bubbles.active_trigger(), Some(mid));
    assert_eq!(bubbles.placement(mid), Some(Placement::default()));
    assert!(!bubbles.surface().expanded[top_left.0]);

    // The bottom trigger flips above.
    assert_eq!(click_at(&mut bubbles, 620.0, 750.0), Dispatch::Consumed);
    assert_eq!(
        bubbles.placement(bottom).map(|p| p.vertical),
        Some(VerticalPlacement::Above)
    );

    // A click on empty page space closes everything and is not consumed.
    assert_eq!(click_at(&mut bubbles, 300.0, 600.0), Dispatch::Ignored);
    assert_eq!(bubbles.active_trigger(), None);
    assert_eq!(bubbles.surface().expanded, vec![false, false, false]);

    // Keyboard re-open of the bottom trigger behaves like the click did.
    let enter = Event::Key(KeyEvent::new(KeyCode::Enter));
    assert_eq!(
        bubbles.handle_event(&enter, Hit::Trigger(bottom)),
        Dispatch::Consumed
    );
    assert_eq!(
        bubbles.placement(bottom).map(|p| p.vertical),
        Some(VerticalPlacement::Above)
    );

    // Taller viewport, reopen: the flip is recomputed, not reused.
    bubbles.handle_event(&enter, Hit::Trigger(bottom)); // toggle closed
    bubbles.surface_mut().viewport = Size::new(1280.0, 1400.0);
    bubbles.handle_event(&enter, Hit::Trigger(bottom));
    assert_eq!(
        bubbles.placement(bottom).map(|p| p.vertical),
        Some(VerticalPlacement::Below)
    );
}

#[test]
fn touch_outside_open_panel_dismisses() {
    let mut page = Page::new(Size::new(1280.0, 800.0));
    let id = page.add_trigger(Rect::new(600.0, 380.0, 80.0, 30.0), Size::new(220.0, 140.0));
    let mut bubbles =
        SmartBubble::bind(page, [id], BubbleConfig::default()).expect("viewport is measurable");

    click_at(&mut bubbles, 620.0, 390.0);
    assert!(bubbles.is_active(id));

    let touch = Event::TouchStart(PointerEvent::new(50.0, 50.0));
    let hit = bubbles.surface().hit_test(50.0, 50.0);
    assert_eq!(bubbles.handle_event(&touch, hit), Dispatch::Ignored);
    assert!(!bubbles.is_active(id));
}
