//! Translates input events into camera mutations.
//!
//! Zooming anchors to the pointer: the normalized offset `u` of the pointer
//! from the viewport center satisfies `plane = center + u * zoom`, so after
//! `zoom ← zoom * factor` the correction `center += u * (old - new)` keeps
//! the plane point under the cursor fixed. Panning reuses the same
//! normalization, which makes the grabbed plane point follow the pointer by
//! the same algebra.

use crate::core::data::viewport::{Viewport, ViewportUpdate};
use crate::core::mapping;
use crate::core::view::events::{InputEvent, PointerButton};
use crate::core::view::pointer::PointerState;
use crate::core::view::state::ViewState;

/// Multiplier applied per zoom-in scroll step.
pub const ZOOM_IN_FACTOR: f64 = 0.9;
/// Multiplier applied per zoom-out scroll step.
pub const ZOOM_OUT_FACTOR: f64 = 1.1;

/// What a dispatched event did to the state it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchEffect {
    Zoomed,
    Panned,
    PointerTracked,
    ViewportChanged(ViewportUpdate),
    NoChange,
}

/// Applies one event to the camera, pointer, and viewport. Runs on the poll
/// thread; events that carry no effective displacement leave the interaction
/// flags alone.
pub fn dispatch_event(
    view: &mut ViewState,
    pointer: &mut PointerState,
    viewport: &mut Viewport,
    event: InputEvent,
) -> DispatchEffect {
    match event {
        InputEvent::Scroll { delta_y } => apply_scroll(view, pointer, viewport, delta_y),
        InputEvent::PointerMove { x, y } => apply_pointer_move(view, pointer, viewport, x, y),
        InputEvent::PointerButton { button, pressed } => {
            if button != PointerButton::Primary {
                return DispatchEffect::NoChange;
            }
            pointer.primary_held = pressed;
            DispatchEffect::PointerTracked
        }
        InputEvent::Resize {
            pixel_width,
            pixel_height,
            logical_width,
            logical_height,
        } => DispatchEffect::ViewportChanged(viewport.resize(
            pixel_width,
            pixel_height,
            logical_width,
            logical_height,
        )),
    }
}

fn apply_scroll(
    view: &mut ViewState,
    pointer: &PointerState,
    viewport: &Viewport,
    delta_y: f64,
) -> DispatchEffect {
    if delta_y == 0.0 || !delta_y.is_finite() {
        return DispatchEffect::NoChange;
    }

    let factor = if delta_y > 0.0 {
        ZOOM_IN_FACTOR
    } else {
        ZOOM_OUT_FACTOR
    };

    let anchor = mapping::normalized_from_pointer(pointer.x, pointer.y, viewport);
    let old_zoom = view.zoom;
    let new_zoom = old_zoom * factor;

    view.center = view.center + anchor * (old_zoom - new_zoom);
    view.zoom = new_zoom;
    view.mark_zooming();

    DispatchEffect::Zoomed
}

fn apply_pointer_move(
    view: &mut ViewState,
    pointer: &mut PointerState,
    viewport: &Viewport,
    x: f64,
    y: f64,
) -> DispatchEffect {
    let previous = *pointer;
    pointer.x = x;
    pointer.y = y;

    if !pointer.primary_held {
        return DispatchEffect::PointerTracked;
    }
    if x == previous.x && y == previous.y {
        return DispatchEffect::NoChange;
    }

    let plane_delta = (mapping::normalized_from_pointer(x, y, viewport)
        - mapping::normalized_from_pointer(previous.x, previous.y, viewport))
        * view.zoom;
    view.center = view.center - plane_delta;
    view.mark_panning();

    DispatchEffect::Panned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;

    const EPSILON: f64 = 1e-12;

    fn assert_approx_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON,
            "actual={actual} expected={expected}"
        );
    }

    fn setup_800x600() -> (ViewState, PointerState, Viewport) {
        (
            ViewState::default(),
            PointerState::default(),
            Viewport::new(800, 600, 800.0, 600.0).unwrap(),
        )
    }

    fn plane_under_pointer(view: &ViewState, pointer: &PointerState, viewport: &Viewport) -> Complex {
        mapping::pointer_to_plane(pointer.x, pointer.y, viewport, view.center, view.zoom)
    }

    #[test]
    fn scroll_in_keeps_the_plane_point_under_the_pointer() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.x = 213.0;
        pointer.y = 147.0;
        let before = plane_under_pointer(&view, &pointer, &viewport);

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::Scroll { delta_y: 1.0 },
        );
        let after = plane_under_pointer(&view, &pointer, &viewport);

        assert_eq!(effect, DispatchEffect::Zoomed);
        assert_approx_eq(after.real, before.real);
        assert_approx_eq(after.imag, before.imag);
        assert_approx_eq(view.zoom, 1.8);
    }

    #[test]
    fn scroll_out_keeps_the_plane_point_under_the_pointer() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.x = 650.0;
        pointer.y = 512.0;
        let before = plane_under_pointer(&view, &pointer, &viewport);

        dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::Scroll { delta_y: -3.0 },
        );
        let after = plane_under_pointer(&view, &pointer, &viewport);

        assert_approx_eq(after.real, before.real);
        assert_approx_eq(after.imag, before.imag);
        assert_approx_eq(view.zoom, 2.2);
    }

    #[test]
    fn anchor_holds_across_a_long_scroll_sequence() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.x = 333.0;
        pointer.y = 222.0;
        let anchor = plane_under_pointer(&view, &pointer, &viewport);

        for step in 0..20 {
            let delta_y = if step % 3 == 2 { -1.0 } else { 1.0 };
            dispatch_event(
                &mut view,
                &mut pointer,
                &mut viewport,
                InputEvent::Scroll { delta_y },
            );

            let tracked = plane_under_pointer(&view, &pointer, &viewport);
            assert_approx_eq(tracked.real, anchor.real);
            assert_approx_eq(tracked.imag, anchor.imag);
        }
    }

    #[test]
    fn scroll_at_the_optical_center_leaves_the_center_fixed() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.x = 400.0;
        pointer.y = 300.0;

        for _ in 0..3 {
            dispatch_event(
                &mut view,
                &mut pointer,
                &mut viewport,
                InputEvent::Scroll { delta_y: 1.0 },
            );
        }

        // Anchor offset is exactly zero at the center, so no drift at all.
        assert_eq!(view.center, Complex::new(-0.5, 0.0));
        assert_approx_eq(view.zoom, 1.458);
    }

    #[test]
    fn anchor_holds_on_a_high_density_display() {
        let (mut view, mut pointer, _) = setup_800x600();
        let mut viewport = Viewport::new(1600, 1200, 800.0, 600.0).unwrap();
        pointer.x = 100.0;
        pointer.y = 500.0;
        let before = plane_under_pointer(&view, &pointer, &viewport);

        dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::Scroll { delta_y: 1.0 },
        );
        let after = plane_under_pointer(&view, &pointer, &viewport);

        assert_approx_eq(after.real, before.real);
        assert_approx_eq(after.imag, before.imag);
    }

    #[test]
    fn zero_scroll_changes_nothing_and_does_not_arm_zooming() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::Scroll { delta_y: 0.0 },
        );

        assert_eq!(effect, DispatchEffect::NoChange);
        assert_eq!(view.zoom, 2.0);
        assert!(!view.is_zooming());
    }

    #[test]
    fn scroll_arms_the_zooming_flag() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();

        dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::Scroll { delta_y: 1.0 },
        );

        assert!(view.is_zooming());
        assert!(!view.is_panning());
    }

    #[test]
    fn horizontal_drag_shifts_the_center_against_the_drag() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.primary_held = true;
        pointer.x = 100.0;
        pointer.y = 100.0;

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerMove { x: 150.0, y: 100.0 },
        );

        // 50 px over a 600 px short edge at zoom 2.
        assert_eq!(effect, DispatchEffect::Panned);
        assert_approx_eq(view.center.real, -0.5 - 50.0 / 600.0 * 2.0);
        assert_approx_eq(view.center.imag, 0.0);
    }

    #[test]
    fn downward_drag_raises_the_center() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.primary_held = true;
        pointer.x = 400.0;
        pointer.y = 300.0;

        dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerMove { x: 400.0, y: 350.0 },
        );

        assert_approx_eq(view.center.real, -0.5);
        assert_approx_eq(view.center.imag, 50.0 / 600.0 * 2.0);
    }

    #[test]
    fn pan_tracks_the_grabbed_plane_point() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.primary_held = true;
        pointer.x = 321.0;
        pointer.y = 199.0;
        let grabbed = plane_under_pointer(&view, &pointer, &viewport);

        dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerMove { x: 401.0, y: 263.0 },
        );
        let now_under = plane_under_pointer(&view, &pointer, &viewport);

        assert_approx_eq(now_under.real, grabbed.real);
        assert_approx_eq(now_under.imag, grabbed.imag);
    }

    #[test]
    fn pan_tracks_across_consecutive_moves() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.primary_held = true;
        pointer.x = 200.0;
        pointer.y = 200.0;
        let grabbed = plane_under_pointer(&view, &pointer, &viewport);

        for (x, y) in [(230.0, 180.0), (260.0, 240.0), (190.0, 260.0)] {
            dispatch_event(
                &mut view,
                &mut pointer,
                &mut viewport,
                InputEvent::PointerMove { x, y },
            );
        }
        let now_under = plane_under_pointer(&view, &pointer, &viewport);

        assert_approx_eq(now_under.real, grabbed.real);
        assert_approx_eq(now_under.imag, grabbed.imag);
    }

    #[test]
    fn pan_respects_the_display_scale() {
        let (mut view, mut pointer, _) = setup_800x600();
        let mut viewport = Viewport::new(1600, 1200, 800.0, 600.0).unwrap();
        pointer.primary_held = true;
        pointer.x = 100.0;
        pointer.y = 100.0;

        dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerMove { x: 150.0, y: 100.0 },
        );

        // 50 logical points is 100 physical pixels on the 1200 px short edge.
        assert_approx_eq(view.center.real, -0.5 - 100.0 / 1200.0 * 2.0);
    }

    #[test]
    fn move_without_the_button_only_tracks_the_pointer() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerMove { x: 42.0, y: 17.0 },
        );

        assert_eq!(effect, DispatchEffect::PointerTracked);
        assert_eq!(pointer.x, 42.0);
        assert_eq!(pointer.y, 17.0);
        assert_eq!(view.center, Complex::new(-0.5, 0.0));
        assert!(!view.is_panning());
    }

    #[test]
    fn zero_delta_move_does_not_arm_panning() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.primary_held = true;
        pointer.x = 42.0;
        pointer.y = 17.0;

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerMove { x: 42.0, y: 17.0 },
        );

        assert_eq!(effect, DispatchEffect::NoChange);
        assert!(!view.is_panning());
    }

    #[test]
    fn primary_press_is_recorded_without_panning() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerButton {
                button: PointerButton::Primary,
                pressed: true,
            },
        );

        assert_eq!(effect, DispatchEffect::PointerTracked);
        assert!(pointer.primary_held);
        assert!(!view.is_panning());
    }

    #[test]
    fn secondary_button_is_ignored() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerButton {
                button: PointerButton::Secondary,
                pressed: true,
            },
        );

        assert_eq!(effect, DispatchEffect::NoChange);
        assert!(!pointer.primary_held);
    }

    #[test]
    fn release_does_not_clear_the_panning_flag() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();
        pointer.primary_held = true;
        dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerMove { x: 10.0, y: 10.0 },
        );
        assert!(view.is_panning());

        dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::PointerButton {
                button: PointerButton::Primary,
                pressed: false,
            },
        );

        // The debounce window owns the transition back to idle.
        assert!(!pointer.primary_held);
        assert!(view.is_panning());
    }

    #[test]
    fn resize_updates_the_viewport() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::Resize {
                pixel_width: 1024,
                pixel_height: 768,
                logical_width: 1024.0,
                logical_height: 768.0,
            },
        );

        assert_eq!(
            effect,
            DispatchEffect::ViewportChanged(ViewportUpdate::Resized)
        );
        assert_eq!(viewport.pixel_width(), 1024);
    }

    #[test]
    fn degenerate_resize_keeps_the_previous_viewport() {
        let (mut view, mut pointer, mut viewport) = setup_800x600();

        let effect = dispatch_event(
            &mut view,
            &mut pointer,
            &mut viewport,
            InputEvent::Resize {
                pixel_width: 0,
                pixel_height: 768,
                logical_width: 0.0,
                logical_height: 768.0,
            },
        );

        assert_eq!(
            effect,
            DispatchEffect::ViewportChanged(ViewportUpdate::Rejected)
        );
        assert_eq!(viewport.pixel_width(), 800);
        assert_eq!(viewport.pixel_height(), 600);
    }
}
