//! Integration tests: bounded undo history (sketch-editor ↔ sketch-render).
//!
//! Every mutating interaction pushes the prior surface state; only the five
//! most recent survive, and each undo restores exactly one of them.

use pretty_assertions::assert_eq;
use sketch_core::{
    Color, Line, LineCap, Outline, Point, SketchConfig, StrokeStyle, Surface, Tool,
};
use sketch_editor::{ClickTarget, DrawingController, InputEvent, Modifiers};
use sketch_render::{RasterSnapshot, RasterSurface};

type Controller = DrawingController<RasterSurface>;

fn controller() -> Controller {
    DrawingController::new(RasterSurface::new(120, 120))
}

fn dot(c: &mut Controller, x: f64, y: f64) {
    c.handle(&InputEvent::pointer_down(x, y));
    c.handle(&InputEvent::pointer_up(x, y));
}

/// Paint straight onto the surface without recording history.
fn stamp(c: &mut Controller, x: f64, y: f64) {
    let style = StrokeStyle::new(Color::BLUE, 4.0).with_cap(LineCap::Round);
    let p = Point::new(x, y);
    c.surface_mut().stroke(&Outline::Segment(Line::new(p, p)), &style);
}

fn state(c: &Controller) -> RasterSnapshot {
    c.surface().snapshot()
}

#[test]
fn undo_restores_prior_state_for_every_tool() {
    let cases: [(Tool, &[(f64, f64)]); 5] = [
        (Tool::Pen, &[(40.0, 40.0), (60.0, 70.0)]),
        (Tool::Eraser, &[(20.0, 20.0), (90.0, 20.0)]),
        (Tool::Line, &[(100.0, 30.0)]),
        (Tool::Rectangle, &[(90.0, 90.0)]),
        (Tool::Circle, &[(70.0, 60.0)]),
    ];
    for (tool, path) in cases {
        let mut c = controller();
        c.set_pen_width(30);
        dot(&mut c, 20.0, 20.0);
        let before = state(&c);

        c.set_tool(tool);
        c.handle(&InputEvent::pointer_down(50.0, 50.0));
        for &(x, y) in path {
            c.handle(&InputEvent::pointer_move(x, y));
        }
        c.handle(&InputEvent::pointer_up(0.0, 0.0));
        assert_ne!(state(&c), before, "{tool} changed nothing");

        assert!(c.undo());
        assert_eq!(state(&c), before, "{tool} undo");
    }
}

#[test]
fn history_keeps_five_most_recent() {
    let mut c = controller();
    let mut pre_states = Vec::new();
    for i in 0..6 {
        pre_states.push(state(&c));
        dot(&mut c, 10.0 + 15.0 * i as f64, 10.0);
    }
    assert_eq!(c.history_len(), 5);

    for expected in pre_states[1..].iter().rev() {
        assert!(c.undo());
        assert_eq!(&state(&c), expected);
    }
    assert!(!c.undo());
    // the first dot's pre-state was evicted
    assert_eq!(state(&c), pre_states[1]);
    assert!(!c.surface().is_blank());
}

#[test]
fn clears_are_undoable_and_bounded() {
    let mut c = controller();
    let mut pre_states = Vec::new();
    for i in 0..7 {
        stamp(&mut c, 10.0 + 12.0 * i as f64, 60.0);
        pre_states.push(state(&c));
        c.clear();
        assert!(c.surface().is_blank());
    }
    assert_eq!(c.history_len(), 5);

    // newest first: clear #7 back to clear #3
    for expected in pre_states[2..].iter().rev() {
        assert!(c.undo());
        assert_eq!(&state(&c), expected);
    }
    assert!(!c.undo());
}

#[test]
fn keyboard_shortcuts_undo_and_clear() {
    let mut c = controller();
    dot(&mut c, 30.0, 30.0);
    let drawn = state(&c);

    let cmd = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    assert!(c.handle(&InputEvent::Key {
        key: "Backspace".into(),
        modifiers: cmd,
        in_field: false,
    }));
    assert!(c.surface().is_blank());

    assert!(c.handle(&InputEvent::Key {
        key: "z".into(),
        modifiers: cmd,
        in_field: false,
    }));
    assert_eq!(state(&c), drawn);
}

#[test]
fn text_tool_pointer_down_records_history() {
    let mut c = controller();
    dot(&mut c, 30.0, 30.0);
    c.set_tool(Tool::Text);
    dot(&mut c, 60.0, 60.0);
    assert_eq!(c.history_len(), 2);

    c.handle(&InputEvent::Click {
        x: 60.0,
        y: 60.0,
        target: ClickTarget::Surface,
    });
    assert!(c.text_box().is_some());

    // undo while typing is left to the text box itself
    c.handle(&InputEvent::Key {
        key: "z".into(),
        modifiers: Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        },
        in_field: true,
    });
    assert_eq!(c.history_len(), 2);
}

#[test]
fn configured_depth_bounds_history() {
    let config = SketchConfig {
        undo_depth: 2,
        ..SketchConfig::default()
    };
    let mut c = DrawingController::from_config(RasterSurface::new(60, 60), &config).unwrap();
    for i in 0..4 {
        dot(&mut c, 10.0 + 10.0 * i as f64, 10.0);
    }
    assert_eq!(c.history_len(), 2);
    assert!(c.undo());
    assert!(c.undo());
    assert!(!c.undo());
}

#[test]
fn zero_depth_disables_undo() {
    let config = SketchConfig {
        undo_depth: 0,
        ..SketchConfig::default()
    };
    let mut c = DrawingController::from_config(RasterSurface::new(60, 60), &config).unwrap();
    dot(&mut c, 30.0, 30.0);
    assert_eq!(c.history_len(), 0);
    assert!(!c.undo());
    assert!(!c.surface().is_blank());
}
