//! The drawing-state controller.
//!
//! Owns the surface, the toolbar style, pointer tracking and the bounded
//! undo history, and turns pointer/keyboard events and toolbar commands into
//! surface mutations. Every event branches on the tool that is active *at
//! that event*, so switching tools mid-drag takes effect immediately.

use crate::input::{ClickTarget, InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::text_entry::{TextBox, TextEntry};
use crate::tools;
use sketch_core::{
    Color, CompositeMode, FontSpec, Line, Outline, Point, SketchConfig, SketchError, StrokeStyle,
    StyleState, Surface, Tool, UndoHistory,
};

/// Key that commits the text box.
pub const COMMIT_KEY: &str = "Enter";

/// Freehand path in progress: where it last reached and how it is stroked.
#[derive(Debug, Clone, Copy)]
struct FreehandPath {
    last: Point,
    style: StrokeStyle,
}

pub struct DrawingController<S: Surface> {
    surface: S,
    style: StyleState,
    history: UndoHistory<S::Snapshot>,
    drawing: bool,
    start_position: Point,
    current_position: Point,
    /// Surface as it was at pointer-down; shape previews repaint from it.
    preview_base: Option<S::Snapshot>,
    path: Option<FreehandPath>,
    /// Composite mode chosen at the last pointer-down.
    composite: CompositeMode,
    text: TextEntry,
}

impl<S: Surface> DrawingController<S> {
    /// Create a controller with default style and undo depth.
    pub fn new(surface: S) -> Self {
        Self::with_style(surface, StyleState::default(), sketch_core::DEFAULT_UNDO_DEPTH)
    }

    /// Create a controller from a validated configuration.
    pub fn from_config(surface: S, config: &SketchConfig) -> Result<Self, SketchError> {
        config.validate()?;
        let style = StyleState::from_config(config)?;
        Ok(Self::with_style(surface, style, config.undo_depth))
    }

    pub fn with_style(surface: S, style: StyleState, undo_depth: usize) -> Self {
        Self {
            surface,
            style,
            history: UndoHistory::new(undo_depth),
            drawing: false,
            start_position: Point::ZERO,
            current_position: Point::ZERO,
            preview_base: None,
            path: None,
            composite: CompositeMode::SourceOver,
            text: TextEntry::new(),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct surface access. Mutations made here bypass the undo history.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// Current style as JSON for the toolbar.
    pub fn style_json(&self) -> String {
        serde_json::to_string(&self.style).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn tool(&self) -> Tool {
        self.style.tool
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn start_position(&self) -> Point {
        self.start_position
    }

    pub fn current_position(&self) -> Point {
        self.current_position
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn composite(&self) -> CompositeMode {
        self.composite
    }

    pub fn text_entry(&self) -> &TextEntry {
        &self.text
    }

    pub fn text_entry_mut(&mut self) -> &mut TextEntry {
        &mut self.text
    }

    pub fn text_box(&self) -> Option<&TextBox> {
        self.text.text_box()
    }

    // ─── Style setters ───────────────────────────────────────────────────

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    /// Set the color from a palette name or hex string.
    pub fn set_color_str(&mut self, value: &str) -> Result<(), SketchError> {
        self.style.color = Color::from_name_or_hex(value)?;
        Ok(())
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.style.tool {
            log::debug!("tool {} → {}", self.style.tool, tool);
        }
        self.style.tool = tool;
    }

    /// Set the tool from its name. Unknown names leave the tool unchanged.
    pub fn set_tool_str(&mut self, name: &str) -> Result<(), SketchError> {
        let tool = name.parse()?;
        self.set_tool(tool);
        Ok(())
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.style.pen_width = width;
    }

    pub fn set_eraser_width(&mut self, width: u32) {
        self.style.eraser_width = width;
    }

    pub fn set_shape_width(&mut self, width: u32) {
        self.style.shape_width = width;
    }

    /// Also restyles an open text box so it previews the committed size.
    pub fn set_font_size(&mut self, size_px: u32) {
        self.style.font.size_px = size_px;
        self.text.set_font(self.style.font.clone());
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.style.font.family = family.into();
        self.text.set_font(self.style.font.clone());
    }

    pub fn font(&self) -> &FontSpec {
        &self.style.font
    }

    // ─── Interaction ─────────────────────────────────────────────────────

    /// Pointer-down: snapshot for undo, then start a stroke, a shape, or the
    /// text-entry flow depending on the active tool.
    pub fn begin_interaction(&mut self, point: Point) {
        self.drawing = true;
        self.start_position = point;

        let snapshot = self.surface.snapshot();
        self.preview_base = Some(snapshot.clone());
        self.push_history(snapshot);

        let tool = self.style.tool;
        if tool != Tool::Text {
            self.text.disarm();
        }
        if tool != Tool::Eraser {
            self.composite = CompositeMode::SourceOver;
        }
        self.path = None;

        if tool.is_freehand() {
            self.start_path(tool, point);
        } else if tool == Tool::Text {
            self.text.arm();
        }
        log::debug!("begin {tool} at ({}, {})", point.x, point.y);
    }

    /// Pointer-up. Strokes and shapes are already on the surface.
    pub fn end_interaction(&mut self) {
        if self.drawing {
            log::debug!("end {} interaction", self.style.tool);
        }
        self.drawing = false;
    }

    /// Pointer-move. Always tracks the position; paints only while drawing.
    /// Returns whether the surface changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.current_position = point;
        if !self.drawing {
            return false;
        }

        let tool = self.style.tool;
        if tool.is_freehand() {
            match self.path.as_mut() {
                Some(path) => {
                    let segment = Outline::Segment(Line::new(path.last, point));
                    self.surface.stroke(&segment, &path.style);
                    path.last = point;
                }
                // switched to a freehand tool mid-drag: start from here
                None => self.start_path(tool, point),
            }
            return true;
        }
        if !tool.is_shape() {
            return false;
        }
        let Some(base) = self.preview_base.as_ref() else {
            return false;
        };
        tools::render_shape_frame(
            &mut self.surface,
            base,
            tool,
            self.start_position,
            point,
            &self.style,
            self.composite,
        );
        true
    }

    /// Snapshot for undo, then wipe the surface.
    pub fn clear(&mut self) {
        let snapshot = self.surface.snapshot();
        self.push_history(snapshot);
        self.surface.clear();
        log::debug!("cleared surface ({} undo steps)", self.history.len());
    }

    /// Restore the most recent snapshot. Returns `false` on empty history.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.surface.restore(&snapshot);
                log::debug!("undo ({} steps left)", self.history.len());
                true
            }
            None => false,
        }
    }

    /// Reallocate the surface. Pixel content is lost.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        log::debug!("resized surface to {width}x{height}");
    }

    // ─── Text entry ──────────────────────────────────────────────────────

    /// A click landed somewhere. Opens an armed text box on the surface,
    /// dismisses it on an outside click. Returns whether the box changed.
    pub fn click(&mut self, point: Point, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Surface => self.text.open_at(point, self.style.font.clone()),
            ClickTarget::TextBox => false,
            ClickTarget::Outside => self.text.dismiss(),
        }
    }

    /// Draw the text box content at its anchor (baseline one font size
    /// below the top) and close it. Returns whether anything was committed.
    pub fn commit_text(&mut self) -> bool {
        let Some(commit) = self.text.commit() else {
            return false;
        };
        let font = self.style.font.clone();
        let origin = Point::new(commit.anchor.x, commit.anchor.y + font.size_px as f64);
        self.surface.fill_text(
            &commit.content,
            origin,
            &font,
            self.style.color,
            self.composite,
        );
        log::debug!("committed text {:?} at {origin:?}", commit.content);
        true
    }

    /// Route a key press: Enter commits an open text box; while the box is
    /// open every other key belongs to it. Keys typed into an editable page
    /// control (`in_field`) never trigger shortcuts. Otherwise resolve
    /// shortcuts.
    pub fn key(&mut self, key: &str, modifiers: Modifiers, in_field: bool) -> bool {
        if self.text.is_open() {
            return key == COMMIT_KEY && self.commit_text();
        }
        if in_field {
            return false;
        }
        let Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        } = modifiers;
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return false;
        };
        match action {
            ShortcutAction::SelectTool(tool) => {
                self.set_tool(tool);
                false
            }
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Clear => {
                self.clear();
                true
            }
        }
    }

    /// Dispatch a normalized event. Returns whether the surface or the text
    /// box changed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.begin_interaction(Point::new(*x, *y));
                true
            }
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { .. } => {
                self.end_interaction();
                false
            }
            InputEvent::Click { x, y, target } => self.click(Point::new(*x, *y), *target),
            InputEvent::Key {
                key,
                modifiers,
                in_field,
            } => self.key(key, *modifiers, *in_field),
            InputEvent::Resize { width, height } => {
                self.resize(*width, *height);
                true
            }
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn push_history(&mut self, snapshot: S::Snapshot) {
        if self.history.push(snapshot).is_some() {
            log::trace!("undo history full, evicted oldest snapshot");
        }
    }

    /// Begin a freehand path and stamp a dot so a single click leaves a mark.
    fn start_path(&mut self, tool: Tool, point: Point) {
        let Some(style) = tools::freehand_style(tool, &self.style) else {
            return;
        };
        self.composite = style.composite;
        self.surface
            .stroke(&Outline::Segment(Line::new(point, point)), &style);
        self.path = Some(FreehandPath { last: point, style });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records draw calls; snapshots are the number of calls so far.
    #[derive(Default)]
    struct Recorder {
        strokes: Vec<(Outline, StrokeStyle)>,
        texts: Vec<(String, Point, FontSpec, Color)>,
        restores: Vec<usize>,
        clears: usize,
        size: (u32, u32),
    }

    impl Surface for Recorder {
        type Snapshot = usize;

        fn width(&self) -> u32 {
            self.size.0
        }

        fn height(&self) -> u32 {
            self.size.1
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn snapshot(&self) -> usize {
            self.strokes.len() + self.texts.len() + self.clears
        }

        fn restore(&mut self, snapshot: &usize) {
            self.restores.push(*snapshot);
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn stroke(&mut self, outline: &Outline, style: &StrokeStyle) {
            self.strokes.push((*outline, *style));
        }

        fn fill_text(
            &mut self,
            text: &str,
            origin: Point,
            font: &FontSpec,
            color: Color,
            _composite: CompositeMode,
        ) {
            self.texts.push((text.to_string(), origin, font.clone(), color));
        }
    }

    fn controller() -> DrawingController<Recorder> {
        DrawingController::new(Recorder::default())
    }

    #[test]
    fn pointer_down_stamps_a_dot() {
        let mut c = controller();
        c.begin_interaction(Point::new(5.0, 6.0));
        assert!(c.is_drawing());
        assert_eq!(c.history_len(), 1);
        let (outline, style) = c.surface().strokes[0];
        assert_eq!(outline, Outline::Segment(Line::new((5.0, 6.0), (5.0, 6.0))));
        assert_eq!(style.color, Color::RED);
    }

    #[test]
    fn pen_moves_extend_from_last_point() {
        let mut c = controller();
        c.begin_interaction(Point::new(0.0, 0.0));
        c.pointer_move(Point::new(10.0, 0.0));
        c.pointer_move(Point::new(10.0, 10.0));
        let segments: Vec<_> = c.surface().strokes.iter().map(|(o, _)| *o).collect();
        assert_eq!(
            segments[2],
            Outline::Segment(Line::new((10.0, 0.0), (10.0, 10.0)))
        );
    }

    #[test]
    fn moves_without_pointer_down_only_track() {
        let mut c = controller();
        assert!(!c.pointer_move(Point::new(3.0, 4.0)));
        assert_eq!(c.current_position(), Point::new(3.0, 4.0));
        assert!(c.surface().strokes.is_empty());

        c.begin_interaction(Point::new(0.0, 0.0));
        c.end_interaction();
        let before = c.surface().strokes.len();
        assert!(!c.pointer_move(Point::new(9.0, 9.0)));
        assert_eq!(c.surface().strokes.len(), before);
    }

    #[test]
    fn eraser_switches_composite_and_other_tools_reset_it() {
        let mut c = controller();
        c.set_tool(Tool::Eraser);
        c.begin_interaction(Point::new(1.0, 1.0));
        assert_eq!(c.composite(), CompositeMode::DestinationOut);
        c.end_interaction();

        c.set_tool(Tool::Line);
        c.begin_interaction(Point::new(1.0, 1.0));
        assert_eq!(c.composite(), CompositeMode::SourceOver);
    }

    #[test]
    fn shape_moves_restore_the_pointer_down_snapshot() {
        let mut c = controller();
        c.set_tool(Tool::Rectangle);
        c.begin_interaction(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(20.0, 20.0));
        c.pointer_move(Point::new(30.0, 30.0));
        // both frames restore the state captured at pointer-down
        assert_eq!(c.surface().restores, vec![0, 0]);
        assert_eq!(c.surface().strokes.len(), 2);
    }

    #[test]
    fn tool_switch_mid_drag_uses_new_tool() {
        let mut c = controller();
        c.set_tool(Tool::Line);
        c.begin_interaction(Point::new(10.0, 10.0));
        c.set_tool(Tool::Pen);
        c.pointer_move(Point::new(20.0, 10.0));
        c.pointer_move(Point::new(30.0, 10.0));
        let (last, style) = *c.surface().strokes.last().unwrap();
        assert_eq!(last, Outline::Segment(Line::new((20.0, 10.0), (30.0, 10.0))));
        assert_eq!(style.width, 10.0);
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut c = controller();
        assert!(!c.undo());
        assert!(c.surface().restores.is_empty());
    }

    #[test]
    fn text_flow_commits_at_baseline() {
        let mut c = controller();
        c.set_tool(Tool::Text);
        c.begin_interaction(Point::new(40.0, 50.0));
        c.end_interaction();
        assert!(c.text_entry().is_armed());

        assert!(c.click(Point::new(40.0, 50.0), ClickTarget::Surface));
        c.text_entry_mut().set_content("hello");
        assert!(c.key(COMMIT_KEY, Modifiers::NONE, false));

        let (text, origin, font, color) = c.surface().texts[0].clone();
        assert_eq!(text, "hello");
        assert_eq!(origin, Point::new(40.0, 66.0));
        assert_eq!(font.css(), "16px Arial");
        assert_eq!(color, Color::RED);
        assert!(c.text_box().is_none());
    }

    #[test]
    fn outside_click_dismisses_without_drawing() {
        let mut c = controller();
        c.set_tool(Tool::Text);
        c.begin_interaction(Point::new(5.0, 5.0));
        c.click(Point::new(5.0, 5.0), ClickTarget::Surface);
        assert!(!c.click(Point::ZERO, ClickTarget::TextBox));
        assert!(c.text_box().is_some());
        assert!(c.click(Point::ZERO, ClickTarget::Outside));
        assert!(!c.key(COMMIT_KEY, Modifiers::NONE, false));
        assert!(c.surface().texts.is_empty());
    }

    #[test]
    fn non_text_pointer_down_disarms_activation() {
        let mut c = controller();
        c.set_tool(Tool::Text);
        c.begin_interaction(Point::new(5.0, 5.0));
        c.end_interaction();
        c.set_tool(Tool::Pen);
        c.begin_interaction(Point::new(5.0, 5.0));
        c.end_interaction();
        assert!(!c.click(Point::new(5.0, 5.0), ClickTarget::Surface));
        assert!(c.text_box().is_none());
    }

    #[test]
    fn font_changes_restyle_open_box() {
        let mut c = controller();
        c.set_tool(Tool::Text);
        c.begin_interaction(Point::new(5.0, 5.0));
        c.click(Point::new(5.0, 5.0), ClickTarget::Surface);
        c.set_font_size(32);
        c.set_font_family("Courier");
        assert_eq!(c.text_box().unwrap().font, FontSpec::new(32, "Courier"));
    }

    #[test]
    fn shortcuts_ignored_while_typing() {
        let mut c = controller();
        c.set_tool(Tool::Text);
        c.begin_interaction(Point::new(5.0, 5.0));
        c.click(Point::new(5.0, 5.0), ClickTarget::Surface);
        c.key("r", Modifiers::NONE, false);
        assert_eq!(c.tool(), Tool::Text);

        c.commit_text();
        c.key("r", Modifiers::NONE, false);
        assert_eq!(c.tool(), Tool::Rectangle);
    }

    #[test]
    fn string_setters_validate() {
        let mut c = controller();
        assert!(c.set_tool_str("circle").is_ok());
        assert_eq!(c.tool(), Tool::Circle);
        assert_eq!(
            c.set_tool_str("bucket"),
            Err(SketchError::UnknownTool("bucket".into()))
        );
        assert_eq!(c.tool(), Tool::Circle);

        assert!(c.set_color_str("green").is_ok());
        assert_eq!(c.style().color, Color::GREEN);
        assert!(c.set_color_str("chartreuse").is_err());
        assert_eq!(c.style().color, Color::GREEN);
    }

    #[test]
    fn from_config_applies_style_and_depth() {
        let config = SketchConfig::from_json(
            r#"{"undo_depth": 3, "tool": "circle", "color": "blue", "shape_width": 4}"#,
        )
        .unwrap();
        let c = DrawingController::from_config(Recorder::default(), &config).unwrap();
        assert_eq!(c.undo_depth(), 3);
        assert_eq!(c.tool(), Tool::Circle);
        assert_eq!(c.style().color, Color::BLUE);
        assert_eq!(c.style().shape_width, 4);
    }

    #[test]
    fn handle_dispatches_events() {
        let mut c = controller();
        assert!(c.handle(&InputEvent::pointer_down(1.0, 1.0)));
        assert!(c.handle(&InputEvent::pointer_move(2.0, 2.0)));
        assert!(!c.handle(&InputEvent::pointer_up(2.0, 2.0)));
        assert!(!c.is_drawing());
        assert!(c.handle(&InputEvent::Resize {
            width: 300,
            height: 200
        }));
        assert_eq!(c.surface().size, (300, 200));
        assert!(c.handle(&InputEvent::Key {
            key: "z".into(),
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
            in_field: false,
        }));
        assert_eq!(c.history_len(), 0);
    }

    #[test]
    fn keys_typed_into_page_fields_skip_shortcuts() {
        let mut c = controller();
        c.begin_interaction(Point::new(5.0, 5.0));
        c.end_interaction();

        for key in ["C", "o", "u", "r", "i", "e", "r"] {
            assert!(!c.key(key, Modifiers::NONE, true));
        }
        assert_eq!(c.tool(), Tool::Pen);

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(!c.key("Backspace", ctrl, true));
        assert!(!c.key("z", ctrl, true));
        assert_eq!(c.surface().clears, 0);
        assert_eq!(c.history_len(), 1);
    }

    #[test]
    fn enter_in_open_text_box_still_commits() {
        let mut c = controller();
        c.set_tool(Tool::Text);
        c.begin_interaction(Point::new(10.0, 10.0));
        c.click(Point::new(10.0, 10.0), ClickTarget::Surface);
        c.text_entry_mut().set_content("typed");
        assert!(c.handle(&InputEvent::Key {
            key: COMMIT_KEY.into(),
            modifiers: Modifiers::NONE,
            in_field: true,
        }));
        assert_eq!(c.surface().texts.len(), 1);
    }

    #[test]
    fn style_json_reflects_setters() {
        let mut c = controller();
        c.set_pen_width(3);
        c.set_tool(Tool::Eraser);
        let json: serde_json::Value = serde_json::from_str(&c.style_json()).unwrap();
        assert_eq!(json["pen_width"], 3);
        assert_eq!(json["tool"], "eraser");
    }
}
