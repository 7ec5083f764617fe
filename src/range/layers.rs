//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::vello::kurbo::{Point, Rect, Size};
use xilem::masonry::vello::peniko::Color;

/// Which font a text command is shaped with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextRole {
    Icon,
    Label,
}

/// A single primitive recorded into a layer's display list.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    /// Blurred halo behind a circle.
    Shadow {
        center: Point,
        radius: f64,
        blur: f64,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    /// Text whose layout box starts at `origin` (top-left).
    Text {
        text: String,
        origin: Point,
        font_size: f32,
        color: Color,
        role: TextRole,
    },
}

/// Surface size and clip rect as seen by one paint callback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasSnapshot {
    pub size: Size,
    pub rect: Rect,
}

impl CanvasSnapshot {
    pub fn new(size: Size) -> Self {
        Self { size, rect: Rect::from_origin_size(Point::ZERO, size) }
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn mid_y(&self) -> f64 {
        self.rect.center().y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Thumbs,
    Segments,
    ValueLabels,
}

impl LayerKind {
    /// Order in which dirty layers are repainted within one pass.
    pub const CAUSAL: [LayerKind; 3] = [LayerKind::Thumbs, LayerKind::Segments, LayerKind::ValueLabels];

    /// Bottom-to-top order on screen.
    pub const COMPOSITE: [LayerKind; 3] = [LayerKind::Segments, LayerKind::Thumbs, LayerKind::ValueLabels];

    fn slot(self) -> usize {
        match self {
            LayerKind::Thumbs => 0,
            LayerKind::Segments => 1,
            LayerKind::ValueLabels => 2,
        }
    }
}

/// One independently redrawable surface.
#[derive(Debug, Default)]
pub struct Layer {
    commands: Vec<DrawCommand>,
    snapshot: CanvasSnapshot,
    dirty: bool,
}

impl Layer {
    /// Start a paint callback: clear to transparent and capture the canvas.
    ///
    /// The command buffer keeps its allocation between frames.
    pub fn begin(&mut self, size: Size) -> CanvasSnapshot {
        self.commands.clear();
        self.snapshot = CanvasSnapshot::new(size);
        self.dirty = false;
        self.snapshot
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        self.snapshot
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// The Thumbs, Segments and ValueLabels surfaces of a slider.
#[derive(Debug)]
pub struct LayerSet {
    layers: [Layer; 3],
}

impl Default for LayerSet {
    fn default() -> Self {
        let mut set = Self { layers: Default::default() };
        set.invalidate_all();
        set
    }
}

impl LayerSet {
    pub fn get(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind.slot()]
    }

    pub fn get_mut(&mut self, kind: LayerKind) -> &mut Layer {
        &mut self.layers[kind.slot()]
    }

    pub fn invalidate(&mut self, kind: LayerKind) {
        self.get_mut(kind).dirty = true;
    }

    pub fn invalidate_all(&mut self) {
        for layer in &mut self.layers {
            layer.dirty = true;
        }
    }

    pub fn is_dirty(&self, kind: LayerKind) -> bool {
        self.get(kind).dirty
    }

    pub fn any_dirty(&self) -> bool {
        self.layers.iter().any(|l| l.dirty)
    }

    /// Layers with their display lists, bottom to top.
    pub fn composited(&self) -> impl Iterator<Item = (LayerKind, &Layer)> {
        LayerKind::COMPOSITE.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_starts_dirty() {
        let set = LayerSet::default();
        for kind in LayerKind::CAUSAL {
            assert!(set.is_dirty(kind));
        }
    }

    #[test]
    fn begin_clears_commands_and_captures_rect() {
        let mut set = LayerSet::default();
        let layer = set.get_mut(LayerKind::Segments);
        layer.push(DrawCommand::Circle { center: Point::ZERO, radius: 1.0, color: Color::BLACK });
        let snapshot = layer.begin(Size::new(200.0, 40.0));
        assert!(layer.commands().is_empty());
        assert!(!layer.is_dirty());
        assert_eq!(snapshot.rect, Rect::new(0.0, 0.0, 200.0, 40.0));
        assert_eq!(snapshot.mid_y(), 20.0);
    }

    #[test]
    fn composite_order_puts_labels_on_top() {
        let set = LayerSet::default();
        let order: Vec<_> = set.composited().map(|(kind, _)| kind).collect();
        assert_eq!(order, LayerKind::COMPOSITE);
    }
}
