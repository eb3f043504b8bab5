//! Dial renderer: lays out the compass face for one frame
//!
//! The face is a filled disc with 24 radial ticks, the four cardinal labels on
//! every sixth tick and a small arrowhead next to North. Ticks and labels are
//! drawn along the top edge of the dial, and the frame is turned 15° about
//! the center between ticks. The whole face is turned by the bearing first,
//! so it moves as one rigid body.
//!
//! Rendering produces a [`Frame`], a flat list of primitives in surface
//! coordinates that a host replays onto its own canvas through [`Canvas`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{CompassError, Result};
use crate::transform::TransformStack;
use crate::types::{CardinalLabel, Color, DialStyle, PaintRole};
use nalgebra::Point2;

/// Number of ticks around the dial
pub const TICK_COUNT: usize = 24;

/// Angle between neighbouring ticks in degrees
pub const TICK_STEP_DEGREES: f32 = 360.0 / TICK_COUNT as f32;

/// Sample text whose width is used as the label row height
const ROW_HEIGHT_SAMPLE: &str = "yY";

/// Sample text whose width is used to center every label
const LABEL_WIDTH_SAMPLE: &str = "W";

/// Text measurement supplied by the host's font stack
pub trait FontMetrics {
    /// Advance width of `text` at `size`
    fn text_width(&self, text: &str, size: f32) -> f32;
}

/// Fixed-advance font approximation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the text size
    pub advance_ratio: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance_ratio
    }
}

/// Per-frame geometry derived from the surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: Point2<f32>,
    pub radius: f32,
    /// Height of one text row, also the offset between ticks and labels
    pub row_height: f32,
    /// Width used to center the cardinal labels
    pub label_width: f32,
}

impl DialGeometry {
    /// Fit the dial into the largest square in a `width × height` surface
    ///
    /// # Errors
    /// [`CompassError::SurfaceTooSmall`] if the square has no positive, finite
    /// radius.
    pub fn measure(
        width: f32,
        height: f32,
        style: &DialStyle,
        metrics: &impl FontMetrics,
    ) -> Result<Self> {
        let side = width.min(height);
        let center = Point2::new(side / 2.0, side / 2.0);
        let radius = center.x.min(center.y);

        if !radius.is_finite() || radius <= 0.0 {
            return Err(CompassError::SurfaceTooSmall { side });
        }

        Ok(Self {
            center,
            radius,
            row_height: metrics.text_width(ROW_HEIGHT_SAMPLE, style.text_size),
            label_width: metrics.text_width(LABEL_WIDTH_SAMPLE, style.text_size),
        })
    }

    /// Y coordinate of the unrotated top of the dial
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }
}

/// Which part of the face a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialPart {
    /// Radial tick with its index, 0 being North
    Tick(usize),
    /// One stroke of the north arrowhead
    NorthArrow,
}

/// One drawing primitive in surface coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point2<f32>,
        radius: f32,
        paint: PaintRole,
    },
    Line {
        from: Point2<f32>,
        to: Point2<f32>,
        paint: PaintRole,
        part: DialPart,
    },
    /// Text anchored at its baseline start and turned by `rotation` degrees
    /// about that anchor
    Text {
        label: CardinalLabel,
        text: String,
        origin: Point2<f32>,
        rotation: f32,
        paint: PaintRole,
    },
}

/// Drawing surface provided by the host
pub trait Canvas {
    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, color: Color);

    fn stroke_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color);

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point2<f32>,
        rotation: f32,
        size: f32,
        color: Color,
    );
}

/// Everything drawn for one frame, in drawing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Background disc, if anything was drawn
    pub fn disc(&self) -> Option<(Point2<f32>, f32)> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }

    /// Tick segments in drawing order
    pub fn ticks(&self) -> impl Iterator<Item = (usize, Point2<f32>, Point2<f32>)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line {
                from,
                to,
                part: DialPart::Tick(index),
                ..
            } => Some((*index, *from, *to)),
            _ => None,
        })
    }

    /// North arrowhead strokes
    pub fn arrow(&self) -> impl Iterator<Item = (Point2<f32>, Point2<f32>)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line {
                from,
                to,
                part: DialPart::NorthArrow,
                ..
            } => Some((*from, *to)),
            _ => None,
        })
    }

    /// Anchor and rotation of a cardinal label
    pub fn label(&self, wanted: CardinalLabel) -> Option<(Point2<f32>, f32)> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Text {
                label,
                origin,
                rotation,
                ..
            } if *label == wanted => Some((*origin, *rotation)),
            _ => None,
        })
    }

    /// Emit every primitive onto a host canvas
    pub fn replay(&self, style: &DialStyle, canvas: &mut impl Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    paint,
                } => canvas.fill_circle(*center, *radius, style.color(*paint)),
                DrawCommand::Line {
                    from, to, paint, ..
                } => canvas.stroke_line(*from, *to, style.color(*paint)),
                DrawCommand::Text {
                    text,
                    origin,
                    rotation,
                    paint,
                    ..
                } => canvas.draw_text(
                    text,
                    *origin,
                    *rotation,
                    style.text_size,
                    style.color(*paint),
                ),
            }
        }
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn line(&mut self, stack: &TransformStack, from: Point2<f32>, to: Point2<f32>, part: DialPart) {
        self.push(DrawCommand::Line {
            from: stack.map(from),
            to: stack.map(to),
            paint: PaintRole::Marker,
            part,
        });
    }
}

/// Lays out the compass face
///
/// Holds only the host's style and font metrics. Every call to
/// [`DialRenderer::render`] starts from scratch.
///
/// # Example
/// ```
/// use compass_dial::{DialRenderer, DialStyle, CardinalLabel};
///
/// let renderer = DialRenderer::new(DialStyle::default());
/// let frame = renderer.render(200.0, 200.0, Some(0.0));
///
/// assert_eq!(frame.disc().unwrap().1, 100.0);
/// assert_eq!(frame.ticks().count(), 24);
///
/// let (north, _) = frame.label(CardinalLabel::North).unwrap();
/// assert!(north.y < 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct DialRenderer<M = MonospaceMetrics> {
    style: DialStyle,
    metrics: M,
}

impl DialRenderer {
    pub fn new(style: DialStyle) -> Self {
        Self::with_metrics(style, MonospaceMetrics::default())
    }
}

impl<M: FontMetrics> DialRenderer<M> {
    pub fn with_metrics(style: DialStyle, metrics: M) -> Self {
        Self { style, metrics }
    }

    pub fn style(&self) -> &DialStyle {
        &self.style
    }

    /// Geometry the next frame would use for this surface size
    pub fn geometry(&self, width: f32, height: f32) -> Result<DialGeometry> {
        DialGeometry::measure(width, height, &self.style, &self.metrics)
    }

    /// Lay out one frame, drawing nothing if the surface is too small
    ///
    /// A missing bearing draws the dial unrotated.
    pub fn render(&self, width: f32, height: f32, bearing: Option<f32>) -> Frame {
        match self.try_render(width, height, bearing) {
            Ok(frame) => frame,
            Err(error) => {
                log::debug!("Skipping dial frame: {}", error);
                Frame::default()
            }
        }
    }

    /// Lay out one frame
    ///
    /// # Errors
    /// [`CompassError::SurfaceTooSmall`] for a surface without a usable radius.
    pub fn try_render(&self, width: f32, height: f32, bearing: Option<f32>) -> Result<Frame> {
        let geometry = self.geometry(width, height)?;
        let bearing = bearing.unwrap_or(0.0);

        let mut frame = Frame::default();
        frame.push(DrawCommand::Circle {
            center: geometry.center,
            radius: geometry.radius,
            paint: PaintRole::Background,
        });

        let mut stack = TransformStack::new();
        stack.scoped(|stack| {
            stack.rotate(bearing, geometry.center);

            for tick in 0..TICK_COUNT {
                self.draw_tick(&mut frame, stack, &geometry, tick);
                stack.rotate(TICK_STEP_DEGREES, geometry.center);
            }
        });

        Ok(frame)
    }

    fn draw_tick(
        &self,
        frame: &mut Frame,
        stack: &mut TransformStack,
        geometry: &DialGeometry,
        tick: usize,
    ) {
        let x = geometry.center.x;
        let top = geometry.top();
        let row = geometry.row_height;

        frame.line(
            stack,
            Point2::new(x, top),
            Point2::new(x, top + self.style.tick_length),
            DialPart::Tick(tick),
        );

        let Some(label) = CardinalLabel::for_tick(tick) else {
            return;
        };

        stack.scoped(|stack| {
            stack.translate(0.0, row);

            if label == CardinalLabel::North {
                let apex = Point2::new(x, top + 2.0 * row);
                let wing = self.style.arrow_half_width;
                let base = top + 3.0 * row;
                frame.line(stack, apex, Point2::new(x - wing, base), DialPart::NorthArrow);
                frame.line(stack, apex, Point2::new(x + wing, base), DialPart::NorthArrow);
            }

            frame.push(DrawCommand::Text {
                label,
                text: String::from(self.style.labels.get(label)),
                origin: stack.map(Point2::new(x - geometry.label_width / 2.0, top + row)),
                rotation: stack.rotation_degrees(),
                paint: PaintRole::Text,
            });
        });
    }
}
