//! Vector overlay recorded separately from the pixel buffer

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};

use crate::models::{Point, PointI};

/// One queued line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCommand {
    /// Start point
    pub a: Point,
    /// End point
    pub b: Point,
    /// Stroke or fill color
    pub color: Rgb<u8>,
    /// Stroke width in pixels; negative asks for a filled shape
    pub width: i32,
}

impl LineCommand {
    /// Whether this segment belongs to a filled outline
    pub fn is_filled(&self) -> bool {
        self.width < 0
    }

    /// Stroke width in pixels, at least 1 and never wider than `limit`
    fn stroke(&self, limit: u32) -> u32 {
        self.width.unsigned_abs().clamp(1, limit.max(1))
    }
}

/// Ordered list of overlay commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingLayer {
    commands: Vec<LineCommand>,
}

impl DrawingLayer {
    /// Empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a line segment
    pub fn line(&mut self, a: Point, b: Point, color: Rgb<u8>, width: i32) {
        self.commands.push(LineCommand { a, b, color, width });
    }

    /// Queued commands in draw order
    pub fn commands(&self) -> &[LineCommand] {
        &self.commands
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every queued command
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Rasterize every command onto `canvas`
    ///
    /// Filled segments that chain end-to-start back to their first point are
    /// painted as a polygon before any stroke is drawn.
    pub fn render_onto(&self, canvas: &mut RgbImage) {
        if canvas.width() == 0 || canvas.height() == 0 {
            return;
        }
        for (outline, color) in self.filled_outlines() {
            let clamped = outline.iter().map(|p| clamp_to_margin(*p, canvas.dimensions()));
            if let Some(outline) = polygon_outline(clamped) {
                let poly: Vec<imageproc::point::Point<i32>> = outline
                    .iter()
                    .map(|p| imageproc::point::Point::new(p.x, p.y))
                    .collect();
                draw_polygon_mut(canvas, &poly, color);
            }
        }
        for cmd in &self.commands {
            stroke_line(canvas, cmd);
        }
    }

    fn filled_outlines(&self) -> Vec<(Vec<PointI>, Rgb<u8>)> {
        let mut outlines = Vec::new();
        let mut chain: Vec<&LineCommand> = Vec::new();

        for cmd in self.commands.iter().filter(|c| c.is_filled()) {
            let continues = chain
                .last()
                .is_some_and(|last| last.color == cmd.color && last.b.to_pixel() == cmd.a.to_pixel());
            if !continues {
                chain.clear();
            }
            chain.push(cmd);

            if chain.len() >= 3 && cmd.b.to_pixel() == chain[0].a.to_pixel() {
                if let Some(outline) = polygon_outline(chain.iter().map(|c| c.a.to_pixel())) {
                    outlines.push((outline, cmd.color));
                }
                chain.clear();
            }
        }

        outlines
    }
}

/// Collapse repeated vertices; `None` if fewer than 3 distinct remain
fn polygon_outline(points: impl Iterator<Item = PointI>) -> Option<Vec<PointI>> {
    let mut outline: Vec<PointI> = Vec::new();
    for p in points {
        if outline.last() != Some(&p) {
            outline.push(p);
        }
    }
    while outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }
    (outline.len() >= 3).then_some(outline)
}

/// Pin a vertex into `[-w, 2w] x [-h, 2h]` so the rasterizer's edge
/// arithmetic stays within `i32`
fn clamp_to_margin(p: PointI, (w, h): (u32, u32)) -> PointI {
    let w = w.min(i32::MAX as u32 / 3) as i32;
    let h = h.min(i32::MAX as u32 / 3) as i32;
    PointI::new(p.x.clamp(-w, 2 * w), p.y.clamp(-h, 2 * h))
}

/// Liang-Barsky clip of segment `a`-`b` to `[lo.x, hi.x] x [lo.y, hi.y]`
fn clip_segment(a: Point, b: Point, lo: Point, hi: Point) -> Option<(Point, Point)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, a.x - lo.x),
        (dx, hi.x - a.x),
        (-dy, a.y - lo.y),
        (dy, hi.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a.translate(dx * t0, dy * t0), a.translate(dx * t1, dy * t1)))
}

fn stroke_line(canvas: &mut RgbImage, cmd: &LineCommand) {
    let dx = cmd.b.x - cmd.a.x;
    let dy = cmd.b.y - cmd.a.y;
    let len = (dx * dx + dy * dy).sqrt();

    if len == 0.0 {
        let p = cmd.a.to_pixel();
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < canvas.width() && (p.y as u32) < canvas.height() {
            canvas.put_pixel(p.x as u32, p.y as u32, cmd.color);
        }
        return;
    }

    // Thick strokes are parallel 1px segments spread along the normal
    let (nx, ny) = (-dy / len, dx / len);
    let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
    let diagonal = (w * w + h * h).sqrt().ceil() as u32 + 1;
    let stroke = cmd.stroke(diagonal);
    let half = (stroke as f64 - 1.0) / 2.0;
    let (lo, hi) = (Point::new(-1.0, -1.0), Point::new(w + 1.0, h + 1.0));
    for k in 0..stroke {
        let off = k as f64 - half;
        let a = cmd.a.translate(nx * off, ny * off);
        let b = cmd.b.translate(nx * off, ny * off);
        let Some((a, b)) = clip_segment(a, b, lo, hi) else {
            continue;
        };
        draw_line_segment_mut(
            canvas,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            cmd.color,
        );
    }
}
