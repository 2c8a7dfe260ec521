/// Planar geometry over small point sets: centroids, bounding boxes,
/// pairwise distances and quadrilateral areas
use crate::config::AreaPolicy;
use crate::error::{BarcodeError, Result};
use crate::models::Point;

/// Quadrilateral as four points in cyclic order
pub type Quad = [Point; 4];

/// Edges of a quadrilateral as index pairs, in cyclic order
pub const EDGES: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];

/// Diagonals of a quadrilateral as index pairs
pub const DIAGONALS: [(usize, usize); 2] = [(0, 2), (1, 3)];

/// Axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge
    pub min_x: f64,
    /// Top edge
    pub min_y: f64,
    /// Right edge
    pub max_x: f64,
    /// Bottom edge
    pub max_y: f64,
}

impl BoundingBox {
    /// Smallest box containing every point; `None` for an empty slice
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(rest.iter().fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Corners ordered (min-x,min-y), (min-x,max-y), (max-x,max-y), (max-x,min-y)
    pub fn corners(&self) -> Quad {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.max_x, self.min_y),
        ]
    }

    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Arithmetic mean of the points; the origin for an empty slice
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = points.len() as f64;
    Point::new(sx / n, sy / n)
}

/// Symmetric matrix of Euclidean distances between every pair of corners
#[allow(clippy::needless_range_loop)]
pub fn pairwise_distances(quad: &Quad) -> [[f64; 4]; 4] {
    let mut m = [[0.0f64; 4]; 4];
    for i in 0..4 {
        for j in (i + 1)..4 {
            let d = quad[i].distance(&quad[j]);
            m[i][j] = d;
            m[j][i] = d;
        }
    }
    m
}

/// Side lengths (0,1), (1,2), (2,3), (3,0)
pub fn edge_lengths(quad: &Quad) -> [f64; 4] {
    let m = pairwise_distances(quad);
    EDGES.map(|(i, j)| m[i][j])
}

/// Diagonal lengths (0,2), (1,3)
pub fn diagonal_lengths(quad: &Quad) -> [f64; 2] {
    let m = pairwise_distances(quad);
    DIAGONALS.map(|(i, j)| m[i][j])
}

/// Bretschneider radicand from sides and diagonals, together with `s^4`
/// (semi-perimeter to the fourth), the magnitude of its terms
pub fn bretschneider_radicand(quad: &Quad) -> (f64, f64) {
    let m = pairwise_distances(quad);
    let (a, b, c, d) = (m[0][1], m[1][2], m[2][3], m[3][0]);
    let (p, q) = (m[0][2], m[1][3]);

    let s = (a + b + c + d) / 2.0;
    let ac_bd = a * c + b * d;
    let pq = p * q;
    let radicand = (s - a) * (s - b) * (s - c) * (s - d) - (ac_bd + pq) * (ac_bd - pq) / 4.0;
    (radicand, s.powi(4))
}

/// Square root of an area radicand under `policy`
///
/// A negative radicand within `epsilon * scale` of zero is floating-point
/// cancellation and always clamps to zero. The radicand equals
/// `(p * q * sin(theta) / 2)^2` for any four points, so anything further
/// below zero means the lengths were not computed from a planar quad.
pub fn area_from_radicand(radicand: f64, scale: f64, policy: AreaPolicy, epsilon: f64) -> Result<f64> {
    if radicand >= 0.0 {
        return Ok(radicand.sqrt());
    }
    let tolerance = epsilon * scale.max(1.0);
    match policy {
        AreaPolicy::Clamp => Ok(0.0),
        AreaPolicy::Strict if radicand >= -tolerance => Ok(0.0),
        AreaPolicy::Strict => Err(BarcodeError::DegenerateGeometry { radicand }),
    }
}

/// Quadrilateral area by the generalized Bretschneider formula
pub fn bretschneider_area(quad: &Quad, policy: AreaPolicy, epsilon: f64) -> Result<f64> {
    let (radicand, scale) = bretschneider_radicand(quad);
    area_from_radicand(radicand, scale, policy, epsilon)
}

/// Polygon area by the shoelace formula (unsigned)
pub fn shoelace_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let p = &points[i];
            let q = &points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice.abs() / 2.0
}
