//! Minimal enclosing circle of a pixel region.

use goban_core::Circle;
use nalgebra::Point2;

type P = Point2<f64>;

fn cross(o: P, a: P, b: P) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull (Andrew's monotone chain), counter-clockwise.
fn convex_hull(mut points: Vec<P>) -> Vec<P> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let mut hull: Vec<P> = Vec::with_capacity(2 * points.len());
    for &p in &points {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in points.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

#[derive(Clone, Copy, Debug)]
struct Disk {
    c: P,
    r: f64,
}

impl Disk {
    const EPS: f64 = 1e-7;

    fn contains(&self, p: P) -> bool {
        (p - self.c).norm() <= self.r + Self::EPS
    }

    fn from_two(a: P, b: P) -> Self {
        let c = P::from((a.coords + b.coords) * 0.5);
        Self {
            c,
            r: (a - c).norm(),
        }
    }

    fn from_three(a: P, b: P, c: P) -> Self {
        let d = 2.0 * cross(a, b, c);
        if d.abs() < 1e-12 {
            // collinear: the widest pair spans the circle
            let candidates = [Self::from_two(a, b), Self::from_two(a, c), Self::from_two(b, c)];
            return candidates
                .into_iter()
                .max_by(|x, y| x.r.total_cmp(&y.r))
                .unwrap_or(Self::from_two(a, b));
        }
        let (bx, by) = (b.x - a.x, b.y - a.y);
        let (cx, cy) = (c.x - a.x, c.y - a.y);
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (cy * b2 - by * c2) / d;
        let uy = (bx * c2 - cx * b2) / d;
        let center = P::new(a.x + ux, a.y + uy);
        Self {
            c: center,
            r: (ux * ux + uy * uy).sqrt(),
        }
    }
}

/// Smallest circle containing every point (Welzl, iterative form).
///
/// Points are reduced to their convex hull first. Returns `None` for an
/// empty input.
pub fn minimal_enclosing_circle(points: &[Point2<f32>]) -> Option<Circle> {
    let pts: Vec<P> = points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| P::new(p.x as f64, p.y as f64))
        .collect();
    let hull = convex_hull(pts);
    let first = *hull.first()?;

    let mut disk = Disk { c: first, r: 0.0 };
    for i in 1..hull.len() {
        if disk.contains(hull[i]) {
            continue;
        }
        disk = Disk { c: hull[i], r: 0.0 };
        for j in 0..i {
            if disk.contains(hull[j]) {
                continue;
            }
            disk = Disk::from_two(hull[i], hull[j]);
            for k in 0..j {
                if !disk.contains(hull[k]) {
                    disk = Disk::from_three(hull[i], hull[j], hull[k]);
                }
            }
        }
    }

    Some(Circle::new(disk.c.x as f32, disk.c.y as f32, disk.r as f32))
}
