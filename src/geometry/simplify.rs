use crate::domain::types::Coordinates;

/// Ramer-Douglas-Peucker simplification in planar (lat, lon) space.
///
/// Endpoints are always kept. Polylines with two or fewer points come back
/// unchanged.
pub fn simplify_waypoints(points: &[Coordinates], tolerance: f64) -> Vec<Coordinates> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let first = points[0];
    let Some(&last) = points.last() else {
        return points.to_vec();
    };

    let mut max_dist = 0.0_f64;
    let mut max_idx = 0;
    for (i, &pt) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = segment_distance(pt, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        let mut left = simplify_waypoints(&points[..=max_idx], tolerance);
        let right = simplify_waypoints(&points[max_idx..], tolerance);
        // split point appears in both halves
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Distance from `pt` to the segment `a`-`b`.
fn segment_distance(pt: Coordinates, a: Coordinates, b: Coordinates) -> f64 {
    let (dx, dy) = (b.lat - a.lat, b.lon - a.lon);
    let len_sq = dx * dx + dy * dy;
    if len_sq < 1e-24 {
        return ((pt.lat - a.lat).powi(2) + (pt.lon - a.lon).powi(2)).sqrt();
    }
    let t = (((pt.lat - a.lat) * dx + (pt.lon - a.lon) * dy) / len_sq).clamp(0.0, 1.0);
    let (px, py) = (a.lat + t * dx, a.lon + t * dy);
    ((pt.lat - px).powi(2) + (pt.lon - py).powi(2)).sqrt()
}
