//! Shape tessellation for 2D primitives
//!
//! Everything is emitted as triangle lists in canvas pixel coordinates;
//! the pipeline maps pixels to NDC at upload time.

use glam::Vec2;

use super::vertex::Vertex;

/// Filled axis-aligned rectangle (two triangles)
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);

    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y1, color),
    ]
}

/// Rectangle border stroked inward as four thin strips
pub fn rect_border(origin: Vec2, size: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4 * 6);

    // Top and bottom strips span the full width
    vertices.extend(rect(origin, Vec2::new(size.x, width), color));
    vertices.extend(rect(
        Vec2::new(origin.x, origin.y + size.y - width),
        Vec2::new(size.x, width),
        color,
    ));
    // Left and right strips fill the space between them
    vertices.extend(rect(
        Vec2::new(origin.x, origin.y + width),
        Vec2::new(width, size.y - 2.0 * width),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(origin.x + size.x - width, origin.y + width),
        Vec2::new(width, size.y - 2.0 * width),
        color,
    ));

    vertices
}

/// Filled polygon as a fan around its center
///
/// `points` is a closed outline (last point repeats the first), as produced
/// by `PolygonFollower::points`.
pub fn polygon_fan(center: Vec2, points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 1) * 3);
    for pair in points.windows(2) {
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }

    vertices
}

/// Stroke a closed outline as one quad per edge
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x);

        let v1a = p1 + perp * half;
        let v1b = p1 - perp * half;
        let v2a = p2 + perp * half;
        let v2b = p2 - perp * half;

        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let vertices = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [0.0; 4]);
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position, [10.0, 20.0]);
        assert_eq!(vertices[4].position, [40.0, 60.0]);
    }

    #[test]
    fn test_border_strip_count() {
        let vertices = rect_border(Vec2::ZERO, Vec2::new(100.0, 50.0), 2.0, [0.0; 4]);
        assert_eq!(vertices.len(), 24);
    }

    #[test]
    fn test_polygon_fan_triangle_count() {
        let points = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
        ];
        let vertices = polygon_fan(Vec2::ZERO, &points, [0.0; 4]);
        assert_eq!(vertices.len(), 9);
    }
}
