//! Triangulated solids and ASCII STL serialization.
//!
//! Two solid shapes cover the whole fabrication plan: a closed rectangular
//! slab for the shared base and vertical cylinders for the dots. Facet
//! normals are emitted as a zero placeholder; slicers recompute them from
//! the vertex winding on import.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::grid::PointMm;

/// One triangular facet: three `[x, y, z]` vertices in millimeters.
///
/// Orientation is best-effort; outward-consistent winding is not
/// guaranteed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle(pub [[f64; 3]; 3]);

/// A named, ordered list of triangles forming one printable part.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    name: String,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty mesh with the given solid name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::new(),
        }
    }

    /// The solid name used in the STL header.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The triangles in generation order.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Append the 12 triangles of a closed rectangular prism spanning the
    /// opposite corners `(x0, y0, z0)`..`(x1, y1, z1)`: two per face for
    /// bottom, top, and the four sides.
    pub fn push_box(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, z0: f64, z1: f64) {
        // Bottom
        self.triangles
            .push(Triangle([[x0, y0, z0], [x1, y0, z0], [x1, y1, z0]]));
        self.triangles
            .push(Triangle([[x0, y0, z0], [x1, y1, z0], [x0, y1, z0]]));
        // Top
        self.triangles
            .push(Triangle([[x0, y0, z1], [x1, y1, z1], [x1, y0, z1]]));
        self.triangles
            .push(Triangle([[x0, y0, z1], [x0, y1, z1], [x1, y1, z1]]));
        // Sides
        self.triangles
            .push(Triangle([[x0, y0, z0], [x0, y0, z1], [x1, y0, z1]]));
        self.triangles
            .push(Triangle([[x0, y0, z0], [x1, y0, z1], [x1, y0, z0]]));

        self.triangles
            .push(Triangle([[x1, y0, z0], [x1, y0, z1], [x1, y1, z1]]));
        self.triangles
            .push(Triangle([[x1, y0, z0], [x1, y1, z1], [x1, y1, z0]]));

        self.triangles
            .push(Triangle([[x1, y1, z0], [x1, y1, z1], [x0, y1, z1]]));
        self.triangles
            .push(Triangle([[x1, y1, z0], [x0, y1, z1], [x0, y1, z0]]));

        self.triangles
            .push(Triangle([[x0, y1, z0], [x0, y1, z1], [x0, y0, z1]]));
        self.triangles
            .push(Triangle([[x0, y1, z0], [x0, y0, z1], [x0, y0, z0]]));
    }

    /// Append a vertical cylinder at `(cx, cy)` with radius `r`, spanning
    /// `z0..z1`, approximated by `segments` equal angular steps.
    ///
    /// Each step contributes one side quad (two triangles), one top fan
    /// triangle, and one bottom fan triangle sharing the center, so a
    /// cylinder adds exactly `4 * segments` triangles. `segments` must be
    /// at least 3 for a non-degenerate profile; the configuration layer
    /// validates this.
    pub fn push_cylinder(&mut self, cx: f64, cy: f64, r: f64, z0: f64, z1: f64, segments: u32) {
        debug_assert!(segments >= 3, "a cylinder needs at least 3 segments");
        let two_pi = 2.0 * PI;
        for i in 0..segments {
            let a0 = two_pi * i as f64 / segments as f64;
            let a1 = two_pi * (i + 1) as f64 / segments as f64;
            let x0 = cx + r * a0.cos();
            let y0 = cy + r * a0.sin();
            let x1 = cx + r * a1.cos();
            let y1 = cy + r * a1.sin();

            // Side quad split into two triangles
            self.triangles
                .push(Triangle([[x0, y0, z0], [x1, y1, z0], [x1, y1, z1]]));
            self.triangles
                .push(Triangle([[x0, y0, z0], [x1, y1, z1], [x0, y0, z1]]));

            // Top fan
            self.triangles
                .push(Triangle([[cx, cy, z1], [x1, y1, z1], [x0, y0, z1]]));
            // Bottom fan
            self.triangles
                .push(Triangle([[cx, cy, z0], [x0, y0, z0], [x1, y1, z0]]));
        }
    }

    /// Serialize as an ASCII STL document: one named solid, one facet per
    /// triangle with a zero placeholder normal, vertices at 6 decimal
    /// places.
    pub fn to_ascii_stl(&self) -> String {
        let mut stl = String::new();
        // Writing to a String cannot fail; discard the fmt::Result.
        let _ = writeln!(stl, "solid {}", self.name);
        for Triangle([p1, p2, p3]) in &self.triangles {
            stl.push_str("facet normal 0 0 0\n  outer loop\n");
            for p in [p1, p2, p3] {
                let _ = writeln!(stl, "    vertex {:.6} {:.6} {:.6}", p[0], p[1], p[2]);
            }
            stl.push_str("  endloop\nendfacet\n");
        }
        let _ = writeln!(stl, "endsolid {}", self.name);
        stl
    }
}

/// Build the shared base part: a closed slab from the origin to
/// `(width_mm, height_mm)`, `thickness_mm` tall. Exactly 12 triangles.
pub fn base_slab(width_mm: f64, height_mm: f64, thickness_mm: f64) -> Mesh {
    let mut mesh = Mesh::new("base");
    mesh.push_box(0.0, 0.0, width_mm, height_mm, 0.0, thickness_mm);
    mesh
}

/// Build one color's dot part: a vertical cylinder per dot center, radius
/// `radius_mm`, spanning `z0_mm..z1_mm` (base top to base top + dot
/// height). An empty point list yields an empty mesh.
pub fn dot_part(
    name: impl Into<String>,
    points: &[PointMm],
    radius_mm: f64,
    z0_mm: f64,
    z1_mm: f64,
    segments: u32,
) -> Mesh {
    let mut mesh = Mesh::new(name);
    for point in points {
        mesh.push_cylinder(point.x, point.y, radius_mm, z0_mm, z1_mm, segments);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_slab_is_12_triangles() {
        let mesh = base_slab(10.0, 8.0, 0.6);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.name(), "base");
    }

    #[test]
    fn test_base_slab_spans_extents() {
        let mesh = base_slab(10.0, 8.0, 0.6);
        let mut max = [f64::NEG_INFINITY; 3];
        let mut min = [f64::INFINITY; 3];
        for Triangle(vertices) in mesh.triangles() {
            for v in vertices {
                for axis in 0..3 {
                    max[axis] = max[axis].max(v[axis]);
                    min[axis] = min[axis].min(v[axis]);
                }
            }
        }
        assert_eq!(min, [0.0, 0.0, 0.0]);
        assert_eq!(max, [10.0, 8.0, 0.6]);
    }

    #[test]
    fn test_cylinder_triangle_count() {
        // 4 triangles per segment: side quad pair + top fan + bottom fan.
        let mut mesh = Mesh::new("dot");
        mesh.push_cylinder(1.0, 1.0, 0.4, 0.6, 1.0, 12);
        assert_eq!(mesh.triangle_count(), 48);

        let mut coarse = Mesh::new("coarse");
        coarse.push_cylinder(1.0, 1.0, 0.4, 0.6, 1.0, 3);
        assert_eq!(coarse.triangle_count(), 12);
    }

    #[test]
    fn test_cylinder_rims_sit_on_z_planes() {
        let mut mesh = Mesh::new("dot");
        mesh.push_cylinder(0.0, 0.0, 1.0, 0.5, 2.5, 8);
        for Triangle(vertices) in mesh.triangles() {
            for v in vertices {
                assert!(
                    (v[2] - 0.5).abs() < 1e-12 || (v[2] - 2.5).abs() < 1e-12,
                    "cylinder vertices lie on the two rim planes"
                );
            }
        }
    }

    #[test]
    fn test_dot_part_scales_with_points() {
        let points = [
            PointMm { x: 0.5, y: 0.5 },
            PointMm { x: 1.5, y: 0.5 },
            PointMm { x: 1.0, y: 1.4 },
        ];
        let mesh = dot_part("sky-blue", &points, 0.4, 0.6, 1.0, 12);
        assert_eq!(mesh.name(), "sky-blue");
        assert_eq!(mesh.triangle_count(), 3 * 48);
    }

    #[test]
    fn test_dot_part_empty_points() {
        let mesh = dot_part("unused", &[], 0.4, 0.6, 1.0, 12);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_ascii_stl_format() {
        let mut mesh = Mesh::new("base");
        mesh.triangles.push(Triangle([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
        ]));
        let stl = mesh.to_ascii_stl();

        let expected = "solid base\n\
                        facet normal 0 0 0\n  \
                        outer loop\n    \
                        vertex 0.000000 0.000000 0.000000\n    \
                        vertex 1.000000 0.000000 0.000000\n    \
                        vertex 1.000000 1.000000 0.000000\n  \
                        endloop\nendfacet\n\
                        endsolid base\n";
        assert_eq!(stl, expected);
    }

    #[test]
    fn test_ascii_stl_facet_count_matches() {
        let mesh = base_slab(2.0, 2.0, 0.5);
        let stl = mesh.to_ascii_stl();
        assert_eq!(stl.matches("facet normal").count(), 12);
        assert_eq!(stl.matches("endfacet").count(), 12);
        assert!(stl.ends_with("endsolid base\n"));
    }
}
