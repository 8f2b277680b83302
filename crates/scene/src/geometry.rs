use glam::Vec3;
use std::collections::BTreeSet;
use std::f32::consts::PI;

/// Indexed triangle geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique triangle edges as a line list, each edge once, lower index first.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }

    /// Radius of the smallest origin-centered sphere containing every vertex.
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }
}

/// UV sphere parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub radius: f32,
    /// Segments around the equator (longitude).
    pub width_segments: u32,
    /// Segments from pole to pole (latitude).
    pub height_segments: u32,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self::new(1.0, 32, 16)
    }
}

impl SphereGeometry {
    /// Segment counts below 3 (width) or 2 (height) are raised to those minimums.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn build(&self) -> Geometry {
        let mut positions = Vec::new();
        let mut grid: Vec<Vec<u32>> = Vec::new();
        let mut index = 0u32;

        for iy in 0..=self.height_segments {
            let theta = iy as f32 / self.height_segments as f32 * PI;
            let mut row = Vec::with_capacity(self.width_segments as usize + 1);
            for ix in 0..=self.width_segments {
                let phi = ix as f32 / self.width_segments as f32 * PI * 2.0;
                positions.push(Vec3::new(
                    -self.radius * phi.cos() * theta.sin(),
                    self.radius * theta.cos(),
                    self.radius * phi.sin() * theta.sin(),
                ));
                row.push(index);
                index += 1;
            }
            grid.push(row);
        }

        let mut indices = Vec::new();
        for iy in 0..self.height_segments as usize {
            for ix in 0..self.width_segments as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                // pole rows collapse to a single point; skip their degenerate half
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != self.height_segments as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Geometry { positions, indices }
    }
}
