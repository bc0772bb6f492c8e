//! Ground heights baked from terrain mesh vertices
//!
//! A [`Heightmap`] is a dense `R x R` grid where `R = floor(sqrt(vertex_count))`.
//! Rows follow the X axis and columns follow the Z axis of the source mesh.
//! The grid is built once and never changes afterwards.

use sweepbox_math::Vec3;

/// Dense grid of ground heights in source-mesh units
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    resolution: usize,
    min_x: f32,
    min_z: f32,
    max_x: f32,
    max_z: f32,
    /// Row-major cells: `cells[row * resolution + col]`
    cells: Vec<f32>,
}

impl Heightmap {
    /// Bake a heightmap from mesh vertices
    ///
    /// Each vertex writes its height into the cell its (x, z) normalizes to;
    /// later vertices overwrite earlier ones in the same cell. Vertices that
    /// normalize to index `R` (the far edge of the bounds) fall outside the
    /// grid and are skipped.
    ///
    /// Afterwards every cell that is still exactly zero takes the height of the
    /// cell in the previous row of the same column, scanning rows in order.
    /// Zero cells in row 0 stay zero.
    ///
    /// Returns `None` if there are no vertices or the vertices span no area on
    /// the X/Z plane.
    pub fn from_vertices(vertices: &[Vec3]) -> Option<Self> {
        let resolution = (vertices.len() as f64).sqrt().floor() as usize;
        if resolution == 0 {
            log::warn!("Heightmap needs at least one vertex, got {}", vertices.len());
            return None;
        }

        let (mut min_x, mut min_z) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_z) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in vertices {
            min_x = min_x.min(v.x);
            min_z = min_z.min(v.z);
            max_x = max_x.max(v.x);
            max_z = max_z.max(v.z);
        }

        if !(max_x > min_x && max_z > min_z) {
            log::warn!(
                "Heightmap bounds ({}, {})-({}, {}) span no area",
                min_x, min_z, max_x, max_z
            );
            return None;
        }

        let mut heightmap = Self {
            resolution,
            min_x,
            min_z,
            max_x,
            max_z,
            cells: vec![0.0; resolution * resolution],
        };

        for v in vertices {
            if let Some((row, col)) = heightmap.cell_of(v.x, v.z) {
                heightmap.cells[row * resolution + col] = v.y;
            }
        }

        for row in 1..resolution {
            for col in 0..resolution {
                let index = row * resolution + col;
                if heightmap.cells[index] == 0.0 {
                    heightmap.cells[index] = heightmap.cells[index - resolution];
                }
            }
        }

        log::debug!(
            "Baked {}x{} heightmap over ({}, {})-({}, {})",
            resolution, resolution, min_x, min_z, max_x, max_z
        );

        Some(heightmap)
    }

    /// Grid resolution `R` (the grid is `R x R`)
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Planar bounds as `(min_x, min_z, max_x, max_z)` in source-mesh units
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.min_x, self.min_z, self.max_x, self.max_z)
    }

    /// Height stored in a cell
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.resolution && col < self.resolution {
            Some(self.cells[row * self.resolution + col])
        } else {
            None
        }
    }

    /// Grid cell `(row, col)` a local (x, z) position falls into
    pub fn cell_of(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        let res = self.resolution as f32;
        let fx = res * (x - self.min_x) / (self.max_x - self.min_x);
        let fz = res * (z - self.min_z) / (self.max_z - self.min_z);

        // Range checks also reject NaN
        if (0.0..res).contains(&fx) && (0.0..res).contains(&fz) {
            Some((fx as usize, fz as usize))
        } else {
            None
        }
    }

    /// Height at a position in source-mesh units
    pub fn sample_local(&self, x: f32, z: f32) -> Option<f32> {
        let (row, col) = self.cell_of(x, z)?;
        self.get(row, col)
    }

    /// Ground height under a world position
    ///
    /// The heightmap's model is placed with `offset` and scaled by `scale`
    /// (source-mesh units to world units). The returned height is in world units.
    pub fn sample(&self, world: Vec3, offset: Vec3, scale: f32) -> Option<f32> {
        let local = (world - offset) / scale;
        self.sample_local(local.x, local.z)
            .map(|height| height * scale + offset.y)
    }
}
