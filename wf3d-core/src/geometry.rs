//! Wireframe geometry: closed polygons grouped into meshes.
use nalgebra::Vector3;

use crate::error::GeometryError;

/// A closed loop of vertices. The last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector3<f32>>,
}

impl Polygon {
    pub const MIN_VERTICES: usize = 3;

    pub fn new(vertices: Vec<Vector3<f32>>) -> Result<Self, GeometryError> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(GeometryError::DegeneratePolygon(vertices.len()));
        }
        Ok(Self { vertices })
    }

    pub fn quad(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>, d: Vector3<f32>) -> Self {
        Self {
            vertices: vec![a, b, c, d],
        }
    }

    pub fn vertices(&self) -> &[Vector3<f32>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive vertex pairs around the loop, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (&Vector3<f32>, &Vector3<f32>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }
}

/// An ordered collection of polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            polygons: Vec::with_capacity(capacity),
        }
    }

    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Build a mesh from raw vertex loops, rejecting any loop under 3 vertices.
    pub fn from_loops<I>(loops: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = Vec<Vector3<f32>>>,
    {
        let polygons = loops
            .into_iter()
            .map(Polygon::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { polygons })
    }

    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum()
    }

    /// Axis-aligned cube centred on the origin, one quad per face.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let v = |x: f32, y: f32, z: f32| Vector3::new(x * h, y * h, z * h);
        let mut mesh = Self::with_capacity(6);

        // Front
        mesh.add_polygon(Polygon::quad(v(-1.0, 1.0, -1.0), v(1.0, 1.0, -1.0), v(1.0, -1.0, -1.0), v(-1.0, -1.0, -1.0)));
        // Back
        mesh.add_polygon(Polygon::quad(v(1.0, 1.0, 1.0), v(-1.0, 1.0, 1.0), v(-1.0, -1.0, 1.0), v(1.0, -1.0, 1.0)));
        // Left
        mesh.add_polygon(Polygon::quad(v(-1.0, 1.0, 1.0), v(-1.0, 1.0, -1.0), v(-1.0, -1.0, -1.0), v(-1.0, -1.0, 1.0)));
        // Right
        mesh.add_polygon(Polygon::quad(v(1.0, 1.0, -1.0), v(1.0, 1.0, 1.0), v(1.0, -1.0, 1.0), v(1.0, -1.0, -1.0)));
        // Top
        mesh.add_polygon(Polygon::quad(v(-1.0, 1.0, 1.0), v(1.0, 1.0, 1.0), v(1.0, 1.0, -1.0), v(-1.0, 1.0, -1.0)));
        // Bottom
        mesh.add_polygon(Polygon::quad(v(1.0, -1.0, -1.0), v(-1.0, -1.0, -1.0), v(-1.0, -1.0, 1.0), v(1.0, -1.0, 1.0)));

        mesh
    }

    /// Flat grid of unit cells on the XZ plane, starting at the origin.
    pub fn floor_grid(cells_x: usize, cells_z: usize) -> Self {
        let mut mesh = Self::with_capacity(cells_x * cells_z);
        for x in 0..cells_x {
            for z in 0..cells_z {
                let (x0, z0) = (x as f32, z as f32);
                mesh.add_polygon(Polygon::quad(
                    Vector3::new(x0, 0.0, z0),
                    Vector3::new(x0 + 1.0, 0.0, z0),
                    Vector3::new(x0 + 1.0, 0.0, z0 + 1.0),
                    Vector3::new(x0, 0.0, z0 + 1.0),
                ));
            }
        }
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
