use arena_common::Rgba;
use bytemuck::{Pod, Zeroable};

/// Position + vertex colour, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ColorVertex {
    pub fn new(position: [f32; 3], color: Rgba) -> Self {
        Self {
            position,
            color: color.to_array(),
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<ColorVertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Ground quad on y = 0 spanning `[-half_size, half_size]` in x and z.
    /// Opposite corners share a colour so the floor shows a soft diagonal
    /// gradient.
    pub fn floor_quad(half_size: f32) -> Self {
        let base = Rgba::from_rgb8(56, 84, 63);
        let edge = Rgba::from_rgb8(70, 112, 80);
        let h = half_size;
        Self {
            vertices: vec![
                ColorVertex::new([-h, 0.0, -h], base),
                ColorVertex::new([h, 0.0, -h], edge),
                ColorVertex::new([h, 0.0, h], base),
                ColorVertex::new([-h, 0.0, h], edge),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// White cube of edge `size` centred on the origin; tinted per instance.
    pub fn cube(size: f32) -> Self {
        let p = size * 0.5;
        let white = Rgba::WHITE;
        #[rustfmt::skip]
        let vertices = vec![
            ColorVertex::new([-p, -p, -p], white),
            ColorVertex::new([-p,  p, -p], white),
            ColorVertex::new([ p,  p, -p], white),
            ColorVertex::new([ p, -p, -p], white),
            ColorVertex::new([-p, -p,  p], white),
            ColorVertex::new([-p,  p,  p], white),
            ColorVertex::new([ p,  p,  p], white),
            ColorVertex::new([ p, -p,  p], white),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 0, 2, 3, // -Z
            4, 6, 5, 4, 7, 6, // +Z
            4, 5, 1, 4, 1, 0, // -X
            3, 2, 6, 3, 6, 7, // +X
            1, 5, 6, 1, 6, 2, // +Y
            4, 0, 3, 4, 3, 7, // -Y
        ];
        Self { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_two_triangles_on_the_ground() {
        let floor = Mesh::floor_quad(32.0);
        assert_eq!(floor.vertices.len(), 4);
        assert_eq!(floor.triangle_count(), 2);
        assert!(floor.vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(floor.vertices.iter().all(|v| v.position[0].abs() == 32.0));
    }

    #[test]
    fn cube_has_twelve_triangles_within_half_size() {
        let cube = Mesh::cube(1.2);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
        for v in &cube.vertices {
            assert!(v.position.iter().all(|c| (c.abs() - 0.6).abs() < 1e-6));
            assert_eq!(v.color, [1.0; 4]);
        }
    }

    #[test]
    fn every_cube_vertex_is_used() {
        let cube = Mesh::cube(1.0);
        for i in 0..cube.vertices.len() as u16 {
            assert!(cube.indices.contains(&i));
        }
    }
}
