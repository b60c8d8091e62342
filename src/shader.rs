//! Names the shader pair is expected to declare, and the quad it draws.

/// Position attribute, two floats per vertex in `[-1, 1]`.
pub const ATTRIBUTE_VERTICES: &str = "a_vertices";

/// Uniforms resolved after link. A shader is free to leave any of them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformSlot {
    Resolution,
    Mouse,
    Time,
    TimeDelta,
    RotateScene,
}

impl UniformSlot {
    pub const COUNT: usize = 5;

    pub const ALL: [UniformSlot; Self::COUNT] = [
        UniformSlot::Resolution,
        UniformSlot::Mouse,
        UniformSlot::Time,
        UniformSlot::TimeDelta,
        UniformSlot::RotateScene,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UniformSlot::Resolution => "iResolution",
            UniformSlot::Mouse => "iMouse",
            UniformSlot::Time => "iTime",
            UniformSlot::TimeDelta => "iTimeDelta",
            UniformSlot::RotateScene => "rotateScene",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fullscreen quad corners, counter-clockwise from the top right.
pub const QUAD_VERTICES: [f32; 8] = [
    1.0, 1.0, //
    -1.0, 1.0, //
    -1.0, -1.0, //
    1.0, -1.0,
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_index_their_position_in_all() {
        for (i, slot) in UniformSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn quad_indices_stay_within_vertices() {
        let vertex_count = QUAD_VERTICES.len() / 2;
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < vertex_count));
        assert!(QUAD_VERTICES.iter().all(|v| v.abs() == 1.0));
    }

    // Back-face culling is on, so both triangles must wind counter-clockwise.
    #[test]
    fn quad_triangles_are_front_facing() {
        for tri in QUAD_INDICES.chunks(3) {
            let p = |i: u16| (QUAD_VERTICES[i as usize * 2], QUAD_VERTICES[i as usize * 2 + 1]);
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let area = (b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1);
            assert!(area > 0.0, "triangle {tri:?} is clockwise");
        }
    }
}
