use super::AnimFace;

/// Flat per-frame buffers for an indexed triangle list.
///
/// Positions and normals carry 3 floats per vertex, AO one float per
/// vertex, and every face contributes 4 vertices and 6 indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub aos: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn with_face_capacity(faces: usize) -> Self {
        Self {
            positions: Vec::with_capacity(faces * 12),
            normals: Vec::with_capacity(faces * 12),
            aos: Vec::with_capacity(faces * 4),
            indices: Vec::with_capacity(faces * 6),
        }
    }

    /// Evaluate every face at `progress`, clamped to [0, 1].
    pub fn build(faces: &[AnimFace], progress: f32) -> Self {
        let mut buffers = Self::with_face_capacity(faces.len());
        buffers.extend(faces, progress);
        buffers
    }

    /// Append faces evaluated at `progress`, clamped to [0, 1].
    pub fn extend(&mut self, faces: &[AnimFace], progress: f32) {
        let p = progress.clamp(0.0, 1.0);
        faces.iter().for_each(|face| self.push_face(face, p));
    }

    fn push_face(&mut self, face: &AnimFace, p: f32) {
        let offset = self.vertex_count() as u32;
        let normal = face.normal(p);

        for vertex in face.vertices(p) {
            self.positions.extend_from_slice(&vertex.to_array());
            self.normals.extend_from_slice(&normal.to_array());
        }
        self.aos.extend_from_slice(&face.aos(p).to_array());
        self.indices.extend_from_slice(&face.indices(offset));
    }

    pub fn vertex_count(&self) -> usize {
        self.aos.len()
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Empty the buffers but keep their allocations for the next frame
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.aos.clear();
        self.indices.clear();
    }
}
