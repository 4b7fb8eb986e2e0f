use glam::{IVec3, Vec3, Vec4};

use super::CellGrid;

/// Shading of a vertex by how many of its three neighbouring cells are
/// occupied, from fully occluded to open.
pub const AO_LEVELS: [f32; 4] = [0.25, 0.5, 0.75, 1.0];

/// The three cube faces the renderer ever looks at.
///
/// The viewpoint always sits on the -X, +Y, -Z side of the grid, so the
/// opposite faces are never generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    NegX,
    PosY,
    NegZ,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Orientation::NegX, Orientation::PosY, Orientation::NegZ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Outward unit normal in grid steps
    pub const fn normal(self) -> IVec3 {
        match self {
            Orientation::NegX => IVec3::NEG_X,
            Orientation::PosY => IVec3::Y,
            Orientation::NegZ => IVec3::NEG_Z,
        }
    }

    /// In-plane axes `(u, v)` with `u × v == normal`.
    const fn tangents(self) -> (IVec3, IVec3) {
        match self {
            Orientation::NegX => (IVec3::Z, IVec3::Y),
            Orientation::PosY => (IVec3::Z, IVec3::X),
            Orientation::NegZ => (IVec3::Y, IVec3::X),
        }
    }
}

// The eight cells around the face in its plane, as (u, v) steps, walking
// the same way round as the corners. Corner k sits at RING[2k] and its two
// edge neighbours are RING[2k - 1] and RING[2k + 1].
const RING: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// One visible cube face with per-vertex ambient occlusion.
///
/// Vertices run clockwise as seen from outside the cube, looking at the
/// voxel. The triangles from [`indices`](Self::indices) wind
/// counter-clockwise from the same side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    position: IVec3,
    orientation: Orientation,
    aos: Vec4,
}

impl Face {
    pub const fn new(position: IVec3, orientation: Orientation, aos: Vec4) -> Self {
        Self {
            position,
            orientation,
            aos,
        }
    }

    /// Face with AO sampled from `ao_grid`
    pub fn with_ao_from(position: IVec3, orientation: Orientation, ao_grid: &CellGrid) -> Self {
        Self::new(position, orientation, ambient_occlusion(ao_grid, position, orientation))
    }

    /// One face per orientation, all with the same AO
    pub fn uniform_facets(position: IVec3, aos: Vec4) -> [Face; 3] {
        Orientation::ALL.map(|orientation| Self::new(position, orientation, aos))
    }

    /// One face per orientation regardless of neighbours, AO from `ao_grid`
    pub fn all_facets_for_cell(position: IVec3, ao_grid: &CellGrid) -> [Face; 3] {
        Orientation::ALL.map(|orientation| Self::with_ao_from(position, orientation, ao_grid))
    }

    /// Faces of a visible cell whose outward neighbour in `cell_grid` is not
    /// visible. Culling uses `cell_grid` and AO uses `ao_grid`, which may
    /// differ while a generation transition is animating.
    pub fn from_visible_cell(cell_grid: &CellGrid, position: IVec3, ao_grid: &CellGrid) -> Vec<Face> {
        if !cell_grid.is_visible(position) {
            return Vec::new();
        }

        Orientation::ALL
            .into_iter()
            .filter(|o| !cell_grid.is_visible(position + o.normal()))
            .map(|o| Self::with_ao_from(position, o, ao_grid))
            .collect()
    }

    pub const fn position(&self) -> IVec3 {
        self.position
    }

    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub const fn aos(&self) -> Vec4 {
        self.aos
    }

    pub fn normal(&self) -> Vec3 {
        self.orientation.normal().as_vec3()
    }

    /// Centre of the voxel this face belongs to
    pub fn center(&self) -> Vec3 {
        self.position.as_vec3() + Vec3::splat(0.5)
    }

    /// Corner positions, scaled about the voxel centre. `1.0` is the full
    /// face, `0.0` collapses all four onto the centre.
    pub fn vertices(&self, scale: f32) -> [Vec3; 4] {
        let center = self.center();
        let normal = self.orientation.normal();
        let (u, v) = self.orientation.tangents();

        [0, 2, 4, 6].map(|ring| {
            let (su, sv) = RING[ring];
            let offset = (normal + u * su + v * sv).as_vec3() * 0.5;
            center + offset * scale
        })
    }

    /// Two triangles over the quad starting at vertex `offset`.
    ///
    /// The quad is split along the diagonal whose corners carry the larger
    /// AO sum so the shading gradient stays symmetric; ties take the 1-3
    /// diagonal.
    pub fn indices(&self, offset: u32) -> [u32; 6] {
        let o = offset;
        if self.aos.x + self.aos.z > self.aos.y + self.aos.w {
            [o, o + 2, o + 1, o, o + 3, o + 2]
        } else {
            [o + 1, o, o + 3, o + 1, o + 3, o + 2]
        }
    }
}

/// AO of one vertex from its two edge neighbours and its corner neighbour.
pub fn vertex_ao(side1: bool, side2: bool, corner: bool) -> f32 {
    if side1 && side2 {
        return AO_LEVELS[0];
    }
    let occluders = usize::from(side1) + usize::from(side2) + usize::from(corner);
    AO_LEVELS[3 - occluders]
}

/// Per-corner AO from the eight in-plane neighbours of a face, in `RING`
/// order. Anything other than eight entries is treated as unoccluded.
pub fn aos_from_ring(ring: &[bool]) -> Vec4 {
    if ring.len() != RING.len() {
        return Vec4::ONE;
    }

    let corner_ao = |k: usize| {
        let at = |i: usize| ring[i % RING.len()];
        vertex_ao(at(2 * k + 7), at(2 * k + 1), at(2 * k))
    };
    Vec4::new(corner_ao(0), corner_ao(1), corner_ao(2), corner_ao(3))
}

/// Sample the in-plane ring one step outside the face and derive its AO.
fn ambient_occlusion(grid: &CellGrid, position: IVec3, orientation: Orientation) -> Vec4 {
    let base = position + orientation.normal();
    let (u, v) = orientation.tangents();
    let ring = RING.map(|(su, sv)| grid.is_visible(base + u * su + v * sv));
    aos_from_ring(&ring)
}
