use glam::IVec3;

/// Half-extents of a cuboid coordinate space centred on the origin.
///
/// A space with half-extents (X, Y, Z) spans `[-X, X) × [-Y, Y) × [-Z, Z)`,
/// so it holds `2X · 2Y · 2Z` cells. Flat indices are laid out with X
/// outermost and Z innermost, which is also the order [`coords`](Self::coords)
/// walks the space in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    x: i32,
    y: i32,
    z: i32,
}

/// Largest half-extent on any axis
pub const MAX_HALF_EXTENT: u32 = 1024;

/// Largest cell count [`GridDimensions::try_new`] accepts
pub const MAX_CELLS: usize = 1 << 24;

impl GridDimensions {
    /// Each half-extent is clamped to [`MAX_HALF_EXTENT`].
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        const fn clamp(n: u32) -> i32 {
            if n > MAX_HALF_EXTENT { MAX_HALF_EXTENT as i32 } else { n as i32 }
        }
        Self {
            x: clamp(x),
            y: clamp(y),
            z: clamp(z),
        }
    }

    /// `None` when the space would hold more than [`MAX_CELLS`] cells.
    pub const fn try_new(x: u32, y: u32, z: u32) -> Option<Self> {
        if x > MAX_HALF_EXTENT || y > MAX_HALF_EXTENT || z > MAX_HALF_EXTENT {
            return None;
        }
        let dims = Self::new(x, y, z);
        if dims.len() > MAX_CELLS { None } else { Some(dims) }
    }

    /// Half-extents after clamping
    pub const fn half_extents(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Number of cells in the space (`8 · X · Y · Z`)
    pub const fn len(&self) -> usize {
        8usize
            .saturating_mul(self.x as usize)
            .saturating_mul(self.y as usize)
            .saturating_mul(self.z as usize)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All three upper bounds are exclusive.
    pub const fn in_bounds(&self, pos: IVec3) -> bool {
        pos.x >= -self.x
            && pos.x < self.x
            && pos.y >= -self.y
            && pos.y < self.y
            && pos.z >= -self.z
            && pos.z < self.z
    }

    /// Flat index of an in-bounds coordinate. Out-of-bounds input yields a
    /// meaningless index; use [`checked_index`](Self::checked_index) when the
    /// coordinate is not known to be valid.
    #[inline]
    pub const fn index_of(&self, pos: IVec3) -> usize {
        let (h, d) = (2 * self.y as usize, 2 * self.z as usize);
        let (x, y, z) = ((pos.x + self.x) as usize, (pos.y + self.y) as usize, (pos.z + self.z) as usize);
        (x * h + y) * d + z
    }

    #[inline]
    pub const fn checked_index(&self, pos: IVec3) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(self.index_of(pos))
        } else {
            None
        }
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub const fn coord_of(&self, index: usize) -> IVec3 {
        let h = 2 * self.y as usize;
        let d = 2 * self.z as usize;
        let z = (index % d) as i32 - self.z;
        let y = ((index / d) % h) as i32 - self.y;
        let x = (index / (d * h)) as i32 - self.x;
        IVec3::new(x, y, z)
    }

    /// Every coordinate in the space exactly once, X outermost, Z innermost.
    /// Each call starts a fresh walk.
    pub fn coords(&self) -> impl Iterator<Item = IVec3> + use<> {
        let Self { x, y, z } = *self;
        (-x..x).flat_map(move |cx| {
            (-y..y).flat_map(move |cy| (-z..z).map(move |cz| IVec3::new(cx, cy, cz)))
        })
    }
}
