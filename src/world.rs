use crate::error::GridError;

/// Wall material id. 0 is empty floor, anything else is a wall.
pub type Material = u8;

pub const EMPTY: Material = 0;

/// Fixed-size tile map, row-major.
///
/// Every border cell is a wall. Construction rejects anything else, so a ray
/// started inside the map always stops on a wall before it can leave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Box<[Material]>,
}

impl Grid {
    pub fn new(width: usize, height: usize, cells: Vec<Material>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::DimensionMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }

        let grid = Self {
            width,
            height,
            cells: cells.into_boxed_slice(),
        };
        if let Some((x, y)) = grid.first_open_border_cell() {
            return Err(GridError::OpenBorder { x, y });
        }
        Ok(grid)
    }

    pub fn from_rows<const W: usize, const H: usize>(
        rows: &[[Material; W]; H],
    ) -> Result<Self, GridError> {
        Self::new(W, H, rows.iter().flatten().copied().collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at integer map coordinates. Panics out of bounds.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Material {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) outside map");
        self.cells[y * self.width + x]
    }

    /// Cell containing a world-space point; coordinates are truncated.
    #[inline]
    pub fn cell_at(&self, x: f64, y: f64) -> Material {
        self.cell(x as usize, y as usize)
    }

    #[inline]
    pub fn is_empty_at(&self, x: f64, y: f64) -> bool {
        self.cell_at(x, y) == EMPTY
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }

    /// In bounds and not a wall.
    pub fn is_open(&self, x: f64, y: f64) -> bool {
        self.contains(x, y) && self.is_empty_at(x, y)
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Material]> {
        self.cells.chunks_exact(self.width)
    }

    fn first_open_border_cell(&self) -> Option<(usize, usize)> {
        let (w, h) = (self.width, self.height);
        let top_bottom = (0..w).flat_map(|x| [(x, 0), (x, h - 1)]);
        let left_right = (0..h).flat_map(|y| [(0, y), (w - 1, y)]);
        top_bottom
            .chain(left_right)
            .find(|&(x, y)| self.cells[y * w + x] == EMPTY)
    }
}

pub const DEFAULT_MAP_SIZE: usize = 24;

/// Built-in demo level.
#[rustfmt::skip]
pub const DEFAULT_MAP: [[Material; DEFAULT_MAP_SIZE]; DEFAULT_MAP_SIZE] = [
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,2,2,2,2,0,0,0,0,3,0,3,0,3,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,3,0,0,0,3,0,0,0,1],
    [1,0,0,0,0,0,2,0,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,2,2,0,2,2,0,0,0,0,3,0,3,0,3,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,4,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,0,0,0,5,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,4,4,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
];

/// Square room of `size`x`size` with a wall of material 1 around it.
#[cfg(test)]
pub(crate) fn walled_room(size: usize) -> Grid {
    let cells = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                1
            } else {
                EMPTY
            }
        })
        .collect();
    Grid::new(size, size, cells).unwrap()
}
