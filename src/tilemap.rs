/// A bounded 2D tile grid stored row-major.
///
/// Unlike a world map there is no wrapping: lookups outside
/// `0..width` x `0..height` simply have no tile.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

/// Offsets for the 4-connected neighbours (dx, dy): top, bottom, left, right.
pub const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Offsets for the 8-connected neighbours (dx, dy).
/// Order: top, bottom, left, right, top-left, top-right, bottom-left, bottom-right
pub const DIR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Tilemap<T> {
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.height, "tile ({x}, {y}) out of range");
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Whether signed coordinates fall inside the map.
    pub fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Lookup with signed coordinates. Anything off the map is `None`.
    pub fn get_checked(&self, x: i32, y: i32) -> Option<&T> {
        if self.in_range(x, y) {
            Some(self.get(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Count the 4-connected neighbours matching `pred`. Off-map neighbours never match.
    pub fn count_cardinal(&self, x: usize, y: usize, pred: impl Fn(&T) -> bool) -> usize {
        self.count_offsets(x, y, &CARDINAL_OFFSETS, pred)
    }

    /// Count the 8-connected neighbours matching `pred`. Off-map neighbours never match.
    pub fn count_neighbors_8(&self, x: usize, y: usize, pred: impl Fn(&T) -> bool) -> usize {
        self.count_offsets(x, y, &DIR_OFFSETS, pred)
    }

    fn count_offsets(
        &self,
        x: usize,
        y: usize,
        offsets: &[(i32, i32)],
        pred: impl Fn(&T) -> bool,
    ) -> usize {
        offsets
            .iter()
            .filter_map(|&(dx, dy)| self.get_checked(x as i32 + dx, y as i32 + dy))
            .filter(|v| pred(*v))
            .count()
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}
