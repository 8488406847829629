/// Row-major 2D storage with fixed dimensions.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    data: Box<[T]>,
    rows: usize,
    columns: usize,
}

impl<T: Clone> Grid<T> {
    pub fn new(rows: usize, columns: usize, value: T) -> Self {
        let data = vec![value; rows * columns].into_boxed_slice();
        Grid {
            data,
            rows,
            columns,
        }
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_in_bounds(&self, (row, column): (usize, usize)) -> bool {
        row < self.rows && column < self.columns
    }

    /// Panics when the coordinate is outside the grid. Indexing out of bounds is a logic error
    /// in the caller, and a wrapped flat index would silently hit the wrong cell.
    fn ravel_index(&self, (row, column): (usize, usize)) -> usize {
        assert!(
            self.is_in_bounds((row, column)),
            "coordinate ({}, {}) is outside the {}x{} grid",
            row,
            column,
            self.rows,
            self.columns
        );
        row * self.columns + column
    }

    /// Iterate over all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> std::ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let idx = self.ravel_index(index);
        &mut self.data[idx]
    }
}
