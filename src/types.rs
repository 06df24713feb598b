#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quotation {
    pub author: String,
    pub title: String,
    pub lines: Vec<String>,
}

pub type Corpus = Vec<Quotation>;

/// Pointer to the quotation line (or first line of a pair) on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionState {
    pub poem: usize,
    pub line: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineLayout {
    Single,
    Paired,
}

impl LineLayout {
    pub fn stride(self) -> usize {
        match self {
            LineLayout::Single => 1,
            LineLayout::Paired => 2,
        }
    }

    pub fn min_height(self) -> usize {
        match self {
            LineLayout::Single => 3,
            LineLayout::Paired => 4,
        }
    }

    /// Rows holding the centered quotation, never the first or last row.
    pub fn text_rows(self, height: usize) -> Vec<usize> {
        let mid = height / 2;

        match self {
            LineLayout::Single => vec![mid],
            LineLayout::Paired => vec![mid - 1, mid],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    /// Quotation text and fragments of the next one.
    Accent,
    /// Author and title.
    Label,
    /// Decorative glyph; the payload indexes the color palette.
    Ornament(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub fn plain(ch: char) -> Self {
        Self {
            ch,
            style: CellStyle::Plain,
        }
    }

    pub fn accent(ch: char) -> Self {
        Self {
            ch,
            style: CellStyle::Accent,
        }
    }

    pub fn label(ch: char) -> Self {
        Self {
            ch,
            style: CellStyle::Label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn from_noise(noise: &NoiseField) -> Self {
        let cells = noise
            .rows
            .iter()
            .flat_map(|row| row.iter().map(|&ch| Cell::plain(ch)))
            .collect();

        Self {
            width: noise.width,
            height: noise.height(),
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.width + x] = cell;
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn row_text(&self, y: usize) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }
}

/// Background glyphs for one quotation cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoiseField {
    pub width: usize,
    pub rows: Vec<Vec<char>>,
}

impl NoiseField {
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rows_stay_off_label_rows() {
        for height in 3..40 {
            let rows = LineLayout::Single.text_rows(height);
            assert!(rows.iter().all(|&r| r > 0 && r < height - 1));
        }

        for height in 4..40 {
            let rows = LineLayout::Paired.text_rows(height);
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0] + 1, rows[1]);
            assert!(rows.iter().all(|&r| r > 0 && r < height - 1));
        }
    }

    #[test]
    fn paired_rows_for_height_six() {
        assert_eq!(LineLayout::Paired.text_rows(6), vec![2, 3]);
    }

    #[test]
    fn grid_from_noise_keeps_dimensions() {
        let noise = NoiseField {
            width: 3,
            rows: vec![vec!['a', 'b', 'c'], vec!['d', 'e', 'f']],
        };
        let grid = Grid::from_noise(&noise);

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.row_text(1), "def");
        assert_eq!(grid.get(0, 0), Cell::plain('a'));
    }
}
