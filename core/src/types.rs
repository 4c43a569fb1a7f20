/// Single axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and cell totals. `Coord::MAX²` still fits.
pub type CellCount = u16;

/// Two-dimensional `(x, y)` position, or a `(width, height)` size.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a board of the given size.
pub const fn area((width, height): Coord2) -> CellCount {
    width as CellCount * height as CellCount
}

pub const fn in_bounds((x, y): Coord2, (width, height): Coord2) -> bool {
    x < width && y < height
}

/// In-bounds 8-neighborhood of `center`, clipped to `size`.
pub const fn neighbors(center: Coord2, size: Coord2) -> Neighbors {
    Neighbors {
        center,
        size,
        slot: 0,
    }
}

/// Walks the 3×3 block around a cell in row-major order, skipping the centre and anything off the board.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    size: Coord2,
    slot: u8,
}

impl Neighbors {
    const CENTER_SLOT: u8 = 4;
    const SLOTS: u8 = 9;

    fn offset(slot: u8) -> (i8, i8) {
        ((slot % 3) as i8 - 1, (slot / 3) as i8 - 1)
    }

    fn shifted(&self, (dx, dy): (i8, i8)) -> Option<Coord2> {
        let x = self.center.0.checked_add_signed(dx)?;
        let y = self.center.1.checked_add_signed(dy)?;
        in_bounds((x, y), self.size).then_some((x, y))
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot < Self::SLOTS {
            let slot = self.slot;
            self.slot += 1;

            if slot == Self::CENTER_SLOT {
                continue;
            }
            if let Some(coords) = self.shifted(Self::offset(slot)) {
                return Some(coords);
            }
        }
        None
    }
}
