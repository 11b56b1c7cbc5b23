use std::str::FromStr;

use thiserror::Error;

use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

const ALIVE: char = 'O';
const DEAD: char = '.';

/// How the final grid is shown on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Plain when the grid fits the terminal, braille otherwise
    #[default]
    Auto,
    Plain,
    Braille,
    None,
}

#[derive(Debug, Error)]
#[error("Unknown render mode \"{0}\", expected one of auto, plain, braille, none")]
pub struct RenderModeError(String);

impl FromStr for RenderMode {
    type Err = RenderModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "plain" => Ok(Self::Plain),
            "braille" => Ok(Self::Braille),
            "none" => Ok(Self::None),
            s => Err(RenderModeError(s.to_string())),
        }
    }
}

impl RenderMode {
    /// Resolve `Auto` against a terminal `columns` wide. Other modes are returned as-is.
    pub fn resolve(self, n: usize, columns: Option<u16>) -> Self {
        match (self, columns) {
            (Self::Auto, Some(cols)) if n > cols as usize => Self::Braille,
            (Self::Auto, _) => Self::Plain,
            (mode, _) => mode,
        }
    }

    /// Render `grid`, or `None` when nothing should be shown.
    pub fn render(self, grid: &Grid) -> Option<String> {
        let columns = crossterm::terminal::size().ok().map(|(cols, _)| cols);

        match self.resolve(grid.side(), columns) {
            Self::Plain => Some(plain(grid)),
            Self::Braille => Some(braille(grid)),
            Self::None => None,
            Self::Auto => unreachable!("auto is always resolved"),
        }
    }
}

/// One line per row, `O` for alive and `.` for dead.
pub fn plain(grid: &Grid) -> String {
    let n = grid.side();
    let mut s = String::with_capacity(n * (n + 1));

    for row in grid.cells().chunks(n) {
        s.extend(row.iter().map(|&c| if c { ALIVE } else { DEAD }));
        s.push('\n');
    }

    s
}

/// Braille view packing 2x4 cells into each character, so a grid of side `n` takes
/// `ceil(n / 2)` columns and `ceil(n / 4)` lines.
pub fn braille(grid: &Grid) -> String {
    let n = grid.side();
    let (bw, bh) = (n.div_ceil(2), n.div_ceil(4));

    let mut cp = vec![BRAILLE_EMPTY; bw * bh];

    for (x, y) in grid.alive() {
        cp[(y / 4) * bw + (x / 2)] += get_hex_value(x, y);
    }

    // Each braille character is 3 bytes, plus one newline per line.
    let mut fb = String::with_capacity(3 * (bw * bh) + bh);

    for line in cp.chunks(bw) {
        fb.extend(line.iter().map(|&c| {
            char::from_u32(c).unwrap_or_else(|| unreachable!("braille block is valid unicode"))
        }));
        fb.push('\n');
    }

    fb
}

fn get_hex_value(x: usize, y: usize) -> u32 {
    match (x % 2, y % 4) {
        (0, 0) => 0x1,
        (1, 0) => 0x8,
        (0, 1) => 0x2,
        (1, 1) => 0x10,
        (0, 2) => 0x4,
        (1, 2) => 0x20,
        (0, 3) => 0x40,
        (1, 3) => 0x80,
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod test {
    use super::RenderMode;
    use super::braille;
    use super::plain;
    use crate::grid::Grid;

    #[test]
    fn plain_glider() {
        let glider = Grid::with_alive(4, [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);

        insta::assert_snapshot!(plain(&glider).trim_end(), @r"
        .O..
        ..O.
        OOO.
        ....
        ");
    }

    #[test]
    fn braille_block() {
        let block = Grid::with_alive(4, [(1, 1), (2, 1), (1, 2), (2, 2)]);

        assert_eq!(braille(&block), "\u{2830}\u{2806}\n");
    }

    #[test]
    fn braille_full_and_empty() {
        let full = Grid::from_cells(2, vec![true; 4]).unwrap();
        assert_eq!(braille(&full), "\u{281B}\n");

        let blank_line = "\u{2800}".repeat(4) + "\n";
        assert_eq!(braille(&Grid::new(8)), blank_line.repeat(2));
    }

    #[test]
    fn auto_falls_back_to_braille() {
        assert_eq!(RenderMode::Auto.resolve(64, Some(80)), RenderMode::Plain);
        assert_eq!(RenderMode::Auto.resolve(128, Some(80)), RenderMode::Braille);
        assert_eq!(RenderMode::Auto.resolve(128, None), RenderMode::Plain);
        assert_eq!(RenderMode::None.resolve(4, Some(80)), RenderMode::None);
        assert_eq!("braille".parse::<RenderMode>().unwrap(), RenderMode::Braille);
        assert!("fancy".parse::<RenderMode>().is_err());
    }
}
