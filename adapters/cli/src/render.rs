//! Plain-text presentation of the grid and distance fields.

use outbreak_core::CellCoord;
use outbreak_world::{DistanceField, Grid};

const EMPTY_GLYPH: char = '.';
const OBSTACLE_GLYPH: char = '#';
const ZOMBIE_GLYPH: char = 'Z';
const HUMAN_GLYPH: char = 'H';
const SHARED_GLYPH: char = 'X';
const UNREACHABLE_GLYPH: &str = "-";

/// Draws the grid one row per line.
///
/// Humans are drawn over empty cells and zombies over humans; a cell holding
/// both species shows [`SHARED_GLYPH`].
pub(crate) fn render_frame(grid: &Grid, zombies: &[CellCoord], humans: &[CellCoord]) -> String {
    let width = usize::try_from(grid.width()).unwrap_or(0);
    let height = usize::try_from(grid.height()).unwrap_or(0);
    let mut rows = vec![vec![EMPTY_GLYPH; width]; height];

    for cell in grid.obstacles() {
        if let Some(slot) = slot_mut(&mut rows, cell) {
            *slot = OBSTACLE_GLYPH;
        }
    }
    for &cell in humans {
        if let Some(slot) = slot_mut(&mut rows, cell) {
            *slot = HUMAN_GLYPH;
        }
    }
    for &cell in zombies {
        if let Some(slot) = slot_mut(&mut rows, cell) {
            *slot = if *slot == HUMAN_GLYPH || *slot == SHARED_GLYPH {
                SHARED_GLYPH
            } else {
                ZOMBIE_GLYPH
            };
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draws a distance field with right-aligned columns.
pub(crate) fn render_field(field: &DistanceField) -> String {
    let cell_width = field.sentinel().to_string().len();
    let width = usize::try_from(field.width()).unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    field
        .cells()
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|distance| {
                    if *distance >= field.sentinel() {
                        format!("{UNREACHABLE_GLYPH:>cell_width$}")
                    } else {
                        format!("{distance:>cell_width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn slot_mut(rows: &mut [Vec<char>], cell: CellCoord) -> Option<&mut char> {
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    rows.get_mut(row)?.get_mut(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_world::compute_distance_field;

    #[test]
    fn frame_marks_every_kind_of_cell() {
        let mut grid = Grid::new(2, 4);
        grid.set_obstacle(CellCoord::new(1, 0)).expect("in bounds");
        let zombies = [CellCoord::new(0, 0), CellCoord::new(1, 3)];
        let humans = [CellCoord::new(0, 2), CellCoord::new(1, 3)];

        let frame = render_frame(&grid, &zombies, &humans);

        assert_eq!(frame, "Z.H.\n#..X");
    }

    #[test]
    fn field_pads_columns_and_hides_unreachable_cells() {
        let mut grid = Grid::new(2, 3);
        grid.set_obstacle(CellCoord::new(0, 1)).expect("in bounds");
        grid.set_obstacle(CellCoord::new(1, 1)).expect("in bounds");
        let field = compute_distance_field(&grid, &[CellCoord::new(0, 0)]);

        assert_eq!(render_field(&field), "0 - -\n1 - -");
    }

    #[test]
    fn empty_grid_renders_nothing() {
        let grid = Grid::new(0, 0);

        assert_eq!(render_frame(&grid, &[], &[]), "");
        assert_eq!(render_field(&compute_distance_field(&grid, &[])), "");
    }
}
