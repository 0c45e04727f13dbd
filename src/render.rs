//! Projects the game state onto a bitmap.

use crate::display::Bitmap;
use crate::grid::{Cell, CellSet, GRID_SIZE};

/// Draws the food, then the player on top. A food cell under the player is
/// skipped so the player's pixel is the only thing drawn there.
pub fn render(player: Cell, food: &CellSet) -> Bitmap {
    let mut bitmap = Bitmap::new();
    for cell in food.iter().filter(|&cell| cell != player) {
        bitmap.set_pixel(cell);
    }
    bitmap.set_pixel(player);
    bitmap
}

/// Both diagonals lit, shown when the game is won.
pub fn win_cross() -> Bitmap {
    let mut bitmap = Bitmap::new();
    for i in 0..GRID_SIZE {
        for (x, y) in [(i, i), (GRID_SIZE - 1 - i, i)] {
            if let Some(cell) = Cell::new(x, y) {
                bitmap.set_pixel(cell);
            }
        }
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: u8, y: u8) -> Cell {
        Cell::new(x, y).unwrap()
    }

    #[test]
    fn food_and_player_are_lit() {
        let food: CellSet = [cell(1, 1), cell(6, 4)].into_iter().collect();
        let bitmap = render(cell(0, 0), &food);
        assert!(bitmap.is_lit(cell(0, 0)));
        assert!(bitmap.is_lit(cell(1, 1)));
        assert!(bitmap.is_lit(cell(6, 4)));
        assert_eq!(bitmap.lit_count(), 3);
    }

    #[test]
    fn player_occludes_food() {
        let food: CellSet = [cell(3, 3), cell(5, 0)].into_iter().collect();
        let bitmap = render(cell(3, 3), &food);
        assert!(bitmap.is_lit(cell(3, 3)));
        assert_eq!(bitmap.lit_count(), 2);
    }

    #[test]
    fn empty_board_shows_only_the_player() {
        let bitmap = render(cell(7, 7), &CellSet::EMPTY);
        assert_eq!(bitmap.rows(), &[0, 0, 0, 0, 0, 0, 0, 0x01]);
    }

    #[test]
    fn cross_covers_both_diagonals() {
        assert_eq!(
            win_cross().rows(),
            &[0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81]
        );
    }
}
