use std::fmt;

use crate::coordinates::{Coordinate, Direction};
use crate::grid::Grid;
use crate::room::Room;
use crate::units::{ColumnsCount, RowsCount};

const CORNER: &str = "+";
const WALL_LR_3: &str = "---";
const WALL_UD: &str = "|";
const DOOR_LR_3: &str = "   ";
const DOOR_UD: &str = " ";

/// Render the contents of a room as text, 3 glyphs wide.
pub fn render_room_body(room: &Room) -> &'static str {
    if room.is_exit() {
        " X "
    } else if room.is_start() {
        " S "
    } else if room.is_on_path() {
        " * "
    } else {
        "   "
    }
}

// Each room draws its own northern and western boundaries. The southern boundary of the last
// row and the eastern boundary of the last column are always drawn as walls.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let RowsCount(rows_count) = self.rows();
        let ColumnsCount(columns_count) = self.columns();

        for row in 0..rows_count {
            let mut top_section_render = String::from("");
            let mut middle_section_render = String::from("");

            for column in 0..columns_count {
                let coord = Coordinate::new(row, column);
                let room = self.room(coord);

                top_section_render.push_str(CORNER);
                top_section_render.push_str(if room.has_door(Direction::Up) {
                    DOOR_LR_3
                } else {
                    WALL_LR_3
                });

                middle_section_render.push_str(if room.has_door(Direction::Left) {
                    DOOR_UD
                } else {
                    WALL_UD
                });
                middle_section_render.push_str(render_room_body(room));
            }
            top_section_render.push_str(CORNER);
            middle_section_render.push_str(WALL_UD);

            writeln!(f, "{}", top_section_render)?;
            writeln!(f, "{}", middle_section_render)?;
        }

        let mut bottom_render = String::from("");
        for _ in 0..columns_count {
            bottom_render.push_str(CORNER);
            bottom_render.push_str(WALL_LR_3);
        }
        bottom_render.push_str(CORNER);
        writeln!(f, "{}", bottom_render)
    }
}
