#![allow(dead_code)]

use picobot::{Grid, StateMachine};

/// Wall-following rules that sweep an empty rectangle row by row.
///
/// State 0 heads west to the wall and climbs to the top-left corner, states
/// 1 and 2 sweep east and west, dropping one row at each wall. Every move
/// checks that its target is open.
pub const SWEEP_RULES: &str = "\
# find the west wall, then climb to the corner
0 **x* -> W 0
0 x*W* -> N 0
0 NxW* -> E 1
# sweep east, then down
1 *x** -> E 1
1 *E*x -> S 2
1 *E*S -> X 1
# sweep west, then down
2 **x* -> W 2
2 **Wx -> S 1
2 **WS -> X 2
";

/// Draw the arena: `R` robot, `#` obstacle, `o` visited, `.` untouched
pub fn draw(grid: &Grid, robot: (i32, i32)) -> String {
    let mut result = String::new();
    for y in 0..=grid.max_y() {
        for x in 0..=grid.max_x() {
            let symbol = if (x, y) == robot {
                'R'
            } else if grid.blocked(x, y).unwrap() {
                '#'
            } else if grid.touched(x, y).unwrap() {
                'o'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Draw the machine's current arena
pub fn draw_machine(sm: &StateMachine) -> String {
    draw(sm.grid(), sm.agent().position())
}
