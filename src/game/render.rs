//! Text rendering of a board

use std::{collections::HashSet, fmt};

use super::env::{DotsAndBoxes, Player};
use crate::board::Edge;

/// Draw the dot grid with its drawn edges and, where known, box owners.
///
/// ```text
///    0   1   2
/// 0  *---*   *
///    | 1 |
/// 1  *---*   *
///
/// 2  *   *   *
/// ```
pub fn render_board(
    size: usize,
    taken: &[Edge],
    owner: impl Fn(usize, usize) -> Option<Player>,
) -> String {
    let drawn: HashSet<Edge> = taken.iter().copied().collect();
    let mut out = String::new();

    out.push_str("  ");
    for col in 0..=size {
        out.push_str(&format!(" {col:<3}"));
    }
    out.push('\n');

    for row in 0..=size {
        out.push_str(&format!("{row:<3}"));
        for col in 0..=size {
            out.push('*');
            if col < size {
                let edge = Edge::new((row, col), (row, col + 1));
                out.push_str(if drawn.contains(&edge) { "---" } else { "   " });
            }
        }
        out.push('\n');

        if row == size {
            break;
        }
        out.push_str("   ");
        for col in 0..=size {
            let edge = Edge::new((row, col), (row + 1, col));
            out.push(if drawn.contains(&edge) { '|' } else { ' ' });
            if col < size {
                match owner(row, col) {
                    Some(player) => out.push_str(&format!(" {} ", player.index())),
                    None => out.push_str("   "),
                }
            }
        }
        out.push('\n');
    }

    // trailing spaces carry no information
    out.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for DotsAndBoxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = render_board(self.size(), &self.board().taken_edges(), |row, col| {
            self.box_owner(row, col)
        });
        writeln!(f, "{board}")?;
        write!(
            f,
            "player 1: {}  player 2: {}  to move: player {}",
            self.points(Player::One),
            self.points(Player::Two),
            self.turn().index()
        )
    }
}
