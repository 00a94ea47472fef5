//! 棋盘记谱解析和生成
//!
//! 类 FEN 格式: `<第0行>/<第1行>/<第2行>`
//!
//! 符号：
//! - `X` / `O`：已落子（输入不区分大小写）
//! - 数字 (1-3)：连续空格
//! - `.`：单个空格（仅输入）
//!
//! 例如 `XX1/OO1/3` 表示 X 在第 0 行占两格、O 在第 1 行占两格。

use crate::board::{Board, WIN_LINES};
use crate::error::{Error, Result};
use crate::types::{Action, Cell, Player, BOARD_SIZE, CELL_COUNT};

fn invalid(notation: &str, reason: impl Into<String>) -> Error {
    Error::InvalidNotation {
        notation: notation.to_string(),
        reason: reason.into(),
    }
}

/// 解析棋盘记谱，返回行优先的格子数组
///
/// 同时校验局面可达：X 与 O 子数相等或 X 多一个；双方不能都连成线；
/// 胜方必须是最后落子的一方。
pub fn parse_notation(notation: &str) -> Result<[Cell; CELL_COUNT]> {
    let trimmed = notation.trim();
    let rows: Vec<&str> = trimmed.split('/').collect();
    if rows.len() != BOARD_SIZE {
        return Err(invalid(
            notation,
            format!("expected {} rows, got {}", BOARD_SIZE, rows.len()),
        ));
    }

    let mut cells = [Cell::Empty; CELL_COUNT];

    for (row, row_str) in rows.iter().enumerate() {
        let mut col = 0;

        for ch in row_str.chars() {
            if col >= BOARD_SIZE {
                return Err(invalid(
                    notation,
                    format!("row {} has more than {} columns", row, BOARD_SIZE),
                ));
            }

            if let Some(run) = ch.to_digit(10) {
                let run = run as usize;
                if run == 0 || col + run > BOARD_SIZE {
                    return Err(invalid(
                        notation,
                        format!("bad empty run '{}' in row {}", ch, row),
                    ));
                }
                col += run;
            } else {
                let cell = Cell::from_char(ch)
                    .ok_or_else(|| invalid(notation, format!("invalid character '{}'", ch)))?;
                cells[row * BOARD_SIZE + col] = cell;
                col += 1;
            }
        }

        if col != BOARD_SIZE {
            return Err(invalid(
                notation,
                format!("row {} has {} columns, expected {}", row, col, BOARD_SIZE),
            ));
        }
    }

    let x_count = cells.iter().filter(|c| **c == Cell::X).count();
    let o_count = cells.iter().filter(|c| **c == Cell::O).count();
    if x_count != o_count && x_count != o_count + 1 {
        return Err(Error::InvalidPieceCounts { x_count, o_count });
    }

    let has_line = |player: Player| {
        let cell = player.to_cell();
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == cell))
    };
    let x_won = has_line(Player::X);
    let o_won = has_line(Player::O);
    if x_won && o_won {
        return Err(invalid(notation, "both players have three in a row"));
    }
    if x_won && x_count == o_count {
        return Err(invalid(notation, "O moved after X had already won"));
    }
    if o_won && x_count > o_count {
        return Err(invalid(notation, "X moved after O had already won"));
    }

    Ok(cells)
}

/// 从格子数组生成规范记谱（空格用数字表示）
pub fn cells_to_notation(cells: &[Cell; CELL_COUNT]) -> String {
    let mut rows = Vec::with_capacity(BOARD_SIZE);

    for row in cells.chunks(BOARD_SIZE) {
        let mut row_str = String::new();
        let mut empty_count = 0;

        for cell in row {
            match cell.owner() {
                Some(player) => {
                    if empty_count > 0 {
                        row_str.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row_str.push(player.to_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            row_str.push_str(&empty_count.to_string());
        }

        rows.push(row_str);
    }

    rows.join("/")
}

/// 在记谱上执行落子，返回新的记谱
pub fn apply_action_to_notation(notation: &str, action_str: &str) -> Result<String> {
    let board = Board::from_notation(notation)?;
    let action = Action::from_notation(action_str)?;
    let next = board.apply_action(action)?;
    Ok(next.to_notation())
}
