//! 井字棋棋盘与规则
//!
//! 棋盘是纯值类型：落子总是返回新棋盘，原棋盘不变，
//! 因此搜索可以从同一祖先局面展开多个分支而互不干扰。

use crate::error::{Error, Result};
use crate::notation::{cells_to_notation, parse_notation};
use crate::types::{Action, Cell, GameResult, Player, BOARD_SIZE, CELL_COUNT};
use std::fmt;

/// 所有连线（行优先下标），扫描顺序：三行、三列、主对角线、副对角线
pub(crate) const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [6, 4, 2],
];

/// 3x3 棋盘（行优先存储）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// 初始局面：全部为空
    pub fn initial_state() -> Board {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// 从记谱字符串创建棋盘
    pub fn from_notation(notation: &str) -> Result<Board> {
        let cells = parse_notation(notation)?;
        Ok(Board { cells })
    }

    /// 转换为规范记谱
    pub fn to_notation(&self) -> String {
        cells_to_notation(&self.cells)
    }

    /// 获取所有格子（行优先）
    #[inline]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// 获取某位置的格子，越界返回 None
    #[inline]
    pub fn get_cell(&self, row: usize, col: usize) -> Option<Cell> {
        let action = Action::new(row, col);
        if !action.is_valid() {
            return None;
        }
        Some(self.cells[action.to_index()])
    }

    /// 统计某种格子的数量
    fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// 当前行棋方
    ///
    /// X 的子数不多于 O 时轮到 X，否则轮到 O。
    pub fn current_player(&self) -> Player {
        if self.count(Cell::X) <= self.count(Cell::O) {
            Player::X
        } else {
            Player::O
        }
    }

    /// 所有合法落子（行优先顺序，无重复），空集表示棋盘已满
    pub fn legal_actions(&self) -> Vec<Action> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| Action::from_index(idx))
            .collect()
    }

    /// 执行落子，返回新棋盘
    ///
    /// 目标格越界或非空时返回 [`Error::InvalidMove`]。
    pub fn apply_action(&self, action: Action) -> Result<Board> {
        if !action.is_valid() || !self.cells[action.to_index()].is_empty() {
            return Err(Error::InvalidMove {
                row: action.row,
                col: action.col,
            });
        }

        let mut next = *self;
        next.cells[action.to_index()] = self.current_player().to_cell();
        Ok(next)
    }

    /// 胜者：按三行、三列、两条对角线的顺序返回第一条被同一方占满的连线
    pub fn winner(&self) -> Option<Player> {
        WIN_LINES.iter().find_map(|&[a, b, c]| {
            let owner = self.cells[a].owner()?;
            if self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a] {
                Some(owner)
            } else {
                None
            }
        })
    }

    /// 有胜者或棋盘已满时对局结束
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.cells.iter().all(|c| !c.is_empty())
    }

    /// 终局得分：X 胜 +1，O 胜 -1，其余 0
    ///
    /// 只在终局有意义。未结束且无胜者的局面同样返回 0，
    /// 调用方需自行保证只在 [`Board::is_terminal`] 为真时使用。
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    /// 判断对局结果
    pub fn game_result(&self) -> GameResult {
        match self.winner() {
            Some(Player::X) => GameResult::XWin,
            Some(Player::O) => GameResult::OWin,
            None if self.is_terminal() => GameResult::Draw,
            None => GameResult::Ongoing,
        }
    }

    /// 获取所有合法落子（字符串格式）
    pub fn legal_actions_str(&self) -> Vec<String> {
        self.legal_actions()
            .iter()
            .map(|a| a.to_notation())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            if row > 0 {
                writeln!(f, "-+-+-")?;
            }
            let line: Vec<String> = (0..BOARD_SIZE)
                .map(|col| match self.get_cell(row, col) {
                    Some(Cell::Empty) | None => " ".to_string(),
                    Some(cell) => cell.to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

/// 从记谱获取所有合法落子
pub fn get_legal_moves_from_notation(notation: &str) -> Result<Vec<String>> {
    let board = Board::from_notation(notation)?;
    Ok(board.legal_actions_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions::*;

    fn board(notation: &str) -> Board {
        Board::from_notation(notation).unwrap()
    }

    /// 从初始局面出发枚举所有可达局面
    fn reachable_boards() -> Vec<Board> {
        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![Board::initial_state()];
        while let Some(b) = stack.pop() {
            if !seen.insert(b) {
                continue;
            }
            if b.is_terminal() {
                continue;
            }
            for a in b.legal_actions() {
                stack.push(b.apply_action(a).unwrap());
            }
        }
        seen.into_iter().collect()
    }

    #[test]
    fn test_initial_board() {
        let b = Board::initial_state();
        assert_eq!(b.current_player(), Player::X);
        assert_eq!(b.legal_actions().len(), 9);
        assert_eq!(b.winner(), None);
        assert!(!b.is_terminal());
        assert_eq!(b.game_result(), GameResult::Ongoing);
        assert_eq!(b, board(START));
    }

    #[test]
    fn test_current_player_alternates() {
        let b = Board::initial_state();
        let b = b.apply_action(Action::new(1, 1)).unwrap();
        assert_eq!(b.current_player(), Player::O);
        let b = b.apply_action(Action::new(0, 0)).unwrap();
        assert_eq!(b.current_player(), Player::X);
    }

    #[test]
    fn test_legal_actions_row_major() {
        let b = board(X_TO_WIN_OR_BLOCK);
        let actions = b.legal_actions();
        assert_eq!(
            actions,
            vec![
                Action::new(0, 2),
                Action::new(1, 2),
                Action::new(2, 0),
                Action::new(2, 1),
                Action::new(2, 2),
            ]
        );

        let full = board(DRAW_FULL);
        assert!(full.legal_actions().is_empty());
    }

    #[test]
    fn test_apply_action_changes_one_cell() {
        for b in reachable_boards() {
            let mover = b.current_player();
            for a in b.legal_actions() {
                let next = b.apply_action(a).unwrap();
                let diffs: Vec<usize> = (0..CELL_COUNT)
                    .filter(|&i| b.cells()[i] != next.cells()[i])
                    .collect();
                assert_eq!(diffs, vec![a.to_index()]);
                assert_eq!(next.cells()[a.to_index()], mover.to_cell());
            }
        }
    }

    #[test]
    fn test_apply_action_does_not_mutate() {
        let b = board(X_TO_WIN_OR_BLOCK);
        let before = b;
        let _ = b.apply_action(Action::new(0, 2)).unwrap();
        let _ = b.apply_action(Action::new(2, 2)).unwrap();
        assert_eq!(b, before);
        assert_eq!(b.cells()[2], Cell::Empty);
    }

    #[test]
    fn test_invalid_moves() {
        let b = board(X_TO_WIN_OR_BLOCK);
        assert_eq!(
            b.apply_action(Action::new(0, 0)),
            Err(Error::InvalidMove { row: 0, col: 0 })
        );
        assert_eq!(
            b.apply_action(Action::new(3, 0)),
            Err(Error::InvalidMove { row: 3, col: 0 })
        );
        assert_eq!(
            b.apply_action(Action::new(0, 7)),
            Err(Error::InvalidMove { row: 0, col: 7 })
        );
    }

    #[test]
    fn test_row_win() {
        let b = board(X_WON_ROW);
        assert_eq!(b.winner(), Some(Player::X));
        assert_eq!(b.utility(), 1);
        assert!(b.is_terminal());
        assert_eq!(b.game_result(), GameResult::XWin);
    }

    #[test]
    fn test_column_and_diagonal_wins() {
        let col = board(O_WON_COLUMN);
        assert_eq!(col.winner(), Some(Player::O));
        assert_eq!(col.utility(), -1);
        assert!(col.is_terminal());

        let diag = board(X_WON_DIAGONAL);
        assert_eq!(diag.winner(), Some(Player::X));

        let anti = board(X_WON_ANTI_DIAGONAL);
        assert_eq!(anti.winner(), Some(Player::X));
        assert_eq!(anti.game_result(), GameResult::XWin);
    }

    #[test]
    fn test_full_board_draw() {
        let b = board(DRAW_FULL);
        assert_eq!(b.winner(), None);
        assert!(b.is_terminal());
        assert_eq!(b.utility(), 0);
        assert_eq!(b.game_result(), GameResult::Draw);
    }

    #[test]
    fn test_utility_on_ongoing_board_is_zero() {
        let b = board(X_TO_WIN_OR_BLOCK);
        assert!(!b.is_terminal());
        assert_eq!(b.utility(), 0);
        assert_eq!(b.game_result(), GameResult::Ongoing);
    }

    #[test]
    fn test_terminal_definition() {
        for b in reachable_boards() {
            let expected = b.winner().is_some() || b.legal_actions().is_empty();
            assert_eq!(b.is_terminal(), expected, "board {}", b.to_notation());
        }
    }

    #[test]
    fn test_reachable_count_invariant() {
        let boards = reachable_boards();
        // 井字棋共有 5478 个合法局面
        assert_eq!(boards.len(), 5478);
        for b in boards {
            let x = b.cells().iter().filter(|c| **c == Cell::X).count();
            let o = b.cells().iter().filter(|c| **c == Cell::O).count();
            assert!(x == o || x == o + 1);
        }
    }

    #[test]
    fn test_queries_are_idempotent() {
        for notation in [START, X_TO_WIN_OR_BLOCK, DRAW_FULL, X_WON_ROW] {
            let b = board(notation);
            let before = b;
            assert_eq!(b.legal_actions(), b.legal_actions());
            assert_eq!(b.winner(), b.winner());
            assert_eq!(b.is_terminal(), b.is_terminal());
            assert_eq!(b.utility(), b.utility());
            assert_eq!(b, before);
        }
    }

    #[test]
    fn test_notation_roundtrip() {
        let b = board(X_TO_WIN_OR_BLOCK);
        assert_eq!(b.to_notation(), X_TO_WIN_OR_BLOCK);
        assert_eq!(b.get_cell(1, 0), Some(Cell::O));
        assert_eq!(b.get_cell(3, 0), None);
    }

    #[test]
    fn test_legal_moves_from_notation() {
        let moves = get_legal_moves_from_notation(X_WON_ROW).unwrap();
        assert_eq!(moves, vec!["1,2", "2,0", "2,1", "2,2"]);
        assert!(get_legal_moves_from_notation("bogus").is_err());
    }

    #[test]
    fn test_display() {
        let b = board("X1O/1X1/3");
        assert_eq!(b.to_string(), "X| |O\n-+-+-\n |X| \n-+-+-\n | | \n");
    }
}
