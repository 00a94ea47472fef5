//! 井字棋核心类型定义
//!
//! 定义棋盘格子、玩家、落子动作和对局结果

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 棋盘边长
pub const BOARD_SIZE: usize = 3;

/// 格子总数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 玩家（X 永远先手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// 获取对手
    pub fn opposite(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// 玩家落子后格子的值
    pub fn to_cell(&self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// 转换为记谱字符
    pub fn to_char(&self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// 格子的值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    X,
    O,
    #[default]
    Empty,
}

impl Cell {
    /// 格子的占有者，空格为 None
    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    /// 从记谱字符解析（大小写均可，`.` 表示空格）
    pub fn from_char(c: char) -> Option<Cell> {
        match c.to_ascii_uppercase() {
            'X' => Some(Cell::X),
            'O' => Some(Cell::O),
            '.' => Some(Cell::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::X => write!(f, "X"),
            Cell::O => write!(f, "O"),
            Cell::Empty => write!(f, "."),
        }
    }
}

/// 落子动作 (row, col)
///
/// row: 0-2 (从上到下)
/// col: 0-2 (从左到右)
///
/// 动作只相对于产生它的棋盘有意义；引擎只检查目标格在范围内且为空。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// 检查坐标是否在棋盘范围内
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// 转换为行优先的格子下标
    #[inline]
    pub fn to_index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// 从格子下标恢复
    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Action {
            row: idx / BOARD_SIZE,
            col: idx % BOARD_SIZE,
        }
    }

    /// 从 `row,col` 字符串解析（如 "0,2"）
    pub fn from_notation(s: &str) -> Result<Action> {
        let (row_str, col_str) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| Error::InvalidAction(s.to_string()))?;
        let row = row_str
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::InvalidAction(s.to_string()))?;
        let col = col_str
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::InvalidAction(s.to_string()))?;

        let action = Action { row, col };
        if !action.is_valid() {
            return Err(Error::InvalidAction(s.to_string()));
        }
        Ok(action)
    }

    /// 转换为 `row,col` 字符串
    pub fn to_notation(&self) -> String {
        format!("{},{}", self.row, self.col)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

/// 对局结果（由棋盘推导，不单独存储）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    XWin,
    OWin,
    Draw,
}

impl GameResult {
    /// 结果对应的胜者
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::XWin => Some(Player::X),
            GameResult::OWin => Some(Player::O),
            GameResult::Draw | GameResult::Ongoing => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameResult::Ongoing => "in progress",
            GameResult::XWin => "X wins",
            GameResult::OWin => "O wins",
            GameResult::Draw => "draw",
        };
        write!(f, "{}", name)
    }
}
