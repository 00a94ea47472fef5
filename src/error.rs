//! 错误类型

use thiserror::Error;

/// 引擎错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 落子位置越界或已被占用
    #[error("invalid move: ({row}, {col}) is out of range or already occupied")]
    InvalidMove { row: usize, col: usize },

    #[error("invalid board notation '{notation}': {reason}")]
    InvalidNotation { notation: String, reason: String },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid action string: {0}")]
    InvalidAction(String),

    #[error("unknown strategy: {0}. Available: minimax, random")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
