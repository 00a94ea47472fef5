//! Tic-Tac-Toe AI Engine
//!
//! 井字棋引擎 - 规则判定与穷举 minimax 搜索，支持记谱输入输出

pub mod ai;
pub mod board;
pub mod error;
pub mod notation;
pub mod test_positions;
pub mod types;

pub use ai::{
    best_move, get_node_count, max_value, min_value, minimax_value, reset_node_count,
    strategies_help, AIConfig, AIEngine, AIStrategy, MinimaxAI, RandomAI, ScoredMove,
    SearchResult, AVAILABLE_STRATEGIES, DEFAULT_STRATEGY,
};
pub use board::{get_legal_moves_from_notation, Board};
pub use error::{Error, Result};
pub use notation::{apply_action_to_notation, cells_to_notation, parse_notation};
pub use types::{Action, Cell, GameResult, Player};
