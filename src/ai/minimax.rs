//! Minimax AI 策略
//!
//! 穷举整棵博弈树：不剪枝、不缓存、不随机。X 为极大方，O 为极小方，
//! 分值取自终局 [`Board::utility`]。

use super::{sort_and_truncate, AIStrategy, ScoredMove, NODE_COUNT};
use crate::board::Board;
use crate::types::{Action, Player};
use log::{debug, trace};
use std::sync::atomic::Ordering;

/// 搜索结果：局面分值和达到该分值的落子（终局时为 None）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub value: i32,
    pub action: Option<Action>,
}

/// 当前行棋方的最佳落子，终局返回 None
pub fn best_move(board: &Board) -> Option<Action> {
    if board.is_terminal() {
        return None;
    }

    let result = match board.current_player() {
        Player::X => max_value(board),
        Player::O => min_value(board),
    };
    debug!(
        "best_move {} -> {:?} (value {})",
        board.to_notation(),
        result.action,
        result.value
    );
    result.action
}

/// 极大层：选出使后继 min_value 严格最大的第一个落子
pub fn max_value(board: &Board) -> SearchResult {
    NODE_COUNT.fetch_add(1, Ordering::Relaxed);

    if board.is_terminal() {
        return SearchResult {
            value: board.utility(),
            action: None,
        };
    }

    let mut best = SearchResult {
        value: i32::MIN,
        action: None,
    };
    for action in board.legal_actions() {
        let child = board
            .apply_action(action)
            .expect("action from legal_actions must apply");
        let value = min_value(&child).value;
        if value > best.value {
            best = SearchResult {
                value,
                action: Some(action),
            };
        }
    }
    best
}

/// 极小层：选出使后继 max_value 严格最小的第一个落子
pub fn min_value(board: &Board) -> SearchResult {
    NODE_COUNT.fetch_add(1, Ordering::Relaxed);

    if board.is_terminal() {
        return SearchResult {
            value: board.utility(),
            action: None,
        };
    }

    let mut best = SearchResult {
        value: i32::MAX,
        action: None,
    };
    for action in board.legal_actions() {
        let child = board
            .apply_action(action)
            .expect("action from legal_actions must apply");
        let value = max_value(&child).value;
        if value < best.value {
            best = SearchResult {
                value,
                action: Some(action),
            };
        }
    }
    best
}

/// 局面的 minimax 分值（X 视角），按行棋方选择极大或极小层
pub fn minimax_value(board: &Board) -> i32 {
    match board.current_player() {
        Player::X => max_value(board).value,
        Player::O => min_value(board).value,
    }
}

/// Minimax AI - 完全搜索，始终给出最优落子
#[derive(Debug, Clone, Default)]
pub struct MinimaxAI;

impl MinimaxAI {
    pub fn new() -> Self {
        MinimaxAI
    }
}

impl AIStrategy for MinimaxAI {
    fn select_moves(&self, board: &Board, n: usize) -> Vec<ScoredMove> {
        if board.is_terminal() {
            return Vec::new();
        }

        let mover = board.current_player();

        let mut scored: Vec<ScoredMove> = board
            .legal_actions()
            .into_iter()
            .map(|action| {
                let child = board
                    .apply_action(action)
                    .expect("action from legal_actions must apply");
                let value = minimax_value(&child);
                // 转换为行棋方视角
                let score = match mover {
                    Player::X => value,
                    Player::O => -value,
                };
                trace!("candidate {} score {}", action, score);
                ScoredMove {
                    action,
                    score: score as f64,
                }
            })
            .collect();

        sort_and_truncate(&mut scored, n);
        scored
    }

    fn select_best_move(&self, board: &Board) -> Option<Action> {
        best_move(board)
    }
}
