//! AI 策略模块
//!
//! 提供穷举 minimax 策略以及用于陪练的随机策略

mod minimax;
mod random;

pub use minimax::{best_move, max_value, min_value, minimax_value, MinimaxAI, SearchResult};
pub use random::RandomAI;

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// 全局节点计数器
pub static NODE_COUNT: AtomicU64 = AtomicU64::new(0);

/// 重置节点计数器
pub fn reset_node_count() {
    NODE_COUNT.store(0, AtomicOrdering::Relaxed);
}

/// 获取当前节点计数
pub fn get_node_count() -> u64 {
    NODE_COUNT.load(AtomicOrdering::Relaxed)
}

use crate::board::Board;
use crate::error::{Error, Result};
use crate::types::Action;
use std::cmp::Ordering;

/// 可用策略名称
pub const AVAILABLE_STRATEGIES: &[&str] = &["minimax", "random"];

/// 默认策略
pub const DEFAULT_STRATEGY: &str = "minimax";

/// AI 配置
#[derive(Debug, Clone, Default)]
pub struct AIConfig {
    /// 随机种子（只影响随机策略）
    pub seed: Option<u64>,
}

/// 落子评分
#[derive(Debug, Clone)]
pub struct ScoredMove {
    pub action: Action,
    /// 行棋方视角的分数，越大越好
    pub score: f64,
}

/// AI 策略接口
pub trait AIStrategy {
    /// 选择落子（返回带评分的落子列表）
    fn select_moves(&self, board: &Board, n: usize) -> Vec<ScoredMove>;

    /// 选择最佳落子
    fn select_best_move(&self, board: &Board) -> Option<Action> {
        self.select_moves(board, 1).first().map(|sm| sm.action)
    }
}

/// 排序辅助函数（稳定排序，同分保持原顺序）
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(n);
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
}

impl AIEngine {
    /// 创建 minimax AI
    pub fn minimax() -> Self {
        AIEngine {
            strategy: Box::new(MinimaxAI::new()),
        }
    }

    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(seed)),
        }
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "minimax" => Ok(Self::minimax()),
            "random" => Ok(Self::random(config.seed)),
            _ => Err(Error::UnknownStrategy(name.to_string())),
        }
    }

    /// 选择落子
    pub fn select_moves(&self, board: &Board, n: usize) -> Vec<ScoredMove> {
        self.strategy.select_moves(board, n)
    }

    /// 选择最佳落子
    pub fn select_best_move(&self, board: &Board) -> Option<Action> {
        self.strategy.select_best_move(board)
    }

    /// 从记谱选择落子（返回带评分的落子字符串）
    pub fn select_moves_notation(&self, notation: &str, n: usize) -> Result<Vec<(String, f64)>> {
        let board = Board::from_notation(notation)?;
        let moves = self.strategy.select_moves(&board, n);
        Ok(moves
            .into_iter()
            .map(|sm| (sm.action.to_notation(), sm.score))
            .collect())
    }

    /// 从记谱选择最佳落子
    pub fn select_best_move_notation(&self, notation: &str) -> Result<Option<String>> {
        let board = Board::from_notation(notation)?;
        Ok(self
            .strategy
            .select_best_move(&board)
            .map(|a| a.to_notation()))
    }
}

/// 策略帮助文本
pub fn strategies_help() -> String {
    format!("Available strategies: {}", AVAILABLE_STRATEGIES.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions::*;
    use crate::types::GameResult;

    /// 两个引擎从初始局面对弈到终局
    fn play_out(x: &AIEngine, o: &AIEngine) -> GameResult {
        let mut board = Board::initial_state();
        while !board.is_terminal() {
            let engine = match board.current_player() {
                crate::types::Player::X => x,
                crate::types::Player::O => o,
            };
            let action = engine.select_best_move(&board).unwrap();
            board = board.apply_action(action).unwrap();
        }
        board.game_result()
    }

    #[test]
    fn test_random_ai() {
        let ai = AIEngine::random(Some(42));
        let moves = ai.select_moves_notation(START, 5).unwrap();
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_random_ai_seeded_is_repeatable() {
        let a = AIEngine::random(Some(7));
        let b = AIEngine::random(Some(7));
        assert_eq!(
            a.select_moves_notation(START, 9).unwrap(),
            b.select_moves_notation(START, 9).unwrap()
        );
    }

    #[test]
    fn test_minimax_takes_win() {
        let ai = AIEngine::minimax();
        let best = ai.select_best_move_notation(X_TO_WIN_OR_BLOCK).unwrap();
        assert_eq!(best.as_deref(), Some("0,2"));
    }

    #[test]
    fn test_terminal_has_no_move() {
        let ai = AIEngine::minimax();
        assert_eq!(ai.select_best_move_notation(X_WON_ROW).unwrap(), None);
        assert!(ai.select_moves_notation(DRAW_FULL, 3).unwrap().is_empty());
    }

    #[test]
    fn test_bad_notation() {
        let ai = AIEngine::minimax();
        assert!(ai.select_best_move_notation("XXX").is_err());
    }

    #[test]
    fn test_all_strategies_from_name() {
        let config = AIConfig::default();
        for name in AVAILABLE_STRATEGIES {
            let result = AIEngine::from_strategy(name, &config);
            assert!(result.is_ok(), "Failed to create strategy: {}", name);
        }
        assert!(AIEngine::from_strategy("MINIMAX", &config).is_ok());
        assert!(matches!(
            AIEngine::from_strategy("alphabeta", &config),
            Err(Error::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_perfect_play_draws() {
        let x = AIEngine::minimax();
        let o = AIEngine::minimax();
        assert_eq!(play_out(&x, &o), GameResult::Draw);
    }

    #[test]
    fn test_minimax_never_loses_to_random() {
        for seed in 0..5 {
            let random = AIEngine::random(Some(seed));
            let minimax = AIEngine::minimax();
            let as_x = play_out(&minimax, &random);
            assert_ne!(as_x, GameResult::OWin, "seed {}", seed);
            let as_o = play_out(&random, &minimax);
            assert_ne!(as_o, GameResult::XWin, "seed {}", seed);
        }
    }
}
