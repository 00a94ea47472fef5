//! 随机 AI 策略

use super::{sort_and_truncate, AIStrategy, ScoredMove};
use crate::board::Board;
use rand::prelude::*;
use std::cell::RefCell;

/// 随机 AI - 随机选择合法落子
///
/// 随机数状态在多次调用之间延续，整局对弈中每步都抽取新的随机数。
pub struct RandomAI {
    rng: RefCell<StdRng>,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI {
            rng: RefCell::new(rng),
        }
    }
}

impl AIStrategy for RandomAI {
    fn select_moves(&self, board: &Board, n: usize) -> Vec<ScoredMove> {
        if board.is_terminal() {
            return Vec::new();
        }

        let mut rng = self.rng.borrow_mut();

        let mut scored: Vec<ScoredMove> = board
            .legal_actions()
            .into_iter()
            .map(|action| ScoredMove {
                action,
                score: rng.gen::<f64>(),
            })
            .collect();

        sort_and_truncate(&mut scored, n);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 选中的落子在合法落子列表中的下标
    fn chosen_index(ai: &RandomAI, board: &Board) -> usize {
        let action = ai.select_best_move(board).unwrap();
        board
            .legal_actions()
            .iter()
            .position(|a| *a == action)
            .unwrap()
    }

    #[test]
    fn test_sequence_continues_between_calls() {
        let ai = RandomAI::new(Some(42));
        let corner = Board::from_notation("X2/3/3").unwrap();
        let edge = Board::from_notation("1X1/3/3").unwrap();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..20 {
            seen.insert(chosen_index(&ai, &corner));
            seen.insert(chosen_index(&ai, &edge));
        }
        assert!(seen.len() > 1, "random AI always picked index {:?}", seen);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = RandomAI::new(Some(3));
        let b = RandomAI::new(Some(3));
        let board = Board::initial_state();
        for _ in 0..5 {
            assert_eq!(a.select_best_move(&board), b.select_best_move(&board));
        }
    }

    #[test]
    fn test_terminal_board_has_no_moves() {
        let ai = RandomAI::new(Some(1));
        let board = Board::from_notation("XXX/OO1/3").unwrap();
        assert!(ai.select_moves(&board, 3).is_empty());
    }
}
