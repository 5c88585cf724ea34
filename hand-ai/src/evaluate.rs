//! 局面评估函数

use rules::{Board, Ledger, DEFAULT_BANNER_WEIGHT, DEFAULT_CARD_WEIGHT};
use serde::{Deserialize, Serialize};

/// 评估权重
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// 每面旗帜的分值
    pub banner: i32,
    /// 每张手牌的分值
    pub card: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            banner: DEFAULT_BANNER_WEIGHT,
            card: DEFAULT_CARD_WEIGHT,
        }
    }
}

/// 评估器
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    /// 评估局面（玩家 1 视角，正值对玩家 1 有利）
    ///
    /// 只看双方账本；棋盘参数保留给位置类评估项。
    pub fn evaluate(&self, _board: &Board, ledger1: &Ledger, ledger2: &Ledger) -> i32 {
        self.score(ledger1) - self.score(ledger2)
    }

    /// 单方得分：旗帜分 + 手牌分
    fn score(&self, ledger: &Ledger) -> i32 {
        ledger.banner_count() as i32 * self.weights.banner
            + ledger.total_cards() as i32 * self.weights.card
    }
}
