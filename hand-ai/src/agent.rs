//! 自动玩家接口
//!
//! 任何能根据局面给出走法的对象都可以作为自动玩家。调用方负责传入局面副本，
//! 并在外部施加超时与故障隔离。

use std::sync::Mutex;

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rules::{Board, Ledger, Location, MoveGenerator};

use crate::search::{AiConfig, AiEngine};

/// 自动玩家
pub trait Agent: Send + Sync {
    /// 玩家名称（用于日志）
    fn name(&self) -> &str;

    /// 给出走法；`Ok(None)` 表示无棋可走
    fn propose_move(
        &self,
        board: &Board,
        me: &Ledger,
        opponent: &Ledger,
    ) -> anyhow::Result<Option<Location>>;
}

/// 搜索玩家
pub struct MinimaxAgent {
    name: String,
    config: AiConfig,
}

impl MinimaxAgent {
    pub fn new(config: AiConfig) -> Self {
        Self {
            name: format!("minimax(depth={})", config.max_depth),
            config,
        }
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose_move(
        &self,
        board: &Board,
        me: &Ledger,
        opponent: &Ledger,
    ) -> anyhow::Result<Option<Location>> {
        // 每次走子使用新的引擎，搜索状态不跨步保留
        let mut engine = AiEngine::new(self.config.clone());
        engine
            .select_move(board, me, opponent)
            .context("搜索失败")
    }
}

/// 随机玩家：在合法走法中均匀随机选择
pub struct RandomAgent {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomAgent {
    /// 指定种子，结果可复现
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn propose_move(
        &self,
        board: &Board,
        _me: &Ledger,
        _opponent: &Ledger,
    ) -> anyhow::Result<Option<Location>> {
        let moves = MoveGenerator::legal_moves(board)?;
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("随机数生成器锁已损坏"))?;
        Ok(moves.choose(&mut *rng).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::{Card, House, Piece};

    fn loc(index: u8) -> Location {
        Location::new_unchecked(index)
    }

    fn sample_board() -> Board {
        let mut board = Board::empty();
        board.set(loc(0), Some(Piece::Envoy));
        board.set(loc(1), Some(Piece::Card(Card::new(House::Stark, "Arya Stark"))));
        board.set(loc(2), Some(Piece::Card(Card::new(House::Stark, "Sansa Stark"))));
        board.set(loc(12), Some(Piece::Card(Card::new(House::Tully, "Hoster Tully"))));
        board.set(loc(14), Some(Piece::Card(Card::new(House::Tyrell, "Loras Tyrell"))));
        board
    }

    #[test]
    fn test_minimax_agent_proposes_legal_move() {
        let agent = MinimaxAgent::new(AiConfig::unlimited(3));
        let board = sample_board();
        let mv = agent
            .propose_move(&board, &Ledger::new(), &Ledger::new())
            .unwrap()
            .unwrap();
        assert!(MoveGenerator::is_legal(&board, mv).unwrap());
        assert_eq!(agent.name(), "minimax(depth=3)");
    }

    #[test]
    fn test_random_agent_is_reproducible() {
        let board = sample_board();
        let a = RandomAgent::with_seed(7);
        let b = RandomAgent::with_seed(7);
        for _ in 0..5 {
            let x = a.propose_move(&board, &Ledger::new(), &Ledger::new()).unwrap();
            let y = b.propose_move(&board, &Ledger::new(), &Ledger::new()).unwrap();
            assert_eq!(x, y);
            assert!(MoveGenerator::is_legal(&board, x.unwrap()).unwrap());
        }
    }

    #[test]
    fn test_agents_report_no_move() {
        let mut board = Board::empty();
        board.set(loc(0), Some(Piece::Envoy));
        board.set(loc(7), Some(Piece::Card(Card::new(House::Stark, "Arya Stark"))));

        let minimax = MinimaxAgent::new(AiConfig::default());
        let random = RandomAgent::with_seed(1);
        assert_eq!(
            minimax.propose_move(&board, &Ledger::new(), &Ledger::new()).unwrap(),
            None
        );
        assert_eq!(
            random.propose_move(&board, &Ledger::new(), &Ledger::new()).unwrap(),
            None
        );
    }

    #[test]
    fn test_agent_fault_on_broken_board() {
        let board = Board::empty();
        let agent = MinimaxAgent::new(AiConfig::unlimited(2));
        assert!(agent
            .propose_move(&board, &Ledger::new(), &Ledger::new())
            .is_err());
    }
}
