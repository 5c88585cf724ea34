//! 对局状态
//!
//! 把棋盘、双方账本和走子方组合在一起，一步走法依次完成吃牌、旗帜更新和换手。

use serde::{Deserialize, Serialize};

use crate::banner::{assign_banners, calculate_winner, GameOutcome};
use crate::board::Board;
use crate::capture::apply_move;
use crate::card::{House, Location};
use crate::error::Result;
use crate::ledger::{Ledger, Standing};
use crate::moves::MoveGenerator;
use crate::player::PlayerId;

/// 一步走法的结算结果，供展示层使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// 走子方
    pub player: PlayerId,
    /// 密使的目标位置
    pub destination: Location,
    /// 被吃的家族
    pub house: House,
    /// 本步吃到的牌数（含所选牌）
    pub captured: usize,
    /// 双方展示状态，按玩家下标
    pub standings: [Standing; 2],
}

/// 完整的对局状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    /// 双方账本，按玩家下标
    pub ledgers: [Ledger; 2],
    /// 当前走子方
    pub current_turn: PlayerId,
    /// 已完成的走子数（不含弃权）
    pub moves_played: u32,
}

impl GameState {
    /// 从初始棋盘创建，玩家 1 先走
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ledgers: [Ledger::new(), Ledger::new()],
            current_turn: PlayerId::One,
            moves_played: 0,
        }
    }

    pub fn ledger(&self, player: PlayerId) -> &Ledger {
        &self.ledgers[player.index()]
    }

    /// 当前局面的合法走法
    pub fn legal_moves(&self) -> Result<Vec<Location>> {
        MoveGenerator::legal_moves(&self.board)
    }

    pub fn is_over(&self) -> Result<bool> {
        MoveGenerator::is_game_over(&self.board)
    }

    /// 当前走子方执行一步走法：吃牌、更新旗帜、换手
    pub fn apply_move(&mut self, destination: Location) -> Result<TurnReport> {
        let player = self.current_turn;
        let before = self.ledgers[player.index()].total_cards();

        let house = apply_move(
            &mut self.board,
            destination,
            &mut self.ledgers[player.index()],
        )?;
        let captured = self.ledgers[player.index()].total_cards() - before;

        let [ledger1, ledger2] = &mut self.ledgers;
        let (standing1, standing2) = assign_banners(ledger1, ledger2, house, player);

        self.current_turn = player.opponent();
        self.moves_played += 1;

        Ok(TurnReport {
            player,
            destination,
            house,
            captured,
            standings: [standing1, standing2],
        })
    }

    /// 当前走子方弃权，棋盘不变
    pub fn pass_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// 按当前账本判定结果
    pub fn outcome(&self) -> GameOutcome {
        calculate_winner(&self.ledgers[0], &self.ledgers[1])
    }
}
