//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::card::{Card, House, Location, Piece};
use crate::constants::CELL_COUNT;
use crate::error::{Result, RulesError};

/// 棋盘
///
/// 以位置为下标的定长槽位数组。克隆即完整的值拷贝，
/// 搜索分支与真实对局之间不共享任何状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 6x6 棋盘，索引为 row * 6 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; CELL_COUNT],
        }
    }

    /// 获取指定位置的棋子
    pub fn get(&self, loc: Location) -> Option<&Piece> {
        self.squares.get(loc.to_index()).and_then(|p| p.as_ref())
    }

    /// 设置指定位置的棋子
    pub fn set(&mut self, loc: Location, piece: Option<Piece>) {
        if let Some(square) = self.squares.get_mut(loc.to_index()) {
            *square = piece;
        }
    }

    /// 取走指定位置的棋子
    pub fn take(&mut self, loc: Location) -> Option<Piece> {
        self.squares.get_mut(loc.to_index()).and_then(|p| p.take())
    }

    /// 查找密使位置
    ///
    /// 棋盘上必须恰好有一个密使。
    pub fn find_envoy(&self) -> Result<Location> {
        let mut found = None;
        let mut count = 0;
        for (loc, piece) in self.pieces() {
            if piece.is_envoy() {
                count += 1;
                found.get_or_insert(loc);
            }
        }
        match (found, count) {
            (Some(loc), 1) => Ok(loc),
            (None, _) => Err(RulesError::EnvoyMissing),
            (Some(_), count) => Err(RulesError::EnvoyDuplicated { count }),
        }
    }

    /// 获取指定位置的家族牌，空格或密使视为不变量错误
    pub fn card_at(&self, loc: Location) -> Result<&Card> {
        self.get(loc)
            .and_then(Piece::as_card)
            .ok_or(RulesError::EmptySquare { location: loc })
    }

    /// 所有棋子（含密使），按位置升序
    pub fn pieces(&self) -> impl Iterator<Item = (Location, &Piece)> {
        Location::all().filter_map(move |loc| self.get(loc).map(|p| (loc, p)))
    }

    /// 所有家族牌，按位置升序
    pub fn cards(&self) -> impl Iterator<Item = (Location, &Card)> {
        self.pieces()
            .filter_map(|(loc, piece)| piece.as_card().map(|card| (loc, card)))
    }

    /// 棋子总数（含密使）
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }

    /// 家族牌总数
    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// 棋盘上剩余的某家族牌数
    pub fn remaining(&self, house: House) -> usize {
        self.cards().filter(|(_, card)| card.house == house).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
