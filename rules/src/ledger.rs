//! 计分账本
//!
//! 每位玩家一本：按家族记录吃到的牌，以及当前持有的家族旗帜。

use serde::{Deserialize, Serialize};

use crate::card::{Card, House};
use crate::constants::HOUSE_COUNT;

/// 单个家族的展示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HouseStatus {
    /// 已吃到的该家族牌数
    pub cards: usize,
    /// 是否持有该家族旗帜
    pub held: bool,
}

/// 一位玩家在全部家族上的展示状态，按 `House::ALL` 顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Standing(pub [HouseStatus; HOUSE_COUNT]);

impl Standing {
    pub fn get(&self, house: House) -> HouseStatus {
        self.0[house.index()]
    }

    /// 迭代 (家族, 状态)
    pub fn iter(&self) -> impl Iterator<Item = (House, HouseStatus)> + '_ {
        House::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// 玩家账本
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ledger {
    captured: [Vec<Card>; HOUSE_COUNT],
    banners: [bool; HOUSE_COUNT],
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记入一张吃到的牌
    pub fn add_card(&mut self, card: Card) {
        self.captured[card.house.index()].push(card);
    }

    /// 某家族已吃到的牌
    pub fn cards(&self, house: House) -> &[Card] {
        &self.captured[house.index()]
    }

    /// 某家族已吃到的牌数
    pub fn card_count(&self, house: House) -> usize {
        self.captured[house.index()].len()
    }

    /// 手牌总数
    pub fn total_cards(&self) -> usize {
        self.captured.iter().map(Vec::len).sum()
    }

    pub fn has_banner(&self, house: House) -> bool {
        self.banners[house.index()]
    }

    /// 持有的旗帜数
    pub fn banner_count(&self) -> usize {
        self.banners.iter().filter(|&&held| held).count()
    }

    pub fn grant_banner(&mut self, house: House) {
        self.banners[house.index()] = true;
    }

    pub fn revoke_banner(&mut self, house: House) {
        self.banners[house.index()] = false;
    }

    /// 某家族的展示状态
    pub fn status(&self, house: House) -> HouseStatus {
        HouseStatus {
            cards: self.card_count(house),
            held: self.has_banner(house),
        }
    }

    /// 全部家族的展示状态
    pub fn standing(&self) -> Standing {
        let mut standing = Standing::default();
        for house in House::ALL {
            standing.0[house.index()] = self.status(house);
        }
        standing
    }
}
