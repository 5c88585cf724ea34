//! 卡牌定义

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, CELL_COUNT, HOUSE_COUNT};

/// 家族
///
/// 变体顺序即终局平局时的裁决优先级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum House {
    Stark,
    Greyjoy,
    Lannister,
    Targaryen,
    Baratheon,
    Tyrell,
    Tully,
}

impl House {
    /// 全部家族，按裁决优先级排列
    pub const ALL: [House; HOUSE_COUNT] = [
        House::Stark,
        House::Greyjoy,
        House::Lannister,
        House::Targaryen,
        House::Baratheon,
        House::Tyrell,
        House::Tully,
    ];

    /// 家族名
    pub fn name(&self) -> &'static str {
        match self {
            House::Stark => "Stark",
            House::Greyjoy => "Greyjoy",
            House::Lannister => "Lannister",
            House::Targaryen => "Targaryen",
            House::Baratheon => "Baratheon",
            House::Tyrell => "Tyrell",
            House::Tully => "Tully",
        }
    }

    /// 从家族名解析
    pub fn from_name(name: &str) -> Option<House> {
        House::ALL.into_iter().find(|h| h.name() == name)
    }

    /// 在 `ALL` 中的下标，用作账本数组索引
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 棋盘位置（0..36，行优先）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location(u8);

impl Location {
    /// 创建位置（带边界检查）
    pub fn new(index: u8) -> Option<Self> {
        if (index as usize) < CELL_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// 创建位置（不检查边界，调用方保证 index < 36）
    pub const fn new_unchecked(index: u8) -> Self {
        Self(index)
    }

    /// 从行列坐标创建
    pub fn from_coords(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self(row * BOARD_SIZE as u8 + col))
        } else {
            None
        }
    }

    /// 行号
    pub fn row(&self) -> u8 {
        self.0 / BOARD_SIZE as u8
    }

    /// 列号
    pub fn col(&self) -> u8 {
        self.0 % BOARD_SIZE as u8
    }

    /// 数组索引
    pub fn to_index(&self) -> usize {
        self.0 as usize
    }

    /// 是否与另一位置同行或同列（不含自身）
    pub fn is_aligned_with(&self, other: Location) -> bool {
        *self != other && (self.row() == other.row() || self.col() == other.col())
    }

    /// 所有位置，升序
    pub fn all() -> impl Iterator<Item = Location> {
        (0..CELL_COUNT as u8).map(Location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.0, self.row(), self.col())
    }
}

/// 家族牌
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub house: House,
    pub name: String,
}

impl Card {
    pub fn new(house: House, name: impl Into<String>) -> Self {
        Self {
            house,
            name: name.into(),
        }
    }
}

/// 棋盘上的棋子：密使或家族牌
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Envoy,
    Card(Card),
}

impl Piece {
    pub fn is_envoy(&self) -> bool {
        matches!(self, Piece::Envoy)
    }

    /// 若为家族牌则返回牌
    pub fn as_card(&self) -> Option<&Card> {
        match self {
            Piece::Card(card) => Some(card),
            Piece::Envoy => None,
        }
    }
}
