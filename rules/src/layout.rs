//! 棋盘布局格式
//!
//! 布局是 `(家族, 名字, 位置)` 三元组的 JSON 数组，例如：
//! `[{"house": "Stark", "name": "Arya Stark", "location": 0}, ...]`
//! 密使记录的家族标签为 `Varys`。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::card::{Card, House, Location, Piece};
use crate::constants::{CELL_COUNT, ENVOY_HOUSE, ENVOY_NAME};
use crate::error::{LayoutError, Result, RulesError};

/// 单张牌的布局记录
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRecord {
    pub house: String,
    pub name: String,
    pub location: u32,
}

impl CardRecord {
    pub fn new(house: impl Into<String>, name: impl Into<String>, location: u32) -> Self {
        Self {
            house: house.into(),
            name: name.into(),
            location,
        }
    }
}

/// 完整布局
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    pub records: Vec<CardRecord>,
}

impl Layout {
    /// 从棋盘导出布局，按位置升序
    pub fn from_board(board: &Board) -> Self {
        Self {
            records: board.to_records(),
        }
    }

    /// 校验并构建棋盘
    pub fn to_board(&self) -> Result<Board> {
        Board::from_records(self.records.iter().cloned())
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> std::result::Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 解析
    pub fn from_json(json: &str) -> std::result::Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Board {
    /// 由布局记录构建棋盘
    ///
    /// 校验：位置在范围内且互不相同、名字唯一、恰好一个密使、其余均属七大家族。
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Result<Board> {
        let mut board = Board::empty();
        let mut names = HashSet::new();
        let mut count = 0;

        for record in records {
            count += 1;
            if count > CELL_COUNT {
                return Err(RulesError::TooManyPieces { count });
            }

            let location = u8::try_from(record.location)
                .ok()
                .and_then(Location::new)
                .ok_or(RulesError::InvalidLocation {
                    index: record.location,
                })?;
            if board.get(location).is_some() {
                return Err(RulesError::DuplicateLocation { location });
            }
            if !names.insert(record.name.clone()) {
                return Err(RulesError::DuplicateName { name: record.name });
            }

            let piece = if record.name == ENVOY_NAME {
                Piece::Envoy
            } else {
                let house = House::from_name(&record.house).ok_or_else(|| {
                    RulesError::UnknownHouse {
                        name: record.house.clone(),
                    }
                })?;
                Piece::Card(Card::new(house, record.name))
            };
            board.set(location, Some(piece));
        }

        board.find_envoy()?;
        Ok(board)
    }

    /// 导出布局记录，按位置升序
    pub fn to_records(&self) -> Vec<CardRecord> {
        self.pieces()
            .map(|(loc, piece)| match piece {
                Piece::Envoy => CardRecord::new(ENVOY_HOUSE, ENVOY_NAME, loc.to_index() as u32),
                Piece::Card(card) => {
                    CardRecord::new(card.house.name(), card.name.clone(), loc.to_index() as u32)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> Layout {
        Layout {
            records: vec![
                CardRecord::new("Stark", "Arya Stark", 3),
                CardRecord::new("Varys", "Varys", 0),
                CardRecord::new("Tully", "Edmure Tully", 6),
            ],
        }
    }

    #[test]
    fn test_to_board() {
        let board = small_layout().to_board().unwrap();
        assert_eq!(board.find_envoy(), Ok(Location::new_unchecked(0)));
        assert_eq!(board.card_at(Location::new_unchecked(3)).unwrap().house, House::Stark);
        assert_eq!(board.piece_count(), 3);
    }

    #[test]
    fn test_json_roundtrip_preserves_triples() {
        let layout = small_layout();
        let board = layout.to_board().unwrap();

        let json = Layout::from_board(&board).to_json().unwrap();
        let reloaded = Layout::from_json(&json).unwrap();

        let expected: HashSet<_> = layout.records.into_iter().collect();
        let restored: HashSet<_> = reloaded.records.iter().cloned().collect();
        assert_eq!(expected, restored);
        assert_eq!(reloaded.to_board().unwrap(), board);
    }

    #[test]
    fn test_json_is_plain_array() {
        let json = small_layout().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["house"], "Stark");
        assert_eq!(value[0]["location"], 3);
    }

    #[test]
    fn test_rejects_duplicate_location() {
        let mut layout = small_layout();
        layout.records.push(CardRecord::new("Tyrell", "Loras Tyrell", 3));
        assert!(matches!(
            layout.to_board(),
            Err(RulesError::DuplicateLocation { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let mut layout = small_layout();
        layout.records.push(CardRecord::new("Stark", "Arya Stark", 9));
        assert!(matches!(
            layout.to_board(),
            Err(RulesError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut layout = small_layout();
        layout.records.push(CardRecord::new("Tyrell", "Loras Tyrell", 36));
        assert_eq!(
            layout.to_board(),
            Err(RulesError::InvalidLocation { index: 36 })
        );
    }

    #[test]
    fn test_rejects_unknown_house() {
        let mut layout = small_layout();
        layout.records.push(CardRecord::new("Martell", "Oberyn Martell", 9));
        assert!(matches!(
            layout.to_board(),
            Err(RulesError::UnknownHouse { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_envoy() {
        let layout = Layout {
            records: vec![CardRecord::new("Stark", "Arya Stark", 3)],
        };
        assert_eq!(layout.to_board(), Err(RulesError::EnvoyMissing));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Layout::from_json("not json"),
            Err(LayoutError::Json(_))
        ));
    }
}
