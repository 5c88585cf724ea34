//! 错误类型定义

use thiserror::Error;

use crate::card::Location;

/// 规则不变量被破坏
///
/// 这类错误意味着引擎或外部加载器存在缺陷，不属于正常的对局结果，
/// 应当直接向调用方传播。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// 棋盘上找不到密使
    #[error("Envoy is missing from the board")]
    EnvoyMissing,

    /// 棋盘上出现多个密使
    #[error("Envoy appears {count} times on the board")]
    EnvoyDuplicated { count: usize },

    /// 期望有牌的位置是空的
    #[error("No card at location {location}")]
    EmptySquare { location: Location },

    /// 目标位置不是合法走法
    #[error("Illegal destination: {location}")]
    IllegalDestination { location: Location },

    /// 位置索引越界
    #[error("Invalid location index: {index}")]
    InvalidLocation { index: u32 },

    /// 两张牌占据同一位置
    #[error("Location {location} is occupied twice")]
    DuplicateLocation { location: Location },

    /// 卡牌名字重复
    #[error("Card name '{name}' is used twice")]
    DuplicateName { name: String },

    /// 未知家族
    #[error("Unknown house: '{name}'")]
    UnknownHouse { name: String },

    /// 棋子数量超过棋盘容量
    #[error("Too many pieces: {count} (max: 36)")]
    TooManyPieces { count: usize },
}

/// 布局加载错误
#[derive(Error, Debug)]
pub enum LayoutError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 布局违反规则不变量
    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, RulesError>;
