//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 6;

/// 棋盘格子总数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 家族数量
pub const HOUSE_COUNT: usize = 7;

/// 密使的名字，棋盘上唯一一张带此名字的牌就是密使
pub const ENVOY_NAME: &str = "Varys";

/// 布局文件中密使记录使用的家族标签
pub const ENVOY_HOUSE: &str = "Varys";

/// AI 单步默认超时（秒）
pub const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 10;

/// 默认搜索深度
pub const DEFAULT_SEARCH_DEPTH: u8 = 4;

/// 评估函数中每面旗帜的默认权重
pub const DEFAULT_BANNER_WEIGHT: i32 = 10;

/// 评估函数中每张手牌的默认权重
pub const DEFAULT_CARD_WEIGHT: i32 = 1;
