//! 《国王之手》AI 引擎
//!
//! 包含:
//! - 局面评估函数
//! - Minimax + Alpha-Beta 搜索（根节点时间预算）
//! - 自动玩家接口与内置玩家（搜索、随机）

mod agent;
mod evaluate;
mod search;

pub use agent::{Agent, MinimaxAgent, RandomAgent};
pub use evaluate::{EvalWeights, Evaluator};
pub use search::{AiConfig, AiEngine, Difficulty, SearchReport};
