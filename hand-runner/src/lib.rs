//! 对局运行器
//!
//! 生成或加载开局，隔离调用双方自动玩家，执行回合循环并统计多局结果。

pub mod config;
pub mod game;
pub mod referee;
pub mod setup;
pub mod storage;

pub use config::{default_boards_dir, PlayerConfig, RunnerConfig};
pub use game::{run_series, GameReport, Match, SeriesTally};
pub use referee::{request_move, AgentFault};
pub use setup::random_board;
pub use storage::BoardStore;
