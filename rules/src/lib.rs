//! 《国王之手》规则库
//!
//! 包含:
//! - 卡牌、家族、位置等核心数据结构
//! - 棋盘状态与走法生成
//! - 吃牌结算
//! - 计分账本与旗帜归属（含平局裁决链）
//! - 终局胜负判定
//! - 棋盘布局的 JSON 格式

mod banner;
mod board;
mod capture;
mod card;
mod constants;
mod error;
mod game;
mod layout;
mod ledger;
mod moves;
mod player;

pub use banner::{assign_banners, calculate_winner, reassign_all_banners, resolve_banner, GameOutcome, Winner};
pub use board::Board;
pub use capture::apply_move;
pub use card::{Card, House, Location, Piece};
pub use constants::*;
pub use error::{LayoutError, Result, RulesError};
pub use game::{GameState, TurnReport};
pub use layout::{CardRecord, Layout};
pub use ledger::{HouseStatus, Ledger, Standing};
pub use moves::MoveGenerator;
pub use player::PlayerId;
