//! 走法生成

use crate::board::Board;
use crate::card::Location;
use crate::error::Result;

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成密使的全部合法目标位置
    ///
    /// 与密使同行或同列的每张家族牌的位置都是合法目标，按位置升序返回。
    /// 结果为空表示对局结束。
    pub fn legal_moves(board: &Board) -> Result<Vec<Location>> {
        let envoy = board.find_envoy()?;
        Ok(board
            .cards()
            .map(|(loc, _)| loc)
            .filter(|loc| loc.is_aligned_with(envoy))
            .collect())
    }

    /// 目标位置是否合法
    pub fn is_legal(board: &Board, destination: Location) -> Result<bool> {
        Ok(Self::legal_moves(board)?.contains(&destination))
    }

    /// 对局是否结束（密使无牌可取）
    pub fn is_game_over(board: &Board) -> Result<bool> {
        Ok(Self::legal_moves(board)?.is_empty())
    }
}
