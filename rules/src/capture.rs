//! 吃牌结算
//!
//! 密使沿行或列移动到所选的牌上，途中夹在两者之间、与所选牌同家族的牌
//! 一并被吃掉，记入走子方的账本。

use crate::board::Board;
use crate::card::{House, Location, Piece};
use crate::error::{Result, RulesError};
use crate::ledger::Ledger;

/// 执行一步走法，返回所选牌的家族
///
/// 调用方应只传入 `MoveGenerator::legal_moves` 给出的目标；
/// 目标为空格、为密使自身或不与密使同行同列时直接报错，棋盘和账本均不修改。
pub fn apply_move(board: &mut Board, destination: Location, mover: &mut Ledger) -> Result<House> {
    let envoy = board.find_envoy()?;
    if !envoy.is_aligned_with(destination) {
        return Err(RulesError::IllegalDestination {
            location: destination,
        });
    }
    let house = board.card_at(destination)?.house;

    // 同行则按列区间扫描，同列则按行区间扫描
    let same_row = envoy.row() == destination.row();
    let (lo, hi) = if same_row {
        ordered(envoy.col(), destination.col())
    } else {
        ordered(envoy.row(), destination.row())
    };

    // 夹在中间的同家族牌 + 所选牌，按位置升序
    let mut taken: Vec<Location> = board
        .cards()
        .filter(|(loc, card)| {
            if card.house != house || *loc == destination {
                return false;
            }
            if same_row {
                loc.row() == envoy.row() && lo < loc.col() && loc.col() < hi
            } else {
                loc.col() == envoy.col() && lo < loc.row() && loc.row() < hi
            }
        })
        .map(|(loc, _)| loc)
        .collect();
    taken.push(destination);
    taken.sort();

    for loc in &taken {
        let card = match board.take(*loc) {
            Some(Piece::Card(card)) => card,
            _ => return Err(RulesError::EmptySquare { location: *loc }),
        };
        mover.add_card(card);
    }

    let moved = board.take(envoy);
    board.set(destination, moved);

    tracing::trace!(
        "密使 {} -> {}，吃掉 {} 张 {} 牌",
        envoy,
        destination,
        taken.len(),
        house
    );

    Ok(house)
}

fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
