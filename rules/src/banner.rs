//! 旗帜归属与终局判定

use serde::{Deserialize, Serialize};

use crate::card::House;
use crate::ledger::{Ledger, Standing};
use crate::player::PlayerId;

/// 按裁决链判定某家族旗帜应归属的玩家
///
/// 牌多者得旗；牌数相同时，若该家族正是刚被吃的家族，则刚走子的玩家得旗，
/// 否则由当前持旗者保留。返回 `None` 表示旗帜归属不变（双方都未持有）。
pub fn resolve_banner(
    house: House,
    ledger1: &Ledger,
    ledger2: &Ledger,
    last_house: House,
    last_mover: PlayerId,
) -> Option<PlayerId> {
    let count1 = ledger1.card_count(house);
    let count2 = ledger2.card_count(house);

    if count1 > count2 {
        Some(PlayerId::One)
    } else if count2 > count1 {
        Some(PlayerId::Two)
    } else if house == last_house {
        Some(last_mover)
    } else if ledger1.has_banner(house) {
        Some(PlayerId::One)
    } else if ledger2.has_banner(house) {
        Some(PlayerId::Two)
    } else {
        None
    }
}

/// 走子后更新旗帜归属（只处理刚被吃的家族），返回双方的展示状态
pub fn assign_banners(
    ledger1: &mut Ledger,
    ledger2: &mut Ledger,
    last_house: House,
    last_mover: PlayerId,
) -> (Standing, Standing) {
    award(ledger1, ledger2, last_house, last_house, last_mover);
    (ledger1.standing(), ledger2.standing())
}

/// 对全部家族重新判定旗帜归属
///
/// 一步走法只改变一个家族的牌数，因此结果与 `assign_banners` 相同。
pub fn reassign_all_banners(
    ledger1: &mut Ledger,
    ledger2: &mut Ledger,
    last_house: House,
    last_mover: PlayerId,
) -> (Standing, Standing) {
    for house in House::ALL {
        award(ledger1, ledger2, house, last_house, last_mover);
    }
    (ledger1.standing(), ledger2.standing())
}

fn award(
    ledger1: &mut Ledger,
    ledger2: &mut Ledger,
    house: House,
    last_house: House,
    last_mover: PlayerId,
) {
    match resolve_banner(house, ledger1, ledger2, last_house, last_mover) {
        Some(PlayerId::One) => {
            ledger1.grant_banner(house);
            ledger2.revoke_banner(house);
        }
        Some(PlayerId::Two) => {
            ledger2.grant_banner(house);
            ledger1.revoke_banner(house);
        }
        None => {}
    }
}

/// 胜者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player(PlayerId),
    /// 旗帜完全相同，没有可比较的家族
    Draw,
}

/// 终局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Winner,
    /// 双方持有的旗帜数，按玩家下标
    pub banners: [usize; 2],
}

/// 终局判定
///
/// 旗帜多者胜；旗帜数相同则按家族优先级依次比较持旗情况，第一个有差别的家族决定胜负。
pub fn calculate_winner(ledger1: &Ledger, ledger2: &Ledger) -> GameOutcome {
    let banners = [ledger1.banner_count(), ledger2.banner_count()];

    let winner = if banners[0] > banners[1] {
        Winner::Player(PlayerId::One)
    } else if banners[1] > banners[0] {
        Winner::Player(PlayerId::Two)
    } else {
        House::ALL
            .iter()
            .find_map(|&house| {
                let held1 = ledger1.has_banner(house) as u8;
                let held2 = ledger2.has_banner(house) as u8;
                match held1.cmp(&held2) {
                    std::cmp::Ordering::Greater => Some(Winner::Player(PlayerId::One)),
                    std::cmp::Ordering::Less => Some(Winner::Player(PlayerId::Two)),
                    std::cmp::Ordering::Equal => None,
                }
            })
            .unwrap_or(Winner::Draw)
    };

    GameOutcome { winner, banners }
}
