//! 随机开局
//!
//! 35 张家族牌加密使，随机打乱后铺满 6x6 棋盘。

use rand::seq::SliceRandom;
use rand::Rng;
use rules::{Board, CardRecord, House, RulesError, ENVOY_HOUSE, ENVOY_NAME};

/// 各家族的角色，家族牌数依次为 8/7/6/5/4/3/2
const ROSTER: [(House, &[&str]); 7] = [
    (
        House::Stark,
        &[
            "Eddard Stark",
            "Catelyn Stark",
            "Robb Stark",
            "Sansa Stark",
            "Arya Stark",
            "Bran Stark",
            "Rickon Stark",
            "Jon Snow",
        ],
    ),
    (
        House::Greyjoy,
        &[
            "Balon Greyjoy",
            "Euron Greyjoy",
            "Victarion Greyjoy",
            "Aeron Greyjoy",
            "Theon Greyjoy",
            "Asha Greyjoy",
            "Dagmer Cleftjaw",
        ],
    ),
    (
        House::Lannister,
        &[
            "Tywin Lannister",
            "Cersei Lannister",
            "Jaime Lannister",
            "Tyrion Lannister",
            "Kevan Lannister",
            "Lancel Lannister",
        ],
    ),
    (
        House::Targaryen,
        &[
            "Daenerys Targaryen",
            "Viserys Targaryen",
            "Rhaegar Targaryen",
            "Aerys Targaryen",
            "Aegon Targaryen",
        ],
    ),
    (
        House::Baratheon,
        &[
            "Robert Baratheon",
            "Stannis Baratheon",
            "Renly Baratheon",
            "Joffrey Baratheon",
        ],
    ),
    (
        House::Tyrell,
        &["Margaery Tyrell", "Loras Tyrell", "Olenna Tyrell"],
    ),
    (House::Tully, &["Hoster Tully", "Edmure Tully"]),
];

/// 生成随机棋盘
pub fn random_board<R: Rng + ?Sized>(rng: &mut R) -> Result<Board, RulesError> {
    let mut pieces: Vec<(&str, &str)> = ROSTER
        .iter()
        .flat_map(|(house, names)| names.iter().map(move |name| (house.name(), *name)))
        .collect();
    pieces.push((ENVOY_HOUSE, ENVOY_NAME));
    pieces.shuffle(rng);

    Board::from_records(
        pieces
            .into_iter()
            .enumerate()
            .map(|(i, (house, name))| CardRecord::new(house, name, i as u32)),
    )
}
