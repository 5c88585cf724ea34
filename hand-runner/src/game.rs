//! 对局循环与多局统计

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use hand_ai::Agent;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rules::{Board, GameOutcome, GameState, PlayerId, Standing, TurnReport, Winner};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::RunnerConfig;
use crate::referee::request_move;
use crate::setup::random_board;
use crate::storage::BoardStore;

/// 单局结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub outcome: GameOutcome,
    /// 实际走子数
    pub turns: u32,
    /// 双方弃权次数，按玩家下标
    pub forfeits: [u32; 2],
    /// 终局状态
    pub final_state: GameState,
}

/// 一局对弈
pub struct Match {
    state: GameState,
    agents: [Arc<dyn Agent>; 2],
    agent_timeout: Duration,
    max_consecutive_forfeits: u32,
}

impl Match {
    pub fn new(board: Board, agents: [Arc<dyn Agent>; 2], agent_timeout: Duration) -> Self {
        Self {
            state: GameState::new(board),
            agents,
            agent_timeout,
            max_consecutive_forfeits: 8,
        }
    }

    /// 设置连续弃权上限
    pub fn with_forfeit_limit(mut self, limit: u32) -> Self {
        self.max_consecutive_forfeits = limit;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 下完整局
    ///
    /// 出错、超时、崩溃或走法非法都视为弃权，棋盘不变、换对方走。
    /// 没有合法走法或连续弃权达到上限时结束。
    pub async fn play(mut self) -> Result<GameReport> {
        let mut forfeits = [0u32; 2];
        let mut consecutive = 0u32;

        loop {
            if self.state.is_over().context("棋盘状态无效")? {
                break;
            }
            if consecutive >= self.max_consecutive_forfeits {
                warn!("连续弃权 {} 次，提前结束对局", consecutive);
                break;
            }

            let player = self.state.current_turn;
            let agent = Arc::clone(&self.agents[player.index()]);
            let name = agent.name().to_string();

            match request_move(agent, &self.state, self.agent_timeout).await {
                Ok(destination) => {
                    let report = self.state.apply_move(destination).map_err(|e| {
                        error!("{} ({}) 的走法无法执行: {}", player, name, e);
                        e
                    })?;
                    log_turn(&report);
                    consecutive = 0;
                }
                Err(fault) => {
                    warn!("{} ({}) 弃权: {}", player, name, fault);
                    forfeits[player.index()] += 1;
                    consecutive += 1;
                    self.state.pass_turn();
                }
            }
        }

        let outcome = self.state.outcome();
        info!(
            "对局结束: {}，旗帜 {} : {}，共 {} 步",
            describe_winner(outcome.winner),
            outcome.banners[0],
            outcome.banners[1],
            self.state.moves_played
        );

        Ok(GameReport {
            outcome,
            turns: self.state.moves_played,
            forfeits,
            final_state: self.state,
        })
    }
}

fn log_turn(report: &TurnReport) {
    info!(
        "{} 密使移至 {}，吃下 {} 张 {}",
        report.player, report.destination, report.captured, report.house
    );
    for player in [PlayerId::One, PlayerId::Two] {
        debug!("  {}: {}", player, format_standing(&report.standings[player.index()]));
    }
}

/// 形如 `Stark 3* Greyjoy 0 ...`，`*` 表示持有旗帜
fn format_standing(standing: &Standing) -> String {
    standing
        .iter()
        .map(|(house, status)| {
            format!("{} {}{}", house, status.cards, if status.held { "*" } else { "" })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_winner(winner: Winner) -> String {
    match winner {
        Winner::Player(player) => format!("{} 获胜", player),
        Winner::Draw => "平局".to_string(),
    }
}

/// 多局统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesTally {
    /// 双方胜局数，按玩家下标
    pub wins: [usize; 2],
    pub draws: usize,
}

impl SeriesTally {
    pub fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Player(player) => self.wins[player.index()] += 1,
            Winner::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.draws
    }
}

/// 按配置连续进行多局
pub async fn run_series(config: &RunnerConfig) -> Result<SeriesTally> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let store = BoardStore::new(&config.boards_dir);
    let agents: [Arc<dyn Agent>; 2] = [
        config.players[0].build_agent(config.seed.map(|s| s.wrapping_add(1))),
        config.players[1].build_agent(config.seed.map(|s| s.wrapping_add(2))),
    ];
    let agent_timeout = Duration::from_secs(config.agent_timeout_secs);

    info!(
        "开始 {} 局: {} 对 {}",
        config.games,
        agents[0].name(),
        agents[1].name()
    );

    let mut tally = SeriesTally::default();
    for game in 1..=config.games {
        let board = match &config.load_board {
            Some(name) => store.load_or_generate(name, &mut rng)?,
            None => random_board(&mut rng).context("生成棋盘失败")?,
        };

        if game == 1 {
            if let Some(name) = &config.save_board {
                let path = store.save_board(name, &board)?;
                info!("开局已保存: {:?}", path);
            }
        }

        let report = Match::new(board, agents.clone(), agent_timeout)
            .with_forfeit_limit(config.max_consecutive_forfeits)
            .play()
            .await
            .with_context(|| format!("第 {} 局异常终止", game))?;

        tally.record(report.outcome.winner);
        info!(
            "第 {} 局: {}，弃权 {} / {}",
            game,
            describe_winner(report.outcome.winner),
            report.forfeits[0],
            report.forfeits[1]
        );
    }

    info!(
        "总计 {} 局: 玩家 1 胜 {}，玩家 2 胜 {}，平 {}",
        tally.games(),
        tally.wins[0],
        tally.wins[1],
        tally.draws
    );
    Ok(tally)
}
