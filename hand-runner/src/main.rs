use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use hand_ai::{AiConfig, Difficulty};
use hand_runner::{run_series, PlayerConfig, RunnerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Minimax,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// 两个自动玩家对弈
#[derive(Debug, Parser)]
#[command(name = "hand-runner", version)]
struct Cli {
    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    player1: Option<PlayerKind>,

    #[arg(long, value_enum)]
    player2: Option<PlayerKind>,

    /// 对局数
    #[arg(long)]
    games: Option<u32>,

    /// 从布局目录加载开局
    #[arg(long, value_name = "NAME")]
    load: Option<String>,

    /// 保存第一局开局
    #[arg(long, value_name = "NAME")]
    save: Option<String>,

    /// 搜索玩家的难度预设
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// 搜索玩家的深度，覆盖难度预设
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    depth: Option<u8>,

    /// 单步超时（秒）
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    fn apply(&self, config: &mut RunnerConfig) {
        for (slot, kind) in [self.player1, self.player2].into_iter().enumerate() {
            match kind {
                Some(PlayerKind::Minimax) => {
                    if !matches!(config.players[slot], PlayerConfig::Minimax { .. }) {
                        config.players[slot] = PlayerConfig::Minimax {
                            ai: AiConfig::default(),
                        };
                    }
                }
                Some(PlayerKind::Random) => {
                    if !matches!(config.players[slot], PlayerConfig::Random { .. }) {
                        config.players[slot] = PlayerConfig::Random { seed: None };
                    }
                }
                None => {}
            }
        }

        for player in config.players.iter_mut() {
            if let PlayerConfig::Minimax { ai } = player {
                if let Some(difficulty) = self.difficulty {
                    *ai = AiConfig::from_difficulty(difficulty.into());
                }
                if let Some(depth) = self.depth {
                    ai.max_depth = depth;
                }
            }
        }
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(secs) = self.timeout_secs {
            config.agent_timeout_secs = secs;
        }
        if self.load.is_some() {
            config.load_board = self.load.clone();
        }
        if self.save.is_some() {
            config.save_board = self.save.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hand_runner=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => RunnerConfig::load(path),
        None => RunnerConfig::default(),
    };
    cli.apply(&mut config);

    info!("布局目录: {:?}", config.boards_dir);
    let tally = run_series(&config).await?;

    println!(
        "Player 1: {}  Player 2: {}  Draws: {}",
        tally.wins[0], tally.wins[1], tally.draws
    );
    Ok(())
}
