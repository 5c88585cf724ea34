//! 运行配置
//!
//! JSON 配置文件，命令行参数可覆盖其中的字段。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use hand_ai::{Agent, AiConfig, MinimaxAgent, RandomAgent};
use rules::DEFAULT_AGENT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};

/// 单个玩家的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayerConfig {
    /// 搜索玩家
    Minimax {
        #[serde(default)]
        ai: AiConfig,
    },
    /// 随机玩家，`seed` 为空时使用系统熵
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl PlayerConfig {
    /// 创建玩家；随机玩家未指定种子时使用 `fallback_seed`
    pub fn build_agent(&self, fallback_seed: Option<u64>) -> Arc<dyn Agent> {
        match self {
            PlayerConfig::Minimax { ai } => Arc::new(MinimaxAgent::new(ai.clone())),
            PlayerConfig::Random { seed } => match seed.or(fallback_seed) {
                Some(seed) => Arc::new(RandomAgent::with_seed(seed)),
                None => Arc::new(RandomAgent::from_entropy()),
            },
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig::Minimax {
            ai: AiConfig::default(),
        }
    }
}

/// 运行配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// 对局数
    pub games: u32,
    /// 单步超时（秒）
    pub agent_timeout_secs: u64,
    /// 布局文件目录
    pub boards_dir: PathBuf,
    /// 连续弃权达到该次数时结束对局
    pub max_consecutive_forfeits: u32,
    /// 玩家 1、玩家 2
    pub players: [PlayerConfig; 2],
    /// 从布局目录加载的开局名
    pub load_board: Option<String>,
    /// 第一局开局保存名
    pub save_board: Option<String>,
    /// 随机种子
    pub seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            games: 1,
            agent_timeout_secs: DEFAULT_AGENT_TIMEOUT_SECS,
            boards_dir: default_boards_dir(),
            max_consecutive_forfeits: 8,
            players: [
                PlayerConfig::default(),
                PlayerConfig::Random { seed: None },
            ],
            load_board: None,
            save_board: None,
            seed: None,
        }
    }
}

/// 默认布局目录：`<数据目录>/hand-of-the-king/boards`
pub fn default_boards_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hand-of-the-king")
        .join("boards")
}

impl RunnerConfig {
    /// 加载配置，文件缺失或无效时使用默认配置
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!("配置文件不存在: {:?}，使用默认配置", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<RunnerConfig>(&content) {
                Ok(config) => {
                    tracing::info!("已加载配置: {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("配置文件格式无效: {}，使用默认配置", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("无法读取配置文件: {}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 保存配置
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
            }
        }

        let content = serde_json::to_string_pretty(self).context("序列化配置失败")?;
        std::fs::write(path, content).with_context(|| format!("写入配置文件失败: {:?}", path))?;

        tracing::info!("配置已保存: {:?}", path);
        Ok(())
    }
}
