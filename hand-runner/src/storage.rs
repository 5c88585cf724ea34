//! 棋盘布局存储
//!
//! 布局以 `<目录>/<名字>.json` 保存，便于复现同一开局。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use rules::{Board, Layout};

use crate::setup::random_board;

/// 布局存储管理器
pub struct BoardStore {
    dir: PathBuf,
}

impl BoardStore {
    /// 使用指定目录
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 保存布局
    pub fn save_board(&self, name: &str, board: &Board) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("无法创建布局目录: {:?}", self.dir))?;
        }

        let path = self.path_for(name);
        let json = Layout::from_board(board)
            .to_json()
            .context("序列化布局失败")?;
        fs::write(&path, json).with_context(|| format!("写入文件失败: {:?}", path))?;

        Ok(path)
    }

    /// 加载布局
    pub fn load_board(&self, name: &str) -> Result<Board> {
        let path = self.path_for(name);
        if !path.exists() {
            anyhow::bail!("布局文件不存在: {}", name);
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("读取文件失败: {:?}", path))?;
        let layout = Layout::from_json(&content).context("解析布局文件失败")?;
        layout.to_board().context("布局违反规则")
    }

    /// 加载布局，失败时生成新棋盘
    pub fn load_or_generate<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<Board> {
        match self.load_board(name) {
            Ok(board) => Ok(board),
            Err(e) => {
                tracing::warn!("无法加载布局 {}: {:#}，改用随机棋盘", name, e);
                Ok(random_board(rng)?)
            }
        }
    }

    /// 获取存储目录路径
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_name(name)))
    }
}

/// 清理文件名中的特殊字符
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
