//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝。时间预算只在根节点检查：
//! 超时后跳过剩余的根走法，返回已评估部分中的最佳走法。

use std::time::{Duration, Instant};

use rules::{
    apply_move, assign_banners, Board, Ledger, Location, MoveGenerator, PlayerId,
    DEFAULT_SEARCH_DEPTH,
};
use serde::{Deserialize, Serialize};

use crate::evaluate::{EvalWeights, Evaluator};

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=2
    Easy,
    /// 中等：depth=4
    #[default]
    Medium,
    /// 困难：depth=6
    Hard,
}

/// AI 配置
///
/// 反序列化时先取 `difficulty` 对应的预设，再用出现的字段覆盖。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAiConfig")]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 搜索深度，至少为 1
    pub max_depth: u8,
    /// 根节点时间预算（毫秒），`None` 表示不限时
    pub time_limit_ms: Option<u64>,
    pub weights: EvalWeights,
    /// 关闭后按朴素 Minimax 完整遍历
    pub alpha_beta: bool,
}

/// 配置文件中的形式，缺省字段取难度预设
#[derive(Deserialize)]
struct RawAiConfig {
    #[serde(default)]
    difficulty: Difficulty,
    max_depth: Option<u8>,
    /// 缺省取预设，`null` 表示不限时
    #[serde(default, deserialize_with = "present")]
    time_limit_ms: Option<Option<u64>>,
    weights: Option<EvalWeights>,
    alpha_beta: Option<bool>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<u64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Some)
}

impl TryFrom<RawAiConfig> for AiConfig {
    type Error = String;

    fn try_from(raw: RawAiConfig) -> Result<Self, Self::Error> {
        let preset = AiConfig::from_difficulty(raw.difficulty);
        let max_depth = raw.max_depth.unwrap_or(preset.max_depth);
        if max_depth == 0 {
            return Err("max_depth must be at least 1".to_string());
        }
        Ok(Self {
            difficulty: raw.difficulty,
            max_depth,
            time_limit_ms: raw.time_limit_ms.unwrap_or(preset.time_limit_ms),
            weights: raw.weights.unwrap_or(preset.weights),
            alpha_beta: raw.alpha_beta.unwrap_or(preset.alpha_beta),
        })
    }
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let (max_depth, time_limit_ms) = match difficulty {
            Difficulty::Easy => (2, 1000),
            Difficulty::Medium => (DEFAULT_SEARCH_DEPTH, 8000),
            Difficulty::Hard => (6, 9000),
        };
        Self {
            difficulty,
            max_depth,
            time_limit_ms: Some(time_limit_ms),
            weights: EvalWeights::default(),
            alpha_beta: true,
        }
    }

    /// 不限时的配置，搜索结果完全确定
    pub fn unlimited(max_depth: u8) -> Self {
        Self {
            max_depth,
            time_limit_ms: None,
            ..Self::default()
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 一次搜索的统计结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Option<Location>,
    /// 最佳走法的分值（己方视角）
    pub score: Option<i32>,
    /// 访问的节点数
    pub nodes: u64,
    /// 完成评估的根走法数
    pub evaluated_roots: usize,
    /// 根走法总数
    pub total_roots: usize,
    /// 是否因时间预算跳过了根走法
    pub timed_out: bool,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    evaluator: Evaluator,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            evaluator: Evaluator::new(config.weights),
            config,
            nodes_searched: 0,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳走法，无合法走法时返回 `None`
    pub fn select_move(
        &mut self,
        board: &Board,
        me: &Ledger,
        opponent: &Ledger,
    ) -> rules::Result<Option<Location>> {
        Ok(self.search(board, me, opponent)?.best_move)
    }

    /// 搜索并返回统计
    ///
    /// 搜索框架内己方占玩家 1 的位置，评估值为正表示对己方有利。
    pub fn search(
        &mut self,
        board: &Board,
        me: &Ledger,
        opponent: &Ledger,
    ) -> rules::Result<SearchReport> {
        self.nodes_searched = 0;
        let started = Instant::now();
        let budget = self.config.time_limit_ms.map(Duration::from_millis);

        let moves = MoveGenerator::legal_moves(board)?;
        let mut report = SearchReport {
            best_move: None,
            score: None,
            nodes: 0,
            evaluated_roots: 0,
            total_roots: moves.len(),
            timed_out: false,
        };

        // 深度 0 按 1 处理：根走法之后直接静态评估
        let child_depth = self.config.max_depth.max(1) - 1;
        for (i, &mv) in moves.iter().enumerate() {
            // 至少评估一个根走法，保证有棋可走时总能给出走法
            if i > 0 {
                if let Some(budget) = budget {
                    if started.elapsed() > budget {
                        report.timed_out = true;
                        break;
                    }
                }
            }

            let (next, me_next, opp_next) = simulate(board, me, opponent, mv, PlayerId::One)?;
            let score = self.minimax(
                &next,
                &me_next,
                &opp_next,
                child_depth,
                false,
                i32::MIN,
                i32::MAX,
            )?;
            report.evaluated_roots += 1;

            if report.score.map_or(true, |best| score > best) {
                report.score = Some(score);
                report.best_move = Some(mv);
            }
        }

        report.nodes = self.nodes_searched;
        tracing::debug!(
            "搜索完成: 最佳 {:?}, 分数 {:?}, 节点 {}, 根走法 {}/{}, 耗时 {:?}",
            report.best_move,
            report.score,
            report.nodes,
            report.evaluated_roots,
            report.total_roots,
            started.elapsed()
        );
        Ok(report)
    }

    /// Minimax 搜索（可选 Alpha-Beta 剪枝）
    ///
    /// 深度耗尽或无棋可走时返回静态评估值。
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        board: &Board,
        ledger1: &Ledger,
        ledger2: &Ledger,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> rules::Result<i32> {
        self.nodes_searched += 1;

        if depth == 0 {
            return Ok(self.evaluator.evaluate(board, ledger1, ledger2));
        }

        let moves = MoveGenerator::legal_moves(board)?;
        if moves.is_empty() {
            return Ok(self.evaluator.evaluate(board, ledger1, ledger2));
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                let (next, l1, l2) = simulate(board, ledger1, ledger2, mv, PlayerId::One)?;
                let score = self.minimax(&next, &l1, &l2, depth - 1, false, alpha, beta)?;
                best = best.max(score);
                if self.config.alpha_beta {
                    alpha = alpha.max(score);
                    if beta <= alpha {
                        break; // Beta 剪枝
                    }
                }
            }
            Ok(best)
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                let (next, l1, l2) = simulate(board, ledger1, ledger2, mv, PlayerId::Two)?;
                let score = self.minimax(&next, &l1, &l2, depth - 1, true, alpha, beta)?;
                best = best.min(score);
                if self.config.alpha_beta {
                    beta = beta.min(score);
                    if beta <= alpha {
                        break; // Alpha 剪枝
                    }
                }
            }
            Ok(best)
        }
    }

    /// 获取搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

/// 在局面副本上模拟一步走法：吃牌并更新旗帜
fn simulate(
    board: &Board,
    ledger1: &Ledger,
    ledger2: &Ledger,
    mv: Location,
    mover: PlayerId,
) -> rules::Result<(Board, Ledger, Ledger)> {
    let mut board = board.clone();
    let mut ledger1 = ledger1.clone();
    let mut ledger2 = ledger2.clone();

    let house = match mover {
        PlayerId::One => apply_move(&mut board, mv, &mut ledger1)?,
        PlayerId::Two => apply_move(&mut board, mv, &mut ledger2)?,
    };
    assign_banners(&mut ledger1, &mut ledger2, house, mover);

    Ok((board, ledger1, ledger2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::{Card, House, Piece};

    fn loc(index: u8) -> Location {
        Location::new_unchecked(index)
    }

    /// 36 格满棋盘：家族按位置轮转，密使在 (2, 3)
    fn full_board() -> Board {
        let mut board = Board::empty();
        for index in 0..36u8 {
            let piece = if index == 15 {
                Piece::Envoy
            } else {
                let house = House::ALL[(index as usize * 5 + index as usize / 6) % 7];
                Piece::Card(Card::new(house, format!("{} {}", house, index)))
            };
            board.set(loc(index), Some(piece));
        }
        board
    }

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.max_depth, 2);
        assert_eq!(easy.time_limit_ms, Some(1000));

        let medium = AiConfig::default();
        assert_eq!(medium.max_depth, 4);
        assert!(medium.alpha_beta);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.max_depth, 6);
    }

    #[test]
    fn test_config_serde_defaults() {
        let json = r#"{"difficulty":"Easy","max_depth":3,"time_limit_ms":null}"#;
        let config: AiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.time_limit_ms, None);
        assert!(config.alpha_beta);
        assert_eq!(config.weights, EvalWeights::default());
    }

    #[test]
    fn test_config_starts_from_difficulty_preset() {
        let config: AiConfig = serde_json::from_str(r#"{"difficulty":"Hard"}"#).unwrap();
        assert_eq!(config, AiConfig::from_difficulty(Difficulty::Hard));

        let config: AiConfig =
            serde_json::from_str(r#"{"difficulty":"Easy","max_depth":5}"#).unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.time_limit_ms, Some(1000));

        let config: AiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AiConfig::default());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = AiConfig {
            alpha_beta: false,
            ..AiConfig::unlimited(3)
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<AiConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_config_rejects_zero_depth() {
        assert!(serde_json::from_str::<AiConfig>(r#"{"max_depth":0}"#).is_err());
    }

    #[test]
    fn test_zero_depth_searches_like_depth_one() {
        let board = full_board();
        let zero = AiEngine::new(AiConfig {
            max_depth: 0,
            ..AiConfig::unlimited(1)
        })
        .search(&board, &Ledger::new(), &Ledger::new())
        .unwrap();
        let one = AiEngine::new(AiConfig::unlimited(1))
            .search(&board, &Ledger::new(), &Ledger::new())
            .unwrap();
        assert_eq!(zero, one);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let mut board = Board::empty();
        board.set(loc(0), Some(Piece::Envoy));
        board.set(loc(7), Some(Piece::Card(Card::new(House::Stark, "Arya Stark"))));

        let mut engine = AiEngine::new(AiConfig::unlimited(4));
        let mv = engine
            .select_move(&board, &Ledger::new(), &Ledger::new())
            .unwrap();
        assert_eq!(mv, None);
    }

    #[test]
    fn test_picks_biggest_capture_at_depth_one() {
        let mut board = Board::empty();
        board.set(loc(0), Some(Piece::Envoy));
        board.set(loc(1), Some(Piece::Card(Card::new(House::Stark, "Arya Stark"))));
        board.set(loc(2), Some(Piece::Card(Card::new(House::Stark, "Sansa Stark"))));
        board.set(loc(3), Some(Piece::Card(Card::new(House::Stark, "Bran Stark"))));
        board.set(loc(6), Some(Piece::Card(Card::new(House::Tully, "Edmure Tully"))));

        let mut engine = AiEngine::new(AiConfig::unlimited(1));
        let report = engine.search(&board, &Ledger::new(), &Ledger::new()).unwrap();

        assert_eq!(report.best_move, Some(loc(3)));
        // 一面旗帜 + 三张牌
        assert_eq!(report.score, Some(13));
        assert_eq!(report.evaluated_roots, 4);
        assert!(!report.timed_out);
    }

    #[test]
    fn test_search_does_not_touch_inputs() {
        let board = full_board();
        let me = Ledger::new();
        let opponent = Ledger::new();

        let mut engine = AiEngine::new(AiConfig::unlimited(3));
        engine.select_move(&board, &me, &opponent).unwrap();

        assert_eq!(board, full_board());
        assert_eq!(me, Ledger::new());
        assert_eq!(opponent, Ledger::new());
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = full_board();
        let mut engine = AiEngine::new(AiConfig::unlimited(4));

        let first = engine.search(&board, &Ledger::new(), &Ledger::new()).unwrap();
        let second = engine.search(&board, &Ledger::new(), &Ledger::new()).unwrap();

        assert!(first.best_move.is_some());
        assert_eq!(first, second);
        assert_eq!(engine.nodes_searched(), second.nodes);
        assert!(second.nodes > first.total_roots as u64);
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        let mut board = full_board();
        let mut me = Ledger::new();
        let mut opponent = Ledger::new();

        // 沿一局对弈的若干局面逐一比较
        for ply in 0..6 {
            let mut pruned = AiEngine::new(AiConfig::unlimited(3));
            let mut plain = AiEngine::new(AiConfig {
                alpha_beta: false,
                ..AiConfig::unlimited(3)
            });

            let a = pruned.search(&board, &me, &opponent).unwrap();
            let b = plain.search(&board, &me, &opponent).unwrap();
            assert_eq!(a.best_move, b.best_move, "ply {}", ply);
            assert_eq!(a.score, b.score, "ply {}", ply);
            assert!(a.nodes <= b.nodes);

            let Some(mv) = a.best_move else { break };
            let house = apply_move(&mut board, mv, &mut me).unwrap();
            settle_banners(&mut me, &mut opponent, house);
            std::mem::swap(&mut me, &mut opponent);
        }
    }

    fn settle_banners(mover: &mut Ledger, other: &mut Ledger, house: House) {
        assign_banners(mover, other, house, PlayerId::One);
        assert!(!(mover.has_banner(house) && other.has_banner(house)));
    }

    #[test]
    fn test_zero_budget_evaluates_first_root_only() {
        let board = full_board();
        let moves = MoveGenerator::legal_moves(&board).unwrap();
        assert!(moves.len() > 1);

        let mut engine = AiEngine::new(AiConfig {
            time_limit_ms: Some(0),
            ..AiConfig::unlimited(3)
        });
        let report = engine.search(&board, &Ledger::new(), &Ledger::new()).unwrap();

        assert_eq!(report.evaluated_roots, 1);
        assert!(report.timed_out);
        assert_eq!(report.best_move, Some(moves[0]));
    }

    #[test]
    fn test_missing_envoy_propagates() {
        let mut board = full_board();
        board.take(loc(15));
        let mut engine = AiEngine::new(AiConfig::unlimited(2));
        assert!(engine
            .select_move(&board, &Ledger::new(), &Ledger::new())
            .is_err());
    }
}
