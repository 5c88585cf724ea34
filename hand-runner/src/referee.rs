//! 自动玩家调用
//!
//! 玩家在阻塞线程中运行，拿到的是局面副本。超时后不再等待结果，
//! 工作线程自行结束，其结果被丢弃。

use std::sync::Arc;
use std::time::Duration;

use hand_ai::Agent;
use rules::{GameState, Location};
use thiserror::Error;

/// 玩家未能给出有效走法的原因，均按弃权处理
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentFault {
    #[error("agent did not answer within {limit:?}")]
    Timeout { limit: Duration },

    #[error("agent panicked")]
    Panicked,

    #[error("agent failed: {0}")]
    Failed(String),

    #[error("agent produced no move")]
    NoMove,

    #[error("agent proposed illegal location {location}")]
    IllegalMove { location: Location },
}

/// 向当前走子方请求一步走法，并校验其合法性
pub async fn request_move(
    agent: Arc<dyn Agent>,
    state: &GameState,
    limit: Duration,
) -> Result<Location, AgentFault> {
    let me = state.current_turn;
    let board = state.board.clone();
    let mine = state.ledger(me).clone();
    let theirs = state.ledger(me.opponent()).clone();

    let worker = tokio::task::spawn_blocking(move || agent.propose_move(&board, &mine, &theirs));

    let location = match tokio::time::timeout(limit, worker).await {
        Err(_) => return Err(AgentFault::Timeout { limit }),
        Ok(Err(join)) if join.is_panic() => return Err(AgentFault::Panicked),
        Ok(Err(join)) => return Err(AgentFault::Failed(join.to_string())),
        Ok(Ok(Err(e))) => return Err(AgentFault::Failed(format!("{:#}", e))),
        Ok(Ok(Ok(None))) => return Err(AgentFault::NoMove),
        Ok(Ok(Ok(Some(location)))) => location,
    };

    let legal = state
        .legal_moves()
        .map_err(|e| AgentFault::Failed(e.to_string()))?;
    if legal.contains(&location) {
        Ok(location)
    } else {
        Err(AgentFault::IllegalMove { location })
    }
}
