//! Score/health display snapshot
//!
//! What the DOM widgets (or any other HUD) need, taken after a step.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Health bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthTier {
    /// Above 50%
    Healthy,
    /// 26-50%
    Warning,
    /// 25% and below
    Critical,
}

impl HealthTier {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            0..=25 => HealthTier::Critical,
            26..=50 => HealthTier::Warning,
            _ => HealthTier::Healthy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTier::Healthy => "healthy",
            HealthTier::Warning => "warning",
            HealthTier::Critical => "critical",
        }
    }
}

/// Read-only HUD view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    /// Rounded and clamped to 0-100
    pub health_percent: u32,
    pub health_tier: HealthTier,
    /// Set once the run has ended
    pub final_score: Option<u64>,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let health_percent = state.health_percent();
        Self {
            phase: state.phase,
            score: state.score,
            health_percent,
            health_tier: HealthTier::from_percent(health_percent),
            final_score: (state.phase == GamePhase::GameOver).then_some(state.score),
        }
    }

    /// Score label text
    pub fn score_label(&self) -> String {
        self.score.to_string()
    }

    /// Health label text, e.g. `"85%"`
    pub fn health_label(&self) -> String {
        format!("{}%", self.health_percent)
    }
}
