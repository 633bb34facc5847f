// Command handler
//
// Turns discrete step triggers into a read-clamp-write-reflect cycle
// against the daemon. Every trigger is a full, independent round trip.

use tracing::{info, warn};

use super::badge::{Badge, UNREACHABLE_BADGE};
use crate::client::{clamp, Level, LevelControl};
use crate::errors::DaemonError;

/// Named step trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Increase,
    Decrease,
}

impl Trigger {
    pub fn delta(self) -> i64 {
        match self {
            Trigger::Increase => 1,
            Trigger::Decrease => -1,
        }
    }
}

/// Result of one command, as reflected in the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The daemon accepted this level
    Applied(Level),
    /// A read or write failed
    Unreachable,
}

impl StepOutcome {
    pub fn badge_text(&self) -> String {
        match self {
            StepOutcome::Applied(level) => level.to_string(),
            StepOutcome::Unreachable => UNREACHABLE_BADGE.to_string(),
        }
    }
}

/// Step the daemon's level by `delta` and reflect the result in the badge
pub async fn handle_step<C, B>(client: &C, badge: &B, delta: i64) -> StepOutcome
where
    C: LevelControl + ?Sized,
    B: Badge + ?Sized,
{
    let outcome = match step_cycle(client, delta).await {
        Ok(level) => {
            info!(delta, level = level.get(), "Level stepped");
            StepOutcome::Applied(level)
        }
        Err(e) => {
            warn!("Failed to change level: {}", e);
            StepOutcome::Unreachable
        }
    };
    reflect(badge, outcome)
}

/// Run the step for a named trigger
pub async fn handle_trigger<C, B>(client: &C, badge: &B, trigger: Trigger) -> StepOutcome
where
    C: LevelControl + ?Sized,
    B: Badge + ?Sized,
{
    handle_step(client, badge, trigger.delta()).await
}

/// Set a level from free-form input; the raw value is clamped first
pub async fn set_level<C, B>(client: &C, badge: &B, raw: i64) -> StepOutcome
where
    C: LevelControl + ?Sized,
    B: Badge + ?Sized,
{
    let level = clamp(raw);
    let outcome = match client.push_level(level).await {
        Ok(()) => {
            info!(requested = raw, level = level.get(), "Level set");
            StepOutcome::Applied(level)
        }
        Err(e) => {
            warn!("Failed to set level: {}", e);
            StepOutcome::Unreachable
        }
    };
    reflect(badge, outcome)
}

async fn step_cycle<C>(client: &C, delta: i64) -> Result<Level, DaemonError>
where
    C: LevelControl + ?Sized,
{
    let current = client.get_level().await?;
    let next = current.step(delta);
    client.push_level(next).await?;
    Ok(next)
}

fn reflect<B: Badge + ?Sized>(badge: &B, outcome: StepOutcome) -> StepOutcome {
    if let Err(e) = badge.set_text(&outcome.badge_text()) {
        warn!("Failed to update badge: {:#}", e);
    }
    outcome
}
