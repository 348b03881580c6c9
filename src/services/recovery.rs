use crate::error::NavResult;
use crate::models::types::MapId;
use crate::net::sink::ActionSink;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

/// "Return to town" is sent at most this many times per death.
const MAX_RETURN_ATTEMPTS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    /// Death noticed, map marked hazardous, return to town sent
    Started { died_on: MapId },
    Waiting,
    RetriedReturn,
    /// Alive again; the caller plans the original target from wherever the character stands
    Revived { died_on: MapId },
    TimedOut { died_on: MapId },
}

#[derive(Debug, Clone, Copy)]
struct Recovering {
    died_on: MapId,
    since: Instant,
    attempts: u8,
}

/// Death handling of one navigating character.
#[derive(Debug)]
pub struct RecoveryController {
    revive_timeout: Duration,
    phase: Option<Recovering>,
}

impl RecoveryController {
    pub fn new(revive_timeout: Duration) -> Self {
        Self {
            revive_timeout,
            phase: None,
        }
    }

    #[inline]
    pub fn in_progress(&self) -> bool {
        self.phase.is_some()
    }

    pub fn reset(&mut self) {
        self.phase = None;
    }

    pub async fn step(
        &mut self,
        dead: bool,
        current: MapId,
        hazards: &mut HashSet<MapId>,
        sink: &dyn ActionSink,
    ) -> NavResult<RecoveryStep> {
        let Some(mut phase) = self.phase else {
            if !dead {
                // nothing to recover from; treat as revived in place
                return Ok(RecoveryStep::Revived { died_on: current });
            }
            if hazards.insert(current) {
                tracing::warn!(map = %current, "died, map marked hazardous");
            }
            sink.return_to_town().await?;
            self.phase = Some(Recovering {
                died_on: current,
                since: Instant::now(),
                attempts: 1,
            });
            return Ok(RecoveryStep::Started { died_on: current });
        };

        if !dead {
            self.phase = None;
            tracing::info!(died_on = %phase.died_on, map = %current, "revived");
            return Ok(RecoveryStep::Revived { died_on: phase.died_on });
        }

        if phase.since.elapsed() < self.revive_timeout {
            return Ok(RecoveryStep::Waiting);
        }

        if phase.attempts >= MAX_RETURN_ATTEMPTS {
            self.phase = None;
            tracing::error!(died_on = %phase.died_on, attempts = phase.attempts, "resurrection timed out");
            return Ok(RecoveryStep::TimedOut { died_on: phase.died_on });
        }

        tracing::warn!(died_on = %phase.died_on, "still dead, sending return to town again");
        sink.return_to_town().await?;
        phase.attempts += 1;
        phase.since = Instant::now();
        self.phase = Some(phase);
        Ok(RecoveryStep::RetriedReturn)
    }
}
