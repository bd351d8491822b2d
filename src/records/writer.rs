//! Background score writer
//!
//! Owns a `ScoreSink` on its own thread so the tick loop only ever enqueues
//! an outcome. Write failures are logged on the writer thread.

use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};

use crate::core::error::{ArenaError, Result};
use crate::records::ScoreSink;
use crate::session::outcome::MatchOutcome;

pub struct ScoreWriter {
    sender: Option<Sender<MatchOutcome>>,
    handle: Option<JoinHandle<()>>,
}

impl ScoreWriter {
    /// Move `sink` onto a dedicated writer thread
    pub fn spawn(mut sink: Box<dyn ScoreSink>) -> Result<Self> {
        let (sender, receiver) = channel::<MatchOutcome>();
        let handle = thread::Builder::new()
            .name("score-writer".into())
            .spawn(move || {
                while let Ok(outcome) = receiver.recv() {
                    if let Err(e) = sink.record(&outcome) {
                        tracing::error!("Failed to record match outcome: {}", e);
                    }
                }
                tracing::debug!("Score writer stopped");
            })
            .map_err(|e| ArenaError::Persistence(format!("failed to start score writer: {}", e)))?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queue an outcome for writing. Never blocks.
    pub fn submit(&self, outcome: MatchOutcome) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(outcome).is_err() {
            tracing::error!("Score writer is gone, outcome dropped");
        }
    }

    /// Wait for every queued outcome to be written, then stop the thread
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Score writer panicked");
            }
        }
    }
}

impl Drop for ScoreWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::state::CombatStats;
    use crate::core::types::PlayerId;
    use crate::session::outcome::{EndReason, PlayerResult, Rank, Verdict};
    use std::sync::{Arc, Mutex};

    struct Collect(Arc<Mutex<Vec<u32>>>);

    impl ScoreSink for Collect {
        fn record(&mut self, outcome: &MatchOutcome) -> Result<()> {
            self.0.lock().unwrap().push(outcome.players[0].score);
            Ok(())
        }
    }

    fn outcome(score: u32) -> MatchOutcome {
        let result = |player| PlayerResult {
            player,
            name: "x".into(),
            score,
            rank: Rank::from_score(score),
            final_hp: 100.0,
            stats: CombatStats::default(),
        };
        MatchOutcome {
            verdict: Verdict::Draw,
            reason: EndReason::Timeout,
            ended_at: 0,
            players: [result(PlayerId::P1), result(PlayerId::P2)],
        }
    }

    #[test]
    fn test_close_drains_queue_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let writer = ScoreWriter::spawn(Box::new(Collect(Arc::clone(&seen)))).unwrap();
        for score in [10, 20, 30] {
            writer.submit(outcome(score));
        }
        writer.close();
        assert_eq!(*seen.lock().unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn test_drop_also_drains() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let writer = ScoreWriter::spawn(Box::new(Collect(Arc::clone(&seen)))).unwrap();
            writer.submit(outcome(5));
        }
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
