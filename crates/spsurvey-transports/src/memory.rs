// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-process distribution engine
//!
//! Each pipe is a pair of bounded channels: surveys flow from the peer into
//! the engine, replies flow back out. A full reply channel is the
//! backpressure a respondent sees when delivering a reply.
//!
//! Inbound messages are fair-queued round-robin across pipes. Replies go to
//! the pipe the most recent inbound message came from; if that pipe has been
//! removed or its peer dropped, the reply is accepted and discarded.

use crossbeam::channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use spsurvey_config::EngineConfig;
use tracing::{debug, trace};

use crate::common::{Message, PipeId, SocketEvents, TransportError, TransportResult};
use crate::envelope::{self, SurveyId};
use crate::traits::{DistributionEngine, SendOutcome};

/// Engine-side end of a pipe
#[derive(Debug)]
pub struct MemoryPipe {
    id: PipeId,
    inbound: Receiver<Message>,
    outbound: Sender<Message>,
}

impl MemoryPipe {
    pub fn id(&self) -> PipeId {
        self.id
    }
}

/// Peer-side end of a pipe, standing in for a remote surveyor
#[derive(Debug)]
pub struct MemoryPeer {
    id: PipeId,
    to_engine: Sender<Message>,
    from_engine: Receiver<Message>,
}

impl MemoryPeer {
    pub fn id(&self) -> PipeId {
        self.id
    }

    /// Send a survey tagged with `survey_id`
    ///
    /// # Errors
    ///
    /// `WouldBlock` when the inbound queue is full, `PipeClosed` when the
    /// engine end has been dropped.
    pub fn send_survey(
        &self,
        survey_id: SurveyId,
        body: impl Into<Vec<u8>>,
    ) -> TransportResult<()> {
        self.send_raw(Message::with_header(envelope::survey_header(survey_id), body))
    }

    /// Send an already framed message
    pub fn send_raw(&self, msg: Message) -> TransportResult<()> {
        match self.to_engine.try_send(msg) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(TransportError::WouldBlock),
            Err(TrySendError::Disconnected(_)) => Err(TransportError::PipeClosed(self.id)),
        }
    }

    /// Take the next reply, header included
    pub fn recv_reply(&self) -> Option<Message> {
        self.from_engine.try_recv().ok()
    }

    /// Replies queued and not yet read
    pub fn pending_replies(&self) -> usize {
        self.from_engine.len()
    }
}

/// Create a connected pipe/peer pair
///
/// Queue depths come from `config`; a zero high water mark is raised to one.
pub fn pipe(id: PipeId, config: &EngineConfig) -> (MemoryPipe, MemoryPeer) {
    let (to_engine, inbound) = bounded(config.recv_hwm.max(1));
    let (outbound, from_engine) = bounded(config.send_hwm.max(1));

    (
        MemoryPipe {
            id,
            inbound,
            outbound,
        },
        MemoryPeer {
            id,
            to_engine,
            from_engine,
        },
    )
}

/// Bounded-queue engine for in-process peers
#[derive(Debug, Default)]
pub struct MemoryEngine {
    config: EngineConfig,
    pipes: Vec<MemoryPipe>,
    next_in: usize,
    reply_to: Option<PipeId>,
}

impl MemoryEngine {
    /// Create an engine with default queue depths
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit queue depths
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if either high water mark is zero.
    pub fn with_config(config: EngineConfig) -> TransportResult<Self> {
        if config.send_hwm == 0 || config.recv_hwm == 0 {
            return Err(TransportError::InvalidConfig(
                "high water marks must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a pipe sized by this engine's configuration
    ///
    /// The pipe still has to be attached with `add_pipe`.
    pub fn open_pipe(&self, id: PipeId) -> (MemoryPipe, MemoryPeer) {
        pipe(id, &self.config)
    }

    pub fn pipe_count(&self) -> usize {
        self.pipes.len()
    }

    pub fn has_pipe(&self, id: PipeId) -> bool {
        self.pipes.iter().any(|p| p.id == id)
    }

    fn reply_pipe(&self) -> Option<&MemoryPipe> {
        let target = self.reply_to?;
        self.pipes.iter().find(|p| p.id == target)
    }
}

impl DistributionEngine for MemoryEngine {
    type Pipe = MemoryPipe;

    fn add_pipe(&mut self, pipe: MemoryPipe) -> TransportResult<()> {
        if self.has_pipe(pipe.id) {
            return Err(TransportError::DuplicatePipe(pipe.id));
        }
        debug!(pipe = %pipe.id, "pipe attached");
        self.pipes.push(pipe);
        Ok(())
    }

    fn remove_pipe(&mut self, id: PipeId) -> Option<MemoryPipe> {
        let index = self.pipes.iter().position(|p| p.id == id)?;
        let removed = self.pipes.remove(index);
        if self.next_in > index {
            self.next_in -= 1;
        }
        if self.next_in >= self.pipes.len() {
            self.next_in = 0;
        }
        // A pipe attached later under the same id never saw the survey
        if self.reply_to == Some(id) {
            self.reply_to = None;
        }
        debug!(pipe = %id, "pipe detached");
        Some(removed)
    }

    fn recv(&mut self) -> Option<Message> {
        let count = self.pipes.len();
        for offset in 0..count {
            let index = (self.next_in + offset) % count;
            let pipe = &self.pipes[index];
            match pipe.inbound.try_recv() {
                Ok(msg) => {
                    self.reply_to = Some(pipe.id);
                    self.next_in = (index + 1) % count;
                    return Some(msg);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => continue,
            }
        }
        None
    }

    fn send(&mut self, msg: Message) -> SendOutcome {
        let Some(pipe) = self.reply_pipe() else {
            trace!(reply_to = ?self.reply_to, "no route for reply, discarded");
            return SendOutcome::Accepted;
        };

        match pipe.outbound.try_send(msg) {
            Ok(()) => SendOutcome::Accepted,
            Err(TrySendError::Full(msg)) => SendOutcome::WouldBlock(msg),
            Err(TrySendError::Disconnected(_)) => {
                trace!(pipe = %pipe.id, "peer gone, reply discarded");
                SendOutcome::Accepted
            }
        }
    }

    fn events(&self) -> SocketEvents {
        let mut events = SocketEvents::empty();
        if self.pipes.iter().any(|p| !p.inbound.is_empty()) {
            events |= SocketEvents::IN;
        }
        // Unrouted replies are accepted (and discarded), so only a full
        // reply pipe clears OUT.
        let writable = self.reply_pipe().map_or(true, |p| !p.outbound.is_full());
        if writable {
            events |= SocketEvents::OUT;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_engine() -> MemoryEngine {
        MemoryEngine::with_config(EngineConfig::new(1, 4)).unwrap()
    }

    #[test]
    fn test_zero_hwm_rejected() {
        let result = MemoryEngine::with_config(EngineConfig::new(0, 4));
        assert!(matches!(result, Err(TransportError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_pipe_rejected() {
        let mut engine = small_engine();
        let (first, _peer1) = engine.open_pipe(PipeId(1));
        let (second, _peer2) = engine.open_pipe(PipeId(1));
        engine.add_pipe(first).unwrap();
        assert!(matches!(
            engine.add_pipe(second),
            Err(TransportError::DuplicatePipe(PipeId(1)))
        ));
        assert_eq!(engine.pipe_count(), 1);
    }

    #[test]
    fn test_fair_queueing_across_pipes() {
        let mut engine = small_engine();
        let (a, peer_a) = engine.open_pipe(PipeId(1));
        let (b, peer_b) = engine.open_pipe(PipeId(2));
        engine.add_pipe(a).unwrap();
        engine.add_pipe(b).unwrap();

        peer_a.send_survey(1, b"a1".to_vec()).unwrap();
        peer_a.send_survey(2, b"a2".to_vec()).unwrap();
        peer_b.send_survey(3, b"b1".to_vec()).unwrap();

        let bodies: Vec<Vec<u8>> = std::iter::from_fn(|| engine.recv())
            .map(Message::into_body)
            .collect();
        assert_eq!(bodies, vec![b"a1".to_vec(), b"b1".to_vec(), b"a2".to_vec()]);
    }

    #[test]
    fn test_reply_routed_to_origin() {
        let mut engine = small_engine();
        let (a, peer_a) = engine.open_pipe(PipeId(1));
        let (b, peer_b) = engine.open_pipe(PipeId(2));
        engine.add_pipe(a).unwrap();
        engine.add_pipe(b).unwrap();

        peer_b.send_survey(8, Vec::new()).unwrap();
        engine.recv().unwrap();

        assert_eq!(engine.send(Message::new(b"r".to_vec())), SendOutcome::Accepted);
        assert!(peer_a.recv_reply().is_none());
        assert_eq!(peer_b.recv_reply().unwrap().body(), b"r");
    }

    #[test]
    fn test_full_reply_pipe_pushes_back() {
        let mut engine = small_engine();
        let (a, peer) = engine.open_pipe(PipeId(1));
        engine.add_pipe(a).unwrap();
        peer.send_survey(1, Vec::new()).unwrap();
        engine.recv().unwrap();

        assert_eq!(engine.send(Message::new(b"1".to_vec())), SendOutcome::Accepted);
        assert!(!engine.events().contains(SocketEvents::OUT));

        let outcome = engine.send(Message::new(b"2".to_vec()));
        assert_eq!(outcome, SendOutcome::WouldBlock(Message::new(b"2".to_vec())));

        peer.recv_reply().unwrap();
        assert!(engine.events().contains(SocketEvents::OUT));
    }

    #[test]
    fn test_reply_to_removed_pipe_discarded() {
        let mut engine = small_engine();
        let (a, peer) = engine.open_pipe(PipeId(1));
        engine.add_pipe(a).unwrap();
        peer.send_survey(1, Vec::new()).unwrap();
        engine.recv().unwrap();

        let removed = engine.remove_pipe(PipeId(1)).unwrap();
        assert_eq!(removed.id(), PipeId(1));
        assert_eq!(engine.send(Message::new(b"late".to_vec())), SendOutcome::Accepted);
        assert_eq!(peer.pending_replies(), 0);
    }

    #[test]
    fn test_reply_not_routed_to_reattached_pipe_id() {
        let mut engine = small_engine();
        let (a, old_peer) = engine.open_pipe(PipeId(1));
        engine.add_pipe(a).unwrap();
        old_peer.send_survey(1, Vec::new()).unwrap();
        engine.recv().unwrap();

        engine.remove_pipe(PipeId(1)).unwrap();
        let (fresh, new_peer) = engine.open_pipe(PipeId(1));
        engine.add_pipe(fresh).unwrap();

        assert_eq!(engine.send(Message::new(b"r".to_vec())), SendOutcome::Accepted);
        assert_eq!(new_peer.pending_replies(), 0);
        assert_eq!(old_peer.pending_replies(), 0);
    }

    #[test]
    fn test_events_track_inbound() {
        let mut engine = small_engine();
        let (a, peer) = engine.open_pipe(PipeId(1));
        engine.add_pipe(a).unwrap();
        assert!(!engine.events().contains(SocketEvents::IN));

        peer.send_survey(1, Vec::new()).unwrap();
        assert!(engine.events().contains(SocketEvents::IN));

        engine.recv().unwrap();
        assert!(!engine.events().contains(SocketEvents::IN));
    }

    #[test]
    fn test_peer_sees_inbound_backpressure_and_close() {
        let engine = MemoryEngine::with_config(EngineConfig::new(1, 1)).unwrap();
        let (a, peer) = engine.open_pipe(PipeId(4));

        peer.send_survey(1, Vec::new()).unwrap();
        assert!(peer.send_survey(2, Vec::new()).unwrap_err().is_would_block());

        drop(a);
        assert!(matches!(
            peer.send_survey(3, Vec::new()),
            Err(TransportError::PipeClosed(PipeId(4)))
        ));
    }
}
