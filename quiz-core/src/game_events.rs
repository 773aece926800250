use quiz_types::{MemberId, PartyId, RoundOutcome, SessionSummary};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

pub const DEFAULT_EVENT_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    RoundResolved {
        party_id: Option<PartyId>,
        round_number: u32,
        outcome: RoundOutcome,
    },
    SessionCompleted {
        party_id: Option<PartyId>,
        summary: SessionSummary,
    },
    ScoreSubmitted {
        party_id: PartyId,
        member_id: MemberId,
        round_number: u32,
        outcome: RoundOutcome,
    },
    MemberJoined {
        party_id: PartyId,
        member_id: MemberId,
        nickname: String,
    },
}

impl QuizEvent {
    /// Party the event belongs to; solo play has none
    pub fn party_id(&self) -> Option<PartyId> {
        match self {
            QuizEvent::RoundResolved { party_id, .. } => *party_id,
            QuizEvent::SessionCompleted { party_id, .. } => *party_id,
            QuizEvent::ScoreSubmitted { party_id, .. } => Some(*party_id),
            QuizEvent::MemberJoined { party_id, .. } => Some(*party_id),
        }
    }
}

/// Fan-out channel for quiz events.
///
/// Publishing never blocks and never fails; with no subscribers the event is
/// simply dropped. Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct EventChannel {
    sender: broadcast::Sender<QuizEvent>,
}

impl EventChannel {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: QuizEvent) {
        // No subscribers connected is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            party_filter: None,
        }
    }

    /// Subscriber that only sees one party's events
    pub fn subscribe_party(&self, party_id: PartyId) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            party_filter: Some(party_id),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

pub struct EventSubscriber {
    receiver: broadcast::Receiver<QuizEvent>,
    party_filter: Option<PartyId>,
}

impl EventSubscriber {
    /// Next pending event without waiting. Lagged gaps are skipped.
    pub fn try_next(&mut self) -> Option<QuizEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(event);
                    }
                }
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("Event subscriber lagged, skipped {} events", missed);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// All events pending right now
    pub fn drain(&mut self) -> Vec<QuizEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Wait for the next event. Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<QuizEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("Event subscriber lagged, skipped {} events", missed);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    fn accepts(&self, event: &QuizEvent) -> bool {
        match self.party_filter {
            Some(party_id) => event.party_id() == Some(party_id),
            None => true,
        }
    }
}
