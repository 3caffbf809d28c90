use crate::negotiation::{NegotiationError, NegotiationState};
use crate::session::PeerSession;
use meshcall_core::{IceCandidate, RelayPayload, SessionDescription};
use tracing::{debug, warn};

/// Result of feeding one relayed payload into a session.
#[derive(Debug)]
pub enum NegotiationOutcome {
    /// Offer applied; the answer must be relayed back to the sender.
    Reply { answer: RelayPayload, drained: usize },
    /// Answer applied; the pair is stable again.
    RemoteApplied { drained: usize },
    CandidateApplied,
    /// Held until a remote description exists.
    CandidateQueued,
    Dropped(NegotiationError),
}

impl PeerSession {
    /// Initiator side: produce an offer and wait for the answer.
    pub async fn start_offer(&mut self) -> Result<RelayPayload, NegotiationError> {
        if self.state != NegotiationState::Stable {
            return Err(NegotiationError::OfferPending);
        }
        let sdp = self.transport.create_offer().await?;
        self.state = NegotiationState::HaveLocalOffer;
        debug!("Offer created for {} in '{}'", self.peer_id, self.room);
        Ok(RelayPayload::Offer { sdp })
    }

    /// Only accepted while stable. A colliding offer is dropped and the
    /// pair keeps waiting for the answer to its own offer.
    pub async fn receive_offer(&mut self, sdp: String) -> NegotiationOutcome {
        if self.state != NegotiationState::Stable {
            return NegotiationOutcome::Dropped(NegotiationError::UnexpectedOffer(self.state));
        }
        if let Err(e) = self
            .transport
            .set_remote_description(SessionDescription::offer(sdp))
            .await
        {
            return NegotiationOutcome::Dropped(e.into());
        }
        let drained = self.drain_candidates().await;

        match self.transport.create_answer().await {
            Ok(sdp) => NegotiationOutcome::Reply {
                answer: RelayPayload::Answer { sdp },
                drained,
            },
            Err(e) => NegotiationOutcome::Dropped(e.into()),
        }
    }

    pub async fn receive_answer(&mut self, sdp: String) -> NegotiationOutcome {
        if self.state != NegotiationState::HaveLocalOffer {
            return NegotiationOutcome::Dropped(NegotiationError::UnexpectedAnswer(self.state));
        }
        if let Err(e) = self
            .transport
            .set_remote_description(SessionDescription::answer(sdp))
            .await
        {
            return NegotiationOutcome::Dropped(e.into());
        }
        self.state = NegotiationState::Stable;
        let drained = self.drain_candidates().await;
        NegotiationOutcome::RemoteApplied { drained }
    }

    pub async fn receive_candidate(&mut self, candidate: IceCandidate) -> NegotiationOutcome {
        if !self.remote_description_set {
            self.candidate_queue.push_back(candidate);
            return NegotiationOutcome::CandidateQueued;
        }
        match self.transport.add_ice_candidate(candidate).await {
            Ok(()) => NegotiationOutcome::CandidateApplied,
            Err(e) => NegotiationOutcome::Dropped(e.into()),
        }
    }

    /// Marks the remote description as present and replays the queue in
    /// arrival order. Each queued candidate is applied once.
    async fn drain_candidates(&mut self) -> usize {
        self.remote_description_set = true;
        let mut drained = 0;
        while let Some(candidate) = self.candidate_queue.pop_front() {
            if let Err(e) = self.transport.add_ice_candidate(candidate).await {
                warn!("Queued candidate from {} rejected: {:#}", self.peer_id, e);
            }
            drained += 1;
        }
        drained
    }
}
