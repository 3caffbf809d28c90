use crate::engine::handle_server_impl::Role;
use crate::engine::{ClientEngine, ClientEvent};
use crate::negotiation::NegotiationOutcome;
use crate::session::PeerSession;
use crate::transport::TransportEvent;
use meshcall_core::{ClientMessage, PeerId, RelayPayload};
use tracing::{debug, error, warn};

impl ClientEngine {
    /// Creates the session for a newly discovered pair. The initiator sends
    /// its offer right away; the responder waits for one.
    pub(super) async fn open_session(&mut self, room: &str, peer_id: PeerId, role: Role) {
        if self.sessions.contains(room, &peer_id) {
            debug!("Session with {} in '{}' already exists", peer_id, room);
            return;
        }

        let transport = match self
            .factory
            .create(peer_id.clone(), &self.ice_servers, self.transport_tx.clone())
            .await
        {
            Ok(t) => t,
            Err(e) => {
                error!("Failed to create transport for {}: {:#}", peer_id, e);
                return;
            }
        };

        let mut session = PeerSession::new(room, peer_id.clone(), transport);
        if role == Role::Initiator {
            match session.start_offer().await {
                Ok(offer) => self.relay(&peer_id, &offer),
                Err(e) => error!("Failed to create offer for {}: {}", peer_id, e),
            }
        }
        self.sessions.insert(session);
    }

    pub(super) async fn close_session(&mut self, room: &str, peer_id: &PeerId) {
        if let Some(session) = self.sessions.remove(room, peer_id) {
            debug!("Closing session with {}", peer_id);
            if let Err(e) = session.close().await {
                warn!("Failed to close transport for {}: {:#}", peer_id, e);
            }
        }
    }

    pub(super) async fn close_all_sessions(&mut self) {
        for session in self.sessions.drain() {
            let peer_id = session.peer_id().clone();
            if let Err(e) = session.close().await {
                warn!("Failed to close transport for {}: {:#}", peer_id, e);
            }
        }
    }

    pub(super) async fn handle_relay(&mut self, from: PeerId, payload: serde_json::Value) {
        let Some(room) = self.room.as_ref().map(|r| r.name.clone()) else {
            warn!("Dropping relay from {}: not in a room", from);
            return;
        };
        let payload = match RelayPayload::from_value(payload) {
            Ok(p) => p,
            Err(e) => {
                warn!("Dropping malformed relay from {}: {}", from, e);
                return;
            }
        };
        let kind = payload.kind();
        let Some(session) = self.sessions.get_mut(&room, &from) else {
            warn!("Dropping {} from unknown peer {}", kind, from);
            return;
        };

        let outcome = match payload {
            RelayPayload::Offer { sdp } => session.receive_offer(sdp).await,
            RelayPayload::Answer { sdp } => session.receive_answer(sdp).await,
            RelayPayload::Candidate { candidate } => session.receive_candidate(candidate).await,
        };

        match outcome {
            NegotiationOutcome::Reply { answer, drained } => {
                debug!("Answering {} ({} queued candidates applied)", from, drained);
                self.relay(&from, &answer);
                self.emit(ClientEvent::PairNegotiated { peer_id: from });
            }
            NegotiationOutcome::RemoteApplied { drained } => {
                debug!("Answer from {} applied ({} queued candidates)", from, drained);
                self.emit(ClientEvent::PairNegotiated { peer_id: from });
            }
            NegotiationOutcome::CandidateApplied => {}
            NegotiationOutcome::CandidateQueued => {
                debug!("Queued early candidate from {}", from);
            }
            NegotiationOutcome::Dropped(e) => {
                warn!("Dropped {} from {}: {}", kind, from, e);
            }
        }
    }

    pub(super) async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::CandidateGenerated(peer_id, candidate) => {
                if self.has_live_session(&peer_id) {
                    self.relay(&peer_id, &RelayPayload::Candidate { candidate });
                } else {
                    debug!("Discarding candidate for closed session {}", peer_id);
                }
            }
            TransportEvent::RemoteTrack(peer_id, kind) => {
                self.emit(ClientEvent::RemoteTrack { peer_id, kind });
            }
            TransportEvent::Disconnected(peer_id) => {
                // Closing a session ourselves also ends up here.
                if self.has_live_session(&peer_id) {
                    warn!("Media link to {} lost", peer_id);
                    self.emit(ClientEvent::MediaLinkLost { peer_id });
                }
            }
        }
    }

    fn has_live_session(&self, peer_id: &PeerId) -> bool {
        self.room
            .as_ref()
            .is_some_and(|r| self.sessions.contains(&r.name, peer_id))
    }

    fn relay(&self, to: &PeerId, payload: &RelayPayload) {
        let msg = ClientMessage::Relay {
            to: to.clone(),
            payload: payload.to_value(),
        };
        if self.send(msg).is_err() {
            warn!("Signaling connection closed, {} to {} lost", payload.kind(), to);
        }
    }
}
