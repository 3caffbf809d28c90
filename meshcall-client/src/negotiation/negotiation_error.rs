use crate::negotiation::NegotiationState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("offer received in state {0}")]
    UnexpectedOffer(NegotiationState),
    #[error("answer received in state {0}")]
    UnexpectedAnswer(NegotiationState),
    #[error("an offer is already outstanding")]
    OfferPending,
    #[error("transport failure: {0:#}")]
    Transport(#[from] anyhow::Error),
}
