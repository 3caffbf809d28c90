use std::fmt;

/// Offer/answer state of one peer pair, seen from the local end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegotiationState {
    #[default]
    Stable,
    HaveLocalOffer,
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegotiationState::Stable => f.write_str("stable"),
            NegotiationState::HaveLocalOffer => f.write_str("have-local-offer"),
        }
    }
}
