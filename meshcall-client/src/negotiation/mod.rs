mod negotiation_error;
mod negotiation_state;
mod transitions;

pub use negotiation_error::*;
pub use negotiation_state::*;
pub use transitions::*;
