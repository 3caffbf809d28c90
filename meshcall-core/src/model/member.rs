use crate::model::peer::PeerId;
use serde::{Deserialize, Serialize};

/// A room member as seen by the other members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub id: PeerId,
    pub username: String,
}
