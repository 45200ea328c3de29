use serde::{Deserialize, Serialize};

/// Result of a favorite/unfavorite call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteResult {
    pub is_favorite: bool,
    /// False when the call found the membership already in the requested state.
    pub changed: bool,
}
