mod sharer_id;
mod validated_json;

pub use sharer_id::{SharerId, SHARER_USER_ID};
pub use validated_json::ValidatedJson;
