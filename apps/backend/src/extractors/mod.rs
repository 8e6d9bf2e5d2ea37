pub mod current_user;
pub mod validated_json;

pub use current_user::{CurrentUser, MaybeUser};
pub use validated_json::ValidatedJson;
