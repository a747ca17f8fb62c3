pub mod game_path;
pub mod validated_json;

pub use game_path::GamePath;
pub use validated_json::ValidatedJson;
