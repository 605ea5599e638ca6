use crate::core::serialization::SaveState;

/// Storage backend for whole-session saves. Boxed errors keep callers
/// backend-agnostic.
pub trait SaveRepository {
    fn load_or_init(&mut self) -> Result<SaveState, Box<dyn std::error::Error>>;
    fn save_state(&mut self, state: &SaveState) -> Result<(), Box<dyn std::error::Error>>;
}
