pub mod interactable;
pub mod pet;
