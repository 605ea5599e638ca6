pub mod decay;
pub mod interaction;
pub mod notifications;
pub mod placeholders;
