use bevy_ecs::prelude::*;

/// Counts decay steps since the session began. One tick is one second of
/// play time.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionClock {
    pub tick: u64,
}

impl SessionClock {
    pub fn advance(&mut self) {
        self.tick = self.tick.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_ticks() {
        let mut clock = SessionClock::default();
        clock.advance();
        clock.advance();
        assert_eq!(clock.tick, 2);
    }
}
