//! The global event schedule: one slot per live particle plus the
//! system-wide creation slot.

use crate::event::{EventKind, ScheduledEvent};
use crate::particle::ParticleRegistry;
use excimer_core::ParticleTag;
use indexmap::IndexMap;

/// Which slot of the schedule won the global race.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventChoice {
    /// The system creation event fires next.
    Creation,
    /// The named particle's scheduled event fires next.
    Particle(ParticleTag),
}

/// The set of currently scheduled events.
///
/// Holds exactly one [`ScheduledEvent`] per live particle plus one
/// creation event, so its size is always live-particle-count + 1.
/// Selecting the next event never advances any clock; that is the
/// driver's job at execution time.
#[derive(Clone, Debug)]
pub struct EventSchedule {
    creation: ScheduledEvent,
    by_particle: IndexMap<ParticleTag, ScheduledEvent>,
}

impl EventSchedule {
    /// Create a schedule holding only the initial creation event.
    pub fn new(creation: ScheduledEvent) -> Self {
        debug_assert_eq!(creation.kind, EventKind::Creation);
        Self {
            creation,
            by_particle: IndexMap::new(),
        }
    }

    /// The event with the minimum execution time across the whole set,
    /// and that time. Ties break toward the creation slot, then first
    /// insertion order; with continuous sampling ties have probability
    /// zero, so any fixed rule preserves determinism.
    pub fn next(&self) -> (EventChoice, f64) {
        let mut choice = EventChoice::Creation;
        let mut best = self.creation.execution_time;
        for (&tag, event) in &self.by_particle {
            if event.execution_time < best {
                best = event.execution_time;
                choice = EventChoice::Particle(tag);
            }
        }
        (choice, best)
    }

    /// Install (or replace) the scheduled event for a particle.
    pub fn schedule(&mut self, tag: ParticleTag, event: ScheduledEvent) {
        debug_assert_ne!(
            event.kind,
            EventKind::Creation,
            "creation lives in its own slot"
        );
        self.by_particle.insert(tag, event);
    }

    /// Remove a particle's slot, returning the event it held.
    pub fn remove(&mut self, tag: ParticleTag) -> Option<ScheduledEvent> {
        self.by_particle.shift_remove(&tag)
    }

    /// The scheduled event for a particle, if it is live.
    pub fn get(&self, tag: ParticleTag) -> Option<&ScheduledEvent> {
        self.by_particle.get(&tag)
    }

    /// Replace the system creation event.
    pub fn set_creation(&mut self, event: ScheduledEvent) {
        debug_assert_eq!(event.kind, EventKind::Creation);
        self.creation = event;
    }

    /// The current system creation event.
    pub fn creation(&self) -> &ScheduledEvent {
        &self.creation
    }

    /// Total scheduled events, counting the creation slot.
    pub fn len(&self) -> usize {
        self.by_particle.len() + 1
    }

    /// Always false: the creation slot never empties. Present for the
    /// conventional `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Assert the one-event-per-particle pairing invariant against the
    /// registry. A violation is a programming error, never a runtime
    /// condition, so this panics rather than returning an error.
    pub fn assert_paired(&self, registry: &ParticleRegistry) {
        assert_eq!(
            self.by_particle.len(),
            registry.len(),
            "scheduled-event count must equal live-particle count"
        );
        for tag in registry.tags() {
            assert!(
                self.by_particle.contains_key(&tag),
                "particle {tag} has no scheduled event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use excimer_core::Coords;

    fn event(kind: EventKind, time: f64) -> ScheduledEvent {
        ScheduledEvent {
            kind,
            rate_constant: 1.0,
            execution_time: time,
        }
    }

    #[test]
    fn next_returns_global_minimum() {
        let mut sched = EventSchedule::new(event(EventKind::Creation, 5.0));
        sched.schedule(ParticleTag(1), event(EventKind::Recombination, 3.0));
        sched.schedule(
            ParticleTag(2),
            event(
                EventKind::Hop {
                    destination: Coords::new(0, 0, 0),
                    displacement: [1, 0, 0],
                },
                1.5,
            ),
        );
        let (choice, time) = sched.next();
        assert_eq!(choice, EventChoice::Particle(ParticleTag(2)));
        assert_eq!(time, 1.5);
    }

    #[test]
    fn creation_wins_when_earliest() {
        let mut sched = EventSchedule::new(event(EventKind::Creation, 0.5));
        sched.schedule(ParticleTag(1), event(EventKind::Recombination, 3.0));
        let (choice, time) = sched.next();
        assert_eq!(choice, EventChoice::Creation);
        assert_eq!(time, 0.5);
    }

    #[test]
    fn len_counts_creation_slot() {
        let mut sched = EventSchedule::new(event(EventKind::Creation, 1.0));
        assert_eq!(sched.len(), 1);
        sched.schedule(ParticleTag(1), event(EventKind::Recombination, 2.0));
        assert_eq!(sched.len(), 2);
        sched.remove(ParticleTag(1));
        assert_eq!(sched.len(), 1);
    }

    #[test]
    #[should_panic(expected = "must equal live-particle count")]
    fn missing_event_slot_is_a_programming_error() {
        let sched = EventSchedule::new(event(EventKind::Creation, 1.0));
        let mut registry = ParticleRegistry::new();
        registry.insert(0.0, Coords::new(0, 0, 0), 1.0);
        sched.assert_paired(&registry);
    }

    #[test]
    #[should_panic(expected = "no scheduled event")]
    fn unpaired_particle_is_a_programming_error() {
        // Counts agree, but the scheduled tag is not the live one.
        let mut sched = EventSchedule::new(event(EventKind::Creation, 1.0));
        sched.schedule(ParticleTag(2), event(EventKind::Recombination, 3.0));
        let mut registry = ParticleRegistry::new();
        registry.insert(0.0, Coords::new(0, 0, 0), 1.0);
        sched.assert_paired(&registry);
    }
}
