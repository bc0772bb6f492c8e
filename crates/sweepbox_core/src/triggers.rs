//! Trigger bookkeeping for game logic
//!
//! [`TriggerLedger`] is the [`TriggerHandler`] the world hands to the
//! integrator. It owns which colliders are consumed (skipped by every future
//! sweep), applies per-name rules, and queues every event for game logic to
//! drain after the tick. The queue holds at most [`MAX_PENDING_EVENTS`]; when
//! nobody drains it the oldest events are dropped.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use sweepbox_math::Vec3;
use sweepbox_physics::{ColliderKey, TriggerEvent, TriggerHandler};

/// Most undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// What happens when a named collider is hit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerRule {
    /// Collider name the rule applies to
    pub name: String,
    /// Skip the collider in all later sweeps after the first hit
    #[serde(default)]
    pub consume: bool,
    /// Velocity added to the entity at the end of the tick it was hit
    #[serde(default)]
    pub impulse: Option<Vec3>,
}

impl TriggerRule {
    /// A rule with no effect beyond reporting
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            consume: false,
            impulse: None,
        }
    }

    /// Consume the collider on first hit
    pub fn consumed(mut self) -> Self {
        self.consume = true;
        self
    }

    /// Push the entity when hit
    pub fn with_impulse(mut self, impulse: Vec3) -> Self {
        self.impulse = Some(impulse);
        self
    }
}

/// Consumed colliders, trigger rules and the event queue
#[derive(Clone, Debug, Default)]
pub struct TriggerLedger {
    rules: HashMap<String, TriggerRule>,
    consumed: HashSet<ColliderKey>,
    events: VecDeque<TriggerEvent>,
    dropped: usize,
}

impl TriggerLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with rules, later rules replacing earlier ones of the same name
    pub fn with_rules(rules: impl IntoIterator<Item = TriggerRule>) -> Self {
        let mut ledger = Self::new();
        for rule in rules {
            ledger.add_rule(rule);
        }
        ledger
    }

    /// Add or replace the rule for a collider name
    pub fn add_rule(&mut self, rule: TriggerRule) {
        self.rules.insert(rule.name.clone(), rule);
    }

    /// Rule for a collider name
    pub fn rule(&self, name: &str) -> Option<&TriggerRule> {
        self.rules.get(name)
    }

    /// Mark a collider as consumed
    pub fn consume(&mut self, key: ColliderKey) {
        self.consumed.insert(key);
    }

    /// Make a consumed collider solid again
    pub fn restore(&mut self, key: ColliderKey) -> bool {
        self.consumed.remove(&key)
    }

    /// Whether a collider has been consumed
    pub fn is_consumed(&self, key: ColliderKey) -> bool {
        self.consumed.contains(&key)
    }

    /// Number of consumed colliders
    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }

    /// Events not yet drained
    pub fn pending_events(&self) -> &VecDeque<TriggerEvent> {
        &self.events
    }

    /// Events dropped from a full queue since the last drain
    pub fn dropped_events(&self) -> usize {
        self.dropped
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<TriggerEvent> {
        self.dropped = 0;
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: TriggerEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            if self.dropped == 0 {
                log::warn!("Trigger queue full ({} events), dropping oldest", MAX_PENDING_EVENTS);
            }
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }
}

impl TriggerHandler for TriggerLedger {
    fn is_ignored(&self, key: ColliderKey) -> bool {
        self.consumed.contains(&key)
    }

    fn on_trigger(&mut self, event: &TriggerEvent, impulse: &mut Vec3) {
        log::debug!("Trigger '{}' fired", event.name);

        if let Some(rule) = self.rules.get(&event.name) {
            if let Some(push) = rule.impulse {
                *impulse += push;
            }
            if rule.consume && self.consumed.insert(event.key) {
                log::info!("Trigger '{}' consumed", event.name);
            }
        }

        self.push_event(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<ColliderKey> {
        let mut map: SlotMap<ColliderKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn event(key: ColliderKey, name: &str) -> TriggerEvent {
        TriggerEvent { key, name: name.to_string() }
    }

    #[test]
    fn test_unruled_events_are_queued() {
        let k = keys(1);
        let mut ledger = TriggerLedger::new();
        let mut impulse = Vec3::ZERO;

        ledger.on_trigger(&event(k[0], "sign"), &mut impulse);
        ledger.on_trigger(&event(k[0], "sign"), &mut impulse);

        assert_eq!(ledger.pending_events().len(), 2);
        assert_eq!(impulse, Vec3::ZERO);
        assert!(!ledger.is_ignored(k[0]));
    }

    #[test]
    fn test_consume_rule() {
        let k = keys(2);
        let mut ledger = TriggerLedger::with_rules([TriggerRule::new("door").consumed()]);
        let mut impulse = Vec3::ZERO;

        ledger.on_trigger(&event(k[0], "door"), &mut impulse);
        assert!(ledger.is_ignored(k[0]));
        assert!(ledger.is_consumed(k[0]));
        // Same rule, different collider
        assert!(!ledger.is_ignored(k[1]));
        assert_eq!(ledger.consumed_count(), 1);
    }

    #[test]
    fn test_impulse_rule_accumulates() {
        let k = keys(1);
        let mut ledger =
            TriggerLedger::with_rules([TriggerRule::new("pad").with_impulse(Vec3::new(0.0, 4.0, 0.0))]);
        let mut impulse = Vec3::new(1.0, 0.0, 0.0);

        ledger.on_trigger(&event(k[0], "pad"), &mut impulse);
        ledger.on_trigger(&event(k[0], "pad"), &mut impulse);
        assert_eq!(impulse, Vec3::new(1.0, 8.0, 0.0));
    }

    #[test]
    fn test_later_rule_replaces_earlier() {
        let ledger = TriggerLedger::with_rules([
            TriggerRule::new("door"),
            TriggerRule::new("door").consumed(),
        ]);
        assert!(ledger.rule("door").unwrap().consume);
        assert!(ledger.rule("window").is_none());
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let k = keys(2);
        let mut ledger = TriggerLedger::new();
        let mut impulse = Vec3::ZERO;
        ledger.on_trigger(&event(k[0], "a"), &mut impulse);
        ledger.on_trigger(&event(k[1], "b"), &mut impulse);

        let drained = ledger.drain_events();
        assert_eq!(drained.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(), ["a", "b"]);
        assert!(ledger.pending_events().is_empty());
        assert!(ledger.drain_events().is_empty());
    }

    #[test]
    fn test_undrained_queue_drops_oldest() {
        let k = keys(1);
        let mut ledger = TriggerLedger::new();
        let mut impulse = Vec3::ZERO;
        for i in 0..MAX_PENDING_EVENTS + 10 {
            ledger.on_trigger(&event(k[0], &i.to_string()), &mut impulse);
        }

        assert_eq!(ledger.pending_events().len(), MAX_PENDING_EVENTS);
        assert_eq!(ledger.dropped_events(), 10);
        assert_eq!(ledger.pending_events()[0].name, "10");

        let drained = ledger.drain_events();
        assert_eq!(drained.len(), MAX_PENDING_EVENTS);
        assert_eq!(drained.last().unwrap().name, (MAX_PENDING_EVENTS + 9).to_string());
        assert_eq!(ledger.dropped_events(), 0);
    }

    #[test]
    fn test_manual_consume_and_restore() {
        let k = keys(1);
        let mut ledger = TriggerLedger::new();
        ledger.consume(k[0]);
        assert!(ledger.is_ignored(k[0]));
        assert!(ledger.restore(k[0]));
        assert!(!ledger.is_ignored(k[0]));
        assert!(!ledger.restore(k[0]));
    }

    #[test]
    fn test_rule_ron_defaults() {
        let rule: TriggerRule = ron::from_str(r#"(name: "door")"#).unwrap();
        assert_eq!(rule, TriggerRule::new("door"));

        let rule: TriggerRule =
            ron::from_str(r#"(name: "pad", consume: true, impulse: Some((x: 0.0, y: 3.0, z: 0.0)))"#).unwrap();
        assert!(rule.consume);
        assert_eq!(rule.impulse, Some(Vec3::new(0.0, 3.0, 0.0)));
    }
}
