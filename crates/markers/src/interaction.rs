use std::collections::BTreeSet;

use foundation::ids::PoiId;
use serde::Serialize;

/// Single-slot detail state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum InteractionState {
    #[default]
    Idle,
    DetailOpen(PoiId),
}

/// Side effects a transition asks the engine to perform, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RestoreMarker(PoiId),
    HideMarker(PoiId),
    CloseDetail,
    OpenDetail(PoiId),
    FlyTo(PoiId),
    NotifySelected(PoiId),
    SetPlanAffordance { id: PoiId, done: bool },
    NotifyPlanAdded(PoiId),
}

/// Itinerary membership in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanMembership {
    order: Vec<PoiId>,
    set: BTreeSet<PoiId>,
}

impl PlanMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `id` was not already a member.
    pub fn insert(&mut self, id: PoiId) -> bool {
        if !self.set.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn remove(&mut self, id: &PoiId) -> bool {
        if !self.set.remove(id) {
            return false;
        }
        self.order.retain(|m| m != id);
        true
    }

    pub fn contains(&self, id: &PoiId) -> bool {
        self.set.contains(id)
    }

    pub fn members(&self) -> &[PoiId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Selection, detail and plan state.
///
/// Pure: transitions return [`Effect`]s and never touch a surface.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: InteractionState,
    plan: PlanMembership,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn open_id(&self) -> Option<&PoiId> {
        match &self.state {
            InteractionState::Idle => None,
            InteractionState::DetailOpen(id) => Some(id),
        }
    }

    pub fn plan(&self) -> &PlanMembership {
        &self.plan
    }

    pub fn is_member(&self, id: &PoiId) -> bool {
        self.plan.contains(id)
    }

    /// Opens the detail for `id`, closing any other first.
    pub fn select(&mut self, id: PoiId) -> Vec<Effect> {
        let mut effects = self.close();
        effects.extend([
            Effect::HideMarker(id.clone()),
            Effect::OpenDetail(id.clone()),
            Effect::FlyTo(id.clone()),
            Effect::NotifySelected(id.clone()),
        ]);
        self.state = InteractionState::DetailOpen(id);
        effects
    }

    pub fn close(&mut self) -> Vec<Effect> {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => Vec::new(),
            InteractionState::DetailOpen(id) => vec![Effect::RestoreMarker(id), Effect::CloseDetail],
        }
    }

    /// No effects when `id` is already a member.
    pub fn add_to_plan(&mut self, id: PoiId) -> Vec<Effect> {
        if !self.plan.insert(id.clone()) {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if self.open_id() == Some(&id) {
            effects.push(Effect::SetPlanAffordance {
                id: id.clone(),
                done: true,
            });
        }
        effects.push(Effect::NotifyPlanAdded(id));
        effects
    }

    pub fn remove_from_plan(&mut self, id: &PoiId) -> Vec<Effect> {
        if !self.plan.remove(id) {
            return Vec::new();
        }
        if self.open_id() == Some(id) {
            vec![Effect::SetPlanAffordance {
                id: id.clone(),
                done: false,
            }]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Effect, Interaction, InteractionState, PlanMembership};
    use foundation::ids::PoiId;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> PoiId {
        PoiId::new(s)
    }

    #[test]
    fn second_click_closes_the_first_detail() {
        let mut machine = Interaction::new();
        let first = machine.select(id("A"));
        assert_eq!(
            first,
            vec![
                Effect::HideMarker(id("A")),
                Effect::OpenDetail(id("A")),
                Effect::FlyTo(id("A")),
                Effect::NotifySelected(id("A")),
            ]
        );

        let second = machine.select(id("B"));
        assert_eq!(&second[..2], &[Effect::RestoreMarker(id("A")), Effect::CloseDetail]);
        assert_eq!(machine.state(), &InteractionState::DetailOpen(id("B")));
    }

    #[test]
    fn close_restores_and_goes_idle() {
        let mut machine = Interaction::new();
        assert!(machine.close().is_empty());
        machine.select(id("A"));
        assert_eq!(
            machine.close(),
            vec![Effect::RestoreMarker(id("A")), Effect::CloseDetail]
        );
        assert_eq!(machine.state(), &InteractionState::Idle);
    }

    #[test]
    fn add_to_plan_is_idempotent() {
        let mut machine = Interaction::new();
        machine.select(id("B"));
        assert_eq!(
            machine.add_to_plan(id("B")),
            vec![
                Effect::SetPlanAffordance {
                    id: id("B"),
                    done: true
                },
                Effect::NotifyPlanAdded(id("B")),
            ]
        );
        assert!(machine.add_to_plan(id("B")).is_empty());
        assert_eq!(machine.plan().members(), &[id("B")]);
    }

    #[test]
    fn plan_keeps_insertion_order() {
        let mut plan = PlanMembership::new();
        assert!(plan.insert(id("C")));
        assert!(plan.insert(id("A")));
        assert!(plan.insert(id("B")));
        assert!(plan.remove(&id("A")));
        assert!(!plan.remove(&id("A")));
        assert_eq!(plan.members(), &[id("C"), id("B")]);
        assert!(plan.contains(&id("B")));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn removing_the_open_point_resets_the_affordance() {
        let mut machine = Interaction::new();
        machine.select(id("A"));
        machine.add_to_plan(id("A"));
        machine.add_to_plan(id("B"));
        assert_eq!(
            machine.remove_from_plan(&id("A")),
            vec![Effect::SetPlanAffordance {
                id: id("A"),
                done: false
            }]
        );
        assert!(machine.remove_from_plan(&id("B")).is_empty());
        assert!(!machine.is_member(&id("B")));
    }
}
