//! The configurator session: owns the live state, its store, and its plan.
//!
//! Every mutation runs the same three steps in order: swap in the new state
//! snapshot, persist it, rebuild the [`AssemblyPlan`].  When a mutation call
//! returns, the durable copy and the plan both reflect the new state.  A
//! failed write is logged and the session carries on in memory.
//!
//! [`Configurator`] is a Bevy resource with exactly one writer,
//! [`crate::plugin::apply_configuration_requests_system`], which keeps the
//! mutate-persist-recompute sequence atomic with respect to every reader.

use crate::assembly::{resolve, AssemblyPlan};
use crate::color::HexColor;
use crate::part::{ColorSlot, RingSlot};
use crate::persist::{self, KeyValueStore};
use crate::state::ConfigurationState;
use bevy::log::{debug, error, info};
use bevy::prelude::Resource;

#[derive(Resource)]
pub struct Configurator {
    state: ConfigurationState,
    plan: AssemblyPlan,
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl Configurator {
    /// Start a session from whatever is stored under `key`, or from the
    /// built-in default configuration.
    pub fn open(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = match persist::load(store.as_ref(), &key) {
            Some(state) => {
                info!("Restored configuration from '{}'", key);
                state
            }
            None => {
                info!("No usable configuration under '{}'; using defaults", key);
                ConfigurationState::default()
            }
        };
        let plan = resolve(&state);
        Self {
            state,
            plan,
            store,
            key,
        }
    }

    pub fn state(&self) -> &ConfigurationState {
        &self.state
    }

    pub fn plan(&self) -> &AssemblyPlan {
        &self.plan
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_color(&mut self, slot: ColorSlot, color: HexColor) -> &AssemblyPlan {
        debug!("set {:?} colour to {}", slot, color);
        let next = self.state.with_color(slot, color);
        self.commit(next)
    }

    pub fn toggle_ring(&mut self, ring: RingSlot) -> &AssemblyPlan {
        let next = self.state.with_ring_toggled(ring);
        debug!(
            "ring {:?} now {}",
            ring,
            if next.shows_ring(ring) { "shown" } else { "hidden" }
        );
        self.commit(next)
    }

    /// Swap in `next`, persist it, then rebuild the plan.
    fn commit(&mut self, next: ConfigurationState) -> &AssemblyPlan {
        self.state = next;
        if let Err(err) = persist::save(self.store.as_mut(), &self.key, &self.state) {
            error!("Failed to persist configuration '{}': {}", self.key, err);
        }
        self.plan = resolve(&self.state);
        &self.plan
    }
}
