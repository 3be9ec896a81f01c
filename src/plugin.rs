//! Bevy wiring for the configurator core.
//!
//! ## Messages
//!
//! | Message      | Effect                                            |
//! |--------------|---------------------------------------------------|
//! | `SetColor`   | `Configurator::set_color` (Global broadcasts)     |
//! | `ToggleRing` | `Configurator::toggle_ring`                       |
//!
//! ## Systems (registered by `ConfiguratorPlugin`)
//!
//! | System                                   | Schedule            | Purpose                                 |
//! |------------------------------------------|---------------------|-----------------------------------------|
//! | `load_configurator_config`               | `Startup`           | Read `assets/configurator.toml`         |
//! | `open_configurator`                      | `Startup` (after)   | Restore or create the session           |
//! | `apply_configuration_requests_system`    | `Update / Apply`    | Mutate, persist, publish `AssemblyPlan` |
//!
//! Within `Update`, [`ConfiguratorSet`] runs `Input`, then `Apply`, then
//! `Render`, so a plan is always persisted before it is drawn.

use crate::assembly::AssemblyPlan;
use crate::color::HexColor;
use crate::config::{load_configurator_config, ConfiguratorConfig};
use crate::part::{ColorSlot, RingSlot};
use crate::persist::FileStore;
use crate::session::Configurator;
use bevy::prelude::*;

/// Request to write a colour slot.
#[derive(Message, Debug, Clone)]
pub struct SetColor {
    pub slot: ColorSlot,
    pub color: HexColor,
}

/// Request to flip a ring's visibility.
#[derive(Message, Debug, Clone, Copy)]
pub struct ToggleRing {
    pub ring: RingSlot,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfiguratorSet {
    /// Systems that turn user input into [`SetColor`] / [`ToggleRing`].
    Input,
    /// The single writer of [`Configurator`] and [`AssemblyPlan`].
    Apply,
    /// Systems that read the published [`AssemblyPlan`].
    Render,
}

/// Registers the configuration resources, messages, and the apply system.
///
/// Insert a [`Configurator`] before the first update to use a custom store;
/// otherwise one is opened over a [`FileStore`] in `storage_dir`.
pub struct ConfiguratorPlugin;

impl Plugin for ConfiguratorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfiguratorConfig>()
            .init_resource::<AssemblyPlan>()
            .add_message::<SetColor>()
            .add_message::<ToggleRing>()
            .configure_sets(
                Update,
                (
                    ConfiguratorSet::Input,
                    ConfiguratorSet::Apply,
                    ConfiguratorSet::Render,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (load_configurator_config, open_configurator).chain(),
            )
            .add_systems(
                Update,
                apply_configuration_requests_system.in_set(ConfiguratorSet::Apply),
            );
    }
}

/// Startup system: open the session unless one was inserted up front, and
/// publish its initial plan.
pub fn open_configurator(
    mut commands: Commands,
    config: Res<ConfiguratorConfig>,
    existing: Option<Res<Configurator>>,
) {
    if let Some(configurator) = existing {
        info!("Using existing configuration session '{}'", configurator.key());
        commands.insert_resource(configurator.plan().clone());
        return;
    }

    let store = FileStore::new(&config.storage_dir);
    let configurator = Configurator::open(Box::new(store), config.storage_key.clone());
    commands.insert_resource(configurator.plan().clone());
    commands.insert_resource(configurator);
}

/// Apply every pending request, then publish the resulting plan once.
///
/// Colour writes and ring toggles touch disjoint fields, so applying all
/// colour requests before all toggles gives the same final state as arrival
/// order.
pub fn apply_configuration_requests_system(
    mut color_requests: MessageReader<SetColor>,
    mut ring_requests: MessageReader<ToggleRing>,
    configurator: Option<ResMut<Configurator>>,
    mut plan: ResMut<AssemblyPlan>,
) {
    let Some(mut configurator) = configurator else {
        return;
    };

    let mut changed = false;
    for request in color_requests.read() {
        configurator.set_color(request.slot, request.color.clone());
        changed = true;
    }
    for request in ring_requests.read() {
        configurator.toggle_ring(request.ring);
        changed = true;
    }

    if changed {
        *plan = configurator.plan().clone();
    }
}
