use bevy::prelude::*;
use bevy::window::WindowResolution;

use hiltsmith::config::ConfiguratorConfig;
use hiltsmith::constants::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use hiltsmith::controls::ControlsPlugin;
use hiltsmith::plugin::ConfiguratorPlugin;
use hiltsmith::rendering::RenderingPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.067, 0.067, 0.067)))
        // Compiled defaults; load_configurator_config overwrites them from
        // assets/configurator.toml (if present) in the Startup schedule.
        .insert_resource(ConfiguratorConfig::default())
        .add_plugins((ConfiguratorPlugin, RenderingPlugin, ControlsPlugin))
        .run();
}
