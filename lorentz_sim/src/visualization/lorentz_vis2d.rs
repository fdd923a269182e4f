use bevy::prelude::*;
use bevy::log::LogPlugin;
use tracing::{error, info};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

const CLOUD_COLOR: Color = Color::WHITE;
const PATH_COLOR: Color = Color::srgb(1.0, 0.5, 0.0);
const CONE_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);

pub fn run_2d(scenario: Scenario) {
    info!(
        "run_2d: starting Bevy 2D viewer with {} points and {} path vertices",
        scenario.simulator.transformed_cloud().len(),
        scenario.simulator.transformed_path().len()
    );

    // window covers the [-space_max, space_max] square
    let side = 2.0 * scenario.simulator.params().space_max * scenario.viewer.scale;

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(
            DefaultPlugins
                .build()
                // main already installed a tracing subscriber
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "lorentz_sim".into(),
                        resolution: (side, side).into(),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
        )
        .add_systems(Startup, setup_camera_system)
        .add_systems(Update, (physics_step_system, draw_system).chain())
        .run();
}

fn setup_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

fn physics_step_system(time: Res<Time>, mut scenario: ResMut<Scenario>) {
    if scenario.halted {
        return;
    }

    let dt = time.delta_seconds().min(scenario.viewer.max_frame_dt);
    if let Err(e) = scenario.simulator.step(dt) {
        error!("simulation halted: {e}");
        scenario.halted = true;
    }
}

fn to_screen(p: &NVec2, scale: f32) -> Vec2 {
    Vec2::new(p.x * scale, p.y * scale)
}

fn draw_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let scale = scenario.viewer.scale;
    let edge = scenario.simulator.params().space_max * scale;

    // light cone diagonals through the origin
    gizmos.line_2d(Vec2::new(edge, edge), Vec2::new(-edge, -edge), CONE_COLOR);
    gizmos.line_2d(Vec2::new(-edge, edge), Vec2::new(edge, -edge), CONE_COLOR);

    for p in scenario.simulator.transformed_cloud() {
        gizmos.circle_2d(to_screen(p, scale), scenario.viewer.point_radius, CLOUD_COLOR);
    }

    gizmos.linestrip_2d(
        scenario.simulator.transformed_path().iter().map(|p| to_screen(p, scale)),
        PATH_COLOR,
    );
}
