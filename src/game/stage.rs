// Stage - one player, a floor, a pit and a restart button

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use futures::FutureExt;
use glam::Vec2;
use log::{info, warn};
use rapier2d::prelude::Vector;

use super::player::{PhysicsHost, PlayerConfig, PlayerController, PlayerState};
use super::ui::Button;
use crate::core::math::{from_physics, to_physics, Rect};
use crate::engine::input::{Gesture, GestureConfig, GestureRecognizer, PointerEvent};
use crate::engine::physics::body::presets;
use crate::engine::physics::{CollisionCategory, PhysicsWorld};

/// Below this height the player is considered lost
const KILL_HEIGHT: f32 = -20.0;

/// Upward speed still treated as resting when checking for a landing
const LANDING_SPEED: f32 = 0.05;

/// Stage layout and tuning
#[derive(Debug, Clone, Copy)]
pub struct StageConfig {
    pub player: PlayerConfig,
    pub gestures: GestureConfig,
    /// Where the player (re)appears, in world units
    pub spawn: Vec2,
    /// Width of the floor centred on the origin; the pit lies past its right edge
    pub floor_width: f32,
    /// Restart button, in screen pixels (y up)
    pub restart_button: Rect,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            gestures: GestureConfig::default(),
            spawn: Vec2::new(0.0, 1.5),
            floor_width: 40.0,
            restart_button: Rect::new(16.0, 16.0, 160.0, 64.0),
        }
    }
}

/// Everything one play session needs, driven by the window loop
pub struct Stage {
    controller: PlayerController,
    host: PhysicsHost,
    gestures: GestureRecognizer,
    restart_button: Button,
    restart_requested: Rc<Cell<bool>>,
    spawn: Vec2,
}

impl Stage {
    pub fn new(config: StageConfig) -> Result<Self> {
        let mut world = PhysicsWorld::new();

        let floor = world.add_rigid_body(presets::static_body(0.0, -0.5));
        world.add_collider(presets::ground_collider(config.floor_width, 1.0), floor);

        let pit_x = config.floor_width / 2.0 + config.floor_width / 4.0;
        let pit = world.add_rigid_body(presets::static_body(pit_x, -0.5));
        world.add_collider(presets::hazard_collider(config.floor_width / 2.0, 1.0), pit);

        let body = world.add_rigid_body(presets::player_body(config.spawn.x, config.spawn.y));
        world.add_collider(presets::player_collider(1.0, 2.0), body);

        let mut host = PhysicsHost::new(world, body);
        let controller = PlayerController::initialize(config.player, &mut host)
            .context("Failed to set up the player")?;

        let restart_requested = Rc::new(Cell::new(false));
        let requested = Rc::clone(&restart_requested);
        let restart_button = Button::new(config.restart_button).with_on_click(move || {
            let requested = Rc::clone(&requested);
            async move {
                requested.set(true);
                Ok::<(), anyhow::Error>(())
            }
            .boxed_local()
        });

        info!("Stage ready, player spawned at {}", config.spawn);

        Ok(Self {
            controller,
            host,
            gestures: GestureRecognizer::new(config.gestures),
            restart_button,
            restart_requested,
            spawn: config.spawn,
        })
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    pub fn restart_button(&self) -> &Button {
        &self.restart_button
    }

    pub fn player_state(&self) -> PlayerState {
        self.controller.state()
    }

    /// Player position in world units
    pub fn player_position(&self) -> Option<Vec2> {
        self.host
            .world()
            .get_rigid_body(self.host.body())
            .map(|body| from_physics(body.translation()))
    }

    /// Route a pointer event to the button or the player
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.gestures.is_dragging() && self.restart_button.handle_pointer(event) {
            return;
        }

        for gesture in self.gestures.process(event) {
            match gesture {
                Gesture::Begin(position) => self.controller.on_gesture_begin(position, &mut self.host),
                Gesture::Drag(position) => self.controller.on_gesture_move(position, &mut self.host),
                Gesture::End(position) => self.controller.on_gesture_end(position, &mut self.host),
                Gesture::Click(_) => {}
            }
        }
    }

    /// One fixed simulation step
    pub fn fixed_update(&mut self, dt: f32) {
        self.host.world_mut().step();

        let contacts = self.host.world().contacts_started(self.host.body());
        for category in contacts {
            match category {
                CollisionCategory::Hazard => self.kill_player(),
                other => self.controller.on_collision(other, &mut self.host),
            }
        }

        if self.is_resting_on_ground() {
            self.controller.on_ground_contact(&mut self.host);
        }

        if self
            .player_position()
            .is_some_and(|position| position.y < KILL_HEIGHT)
        {
            self.kill_player();
        }

        self.controller.on_tick(dt, &mut self.host);

        if self.restart_requested.replace(false) {
            self.respawn();
        }
    }

    /// Airborne player that is on the floor without having left it
    ///
    /// A flat or downward launch never breaks the floor contact, so no new
    /// contact event arrives to end the jump.
    fn is_resting_on_ground(&self) -> bool {
        if !self.controller.state().is_airborne() {
            return false;
        }

        let world = self.host.world();
        let body = self.host.body();
        let falling_or_still = world
            .get_rigid_body(body)
            .is_some_and(|rigid_body| rigid_body.linvel().y <= LANDING_SPEED);

        falling_or_still && world.is_touching(body, CollisionCategory::Ground)
    }

    /// Once per rendered frame
    pub fn frame_update(&mut self) {
        self.restart_button.update();
    }

    pub fn kill_player(&mut self) {
        self.controller.die(&mut self.host);
    }

    /// Put the player back at the spawn point, at rest
    pub fn respawn(&mut self) {
        let body = self.host.body();
        let Some(rigid_body) = self.host.world_mut().get_rigid_body_mut(body) else {
            warn!("Player body missing, cannot respawn");
            return;
        };

        rigid_body.set_translation(to_physics(self.spawn), true);
        rigid_body.set_linvel(Vector::zeros(), true);

        self.controller.respawn(&mut self.host);
        info!("Player respawned");
    }
}
