// Player controller - owns the active state and routes events to it

use glam::Vec2;
use log::{debug, info, trace};

use super::host::PlayerHost;
use super::state::PlayerState;
use super::{PlayerConfig, PlayerError};
use crate::engine::physics::CollisionCategory;

/// Slingshot player controller
///
/// Events are delivered one at a time through `&mut self`, so a transition's
/// exit/enter pair always completes before the next event is looked at.
///
/// A drag that spans a transition is not tracked as a session: whichever
/// state is active when a move or end event arrives handles it, using the
/// anchor recorded by the last begin event.
#[derive(Debug)]
pub struct PlayerController {
    state: PlayerState,
    previous_state: Option<PlayerState>,
    state_time: f32,
    drag_anchor: Vec2,
    config: PlayerConfig,
}

impl PlayerController {
    /// Validate `config`, start in [`PlayerState::Standing`] and run its enter hook
    pub fn initialize(config: PlayerConfig, host: &mut dyn PlayerHost) -> Result<Self, PlayerError> {
        config.validate()?;

        let mut controller = Self {
            state: PlayerState::Standing,
            previous_state: None,
            state_time: 0.0,
            drag_anchor: Vec2::ZERO,
            config,
        };

        let initial = controller.state;
        initial.on_enter(&mut controller, None, host);

        info!(
            "Player ready (jump limit {}, fly limit {}, speed {})",
            config.jump_limit_magnitude, config.fly_limit_magnitude, config.speed
        );
        Ok(controller)
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// State active before the last transition, if any
    pub fn previous_state(&self) -> Option<PlayerState> {
        self.previous_state
    }

    /// Seconds of ticks spent in the current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Position of the last drag begin (stale outside a drag)
    pub fn drag_anchor(&self) -> Vec2 {
        self.drag_anchor
    }

    pub(super) fn set_drag_anchor(&mut self, position: Vec2) {
        self.drag_anchor = position;
    }

    /// Advance one simulation tick
    pub fn on_tick(&mut self, dt: f32, host: &mut dyn PlayerHost) {
        self.state_time += dt;
        let state = self.state;
        state.on_update(self, host);
    }

    pub fn on_gesture_begin(&mut self, position: Vec2, host: &mut dyn PlayerHost) {
        let state = self.state;
        state.on_begin_drag(self, position, host);
    }

    pub fn on_gesture_move(&mut self, position: Vec2, host: &mut dyn PlayerHost) {
        let state = self.state;
        state.on_drag(self, position, host);
    }

    pub fn on_gesture_end(&mut self, position: Vec2, host: &mut dyn PlayerHost) {
        let state = self.state;
        state.on_end_drag(self, position, host);
    }

    /// Landed on the ground
    ///
    /// No hooks run when already standing. The dead player stays dead.
    pub fn on_ground_contact(&mut self, host: &mut dyn PlayerHost) {
        match self.state {
            PlayerState::Standing => {}
            PlayerState::Dead => debug!("Ignoring ground contact while dead"),
            PlayerState::Jumping | PlayerState::Flying => {
                self.change_state(PlayerState::Standing, host)
            }
        }
    }

    /// Collision started with something of the given category
    pub fn on_collision(&mut self, category: CollisionCategory, host: &mut dyn PlayerHost) {
        if category == CollisionCategory::Ground {
            self.on_ground_contact(host);
        }
    }

    /// Leave the current state for `next`
    ///
    /// Runs the exit hook of the old state, then the enter hook of `next`,
    /// even when `next` is the current state.
    pub fn change_state(&mut self, next: PlayerState, host: &mut dyn PlayerHost) {
        let current = self.state;

        current.on_exit(self, next, host);
        next.on_enter(self, Some(current), host);

        self.previous_state = Some(current);
        self.state = next;
        self.state_time = 0.0;

        debug!("Player state {} -> {}", current.name(), next.name());
    }

    /// Push the player with `force` scaled by the configured speed
    pub fn apply_impulse(&mut self, force: Vec2, host: &mut dyn PlayerHost) {
        let impulse = force * self.config.speed;
        trace!("Player impulse {impulse}");
        host.apply_impulse(impulse);
    }

    /// Kill the player (death conditions are decided by the caller)
    pub fn die(&mut self, host: &mut dyn PlayerHost) {
        if !self.is_dead() {
            info!("Player died while {}", self.state.name());
            self.change_state(PlayerState::Dead, host);
        }
    }

    /// Put the player back on its feet
    pub fn respawn(&mut self, host: &mut dyn PlayerHost) {
        if self.state != PlayerState::Standing {
            self.change_state(PlayerState::Standing, host);
        }
        self.drag_anchor = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::host::testing::{HostEvent, RecordingHost};
    use approx::assert_relative_eq;

    const SPEED: f32 = 2.0;

    fn setup() -> (PlayerController, RecordingHost) {
        let mut host = RecordingHost::default();
        let controller =
            PlayerController::initialize(PlayerConfig::new(5.0, 4.0, SPEED), &mut host).unwrap();
        (controller, host)
    }

    fn drag(controller: &mut PlayerController, host: &mut RecordingHost, from: Vec2, to: Vec2) {
        controller.on_gesture_begin(from, host);
        controller.on_gesture_move((from + to) / 2.0, host);
        controller.on_gesture_end(to, host);
    }

    #[test]
    fn test_initial_state() {
        let (controller, host) = setup();
        assert_eq!(controller.state(), PlayerState::Standing);
        assert_eq!(controller.previous_state(), None);
        assert_eq!(
            host.events,
            vec![HostEvent::Entered(PlayerState::Standing, None)]
        );
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let mut host = RecordingHost::default();
        let result = PlayerController::initialize(PlayerConfig::new(0.0, 4.0, 1.0), &mut host);
        assert!(result.is_err());
        assert!(host.events.is_empty());
    }

    #[test]
    fn test_long_drag_is_capped() {
        let (mut controller, mut host) = setup();
        drag(&mut controller, &mut host, Vec2::ZERO, Vec2::new(10.0, 0.0));

        let impulses = host.impulses();
        assert_eq!(impulses.len(), 1);
        assert_relative_eq!(impulses[0].x, -5.0 * SPEED, epsilon = 1e-5);
        assert_relative_eq!(impulses[0].y, 0.0);
        assert_eq!(controller.state(), PlayerState::Jumping);
    }

    #[test]
    fn test_short_drag_is_not_scaled() {
        let (mut controller, mut host) = setup();
        drag(&mut controller, &mut host, Vec2::ZERO, Vec2::new(2.0, 0.0));

        let impulses = host.impulses();
        assert_eq!(impulses.len(), 1);
        assert_relative_eq!(impulses[0].x, -2.0 * SPEED, epsilon = 1e-5);
        assert_eq!(controller.state(), PlayerState::Jumping);
    }

    #[test]
    fn test_zero_length_drag_still_launches() {
        let (mut controller, mut host) = setup();
        drag(&mut controller, &mut host, Vec2::ONE, Vec2::ONE);

        assert_eq!(host.impulses(), vec![Vec2::ZERO]);
        assert_eq!(controller.state(), PlayerState::Jumping);
    }

    #[test]
    fn test_impulse_never_exceeds_limit() {
        let (mut controller, mut host) = setup();
        let ends = [
            Vec2::new(0.1, 0.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(-300.0, 400.0),
            Vec2::new(1e5, -1e5),
        ];

        for end in ends {
            controller.respawn(&mut host);
            host.events.clear();
            drag(&mut controller, &mut host, Vec2::ZERO, end);

            let impulse = host.impulses()[0];
            assert!(impulse.length() <= 5.0 * SPEED + 1e-3);
            // launched away from the pull
            assert!(impulse.dot(end) < 0.0);
        }
    }

    #[test]
    fn test_full_flight_sequence() {
        let (mut controller, mut host) = setup();

        drag(&mut controller, &mut host, Vec2::ZERO, Vec2::new(0.0, -10.0));
        assert_eq!(controller.state(), PlayerState::Jumping);

        drag(&mut controller, &mut host, Vec2::ZERO, Vec2::new(0.0, -10.0));
        assert_eq!(controller.state(), PlayerState::Flying);

        // a third drag while flying does nothing
        drag(&mut controller, &mut host, Vec2::ZERO, Vec2::new(0.0, -10.0));
        assert_eq!(controller.state(), PlayerState::Flying);

        let impulses = host.impulses();
        assert_eq!(impulses.len(), 2);
        assert_relative_eq!(impulses[0].y, 5.0 * SPEED, epsilon = 1e-5);
        assert_relative_eq!(impulses[1].y, 4.0 * SPEED, epsilon = 1e-5);

        controller.on_ground_contact(&mut host);
        assert_eq!(controller.state(), PlayerState::Standing);
    }

    #[test]
    fn test_change_state_exit_then_enter() {
        let (mut controller, mut host) = setup();
        host.events.clear();

        controller.change_state(PlayerState::Flying, &mut host);

        assert_eq!(
            host.events,
            vec![
                HostEvent::Exited(PlayerState::Standing, PlayerState::Flying),
                HostEvent::Entered(PlayerState::Flying, Some(PlayerState::Standing)),
            ]
        );
        assert_eq!(controller.state(), PlayerState::Flying);
        assert_eq!(controller.previous_state(), Some(PlayerState::Standing));
    }

    #[test]
    fn test_change_state_to_same_state_runs_hooks() {
        let (mut controller, mut host) = setup();
        host.events.clear();

        controller.change_state(PlayerState::Standing, &mut host);

        assert_eq!(host.transitions().len(), 2);
        assert_eq!(controller.state(), PlayerState::Standing);
    }

    #[test]
    fn test_ground_contact_from_jumping() {
        let (mut controller, mut host) = setup();
        drag(&mut controller, &mut host, Vec2::ZERO, Vec2::new(1.0, 1.0));
        host.events.clear();

        controller.on_ground_contact(&mut host);
        assert_eq!(controller.state(), PlayerState::Standing);
        assert_eq!(host.transitions().len(), 2);

        // landing again while standing is idempotent
        controller.on_ground_contact(&mut host);
        controller.on_ground_contact(&mut host);
        assert_eq!(host.transitions().len(), 2);
        assert_eq!(controller.state(), PlayerState::Standing);
    }

    #[test]
    fn test_only_ground_collisions_land() {
        let (mut controller, mut host) = setup();
        controller.change_state(PlayerState::Flying, &mut host);

        controller.on_collision(CollisionCategory::Hazard, &mut host);
        controller.on_collision(CollisionCategory::Sensor, &mut host);
        controller.on_collision(CollisionCategory::Player, &mut host);
        assert_eq!(controller.state(), PlayerState::Flying);

        controller.on_collision(CollisionCategory::Ground, &mut host);
        assert_eq!(controller.state(), PlayerState::Standing);
    }

    #[test]
    fn test_flying_drag_has_no_effect() {
        let (mut controller, mut host) = setup();
        controller.change_state(PlayerState::Flying, &mut host);
        host.events.clear();

        controller.on_gesture_move(Vec2::new(10.0, 10.0), &mut host);

        assert_eq!(controller.state(), PlayerState::Flying);
        assert!(host.events.is_empty());
    }

    #[test]
    fn test_death_is_terminal() {
        let (mut controller, mut host) = setup();
        controller.die(&mut host);
        assert!(controller.is_dead());
        host.events.clear();

        drag(&mut controller, &mut host, Vec2::ZERO, Vec2::new(10.0, 0.0));
        controller.on_ground_contact(&mut host);
        controller.die(&mut host);
        controller.on_tick(0.1, &mut host);

        assert!(controller.is_dead());
        assert!(host.events.is_empty());
    }

    #[test]
    fn test_respawn_after_death() {
        let (mut controller, mut host) = setup();
        controller.die(&mut host);
        controller.respawn(&mut host);

        assert_eq!(controller.state(), PlayerState::Standing);
        assert_eq!(controller.previous_state(), Some(PlayerState::Dead));
        assert_eq!(controller.drag_anchor(), Vec2::ZERO);
    }

    #[test]
    fn test_gesture_spanning_landing_is_handled_by_new_state() {
        let (mut controller, mut host) = setup();
        drag(&mut controller, &mut host, Vec2::ZERO, Vec2::new(1.0, 0.0));
        assert_eq!(controller.state(), PlayerState::Jumping);

        controller.on_gesture_begin(Vec2::new(10.0, 10.0), &mut host);
        controller.on_ground_contact(&mut host);
        host.events.clear();
        controller.on_gesture_end(Vec2::new(10.0, 12.0), &mut host);

        // standing finishes the drag with the jumping anchor and the jump limit
        assert_eq!(controller.state(), PlayerState::Jumping);
        let impulses = host.impulses();
        assert_eq!(impulses.len(), 1);
        assert_relative_eq!(impulses[0].y, -2.0 * SPEED, epsilon = 1e-5);
    }

    #[test]
    fn test_state_time_resets_on_transition() {
        let (mut controller, mut host) = setup();
        controller.on_tick(0.5, &mut host);
        controller.on_tick(0.25, &mut host);
        assert_relative_eq!(controller.state_time(), 0.75);

        controller.change_state(PlayerState::Jumping, &mut host);
        assert_eq!(controller.state_time(), 0.0);
    }
}
