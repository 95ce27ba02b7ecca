//! The button course: a player capsule on a floor with one pressure button.

use glam::Vec3;
use log::debug;

use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial, CollisionPair};
use crate::input::queue::InputEvent;
use crate::input::router::{GameplayEvent, InputRouter};
use super::config::CourseConfig;
use super::jump::Jump;
use super::locomotion::Locomotion;
use super::trigger::ButtonTrigger;

const GROUND_HALF_EXTENTS: Vec3 = Vec3::new(20.0, 0.5, 20.0);
const SENSOR_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 0.25, 0.5);
/// Height of the button top above the button position.
const TOP_HEIGHT: f32 = 0.3;
const PLAYER_HALF_HEIGHT: f32 = 0.5;
const PLAYER_RADIUS: f32 = 0.3;

pub struct ButtonCourse {
    config: CourseConfig,
    router: InputRouter,
    locomotion: Locomotion,
    jump: Jump,
    button: Option<ButtonTrigger>,
    player: Option<EntityId>,
    paused: bool,
}

impl ButtonCourse {
    pub fn new(config: CourseConfig) -> Self {
        Self {
            router: InputRouter::new(config.input),
            locomotion: Locomotion::new(config.locomotion),
            jump: Jump::new(config.jump),
            button: None,
            player: None,
            paused: false,
            config,
        }
    }

    pub fn config(&self) -> &CourseConfig {
        &self.config
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn button(&self) -> Option<&ButtonTrigger> {
        self.button.as_ref()
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn handle_gameplay_event(&mut self, event: GameplayEvent) {
        if let GameplayEvent::PauseToggled(paused) = event {
            self.paused = paused;
        }
        self.locomotion.handle_event(&event);
        self.jump.handle_event(&event);
    }

    fn handle_collisions(&mut self, ctx: &mut EngineContext) {
        let Some(button) = self.button.as_mut() else { return };
        let pairs: Vec<CollisionPair> = ctx.collisions().to_vec();

        for pair in pairs.iter().filter(|p| p.sensor) {
            let Some(other) = pair.other(button.base()) else { continue };
            if pair.started {
                button.on_enter(other, &ctx.scene, &mut ctx.transitions);
            } else if let Some(detonation) = button.on_exit(&mut ctx.scene, &mut ctx.transitions) {
                debug!("button pushes {} with {:?}", detonation.body, detonation.force);
                detonation.apply(ctx);
            }
        }
    }
}

impl Default for ButtonCourse {
    fn default() -> Self {
        Self::new(CourseConfig::default())
    }
}

impl Game for ButtonCourse {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 0.02,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let ground = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(ground)
                .with_tag("ground")
                .with_pos(Vec3::new(0.0, -GROUND_HALF_EXTENTS.y, 0.0)),
            BodyDesc::fixed(ColliderDesc::Cuboid {
                half_extents: GROUND_HALF_EXTENTS,
            }),
            ColliderMaterial::default(),
        );

        let origin = self.config.button_position;
        let base = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(base)
                .with_tag("button_base")
                .with_pos(origin + Vec3::new(0.0, SENSOR_HALF_EXTENTS.y, 0.0)),
            BodyDesc::fixed(ColliderDesc::Cuboid {
                half_extents: SENSOR_HALF_EXTENTS,
            })
            .with_sensor(true),
            ColliderMaterial::default(),
        );

        // No body: physics sync would overwrite the pose the press writes.
        let top = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(top)
                .with_tag("button_top")
                .with_pos(origin + Vec3::new(0.0, TOP_HEIGHT, 0.0)),
        );

        let player = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(player)
                .with_tag("player")
                .with_pos(self.config.player_spawn),
            BodyDesc::dynamic(ColliderDesc::CapsuleY {
                half_height: PLAYER_HALF_HEIGHT,
                radius: PLAYER_RADIUS,
            })
            .with_fixed_rotation(true),
            ColliderMaterial::default(),
        );

        self.button = Some(ButtonTrigger::new(self.config.button, base, top));
        self.player = Some(player);
    }

    fn handle_input(&mut self, _ctx: &mut EngineContext, events: &[InputEvent]) {
        self.router.route_all(events);
        let gameplay: Vec<GameplayEvent> = self.router.drain_gameplay_events().collect();
        for event in gameplay {
            self.handle_gameplay_event(event);
        }
        for event in self.router.drain_ui_events() {
            debug!("ui event {:?} has no handler in the course", event);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, dt: f32) {
        self.handle_collisions(ctx);

        if self.paused {
            return;
        }
        let Some(player) = self.player else { return };
        self.locomotion.fixed_update(player, ctx, dt);
        self.jump.fixed_update(player, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::body::BodyDriver;
    use crate::runner::GameRunner;
    use glam::Vec2;

    const DT: f32 = 0.02;

    fn course_with_spawn(spawn: Vec3) -> GameRunner<ButtonCourse> {
        let config = CourseConfig {
            player_spawn: spawn,
            ..CourseConfig::default()
        };
        let mut runner = GameRunner::new(ButtonCourse::new(config));
        runner.init();
        runner
    }

    fn run(runner: &mut GameRunner<ButtonCourse>, frames: usize) {
        for _ in 0..frames {
            runner.tick(DT);
        }
    }

    fn top_y(runner: &GameRunner<ButtonCourse>) -> f32 {
        let top = runner.game().button().unwrap().top();
        runner.context().scene.get(top).unwrap().pos.y
    }

    #[test]
    fn init_spawns_the_course() {
        let runner = course_with_spawn(Vec3::new(0.0, 1.0, -3.0));
        let scene = &runner.context().scene;
        assert_eq!(scene.len(), 4);
        for tag in ["ground", "button_base", "button_top", "player"] {
            assert!(scene.find_by_tag(tag).is_some(), "missing {}", tag);
        }
        assert!(runner.game().player().is_some());
    }

    #[test]
    fn restart_does_not_duplicate_the_course() {
        let mut runner = course_with_spawn(Vec3::new(0.0, 1.0, -3.0));
        run(&mut runner, 5);
        runner.shutdown();
        runner.init();

        assert_eq!(runner.context().scene.len(), 4);
        assert_eq!(runner.context().physics.body_count(), 3);
        let player = runner.game().player().unwrap();
        assert!(runner.context().scene.get(player).is_some());
    }

    #[test]
    fn landing_on_the_button_presses_it_and_leaving_resets_it() {
        let mut runner = course_with_spawn(Vec3::new(0.0, 1.5, 0.0));
        run(&mut runner, 60);

        let button = runner.game().button().unwrap();
        assert!(button.is_pressed());
        assert_eq!(button.armed(), runner.game().player());
        let pressed = TOP_HEIGHT - button.config().travel_distance;
        assert!((top_y(&runner) - pressed).abs() < 1e-5, "top y={}", top_y(&runner));

        let player = runner.game().player().unwrap();
        let body = runner.context().scene.get(player).unwrap().body.unwrap();
        runner
            .context_mut()
            .physics
            .set_velocity(&body, Vec3::new(30.0, 0.0, 0.0));
        run(&mut runner, 20);

        assert!(!runner.game().button().unwrap().is_pressed());
        assert_eq!(runner.game().button().unwrap().armed(), Some(player));
        assert_eq!(top_y(&runner), TOP_HEIGHT);
    }

    #[test]
    fn move_input_pushes_the_player() {
        let mut runner = course_with_spawn(Vec3::new(0.0, 0.8, -5.0));
        run(&mut runner, 30);

        runner.push_input(InputEvent::axis("Move", Vec2::new(0.0, 1.0)));
        run(&mut runner, 5);

        let player = runner.game().player().unwrap();
        assert!(runner.context().velocity(player).z > 0.5);
    }

    #[test]
    fn pause_stops_the_controllers() {
        let mut runner = course_with_spawn(Vec3::new(0.0, 0.8, -5.0));
        run(&mut runner, 30);

        runner.push_input(InputEvent::performed("Pause"));
        runner.push_input(InputEvent::axis("Move", Vec2::new(0.0, 1.0)));
        run(&mut runner, 5);

        assert!(runner.game().is_paused());
        let player = runner.game().player().unwrap();
        assert!(runner.context().velocity(player).z.abs() < 1e-3);
    }
}
