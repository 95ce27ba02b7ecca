use log::info;

use crate::api::game::{EngineContext, Game, GameConfig};
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue};

/// Generic game runner that wires up the engine loop.
///
/// Each host frame: queued input goes to the game once, then every fixed
/// step runs game update, physics, and the transition tick in that order.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    /// Set once `Game::init` has populated `ctx`.
    ctx_used: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame);

        Self {
            ctx: EngineContext::with_config(&config),
            game,
            input: InputQueue::new(),
            timestep,
            config,
            initialized: false,
            ctx_used: false,
        }
    }

    /// Initialize the game. After a `shutdown` this starts over from an
    /// empty context, so the game's entities and bodies are not duplicated.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        if self.ctx_used {
            self.ctx = EngineContext::with_config(&self.config);
            self.input.drain();
        }
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.ctx_used = true;
        info!(
            "game initialized: {} entities, fixed dt {}s",
            self.ctx.scene.len(),
            self.config.fixed_dt
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame and return how many fixed steps it took.
    /// Negative frame deltas count as zero.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.initialized {
            return 0;
        }

        let events = self.input.drain();
        if !events.is_empty() {
            self.game.handle_input(&mut self.ctx, &events);
        }

        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for _ in 0..steps {
            self.game.update(&mut self.ctx, step_dt);
            #[cfg(feature = "physics")]
            self.ctx.step_physics();
            self.ctx.tick_transitions(step_dt);
        }
        steps
    }

    /// Stop the session. Running transitions are cancelled without their
    /// completion callbacks; later ticks do nothing until `init` starts a
    /// fresh session.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.ctx.transitions.cancel_all();
        self.timestep.reset();
        self.initialized = false;
        info!("game shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }
}

impl<G: Game> Drop for GameRunner<G> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
