//! The per-frame game state machine.
//!
//! A [`Session`] owns every entity. Each call to [`Session::tick`] applies
//! at most one buffered click, runs exactly one phase block and appends that
//! frame's sprites to the drawing queue, back to front.

use super::spawner::PipeSpawner;
use super::types::GamePhase;
use crate::assets::Assets;
use crate::core::config::GameConfig;
use crate::core::constants::{ENDING_DELAY_MS, SCROLL_TICK_DIVISOR};
use crate::entities::{Banner, Bird, DrawQueue, Pipe, ScoreDisplay, Scroller};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub struct Session {
    /// Changed only through `set_phase`, which checks the transition.
    phase: GamePhase,
    /// Ticks since the current run (or the session) started.
    pub ticks: u64,
    pub bird: Bird,
    /// Active pipes, oldest first. Removal is only ever from the front.
    pub pipes: VecDeque<Pipe>,
    pub score: ScoreDisplay,
    pub background: Scroller,
    pub base: Scroller,
    pub message: Banner,
    pub game_over: Banner,
    pub spawner: PipeSpawner,
    /// When the Ending phase may give way to Ended.
    pub ending_deadline: Option<Instant>,
    queue: DrawQueue,
    config: GameConfig,
    assets: Assets,
    rng: StdRng,
}

impl Session {
    /// Build a session in the Starting phase. The pipe RNG is seeded from
    /// `config.seed` when present.
    pub fn new(config: GameConfig, assets: Assets) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            phase: GamePhase::Starting,
            ticks: 0,
            bird: Bird::new(&config, &assets),
            pipes: VecDeque::new(),
            score: ScoreDisplay::new(&config, &assets),
            background: Scroller::new(assets.background.clone(), 0, config.background_speed),
            base: Scroller::new(assets.base.clone(), config.base_height, config.base_speed),
            message: Banner::centered(&config, assets.message.clone()),
            game_over: Banner::centered(&config, assets.game_over.clone()),
            spawner: PipeSpawner::new(&config, &assets),
            ending_deadline: None,
            queue: DrawQueue::new(),
            config,
            assets,
            rng,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Sprites queued since the last [`Session::clear_drawing_queue`].
    pub fn drawing_queue(&self) -> &DrawQueue {
        &self.queue
    }

    pub fn clear_drawing_queue(&mut self) {
        self.queue.clear();
    }

    /// Advance one frame. `click` is the buffered click for this tick, if
    /// any; `now` drives the non-blocking game-over delay.
    pub fn tick(&mut self, click: bool, now: Instant) {
        if click {
            self.handle_click();
        }

        self.ticks += 1;

        match self.phase {
            GamePhase::Starting => self.tick_starting(),
            GamePhase::Running => self.tick_running(),
            GamePhase::Ending => self.tick_ending(now),
            GamePhase::Ended => self.tick_ended(),
        }
    }

    fn handle_click(&mut self) {
        match self.phase {
            GamePhase::Starting => {
                self.ticks = 0;
                self.set_phase(GamePhase::Running);
                self.bird.fly();
            }
            GamePhase::Running => self.bird.fly(),
            GamePhase::Ending => {}
            GamePhase::Ended => self.restart(),
        }
    }

    fn restart(&mut self) {
        self.pipes.clear();
        self.score.set_score(0);
        self.bird = Bird::new(&self.config, &self.assets);
        self.ending_deadline = None;
        self.ticks = 0;
        self.set_phase(GamePhase::Starting);
    }

    fn set_phase(&mut self, next: GamePhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {} -> {}",
            self.phase,
            next
        );
        log::info!(
            "Phase {} -> {} (score {}, tick {})",
            self.phase,
            next,
            self.score(),
            self.ticks
        );
        self.phase = next;
    }

    fn is_scroll_tick(&self) -> bool {
        self.ticks % SCROLL_TICK_DIVISOR == 0
    }

    fn tick_starting(&mut self) {
        if self.is_scroll_tick() {
            self.base.update();
            self.background.update();
        }

        self.queue.add(&self.background);
        self.queue.add(&self.base);
        self.queue.add(&self.message);
    }

    fn tick_running(&mut self) {
        if self.ticks % self.config.pipe_spawn_rate == 0 {
            let pair = self.spawner.spawn_pair(&mut self.rng);
            self.pipes.extend(pair);
            self.score.increment();
        }

        self.bird.update();

        if self.has_collided() {
            self.set_phase(GamePhase::Ending);
        }

        if self.is_scroll_tick() {
            self.base.update();
            self.background.update();
            for pipe in &mut self.pipes {
                pipe.update();
            }
            while self.pipes.front().is_some_and(Pipe::is_off_bound) {
                self.pipes.pop_front();
            }
        }

        self.queue_playfield();
    }

    /// Ground first, then pipes; the first hit decides.
    fn has_collided(&self) -> bool {
        let bird = self.bird.rect();
        self.base.intersects(bird) || self.pipes.iter().any(|pipe| pipe.rect().intersects(bird))
    }

    fn tick_ending(&mut self, now: Instant) {
        self.bird.update();
        self.queue_playfield();

        if self.bird.rect().y > self.config.height {
            let deadline = *self
                .ending_deadline
                .get_or_insert(now + Duration::from_millis(ENDING_DELAY_MS));
            if now >= deadline {
                self.set_phase(GamePhase::Ended);
            }
        }
    }

    fn tick_ended(&mut self) {
        self.queue.add(&self.game_over);
        self.queue.add(&self.score);
    }

    /// Background, pipes oldest first, ground, bird, score.
    fn queue_playfield(&mut self) {
        self.queue.add(&self.background);
        for pipe in &self.pipes {
            self.queue.add(pipe);
        }
        self.queue.add(&self.base);
        self.queue.add(&self.bird);
        self.queue.add(&self.score);
    }
}
