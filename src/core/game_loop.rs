//! Fixed-rate loop driver.
//!
//! The driver owns pacing and input buffering and nothing else. Game logic
//! sits behind [`GameLoop`], input behind [`InputSource`] and presentation
//! behind [`Renderer`], so the terminal game and the tests share one loop.

use crate::entities::{DrawQueue, Sprite};
use crate::game::{GamePhase, Session};
use std::io;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Input the core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary click (mouse button or flap key).
    Click,
    /// Leave the game.
    Quit,
}

/// Delivers input events to the loop.
pub trait InputSource {
    /// Wait up to `timeout` for the next event. `Ok(None)` means no event
    /// arrived in time; a zero timeout must not block.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

/// Per-frame numbers shown next to the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u32,
}

/// Presents one frame.
pub trait Renderer {
    /// Draw `sprites` back to front.
    fn present(&mut self, sprites: &[Sprite], hud: &Hud) -> io::Result<()>;
}

/// Core game loop seam, implemented by [`Session`].
pub trait GameLoop {
    /// Advance one tick with this tick's buffered click.
    fn tick(&mut self, click: bool, now: Instant);

    fn drawing_queue(&self) -> &DrawQueue;

    fn clear_drawing_queue(&mut self);

    fn hud(&self) -> Hud;
}

impl GameLoop for Session {
    fn tick(&mut self, click: bool, now: Instant) {
        Session::tick(self, click, now);
    }

    fn drawing_queue(&self) -> &DrawQueue {
        Session::drawing_queue(self)
    }

    fn clear_drawing_queue(&mut self) {
        Session::clear_drawing_queue(self);
    }

    fn hud(&self) -> Hud {
        Hud {
            phase: self.phase(),
            score: self.score(),
        }
    }
}

/// One-slot click buffer. Any number of clicks between two ticks count as
/// one, and a click is consumed by exactly one tick.
#[derive(Debug, Default)]
pub struct ClickLatch {
    pending: bool,
}

impl ClickLatch {
    pub fn press(&mut self) {
        self.pending = true;
    }

    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Why [`FixedRateLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub quit: bool,
}

/// Ticks a [`GameLoop`] at a fixed rate.
///
/// Each frame: drain pending input, tick, present, clear the queue, then
/// wait out the rest of the interval while still collecting input. A frame
/// that overruns its interval is simply late; there is no catch-up.
#[derive(Debug)]
pub struct FixedRateLoop {
    interval: Duration,
    latch: ClickLatch,
    max_frames: Option<u64>,
}

impl FixedRateLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            latch: ClickLatch::default(),
            max_frames: None,
        }
    }

    /// Stop after `frames` frames.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn run<G, I, R>(
        &mut self,
        game: &mut G,
        input: &mut I,
        renderer: &mut R,
    ) -> io::Result<LoopSummary>
    where
        G: GameLoop,
        I: InputSource,
        R: Renderer,
    {
        let mut frames = 0u64;

        loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                return Ok(LoopSummary { frames, quit: false });
            }

            let frame_start = Instant::now();
            if self.pump_input(input, frame_start).is_break() {
                return Ok(LoopSummary { frames, quit: true });
            }

            game.tick(self.latch.take(), frame_start);
            renderer.present(game.drawing_queue().sprites(), &game.hud())?;
            game.clear_drawing_queue();
            frames += 1;

            let elapsed = frame_start.elapsed();
            if elapsed > self.interval {
                log::trace!("Frame {frames} overran by {:?}", elapsed - self.interval);
            }

            if self
                .pump_input(input, frame_start + self.interval)
                .is_break()
            {
                return Ok(LoopSummary { frames, quit: true });
            }
        }
    }

    /// Collect input until `deadline`, then drain whatever is still pending.
    fn pump_input<I: InputSource>(&mut self, input: &mut I, deadline: Instant) -> ControlFlow<()> {
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            match input.next_event(timeout) {
                Ok(Some(InputEvent::Click)) => self.latch.press(),
                Ok(Some(InputEvent::Quit)) => return ControlFlow::Break(()),
                Ok(None) => {
                    if timeout.is_zero() {
                        return ControlFlow::Continue(());
                    }
                }
                Err(e) => {
                    log::warn!("Input poll failed, sleeping out the frame: {e}");
                    std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    return ControlFlow::Continue(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Counts ticks and records which ones saw a click.
    #[derive(Default)]
    struct CountingGame {
        ticks: u64,
        clicks: Vec<u64>,
        queue: DrawQueue,
        cleared: u64,
    }

    impl GameLoop for CountingGame {
        fn tick(&mut self, click: bool, _now: Instant) {
            self.ticks += 1;
            if click {
                self.clicks.push(self.ticks);
            }
        }

        fn drawing_queue(&self) -> &DrawQueue {
            &self.queue
        }

        fn clear_drawing_queue(&mut self) {
            self.cleared += 1;
        }

        fn hud(&self) -> Hud {
            Hud {
                phase: GamePhase::Running,
                score: 0,
            }
        }
    }

    /// Each event becomes available once `.0` frames have been presented.
    struct ScriptedInput {
        events: VecDeque<(u64, InputEvent)>,
        presented: Rc<Cell<u64>>,
        errors: u32,
    }

    impl InputSource for ScriptedInput {
        fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
            if self.errors > 0 {
                self.errors -= 1;
                return Err(io::Error::new(io::ErrorKind::Other, "poll failed"));
            }
            if let Some(&(frame, event)) = self.events.front() {
                if frame <= self.presented.get() {
                    self.events.pop_front();
                    return Ok(Some(event));
                }
            }
            std::thread::sleep(timeout);
            Ok(None)
        }
    }

    struct CountingRenderer {
        presented: Rc<Cell<u64>>,
    }

    impl Renderer for CountingRenderer {
        fn present(&mut self, _sprites: &[Sprite], _hud: &Hud) -> io::Result<()> {
            self.presented.set(self.presented.get() + 1);
            Ok(())
        }
    }

    fn harness(events: Vec<(u64, InputEvent)>) -> (ScriptedInput, CountingRenderer) {
        let presented = Rc::new(Cell::new(0));
        (
            ScriptedInput {
                events: events.into(),
                presented: Rc::clone(&presented),
                errors: 0,
            },
            CountingRenderer { presented },
        )
    }

    #[test]
    fn test_latch_consumes_once() {
        let mut latch = ClickLatch::default();
        assert!(!latch.take());
        latch.press();
        latch.press();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_frame_limit_and_clearing() {
        let mut driver = FixedRateLoop::new(Duration::from_millis(1)).with_frame_limit(5);
        let mut game = CountingGame::default();
        let (mut input, mut renderer) = harness(vec![]);

        let summary = driver.run(&mut game, &mut input, &mut renderer).unwrap();
        assert_eq!(summary, LoopSummary { frames: 5, quit: false });
        assert_eq!(game.ticks, 5);
        assert_eq!(renderer.presented.get(), 5);
        assert_eq!(game.cleared, 5);
    }

    #[test]
    fn test_clicks_collapse_per_tick() {
        let mut driver = FixedRateLoop::new(Duration::from_millis(1)).with_frame_limit(3);
        let mut game = CountingGame::default();
        let (mut input, mut renderer) = harness(vec![
            (0, InputEvent::Click),
            (0, InputEvent::Click),
            (0, InputEvent::Click),
            (2, InputEvent::Click),
        ]);

        driver.run(&mut game, &mut input, &mut renderer).unwrap();
        assert_eq!(game.clicks, vec![1, 3]);
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut driver = FixedRateLoop::new(Duration::from_millis(1)).with_frame_limit(10);
        let mut game = CountingGame::default();
        let (mut input, mut renderer) = harness(vec![(1, InputEvent::Quit)]);

        let summary = driver.run(&mut game, &mut input, &mut renderer).unwrap();
        assert!(summary.quit);
        assert_eq!(summary.frames, 1);
    }

    #[test]
    fn test_input_errors_do_not_stop_loop() {
        let mut driver = FixedRateLoop::new(Duration::from_millis(1)).with_frame_limit(3);
        let mut game = CountingGame::default();
        let (mut input, mut renderer) = harness(vec![]);
        input.errors = 4;

        let summary = driver.run(&mut game, &mut input, &mut renderer).unwrap();
        assert_eq!(summary.frames, 3);
    }

    #[test]
    fn test_holds_target_rate() {
        let interval = Duration::from_millis(10);
        let mut driver = FixedRateLoop::new(interval).with_frame_limit(5);
        let mut game = CountingGame::default();
        let (mut input, mut renderer) = harness(vec![]);

        let started = Instant::now();
        driver.run(&mut game, &mut input, &mut renderer).unwrap();
        assert!(started.elapsed() >= interval * 5);
    }

    /// Stalls on one tick and records when every tick started.
    struct StallingGame {
        stall_on: usize,
        stall: Duration,
        starts: Vec<Instant>,
        queue: DrawQueue,
    }

    impl GameLoop for StallingGame {
        fn tick(&mut self, _click: bool, now: Instant) {
            self.starts.push(now);
            if self.starts.len() == self.stall_on {
                std::thread::sleep(self.stall);
            }
        }

        fn drawing_queue(&self) -> &DrawQueue {
            &self.queue
        }

        fn clear_drawing_queue(&mut self) {}

        fn hud(&self) -> Hud {
            Hud {
                phase: GamePhase::Running,
                score: 0,
            }
        }
    }

    #[test]
    fn test_overrun_frame_is_not_caught_up() {
        let interval = Duration::from_millis(20);
        let mut driver = FixedRateLoop::new(interval).with_frame_limit(5);
        let mut game = StallingGame {
            stall_on: 2,
            stall: interval * 3,
            starts: Vec::new(),
            queue: DrawQueue::default(),
        };
        let (mut input, mut renderer) = harness(vec![]);

        driver.run(&mut game, &mut input, &mut renderer).unwrap();

        let gaps: Vec<Duration> = game.starts.windows(2).map(|w| w[1] - w[0]).collect();
        assert_eq!(gaps.len(), 4);
        // The stalled frame is late by its whole overrun.
        assert!(gaps[1] >= interval * 3, "{gaps:?}");
        // Later frames keep the normal spacing instead of bunching up.
        for gap in &gaps[2..] {
            assert!(*gap >= interval, "{gaps:?}");
        }
    }
}
