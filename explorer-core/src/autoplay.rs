//! Timed auto-play for the hero carousel.
//!
//! A [`CarouselController`] task owns one [`Carousel`], advances it on a
//! fixed-period interval and applies manual commands as they arrive. Manual
//! commands never re-arm the interval, so the next automatic tick stays on
//! schedule. The task lives exactly as long as its [`CarouselHandle`]:
//! dropping or cancelling the handle aborts the task.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::carousel::Carousel;
use crate::common::error::{ExplorerError, Result};

/// Time between automatic slide changes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Next,
    Previous,
    GoTo(usize),
    Pause,
    Resume,
}

/// What a view needs to render the carousel: the slide and the auto-play flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Playback {
    pub carousel: Carousel,
    pub playing: bool,
}

pub struct CarouselController {
    carousel: Carousel,
    period: Duration,
    first_tick: Instant,
    playing: bool,
    commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<Playback>,
}

impl CarouselController {
    /// Starts auto-play. The first automatic advance happens one `period`
    /// after this call.
    pub fn spawn(carousel: Carousel, period: Duration) -> CarouselHandle {
        // tokio intervals reject a zero period
        let period = period.max(Duration::from_millis(1));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let initial = Playback {
            carousel,
            playing: true,
        };
        let (state_tx, state_rx) = watch::channel(initial);

        let controller = CarouselController {
            carousel,
            period,
            first_tick: Instant::now() + period,
            playing: true,
            commands: command_rx,
            state: state_tx,
        };
        let task = tokio::spawn(controller.run());

        CarouselHandle {
            commands: command_tx,
            state: state_rx,
            task: Some(task),
        }
    }

    fn ticker(start: Instant, period: Duration) -> Interval {
        let mut ticker = time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }

    async fn run(mut self) {
        let mut ticker = Self::ticker(self.first_tick, self.period);

        loop {
            tokio::select! {
                _ = ticker.tick(), if self.playing => {
                    self.carousel = self.carousel.tick();
                    debug!(slide = self.carousel.index(), "Carousel auto-advanced");
                }
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    match command {
                        Command::Next => self.carousel = self.carousel.next(),
                        Command::Previous => self.carousel = self.carousel.previous(),
                        Command::GoTo(index) => {
                            self.carousel = self.carousel.go_to(index).unwrap_or(self.carousel);
                        }
                        Command::Pause => self.playing = false,
                        Command::Resume => {
                            if !self.playing {
                                self.playing = true;
                                ticker = Self::ticker(Instant::now() + self.period, self.period);
                            }
                        }
                    }
                    debug!(?command, slide = self.carousel.index(), "Carousel command applied");
                }
            }

            self.state.send_replace(Playback {
                carousel: self.carousel,
                playing: self.playing,
            });
        }

        debug!("Carousel controller stopped");
    }
}

/// Owner of a running [`CarouselController`]. Dropping it stops the task.
#[derive(Debug)]
pub struct CarouselHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<Playback>,
    task: Option<JoinHandle<()>>,
}

impl CarouselHandle {
    pub fn current(&self) -> Carousel {
        self.state.borrow().carousel
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    /// Receives every state change, starting with the current state.
    pub fn subscribe(&self) -> watch::Receiver<Playback> {
        let mut receiver = self.state.clone();
        receiver.mark_changed();
        receiver
    }

    pub fn next(&self) -> Result<()> {
        self.send(Command::Next)
    }

    pub fn previous(&self) -> Result<()> {
        self.send(Command::Previous)
    }

    pub fn go_to(&self, index: usize) -> Result<()> {
        self.current().go_to(index)?;
        self.send(Command::GoTo(index))
    }

    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.send(Command::Resume)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the controller and waits until its task is gone.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| ExplorerError::ControllerClosed)
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_default() -> CarouselHandle {
        CarouselController::spawn(Carousel::new(3).unwrap(), DEFAULT_INTERVAL)
    }

    // The paused clock can round a deadline up to the next millisecond.
    fn assert_elapsed(since: Instant, expected: Duration) {
        let elapsed = since.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "elapsed {:?}, expected {:?}",
            elapsed,
            expected
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_advances_once_per_period() {
        let handle = spawn_default();
        let mut rx = handle.subscribe();
        assert_eq!(rx.borrow_and_update().carousel.index(), 0);
        let start = Instant::now();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().carousel.index(), 1);
        assert_elapsed(start, DEFAULT_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_ticks_return_to_first_slide() {
        let handle = spawn_default();
        let mut rx = handle.subscribe();
        rx.borrow_and_update();

        for expected in [1, 2, 0] {
            rx.changed().await.unwrap();
            assert_eq!(rx.borrow_and_update().carousel.index(), expected);
        }
        assert_eq!(handle.current().index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_change_does_not_reset_timer() {
        let handle = spawn_default();
        let mut rx = handle.subscribe();
        rx.borrow_and_update();
        let start = Instant::now();

        time::advance(Duration::from_millis(3000)).await;
        handle.next().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().carousel.index(), 1);

        // The automatic tick still lands 5 s after spawn.
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().carousel.index(), 2);
        assert_elapsed(start, DEFAULT_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_and_go_to() {
        let handle = spawn_default();
        let mut rx = handle.subscribe();
        rx.borrow_and_update();

        handle.previous().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().carousel.index(), 2);

        handle.go_to(1).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().carousel.index(), 1);

        assert!(matches!(
            handle.go_to(3),
            Err(ExplorerError::SlideOutOfRange { index: 3, len: 3 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_and_resume_rearms() {
        let handle = spawn_default();
        let mut rx = handle.subscribe();
        rx.borrow_and_update();
        assert!(handle.is_playing());

        handle.pause().unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().playing);

        time::advance(Duration::from_secs(20)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(handle.current().index(), 0);

        handle.resume().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().playing);
        let resumed_at = Instant::now();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().carousel.index(), 1);
        assert_elapsed(resumed_at, DEFAULT_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_the_task() {
        let handle = spawn_default();
        let mut rx = handle.subscribe();
        rx.borrow_and_update();
        assert!(handle.is_running());

        handle.shutdown().await;
        time::advance(Duration::from_secs(30)).await;

        assert!(rx.changed().await.is_err());
        assert_eq!(rx.borrow().carousel.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_the_task() {
        let handle = spawn_default();
        let mut rx = handle.subscribe();
        rx.borrow_and_update();

        drop(handle);
        assert!(rx.changed().await.is_err());
    }
}
