use log::{debug, info};
use readaloud_core::{input::GestureSource, playback::PlaybackState};
use readaloud_sim::{SimApp, pump};

use crate::script::Step;

/// Rounds allowed for trailing speech once the script is exhausted.
const MAX_DRAIN_ROUNDS: usize = 10_000;

pub struct Driver {
    steps_per_event: usize,
    context_lines: usize,
}

impl Driver {
    pub const fn new(steps_per_event: usize, context_lines: usize) -> Self {
        Self {
            steps_per_event,
            context_lines,
        }
    }

    /// Feed every step to the app, printing the visible text after each.
    pub fn run<G: GestureSource>(&self, app: &mut SimApp<G>, steps: &[Step]) {
        for step in steps {
            let rounds = match *step {
                Step::Gesture(event) => {
                    debug!("driver: gesture {:?}", event);
                    app.handle_gesture(event);
                    self.steps_per_event
                }
                Step::Wait(rounds) => rounds,
            };
            let delivered = pump(app, rounds);
            debug!("driver: delivered {} speech events", delivered);
            self.report(app);
        }

        let mut drained = 0;
        while app.playback_state() != PlaybackState::Idle && drained < MAX_DRAIN_ROUNDS {
            if pump(app, 1) == 0 {
                break;
            }
            drained += 1;
        }
        if drained > 0 {
            self.report(app);
        }
        info!(
            "driver: done state={:?} resume_point={:?}",
            app.playback_state(),
            app.playback().resume_point()
        );
    }

    fn report<G: GestureSource>(&self, app: &mut SimApp<G>) {
        while let Some(notice) = app.poll_notice() {
            info!("notice: {:?}", notice);
        }
        println!(
            "[{:?}] {}",
            app.playback_state(),
            app.canvas()
                .render_window(self.context_lines, self.context_lines)
        );
    }
}
