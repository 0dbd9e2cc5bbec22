//! Host-side stand-ins for the read-aloud collaborators: a simulated speech
//! engine, a styled text buffer and a logging haptic engine.

pub mod canvas;
pub mod haptics;
pub mod speech;

use readaloud_core::{
    app::ReadAloudApp, canvas::TextCanvas, haptics::HapticFeedback, input::GestureSource,
    speech::Channel,
};

pub use canvas::{CanvasError, FontFace, StyledBuffer};
pub use haptics::LogHaptics;
pub use speech::{SimEvent, SimSpeechError, SimulatedSpeech};

pub type SimApp<G> = ReadAloudApp<SimulatedSpeech, SimulatedSpeech, StyledBuffer, LogHaptics, G>;

/// Deliver up to `steps` rounds of engine progress to the app, one event per
/// channel per round. Returns the number of events delivered.
pub fn pump<C, H, G>(
    app: &mut ReadAloudApp<SimulatedSpeech, SimulatedSpeech, C, H, G>,
    steps: usize,
) -> usize
where
    C: TextCanvas,
    H: HapticFeedback,
    G: GestureSource,
{
    let mut delivered = 0;
    for _ in 0..steps {
        let main = app.main_engine_mut().next_event();
        let preview = app.preview_engine_mut().next_event();
        if main.is_none() && preview.is_none() {
            break;
        }
        if let Some(event) = main {
            app.on_speech_event(Channel::Main, event.as_speech_event());
            delivered += 1;
        }
        if let Some(event) = preview {
            app.on_speech_event(Channel::Preview, event.as_speech_event());
            delivered += 1;
        }
    }
    delivered
}
