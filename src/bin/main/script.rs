use anyhow::{Context, Result, bail};
use readaloud_core::input::GestureEvent;

/// One entry of a gesture script.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Gesture(GestureEvent),
    /// Let the engines run for this many rounds without new input.
    Wait(usize),
}

/// Parse a comma separated script such as `tap,wait:3,pan:25,end,tap`.
///
/// `pan:X` reports a horizontal drag of `X` points from the gesture origin,
/// `end` lifts the finger.
pub fn parse(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(token: &str) -> Result<Step> {
    let (name, arg) = match token.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (token, None),
    };

    match (name, arg) {
        ("tap", None) => Ok(Step::Gesture(GestureEvent::Tap)),
        ("end", None) => Ok(Step::Gesture(GestureEvent::PanEnded)),
        ("pan", Some(arg)) => {
            let x = arg
                .parse::<f32>()
                .with_context(|| format!("invalid pan translation {arg:?}"))?;
            Ok(Step::Gesture(GestureEvent::Pan { x, y: 0.0 }))
        }
        ("wait", Some(arg)) => {
            let rounds = arg
                .parse::<usize>()
                .with_context(|| format!("invalid wait rounds {arg:?}"))?;
            Ok(Step::Wait(rounds))
        }
        _ => bail!("unknown script step {token:?}"),
    }
}
