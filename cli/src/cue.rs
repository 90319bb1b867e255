use mineclear_core::Cue;

/// Receives the sound cues the round emits.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Name of the sound asset for a cue.
pub const fn asset_name(cue: Cue) -> &'static str {
    match cue {
        Cue::NewRound => "new",
        Cue::Open => "open",
        Cue::Mark => "mark",
        Cue::Lose => "lose",
        Cue::Win => "win",
        Cue::PauseToggle => "do",
    }
}

/// Stand-in for audio playback.
#[derive(Debug, Default)]
pub struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&mut self, cue: Cue) {
        log::info!("Playing {}.ogg", asset_name(cue));
    }
}

impl CueSink for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}
