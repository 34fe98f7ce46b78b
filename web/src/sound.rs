use concentration_core::SoundCue;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

/// Plays sound cues as short sine tones through Web Audio.
#[derive(Debug, Default)]
pub(crate) struct SoundPlayer {
    context: Option<AudioContext>,
}

impl SoundPlayer {
    pub(crate) fn play(&mut self, cue: SoundCue) {
        log::trace!("sound cue: {:?}", cue);
        if let Err(err) = self.try_play(cue) {
            log::warn!("could not play {:?}: {:?}", cue, err);
        }
    }

    /// Browsers only allow creating the context after a user gesture, so this happens lazily.
    fn context(&mut self) -> Result<AudioContext, JsValue> {
        match &self.context {
            Some(context) => Ok(context.clone()),
            None => {
                let context = AudioContext::new()?;
                self.context = Some(context.clone());
                Ok(context)
            }
        }
    }

    fn try_play(&mut self, cue: SoundCue) -> Result<(), JsValue> {
        let context = self.context()?;

        let oscillator = context.create_oscillator()?;
        oscillator.set_type(OscillatorType::Sine);
        oscillator.frequency().set_value(cue.frequency_hz());

        let gain = context.create_gain()?;
        gain.gain().set_value(SoundCue::AMPLITUDE);

        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&context.destination())?;

        let start = context.current_time();
        oscillator.start_with_when(start)?;
        oscillator.stop_with_when(start + cue.duration().as_secs_f64())?;
        Ok(())
    }
}
