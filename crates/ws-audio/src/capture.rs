use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, RingBuffer};

use crate::error::AudioError;

/// How long `read_exact` waits without receiving a single sample before
/// declaring the device stalled.
const STALL_TIMEOUT: Duration = Duration::from_millis(2000);

/// Microphone capture via cpal.
///
/// The stream callback downmixes to mono and writes f32 samples into a
/// lock-free ring buffer; the display loop pulls fixed-length buffers out
/// with [`AudioCapture::read_exact`]. The device is owned for the
/// lifetime of this struct and released on drop.
///
/// # Example
/// ```no_run
/// use ws_audio::capture::AudioCapture;
/// let mut capture = AudioCapture::start_default(44_100).unwrap();
/// let mut buf = vec![0.0f32; 1536];
/// capture.read_exact(&mut buf).unwrap();
/// ```
pub struct AudioCapture {
    // Kept alive for capture; dropping it closes the device.
    _stream: cpal::Stream,
    consumer: Consumer<f32>,
    sample_rate: u32,
}

impl AudioCapture {
    /// Start capturing from the default input device.
    ///
    /// `preferred_rate` is logged against the device rate; the device's
    /// native rate wins since the scope has no resampler.
    ///
    /// # Errors
    /// Returns [`AudioError::DeviceUnavailable`] if there is no input
    /// device, or [`AudioError::Stream`] if the stream cannot start.
    pub fn start_default(preferred_rate: u32) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(AudioError::DeviceUnavailable)?;

        let config = device.default_input_config()?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        if sample_rate != preferred_rate {
            log::warn!("device runs at {sample_rate} Hz, configured rate is {preferred_rate} Hz");
        }
        log::info!(
            "oscilloscope: listening on {} ({channels} ch @ {sample_rate} Hz)",
            device.name().unwrap_or_else(|_| "<unnamed>".into())
        );

        // Ring buffer: 2 seconds of mono audio.
        let buf_size = sample_rate as usize * 2;
        let (mut producer, consumer) = RingBuffer::new(buf_size);

        let stream = device.build_input_stream(
            &config.into(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                // Downmix to mono and push into the ring buffer. A full
                // buffer drops samples; the scope only ever wants the
                // freshest window anyway.
                for chunk in data.chunks(channels) {
                    let mono: f32 = chunk.iter().sum::<f32>() / channels as f32;
                    let _ = producer.push(mono);
                }
            },
            |err| {
                log::error!("audio stream error: {err}");
            },
            None,
        )?;

        stream.play()?;

        Ok(Self {
            _stream: stream,
            consumer,
            sample_rate,
        })
    }

    /// Block until `out` is completely filled with mono samples.
    ///
    /// Sleep-polls the ring buffer in 1 ms steps. If no sample at all
    /// arrives within the stall timeout, the device is presumed dead.
    ///
    /// # Errors
    /// Returns [`AudioError::Stalled`] on timeout.
    pub fn read_exact(&mut self, out: &mut [f32]) -> Result<(), AudioError> {
        let mut filled = 0;
        let mut last_progress = Instant::now();

        while filled < out.len() {
            let mut got_any = false;
            while filled < out.len() {
                match self.consumer.pop() {
                    Ok(sample) => {
                        out[filled] = sample;
                        filled += 1;
                        got_any = true;
                    }
                    Err(_) => break,
                }
            }

            if got_any {
                last_progress = Instant::now();
            } else {
                if last_progress.elapsed() >= STALL_TIMEOUT {
                    return Err(AudioError::Stalled(STALL_TIMEOUT.as_millis() as u64));
                }
                std::thread::sleep(Duration::from_millis(1));
            }
        }
        Ok(())
    }

    /// The sample rate of the capture stream.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
