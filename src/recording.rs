/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Module for audio recording from an audio input device.

use crate::{BeatDetector, BeatType, SpectrumTransform};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, StreamConfig};
use std::string::ToString;
use std::time::{Duration, Instant};
use std::vec::Vec;
use thiserror::Error;

/// Errors when starting the detector stream of [`start_detector_thread`].
#[derive(Debug, Error)]
pub enum StartDetectorThreadError {
    /// There was no audio device provided and no default device can be found.
    #[error("no input device was provided and there is no default input device")]
    NoDefaultAudioDevice,
    /// There was a problem detecting the input stream config.
    #[error("failed to query the default input config")]
    InputConfigError(#[source] cpal::DefaultStreamConfigError),
    /// Failed to build an input stream.
    #[error("failed to build the input stream")]
    FailedBuildingInputStream(#[source] cpal::BuildStreamError),
    /// There was a problem starting the input stream.
    #[error("failed to start the input stream")]
    InputError(#[source] cpal::PlayStreamError),
}

/// Starts a stream (a thread) that feeds the mono audio input of a device
/// into `detector` and calls `on_beat_cb` for every detected beat.
///
/// The audio is split into consecutive, non-overlapping frames of the
/// configured spectrum length. Incomplete frames are kept until the next
/// audio callback fills them. The stream lives as long as the returned
/// handle.
pub fn start_detector_thread<F>(
    mut detector: BeatDetector<f32, F>,
    mut on_beat_cb: impl FnMut(BeatType, f32) + Send + 'static,
    preferred_input_dev: Option<cpal::Device>,
) -> Result<cpal::Stream, StartDetectorThreadError>
where
    F: SpectrumTransform<f32> + Send + 'static,
{
    let input_dev = preferred_input_dev.map(Ok).unwrap_or_else(|| {
        let host = cpal::default_host();
        log::debug!("Using '{:?}' as input framework", host.id());
        host.default_input_device()
            .ok_or(StartDetectorThreadError::NoDefaultAudioDevice)
    })?;

    log::debug!(
        "Using '{}' as input device",
        input_dev.name().unwrap_or_else(|_| "<unknown>".to_string())
    );

    let supported_input_config = input_dev
        .default_input_config()
        .map_err(StartDetectorThreadError::InputConfigError)?;

    log::trace!(
        "Supported input configurations: {:#?}",
        supported_input_config
    );

    let input_config = StreamConfig {
        channels: 1,
        sample_rate: supported_input_config.sample_rate(),
        buffer_size: BufferSize::Default,
    };

    log::debug!("Input configuration: {:#?}", input_config);

    let sampling_rate = input_config.sample_rate.0 as f32;
    let frame_len = detector.config().spectrum_len;
    let mut frame = Vec::with_capacity(frame_len);

    // Under the hood, this spawns a thread.
    let stream = input_dev
        .build_input_stream(
            &input_config,
            move |data: &[f32], _info| {
                log::trace!(
                    "audio input callback: {} samples ({} ms, sampling rate = {sampling_rate})",
                    data.len(),
                    Duration::from_secs_f32(data.len() as f32 / sampling_rate).as_millis()
                );

                for &sample in data {
                    frame.push(sample);
                    if frame.len() < frame_len {
                        continue;
                    }

                    let now = Instant::now();
                    let result = detector.process(&frame, &mut on_beat_cb);
                    log::trace!("Beat detection took {:?}", now.elapsed());
                    frame.clear();

                    if let Err(e) = result {
                        log::error!("Failed to process frame: {e}");
                    }
                }
            },
            |e| {
                log::error!("Input error: {e:#?}");
            },
            // Timeout: worst case max blocking time
            // Don't see too short, as otherwise, the error callback will be
            // invoked frequently.
            // https://github.com/RustAudio/cpal/pull/696
            Some(Duration::from_secs(1)),
        )
        .map_err(StartDetectorThreadError::FailedBuildingInputStream)?;

    stream
        .play()
        .map_err(StartDetectorThreadError::InputError)?;

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use std::error::Error as _;

    #[test]
    fn errors_have_messages_and_sources() {
        let err = StartDetectorThreadError::NoDefaultAudioDevice;
        check!(
            err.to_string() == "no input device was provided and there is no default input device"
        );
        check!(err.source().is_none());

        let err = StartDetectorThreadError::InputError(cpal::PlayStreamError::DeviceNotAvailable);
        check!(err.to_string() == "failed to start the input stream");
        check!(err.source().is_some());
    }
}
