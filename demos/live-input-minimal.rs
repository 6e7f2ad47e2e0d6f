//! Minimal example to explore the live input of the default audio input
//! device. Prints every detected beat until Ctrl+C is pressed.
//!
//! `$ cargo run --example live-input-minimal --features recording`

use log::LevelFilter;
use spectral_beat_detector::{recording, BeatDetector, BeatType, DetectorConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cheap stand-in for an FFT: the rectified signal. Good enough to react on
/// loud transients. Use a real FFT for meaningful low/mid/high categories.
fn rectify(samples: &[f32], spectrum: &mut [f32]) {
    for (magnitude, sample) in spectrum.iter_mut().zip(samples) {
        *magnitude = sample.abs();
    }
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .with_colors(true)
        .with_utc_timestamps()
        .init()
        .unwrap();

    let recording = Arc::new(AtomicBool::new(true));
    {
        let recording = recording.clone();
        ctrlc::set_handler(move || {
            eprintln!("Stopping recording");
            recording.store(false, Ordering::SeqCst);
        })
        .unwrap();
    }

    let detector = BeatDetector::new(rectify, DetectorConfig::default()).unwrap();
    let on_beat = |beat_type: BeatType, energy: f32| {
        println!("Found {beat_type} beat (energy {energy:.2})");
    };

    // Keep the stream alive until Ctrl+C.
    let _stream = recording::start_detector_thread(detector, on_beat, None).unwrap();
    while recording.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));
    }
}
