//! Frame resampling
//!
//! Maps the dense per-second track onto the output video's frame timeline:
//! N track samples become exactly M frames via proportional index allocation
//! with per-segment linear stepping.

use crate::types::TelemetrySample;

/// Resample a dense track to exactly `frame_count` per-frame samples.
///
/// Each track index is allotted `floor(adjustment * (i + 1) + 0.5) -
/// previous_target` frames (round-half-up proportional allocation); within a
/// segment the value steps linearly toward the next track sample. The final
/// segment holds its own value's trajectory, never extrapolating past the
/// track end. Expects a non-empty track and `frame_count >= 1`.
pub fn resample_track(track: &[TelemetrySample], frame_count: usize) -> Vec<TelemetrySample> {
    let adjustment = frame_count as f64 / track.len() as f64;

    let mut frames = Vec::with_capacity(frame_count);
    let mut previous_target = 0usize;

    for (index, &sample) in track.iter().enumerate() {
        let target = (adjustment * (index as f64 + 1.0) + 0.5).floor() as usize;
        let segment_frames = target - previous_target;

        if segment_frames == 0 {
            continue;
        }

        let next = track.get(index + 1).copied().unwrap_or(sample);

        let latitude_step = (next.latitude - sample.latitude) / segment_frames as f64;
        let longitude_step = (next.longitude - sample.longitude) / segment_frames as f64;
        let speed_step = (next.speed - sample.speed) / segment_frames as f64;

        let mut current = sample;
        for _ in 0..segment_frames {
            frames.push(current);
            current.latitude += latitude_step;
            current.longitude += longitude_step;
            current.speed += speed_step;
        }

        previous_target = target;
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(value: f64) -> TelemetrySample {
        TelemetrySample {
            latitude: value,
            longitude: value,
            speed: value,
        }
    }

    #[test]
    fn test_exact_upsampling_case() {
        let track = vec![sample(0.0), sample(10.0)];
        let frames = resample_track(&track, 10);

        // first segment steps toward the next sample, final segment holds
        let expected = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 10.0, 10.0, 10.0, 10.0];
        assert_eq!(frames.len(), expected.len());
        for (index, (frame, want)) in frames.iter().zip(expected).enumerate() {
            assert!(
                (frame.latitude - want).abs() < 1e-9,
                "frame {} was {}",
                index,
                frame.latitude
            );
        }
    }

    #[test]
    fn test_emits_exactly_m_frames() {
        for track_len in [1usize, 2, 3, 7, 25, 100] {
            let track: Vec<TelemetrySample> = (0..track_len).map(|i| sample(i as f64)).collect();
            for frame_count in [1usize, 2, 5, 24, 60, 250] {
                let frames = resample_track(&track, frame_count);
                assert_eq!(
                    frames.len(),
                    frame_count,
                    "track {} -> frames {}",
                    track_len,
                    frame_count
                );
            }
        }
    }

    #[test]
    fn test_downsampling_keeps_order() {
        let track: Vec<TelemetrySample> = (0..100).map(|i| sample(i as f64)).collect();
        let frames = resample_track(&track, 10);

        assert_eq!(frames.len(), 10);
        for pair in frames.windows(2) {
            assert!(pair[0].latitude <= pair[1].latitude);
        }
    }

    #[test]
    fn test_single_sample_track_repeats() {
        let frames = resample_track(&[sample(3.25)], 4);
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.latitude == 3.25));
    }
}
