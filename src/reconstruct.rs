//! Track reconstruction
//!
//! Fills every unresolved slot of the merged multi-file timeline, producing
//! a dense, gap-free track. Each contiguous run of unresolved slots is
//! classified once: hold the previous sample (nothing resolved ahead), hold
//! the next sample (nothing resolved behind), or interpolate linearly
//! between its resolved neighbors.

use crate::error::{DashcamError, Result};
use crate::types::TelemetrySample;

/// Resolve the merged slot sequence into a dense track.
///
/// The output always has the same length as the input and contains no
/// unresolved slot. A sequence with no resolved sample at all (including an
/// empty sequence) is [`DashcamError::NoTelemetry`]: there is no GPS data
/// for this job and the caller must not synthesize default coordinates.
pub fn reconstruct_track(slots: &[Option<TelemetrySample>]) -> Result<Vec<TelemetrySample>> {
    let mut track = Vec::with_capacity(slots.len());
    let mut previous: Option<(usize, TelemetrySample)> = None;
    let mut index = 0;

    while index < slots.len() {
        if let Some(sample) = slots[index] {
            previous = Some((index, sample));
            track.push(sample);
            index += 1;
            continue;
        }

        // run of unresolved slots: find its end and the sample after it
        let run_start = index;
        let mut run_end = index;
        while run_end < slots.len() && slots[run_end].is_none() {
            run_end += 1;
        }
        let next = slots.get(run_end).copied().flatten().map(|s| (run_end, s));

        match (previous, next) {
            (Some((_, sample)), None) => {
                for _ in run_start..run_end {
                    track.push(sample);
                }
            }
            (None, Some((_, sample))) => {
                for _ in run_start..run_end {
                    track.push(sample);
                }
            }
            (Some((prev_index, prev)), Some((next_index, next))) => {
                let span = (next_index - prev_index) as f64;
                let latitude_step = (next.latitude - prev.latitude) / span;
                let longitude_step = (next.longitude - prev.longitude) / span;
                let speed_step = (next.speed - prev.speed) / span;

                for slot_index in run_start..run_end {
                    let distance = (slot_index - prev_index) as f64;
                    track.push(TelemetrySample {
                        latitude: prev.latitude + distance * latitude_step,
                        longitude: prev.longitude + distance * longitude_step,
                        speed: prev.speed + distance * speed_step,
                    });
                }
            }
            (None, None) => return Err(DashcamError::NoTelemetry),
        }

        index = run_end;
    }

    if track.is_empty() {
        return Err(DashcamError::NoTelemetry);
    }

    Ok(track)
}
