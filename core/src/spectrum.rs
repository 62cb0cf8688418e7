use crate::error::Result;
use crate::fft;
use num_complex::Complex;
use std::cmp::Ordering;

/// Rank positive-frequency bins by magnitude and return the strongest `k`
/// as frequencies in Hz, descending.
///
/// Bin 0 is the DC component and is excluded. Equal magnitudes rank the
/// higher bin first (lexicographic pair comparison). The output length is
/// `min(k, len/2 - 1)`; frequencies are not deduplicated or smoothed.
pub fn extract_peaks(spectrum: &[Complex<f32>], sample_rate: f32, k: usize) -> Vec<f32> {
    let len = spectrum.len();
    if len < 2 {
        return Vec::new();
    }

    let mut peaks: Vec<(f32, usize)> = (1..len / 2)
        .map(|bin| (spectrum[bin].norm(), bin))
        .collect();
    peaks.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    peaks.truncate(k);

    peaks
        .into_iter()
        .map(|(_, bin)| bin as f32 * sample_rate / len as f32)
        .collect()
}

/// Analysis front-end for one sample window: convert to complex, zero-extend
/// to the next power of two so the transform precondition holds for any
/// window length, transform, and extract the strongest `k` frequencies.
pub fn dominant_frequencies(window: &[f32], sample_rate: f32, k: usize) -> Result<Vec<f32>> {
    let fft_len = window.len().next_power_of_two();
    let mut buffer: Vec<Complex<f32>> = Vec::with_capacity(fft_len);
    buffer.extend(window.iter().map(|&s| Complex::new(s, 0.0)));
    buffer.resize(fft_len, Complex::new(0.0, 0.0));

    fft::fft(&mut buffer)?;
    Ok(extract_peaks(&buffer, sample_rate, k))
}
