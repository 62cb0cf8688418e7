use crate::error::{Result, ToneCodecError};
use num_complex::Complex;
use std::f32::consts::PI;

/// In-place Cooley-Tukey radix-2 transform.
///
/// The length must be a power of two; anything else would silently truncate
/// during the even/odd split, so it is rejected up front. Lengths 0 and 1
/// are returned unchanged.
pub fn fft(data: &mut [Complex<f32>]) -> Result<()> {
    if data.len() > 1 && !data.len().is_power_of_two() {
        return Err(ToneCodecError::NonPowerOfTwoWindow(data.len()));
    }
    radix2(data);
    Ok(())
}

fn radix2(data: &mut [Complex<f32>]) {
    let n = data.len();
    if n <= 1 {
        return;
    }

    let half = n / 2;
    let mut even: Vec<Complex<f32>> = (0..half).map(|i| data[2 * i]).collect();
    let mut odd: Vec<Complex<f32>> = (0..half).map(|i| data[2 * i + 1]).collect();

    radix2(&mut even);
    radix2(&mut odd);

    for k in 0..half {
        let twiddle = Complex::from_polar(1.0, -2.0 * PI * k as f32 / n as f32) * odd[k];
        data[k] = even[k] + twiddle;
        data[k + half] = even[k] - twiddle;
    }
}
