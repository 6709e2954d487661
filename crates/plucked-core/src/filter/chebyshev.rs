//! Chebyshev type I recursive filter.
//!
//! Coefficients come from the pole-pair cascade in S. W. Smith, *The Scientist
//! and Engineer's Guide to Digital Signal Processing*, chapter 20: each pole pair
//! is placed on the s-plane (warped onto an ellipse for the requested ripple),
//! mapped to z with the bilinear transform, moved to the target cutoff with a
//! low-pass to low-pass or low-pass to high-pass transform, and convolved into
//! the running polynomial. The result is normalized to unity gain at DC
//! (low-pass) or Nyquist (high-pass).
//!
//! ```text
//! y[n] = Σ a[k]·x[n-k]  (k = 0..=poles)  +  Σ b[k]·y[n-k]  (k = 1..=poles)
//! ```
//!
//! # Limits
//!
//! | Parameter | Range |
//! |-----------|-------|
//! | cutoff | (0, fs/2) |
//! | ripple | 0..=29 percent, 0 gives Butterworth |
//! | poles | even, 2..=20 |

use core::f64::consts::PI;

use super::{Filter, Pass};
use crate::error::{Error, Result, positive};
use crate::stream::Sample;

const MAX_POLES: usize = 20;
const MAX_RIPPLE: f64 = 29.0;
/// Polynomial scratch length; two slots of headroom for the convolution.
const TAPS: usize = MAX_POLES + 3;

/// Chebyshev type I low- or high-pass.
///
/// # Example
///
/// ```rust
/// use plucked_core::{Chebyshev, Filter, Pass};
///
/// let mut lp = Chebyshev::new(Pass::LowPass, 1000.0, 0.5, 4, 44100.0).unwrap();
/// let mut y = 0.0;
/// for _ in 0..10_000 {
///     y = lp.process(1.0);
/// }
/// assert!((y - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Chebyshev {
    /// Feed-forward coefficients `a[0..=poles]`
    a: Vec<f64>,
    /// Feedback coefficients `b[0..=poles]`; `b[0]` is unused
    b: Vec<f64>,
    /// Input history, `x[n-1]` first
    x: Vec<f64>,
    /// Output history, `y[n-1]` first
    y: Vec<f64>,
}

impl Chebyshev {
    /// Designs a filter.
    ///
    /// # Arguments
    ///
    /// * `pass` - Low- or high-pass
    /// * `cutoff` - Corner frequency in Hz
    /// * `ripple` - Passband ripple in percent
    /// * `poles` - Filter order
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(pass: Pass, cutoff: f64, ripple: f64, poles: usize, sample_rate: f64) -> Result<Self> {
        if !positive(sample_rate) {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        if !positive(cutoff) {
            return Err(Error::InvalidCutoff(cutoff));
        }
        let nyquist = sample_rate * 0.5;
        if cutoff >= nyquist {
            return Err(Error::CutoffAboveNyquist { cutoff, nyquist });
        }
        if !(0.0..=MAX_RIPPLE).contains(&ripple) {
            return Err(Error::InvalidRipple(ripple));
        }
        if !(2..=MAX_POLES).contains(&poles) || poles % 2 != 0 {
            return Err(Error::InvalidPoleCount(poles));
        }

        let (a, b) = design(pass, cutoff / sample_rate, ripple, poles);
        Ok(Self {
            a,
            b,
            x: vec![0.0; poles],
            y: vec![0.0; poles],
        })
    }

    /// Filter order.
    pub fn poles(&self) -> usize {
        self.x.len()
    }

    /// Feed-forward and feedback coefficients, `poles + 1` each.
    pub fn coefficients(&self) -> (&[f64], &[f64]) {
        (&self.a, &self.b)
    }
}

impl Filter for Chebyshev {
    fn process(&mut self, input: Sample) -> Sample {
        let feed_forward: f64 = self.a[1..].iter().zip(&self.x).map(|(a, x)| a * x).sum();
        let feedback: f64 = self.b[1..].iter().zip(&self.y).map(|(b, y)| b * y).sum();
        let output = self.a[0] * input + feed_forward + feedback;

        self.x.rotate_right(1);
        self.x[0] = input;
        self.y.rotate_right(1);
        self.y[0] = output;
        output
    }

    fn reset(&mut self) {
        self.x.fill(0.0);
        self.y.fill(0.0);
    }
}

/// Cascades `poles / 2` biquad sections into one recursion.
fn design(pass: Pass, fc: f64, ripple: f64, poles: usize) -> (Vec<f64>, Vec<f64>) {
    let mut a = [0.0; TAPS];
    let mut b = [0.0; TAPS];
    a[2] = 1.0;
    b[2] = 1.0;

    for pair in 1..=poles / 2 {
        let section = pole_pair(pass, fc, ripple, poles, pair);
        let ta = a;
        let tb = b;
        for i in 2..TAPS {
            a[i] = section.a0 * ta[i] + section.a1 * ta[i - 1] + section.a2 * ta[i - 2];
            b[i] = tb[i] - section.b1 * tb[i - 1] - section.b2 * tb[i - 2];
        }
    }

    b[2] = 0.0;
    for i in 0..TAPS - 2 {
        a[i] = a[i + 2];
        b[i] = -b[i + 2];
    }

    // Unity gain at DC for low-pass, at Nyquist for high-pass
    let mut sa = 0.0;
    let mut sb = 0.0;
    for i in 0..=poles {
        let sign = match pass {
            Pass::HighPass if i % 2 == 1 => -1.0,
            _ => 1.0,
        };
        sa += a[i] * sign;
        sb += b[i] * sign;
    }
    let gain = sa / (1.0 - sb);

    let a = a[..=poles].iter().map(|c| c / gain).collect();
    let mut b: Vec<f64> = b[..=poles].to_vec();
    b[0] = 0.0;
    (a, b)
}

/// One second-order section of the cascade.
struct Section {
    a0: f64,
    a1: f64,
    a2: f64,
    b1: f64,
    b2: f64,
}

fn pole_pair(pass: Pass, fc: f64, ripple: f64, poles: usize, pair: usize) -> Section {
    let np = poles as f64;
    let angle = PI / (np * 2.0) + (pair - 1) as f64 * PI / np;
    let mut rp = -angle.cos();
    let mut ip = angle.sin();

    // Warp the Butterworth circle onto the Chebyshev ellipse
    if ripple > 0.0 {
        let es = ((100.0 / (100.0 - ripple)).powi(2) - 1.0).sqrt();
        let vx = (1.0 / np) * ((1.0 / es) + (1.0 / (es * es) + 1.0).sqrt()).ln();
        let kx = (1.0 / np) * ((1.0 / es) + (1.0 / (es * es) - 1.0).sqrt()).ln();
        let kx = kx.cosh();
        rp *= vx.sinh() / kx;
        ip *= vx.cosh() / kx;
    }

    // s-domain to z-domain
    let t = 2.0 * 0.5_f64.tan();
    let w = 2.0 * PI * fc;
    let m = rp * rp + ip * ip;
    let d = 4.0 - 4.0 * rp * t + m * t * t;
    let x0 = t * t / d;
    let x1 = 2.0 * t * t / d;
    let x2 = t * t / d;
    let y1 = (8.0 - 2.0 * m * t * t) / d;
    let y2 = (-4.0 - 4.0 * rp * t - m * t * t) / d;

    // Low-pass prototype at fc = 0.5 rad to the requested cutoff
    let k = match pass {
        Pass::HighPass => -(w / 2.0 + 0.5).cos() / (w / 2.0 - 0.5).cos(),
        Pass::LowPass => (0.5 - w / 2.0).sin() / (0.5 + w / 2.0).sin(),
    };
    let d = 1.0 + y1 * k - y2 * k * k;
    let a0 = (x0 - x1 * k + x2 * k * k) / d;
    let mut a1 = (-2.0 * x0 * k + x1 + x1 * k * k - 2.0 * x2 * k) / d;
    let a2 = (x0 * k * k - x1 * k + x2) / d;
    let mut b1 = (2.0 * k + y1 + y1 * k * k - 2.0 * y2 * k) / d;
    let b2 = (-k * k - y1 * k + y2) / d;
    if pass == Pass::HighPass {
        a1 = -a1;
        b1 = -b1;
    }

    Section { a0, a1, a2, b1, b2 }
}
