/// Damping/stiffness pair for a unit-mass damped harmonic oscillator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Spring constant `k` of the oscillator.
    pub stiffness: f64,
    /// Damping coefficient `c` of the oscillator.
    pub damping: f64,
}

impl SpringConfig {
    /// Entrance tuning for avatars/props (snappy with visible overshoot).
    pub const ENTRANCE: Self = Self {
        stiffness: 150.0,
        damping: 12.0,
    };

    /// Text tuning (stiffer and less damped for a quicker pop).
    pub const TEXT: Self = Self {
        stiffness: 200.0,
        damping: 10.0,
    };
}

/// The spring tunings an engine instance animates with. Exposed as
/// configuration so the same oscillator model serves both entrance and
/// subtitle animation without magic constants at call sites.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringTuning {
    /// Applied to element entrance animations.
    pub entrance: SpringConfig,
    /// Applied to subtitle token springs.
    pub text: SpringConfig,
}

impl Default for SpringTuning {
    fn default() -> Self {
        Self {
            entrance: SpringConfig::ENTRANCE,
            text: SpringConfig::TEXT,
        }
    }
}

/// Progress of a unit-mass spring released at rest toward 1, evaluated at
/// `elapsed_frames / fps` seconds.
///
/// Closed-form solution of `x'' + c x' + k x = k` with `x(0) = 0`,
/// `x'(0) = 0`, covering all three damping regimes. Underdamped configs
/// overshoot above 1 (and may dip below 0) before converging; the value is
/// exactly 0 at elapsed 0 and tends to 1 as elapsed grows.
pub fn spring_progress(config: SpringConfig, elapsed_frames: u64, fps: f64) -> f64 {
    let t = elapsed_frames as f64 / fps;
    if t <= 0.0 {
        return 0.0;
    }

    let omega0 = config.stiffness.max(f64::EPSILON).sqrt();
    let zeta = config.damping.max(0.0) / (2.0 * omega0);

    if zeta < 1.0 {
        // Underdamped: decaying oscillation around the target.
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        1.0 - envelope
            * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
    } else if (zeta - 1.0).abs() < 1e-9 {
        // Critically damped.
        1.0 - (-omega0 * t).exp() * (1.0 + omega0 * t)
    } else {
        // Overdamped: two real decay rates.
        let root = omega0 * (zeta * zeta - 1.0).sqrt();
        let r1 = -zeta * omega0 + root;
        let r2 = -zeta * omega0 - root;
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
