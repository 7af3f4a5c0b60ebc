//! Numeric helpers and the shared scalar equation solver.

use crate::error::{HyError, HyResult};
use tracing::{debug, trace};

/// Floating point type used throughout the workspace
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> HyResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HyError::NonFinite { what, value: v })
    }
}

/// Configuration for the scalar root finder.
#[derive(Clone, Copy, Debug)]
pub struct RootConfig {
    /// Residual magnitude accepted as converged
    pub tolerance: Real,
    /// Hard iteration cap
    pub max_iterations: usize,
    /// Relative step for the finite-difference derivative
    pub fd_step: Real,
    /// Backtracking factor when a Newton step does not reduce the residual
    pub damping: Real,
    /// Maximum backtracking steps per iteration
    pub max_backtracks: usize,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            fd_step: 1e-8,
            damping: 0.5,
            max_backtracks: 20,
        }
    }
}

/// Solve f(x) = 0 for a single scalar unknown.
///
/// Damped Newton iteration with a central finite-difference derivative.
/// Every implicit-equation site in the workspace (friction factors, normal
/// depth, energy-balance marching, pipe-run discharge) goes through this
/// one routine, so the convergence policy is defined in exactly one place.
pub fn solve_scalar_equation<F>(f: F, initial_guess: Real, what: &'static str, config: &RootConfig) -> HyResult<Real>
where
    F: Fn(Real) -> Real,
{
    let mut x = ensure_finite(initial_guess, what)?;
    let mut r = ensure_finite(f(x), what)?;

    for iter in 0..config.max_iterations {
        if r.abs() < config.tolerance {
            debug!(what, iterations = iter, root = x, "scalar solve converged");
            return Ok(x);
        }

        // Central difference scaled to the magnitude of x
        let h = config.fd_step * x.abs().max(1.0);
        let df = (f(x + h) - f(x - h)) / (2.0 * h);
        ensure_finite(df, what)?;
        if df == 0.0 {
            return Err(HyError::NonConvergence {
                what,
                iterations: iter,
                residual: r.abs(),
            });
        }

        let mut step = -r / df;
        let mut x_new = x + step;
        let mut r_new = f(x_new);

        // Backtrack while the residual grows or the step left the domain
        // (a non-finite residual means the full step overshot, e.g. into
        // negative arguments of sqrt/log)
        let mut backtracks = 0;
        while (!r_new.is_finite() || r_new.abs() >= r.abs()) && backtracks < config.max_backtracks {
            step *= config.damping;
            x_new = x + step;
            r_new = f(x_new);
            backtracks += 1;
        }
        ensure_finite(r_new, what)?;

        trace!(what, iter, x = x_new, residual = r_new, backtracks, "scalar solve step");
        x = x_new;
        r = r_new;
    }

    if r.abs() < config.tolerance {
        return Ok(x);
    }
    Err(HyError::NonConvergence {
        what,
        iterations: config.max_iterations,
        residual: r.abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn solves_quadratic() {
        // x^2 - 4 = 0, x > 0
        let cfg = RootConfig::default();
        let x = solve_scalar_equation(|x| x * x - 4.0, 3.0, "quadratic", &cfg).unwrap();
        assert!((x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn solves_implicit_log_form() {
        // The smooth-pipe law shape: 2*log10(1e5*sqrt(f)/2.51)*sqrt(f) - 1 = 0
        let cfg = RootConfig::default();
        let f = solve_scalar_equation(
            |f| 2.0 * (1e5 * f.sqrt() / 2.51).log10() * f.sqrt() - 1.0,
            0.01,
            "smooth pipe",
            &cfg,
        )
        .unwrap();
        assert!(f > 0.0 && f < 0.1);
    }

    #[test]
    fn reports_nonconvergence() {
        // f(x) = 1 has no root
        let cfg = RootConfig {
            max_iterations: 10,
            ..Default::default()
        };
        let err = solve_scalar_equation(|_| 1.0, 1.0, "no root", &cfg).unwrap_err();
        assert!(matches!(err, HyError::NonConvergence { .. }));
    }

    #[test]
    fn identical_inputs_identical_roots() {
        let cfg = RootConfig::default();
        let a = solve_scalar_equation(|x| x.powi(3) - 27.0, 2.0, "cubic", &cfg).unwrap();
        let b = solve_scalar_equation(|x| x.powi(3) - 27.0, 2.0, "cubic", &cfg).unwrap();
        assert_eq!(a, b);
    }
}
