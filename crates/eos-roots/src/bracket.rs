//! Brent and bisection solvers over a sign-changing bracket.

use crate::config::{RootConfig, RootMethod};
use crate::error::{RootError, RootResult};

/// Converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    /// Root location
    pub root: f64,
    /// Residual at the root
    pub residual: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Find a root of `f` in `[a, b]` with the method named in `config`.
pub fn solve_bracketed<F>(f: F, a: f64, b: f64, config: &RootConfig) -> RootResult<RootSolution>
where
    F: FnMut(f64) -> f64,
{
    match config.method {
        RootMethod::Brent => brentq(f, a, b, config),
        RootMethod::Bisection => bisect(f, a, b, config),
    }
}

fn check_bracket(a: f64, b: f64) -> RootResult<()> {
    if !a.is_finite() || !b.is_finite() || a >= b {
        return Err(RootError::InvalidBracket { a, b });
    }
    Ok(())
}

/// Evaluate `f`, rejecting NaN. Infinite values still carry a usable sign.
fn eval<F>(f: &mut F, x: f64) -> RootResult<f64>
where
    F: FnMut(f64) -> f64,
{
    let value = f(x);
    if value.is_nan() {
        return Err(RootError::NonFiniteResidual { x, value });
    }
    Ok(value)
}

fn same_sign(fa: f64, fb: f64) -> bool {
    (fa > 0.0) == (fb > 0.0)
}

fn converged(root: f64, residual: f64, iterations: usize, method: RootMethod) -> RootSolution {
    tracing::debug!(%method, root, residual, iterations, "bracketed root converged");
    RootSolution {
        root,
        residual,
        iterations,
    }
}

/// Brent's method.
///
/// Keeps the current best estimate `xcur` and a contrapoint `xblk` on the other
/// side of the root. Each step tries inverse quadratic interpolation (or a
/// secant step when only two points are distinct) and falls back to bisection
/// whenever the interpolated step is not small enough.
pub fn brentq<F>(mut f: F, a: f64, b: f64, config: &RootConfig) -> RootResult<RootSolution>
where
    F: FnMut(f64) -> f64,
{
    check_bracket(a, b)?;

    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = eval(&mut f, xpre)?;
    let mut fcur = eval(&mut f, xcur)?;

    if fpre == 0.0 {
        return Ok(converged(xpre, fpre, 0, RootMethod::Brent));
    }
    if fcur == 0.0 {
        return Ok(converged(xcur, fcur, 0, RootMethod::Brent));
    }
    if same_sign(fpre, fcur) {
        return Err(RootError::NoSignChange {
            a,
            b,
            fa: fpre,
            fb: fcur,
        });
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iter in 0..config.max_iterations {
        if fpre != 0.0 && fcur != 0.0 && !same_sign(fpre, fcur) {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = config.half_tolerance(xcur);
        let sbis = 0.5 * (xblk - xcur);
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(converged(xcur, fcur, iter, RootMethod::Brent));
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = eval(&mut f, xcur)?;
    }

    Err(RootError::ConvergenceFailed {
        iterations: config.max_iterations,
        x: xcur,
        width: (xblk - xcur).abs(),
    })
}

/// Plain bisection.
pub fn bisect<F>(mut f: F, a: f64, b: f64, config: &RootConfig) -> RootResult<RootSolution>
where
    F: FnMut(f64) -> f64,
{
    check_bracket(a, b)?;

    let mut lo = a;
    let mut hi = b;
    let mut flo = eval(&mut f, lo)?;
    let fhi = eval(&mut f, hi)?;

    if flo == 0.0 {
        return Ok(converged(lo, flo, 0, RootMethod::Bisection));
    }
    if fhi == 0.0 {
        return Ok(converged(hi, fhi, 0, RootMethod::Bisection));
    }
    if same_sign(flo, fhi) {
        return Err(RootError::NoSignChange {
            a,
            b,
            fa: flo,
            fb: fhi,
        });
    }

    for iter in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        let fmid = eval(&mut f, mid)?;

        if fmid == 0.0 || 0.5 * (hi - lo) < config.half_tolerance(mid) {
            return Ok(converged(mid, fmid, iter + 1, RootMethod::Bisection));
        }

        if same_sign(fmid, flo) {
            lo = mid;
            flo = fmid;
        } else {
            hi = mid;
        }
    }

    Err(RootError::ConvergenceFailed {
        iterations: config.max_iterations,
        x: 0.5 * (lo + hi),
        width: hi - lo,
    })
}
