use crate::numerical::integrand::{kernel_domain_ok, kernel_f};
use crate::numerical::trapezoid::{DEFAULT_PANELS, composite_trapezoid};
use log::{error, info};
use simplelog::LevelFilter;
use simplelog::*;
use std::fmt;
use std::time::Instant;

/// absolute acceptance tolerance of the refinement criterion
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
/// below this interval width the parallel engine stops spawning rayon tasks
/// and recurses serially (same arithmetic, no scheduling overhead)
pub const SERIAL_CUTOFF_WIDTH: f64 = 1e-4;
/// halvings allowed before refinement is declared non-convergent; 60 halvings
/// of a unit interval are already past f64 width underflow
pub const DEFAULT_MAX_DEPTH: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum QuadError {
    /// a kernel radicand goes non-positive on the interval, the integrand is not finite there
    BadDomain { a: f64, b: f64, alpha: f64, beta: f64 },
    /// refinement reached the depth bound without meeting the tolerance
    NoConvergence { a: f64, b: f64, depth: usize },
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadError::BadDomain { a, b, alpha, beta } => write!(
                f,
                "integrand is not finite on [{}, {}] for alpha = {}, beta = {}",
                a, b, alpha, beta
            ),
            QuadError::NoConvergence { a, b, depth } => write!(
                f,
                "adaptive refinement did not converge on [{}, {}] after {} halvings",
                a, b, depth
            ),
        }
    }
}

impl std::error::Error for QuadError {}

/// Adaptive bisection quadrature of the singular kernel over [a, b].
///
/// Each interval is estimated once with the composite rule over the whole of it
/// and once as the sum over its two halves; the halves are accepted when the two
/// estimates agree within `tolerance`, otherwise both halves are refined
/// recursively and their values summed. The serial variant is a plain
/// depth-first recursion; the parallel variant runs the two half-interval
/// refinements as rayon fork-join siblings on the global pool, joining before
/// the sum.
pub struct AdaptiveQuad {
    pub a: f64,
    pub b: f64,
    pub alpha: f64,
    pub beta: f64,
    pub tolerance: f64,
    pub n_points: usize, // panels of the underlying composite rule
    pub parallel: bool,
    pub max_depth: usize,
    pub loglevel: Option<String>,
    pub result: Option<f64>,
}

impl AdaptiveQuad {
    pub fn new() -> AdaptiveQuad {
        AdaptiveQuad {
            a: 0.0,
            b: 1.0,
            alpha: 0.0,
            beta: 0.0,
            tolerance: DEFAULT_TOLERANCE,
            n_points: DEFAULT_PANELS,
            parallel: false,
            max_depth: DEFAULT_MAX_DEPTH,
            loglevel: Some("info".to_string()),
            result: None,
        }
    }
    ////////////////////////////SETTERS/////////////////////////////////////////
    pub fn set_interval(&mut self, a: f64, b: f64) {
        assert!(a <= b, "interval bounds must satisfy a <= b");
        self.a = a;
        self.b = b;
    }
    pub fn set_shape_parameters(&mut self, alpha: f64, beta: f64) {
        self.alpha = alpha;
        self.beta = beta;
    }
    pub fn set_tolerance(&mut self, tolerance: f64) {
        assert!(tolerance > 0.0, "tolerance must be positive");
        self.tolerance = tolerance;
    }
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /////////////////////////////SOLVER//////////////////////////////////////////
    fn rule(&self, a: f64, b: f64) -> f64 {
        composite_trapezoid(a, b, &kernel_f, self.alpha, self.beta, self.n_points)
    }

    fn refine_serial(&self, a: f64, b: f64, depth: usize) -> Result<f64, QuadError> {
        let whole = self.rule(a, b);
        let c = 0.5 * (a + b);
        let left = self.rule(a, c);
        let right = self.rule(c, b);
        if (whole - (left + right)).abs() <= self.tolerance {
            return Ok(left + right);
        }
        if depth >= self.max_depth {
            return Err(QuadError::NoConvergence { a, b, depth });
        }
        Ok(self.refine_serial(a, c, depth + 1)? + self.refine_serial(c, b, depth + 1)?)
    }

    fn refine_parallel(&self, a: f64, b: f64, depth: usize) -> Result<f64, QuadError> {
        if b - a <= SERIAL_CUTOFF_WIDTH {
            return self.refine_serial(a, b, depth);
        }
        let whole = self.rule(a, b);
        let c = 0.5 * (a + b);
        // the two half-interval estimates are independent fork-join siblings
        let (left, right) = rayon::join(|| self.rule(a, c), || self.rule(c, b));
        if (whole - (left + right)).abs() <= self.tolerance {
            return Ok(left + right);
        }
        if depth >= self.max_depth {
            return Err(QuadError::NoConvergence { a, b, depth });
        }
        let (res_left, res_right) = rayon::join(
            || self.refine_parallel(a, c, depth + 1),
            || self.refine_parallel(c, b, depth + 1),
        );
        Ok(res_left? + res_right?)
    }

    pub fn solver(&mut self) -> Result<f64, QuadError> {
        if !kernel_domain_ok(self.a, self.b, self.alpha, self.beta) {
            let err = QuadError::BadDomain {
                a: self.a,
                b: self.b,
                alpha: self.alpha,
                beta: self.beta,
            };
            error!("{}", err);
            return Err(err);
        }
        let begin = Instant::now();
        let res = if self.parallel {
            self.refine_parallel(self.a, self.b, 0)
        } else {
            self.refine_serial(self.a, self.b, 0)
        };
        match &res {
            Ok(integral) => {
                info!(
                    "adaptive quadrature ({}) finished in {:?}, integral = {}",
                    if self.parallel { "parallel" } else { "serial" },
                    begin.elapsed(),
                    integral
                );
                self.result = Some(*integral);
            }
            Err(e) => error!("{}", e),
        }
        res
    }

    // wrapper around solver function to implement logging
    pub fn solve(&mut self) -> Result<f64, QuadError> {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if is_logging_disabled {
            self.solver()
        } else {
            let loglevel = self.loglevel.clone();
            let log_option = if let Some(level) = loglevel {
                match level.as_str() {
                    "debug" => LevelFilter::Debug,
                    "info" => LevelFilter::Info,
                    "warn" => LevelFilter::Warn,
                    "error" => LevelFilter::Error,
                    _ => panic!("loglevel must be debug, info, warn or error"),
                }
            } else {
                LevelFilter::Info
            };
            let logger_instance = CombinedLogger::init(vec![TermLogger::new(
                log_option,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]);

            match logger_instance {
                Ok(()) => self.solver(),
                // a logger was already installed by the caller, solve anyway
                Err(_) => self.solver(),
            }
        }
    }

    pub fn get_result(&self) -> Option<f64> {
        self.result
    }
}

impl Default for AdaptiveQuad {
    fn default() -> Self {
        Self::new()
    }
}

/// One-call surface: approximate the integral of the kernel over [a, b]
/// to the default tolerance, serial or parallel.
pub fn adaptive_integrate(
    a: f64,
    b: f64,
    alpha: f64,
    beta: f64,
    parallel: bool,
) -> Result<f64, QuadError> {
    let mut quad = AdaptiveQuad::new();
    quad.set_interval(a, b);
    quad.set_shape_parameters(alpha, beta);
    quad.set_parallel(parallel);
    quad.loglevel = Some("off".to_string());
    quad.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::relative_eq;

    #[test]
    fn test_serial_matches_closed_form() {
        // alpha = beta = 0.5: integral of 1/(1.25 - x) over [0, 1] is ln(5)
        let exact = 5.0_f64.ln();
        let res = adaptive_integrate(0.0, 1.0, 0.5, 0.5, false).unwrap();
        assert!(relative_eq!(res, exact, epsilon = 1e-7));
    }

    #[test]
    fn test_parallel_matches_closed_form() {
        let exact = 5.0_f64.ln();
        let res = adaptive_integrate(0.0, 1.0, 0.5, 0.5, true).unwrap();
        assert!(relative_eq!(res, exact, epsilon = 1e-7));
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        // both variants execute the same arithmetic, the results must agree
        // far tighter than the acceptance tolerance
        let serial = adaptive_integrate(0.0, 1.0, 0.5, 0.5, false).unwrap();
        let parallel = adaptive_integrate(0.0, 1.0, 0.5, 0.5, true).unwrap();
        assert!((serial - parallel).abs() <= 1e-10);

        let serial = adaptive_integrate(0.0, 1.0, 0.3, 0.7, false).unwrap();
        let parallel = adaptive_integrate(0.0, 1.0, 0.3, 0.7, true).unwrap();
        assert!((serial - parallel).abs() <= 1e-10);
    }

    #[test]
    fn test_constant_kernel() {
        // alpha = beta = 0, kernel identically 1: accepted on the first try
        let res = adaptive_integrate(0.0, 1.0, 0.0, 0.0, false).unwrap();
        assert_eq!(res, 1.0);
    }

    #[test]
    fn test_bad_domain_is_reported() {
        // alpha = 1 makes a radicand vanish at x = 1
        let res = adaptive_integrate(0.0, 1.0, 1.0, 0.5, false);
        assert!(matches!(res, Err(QuadError::BadDomain { .. })));
        let res = adaptive_integrate(0.0, 1.0, 1.0, 0.5, true);
        assert!(matches!(res, Err(QuadError::BadDomain { .. })));
    }

    #[test]
    fn test_depth_bound_surfaces_no_convergence() {
        let mut quad = AdaptiveQuad::new();
        quad.set_interval(0.0, 1.0);
        quad.set_shape_parameters(0.99, 0.99);
        quad.set_tolerance(1e-16); // unreachable in f64
        quad.set_max_depth(4);
        quad.loglevel = Some("off".to_string());
        let res = quad.solve();
        assert!(matches!(res, Err(QuadError::NoConvergence { .. })));
        assert!(quad.get_result().is_none());
    }

    #[test]
    fn test_solver_object_api() {
        let mut quad = AdaptiveQuad::new();
        quad.set_interval(0.0, 1.0);
        quad.set_shape_parameters(0.5, 0.5);
        quad.loglevel = Some("off".to_string());
        let res = quad.solve().unwrap();
        assert_eq!(quad.get_result(), Some(res));
    }
}
