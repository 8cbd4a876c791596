use log::warn;

/// Generating-function kernel of the Legendre polynomials,
/// f(x) = 1 / ( sqrt(1 - 2*alpha*x + alpha^2) * sqrt(1 - 2*beta*x + beta^2) ).
/// Pure function of the position x and the two shape parameters. For the value to stay
/// finite both radicands must be positive; alpha, beta -> 1 drives the kernel toward
/// a singularity at x = 1. Out of domain the function silently returns inf/NaN,
/// so callers check the domain with `kernel_domain_ok` first.
pub fn kernel_f(x: f64, alpha: f64, beta: f64) -> f64 {
    let term1 = (1.0 - 2.0 * alpha * x + alpha * alpha).sqrt();
    let term2 = (1.0 - 2.0 * beta * x + beta * beta).sqrt();
    1.0 / (term1 * term2)
}

/// radicand of one square-root factor, 1 - 2*p*x + p^2
pub fn radicand(x: f64, p: f64) -> f64 {
    1.0 - 2.0 * p * x + p * p
}

/// true when both radicands stay strictly positive over the whole interval [a, b].
/// The radicand is linear in x, so it is enough to check the two endpoints.
pub fn kernel_domain_ok(a: f64, b: f64, alpha: f64, beta: f64) -> bool {
    let positive_on_interval = |p: f64| radicand(a, p) > 0.0 && radicand(b, p) > 0.0;
    let ok = positive_on_interval(alpha) && positive_on_interval(beta);
    if !ok {
        warn!(
            "kernel radicand is non-positive somewhere on [{}, {}] for alpha = {}, beta = {}",
            a, b, alpha, beta
        );
    }
    ok
}
