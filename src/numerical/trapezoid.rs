/// default number of panels of the composite rule
pub const DEFAULT_PANELS: usize = 10;

/// Composite trapezoidal rule over [a, b] with n equally spaced panels:
/// h = (b - a)/n, sum = (f(a) + f(b))/2 + sum_{i=1}^{n-1} f(a + i*h), result = sum*h.
/// Costs n + 1 evaluations of `func`, deterministic, no side effects.
pub fn composite_trapezoid<F>(a: f64, b: f64, func: &F, alpha: f64, beta: f64, n: usize) -> f64
where
    F: Fn(f64, f64, f64) -> f64,
{
    assert!(n >= 1, "composite rule needs at least one panel");
    let h = (b - a) / (n as f64);
    let mut sum = 0.5 * (func(a, alpha, beta) + func(b, alpha, beta));
    for i in 1..n {
        let x = a + (i as f64) * h;
        sum += func(x, alpha, beta);
    }
    sum * h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::integrand::kernel_f;
    use approx::relative_eq;

    #[test]
    fn test_single_panel_constant() {
        // with alpha = beta = 0 the kernel is identically 1, and a single
        // trapezoid over [0, 1] must give exactly 1.0
        let res = composite_trapezoid(0.0, 1.0, &kernel_f, 0.0, 0.0, 1);
        assert_eq!(res, 1.0);
    }

    #[test]
    fn test_converges_to_closed_form() {
        // alpha = beta = 0.5: integral of 1/(1.25 - x) over [0, 1] is ln(5)
        let exact = 5.0_f64.ln();
        let coarse = composite_trapezoid(0.0, 1.0, &kernel_f, 0.5, 0.5, DEFAULT_PANELS);
        let fine = composite_trapezoid(0.0, 1.0, &kernel_f, 0.5, 0.5, 10_000);
        assert!((fine - exact).abs() < (coarse - exact).abs());
        assert!(relative_eq!(fine, exact, epsilon = 1e-6));
    }

    #[test]
    fn test_linear_integrand_is_exact() {
        // the trapezoidal rule is exact for linear functions regardless of n
        let linear = |x: f64, _: f64, _: f64| 3.0 * x + 2.0;
        let res = composite_trapezoid(0.0, 2.0, &linear, 0.0, 0.0, 1);
        assert!(relative_eq!(res, 10.0, epsilon = 1e-12));
    }

    #[test]
    #[should_panic]
    fn test_zero_panels_panics() {
        composite_trapezoid(0.0, 1.0, &kernel_f, 0.0, 0.0, 0);
    }
}
