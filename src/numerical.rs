/// the integrand: generating-function kernel of the Legendre polynomials,
/// singular as the shape parameters approach 1
pub mod integrand;
/// composite trapezoidal rule over equally spaced nodes
pub mod trapezoid;
/// adaptive bisection quadrature to a fixed absolute tolerance,
/// depth-first serial version and rayon fork-join version
///  Example
///  ```
///    use RustedParKernels::numerical::adaptive_quad::AdaptiveQuad;
///    let mut quad = AdaptiveQuad::new();
///    quad.set_interval(0.0, 1.0);
///    quad.set_shape_parameters(0.5, 0.5);
///    quad.set_parallel(true);
///    quad.solve().unwrap();
///    println!("integral = {:?}", quad.get_result().unwrap());
///  ```
pub mod adaptive_quad;
