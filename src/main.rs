#![allow(non_snake_case)]
use RustedParKernels::Utils::bench_tools::KernelTimer;
use RustedParKernels::numerical::adaptive_quad::AdaptiveQuad;
use RustedParKernels::somelinalg::aug_matrix::AugMatrix;
use RustedParKernels::somelinalg::gauss_jordan::solve_linear_system;
use RustedParKernels::somelinalg::linear_sys_diagnostics::verify_system;
use log::info;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

fn main() {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);

    let example = 2;
    match example {
        0 => {
            // ADAPTIVE QUADRATURE, SERIAL VS PARALLEL
            // integral of 1/(sqrt(1 - x + 0.25) * sqrt(1 - x + 0.25)) over [0, 1],
            // closed form ln(5)
            let (alpha, beta) = (0.5, 0.5);
            let (a, b) = (0.0, 1.0);
            let mut timer = KernelTimer::new();

            let mut quad = AdaptiveQuad::new();
            quad.set_interval(a, b);
            quad.set_shape_parameters(alpha, beta);
            timer.serial_tic();
            let serial = quad.solve().expect("serial quadrature failed");
            timer.serial_tac();
            println!("serial adaptive quadrature:   {}", serial);

            quad.set_parallel(true);
            timer.parallel_tic();
            let parallel = quad.solve().expect("parallel quadrature failed");
            timer.parallel_tac();
            println!("parallel adaptive quadrature: {}", parallel);
            println!("closed form ln(5) =           {}", 5.0_f64.ln());
            println!("{}", timer.report("adaptive_quad"));
        }
        1 => {
            // GAUSS-JORDAN ON A RANDOM SYSTEM, SERIAL VS PARALLEL
            let n = 50;
            let mut ar1 = AugMatrix::random(n);
            let mut ar2 = ar1.clone(); // same system for the parallel run
            let mut timer = KernelTimer::new();

            timer.serial_tic();
            solve_linear_system(&mut ar1, false).expect("serial solve failed");
            timer.serial_tac();

            timer.parallel_tic();
            solve_linear_system(&mut ar2, true).expect("parallel solve failed");
            timer.parallel_tac();

            println!("serial solution head:   {:?}", &ar1.solution().as_slice()[..5]);
            println!("parallel solution head: {:?}", &ar2.solution().as_slice()[..5]);
            println!("{}", timer.report("gauss_jordan"));
        }
        2 => {
            // BOTH KERNELS, WITH A PRE-SOLVE DIAGNOSTIC ON THE LINEAR SYSTEM
            let mut quad = AdaptiveQuad::new();
            quad.set_interval(0.0, 1.0);
            quad.set_shape_parameters(0.5, 0.5);
            quad.set_parallel(true);
            let integral = quad.solve().expect("quadrature failed");
            println!("integral = {}", integral);

            let m = AugMatrix::random(10);
            if verify_system(&m, 1e8) {
                info!("system passed diagnostics");
            }
            println!("{}", m);
            let mut m = m;
            solve_linear_system(&mut m, true).expect("solve failed");
            println!("solution: {:?}", m.solution().as_slice());
        }
        _ => {
            println!("no such example");
        }
    }
}
