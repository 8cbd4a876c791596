/// tic/tac timing of serial vs parallel kernel runs and a table report
pub mod bench_tools;
