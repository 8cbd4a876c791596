use std::time::{Duration, Instant};
use tabled::{builder::Builder, settings::Style};

/// Wall-clock timer for the serial-vs-parallel comparison the two kernels
/// exist for. tic starts a measurement, tac accumulates it.
#[derive(Debug, Clone)]
pub struct KernelTimer {
    pub serial_time: Instant,
    pub serial: Duration,
    pub parallel_time: Instant,
    pub parallel: Duration,
}

impl KernelTimer {
    pub fn new() -> KernelTimer {
        KernelTimer {
            serial_time: Instant::now(),
            serial: Duration::from_secs(0),
            parallel_time: Instant::now(),
            parallel: Duration::from_secs(0),
        }
    }
    pub fn serial_tic(&mut self) {
        self.serial_time = Instant::now();
    }
    pub fn serial_tac(&mut self) {
        self.serial += self.serial_time.elapsed();
    }
    pub fn parallel_tic(&mut self) {
        self.parallel_time = Instant::now();
    }
    pub fn parallel_tac(&mut self) {
        self.parallel += self.parallel_time.elapsed();
    }
    /// speedup of the parallel run over the serial one
    pub fn speedup(&self) -> f64 {
        self.serial.as_secs_f64() / self.parallel.as_secs_f64()
    }
    /// human-readable comparison table
    pub fn report(&self, label: &str) -> String {
        let mut builder = Builder::default();
        builder.push_record(["kernel", "serial", "parallel", "speedup"]);
        builder.push_record([
            label.to_string(),
            format!("{:?}", self.serial),
            format!("{:?}", self.parallel),
            format!("{:.2}x", self.speedup()),
        ]);
        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }
}

impl Default for KernelTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_timer_accumulates() {
        let mut timer = KernelTimer::new();
        timer.serial_tic();
        sleep(Duration::from_millis(5));
        timer.serial_tac();
        timer.serial_tic();
        sleep(Duration::from_millis(5));
        timer.serial_tac();
        assert!(timer.serial >= Duration::from_millis(10));
        assert_eq!(timer.parallel, Duration::from_secs(0));
    }

    #[test]
    fn test_report_contains_label_and_speedup() {
        let mut timer = KernelTimer::new();
        timer.serial_tic();
        sleep(Duration::from_millis(2));
        timer.serial_tac();
        timer.parallel_tic();
        sleep(Duration::from_millis(1));
        timer.parallel_tac();
        let report = timer.report("gauss_jordan");
        assert!(report.contains("gauss_jordan"));
        assert!(report.contains("x"));
        assert!(timer.speedup() > 0.0);
    }
}
