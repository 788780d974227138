//! Measures two interleaved activities and prints their statistics.
//!
//! Label `a` is created up front, label `b` is created by its first start.
//!
//! Run with: `cargo run --example split_timer_basic`.

use std::thread;
use std::time::Duration;

use split_timer::Timer;

fn main() {
    let timer = Timer::new();
    timer.create("a").unwrap();

    for _ in 0..10 {
        timer.start("a");
        thread::sleep(Duration::from_millis(100));
        timer.stop("a").unwrap();

        timer.start("b");
        thread::sleep(Duration::from_millis(10));
        timer.stop("b").unwrap();
    }

    // The summary is logged at info level and also returned.
    timer.summary();

    timer.set_unit("ms").unwrap();
    for row in timer.data() {
        println!(
            "{}: {} measurements, {:.1} ms on average",
            row.name(),
            row.count(),
            row.average().unwrap_or_default()
        );
    }
}
