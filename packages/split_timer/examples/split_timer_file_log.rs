//! Sends timer output to a log file in addition to the console.
//!
//! The log file is created in the system temporary directory. Debug messages are enabled,
//! so label creation and unit changes are recorded as well.
//!
//! Run with: `cargo run --example split_timer_file_log`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::FixedOffset;
use split_timer::{Logger, Timer, Unit};

fn main() {
    let path = std::env::temp_dir().join("split_timer_file_log.log");

    let offset = FixedOffset::east_opt(28_800).unwrap();
    let logger = Logger::builder("file_log_example")
        .file(&path)
        .utc_offset(offset)
        .debug(true)
        .build()
        .unwrap();

    let timer = Timer::builder()
        .labels(["fast", "slow"])
        .unit(Unit::Millisecond)
        .log(Arc::new(logger))
        .build();

    for _ in 0..5 {
        let _slow = timer.span("slow");
        thread::sleep(Duration::from_millis(20));

        {
            let _fast = timer.span("fast");
            thread::sleep(Duration::from_millis(2));
        }
    }

    // Misuse is logged at error level and does not stop the program.
    _ = timer.stop("never_started");
    _ = timer.set_unit("fortnight");

    timer.summary();

    println!("Log written to {}", path.display());
}
