//! Thread safety integration tests for `split_timer`.
//!
//! These tests verify that a timer can be shared and moved between threads.

use std::sync::Arc;
use std::thread;

use split_timer::{Error, Timer};

fn quiet_timer() -> Timer {
    Timer::builder()
        .log(Arc::new(split_timer::Logger::console("thread_safety_tests")))
        .build()
}

#[test]
fn timer_can_be_moved_between_threads() {
    let timer = quiet_timer();

    let handle = thread::spawn(move || {
        timer.start("moved");
        timer.stop("moved").unwrap();
        timer
    });

    let timer = handle.join().unwrap();
    assert_eq!(timer.label("moved").unwrap().count(), 1);
}

#[test]
fn threads_measure_their_own_labels() {
    let timer = Arc::new(quiet_timer());

    let handles = (0..8)
        .map(|index| {
            let timer = Arc::clone(&timer);
            thread::spawn(move || {
                let name = format!("worker_{index}");
                for _ in 0..100 {
                    timer.start(&name);
                    std::hint::black_box(index);
                    timer.stop(&name).unwrap();
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(timer.len(), 8);
    assert!(timer.data().all(|row| row.count() == 100));
}

#[test]
fn concurrent_remove_and_stop_never_corrupt_state() {
    let timer = Arc::new(quiet_timer());

    let stopper = {
        let timer = Arc::clone(&timer);
        thread::spawn(move || {
            for _ in 0..500 {
                timer.start("contested");
                match timer.stop("contested") {
                    Ok(elapsed) => assert!(elapsed >= 0.0),
                    Err(Error::MissingStart { .. }) => {}
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
        })
    };

    let remover = {
        let timer = Arc::clone(&timer);
        thread::spawn(move || {
            for _ in 0..500 {
                match timer.remove_label("contested") {
                    Ok(()) | Err(Error::UnknownLabel { .. }) => {}
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
        })
    };

    stopper.join().unwrap();
    remover.join().unwrap();

    // Whatever survived must still be internally consistent.
    if let Some(label) = timer.label("contested") {
        assert!(label.history().all(|value| label.min() <= value && value <= label.max()));
    }
}
