//! Command-line host for the block runtime.
//!
//! Loads a serialized program and drives it in time slices until it ends,
//! fails, or the user interrupts with Ctrl-C.

use ansi_term::Colour::Red;
use block::lang::Error;
use block::mach::{ConsoleOutput, NullCanvas, Runtime};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Steps executed between interrupt checks.
const STEPS_PER_SLICE: usize = 10_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: block <program.json>");
            std::process::exit(2);
        }
    };
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}: {}", path, error);
            std::process::exit(2);
        }
    };

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        if let Err(error) = ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst)) {
            tracing::warn!(%error, "interrupt handler unavailable");
        }
    }

    let mut runtime = Runtime::new();
    if let Err(error) = runtime.load(&source) {
        report(&error);
        std::process::exit(1);
    }

    let started = chrono::Local::now();
    tracing::info!(%path, "program started at {}", started.format("%H:%M:%S"));

    let mut out = ConsoleOutput;
    let mut canvas = NullCanvas;
    'slices: loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.terminate();
            eprintln!("{}", Red.paint("?BREAK"));
            std::process::exit(130);
        }
        for _ in 0..STEPS_PER_SLICE {
            let running: Result<bool, Error> = runtime.step(&mut out, &mut canvas);
            match running {
                Ok(true) => {}
                Ok(false) => break 'slices,
                Err(error) => {
                    report(&error);
                    std::process::exit(1);
                }
            }
        }
    }

    let elapsed = chrono::Local::now() - started;
    tracing::info!(
        "completed in {}.{:03}s",
        elapsed.num_seconds(),
        elapsed.num_milliseconds() % 1000
    );
}

fn report(error: &Error) {
    eprintln!("{}", Red.paint(format!("?{}", error)));
}
