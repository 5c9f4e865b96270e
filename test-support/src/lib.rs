// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! A tiny helper for testing convenience.

extern crate rand;
#[macro_use] extern crate slog;
extern crate slog_async;
extern crate slog_term;

use slog::Drain;

/// Create a simple `slog` logger for use in test programs.
///
/// It logs to the terminal in the compact format. This just saves a few
/// lines of drain boilerplate in every test and demo program.
pub fn default_log() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build().fuse();
    slog::Logger::root(drain, o!())
}


/// A simple utility for sampling random numbers.
///
/// The distribution can be uniform or log-uniform between the two bounds,
/// which are put in order for you.
pub struct Sampler {
    is_log: bool,
    low: f64,
    high: f64,
}

impl Sampler {
    /// Create a new uniform Sampler.
    pub fn uniform(low: f64, high: f64) -> Self {
        Sampler::new(false, low, high)
    }

    /// Create a new log-uniform Sampler.
    pub fn log_uniform(low: f64, high: f64) -> Self {
        Sampler::new(true, low, high)
    }

    fn new(is_log: bool, low: f64, high: f64) -> Self {
        let (mut lo, mut hi) = if low <= high { (low, high) } else { (high, low) };

        if is_log {
            lo = lo.ln();
            hi = hi.ln();
        }

        Sampler {
            is_log: is_log,
            low: lo,
            high: hi,
        }
    }

    /// Sample a number from the distribution.
    pub fn get(&self) -> f64 {
        let n = self.low + rand::random::<f64>() * (self.high - self.low);

        if self.is_log {
            n.exp()
        } else {
            n
        }
    }
}
