//! Tracing support.
//!
//! This module re-exports the `tracing` event macros when the `tracing`
//! feature is enabled, and provides no-op stand-ins when it's disabled so
//! call sites compile either way.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing_subscriber::{
        Layer, Registry, filter::LevelFilter, layer::Context, layer::SubscriberExt,
        registry::LookupSpan, util::SubscriberInitExt,
    };

    #[derive(Default)]
    struct SpanTiming {
        total: Duration,
        count: usize,
    }

    thread_local! {
        static SPAN_TIMINGS: RefCell<BTreeMap<&'static str, SpanTiming>> =
            const { RefCell::new(BTreeMap::new()) };
    }

    /// Accumulates the wall time of every closed span, by span name, for the
    /// current thread.
    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else { return };
            let Some(elapsed) = span.extensions().get::<Instant>().map(Instant::elapsed) else {
                return;
            };
            SPAN_TIMINGS.with(|timings| {
                let mut timings = timings.borrow_mut();
                let timing = timings.entry(span.metadata().name()).or_default();
                timing.total += elapsed;
                timing.count += 1;
            });
        }
    }

    /// Installs a global subscriber that times spans and writes debug-level
    /// events to the test output.  Safe to call any number of times.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = Registry::default()
                .with(TimingLayer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_test_writer()
                        .with_filter(LevelFilter::DEBUG),
                )
                .try_init();
        });
    }

    #[doc(hidden)]
    pub fn reset_span_timings() {
        init_tracing();
        SPAN_TIMINGS.with(|timings| timings.borrow_mut().clear());
    }

    #[doc(hidden)]
    pub fn dump_span_timings() {
        SPAN_TIMINGS.with(|timings| {
            let timings = timings.borrow();
            let mut slowest: Vec<_> = timings.iter().collect();
            slowest.sort_by_key(|(_, timing)| std::cmp::Reverse(timing.total));
            eprintln!("Span timings, slowest first:");
            for (name, SpanTiming { total, count }) in slowest {
                eprintln!("  {name}: {total:?} over {count} spans");
            }
        });
    }

    pub(crate) use tracing::{debug, info_span, trace};
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    pub fn init_tracing() {
        // No-op when tracing is disabled
    }

    #[doc(hidden)]
    pub fn reset_span_timings() {
        // No-op when tracing is disabled
    }

    #[doc(hidden)]
    pub fn dump_span_timings() {
        // No-op when tracing is disabled
    }

    macro_rules! trace {
        ($($arg:tt)*) => {{}};
    }

    macro_rules! debug {
        ($($arg:tt)*) => {{}};
    }

    macro_rules! info_span {
        ($($arg:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    pub(crate) use {debug, info_span, trace};

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
