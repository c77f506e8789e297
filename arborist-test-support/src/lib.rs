//! Shared test utilities used across arborist crates.

pub mod ci;

pub mod tracing {
    //! A capturing layer for asserting on instrumentation in tests.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Layer that keeps every emitted event and every created span, with the
    /// span fields recorded so far, in order.
    ///
    /// # Examples
    /// ```
    /// use arborist_test_support::tracing::CaptureLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let capture = CaptureLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(capture.clone());
    /// tracing::subscriber::with_default(subscriber, || {
    ///     let _span = tracing::info_span!("msa.fast").entered();
    ///     tracing::info!(contractions = 2, "arborescence computed");
    /// });
    /// assert_eq!(capture.span_names(), vec!["msa.fast".to_owned()]);
    /// let event = capture
    ///     .find_event("arborescence computed")
    ///     .expect("event recorded");
    /// assert_eq!(event.field("contractions"), Some("2"));
    /// ```
    #[derive(Clone, Default)]
    pub struct CaptureLayer {
        inner: Arc<Mutex<Captured>>,
    }

    #[derive(Default)]
    struct Captured {
        spans: Vec<CapturedSpan>,
        span_slots: HashMap<Id, usize>,
        events: Vec<CapturedEvent>,
    }

    /// One recorded span.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedSpan {
        /// Span name.
        pub name: String,
        /// Fields recorded at creation or later through `Span::record`.
        pub fields: HashMap<String, String>,
    }

    impl CapturedSpan {
        /// Returns the formatted value of `name`, if recorded.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// One recorded event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedEvent {
        /// Level the event was emitted at.
        pub level: Level,
        /// Name of the innermost span active when the event fired.
        pub span: Option<String>,
        /// Formatted fields, including `message`.
        pub fields: HashMap<String, String>,
    }

    impl CapturedEvent {
        /// Returns the formatted value of `name`, if recorded.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }

        /// Returns the event message.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }
    }

    impl CaptureLayer {
        fn lock(&self) -> MutexGuard<'_, Captured> {
            self.inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }

        /// Names of spans created so far, in creation order.
        #[must_use]
        pub fn span_names(&self) -> Vec<String> {
            self.lock().spans.iter().map(|span| span.name.clone()).collect()
        }

        /// Returns the first span called `name`.
        #[must_use]
        pub fn find_span(&self, name: &str) -> Option<CapturedSpan> {
            self.lock()
                .spans
                .iter()
                .find(|span| span.name == name)
                .cloned()
        }

        /// Events recorded so far, in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<CapturedEvent> {
            self.lock().events.clone()
        }

        /// Returns the first event whose message equals `message`.
        #[must_use]
        pub fn find_event(&self, message: &str) -> Option<CapturedEvent> {
            self.lock()
                .events
                .iter()
                .find(|event| event.message() == Some(message))
                .cloned()
        }
    }

    impl<S> Layer<S> for CaptureLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            attrs.record(&mut FieldCollector(&mut fields));
            let mut captured = self.lock();
            let slot = captured.spans.len();
            captured.spans.push(CapturedSpan {
                name: attrs.metadata().name().to_owned(),
                fields,
            });
            captured.span_slots.insert(id.clone(), slot);
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
            let mut captured = self.lock();
            let Some(slot) = captured.span_slots.get(id).copied() else {
                return;
            };
            if let Some(span) = captured.spans.get_mut(slot) {
                values.record(&mut FieldCollector(&mut span.fields));
            }
        }

        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldCollector(&mut fields));
            let span = ctx
                .event_span(event)
                .map(|span| span.name().to_owned());
            self.lock().events.push(CapturedEvent {
                level: *event.metadata().level(),
                span,
                fields,
            });
        }
    }

    struct FieldCollector<'a>(&'a mut HashMap<String, String>);

    impl Visit for FieldCollector<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }
    }
}
