//! In-memory event capture for log assertions
//!
//! [`init_test_capture`] installs a global subscriber whose only layer
//! records every event's fields as strings. Test binaries run their tests in
//! parallel against the one buffer, so lookups filter on an operation name
//! or on the `input` of a submission.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::types::schema::{
    EVENT_START, FIELD_EVENT, FIELD_INPUT, FIELD_OP, FIELD_SUBMISSION_ID,
};

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn submission_id(&self) -> Option<&str> {
        self.field(FIELD_SUBMISSION_ID)
    }
}

struct FieldRecorder<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    // Numbers and bools arrive here too; their Debug form is the plain value
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type EventBuffer = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    buffer: EventBuffer,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields,
        };
        if let Ok(mut events) = self.buffer.lock() {
            events.push(captured);
        }
    }
}

/// Read handle on the captured events
#[derive(Clone)]
pub struct TestCapture {
    buffer: EventBuffer,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.buffer
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op))
            .collect()
    }

    /// Every event of the submission whose `start` carried this input
    ///
    /// Uses the first matching submission, so inputs should be unique per
    /// test binary.
    pub fn submission(&self, input: &str) -> Vec<CapturedEvent> {
        let events = self.events();
        let Some(id) = events
            .iter()
            .find(|e| e.event() == Some(EVENT_START) && e.field(FIELD_INPUT) == Some(input))
            .and_then(|e| e.submission_id().map(str::to_string))
        else {
            return Vec::new();
        };
        events
            .into_iter()
            .filter(|e| e.submission_id() == Some(id.as_str()))
            .collect()
    }

    pub fn count_events(&self, predicate: impl Fn(&CapturedEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// # Panics
    /// If no event has this `op` and `event`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let found = self.count_events(|e| e.op() == Some(op) && e.event() == Some(event));
        assert!(
            found > 0,
            "Expected event op={} event={} not found",
            op,
            event
        );
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber (once per process) and return its handle
///
/// ```
/// use recordx_core::logging_facility::test_capture::init_test_capture;
/// use recordx_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_op");
/// capture.assert_event_exists("doc_capture_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let buffer = EventBuffer::default();
            let layer = CaptureLayer {
                buffer: Arc::clone(&buffer),
            };
            // Another subscriber may already be global; the handle then stays empty
            let _ = tracing_subscriber::registry().with(layer).try_init();
            TestCapture { buffer }
        })
        .clone()
}
