use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("chapka.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("chapka.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("chapka.client.request_duration_seconds");

pub(crate) static VIEW_JOINS: Counter = Counter::new("chapka.view.joins");
pub(crate) static VIEW_RESETS: Counter = Counter::new("chapka.view.resets");
pub(crate) static VIEW_SENDS: Counter = Counter::new("chapka.view.sends");
pub(crate) static VIEW_SEND_FAILURES: Counter = Counter::new("chapka.view.send_failures");
pub(crate) static VIEW_SESSIONS_ASSIGNED: Counter = Counter::new("chapka.view.sessions_assigned");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&VIEW_JOINS);
    collector.register_counter(&VIEW_RESETS);
    collector.register_counter(&VIEW_SENDS);
    collector.register_counter(&VIEW_SEND_FAILURES);
    collector.register_counter(&VIEW_SESSIONS_ASSIGNED);
}
