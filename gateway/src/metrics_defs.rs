//! Metrics emitted by the gateway crate.

use shared::metrics_defs::{MetricDef, MetricType};

pub const API_REQUESTS: MetricDef = MetricDef {
    name: "gateway.api.requests",
    metric_type: MetricType::Counter,
    description: "Inbound API requests, labeled by vendor",
};

pub const API_UNKNOWN_VENDOR: MetricDef = MetricDef {
    name: "gateway.api.unknown_vendor",
    metric_type: MetricType::Counter,
    description: "Requests naming a vendor the gateway does not serve",
};

pub const API_REQUEST_DURATION: MetricDef = MetricDef {
    name: "gateway.api.request_duration_seconds",
    metric_type: MetricType::Histogram,
    description: "Wall time spent handling one inbound request",
};
