//! Prometheus metrics for the slice management API

use anyhow::Result;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};
use rsm_core::RoutingError;
use std::sync::Arc;

/// Prometheus metrics collector for RSM operations
#[derive(Clone)]
pub struct RsmMetrics {
    /// Requests handled, by operation and outcome
    pub requests_total: CounterVec,
    /// Control messages accepted by a node's channel
    pub routed_messages_total: CounterVec,
    /// Control messages that could not be routed, by reason
    pub route_failures_total: CounterVec,
    pub registry: Arc<Registry>,
}

impl RsmMetrics {
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());

        let requests_total = CounterVec::new(
            Opts::new("rsm_requests_total", "Total RSM API requests"),
            &["operation", "outcome"],
        )?;

        let routed_messages_total = CounterVec::new(
            Opts::new(
                "rsm_routed_messages_total",
                "Control messages handed to an E2 node channel",
            ),
            &["node"],
        )?;

        let route_failures_total = CounterVec::new(
            Opts::new(
                "rsm_route_failures_total",
                "Control messages that could not be routed",
            ),
            &["reason"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(routed_messages_total.clone()))?;
        registry.register(Box::new(route_failures_total.clone()))?;

        Ok(Self {
            requests_total,
            routed_messages_total,
            route_failures_total,
            registry,
        })
    }

    pub fn record_request(&self, operation: &str, outcome: &str) {
        self.requests_total
            .with_label_values(&[operation, outcome])
            .inc();
    }

    pub fn record_routed(&self, node_id: &str) {
        self.routed_messages_total
            .with_label_values(&[node_id])
            .inc();
    }

    pub fn record_route_failure(&self, err: &RoutingError) {
        let reason = match err {
            RoutingError::UnknownNode(_) => "unknown_node",
            RoutingError::SendTimeout(_) => "send_timeout",
            RoutingError::ChannelClosed(_) => "channel_closed",
            RoutingError::NodeAlreadyAttached(_) => "already_attached",
        };
        self.route_failures_total.with_label_values(&[reason]).inc();
    }

    /// Gather all metrics in Prometheus text format
    pub fn gather(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = vec![];
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_text_format() {
        let metrics = RsmMetrics::new().expect("Failed to create metrics");
        metrics.record_request("create_slice", "ok");
        metrics.record_routed("node-1");
        metrics.record_route_failure(&RoutingError::UnknownNode("node-9".to_string()));

        let text = metrics.gather().expect("Failed to gather metrics");
        assert!(text.contains("# TYPE rsm_requests_total counter"));
        assert!(text.contains(r#"rsm_requests_total{operation="create_slice",outcome="ok"} 1"#));
        assert!(text.contains(r#"rsm_routed_messages_total{node="node-1"} 1"#));
        assert!(text.contains(r#"rsm_route_failures_total{reason="unknown_node"} 1"#));
    }

    #[test]
    fn test_clones_share_registry() {
        let first = RsmMetrics::new().expect("Failed to create metrics");
        let second = first.clone();
        second.record_request("delete_slice", "invalid");

        let text = first.gather().expect("Failed to gather metrics");
        assert!(text.contains(r#"operation="delete_slice""#));
    }
}
