//! EventBridge scheduled invocations.

use aws_lambda_events::eventbridge::EventBridgeEvent;

/// Event delivered by an EventBridge schedule rule. Scheduled events carry an
/// empty `detail`.
pub type ScheduledEvent = EventBridgeEvent<serde_json::Value>;

/// Logs which rule fired this invocation.
pub fn log_trigger(event: &ScheduledEvent, request_id: &str) {
    tracing::info!(
        request_id,
        detail_type = %event.detail_type,
        source = %event.source,
        resources = ?event.resources,
        "Scheduled invocation"
    );
}


#[cfg(test)]
mod tests {
    use super::fixtures::scheduled_event;

    #[test]
    fn test_scheduled_event_detail_type() {
        let event = scheduled_event();

        assert_eq!(event.detail_type, "Scheduled Event");
        assert_eq!(event.source, "aws.events");
        assert!(event.detail.as_object().is_some_and(|d| d.is_empty()));
    }
}
