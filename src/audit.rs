use serde_json::Value;

/// Structured audit trail, emitted on the `audit` tracing target.
pub fn log_audit(actor: Option<&str>, action: &str, resource: Option<&str>, metadata: Option<Value>) {
    let metadata = metadata.unwrap_or(Value::Null);
    tracing::info!(
        target: "audit",
        actor = actor.unwrap_or("-"),
        action,
        resource = resource.unwrap_or("-"),
        %metadata,
        "audit"
    );
}
