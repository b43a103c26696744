//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_VIEW_ID: &str = "view_id";
pub const FIELD_PASS_ID: &str = "pass_id";

// Delta sizes
pub const FIELD_NODES_ADDED: &str = "nodes_added";
pub const FIELD_NODES_REMOVED: &str = "nodes_removed";
pub const FIELD_NODES_CHANGED: &str = "nodes_changed";
pub const FIELD_EDGES_ADDED: &str = "edges_added";
pub const FIELD_EDGES_REMOVED: &str = "edges_removed";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_VIEW_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_delta_fields_are_distinct() {
        let fields = [
            FIELD_NODES_ADDED,
            FIELD_NODES_REMOVED,
            FIELD_NODES_CHANGED,
            FIELD_EDGES_ADDED,
            FIELD_EDGES_REMOVED,
        ];
        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
