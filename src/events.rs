// Events that flow from the polling task to the TUI
//
// The poller classifies each fetch and broadcasts the result over an
// mpsc channel; the TUI consumes the freshest state only. Using an enum
// keeps the channel type-safe across tasks.

use crate::query::ScalarOutcome;

/// One notification from the polling layer to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Redraw the gauge. `Some(value)` carries a new scalar; `None`
    /// means re-render with the existing state (settings-only change),
    /// not "clear the gauge".
    Redraw(Option<f64>),

    /// Replace the widget's error message list. Sent on every completed
    /// poll so stale errors never linger.
    Errors(Vec<String>),
}

impl WidgetEvent {
    /// Translate one poll outcome into the events it implies.
    ///
    /// Success clears errors and redraws with the new scalar; a skipped
    /// poll only clears errors; failures replace the message list and
    /// do not redraw.
    pub fn from_outcome(outcome: ScalarOutcome) -> Vec<WidgetEvent> {
        match outcome {
            ScalarOutcome::Scalar(value) => vec![
                WidgetEvent::Errors(Vec::new()),
                WidgetEvent::Redraw(Some(value)),
            ],
            ScalarOutcome::Skipped => vec![WidgetEvent::Errors(Vec::new())],
            ScalarOutcome::QueryError(message) | ScalarOutcome::UnsupportedType(message) => {
                vec![WidgetEvent::Errors(vec![message])]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_clears_errors_then_redraws() {
        let events = WidgetEvent::from_outcome(ScalarOutcome::Scalar(1.0));
        assert_eq!(
            events,
            vec![
                WidgetEvent::Errors(Vec::new()),
                WidgetEvent::Redraw(Some(1.0)),
            ]
        );
    }

    #[test]
    fn skipped_only_clears_errors() {
        let events = WidgetEvent::from_outcome(ScalarOutcome::Skipped);
        assert_eq!(events, vec![WidgetEvent::Errors(Vec::new())]);
    }

    #[test]
    fn query_error_replaces_messages_without_redraw() {
        let events =
            WidgetEvent::from_outcome(ScalarOutcome::QueryError("Expression up: boom".into()));
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], WidgetEvent::Errors(msgs) if msgs.len() == 1));
    }

    #[test]
    fn unsupported_type_replaces_messages_without_redraw() {
        let events = WidgetEvent::from_outcome(ScalarOutcome::UnsupportedType(
            "Expression up: Result type \"matrix\" cannot be gauged. Must be scalar type.".into(),
        ));
        assert!(matches!(&events[0], WidgetEvent::Errors(msgs) if msgs[0].contains("matrix")));
    }
}
