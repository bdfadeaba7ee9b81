//! Wire-shape contract tests
//!
//! These tests pin the JSON shapes of the protocol models as emitted
//! by live emulators, not just as constructed by hand. Dependent test
//! suites deserialize these shapes; a field rename here is a breaking
//! change for them.

#[cfg(test)]
mod tests {
    use crate::test_helpers::*;
    use protocol::{BroadcastMessage, ExecuteRequest, KernelStatus};
    use signals::Recorder;

    #[test]
    fn test_live_status_broadcast_shape() {
        let context = layered_context();
        let kernel = context.kernel().unwrap();
        let broadcasts = Recorder::new();
        broadcasts.attach(&context.broadcast_message());

        kernel.set_status(KernelStatus::Busy);

        let json = serde_json::to_value(&broadcasts.events()[0]).unwrap();
        assert_eq!(json["msg_type"], "status");
        assert_eq!(json["content"]["execution_state"], "busy");
        assert_eq!(json["header"]["session"], json["parent_header"]["session"]);
    }

    #[test]
    fn test_live_execute_input_broadcast_shape() {
        let context = layered_context();
        let kernel = context.kernel().unwrap();
        let broadcasts = Recorder::new();
        broadcasts.attach(&context.broadcast_message());

        let future = kernel.request_execute(ExecuteRequest::new("2 + 2")).unwrap();

        let json = serde_json::to_value(&broadcasts.events()[0]).unwrap();
        assert_eq!(json["msg_type"], "execute_input");
        assert_eq!(json["content"]["code"], "2 + 2");
        assert_eq!(json["content"]["execution_count"], 1);
        assert_eq!(
            json["parent_header"]["msg_id"],
            future.msg_id().as_uuid().to_string()
        );
    }

    #[test]
    fn test_broadcasts_deserialize_back() {
        let context = layered_context();
        let kernel = context.kernel().unwrap();
        let broadcasts = Recorder::new();
        broadcasts.attach(&kernel.broadcast_message());

        kernel.request_execute(ExecuteRequest::new("1")).unwrap();
        kernel.set_status(KernelStatus::Idle);

        for message in broadcasts.events() {
            let json = serde_json::to_string(&message).unwrap();
            let back: BroadcastMessage = serde_json::from_str(&json).unwrap();
            assert_eq!(back, message);
        }
    }

    #[test]
    fn test_session_model_shape() {
        let context = layered_context();
        let json = serde_json::to_value(context.session().model()).unwrap();

        assert_eq!(json["type"], "notebook");
        assert_eq!(json["path"], "contract.ipynb");
        assert_eq!(json["name"], "contract");
        assert_eq!(json["kernel"]["name"], "python3");
        // The wire field is "type"; the struct field name must not
        // leak into the serialization.
        assert!(json.get("session_type").is_none());
    }

    #[test]
    fn test_kernel_status_vocabulary_is_complete() {
        for status in KernelStatus::all() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_kernel_spec_shape() {
        let (catalog, _registry) = fixture();
        let json = serde_json::to_value(catalog.get("python3").unwrap()).unwrap();

        assert_eq!(json["name"], "python3");
        assert_eq!(json["display_name"], "Python 3 (emulated)");
        assert_eq!(json["language"], "python");
        assert_eq!(json["argv"][1], "-m");
    }
}
