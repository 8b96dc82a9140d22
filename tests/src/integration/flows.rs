//! # Call Correlation Flows
//!
//! A real `BridgeContext` talking to a real `HostRuntime`:
//!
//! 1. **Request/response**: a call resolves with the host's return value
//! 2. **Host failure**: handler errors arrive as `HostReported` errors
//! 3. **Timeouts**: a slow host function fails the call, the late reply is stale
//! 4. **Concurrency**: many interleaved calls each get their own reply

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use std::time::Duration;

    use shared_wire::CallId;
    use wb_01_script_bridge::{BridgeError, RecordingChannel};
    use wb_02_host_runtime::{FunctionRegistry, HandlerError, HostConfig};

    use crate::Loopback;

    fn functions(registry: &mut FunctionRegistry) {
        registry.register_fn("math.add", |_ctx, args| {
            let a = args.first().and_then(Value::as_i64).ok_or(HandlerError::MissingArgument("a"))?;
            let b = args.get(1).and_then(Value::as_i64).ok_or(HandlerError::MissingArgument("b"))?;
            Ok(json!(a + b))
        });
        registry.register_async_fn("slow.echo", |_ctx, args| async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, HandlerError>(Value::Array(args))
        });
    }

    fn loopback(call_timeout: Duration) -> Loopback {
        Loopback::start(call_timeout, HostConfig::default(), functions)
    }

    #[tokio::test]
    async fn test_call_resolves_with_host_value() {
        let lb = loopback(Duration::from_secs(30));

        let result = lb.bridge.call("math.add", vec![json!(2), json!(40)]).await;

        assert_eq!(result.unwrap(), json!(42));
        assert_eq!(lb.bridge.pending_count(), 0);
        assert_eq!(lb.bridge.stats().completed(), 1);
        lb.shutdown().await;
    }

    #[tokio::test]
    async fn test_handler_error_surfaces_as_host_error() {
        let lb = loopback(Duration::from_secs(30));

        let err = lb
            .bridge
            .call("math.add", vec![json!(1)])
            .await
            .unwrap_err();

        let host_error = err.host_error().expect("host reported error");
        assert_eq!(host_error.message, "missing b argument");
        assert_eq!(lb.bridge.stats().failed(), 1);
        lb.shutdown().await;
    }

    #[tokio::test]
    async fn test_unknown_function_rejected_by_host() {
        let lb = loopback(Duration::from_secs(30));

        let err = lb.bridge.call("fs.readFile", vec![]).await.unwrap_err();

        assert_eq!(
            err.host_error().map(|e| e.message.as_str()),
            Some("Function 'fs.readFile' not found")
        );
        lb.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_host_times_out_and_late_reply_is_stale() {
        let lb = loopback(Duration::from_secs(1));

        let reply = lb.bridge.call("slow.echo", vec![json!("late")]);
        let id = reply.call_id().expect("allocated id");
        let err = reply.await.unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Timeout waiting for response from slow.echo (1s)"
        );
        assert!(!lb.bridge.has_pending(id));

        // Let the host finish; its reply finds nothing to settle.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(lb.bridge.stats().timed_out(), 1);
        assert_eq!(lb.bridge.stats().stale(), 1);
        lb.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_interleaved_calls_correlate() {
        let lb = loopback(Duration::from_secs(30));

        let replies: Vec<_> = (0..50)
            .map(|i| lb.bridge.call("math.add", vec![json!(i), json!(1000)]))
            .collect();
        let ids: Vec<CallId> = replies.iter().filter_map(|r| r.call_id()).collect();
        assert_eq!(ids, (1..=50).map(CallId::new).collect::<Vec<_>>());

        for (i, reply) in replies.into_iter().enumerate() {
            assert_eq!(reply.await.unwrap(), json!(i as i64 + 1000));
        }
        assert_eq!(lb.bridge.pending_count(), 0);
        lb.shutdown().await;
    }

    #[tokio::test]
    async fn test_detached_channel_fails_fast() {
        let lb = loopback(Duration::from_secs(30));
        lb.bridge.detach_channel();

        let reply = lb.bridge.call("math.add", vec![json!(1), json!(2)]);
        assert_eq!(reply.call_id(), None);
        assert!(matches!(
            reply.await,
            Err(BridgeError::ChannelUnavailable { .. })
        ));

        // Reattaching a different channel works without restarting anything.
        let recorder = std::sync::Arc::new(RecordingChannel::new());
        lb.bridge.attach_channel(recorder.clone());
        lb.bridge.notify("console.log", vec![json!("back")]);
        assert_eq!(recorder.messages().len(), 1);
        lb.shutdown().await;
    }
}
