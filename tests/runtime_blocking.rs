use std::{sync::Arc, time::Duration};

use linegate::{
    core::serialized::{SerializedSink, SinkConfig},
    format::{JsonLine, LineFormat},
    runtime::{
        blocking::launch_blocking,
        launcher::{LaunchConfig, LaunchError},
    },
    sink::BufferSink,
};

#[tokio::test]
async fn blocking_workers_all_report_back() {
    let buf = BufferSink::new();
    let sink = Arc::new(SerializedSink::new(buf.clone()));

    let report = launch_blocking(Arc::clone(&sink), 12, &LaunchConfig::default(), |worker| {
        for seq in 0..3 {
            worker.emit(&format!("seq {seq}"))?;
        }
        Ok(())
    })
    .await
    .expect("launch");

    assert!(report.is_clean());
    assert_eq!(report.len(), 12);
    assert_eq!(report.total_emitted(), 36);
    assert_eq!(buf.lines().len(), 36);
}

#[tokio::test]
async fn json_lines_parse_back() {
    let buf = BufferSink::new();
    let config = SinkConfig {
        format: LineFormat::Json,
        ..SinkConfig::default()
    };
    let sink = Arc::new(SerializedSink::with_config(buf.clone(), config));

    launch_blocking(sink, 4, &LaunchConfig::default(), |worker| {
        worker.emit("say \"hi\"")
    })
    .await
    .expect("launch");

    let mut workers: Vec<String> = buf
        .lines()
        .iter()
        .map(|line| {
            let parsed: JsonLine = serde_json::from_str(line).expect("json line");
            assert_eq!(parsed.message, "say \"hi\"");
            parsed.worker
        })
        .collect();
    workers.sort();
    assert_eq!(workers, vec!["0", "1", "2", "3"]);
}

#[tokio::test]
async fn join_timeout_surfaces_and_sink_outlives_stragglers() {
    let buf = BufferSink::new();
    let sink = Arc::new(SerializedSink::new(buf.clone()));
    let config = LaunchConfig {
        join_timeout_ms: Some(50),
        ..LaunchConfig::default()
    };

    let err = launch_blocking(Arc::clone(&sink), 2, &config, |worker| {
        std::thread::sleep(Duration::from_millis(400));
        worker.emit("late")
    })
    .await
    .unwrap_err();
    assert!(matches!(err, LaunchError::TimedOut { waited_ms: 50 }));

    // Stragglers still hold the sink; wait for them to finish writing.
    tokio::time::timeout(Duration::from_secs(5), async {
        while Arc::strong_count(&sink) > 1 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("stragglers finished");
    let mut lines = buf.lines();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "Message: \"late\" from thread: 0",
            "Message: \"late\" from thread: 1",
        ]
    );
}

#[tokio::test]
async fn panicking_blocking_worker_is_recorded() {
    let sink = Arc::new(SerializedSink::new(BufferSink::new()));

    let report = launch_blocking(sink, 3, &LaunchConfig::default(), |worker| {
        if worker.id().to_string() == "1" {
            panic!("boom");
        }
        worker.emit("ok")
    })
    .await
    .expect("launch");

    assert_eq!(report.failures().count(), 1);
    assert_eq!(report.total_emitted(), 2);
}
