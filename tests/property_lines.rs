use proptest::prelude::*;

use linegate::{
    core::serialized::{SerializedSink, SinkConfig},
    format::{JsonLine, LineFormat},
    sink::BufferSink,
};

proptest! {
    #[test]
    fn text_lines_frame_arbitrary_single_line_text(
        texts in prop::collection::vec("[^\r\n]{0,40}", 1..30),
        id in 0usize..1000,
    ) {
        let buf = BufferSink::new();
        let sink = SerializedSink::new(buf.clone());
        for text in &texts {
            sink.emit(text, id).expect("emit");
        }

        let lines = buf.lines();
        prop_assert_eq!(lines.len(), texts.len());
        for (line, text) in lines.iter().zip(&texts) {
            prop_assert_eq!(line, &format!("Message: \"{text}\" from thread: {id}"));
        }
    }

    #[test]
    fn json_lines_round_trip_any_text(texts in prop::collection::vec(any::<String>(), 1..20)) {
        let buf = BufferSink::new();
        let sink = SerializedSink::with_config(
            buf.clone(),
            SinkConfig { format: LineFormat::Json, flush_each_line: false },
        );
        for text in &texts {
            sink.emit(text, "p").expect("emit");
        }

        let lines = buf.lines();
        prop_assert_eq!(lines.len(), texts.len());
        for (line, text) in lines.iter().zip(&texts) {
            let parsed: JsonLine = serde_json::from_str(line).expect("json");
            prop_assert_eq!(&parsed.message, text);
            prop_assert_eq!(parsed.worker.as_str(), "p");
        }
    }
}
