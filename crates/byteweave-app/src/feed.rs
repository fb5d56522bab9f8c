//! Frame feed: a reader thread pumping capture lines into the session.

use std::io::BufRead;

use byteweave_decode::{BusEvent, RawFrame};
use crossbeam_channel::{unbounded, Receiver};

#[derive(Debug)]
pub enum FeedEvent {
    Frame(BusEvent),
    /// A line that could not become an event; the stream keeps flowing.
    Skipped { line: usize, reason: String },
    Eof,
}

pub struct FrameFeed {
    rx_evt: Receiver<FeedEvent>,
}

impl FrameFeed {
    /// Spawn a reader thread consuming `reader` line by line. Each line is
    /// one JSON frame as emitted by the upstream decoders.
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx_evt, rx_evt) = unbounded::<FeedEvent>();

        std::thread::spawn(move || {
            for (idx, line) in reader.lines().enumerate() {
                let line_no = idx + 1;
                let event = match line {
                    Ok(text) => {
                        if text.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<RawFrame>(&text) {
                            Ok(frame) => match BusEvent::try_from(frame) {
                                Ok(event) => FeedEvent::Frame(event),
                                Err(e) => FeedEvent::Skipped {
                                    line: line_no,
                                    reason: e.to_string(),
                                },
                            },
                            Err(e) => FeedEvent::Skipped {
                                line: line_no,
                                reason: e.to_string(),
                            },
                        }
                    }
                    Err(e) => FeedEvent::Skipped {
                        line: line_no,
                        reason: e.to_string(),
                    },
                };
                if tx_evt.send(event).is_err() {
                    return;
                }
            }
            let _ = tx_evt.send(FeedEvent::Eof);
        });

        Self { rx_evt }
    }

    pub fn events(&self) -> &Receiver<FeedEvent> {
        &self.rx_evt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn pumps_frames_and_skips_garbage() {
        let input = concat!(
            r#"{"type":"data","start_ns":0,"end_ns":100,"data":72}"#,
            "\n",
            "not json\n",
            "\n",
            r#"{"type":"stop","start_ns":200,"end_ns":300}"#,
            "\n",
        );
        let feed = FrameFeed::spawn(Cursor::new(input));

        let mut frames = 0;
        let mut skipped = Vec::new();
        loop {
            match feed.events().recv().unwrap() {
                FeedEvent::Frame(_) => frames += 1,
                FeedEvent::Skipped { line, .. } => skipped.push(line),
                FeedEvent::Eof => break,
            }
        }
        assert_eq!(frames, 2);
        assert_eq!(skipped, vec![2]);
    }

    #[test]
    fn unrecognized_frame_type_is_skipped_in_place() {
        let input = concat!(
            r#"{"type":"wobble","start_ns":0,"end_ns":1}"#,
            "\n",
            r#"{"type":"start","start_ns":2,"end_ns":3}"#,
            "\n",
        );
        let feed = FrameFeed::spawn(Cursor::new(input));

        match feed.events().recv().unwrap() {
            FeedEvent::Skipped { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains("wobble"));
            }
            other => panic!("unexpected feed event {other:?}"),
        }
        assert!(matches!(
            feed.events().recv().unwrap(),
            FeedEvent::Frame(BusEvent::Start { .. })
        ));
    }
}
