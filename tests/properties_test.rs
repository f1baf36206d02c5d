//! Property checks for the options builder, progress maths and event ordering.

use audioloader::backend::{event_channel, ProgressEvent};
use audioloader::downloader::{
    build, AudioCodec, AudioQuality, CancellationToken, DownloadRequest, SleepIntervals,
};
use audioloader::engine::ProgressUpdate;
use audioloader::gui::{EventBridge, UiState};
use proptest::prelude::*;

fn codec() -> impl Strategy<Value = AudioCodec> {
    prop::sample::select(AudioCodec::ALL.to_vec())
}

fn quality() -> impl Strategy<Value = AudioQuality> {
    prop::sample::select(AudioQuality::ALL.to_vec())
}

prop_compose! {
    fn request()(
        url in "https://[a-z]{1,12}\\.example/[a-z0-9]{1,16}",
        allow_playlist in any::<bool>(),
        convert_to_audio in any::<bool>(),
        audio_codec in codec(),
        audio_quality in quality(),
        embed_metadata in any::<bool>(),
        embed_thumbnail in any::<bool>(),
        safe_mode in any::<bool>(),
        min in -5.0f64..30.0,
        max in -5.0f64..30.0,
        retries in 0u32..20,
    ) -> DownloadRequest {
        let mut request = DownloadRequest::new(url, "/tmp/out");
        request.allow_playlist = allow_playlist;
        request.convert_to_audio = convert_to_audio;
        request.audio_codec = audio_codec;
        request.audio_quality = audio_quality;
        request.embed_metadata = embed_metadata;
        request.embed_thumbnail = embed_thumbnail;
        request.safe_mode = safe_mode;
        request.tuning.safe_mode_sleep = SleepIntervals { min, max, requests: 1.5 };
        request.tuning.retries = retries;
        request
    }
}

proptest! {
    #[test]
    fn build_is_deterministic(req in request()) {
        let token = CancellationToken::new();
        let a = build(&req, |_| {}, &token);
        let b = build(&req, |_| {}, &token);
        prop_assert_eq!(a.to_args(), b.to_args());
        prop_assert!(a == b);
    }

    #[test]
    fn safe_mode_controls_sleep_bounds(req in request()) {
        let options = build(&req, |_| {}, &CancellationToken::new());
        match options.sleep {
            Some(sleep) => {
                prop_assert!(req.safe_mode);
                prop_assert!(sleep.min > 0.0);
                prop_assert!(sleep.min <= sleep.max);
                prop_assert!(options.to_args().iter().any(|a| a == "--max-sleep-interval"));
            }
            None => {
                prop_assert!(!req.safe_mode);
                prop_assert!(!options.to_args().iter().any(|a| a.starts_with("--sleep")));
            }
        }
        prop_assert!(options.retries >= 1);
        prop_assert_eq!(options.no_playlist, !req.allow_playlist);
    }

    #[test]
    fn ratio_is_always_finite(downloaded in any::<u64>(), total in proptest::option::of(any::<u64>())) {
        let update = ProgressUpdate::downloading(downloaded, total);
        match update.ratio() {
            Some(r) => {
                prop_assert!(r.is_finite());
                prop_assert!((0.0..=1.0).contains(&r));
            }
            None => prop_assert!(total.unwrap_or(0) == 0),
        }
    }

    #[test]
    fn log_lines_arrive_in_send_order(lines in prop::collection::vec("[a-zA-Z0-9 ]{0,24}", 0..64)) {
        let (tx, rx) = event_channel();
        let mut bridge = EventBridge::new(rx);
        let mut ui = UiState::default();

        for line in &lines {
            tx.log(line.clone());
        }
        bridge.poll(&mut ui);

        let seen: Vec<_> = ui.transcript.iter().map(|l| l.text.clone()).collect();
        prop_assert_eq!(seen, lines);
    }
}

#[test]
fn async_consumer_sees_fifo_order() {
    let (tx, mut rx) = event_channel();
    let sender = std::thread::spawn(move || {
        for i in 0..200u64 {
            tx.send(ProgressEvent::Progress(ProgressUpdate::downloading(i, Some(200))));
        }
        tx.send(ProgressEvent::Done("ok".into()));
    });

    let received = tokio_test::block_on(async {
        let mut out = Vec::new();
        while let Some(event) = rx.recv().await {
            let terminal = event.is_terminal();
            out.push(event);
            if terminal {
                break;
            }
        }
        out
    });
    sender.join().expect("sender thread");

    let bytes: Vec<u64> = received
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Progress(u) => Some(u.downloaded_bytes),
            _ => None,
        })
        .collect();
    assert_eq!(bytes, (0..200).collect::<Vec<_>>());
    assert!(matches!(received.last(), Some(ProgressEvent::Done(_))));
}
