use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::{format_progress, format_subheader},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
    services::playback::{
        Album, AlbumDetail, EngineItem, InMemoryLibrary, MemoryEngine, NowPlayingMirror,
        PlaybackEngine, PlayerSession, TrackId,
    },
};

const DEMO_ALBUM: &str = "Night Drive";
const DEFAULT_POLL_MS: u64 = 100;

/// Command that runs a scripted session against the in-memory engine
///
/// Needs no media player: an album is queued on a [`MemoryEngine`] and each
/// transport control is exercised in turn, printing the mirror after every
/// step.
pub struct RunCommand {
    config: Arc<Config>,
}

impl RunCommand {
    /// Creates a new RunCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn library() -> InMemoryLibrary {
        let songs = [
            ("Headlights", 184.0),
            ("Overpass", 211.0),
            ("Last Exit", 242.0),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, (title, duration))| EngineItem {
            id: Some(TrackId::new(format!("demo-{}", index + 1))),
            title: Some(title.to_string()),
            album_title: Some(DEMO_ALBUM.to_string()),
            artist: Some("The Mirrors".to_string()),
            artwork: None,
            duration: Some(duration),
        })
        .collect();

        let mut library = InMemoryLibrary::new();
        library.add_album(
            Album {
                title: DEMO_ALBUM.to_string(),
                artist: "The Mirrors".to_string(),
            },
            songs,
        );
        library
    }

    fn snapshot(mirror: &NowPlayingMirror) -> String {
        let song = mirror.current();
        let state = mirror
            .current_state()
            .map(|state| state.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "    {:<8} {:<12} {}  repeat: {}  shuffle: {}",
            state,
            if song.title.is_empty() { "-" } else { &song.title },
            format_progress(&song, mirror.position()),
            mirror.repeat_mode.get(),
            if mirror.shuffle.get() { "on" } else { "off" },
        )
    }
}

#[async_trait]
impl Command for RunCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let poll_ms = match args.first() {
            Some(value) => value.parse::<u64>().map_err(|e| CliError::InvalidArgument {
                arg: "poll-ms".to_string(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_POLL_MS.min(self.config.player.position_poll_interval_ms),
        };
        let poll_interval = Duration::from_millis(poll_ms.max(1));
        let settle = poll_interval * 3;

        let library = Self::library();
        let memory = Arc::new(MemoryEngine::new());
        let engine: Arc<dyn PlaybackEngine> = memory.clone();

        let mut session = PlayerSession::with_poll_interval(engine.clone(), poll_interval).await;
        let mut output = format!("{}\n", format_subheader("Demo session"));
        output.push_str(&format!("  start\n{}\n", Self::snapshot(session.mirror())));

        let detail = AlbumDetail::load(&library, Album {
            title: DEMO_ALBUM.to_string(),
            artist: "The Mirrors".to_string(),
        })
        .await;

        output.push_str(&format!("  album '{}'\n", detail.album().title));
        for row in detail.rows() {
            output.push_str(&format!("    {:>2}. {}\n", row.track_number, row.title));
        }

        detail.play_all(&engine).await;
        tokio::time::sleep(settle).await;
        output.push_str(&format!("  play all\n{}\n", Self::snapshot(session.mirror())));

        let transport = session.transport();

        let command = transport.toggle_play_pause().await;
        tokio::time::sleep(settle).await;
        output.push_str(&format!("  {command:?}\n{}\n", Self::snapshot(session.mirror())));

        let command = transport.skip_forward().await;
        tokio::time::sleep(settle).await;
        output.push_str(&format!("  {command:?}\n{}\n", Self::snapshot(session.mirror())));

        memory.set_position(12.0);
        let command = transport.skip_backward().await;
        tokio::time::sleep(settle).await;
        output.push_str(&format!(
            "  {command:?} at 0:12\n{}\n",
            Self::snapshot(session.mirror())
        ));

        let command = transport.skip_backward().await;
        tokio::time::sleep(settle).await;
        output.push_str(&format!(
            "  {command:?} near start\n{}\n",
            Self::snapshot(session.mirror())
        ));

        let mode = transport.cycle_repeat_mode().await;
        output.push_str(&format!("  repeat -> {mode:?}\n{}\n", Self::snapshot(session.mirror())));

        let shuffle = transport.toggle_shuffle().await;
        output.push_str(&format!(
            "  shuffle -> {shuffle}\n{}\n",
            Self::snapshot(session.mirror())
        ));

        session.teardown();
        memory.load_item(EngineItem {
            title: Some("After Hours".to_string()),
            ..EngineItem::default()
        });
        tokio::time::sleep(settle).await;
        output.push_str(&format!(
            "  teardown, then engine loads another item\n{}\n",
            Self::snapshot(session.mirror())
        ));

        output.push_str(&format!(
            "  engine received: {:?}",
            memory.commands()
        ));

        Ok(output)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "run".to_string(),
            description: "Run a scripted session against an in-memory engine".to_string(),
            category: "demo".to_string(),
            args: vec![CommandArg {
                name: "poll-ms".to_string(),
                description: "Position poll interval in milliseconds (default 100)".to_string(),
                required: false,
                value_type: ArgType::Number,
            }],
            examples: vec![
                "nowplaying demo run".to_string(),
                "nowplaying demo run 250".to_string(),
            ],
        }
    }
}
