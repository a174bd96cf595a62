use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{EngineError, engine::EngineItem, engine::PlaybackEngine};

/// Title shown for songs the library has no title for.
pub const UNDEFINED_TITLE: &str = "Undefined";

/// An album as listed by the media library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Album title
    pub title: String,

    /// Album artist
    pub artist: String,
}

/// Read access to the host's media catalog.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Songs belonging to the album titled `album_title`, in album order.
    async fn songs_in_album(&self, album_title: &str) -> Result<Vec<EngineItem>, EngineError>;
}

/// One line in an album's song list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRow {
    /// Position in the album, starting at 1
    pub track_number: usize,

    /// Song title, [`UNDEFINED_TITLE`] when the library has none
    pub title: String,
}

/// The song list behind an album detail view.
#[derive(Debug, Clone)]
pub struct AlbumDetail {
    album: Album,
    songs: Vec<EngineItem>,
}

impl AlbumDetail {
    /// Load the songs of `album` from `library`.
    ///
    /// A library failure yields an empty list.
    pub async fn load(library: &dyn MediaLibrary, album: Album) -> Self {
        let songs = match library.songs_in_album(&album.title).await {
            Ok(songs) => songs,
            Err(e) => {
                warn!(album = %album.title, error = %e, "Failed to load album songs");
                Vec::new()
            }
        };

        debug!(album = %album.title, count = songs.len(), "Album loaded");
        Self { album, songs }
    }

    /// The album shown.
    pub fn album(&self) -> &Album {
        &self.album
    }

    /// Number of songs in the album.
    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    /// The album's songs as raw engine items.
    pub fn songs(&self) -> &[EngineItem] {
        &self.songs
    }

    /// Numbered rows for display.
    pub fn rows(&self) -> Vec<AlbumRow> {
        self.songs
            .iter()
            .enumerate()
            .map(|(index, song)| AlbumRow {
                track_number: index + 1,
                title: song
                    .title
                    .clone()
                    .unwrap_or_else(|| UNDEFINED_TITLE.to_string()),
            })
            .collect()
    }

    /// Queue the whole album on the engine and start playing it.
    ///
    /// Returns the queued songs. Engine failures are logged and the songs
    /// are still returned, so the caller can show what was requested.
    pub async fn play_all(&self, engine: &Arc<dyn PlaybackEngine>) -> Vec<EngineItem> {
        if let Err(e) = engine.play_queue(self.songs.clone()).await {
            warn!(album = %self.album.title, error = %e, "Engine rejected album queue");
        }

        self.songs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::playback::{
        PlaybackState,
        backends::{InMemoryLibrary, MemoryEngine},
    };

    fn song(title: Option<&str>) -> EngineItem {
        EngineItem {
            title: title.map(str::to_string),
            album_title: Some("Blue".to_string()),
            ..EngineItem::default()
        }
    }

    fn library() -> InMemoryLibrary {
        let mut library = InMemoryLibrary::new();
        library.add_album(
            Album {
                title: "Blue".to_string(),
                artist: "Joni".to_string(),
            },
            vec![song(Some("All I Want")), song(None), song(Some("Carey"))],
        );
        library
    }

    fn blue() -> Album {
        Album {
            title: "Blue".to_string(),
            artist: "Joni".to_string(),
        }
    }

    #[tokio::test]
    async fn rows_are_numbered_from_one() {
        let detail = AlbumDetail::load(&library(), blue()).await;

        assert_eq!(detail.song_count(), 3);
        let rows = detail.rows();
        assert_eq!(rows[0].track_number, 1);
        assert_eq!(rows[0].title, "All I Want");
        assert_eq!(rows[1].title, UNDEFINED_TITLE);
        assert_eq!(rows[2].track_number, 3);
    }

    #[tokio::test]
    async fn unknown_album_is_empty() {
        let detail = AlbumDetail::load(
            &library(),
            Album {
                title: "Court and Spark".to_string(),
                artist: "Joni".to_string(),
            },
        )
        .await;

        assert_eq!(detail.song_count(), 0);
        assert!(detail.rows().is_empty());
    }

    #[tokio::test]
    async fn play_all_queues_album_and_plays() {
        let memory = Arc::new(MemoryEngine::new());
        let engine: Arc<dyn PlaybackEngine> = memory.clone();
        let detail = AlbumDetail::load(&library(), blue()).await;

        let queued = detail.play_all(&engine).await;

        assert_eq!(queued.len(), 3);
        let current = engine.current_item().await.unwrap().unwrap();
        assert_eq!(current.title.as_deref(), Some("All I Want"));
        assert_eq!(
            engine.playback_state().await.unwrap(),
            Some(PlaybackState::Playing)
        );
        assert_eq!(memory.queue().len(), 3);
        assert!(memory.commands().is_empty());
    }
}
