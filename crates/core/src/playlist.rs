//! Song ordering for a party playlist.

use serde::Deserialize;

use crate::error::{CoreError, FieldErrors};

/// Longest accepted song title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// A song as submitted by a client. Any `order` sent along is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SongInput {
    pub title: String,
    #[serde(default)]
    pub order: Option<i32>,
}

/// A song with its position in the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedSong {
    pub title: String,
    pub order: i32,
}

/// Number the songs 0, 1, 2, ... in submission order.
///
/// Every title must be non-blank and at most [`MAX_TITLE_LEN`] characters;
/// all offending positions are reported together under the `songs` field.
pub fn sequence_songs(songs: &[SongInput]) -> Result<Vec<SequencedSong>, CoreError> {
    let mut problems = Vec::new();
    for (index, song) in songs.iter().enumerate() {
        let title = song.title.trim();
        if title.is_empty() {
            problems.push(format!("Song {index}: title may not be blank."));
        } else if title.chars().count() > MAX_TITLE_LEN {
            problems.push(format!(
                "Song {index}: title must be at most {MAX_TITLE_LEN} characters."
            ));
        }
    }

    if !problems.is_empty() {
        let mut errors = FieldErrors::new();
        errors.insert("songs".to_string(), problems);
        return Err(CoreError::InvalidFields(errors));
    }

    Ok(songs
        .iter()
        .zip(0..)
        .map(|(song, order)| SequencedSong {
            title: song.title.trim().to_string(),
            order,
        })
        .collect())
}
