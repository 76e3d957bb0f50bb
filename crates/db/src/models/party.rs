//! Party model, input DTOs and validation.
//!
//! Clients send a [`PartyInput`] for create and full update, or a
//! [`PartyPatchInput`] for partial update. Both are checked in one pass so a
//! response lists every bad field, then turned into the [`NewParty`] /
//! [`PartyPatch`] DTOs the repository consumes.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use sqlx::FromRow;
use troupe_core::duration::parse_duration;
use troupe_core::error::{CoreError, FieldErrors};
use troupe_core::playlist::{sequence_songs, SequencedSong, SongInput};
use troupe_core::status::PartyStatus;
use troupe_core::types::{DbId, Timestamp};
use troupe_core::validation::{collect_field_errors, merge_field_errors};
use validator::Validate;

use crate::models::actor::ActorSummary;
use crate::models::song::Song;

/// Event label used when a party is created without one.
pub const DEFAULT_EVENT: &str = "Other";

/// A row from the `parties` table.
#[derive(Debug, Clone, FromRow)]
pub struct Party {
    pub id: DbId,
    pub day: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_secs: i32,
    pub place: String,
    pub event: String,
    pub number_of_actors: i32,
    pub meeting_time: NaiveTime,
    pub meeting_date: NaiveDate,
    pub meeting_place: String,
    pub transport_vehicle: String,
    pub notes: String,
    pub camera_man: String,
    pub dress_details: String,
    #[sqlx(try_from = "String")]
    pub status: PartyStatus,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A party with its assigned actors, playlist and creator name loaded.
#[derive(Debug, Clone)]
pub struct PartyDetail {
    pub party: Party,
    pub actors: Vec<ActorSummary>,
    pub songs: Vec<Song>,
    pub created_by_name: String,
}

impl PartyDetail {
    pub fn actor_ids(&self) -> Vec<DbId> {
        self.actors.iter().map(|a| a.actor.id).collect()
    }
}

/// Filters accepted by the party list.
#[derive(Debug, Clone, Default)]
pub struct PartyFilter {
    pub status: Option<PartyStatus>,
    /// Case-insensitive substring matched against place, camera man, day
    /// and assigned actors' name / family.
    pub search: Option<String>,
}

/// Validated fields for a new party, or a full replacement of one.
///
/// `status`, `actor_ids` and `songs` stay `None` when the client left them
/// out; create treats that as pending / nobody / no songs, a full update
/// leaves the stored values alone.
#[derive(Debug, Clone)]
pub struct NewParty {
    pub day: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_secs: i32,
    pub place: String,
    pub event: String,
    pub number_of_actors: i32,
    pub meeting_time: NaiveTime,
    pub meeting_date: NaiveDate,
    pub meeting_place: String,
    pub transport_vehicle: String,
    pub notes: String,
    pub camera_man: String,
    pub dress_details: String,
    pub status: Option<PartyStatus>,
    pub actor_ids: Option<Vec<DbId>>,
    pub songs: Option<Vec<SequencedSong>>,
}

/// Validated partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct PartyPatch {
    pub day: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration_secs: Option<i32>,
    pub place: Option<String>,
    pub event: Option<String>,
    pub number_of_actors: Option<i32>,
    pub meeting_time: Option<NaiveTime>,
    pub meeting_date: Option<NaiveDate>,
    pub meeting_place: Option<String>,
    pub transport_vehicle: Option<String>,
    pub notes: Option<String>,
    pub camera_man: Option<String>,
    pub dress_details: Option<String>,
    pub status: Option<PartyStatus>,
    pub actor_ids: Option<Vec<DbId>>,
    pub songs: Option<Vec<SequencedSong>>,
}

impl From<NewParty> for PartyPatch {
    fn from(p: NewParty) -> Self {
        Self {
            day: Some(p.day),
            date: Some(p.date),
            time: Some(p.time),
            duration_secs: Some(p.duration_secs),
            place: Some(p.place),
            event: Some(p.event),
            number_of_actors: Some(p.number_of_actors),
            meeting_time: Some(p.meeting_time),
            meeting_date: Some(p.meeting_date),
            meeting_place: Some(p.meeting_place),
            transport_vehicle: Some(p.transport_vehicle),
            notes: Some(p.notes),
            camera_man: Some(p.camera_man),
            dress_details: Some(p.dress_details),
            status: p.status,
            actor_ids: p.actor_ids,
            songs: p.songs,
        }
    }
}

/// Party body for create and full update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PartyInput {
    #[validate(required(message = "This field is required."), length(min = 1, max = 20))]
    pub day: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub date: Option<NaiveDate>,
    #[validate(required(message = "This field is required."))]
    pub time: Option<NaiveTime>,
    /// `[D ]HH:MM[:SS]`.
    #[validate(required(message = "This field is required."))]
    pub duration: Option<String>,
    #[validate(required(message = "This field is required."), length(min = 1, max = 200))]
    pub place: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub event: Option<String>,
    #[validate(required(message = "This field is required."), range(min = 0))]
    pub number_of_actors: Option<i32>,
    #[validate(required(message = "This field is required."))]
    pub meeting_time: Option<NaiveTime>,
    #[validate(required(message = "This field is required."))]
    pub meeting_date: Option<NaiveDate>,
    #[validate(required(message = "This field is required."), length(min = 1, max = 200))]
    pub meeting_place: Option<String>,
    #[validate(required(message = "This field is required."), length(min = 1, max = 100))]
    pub transport_vehicle: Option<String>,
    pub notes: Option<String>,
    #[validate(required(message = "This field is required."), length(min = 1, max = 100))]
    pub camera_man: Option<String>,
    #[validate(required(message = "This field is required."), length(min = 1))]
    pub dress_details: Option<String>,
    pub status: Option<PartyStatus>,
    pub actor_ids: Option<Vec<DbId>>,
    pub songs: Option<Vec<SongInput>>,
}

impl PartyInput {
    /// Check every field and build a [`NewParty`].
    ///
    /// All problems are collected into a single `InvalidFields` error.
    pub fn into_new_party(self) -> Result<NewParty, CoreError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => collect_field_errors(&e),
        };
        let duration_secs = check_duration(self.duration.as_deref(), &mut errors);
        let songs = check_songs(self.songs.as_deref(), &mut errors);

        if !errors.is_empty() {
            return Err(CoreError::InvalidFields(errors));
        }

        // Every `required` field passed validation above.
        match (
            self.day,
            self.date,
            self.time,
            duration_secs,
            self.place,
            self.number_of_actors,
            self.meeting_time,
            self.meeting_date,
            self.meeting_place,
            self.transport_vehicle,
            self.camera_man,
            self.dress_details,
        ) {
            (
                Some(day),
                Some(date),
                Some(time),
                Some(duration_secs),
                Some(place),
                Some(number_of_actors),
                Some(meeting_time),
                Some(meeting_date),
                Some(meeting_place),
                Some(transport_vehicle),
                Some(camera_man),
                Some(dress_details),
            ) => Ok(NewParty {
                day,
                date,
                time,
                duration_secs,
                place,
                event: self.event.unwrap_or_else(|| DEFAULT_EVENT.to_string()),
                number_of_actors,
                meeting_time,
                meeting_date,
                meeting_place,
                transport_vehicle,
                notes: self.notes.unwrap_or_default(),
                camera_man,
                dress_details,
                status: self.status,
                actor_ids: self.actor_ids,
                songs,
            }),
            _ => Err(CoreError::Validation("incomplete party".into())),
        }
    }
}

/// Party body for partial update. Nothing is required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PartyPatchInput {
    #[validate(length(min = 1, max = 20))]
    pub day: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub place: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub event: Option<String>,
    #[validate(range(min = 0))]
    pub number_of_actors: Option<i32>,
    pub meeting_time: Option<NaiveTime>,
    pub meeting_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 200))]
    pub meeting_place: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub transport_vehicle: Option<String>,
    pub notes: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub camera_man: Option<String>,
    #[validate(length(min = 1))]
    pub dress_details: Option<String>,
    pub status: Option<PartyStatus>,
    pub actor_ids: Option<Vec<DbId>>,
    pub songs: Option<Vec<SongInput>>,
}

impl PartyPatchInput {
    pub fn into_patch(self) -> Result<PartyPatch, CoreError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => collect_field_errors(&e),
        };
        let duration_secs = check_duration(self.duration.as_deref(), &mut errors);
        let songs = check_songs(self.songs.as_deref(), &mut errors);

        if !errors.is_empty() {
            return Err(CoreError::InvalidFields(errors));
        }

        Ok(PartyPatch {
            day: self.day,
            date: self.date,
            time: self.time,
            duration_secs,
            place: self.place,
            event: self.event,
            number_of_actors: self.number_of_actors,
            meeting_time: self.meeting_time,
            meeting_date: self.meeting_date,
            meeting_place: self.meeting_place,
            transport_vehicle: self.transport_vehicle,
            notes: self.notes,
            camera_man: self.camera_man,
            dress_details: self.dress_details,
            status: self.status,
            actor_ids: self.actor_ids,
            songs,
        })
    }
}

fn check_duration(text: Option<&str>, errors: &mut FieldErrors) -> Option<i32> {
    match text.map(parse_duration) {
        Some(Ok(secs)) => Some(secs),
        Some(Err(msg)) => {
            errors.entry("duration".into()).or_default().push(msg);
            None
        }
        None => None,
    }
}

fn check_songs(songs: Option<&[SongInput]>, errors: &mut FieldErrors) -> Option<Vec<SequencedSong>> {
    match songs.map(sequence_songs) {
        Some(Ok(sequenced)) => Some(sequenced),
        Some(Err(CoreError::InvalidFields(fields))) => {
            merge_field_errors(errors, fields);
            None
        }
        Some(Err(other)) => {
            errors
                .entry("songs".into())
                .or_default()
                .push(other.to_string());
            None
        }
        None => None,
    }
}
