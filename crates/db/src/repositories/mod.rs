//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod actor_repo;
pub mod dashboard_repo;
pub mod party_repo;
pub mod session_repo;
pub mod song_repo;
pub mod user_repo;

pub use actor_repo::ActorRepo;
pub use dashboard_repo::DashboardRepo;
pub use party_repo::PartyRepo;
pub use session_repo::SessionRepo;
pub use song_repo::SongRepo;
pub use user_repo::UserRepo;

/// Wrap `term` for a substring `ILIKE`, escaping the LIKE metacharacters.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("hall"), "%hall%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
