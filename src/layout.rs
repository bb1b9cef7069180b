//! Roster extraction from the two supported page layouts.
//!
//! League pages list users in `groupUserList__item` elements (name span, id
//! span). Tournament pages put each entrant in an anchor inside the first
//! `tournament__tournament__round` bracket column, with an explicit marker
//! class on unfilled slots.

use crate::html;
use crate::types::UserRef;

/// A page layout the extractor knows how to read.
pub trait PageLayout {
    /// Layout name for logging.
    fn layout_name(&self) -> &'static str;

    /// Extract every valid (name, id) entry the layout yields on this page.
    /// Absent elements are an empty result, never an error.
    fn extract_users(&self, page: &str) -> Vec<UserRef>;
}

/// Arena / league standings list.
pub struct LeagueLayout;

impl PageLayout for LeagueLayout {
    fn layout_name(&self) -> &'static str {
        "league"
    }

    fn extract_users(&self, page: &str) -> Vec<UserRef> {
        html::class_blocks(page, "groupUserList__item")
            .iter()
            .filter_map(|item| {
                let spans = html::tag_blocks(item, "span");
                if spans.len() < 2 {
                    return None;
                }
                valid_entry(html::text(spans[0]), html::text(spans[1]))
            })
            .collect()
    }
}

/// Tournament bracket; only the first round carries the full field.
pub struct TournamentLayout;

impl PageLayout for TournamentLayout {
    fn layout_name(&self) -> &'static str {
        "tournament"
    }

    fn extract_users(&self, page: &str) -> Vec<UserRef> {
        let round = match html::first_class_block(page, "tournament__tournament__round") {
            Some(round) => round,
            None => return Vec::new(),
        };
        html::tag_blocks(round, "a")
            .iter()
            .filter_map(|slot| {
                // Unfilled bracket slots carry an explicit marker class.
                if html::contains_class(slot, "tournamentMatch__user--empty") {
                    return None;
                }
                let name = html::first_class_block(slot, "userName__name").map(html::text)?;
                let uid = html::first_class_block(slot, "userName__uid").map(html::text)?;
                valid_entry(name, uid)
            })
            .collect()
    }
}

/// An entry is valid only with a non-empty name and a non-empty id.
/// One leading `#` is stripped from the id as shown on the page.
fn valid_entry(name: String, raw_id: String) -> Option<UserRef> {
    let user_id = raw_id
        .strip_prefix('#')
        .unwrap_or(&raw_id)
        .trim()
        .to_string();
    if name.is_empty() || user_id.is_empty() {
        return None;
    }
    Some(UserRef {
        user_name: name,
        user_id,
    })
}

/// Pure layout detection: the league list wins when it yields at least one
/// valid entry, otherwise the tournament bracket is consulted. A page
/// matching neither yields an empty roster.
pub fn detect_roster(page: &str) -> Vec<UserRef> {
    let league = LeagueLayout;
    let users = league.extract_users(page);
    if !users.is_empty() {
        log::debug!("Detected {} layout with {} users", league.layout_name(), users.len());
        return users;
    }

    let tournament = TournamentLayout;
    let users = tournament.extract_users(page);
    if !users.is_empty() {
        log::debug!(
            "Detected {} layout with {} users",
            tournament.layout_name(),
            users.len()
        );
    }
    users
}
