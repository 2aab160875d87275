//! Seed data written the first time a store finds no document

use crate::types::{Event, Release, ReleaseCatalog};

/// Single placeholder tour date
pub fn default_events() -> Vec<Event> {
    vec![Event {
        id: "1".to_string(),
        date: "December 21, 2024".to_string(),
        event_start_time: None,
        my_set_time: None,
        venue: "Festivus Music Festival".to_string(),
        location: "Ohio".to_string(),
        city: "Ohio".to_string(),
        ticket_link: Some("#".to_string()),
    }]
}

const FULL_SETS: &[(&str, &str)] = &[
    (
        "Dreams Official Post Party",
        "https://soundcloud.com/myself-included/dreams-official-post-party",
    ),
    (
        "Glassmonkey Full Set 11-2-24",
        "https://soundcloud.com/myself-included/glassmonkey-full-set-11-2-24",
    ),
    (
        "Debussy Set - Secret Dreams 7/18/24",
        "https://soundcloud.com/myself-included/debussy-set-secret-dreams-71824",
    ),
    (
        "Secret Dreams Fest - Woods Set 7/20/24",
        "https://soundcloud.com/myself-included/secretdreams-fest-woods-set-72024",
    ),
];

const OTHER_RELEASES: &[(&str, &str)] = &[
    ("N.O.M.S", "https://soundcloud.com/myself-included/n-o-m-s"),
    ("Slowdown", "https://soundcloud.com/myself-included/slowdown"),
    (
        "Ride (3Flip Mafia Collection)",
        "https://soundcloud.com/myself-included/ride-3flip-mafia-collection",
    ),
    (
        "It Keeps On Comin",
        "https://soundcloud.com/myself-included/it-keeps-on-comin",
    ),
    (
        "The Want Master",
        "https://soundcloud.com/myself-included/the-want-master",
    ),
    ("Swangin'", "https://soundcloud.com/myself-included/swangin1"),
];

/// Both categories ranked 0..n-1 in listing order
pub fn default_catalog() -> ReleaseCatalog {
    ReleaseCatalog {
        full_sets: ranked(FULL_SETS),
        other_releases: ranked(OTHER_RELEASES),
    }
}

fn ranked(entries: &[(&str, &str)]) -> Vec<Release> {
    entries
        .iter()
        .enumerate()
        .map(|(index, (title, url))| Release {
            id: (index + 1).to_string(),
            title: title.to_string(),
            url: url.to_string(),
            order: index as u32,
        })
        .collect()
}
