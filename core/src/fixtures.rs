//! Randomised, constraint-valid creation payloads.
//!
//! Every generator is pure apart from drawing from the thread RNG: no
//! network, no shared counters. Emails embed a UUID v7 (wall-clock
//! milliseconds plus random bits) so two runs hitting the same remote
//! dataset in parallel do not collide on the service's uniqueness check.

use rand::Rng;
use uuid::Uuid;

use crate::types::{CreatePost, CreateTodo, CreateUser, Gender, TodoStatus, UserStatus};

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Bianca", "Chidi", "Dagny", "Elif", "Farid", "Greta", "Hiroshi", "Ines", "Jonas",
    "Kavya", "Lorenzo", "Maren", "Nikolai", "Olu", "Priya", "Quentin", "Rosa", "Soren", "Tamsin",
];

const LAST_NAMES: &[&str] = &[
    "Abernathy", "Bergstrom", "Castellanos", "Dubois", "Eriksen", "Fitzgerald", "Gupta",
    "Halvorsen", "Iyer", "Jankowski", "Kowalczyk", "Lindqvist", "Moreau", "Nakamura", "Okafor",
    "Pellegrini", "Quinlan", "Rasmussen", "Sandoval", "Thorne",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "test.dev"];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "ullamco", "laboris", "nisi", "aliquip", "ex",
    "ea", "commodo", "consequat", "aute", "irure", "in", "voluptate", "velit", "esse", "cillum",
    "fugiat", "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non",
    "proident", "sunt", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est",
    "laborum",
];

fn pick<T: Copy>(rng: &mut impl Rng, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

/// A single lorem word whose length lies in `5..=7`.
fn title_word(rng: &mut impl Rng) -> String {
    let len = rng.random_range(5..=7);
    let candidates: Vec<&str> = LOREM.iter().copied().filter(|w| w.len() == len).collect();
    if candidates.is_empty() {
        return pick(rng, LOREM).to_string();
    }
    pick(rng, &candidates).to_string()
}

fn sentence(rng: &mut impl Rng) -> String {
    let count = rng.random_range(5..=12);
    let words: Vec<&str> = (0..count).map(|_| pick(rng, LOREM)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get(..1).map(str::to_uppercase) {
        sentence.replace_range(..1, &first);
    }
    sentence.push('.');
    sentence
}

fn paragraph(rng: &mut impl Rng) -> String {
    let count = rng.random_range(4..=8);
    (0..count).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

/// `n` space-separated lorem words.
///
/// `lorem_words(201)` is always longer than [`crate::types::TITLE_MAX_LEN`].
pub fn lorem_words(n: usize) -> String {
    let mut rng = rand::rng();
    (0..n).map(|_| pick(&mut rng, LOREM)).collect::<Vec<_>>().join(" ")
}

/// A fresh email address whose local part starts with the ASCII letters,
/// digits and dots of `hint`, or with `user` when none survive.
pub fn unique_email(hint: &str) -> String {
    let mut rng = rand::rng();
    let kept: String = hint
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect::<String>()
        .to_ascii_lowercase();
    // A local part may neither start nor end with a dot nor hold two in a row.
    let local = kept.split('.').filter(|part| !part.is_empty()).collect::<Vec<_>>().join(".");
    let local = if local.is_empty() { "user" } else { local.as_str() };
    let domain = pick(&mut rng, EMAIL_DOMAINS);
    format!("{local}.{}@{domain}", Uuid::now_v7().simple())
}

pub fn random_user() -> CreateUser {
    let mut rng = rand::rng();
    let first = pick(&mut rng, FIRST_NAMES);
    let last = pick(&mut rng, LAST_NAMES);
    CreateUser {
        name: format!("{first} {last}"),
        email: unique_email(&format!("{first}.{last}")),
        gender: pick(&mut rng, &[Gender::Male, Gender::Female]),
        status: pick(&mut rng, &[UserStatus::Active, UserStatus::Inactive]),
    }
}

pub fn random_post() -> CreatePost {
    let mut rng = rand::rng();
    CreatePost {
        title: title_word(&mut rng),
        body: paragraph(&mut rng),
    }
}

pub fn random_todo() -> CreateTodo {
    let mut rng = rand::rng();
    CreateTodo {
        title: title_word(&mut rng),
        status: pick(&mut rng, &[TodoStatus::Pending, TodoStatus::Completed]),
    }
}
