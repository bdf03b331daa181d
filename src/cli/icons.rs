//! Service icon lookup by name. Exact keyword containment first, then a
//! fuzzy match to absorb slight misspellings.

use std::cmp::Ordering;

use once_cell::sync::Lazy;

use crate::domain::reservation::ReservationType;

const FUZZY_THRESHOLD: f64 = 0.85;
const DEFAULT_ICON: &str = "•";

static SERVICE_ICONS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("netflix", "🎬"),
        ("spotify", "🎵"),
        ("youtube", "📺"),
        ("apple", "🍎"),
        ("adobe", "🎨"),
        ("notion", "📝"),
        ("dropbox", "📦"),
        ("github", "🐙"),
        ("gym", "🏋"),
        ("fitness", "🏋"),
        ("coursera", "🎓"),
        ("udemy", "🎓"),
        ("news", "📰"),
        ("cloud", "☁"),
    ]
});

/// Picks an icon for a subscription by its service name.
pub fn service_icon(name: &str) -> &'static str {
    let needle = name.to_lowercase();
    for (keyword, icon) in SERVICE_ICONS.iter() {
        if needle.contains(*keyword) {
            return icon;
        }
    }
    SERVICE_ICONS
        .iter()
        .map(|(keyword, icon)| (strsim::jaro_winkler(&needle, keyword), *icon))
        .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
        .map(|(_, icon)| icon)
        .unwrap_or(DEFAULT_ICON)
}

pub fn reservation_icon(kind: ReservationType) -> &'static str {
    match kind {
        ReservationType::Hotel => "🏨",
        ReservationType::Restaurant => "🍽",
        ReservationType::Tour => "🧭",
        ReservationType::Cinema => "🎬",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_containment_wins() {
        assert_eq!(service_icon("Netflix Premium"), "🎬");
        assert_eq!(service_icon("Gym Membership"), "🏋");
    }

    #[test]
    fn fuzzy_match_absorbs_typos() {
        assert_eq!(service_icon("Spotfy"), "🎵");
    }

    #[test]
    fn unknown_services_fall_back() {
        assert_eq!(service_icon("Water Bill"), DEFAULT_ICON);
    }
}
