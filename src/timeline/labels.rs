use crate::{
    types::{ChartType, RecentTrack},
    utils::{self, MAX_NAME_LENGTH},
};

/// Names that make up the bar label of `track`, each already shortened.
pub fn label_parts(track: &RecentTrack, chart_type: ChartType) -> Vec<String> {
    let artist = utils::truncate_name(&track.artist.text, MAX_NAME_LENGTH);
    match chart_type {
        ChartType::Artists => vec![artist],
        ChartType::Albums => vec![
            artist,
            utils::truncate_name(&track.album.text, MAX_NAME_LENGTH),
        ],
        ChartType::Tracks => vec![artist, utils::truncate_name(&track.name, MAX_NAME_LENGTH)],
    }
}

/// Bar label of `track`: the artist, followed by album or track on a second line.
pub fn entity_label(track: &RecentTrack, chart_type: ChartType) -> String {
    label_parts(track, chart_type).join("\n")
}

/// Widest label line in characters, never more than the name limit.
///
/// Only the artist is measured after shortening. Album and track names count
/// at their full length, so a long second line widens the label area up to
/// the limit.
///
/// # Example
///
/// ```
/// let width = label_width(page.tracks(), ChartType::Albums);
/// assert!(width <= MAX_NAME_LENGTH);
/// ```
pub fn label_width<'a, I>(tracks: I, chart_type: ChartType) -> usize
where
    I: IntoIterator<Item = &'a RecentTrack>,
{
    tracks
        .into_iter()
        .map(|t| {
            let artist = utils::truncate_name(&t.artist.text, MAX_NAME_LENGTH)
                .chars()
                .count();
            let second = match chart_type {
                ChartType::Artists => 0,
                ChartType::Albums => t.album.text.chars().count(),
                ChartType::Tracks => t.name.chars().count(),
            };
            artist.max(second)
        })
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextField;

    fn track(artist: &str, album: &str, name: &str) -> RecentTrack {
        RecentTrack {
            name: name.to_string(),
            artist: TextField {
                text: artist.to_string(),
            },
            album: TextField {
                text: album.to_string(),
            },
            date: None,
            attr: None,
        }
    }

    #[test]
    fn labels_follow_chart_type() {
        let t = track("Boards of Canada", "Geogaddi", "Music Is Math");
        assert_eq!(entity_label(&t, ChartType::Artists), "Boards of Canada");
        assert_eq!(
            entity_label(&t, ChartType::Albums),
            "Boards of Canada\nGeogaddi"
        );
        assert_eq!(
            entity_label(&t, ChartType::Tracks),
            "Boards of Canada\nMusic Is Math"
        );
    }

    #[test]
    fn each_part_is_shortened_independently() {
        let t = track(
            "Godspeed You! Black Emperor and Friends",
            "Lift Your Skinny Fists Like Antennas to Heaven",
            "Storm",
        );
        assert_eq!(
            entity_label(&t, ChartType::Albums),
            "Godspeed You! Black Emperor...\nLift Your Skinny Fists Like..."
        );
    }

    #[test]
    fn width_uses_shortened_artist_and_is_capped() {
        let long = track("An Artist Name That Keeps Going And Going", "", "");
        let short = track("Short", "", "");
        assert_eq!(label_width([&short], ChartType::Artists), 5);
        assert_eq!(label_width([&short, &long], ChartType::Artists), 28);

        // 29 letters and a space: the cut keeps the whole word and adds "...".
        let word = format!("{} tail", "a".repeat(29));
        let widest = track(&word, "", "");
        assert_eq!(label_width([&widest], ChartType::Artists), 30);
        assert_eq!(label_width(std::iter::empty::<&RecentTrack>(), ChartType::Artists), 0);
    }

    #[test]
    fn width_measures_album_and_track_before_shortening() {
        // Shortened, the album would be 24 characters wide.
        let t = track("Air", "The Smashing Pumpkins Greatest Hits", "Sexy Boy");
        assert_eq!(label_width([&t], ChartType::Albums), 30);
        assert_eq!(label_width([&t], ChartType::Tracks), 8);
        assert_eq!(label_width([&t], ChartType::Artists), 3);

        let mid = track("Air", "Lift Your Skinny Fists Like", "Storm");
        assert_eq!(label_width([&mid], ChartType::Albums), 27);
    }
}
