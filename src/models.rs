use crate::entities::movie;

/// Rendered in place of a missing field; OMDb uses the same marker.
pub const FIELD_PLACEHOLDER: &str = "N/A";

/// Field labels in render order. Also the keys of the `Label: value` text
/// block, so the order is part of the format.
pub const FIELD_LABELS: [&str; 10] = [
    "Title", "Year", "Rated", "Released", "Runtime", "Genre", "Director", "Writer", "Actors",
    "Plot",
];

/// A movie as entered, fetched, or displayed. Every field is free-form text
/// and independently optional; identity lives on the stored row, not here.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MovieDetails {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
}

impl MovieDetails {
    fn fields(&self) -> [&Option<String>; 10] {
        [
            &self.title,
            &self.year,
            &self.rated,
            &self.released,
            &self.runtime,
            &self.genre,
            &self.director,
            &self.writer,
            &self.actors,
            &self.plot,
        ]
    }

    /// Renders the ten fields as a fixed-order `Label: value` block, one line
    /// per field, `N/A` standing in for absent values.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (label, value) in FIELD_LABELS.iter().zip(self.fields()) {
            out.push_str(label);
            out.push_str(": ");
            out.push_str(value.as_deref().unwrap_or(FIELD_PLACEHOLDER));
            out.push('\n');
        }
        out
    }

    /// Parses a `Label: value` block back into a record. Lines without the
    /// `": "` separator and unknown labels are ignored; a missing label or an
    /// `N/A` value parses as an absent field, so `to_text` round-trips as long
    /// as no field value itself contains `": "`.
    pub fn from_text(text: &str) -> Self {
        let mut details = Self::default();
        for line in text.lines() {
            let Some((label, value)) = line.split_once(": ") else {
                continue;
            };
            let value = clean(value);
            match label.trim() {
                "Title" => details.title = value,
                "Year" => details.year = value,
                "Rated" => details.rated = value,
                "Released" => details.released = value,
                "Runtime" => details.runtime = value,
                "Genre" => details.genre = value,
                "Director" => details.director = value,
                "Writer" => details.writer = value,
                "Actors" => details.actors = value,
                "Plot" => details.plot = value,
                _ => {},
            }
        }
        details
    }

    /// Converts into a row with an unassigned identity, for the insert path.
    pub fn into_row(self) -> movie::Model {
        movie::Model {
            id: 0,
            title: self.title,
            year: self.year,
            rated: self.rated,
            released: self.released,
            runtime: self.runtime,
            genre: self.genre,
            director: self.director,
            writer: self.writer,
            actors: self.actors,
            plot: self.plot,
        }
    }
}

impl From<movie::Model> for MovieDetails {
    fn from(row: movie::Model) -> Self {
        Self {
            title: row.title,
            year: row.year,
            rated: row.rated,
            released: row.released,
            runtime: row.runtime,
            genre: row.genre,
            director: row.director,
            writer: row.writer,
            actors: row.actors,
            plot: row.plot,
        }
    }
}

/// Normalizes raw field text: trims, and maps blank or placeholder input to
/// an absent field.
pub fn clean(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != FIELD_PLACEHOLDER).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MovieDetails {
        MovieDetails {
            title: Some("The Matrix".to_string()),
            year: Some("1999".to_string()),
            rated: Some("R".to_string()),
            released: Some("31 Mar 1999".to_string()),
            runtime: Some("136 min".to_string()),
            genre: Some("Action, Sci-Fi".to_string()),
            director: Some("Lana Wachowski, Lilly Wachowski".to_string()),
            writer: Some("Lilly Wachowski, Lana Wachowski".to_string()),
            actors: Some("Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss".to_string()),
            plot: Some("A computer hacker learns the truth about his reality.".to_string()),
        }
    }

    #[test]
    fn text_block_round_trips() {
        let details = sample();
        assert_eq!(MovieDetails::from_text(&details.to_text()), details);
    }

    #[test]
    fn absent_fields_round_trip_through_placeholder() {
        let details = MovieDetails { title: Some("Pi".to_string()), ..Default::default() };
        let text = details.to_text();
        assert!(text.contains("Year: N/A"));
        assert_eq!(MovieDetails::from_text(&text), details);
    }

    #[test]
    fn to_text_renders_labels_in_fixed_order() {
        let labels: Vec<String> = sample()
            .to_text()
            .lines()
            .map(|l| l.split_once(": ").unwrap().0.to_string())
            .collect();
        assert_eq!(labels, FIELD_LABELS);
    }

    #[test]
    fn from_text_ignores_unknown_and_malformed_lines() {
        let details =
            MovieDetails::from_text("Title: Alien\nnot a field line\nBoxOffice: $100\nYear: 1979");
        assert_eq!(details.title.as_deref(), Some("Alien"));
        assert_eq!(details.year.as_deref(), Some("1979"));
        assert_eq!(details.plot, None);
    }

    #[test]
    fn clean_drops_blank_and_placeholder_values() {
        assert_eq!(clean("  "), None);
        assert_eq!(clean("N/A"), None);
        assert_eq!(clean(" Ridley Scott "), Some("Ridley Scott".to_string()));
    }
}
