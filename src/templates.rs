use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    models::{FIELD_LABELS, FIELD_PLACEHOLDER, MovieDetails},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page() -> String {
    let links = [
        ("/movies/add", "Add a movie"),
        ("/search/local/title", "Search catalogue by title"),
        ("/search/local/actor", "Search catalogue by actor"),
        ("/search/title", "Look up a title on OMDb"),
        ("/search/omdb", "Search OMDb"),
        ("/movies", "View all movies"),
    ];

    page(
        "Movie Finder",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Movie Finder" }
                        p class="mt-2 text-gray-600" { "Catalogue movies locally and look them up on OMDb." }

                        div class="mt-8 space-y-3" {
                            @for (href, label) in links {
                                a class="block w-full rounded-md bg-blue-600 px-4 py-2 text-center font-semibold text-white hover:bg-blue-700" href=(href) { (label) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_movie_page(saved: bool) -> String {
    page(
        "Add a movie",
        shell(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Add a movie" }
            p class="mt-2 text-gray-600" { "Every field is optional." }

            @if saved {
                div class="mt-4 rounded-md bg-green-50 px-4 py-3 text-green-700" { "Movie saved" }
            }

            form class="mt-8 space-y-4" method="post" action="/movies/add" {
                @for label in FIELD_LABELS {
                    div {
                        label class="block text-sm font-medium text-gray-700" for=(label) { (label) }
                        @if label == "Plot" {
                            textarea class=(INPUT_CLASS) name=(label) id=(label) rows="3" {}
                        } @else {
                            input class=(INPUT_CLASS) name=(label) id=(label);
                        }
                    }
                }

                button class=(format!("w-full {BUTTON_CLASS}")) type="submit" { "Save movie" }
            }
        }),
    )
}

pub fn title_search_page(query: &str, searched: bool, found: Option<&MovieDetails>) -> String {
    page(
        "Look up a title",
        shell(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Look up a title on OMDb" }
            (search_form("/search/title", "Movie title", query, "Retrieve movie"))

            @if let Some(details) = found {
                div class="mt-8 rounded-lg border border-gray-200 bg-gray-50 p-6" {
                    pre class="whitespace-pre-wrap text-sm text-gray-800" { (details.to_text()) }
                }
                form class="mt-4" method="post" action="/search/title/save" {
                    input type="hidden" name="details" value=(details.to_text());
                    button class=(BUTTON_CLASS) type="submit" { "Save to catalogue" }
                }
            } @else if searched {
                p class="mt-8 text-gray-600" { "Movie not found" }
            }
        }),
    )
}

pub fn local_title_search_page(query: &str, searched: bool, movies: &[movie::Model]) -> String {
    page(
        "Search catalogue by title",
        shell(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Search catalogue by title" }
            p class="mt-2 text-gray-600" { "Substring match, case-sensitive." }
            (search_form("/search/local/title", "Movie title", query, "Search"))
            (stored_movie_list(movies, searched, query))
        }),
    )
}

pub fn actor_search_page(query: &str, searched: bool, movies: &[movie::Model]) -> String {
    page(
        "Search catalogue by actor",
        shell(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Search catalogue by actor" }
            p class="mt-2 text-gray-600" { "Substring match, any case." }
            (search_form("/search/local/actor", "Actor name", query, "Search"))
            (stored_movie_list(movies, searched, query))
        }),
    )
}

pub fn omdb_search_page(query: &str, searched: bool, movies: &[MovieDetails]) -> String {
    page(
        "Search OMDb",
        shell(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Search OMDb" }
            p class="mt-2 text-gray-600" { "Fetches full detail for every match." }
            (search_form("/search/omdb", "Movie title", query, "Search"))

            @if !movies.is_empty() {
                form class="mt-6" method="post" action="/search/omdb/save" {
                    input type="hidden" name="query" value=(query);
                    button class=(BUTTON_CLASS) type="submit" { "Save all to catalogue" }
                }
                div class="mt-4 space-y-4" {
                    @for details in movies {
                        (details_card(details))
                    }
                }
            } @else if searched {
                p class="mt-8 text-gray-600" { "No movies found for: " (query) }
            }
        }),
    )
}

pub fn all_movies_page(movies: &[movie::Model]) -> String {
    page(
        "All movies",
        shell(html! {
            div class="flex items-start justify-between gap-6" {
                h1 class="text-3xl font-bold text-gray-900" { "All saved movies" }
                @if !movies.is_empty() {
                    form method="post" action="/movies/clear" {
                        button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" { "Clear catalogue" }
                    }
                }
            }

            @if movies.is_empty() {
                p class="mt-8 text-gray-600" { "No movies in the catalogue." }
            } @else {
                div class="mt-8 space-y-4" {
                    @for row in movies {
                        (stored_card(row))
                    }
                }
            }
        }),
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn shell(inner: Markup) -> Markup {
    html! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    (inner)
                    a class="mt-8 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Home" }
                }
            }
        }
    }
}

fn search_form(action: &str, label: &str, query: &str, button: &str) -> Markup {
    html! {
        form class="mt-6" method="get" action=(action) {
            label class="block text-sm font-medium text-gray-700" for="query" { (label) }
            input class=(INPUT_CLASS) name="query" id="query" value=(query);
            button class=(format!("mt-4 w-full {BUTTON_CLASS}")) type="submit" { (button) }
        }
    }
}

fn stored_movie_list(movies: &[movie::Model], searched: bool, query: &str) -> Markup {
    html! {
        @if !movies.is_empty() {
            div class="mt-8 space-y-4" {
                @for row in movies {
                    (stored_card(row))
                }
            }
        } @else if searched {
            p class="mt-8 text-gray-600" { "No movies found for: " (query) }
        }
    }
}

fn stored_card(row: &movie::Model) -> Markup {
    html! {
        div class="rounded-lg border border-gray-200 p-6" {
            div class="flex items-start justify-between gap-4" {
                h2 class="text-xl font-semibold text-gray-900" {
                    (row.title.as_deref().unwrap_or(FIELD_PLACEHOLDER))
                }
                form method="post" action="/movies/delete" {
                    input type="hidden" name="id" value=(row.id);
                    button class="text-sm text-red-600 hover:text-red-800" type="submit" { "Delete" }
                }
            }
            (field_lines(&MovieDetails::from(row.clone())))
        }
    }
}

fn details_card(details: &MovieDetails) -> Markup {
    html! {
        div class="rounded-lg border border-gray-200 p-6" {
            h2 class="text-xl font-semibold text-gray-900" {
                (details.title.as_deref().unwrap_or(FIELD_PLACEHOLDER))
            }
            (field_lines(details))
        }
    }
}

fn field_lines(details: &MovieDetails) -> Markup {
    let lines = [
        ("Year", &details.year),
        ("Rated", &details.rated),
        ("Released", &details.released),
        ("Runtime", &details.runtime),
        ("Genre", &details.genre),
        ("Director", &details.director),
        ("Writer", &details.writer),
        ("Actors", &details.actors),
        ("Plot", &details.plot),
    ];

    html! {
        dl class="mt-3 space-y-1 text-sm text-gray-700" {
            @for (label, value) in lines {
                div class="flex gap-2" {
                    dt class="font-medium text-gray-500" { (label) ":" }
                    dd { (value.as_deref().unwrap_or(FIELD_PLACEHOLDER)) }
                }
            }
        }
    }
}
